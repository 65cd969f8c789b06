use serde_json::Value;

use super::errors::AggregateError;
use super::key::BucketKey;

/// Capability interface for rows: named-attribute lookup.
///
/// The engine reads attributes off rows through this trait and nothing else;
/// rows stay owned by the caller and are never copied or mutated. Any row
/// source (probe listings, measurement metadata, parsed results) plugs in by
/// implementing it.
pub trait Record {
    /// Look up a single attribute by name.
    fn get(&self, name: &str) -> Option<Field<'_>>;
}

/// A resolved attribute: either a scalar classification value or a nested
/// record that further path segments resolve against.
pub enum Field<'a> {
    Scalar(BucketKey),
    Nested(&'a dyn Record),
}

impl Record for Value {
    fn get(&self, name: &str) -> Option<Field<'_>> {
        let Value::Object(map) = self else {
            return None;
        };
        match map.get(name)? {
            Value::Null => Some(Field::Scalar(BucketKey::Null)),
            Value::Bool(b) => Some(Field::Scalar(BucketKey::Bool(*b))),
            Value::Number(n) => Some(Field::Scalar(match n.as_i64() {
                Some(i) => BucketKey::Int(i),
                None => BucketKey::Float(n.as_f64().unwrap_or(f64::NAN)),
            })),
            Value::String(s) => Some(Field::Scalar(BucketKey::Str(s.clone()))),
            nested @ Value::Object(_) => Some(Field::Nested(nested)),
            // Arrays have no named attributes to resolve against
            Value::Array(_) => None,
        }
    }
}

/// A dot-separated attribute path (`probe.country`), resolved one segment
/// at a time: the first segment against the row, each subsequent segment
/// against the previous result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn new(path: impl Into<String>) -> Self {
        let raw = path.into();
        let segments = raw.split('.').map(str::to_owned).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Resolve the path against a row, returning the final scalar unchanged
    /// in type. A missing segment or a non-scalar endpoint is an error that
    /// names the path, the segment, and the row's position.
    pub fn resolve(
        &self,
        row: &dyn Record,
        row_index: usize,
    ) -> Result<BucketKey, AggregateError> {
        enum Node<'a> {
            Record(&'a dyn Record),
            Scalar(BucketKey),
        }

        let mut node = Node::Record(row);
        for segment in &self.segments {
            let missing = || AggregateError::Attribute {
                path: self.raw.clone(),
                segment: segment.clone(),
                row: row_index,
            };
            node = match node {
                Node::Record(record) => match record.get(segment) {
                    Some(Field::Scalar(key)) => Node::Scalar(key),
                    Some(Field::Nested(nested)) => Node::Record(nested),
                    None => return Err(missing()),
                },
                // Scalars have no attributes, so any remaining segment is missing
                Node::Scalar(_) => return Err(missing()),
            };
        }
        match node {
            Node::Scalar(key) => Ok(key),
            Node::Record(_) => Err(AggregateError::NotScalar {
                path: self.raw.clone(),
                row: row_index,
            }),
        }
    }
}
