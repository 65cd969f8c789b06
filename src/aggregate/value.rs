use super::errors::AggregateError;
use super::key::BucketKey;
use super::path::{FieldPath, Record};

/// Groups rows by the exact value of a (possibly dotted) attribute.
///
/// Construction never fails; an unresolvable path surfaces at
/// classification time so the caller can report which row broke.
#[derive(Debug, Clone)]
pub struct ValueAggregator {
    path: FieldPath,
}

impl ValueAggregator {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: FieldPath::new(path),
        }
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub(crate) fn key_for(
        &self,
        row: &dyn Record,
        row_index: usize,
    ) -> Result<BucketKey, AggregateError> {
        self.path.resolve(row, row_index)
    }
}
