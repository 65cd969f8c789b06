use std::cmp::Ordering;
use std::fmt;

/// Classification key produced by an aggregator.
///
/// Keys form a single total order so bucket trees iterate deterministically
/// even when rows mix value types: the null sentinel sorts before everything
/// and compares equal only to itself, booleans come next, then numbers
/// (integer and float representations compare numerically), then strings by
/// content. The null sentinel displays as the literal text `null`.
#[derive(Debug, Clone)]
pub enum BucketKey {
    /// Missing/None attribute value
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl BucketKey {
    fn rank(&self) -> u8 {
        match self {
            BucketKey::Null => 0,
            BucketKey::Bool(_) => 1,
            BucketKey::Int(_) | BucketKey::Float(_) => 2,
            BucketKey::Str(_) => 3,
        }
    }

    /// Numeric view of the key, for range bucketing.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            BucketKey::Int(i) => Some(*i as f64),
            BucketKey::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            BucketKey::Null => "null",
            BucketKey::Bool(_) => "boolean",
            BucketKey::Int(_) => "integer",
            BucketKey::Float(_) => "float",
            BucketKey::Str(_) => "string",
        }
    }
}

impl Ord for BucketKey {
    fn cmp(&self, other: &Self) -> Ordering {
        use BucketKey::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Str(a), Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for BucketKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BucketKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BucketKey {}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Null => write!(f, "null"),
            BucketKey::Bool(b) => write!(f, "{b}"),
            BucketKey::Int(i) => write!(f, "{i}"),
            BucketKey::Float(v) => write!(f, "{v}"),
            BucketKey::Str(s) => write!(f, "{s}"),
        }
    }
}
