use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{AggregateError, ChainError};
use super::key::BucketKey;
use super::path::{FieldPath, Record};

/// A range boundary. Keeps the caller's numeric type so labels render
/// integer boundaries as `10`, not `10.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    Int(i64),
    Float(f64),
}

impl Boundary {
    pub fn value(self) -> f64 {
        match self {
            Boundary::Int(i) => i as f64,
            Boundary::Float(f) => f,
        }
    }
}

impl From<i64> for Boundary {
    fn from(value: i64) -> Self {
        Boundary::Int(value)
    }
}

impl From<i32> for Boundary {
    fn from(value: i32) -> Self {
        Boundary::Int(value as i64)
    }
}

impl From<f64> for Boundary {
    fn from(value: f64) -> Self {
        Boundary::Float(value)
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Int(i) => write!(f, "{i}"),
            Boundary::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Which edge of each interval is closed.
///
/// The platform's legacy tooling shipped both behaviors, one per command, so
/// both are kept as named variants rather than silently unified.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum RangeScheme {
    /// `b_i <= value < b_{i+1}`: a value sitting on a boundary lands in the
    /// interval above it
    #[default]
    LowerInclusive,
    /// `b_{i-1} < value <= b_i`: a value sitting on a boundary lands in the
    /// interval below it
    UpperInclusive,
}

/// Groups rows by which half-open interval a numeric attribute falls into,
/// labelled `< b_0`, `b_i-b_{i+1}`, or `> b_last`.
///
/// Boundaries must be strictly ascending and non-empty; both are checked at
/// construction so a bad chain never touches a row. Labels are always built
/// from consecutive configured boundaries.
#[derive(Debug, Clone)]
pub struct RangeAggregator {
    path: FieldPath,
    boundaries: Vec<Boundary>,
    scheme: RangeScheme,
}

impl RangeAggregator {
    pub fn new<I, B>(path: impl Into<String>, boundaries: I) -> Result<Self, ChainError>
    where
        I: IntoIterator<Item = B>,
        B: Into<Boundary>,
    {
        let path = FieldPath::new(path);
        let boundaries: Vec<Boundary> = boundaries.into_iter().map(Into::into).collect();
        if boundaries.is_empty() {
            return Err(ChainError::NoBoundaries {
                path: path.as_str().to_owned(),
            });
        }
        for pair in boundaries.windows(2) {
            if pair[1].value() <= pair[0].value() {
                return Err(ChainError::NonAscendingBoundaries {
                    path: path.as_str().to_owned(),
                    previous: pair[0].to_string(),
                    boundary: pair[1].to_string(),
                });
            }
        }
        Ok(Self {
            path,
            boundaries,
            scheme: RangeScheme::default(),
        })
    }

    pub fn with_scheme(mut self, scheme: RangeScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn path(&self) -> &str {
        self.path.as_str()
    }

    pub(crate) fn key_for(
        &self,
        row: &dyn Record,
        row_index: usize,
    ) -> Result<BucketKey, AggregateError> {
        let key = self.path.resolve(row, row_index)?;
        let value = key.as_f64().ok_or_else(|| AggregateError::NotNumeric {
            path: self.path.as_str().to_owned(),
            found: key.type_name(),
            row: row_index,
        })?;
        Ok(BucketKey::Str(self.label(value)))
    }

    fn label(&self, value: f64) -> String {
        let bounds = &self.boundaries;
        let last = bounds.len() - 1;
        match self.scheme {
            RangeScheme::LowerInclusive => {
                if value < bounds[0].value() {
                    return format!("< {}", bounds[0]);
                }
                // largest boundary at or below the value
                let i = bounds
                    .iter()
                    .rposition(|b| b.value() <= value)
                    .unwrap_or(last);
                if i == last {
                    format!("> {}", bounds[last])
                } else {
                    format!("{}-{}", bounds[i], bounds[i + 1])
                }
            }
            RangeScheme::UpperInclusive => {
                if value > bounds[last].value() {
                    return format!("> {}", bounds[last]);
                }
                // smallest boundary at or above the value
                let i = bounds.iter().position(|b| value <= b.value()).unwrap_or(0);
                if i == 0 {
                    format!("< {}", bounds[0])
                } else {
                    format!("{}-{}", bounds[i - 1], bounds[i])
                }
            }
        }
    }
}
