use thiserror::Error;

/// Aggregator-chain construction failures. These are raised before any row
/// is read, so a misconfigured chain never partially succeeds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("aggregator chain is empty")]
    EmptyChain,
    #[error("range aggregator for `{path}` has no boundaries")]
    NoBoundaries { path: String },
    #[error(
        "range aggregator for `{path}` has non-ascending boundaries: {previous} followed by {boundary}"
    )]
    NonAscendingBoundaries {
        path: String,
        previous: String,
        boundary: String,
    },
}

/// Classification-time failures. The engine propagates these unchanged and
/// never substitutes a default; skip/abort policy belongs to the caller.
/// Rows are opaque, so they are identified by their position in the input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("row {row}: attribute `{segment}` missing while resolving `{path}`")]
    Attribute {
        path: String,
        segment: String,
        row: usize,
    },
    #[error("row {row}: `{path}` resolves to a nested object, not a scalar value")]
    NotScalar { path: String, row: usize },
    #[error("row {row}: `{path}` is {found}, expected a numeric value")]
    NotNumeric {
        path: String,
        found: &'static str,
        row: usize,
    },
}
