//! Generic multi-key aggregation engine.
//!
//! Groups an arbitrary collection of rows into nested buckets according to
//! an ordered chain of aggregators: exact-value grouping or numeric range
//! bucketing, composed to any depth. The engine does no I/O and holds only
//! references into the caller's rows; renderers consume the resulting tree.

use std::collections::BTreeMap;

use tracing::debug;

pub use errors::{AggregateError, ChainError};
pub use key::BucketKey;
pub use path::{Field, FieldPath, Record};
pub use range::{Boundary, RangeAggregator, RangeScheme};
pub use value::ValueAggregator;

mod errors;
mod key;
mod path;
mod range;
mod value;

/// A single grouping strategy in a chain.
#[derive(Debug, Clone)]
pub enum Aggregator {
    Value(ValueAggregator),
    Range(RangeAggregator),
}

impl Aggregator {
    pub fn path(&self) -> &str {
        match self {
            Aggregator::Value(agg) => agg.path(),
            Aggregator::Range(agg) => agg.path(),
        }
    }

    fn key_for(&self, row: &dyn Record, row_index: usize) -> Result<BucketKey, AggregateError> {
        match self {
            Aggregator::Value(agg) => agg.key_for(row, row_index),
            Aggregator::Range(agg) => agg.key_for(row, row_index),
        }
    }
}

impl From<ValueAggregator> for Aggregator {
    fn from(agg: ValueAggregator) -> Self {
        Aggregator::Value(agg)
    }
}

impl From<RangeAggregator> for Aggregator {
    fn from(agg: RangeAggregator) -> Self {
        Aggregator::Range(agg)
    }
}

/// An ordered, non-empty list of aggregators plus an optional per-leaf cap.
///
/// Order sets nesting depth: the first aggregator produces the outermost
/// grouping, the last produces the innermost row lists.
#[derive(Debug, Clone)]
pub struct AggregatorChain {
    aggregators: Vec<Aggregator>,
    max_per_bucket: Option<usize>,
}

impl AggregatorChain {
    pub fn new(aggregators: Vec<Aggregator>) -> Result<Self, ChainError> {
        if aggregators.is_empty() {
            return Err(ChainError::EmptyChain);
        }
        Ok(Self {
            aggregators,
            max_per_bucket: None,
        })
    }

    /// Cap each leaf bucket at `max` rows. The cap is applied after full
    /// classification: overflow rows are omitted from that leaf only, never
    /// redistributed, and sibling buckets are unaffected.
    pub fn with_max_per_bucket(mut self, max: usize) -> Self {
        self.max_per_bucket = Some(max);
        self
    }

    pub fn depth(&self) -> usize {
        self.aggregators.len()
    }
}

/// Result of aggregation: one `Node` level per aggregator in the chain,
/// then `Leaf` row lists. Node keys iterate in ascending [`BucketKey`]
/// order; leaf rows keep their input order.
#[derive(Debug)]
pub enum BucketTree<'a, R> {
    Node(BTreeMap<BucketKey, BucketTree<'a, R>>),
    Leaf(Vec<&'a R>),
}

impl<R> BucketTree<'_, R> {
    /// Total number of rows across all leaves.
    pub fn row_count(&self) -> usize {
        match self {
            BucketTree::Leaf(rows) => rows.len(),
            BucketTree::Node(children) => children.values().map(Self::row_count).sum(),
        }
    }

    /// Number of `Node` levels above the leaves.
    pub fn depth(&self) -> usize {
        match self {
            BucketTree::Leaf(_) => 0,
            BucketTree::Node(children) => {
                1 + children.values().map(Self::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Partition `rows` into a nested bucket tree, one level per aggregator.
///
/// Rows are classified eagerly and each appears in exactly one bucket per
/// level, in input order. Any attribute-resolution or type error aborts the
/// whole call; nothing is silently defaulted.
pub fn aggregate<'a, R: Record>(
    rows: &'a [R],
    chain: &AggregatorChain,
) -> Result<BucketTree<'a, R>, AggregateError> {
    let indexed: Vec<(usize, &'a R)> = rows.iter().enumerate().collect();
    let tree = aggregate_level(&indexed, &chain.aggregators, chain.max_per_bucket)?;
    debug!(
        rows = rows.len(),
        depth = chain.depth(),
        kept = tree.row_count(),
        "aggregation complete"
    );
    Ok(tree)
}

fn aggregate_level<'a, R: Record>(
    rows: &[(usize, &'a R)],
    aggregators: &[Aggregator],
    max_per_bucket: Option<usize>,
) -> Result<BucketTree<'a, R>, AggregateError> {
    let Some((first, rest)) = aggregators.split_first() else {
        // chain construction guarantees at least one aggregator
        return Ok(BucketTree::Leaf(Vec::new()));
    };

    let mut buckets: BTreeMap<BucketKey, Vec<(usize, &'a R)>> = BTreeMap::new();
    for &(index, row) in rows {
        let key = first.key_for(row, index)?;
        buckets.entry(key).or_default().push((index, row));
    }

    let mut children = BTreeMap::new();
    if rest.is_empty() {
        for (key, mut members) in buckets {
            if let Some(max) = max_per_bucket {
                members.truncate(max);
            }
            let leaf = members.into_iter().map(|(_, row)| row).collect();
            children.insert(key, BucketTree::Leaf(leaf));
        }
    } else {
        for (key, members) in buckets {
            children.insert(key, aggregate_level(&members, rest, max_per_bucket)?);
        }
    }
    Ok(BucketTree::Node(children))
}
