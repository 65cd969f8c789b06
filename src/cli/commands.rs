use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::aggregate::{Aggregator, Boundary, RangeAggregator, RangeScheme, ValueAggregator};
use crate::render::OutputFormat;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Group rows from a result dump into nested buckets
    Aggregate {
        /// JSON dump to read rows from (array or one object per line)
        #[arg(short, long)]
        input: PathBuf,

        /// Grouping spec, repeatable; order sets nesting. Either a dotted
        /// attribute path (country, probe.asn_v4) or path:b1,b2,... for
        /// range bucketing (rtt:10,20,30)
        #[arg(short, long = "by", required = true)]
        by: Vec<String>,

        /// Maximum rows kept per innermost bucket
        #[arg(long)]
        max_per_bucket: Option<usize>,

        /// Which edge of each range interval is closed
        #[arg(long, default_value = "lower-inclusive")]
        range_scheme: RangeScheme,

        /// Output format
        #[arg(short, long, default_value = "plain")]
        format: OutputFormat,
    },

    /// List distinct values of an attribute with row counts
    Distinct {
        /// JSON dump to read rows from
        #[arg(short, long)]
        input: PathBuf,

        /// Dotted attribute path to count by
        #[arg(short, long)]
        by: String,
    },
}

/// Parses a grouping spec from the command line: a dotted attribute path,
/// optionally followed by `:` and a comma-separated ascending boundary list.
pub fn parse_aggregator(spec: &str, scheme: RangeScheme) -> Result<Aggregator> {
    let Some((path, bounds)) = spec.split_once(':') else {
        return Ok(ValueAggregator::new(spec).into());
    };
    let mut boundaries = Vec::new();
    for token in bounds.split(',') {
        let token = token.trim();
        let boundary = match token.parse::<i64>() {
            Ok(int) => Boundary::from(int),
            Err(_) => Boundary::from(
                token
                    .parse::<f64>()
                    .with_context(|| format!("invalid boundary `{token}` in `{spec}`"))?,
            ),
        };
        boundaries.push(boundary);
    }
    let aggregator = RangeAggregator::new(path, boundaries)?.with_scheme(scheme);
    Ok(aggregator.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_parses_to_value_aggregator() {
        let agg = parse_aggregator("probe.country", RangeScheme::default()).unwrap();
        assert!(matches!(agg, Aggregator::Value(_)));
        assert_eq!(agg.path(), "probe.country");
    }

    #[test]
    fn test_boundary_list_parses_to_range_aggregator() {
        let agg = parse_aggregator("rtt:10,20,30", RangeScheme::default()).unwrap();
        assert!(matches!(agg, Aggregator::Range(_)));
        assert_eq!(agg.path(), "rtt");
    }

    #[test]
    fn test_float_boundaries_parse() {
        let agg = parse_aggregator("loss: 0.5, 1.5", RangeScheme::default()).unwrap();
        assert!(matches!(agg, Aggregator::Range(_)));
    }

    #[test]
    fn test_bad_boundary_token_is_an_error() {
        assert!(parse_aggregator("rtt:10,fast", RangeScheme::default()).is_err());
    }

    #[test]
    fn test_descending_boundaries_are_rejected() {
        assert!(parse_aggregator("rtt:30,20,10", RangeScheme::default()).is_err());
    }
}
