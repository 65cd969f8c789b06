use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use atlas_cli::aggregate::{AggregatorChain, BucketTree, ValueAggregator, aggregate};
use atlas_cli::cli::{Cli, Commands, parse_aggregator};
use atlas_cli::import::load_rows;
use atlas_cli::render::{OutputFormat, render_counts, render_json, render_plain};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Aggregate {
            input,
            by,
            max_per_bucket,
            range_scheme,
            format,
        } => {
            let rows = load_rows(&input)?;
            let aggregators = by
                .iter()
                .map(|spec| parse_aggregator(spec, range_scheme))
                .collect::<Result<Vec<_>>>()?;
            let mut chain = AggregatorChain::new(aggregators)?;
            if let Some(max) = max_per_bucket {
                chain = chain.with_max_per_bucket(max);
            }
            let tree = aggregate(&rows, &chain)?;
            match format {
                OutputFormat::Plain => print!("{}", render_plain(&tree)),
                OutputFormat::Json => println!("{}", render_json(&tree)?),
            }
        }

        Commands::Distinct { input, by } => {
            let rows = load_rows(&input)?;
            let chain = AggregatorChain::new(vec![ValueAggregator::new(&by).into()])?;
            let tree = aggregate(&rows, &chain)?;
            let buckets = match &tree {
                BucketTree::Node(children) => children.len(),
                BucketTree::Leaf(_) => 0,
            };
            println!(
                "{}",
                format!("{buckets} distinct value(s) of {by} across {} row(s)", rows.len())
                    .green()
                    .bold()
            );
            print!("{}", render_counts(&tree));
        }
    }

    Ok(())
}
