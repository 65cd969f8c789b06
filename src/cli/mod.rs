pub mod commands;

use clap::Parser;
pub use commands::*;

#[derive(Parser, Debug)]
#[command(name = "atlas-cli")]
#[command(about = "A command-line client for grouping network-measurement results")]
#[command(
    long_about = "Groups locally stored measurement, probe, and result dumps into nested buckets:\n• Exact-value grouping on any dotted attribute path (country, probe.asn_v4)\n• Numeric range bucketing with configurable boundaries (rtt:10,20,30)\n• Arbitrary nesting, deterministic bucket ordering, per-bucket row caps"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}
