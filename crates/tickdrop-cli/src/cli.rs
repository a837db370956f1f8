//! CLI argument definitions for tickdrop.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `run` | Execute one collection pass against the configured bucket |
//! | `companies` | List monitored companies, optionally filtered |
//! | `sectors` | Show the sector distribution of the directory |

use clap::{Args, Parser, Subcommand, ValueEnum};

use tickdrop_core::CapTier;

/// Scheduled stock-quote collection pipeline.
///
/// Polls the quote provider for every company in the built-in directory,
/// normalizes the responses and writes timestamped JSON batches to object
/// storage. Configuration comes from ALPHA_VANTAGE_API_KEY and
/// S3_BUCKET_NAME.
#[derive(Debug, Parser)]
#[command(name = "tickdrop", version, about = "Stock quote collection pipeline")]
pub struct Cli {
    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute one collection pass and print the run summary.
    ///
    /// Requires ALPHA_VANTAGE_API_KEY and S3_BUCKET_NAME; the pass respects
    /// the provider's free-tier request spacing, so a full directory sweep
    /// takes several minutes.
    Run,

    /// List monitored companies, optionally filtered.
    Companies(CompaniesArgs),

    /// Show the sector distribution of the monitored directory.
    Sectors,
}

/// Arguments for the `companies` command.
#[derive(Debug, Args)]
pub struct CompaniesArgs {
    /// Only companies in this sector (e.g. "Energy").
    #[arg(long)]
    pub sector: Option<String>,

    /// Only companies in this capitalization tier.
    #[arg(long, value_enum)]
    pub tier: Option<TierArg>,
}

/// Capitalization tier filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    LargeCap,
    MidCap,
    SmallCap,
}

impl From<TierArg> for CapTier {
    fn from(value: TierArg) -> Self {
        match value {
            TierArg::LargeCap => CapTier::LargeCap,
            TierArg::MidCap => CapTier::MidCap,
            TierArg::SmallCap => CapTier::SmallCap,
        }
    }
}
