//! Command-line surface

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, ValueEnum};
use pool_finder_core::ReportFormat;
use pool_finder_provider::{DEFAULT_BASE_URL, MAX_PAGE_SIZE};

/// UltraDNS Subaccounts Zones and Pools Finder
#[derive(Parser, Debug)]
#[command(name = "pool-finder")]
#[command(version)]
#[command(about = "List pool records across every sub-account of an UltraDNS reseller account")]
pub struct Args {
    /// Bearer token to use directly (cannot be refreshed on expiry)
    #[arg(long, env = "ULTRADNS_TOKEN", hide_env_values = true,
          value_parser = NonEmptyStringValueParser::new())]
    pub token: Option<String>,

    /// Reseller username (required with --password when no token is given)
    #[arg(long, env = "ULTRADNS_USERNAME", required_unless_present = "token",
          value_parser = NonEmptyStringValueParser::new(), help_heading = "Authentication")]
    pub username: Option<String>,

    /// Reseller password (required with --username when no token is given)
    #[arg(long, env = "ULTRADNS_PASSWORD", hide_env_values = true,
          required_unless_present = "token",
          value_parser = NonEmptyStringValueParser::new(), help_heading = "Authentication")]
    pub password: Option<String>,

    /// Output file name; prints to the terminal if not provided
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// API base URL
    #[arg(long, env = "ULTRADNS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Items requested per page from paginated endpoints
    #[arg(long, default_value_t = MAX_PAGE_SIZE,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    pub page_size: u32,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}
