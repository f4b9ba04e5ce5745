//! CLI argument definitions for Shankh.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `select` | Load every dashboard source for one ticker |
//! | `search` | Search the bundled NIFTY ticker catalog |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | `SHANKH_API_BASE_URL` or `http://localhost:8000` | Dashboard services root |
//! | `--timeout-ms` | `SHANKH_TIMEOUT_MS` or `10000` | Per-request timeout |
//! | `--verbose` | off | Repeat for debug/trace logging |
//!
//! # Examples
//!
//! ```bash
//! shankh select RELIANCE.NS
//! shankh select INFY.NS --window 6M --format json --pretty
//! shankh search bank --limit 3
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use shankh_core::{HistoryInterval, HistoryPeriod, TimeWindow};

/// 🐚 Shankh - stock dashboard data from the terminal
///
/// Loads price history, next-day prediction, social sentiment and
/// financials for an NSE ticker and prints them as one view.
#[derive(Debug, Parser)]
#[command(
    name = "shankh",
    author,
    version,
    about = "Stock dashboard data from the terminal",
    long_about = "Shankh queries the dashboard services for one ticker and prints a \
consolidated view:\n\
\n\
  • Price chart for the chosen time window\n\
  • Next-day close prediction with trend\n\
  • Social sentiment with recent posts\n\
  • Latest income statement figures\n\
\n\
Use 'shankh <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Root URL of the dashboard services (overrides SHANKH_API_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in milliseconds (overrides SHANKH_TIMEOUT_MS).
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable sections for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// 📊 Load the full dashboard view for one ticker.
    ///
    /// Fetches all four sources concurrently. A failed source is reported
    /// on its own line and does not hide the others.
    ///
    /// # Examples
    ///
    ///   shankh select RELIANCE.NS
    ///   shankh select TCS.NS --window 1Y
    ///   shankh select ITC.NS --now 2025-03-31 --format json
    Select(SelectArgs),

    /// 🔍 Search the bundled ticker catalog.
    ///
    /// Case-insensitive match on ticker or company name.
    ///
    /// # Examples
    ///
    ///   shankh search reliance
    ///   shankh search bank --limit 3
    Search(SearchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SelectArgs {
    /// Ticker symbol, e.g. RELIANCE.NS.
    pub ticker: String,

    /// Visible chart range: 1M, 3M, 6M, 1Y or ALL.
    #[arg(long, default_value_t = TimeWindow::OneMonth)]
    pub window: TimeWindow,

    /// Reference date for the window (YYYY-MM-DD, defaults to today in UTC).
    #[arg(long)]
    pub now: Option<String>,

    /// Price history lookback requested from the service.
    #[arg(long)]
    pub period: Option<HistoryPeriod>,

    /// Price history bar spacing requested from the service.
    #[arg(long)]
    pub interval: Option<HistoryInterval>,

    /// Number of recent posts to include in the report.
    #[arg(long, default_value_t = 5)]
    pub tweets: usize,
}

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Ticker or company name fragment.
    pub query: String,

    /// Maximum number of matches.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}
