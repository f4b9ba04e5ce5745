mod search;
mod select;

use shankh_core::{Orchestrator, OrchestratorBuilder};

use crate::cli::{Cli, Command, SelectArgs};
use crate::error::CliError;

pub use search::SearchReport;
pub use select::{Section, SelectionReport};

/// Command output handed to the renderer.
#[derive(Debug)]
pub enum Report {
    Selection(SelectionReport),
    Search(SearchReport),
}

impl Report {
    /// 0 when every source loaded, 3 on partial failure, 5 when nothing loaded.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Selection(report) if report.all_failed() => 5,
            Self::Selection(report) if !report.failures.is_empty() => 3,
            Self::Selection(_) | Self::Search(_) => 0,
        }
    }
}

pub async fn run(cli: &Cli) -> Result<Report, CliError> {
    match &cli.command {
        Command::Select(args) => {
            let orchestrator = build_orchestrator(cli, args)?;
            Ok(Report::Selection(select::run(args, &orchestrator).await?))
        }
        Command::Search(args) => Ok(Report::Search(search::run(args)?)),
    }
}

/// Environment first, then command-line flags.
fn build_orchestrator(cli: &Cli, args: &SelectArgs) -> Result<Orchestrator, CliError> {
    let mut builder = OrchestratorBuilder::new().with_env()?;

    if let Some(base_url) = &cli.base_url {
        builder = builder.with_base_url(base_url.clone());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        builder = builder.with_timeout_ms(timeout_ms);
    }
    if let Some(period) = args.period {
        builder = builder.with_history_period(period);
    }
    if let Some(interval) = args.interval {
        builder = builder.with_history_interval(interval);
    }

    tracing::debug!(base_url = %builder.config().base_url, "dashboard services");
    Ok(builder.build()?)
}
