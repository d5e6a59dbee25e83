//! # qg-cli
//!
//! Command-line interface for QuotaGate.
//!
//! Drives the compliance engine against file-backed stores under a
//! `.qg/` data directory:
//! - `qg assign` — assign a goal; milestones are generated on the spot
//! - `qg target list/show/retire` — inspect and retire targets
//! - `qg roster add/list/show/reinstate` — manage the agent roster
//! - `qg deal record/list`, `qg activity record/list` — seed collaborator data
//! - `qg sweep` — run one compliance sweep (normally an external
//!   scheduler's job)

mod commands;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;

/// QuotaGate CLI — sales target compliance gating.
#[derive(Parser)]
#[command(name = "qg", version, about)]
struct Cli {
    /// Data root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    data_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a goal to an agent.
    Assign {
        /// Assignee agent ID.
        assignee: String,
        /// Goal value (e.g., 10000).
        #[arg(long)]
        value: f64,
        /// Period start (YYYY-MM-DD or RFC 3339).
        #[arg(long)]
        start: String,
        /// Period end (YYYY-MM-DD or RFC 3339).
        #[arg(long)]
        end: String,
        /// Period type: month, quarter, or year.
        #[arg(long, default_value = "quarter")]
        period: String,
        /// Metric the goal measures: revenue, pipeline_value, activities, calls.
        #[arg(long, default_value = "revenue")]
        metric: String,
        /// Incentive paid on completion.
        #[arg(long, default_value_t = 0.0)]
        incentive: f64,
    },
    /// Inspect and retire targets.
    Target {
        #[command(subcommand)]
        command: commands::target::TargetCommands,
    },
    /// Manage the agent roster.
    Roster {
        #[command(subcommand)]
        command: commands::roster::RosterCommands,
    },
    /// Record and list deals.
    Deal {
        #[command(subcommand)]
        command: commands::deal::DealCommands,
    },
    /// Record and list activities.
    Activity {
        #[command(subcommand)]
        command: commands::activity::ActivityCommands,
    },
    /// Run one compliance sweep.
    Sweep {
        /// Evaluate as if invoked at this instant (defaults to now).
        #[arg(long)]
        at: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so tables and JSON stay clean on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("qg_compliance=info".parse()?)
                .add_directive("qg_cli=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let data_root = cli.data_root.canonicalize().unwrap_or(cli.data_root);
    let config = EngineConfig::for_root(&data_root);

    match &cli.command {
        Commands::Assign {
            assignee,
            value,
            start,
            end,
            period,
            metric,
            incentive,
        } => commands::target::assign(
            &config, assignee, *value, start, end, period, metric, *incentive,
        ),
        Commands::Target { command } => commands::target::execute(command, &config),
        Commands::Roster { command } => commands::roster::execute(command, &config),
        Commands::Deal { command } => commands::deal::execute(command, &config),
        Commands::Activity { command } => commands::activity::execute(command, &config),
        Commands::Sweep { at } => commands::sweep::execute(&config, at.as_deref()),
    }
}
