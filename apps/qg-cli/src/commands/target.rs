// target.rs — Target subcommands: assign, list, show, retire.

use chrono::Utc;
use clap::Subcommand;

use qg_compliance::assign_target;
use qg_directory::FileDirectory;
use qg_target::{FileTargetStore, MetricKind, PeriodType, TargetDraft, TargetStore};

use crate::commands::{parse_id, parse_timestamp, truncate};
use crate::config::EngineConfig;

#[derive(Subcommand)]
pub enum TargetCommands {
    /// List all targets.
    List,
    /// Show details for a specific target.
    Show {
        /// Target ID.
        id: String,
    },
    /// Retire (soft-delete) a target.
    Retire {
        /// Target ID.
        id: String,
    },
}

pub fn execute(cmd: &TargetCommands, config: &EngineConfig) -> anyhow::Result<()> {
    let store = FileTargetStore::new(&config.targets_dir)?;

    match cmd {
        TargetCommands::List => list_targets(&store),
        TargetCommands::Show { id } => show_target(&store, id),
        TargetCommands::Retire { id } => retire_target(&store, id),
    }
}

pub fn assign(
    config: &EngineConfig,
    assignee: &str,
    value: f64,
    start: &str,
    end: &str,
    period: &str,
    metric: &str,
    incentive: f64,
) -> anyhow::Result<()> {
    let directory = FileDirectory::new(&config.roster_dir)?;
    let targets = FileTargetStore::new(&config.targets_dir)?;

    let draft = TargetDraft {
        assignee_id: parse_id(assignee)?,
        period_type: period.parse::<PeriodType>()?,
        period_start: parse_timestamp(start)?,
        period_end: parse_timestamp(end)?,
        target_kind: metric.parse::<MetricKind>()?,
        target_value: value,
        incentive_amount: incentive,
    };

    let target = assign_target(&directory, &targets, draft, Utc::now())?;

    println!("Target assigned: {}", target.target_id);
    println!("  Assignee: {}", target.assignee_id);
    println!(
        "  Period:   {} — {} ({})",
        target.period_start.to_rfc3339(),
        target.period_end.to_rfc3339(),
        target.period_type
    );
    println!("  Goal:     {} {}", target.target_value, target.target_kind);
    println!();
    println!("Milestones:");
    for m in &target.milestones {
        println!(
            "  {}. {:<20} {:>12} {:<14} due {}",
            m.step_order,
            m.name,
            m.target_value,
            m.metric.to_string(),
            m.deadline.to_rfc3339()
        );
    }

    Ok(())
}

fn list_targets(store: &FileTargetStore) -> anyhow::Result<()> {
    let targets = store.list()?;

    if targets.is_empty() {
        println!("No targets found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<38} {:>12} {:<14} {:<8}",
        "ID", "ASSIGNEE", "VALUE", "METRIC", "STATE"
    );
    println!("{}", "-".repeat(114));

    for t in &targets {
        println!(
            "{:<38} {:<38} {:>12} {:<14} {:<8}",
            t.target_id,
            t.assignee_id,
            t.target_value,
            t.target_kind.to_string(),
            if t.is_retired() { "retired" } else { "live" },
        );
    }
    println!("\n{} target(s) total.", targets.len());

    Ok(())
}

fn show_target(store: &FileTargetStore, id: &str) -> anyhow::Result<()> {
    let target_id = parse_id(id)?;
    match store.get(target_id)? {
        Some(t) => {
            println!("Target:    {}", t.target_id);
            println!("Assignee:  {}", t.assignee_id);
            println!("Tenant:    {}", t.tenant_id);
            println!("Period:    {} — {}", t.period_start.to_rfc3339(), t.period_end.to_rfc3339());
            println!("Goal:      {} {}", t.target_value, t.target_kind);
            println!("Achieved:  {}", t.achieved_value);
            println!("Incentive: {}", t.incentive_amount);
            if let Some(deleted) = t.deleted_at {
                println!("Retired:   {}", deleted.to_rfc3339());
            }
            println!();
            println!(
                "{:<4} {:<22} {:<14} {:>12} {:>12} {:<8} {}",
                "#", "MILESTONE", "METRIC", "GOAL", "ACHIEVED", "STATUS", "DEADLINE"
            );
            for m in &t.milestones {
                println!(
                    "{:<4} {:<22} {:<14} {:>12} {:>12} {:<8} {}",
                    m.step_order,
                    truncate(&m.name, 20),
                    m.metric.to_string(),
                    m.target_value,
                    m.achieved_value,
                    m.status.to_string(),
                    m.deadline.to_rfc3339()
                );
            }
        }
        None => {
            eprintln!("Target not found: {}", id);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn retire_target(store: &FileTargetStore, id: &str) -> anyhow::Result<()> {
    let target_id = parse_id(id)?;
    let target = store.retire(target_id, Utc::now())?;
    println!(
        "Target retired: {} (assignee {})",
        target.target_id, target.assignee_id
    );
    Ok(())
}
