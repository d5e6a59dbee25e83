// activity.rs — Activity subcommands: record, list.

use chrono::Utc;
use clap::Subcommand;

use qg_directory::{Directory, FileDirectory};
use qg_ledger::{Activity, FileActivityLog};

use crate::commands::{parse_id, parse_timestamp, truncate};
use crate::config::EngineConfig;

#[derive(Subcommand)]
pub enum ActivityCommands {
    /// Log an activity for an agent.
    Record {
        /// Owning agent ID.
        owner: String,
        /// Short description (e.g., "Discovery call with Acme").
        subject: String,
        /// Timestamp (defaults to now).
        #[arg(long)]
        at: Option<String>,
    },
    /// List all activities.
    List,
}

pub fn execute(cmd: &ActivityCommands, config: &EngineConfig) -> anyhow::Result<()> {
    let log = FileActivityLog::new(&config.activities_dir)?;

    match cmd {
        ActivityCommands::Record { owner, subject, at } => {
            record_activity(config, &log, owner, subject, at.as_deref())
        }
        ActivityCommands::List => list_activities(&log),
    }
}

fn record_activity(
    config: &EngineConfig,
    log: &FileActivityLog,
    owner: &str,
    subject: &str,
    at: Option<&str>,
) -> anyhow::Result<()> {
    let owner_id = parse_id(owner)?;
    let directory = FileDirectory::new(&config.roster_dir)?;
    let tenant_id = match directory.get(owner_id)? {
        Some(agent) => agent.tenant_id,
        None => anyhow::bail!("owner not found in roster: {}", owner),
    };

    let at = match at {
        Some(s) => parse_timestamp(s)?,
        None => Utc::now(),
    };

    let activity = Activity::new(tenant_id, owner_id, subject, at);
    log.record(&activity)?;

    println!("Activity logged: {}", activity.activity_id);
    Ok(())
}

fn list_activities(log: &FileActivityLog) -> anyhow::Result<()> {
    let mut activities = log.list()?;
    activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    if activities.is_empty() {
        println!("No activities found.");
        return Ok(());
    }

    println!("{:<38} {:<38} {:<30} {}", "ID", "OWNER", "SUBJECT", "AT");
    println!("{}", "-".repeat(120));

    for a in &activities {
        println!(
            "{:<38} {:<38} {:<30} {}",
            a.activity_id,
            a.owner_id,
            truncate(&a.subject, 28),
            a.created_at.to_rfc3339(),
        );
    }
    println!("\n{} activity record(s) total.", activities.len());

    Ok(())
}
