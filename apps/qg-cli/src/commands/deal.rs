// deal.rs — Deal subcommands: record, list.
//
// In production the deal ledger belongs to the host CRM; these commands
// seed the file-backed reference ledger for demos and local testing.

use chrono::Utc;
use clap::Subcommand;

use qg_directory::{Directory, FileDirectory};
use qg_ledger::{Deal, FileDealLedger};

use crate::commands::{parse_id, parse_timestamp, truncate};
use crate::config::EngineConfig;

#[derive(Subcommand)]
pub enum DealCommands {
    /// Record a deal for an agent.
    Record {
        /// Owning agent ID.
        owner: String,
        /// Deal title.
        title: String,
        /// Deal value (omit for a deal with no value yet).
        #[arg(long)]
        value: Option<f64>,
        /// Pipeline status (e.g., "open", "won", "lost").
        #[arg(long, default_value = "open")]
        status: String,
        /// Last-modified timestamp (defaults to now).
        #[arg(long)]
        at: Option<String>,
    },
    /// List all deals.
    List,
}

pub fn execute(cmd: &DealCommands, config: &EngineConfig) -> anyhow::Result<()> {
    let ledger = FileDealLedger::new(&config.deals_dir)?;

    match cmd {
        DealCommands::Record {
            owner,
            title,
            value,
            status,
            at,
        } => record_deal(config, &ledger, owner, title, *value, status, at.as_deref()),
        DealCommands::List => list_deals(&ledger),
    }
}

fn record_deal(
    config: &EngineConfig,
    ledger: &FileDealLedger,
    owner: &str,
    title: &str,
    value: Option<f64>,
    status: &str,
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

    let deal = Deal::new(tenant_id, owner_id, title, value, status, at);
    ledger.record(&deal)?;

    println!("Deal recorded: {} ({} {})", deal.deal_id, deal.status, deal.amount());
    Ok(())
}

fn list_deals(ledger: &FileDealLedger) -> anyhow::Result<()> {
    let mut deals = ledger.list()?;
    deals.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    if deals.is_empty() {
        println!("No deals found.");
        return Ok(());
    }

    println!(
        "{:<38} {:<24} {:>12} {:<10} {}",
        "ID", "TITLE", "VALUE", "STATUS", "UPDATED"
    );
    println!("{}", "-".repeat(110));

    for d in &deals {
        println!(
            "{:<38} {:<24} {:>12} {:<10} {}",
            d.deal_id,
            truncate(&d.title, 22),
            d.amount(),
            truncate(&d.status, 10),
            d.updated_at.to_rfc3339(),
        );
    }
    println!("\n{} deal(s) total.", deals.len());

    Ok(())
}
