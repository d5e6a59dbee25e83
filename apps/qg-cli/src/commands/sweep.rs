// sweep.rs — Run one compliance sweep.
//
// In a deployment this is what the external scheduler invokes on a
// cadence. Running it twice with no new ledger data is harmless — every
// write the sweep makes is an idempotent overwrite.

use chrono::Utc;

use qg_compliance::ComplianceEvaluator;
use qg_directory::FileDirectory;
use qg_ledger::{FileActivityLog, FileDealLedger};
use qg_target::FileTargetStore;

use crate::commands::parse_timestamp;
use crate::config::EngineConfig;

pub fn execute(config: &EngineConfig, at: Option<&str>) -> anyhow::Result<()> {
    let now = match at {
        Some(s) => parse_timestamp(s)?,
        None => Utc::now(),
    };

    let targets = FileTargetStore::new(&config.targets_dir)?;
    let directory = FileDirectory::new(&config.roster_dir)?;
    let deals = FileDealLedger::new(&config.deals_dir)?;
    let activities = FileActivityLog::new(&config.activities_dir)?;

    let evaluator = ComplianceEvaluator::new(&targets, &directory, &deals, &activities);
    let report = evaluator.run(now)?;

    println!("Sweep at {}", report.started_at.to_rfc3339());
    println!("  Agents scanned:    {}", report.agents_scanned);
    println!("  Agents skipped:    {}", report.agents_skipped);
    println!("  Milestones passed: {}", report.milestones_passed);
    println!("  Milestones failed: {}", report.milestones_failed);

    if report.any_blocks() {
        println!();
        println!("Access revoked:");
        for block in &report.blocks {
            println!("  {} ({})", block.display_name, block.agent_id);
            println!("    {}", block.reason);
        }
    }

    if !report.errors.is_empty() {
        println!();
        println!("Agents skipped on error (will be retried next sweep):");
        for failure in &report.errors {
            println!("  {}: {}", failure.agent_id, failure.message);
        }
    }

    Ok(())
}
