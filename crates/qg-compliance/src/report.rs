// report.rs — What one compliance sweep did.
//
// The report exists for observability: the CLI prints it, the log gets
// a summary line, and tests assert against it. It is not an audit
// record — the only durable trace of a block is on the agent itself.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One enforced block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockRecord {
    pub agent_id: Uuid,
    pub display_name: String,
    pub reason: String,
}

/// One agent whose evaluation was aborted by a data-access failure.
/// The agent keeps whatever state the last completed target write left;
/// the next sweep picks them up again.
#[derive(Debug, Clone, Serialize)]
pub struct AgentFailure {
    pub agent_id: Uuid,
    pub message: String,
}

/// Summary of a single sweep run.
#[derive(Debug, Serialize)]
pub struct SweepReport {
    /// The `now` this sweep was invoked with.
    pub started_at: DateTime<Utc>,
    /// Agents that passed the eligibility filter and were evaluated.
    pub agents_scanned: usize,
    /// Active agents skipped as ineligible (admin-tier or no
    /// quota-carrying role).
    pub agents_skipped: usize,
    /// Milestones written as passed this run.
    pub milestones_passed: usize,
    /// Milestones written as failed this run.
    pub milestones_failed: usize,
    /// Blocks enforced this run, in scan order.
    pub blocks: Vec<BlockRecord>,
    /// Per-agent failures isolated during the run.
    pub errors: Vec<AgentFailure>,
}

impl SweepReport {
    pub fn new(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            agents_scanned: 0,
            agents_skipped: 0,
            milestones_passed: 0,
            milestones_failed: 0,
            blocks: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Whether the sweep enforced any blocks.
    pub fn any_blocks(&self) -> bool {
        !self.blocks.is_empty()
    }
}
