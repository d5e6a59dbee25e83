// enforcer.rs — Access enforcement: the irrevocable side of a block.
//
// Milestone verdicts are revisitable snapshots; this write is not. Once
// an agent is deactivated, no sweep ever reactivates them — only the
// explicit reinstatement operation does.
//
// The write is idempotent: applying a block twice (or with a newer
// reason) just replaces the stored reason and timestamp. No
// notifications, no audit records beyond the two metadata keys —
// escalation belongs to an external collaborator.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use qg_directory::{AgentRecord, Directory, DirectoryError};

use crate::error::ComplianceError;

/// Revokes directory access for agents that failed a blocking milestone.
pub struct AccessEnforcer<'a> {
    directory: &'a dyn Directory,
}

impl<'a> AccessEnforcer<'a> {
    pub fn new(directory: &'a dyn Directory) -> Self {
        Self { directory }
    }

    /// Deactivate the agent and merge the block reason and timestamp
    /// into their metadata bag, preserving unrelated keys. Returns the
    /// updated record.
    pub fn block(
        &self,
        agent_id: Uuid,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Result<AgentRecord, ComplianceError> {
        let mut agent = self
            .directory
            .get(agent_id)?
            .ok_or(DirectoryError::NotFound(agent_id))?;

        agent.record_block(reason, now);
        self.directory.update(&agent)?;

        tracing::warn!(agent_id = %agent_id, reason, "agent access revoked");
        Ok(agent)
    }
}
