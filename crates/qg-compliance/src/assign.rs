// assign.rs — The "assign goal" operation.
//
// Resolves the assignee in the directory (which supplies the tenant),
// validates the draft, and persists the target with its generated
// milestone schedule. Any failure rejects the whole operation — a
// rejected assignment persists nothing.

use chrono::{DateTime, Utc};

use qg_directory::Directory;
use qg_target::{Target, TargetDraft, TargetStore};

use crate::error::ComplianceError;

/// Assign a goal to an agent. Returns the persisted target.
pub fn assign_target(
    directory: &dyn Directory,
    targets: &dyn TargetStore,
    draft: TargetDraft,
    now: DateTime<Utc>,
) -> Result<Target, ComplianceError> {
    let agent = directory
        .get(draft.assignee_id)?
        .ok_or(ComplianceError::UnknownAssignee(draft.assignee_id))?;

    let target = Target::assign(draft, agent.tenant_id, now)?;
    targets.save(&target)?;

    tracing::info!(
        target_id = %target.target_id,
        assignee_id = %target.assignee_id,
        target_value = target.target_value,
        "target assigned"
    );
    Ok(target)
}
