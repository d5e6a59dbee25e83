// error.rs — Error type for the compliance engine.
//
// The engine sits on top of three collaborator seams, so its error is
// mostly a wrapper. Inside a sweep these errors are isolated per agent:
// the evaluator logs them and moves on to the next agent rather than
// halting the batch.

use thiserror::Error;
use uuid::Uuid;

use qg_directory::DirectoryError;
use qg_ledger::LedgerError;
use qg_target::TargetError;

/// Errors that can occur while assigning targets or running sweeps.
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// Target validation or persistence failed.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// Directory read or write failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Deal ledger or activity log read failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The assignee of a draft does not resolve in the directory, so no
    /// tenant can be derived. The whole assignment is rejected; nothing
    /// partial is persisted.
    #[error("assignee not found in directory: {0}")]
    UnknownAssignee(Uuid),
}
