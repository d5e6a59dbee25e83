//! # qg-directory
//!
//! Agent directory records for QuotaGate.
//!
//! The directory is an external collaborator in the larger system; this
//! crate defines the slice of it the compliance engine consumes — active
//! flags, role names, admin-tier exemptions, and the opaque metadata bag
//! the engine writes block records into — plus a JSON file-based
//! reference implementation.
//!
//! Role eligibility is resolved through the fixed [`SalesRole`] enum
//! rather than string comparisons scattered through the scan: the
//! free-text role name from the directory is parsed once, and everything
//! downstream works with the enum.

pub mod agent;
pub mod error;
pub mod store;

pub use agent::{AgentRecord, SalesRole, BLOCKED_AT_KEY, BLOCKED_REASON_KEY, REINSTATED_AT_KEY};
pub use error::DirectoryError;
pub use store::{Directory, FileDirectory};
