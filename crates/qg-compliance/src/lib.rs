//! # qg-compliance
//!
//! The compliance engine: target assignment, achievement aggregation,
//! the periodic compliance sweep, and access enforcement.
//!
//! The sweep is a batch routine an external scheduler invokes on some
//! cadence. It scans quota-eligible agents, resolves milestones whose
//! deadlines have passed, recomputes achievement from the deal ledger
//! and activity log, and — on the first failing *blocking* milestone —
//! revokes the agent's directory access and stops evaluating that agent
//! for the run.
//!
//! Everything here is an idempotent overwrite: re-running a sweep with
//! unchanged ledger data reproduces the same snapshots and verdicts, so
//! an aborted run is simply re-invoked.
//!
//! ## Key components
//!
//! - [`assign_target`] — validate a draft against the directory and
//!   persist a target with its milestone schedule
//! - [`AchievementAggregator`] — one metric value over one time window
//! - [`ComplianceEvaluator`] — the sweep entry point
//! - [`AccessEnforcer`] — deactivate + annotate a failing agent
//! - [`SweepReport`] — what one run did, for logging and display

pub mod aggregate;
pub mod assign;
pub mod enforcer;
pub mod error;
pub mod evaluator;
pub mod report;

pub use aggregate::{AchievementAggregator, Window};
pub use assign::assign_target;
pub use enforcer::AccessEnforcer;
pub use error::ComplianceError;
pub use evaluator::ComplianceEvaluator;
pub use report::{AgentFailure, BlockRecord, SweepReport};
