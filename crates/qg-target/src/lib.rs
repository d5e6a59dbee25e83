//! # qg-target
//!
//! Target and milestone records for QuotaGate.
//!
//! A [`Target`] is a numeric goal assigned to one sales agent for one
//! period. At assignment time it is decomposed into exactly three ordered
//! [`Milestone`]s — ramp, coverage, revenue — each with its own metric,
//! goal, and deadline. Milestones carry a pass/fail **verdict snapshot**
//! that the compliance sweep overwrites on every run; they are generated
//! once and never regenerated.
//!
//! ## Key components
//!
//! - [`Target`] / [`TargetDraft`] — validated goal assignment
//! - [`Milestone`] — a dated sub-goal with a [`MetricKind`] and verdict
//! - [`plan::build_milestones`] — the fixed ramp/coverage/revenue schedule
//! - [`TargetStore`] — store abstraction, with [`FileTargetStore`] as the
//!   JSON file-based implementation

pub mod error;
pub mod milestone;
pub mod plan;
pub mod store;
pub mod target;

pub use error::TargetError;
pub use milestone::{MetricKind, Milestone, MilestoneStatus};
pub use store::{FileTargetStore, TargetStore};
pub use target::{PeriodType, Target, TargetDraft};
