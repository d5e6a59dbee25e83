// target.rs — Target: a numeric goal assigned to one agent for one period.
//
// A target owns its milestones: they are embedded in the record and
// generated exactly once, at assignment time. Embedding means one store
// write updates a target and all of its milestones together, so a
// compliance sweep lands on a target all-or-nothing.
//
// Targets are never hard-deleted, only retired via `deleted_at`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TargetError;
use crate::milestone::{MetricKind, Milestone};
use crate::plan;

/// The kind of period a target spans. Informational — the authoritative
/// bounds are always `period_start`/`period_end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    Month,
    Quarter,
    Year,
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodType::Month => write!(f, "month"),
            PeriodType::Quarter => write!(f, "quarter"),
            PeriodType::Year => write!(f, "year"),
        }
    }
}

impl FromStr for PeriodType {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(PeriodType::Month),
            "quarter" => Ok(PeriodType::Quarter),
            "year" => Ok(PeriodType::Year),
            other => Err(TargetError::UnknownName {
                kind: "period type",
                value: other.to_string(),
            }),
        }
    }
}

/// Everything a caller supplies to assign a goal. The tenant is not part
/// of the draft — it is resolved from the assignee's directory record.
#[derive(Debug, Clone)]
pub struct TargetDraft {
    pub assignee_id: Uuid,
    pub period_type: PeriodType,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub target_kind: MetricKind,
    pub target_value: f64,
    pub incentive_amount: f64,
}

/// A numeric goal assigned to one agent for one period, with its
/// embedded milestone schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    /// Unique identifier for this target.
    pub target_id: Uuid,

    /// Tenant that owns the assignee.
    pub tenant_id: Uuid,

    /// The agent this goal is assigned to.
    pub assignee_id: Uuid,

    /// Kind of period (informational label).
    pub period_type: PeriodType,

    /// Start of the goal period. Every milestone's evaluation window
    /// begins here.
    pub period_start: DateTime<Utc>,

    /// End of the goal period.
    pub period_end: DateTime<Utc>,

    /// Metric the overall goal measures.
    pub target_kind: MetricKind,

    /// The goal value (strictly positive).
    pub target_value: f64,

    /// Incentive paid on completion (zero or more).
    pub incentive_amount: f64,

    /// Rolling achievement against `target_kind` over the full period.
    /// Informational only — pass/fail verdicts use milestone windows.
    pub achieved_value: f64,

    /// The fixed milestone schedule, generated once at assignment.
    pub milestones: Vec<Milestone>,

    /// Soft-delete marker. Retired targets are skipped by sweeps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// When this target was assigned.
    pub created_at: DateTime<Utc>,

    /// When this target was last written.
    pub updated_at: DateTime<Utc>,
}

impl Target {
    /// Validate a draft and assign it as a new target with its milestone
    /// schedule. Rejects the whole assignment on any invariant violation;
    /// nothing partial ever comes out of here.
    pub fn assign(draft: TargetDraft, tenant_id: Uuid, now: DateTime<Utc>) -> Result<Self, TargetError> {
        if draft.target_value <= 0.0 {
            return Err(TargetError::NonPositiveValue(draft.target_value));
        }
        if draft.incentive_amount < 0.0 {
            return Err(TargetError::NegativeIncentive(draft.incentive_amount));
        }
        if draft.period_end <= draft.period_start {
            return Err(TargetError::InvalidPeriod {
                start: draft.period_start.to_rfc3339(),
                end: draft.period_end.to_rfc3339(),
            });
        }

        let milestones =
            plan::build_milestones(draft.target_value, draft.period_start, draft.period_end);
        plan::validate_schedule(&milestones)?;

        Ok(Self {
            target_id: Uuid::new_v4(),
            tenant_id,
            assignee_id: draft.assignee_id,
            period_type: draft.period_type,
            period_start: draft.period_start,
            period_end: draft.period_end,
            target_kind: draft.target_kind,
            target_value: draft.target_value,
            incentive_amount: draft.incentive_amount,
            achieved_value: 0.0,
            milestones,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether this target has been soft-deleted.
    pub fn is_retired(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Mark this target retired. Idempotent — the first retirement
    /// timestamp sticks.
    pub fn retire(&mut self, now: DateTime<Utc>) {
        if self.deleted_at.is_none() {
            self.deleted_at = Some(now);
            self.updated_at = now;
        }
    }
}
