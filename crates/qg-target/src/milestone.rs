// milestone.rs — Milestone: a dated sub-goal of a Target.
//
// Each milestone measures one metric over the window from the target's
// period start to the milestone's own deadline. Its status is a verdict
// snapshot: the compliance sweep overwrites achieved_value and status on
// every evaluation, so a milestone can flip from Failed back to Passed
// once backdated ledger data satisfies it. The irrevocable consequence of
// a blocking failure lands on the agent's directory record, not here.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TargetError;

/// The metric a milestone (or target) measures.
///
/// One aggregation strategy per variant: revenue and pipeline sum deal
/// values, activities and calls count activity-log records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Sum of won deal values.
    Revenue,
    /// Sum of open + won deal values (everything not lost).
    PipelineValue,
    /// Count of activity-log records.
    Activities,
    /// Count of logged calls.
    Calls,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Revenue => write!(f, "revenue"),
            MetricKind::PipelineValue => write!(f, "pipeline_value"),
            MetricKind::Activities => write!(f, "activities"),
            MetricKind::Calls => write!(f, "calls"),
        }
    }
}

impl FromStr for MetricKind {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "revenue" => Ok(MetricKind::Revenue),
            "pipeline_value" | "pipeline" => Ok(MetricKind::PipelineValue),
            "activities" => Ok(MetricKind::Activities),
            "calls" => Ok(MetricKind::Calls),
            other => Err(TargetError::UnknownName {
                kind: "metric",
                value: other.to_string(),
            }),
        }
    }
}

/// The verdict snapshot on a milestone.
///
/// Both terminal-looking states are revisitable: Passed and Failed are
/// simply the outcome of the most recent evaluation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneStatus {
    /// Not yet evaluated past its deadline.
    Pending,
    /// Achievement met or exceeded the goal at the last evaluation.
    Passed,
    /// Achievement fell short of the goal at the last evaluation.
    Failed,
}

impl fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MilestoneStatus::Pending => write!(f, "pending"),
            MilestoneStatus::Passed => write!(f, "passed"),
            MilestoneStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A dated sub-goal of a Target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Unique identifier for this milestone.
    pub milestone_id: Uuid,

    /// 1-based position within the owning target's schedule.
    pub step_order: u32,

    /// Human-readable name (e.g., "Pipeline coverage").
    pub name: String,

    /// Which metric this milestone measures.
    pub metric: MetricKind,

    /// The goal value for this milestone (strictly positive).
    pub target_value: f64,

    /// Hard deadline. The evaluation window always ends here, never at
    /// the sweep's wall-clock time, so a late-running batch still
    /// measures the correct historical window.
    pub deadline: DateTime<Utc>,

    /// Last computed achievement snapshot.
    pub achieved_value: f64,

    /// Verdict snapshot from the last evaluation.
    pub status: MilestoneStatus,

    /// Whether failing this milestone revokes the agent's access.
    pub blocking: bool,
}

impl Milestone {
    /// Create a pending milestone.
    pub fn new(
        step_order: u32,
        name: impl Into<String>,
        metric: MetricKind,
        target_value: f64,
        deadline: DateTime<Utc>,
        blocking: bool,
    ) -> Self {
        Self {
            milestone_id: Uuid::new_v4(),
            step_order,
            name: name.into(),
            metric,
            target_value,
            deadline,
            achieved_value: 0.0,
            status: MilestoneStatus::Pending,
            blocking,
        }
    }

    /// Whether this milestone is due for evaluation at `now`: its
    /// deadline has passed and the last verdict was not a pass.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now && self.status != MilestoneStatus::Passed
    }

    /// Record an evaluation outcome. Overwrites the previous snapshot
    /// unconditionally and returns the new status.
    pub fn record_verdict(&mut self, achieved: f64) -> MilestoneStatus {
        self.achieved_value = achieved;
        self.status = if achieved >= self.target_value {
            MilestoneStatus::Passed
        } else {
            MilestoneStatus::Failed
        };
        self.status
    }
}
