// plan.rs — The fixed milestone schedule derived from a target.
//
// Every target decomposes into the same three blocking milestones:
//
//   1. Ramp     — 50 activities within the first week
//   2. Coverage — 3x the goal in open pipeline by the period midpoint
//   3. Revenue  — the goal itself in won revenue by period end
//
// build_milestones() is a pure function of (target_value, period_start,
// period_end): same inputs always produce the same deadlines and goals.
// It runs exactly once per target, at assignment time. Updating a
// target's dates or value later does NOT regenerate its milestones —
// regeneration would discard already-evaluated progress.

use chrono::{DateTime, Duration, Utc};

use crate::error::TargetError;
use crate::milestone::{MetricKind, Milestone};

/// Activity count every agent must hit in the first week, regardless of
/// the size of the goal.
pub const RAMP_ACTIVITY_GOAL: f64 = 50.0;

/// Length of the ramp window.
pub const RAMP_WINDOW_DAYS: i64 = 7;

/// Pipeline coverage required by the period midpoint, as a multiple of
/// the goal.
pub const COVERAGE_MULTIPLIER: f64 = 3.0;

/// Build the fixed three-milestone schedule for a target.
pub fn build_milestones(
    target_value: f64,
    period_start: DateTime<Utc>,
    period_end: DateTime<Utc>,
) -> Vec<Milestone> {
    let midpoint = period_start + (period_end - period_start) / 2;

    vec![
        Milestone::new(
            1,
            "Activity ramp-up",
            MetricKind::Activities,
            RAMP_ACTIVITY_GOAL,
            period_start + Duration::days(RAMP_WINDOW_DAYS),
            true,
        ),
        Milestone::new(
            2,
            "Pipeline coverage",
            MetricKind::PipelineValue,
            target_value * COVERAGE_MULTIPLIER,
            midpoint,
            true,
        ),
        Milestone::new(
            3,
            "Revenue close",
            MetricKind::Revenue,
            target_value,
            period_end,
            true,
        ),
    ]
}

/// Validate a milestone schedule: strictly increasing deadlines in step
/// order, strictly positive goals. Violations reject the whole schedule —
/// deadlines are never clamped or reordered.
pub fn validate_schedule(milestones: &[Milestone]) -> Result<(), TargetError> {
    for m in milestones {
        if m.target_value <= 0.0 {
            return Err(TargetError::NonPositiveValue(m.target_value));
        }
    }
    for pair in milestones.windows(2) {
        if pair[1].deadline <= pair[0].deadline {
            return Err(TargetError::ScheduleNotIncreasing {
                step: pair[1].step_order,
                deadline: pair[1].deadline.to_rfc3339(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn period_of_days(days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        (start, start + Duration::days(days))
    }

    #[test]
    fn ninety_day_period_matches_reference_schedule() {
        let (start, end) = period_of_days(90);
        let plan = build_milestones(10_000.0, start, end);

        assert_eq!(plan.len(), 3);

        assert_eq!(plan[0].metric, MetricKind::Activities);
        assert_eq!(plan[0].target_value, 50.0);
        assert_eq!(plan[0].deadline, start + Duration::days(7));

        assert_eq!(plan[1].metric, MetricKind::PipelineValue);
        assert_eq!(plan[1].target_value, 30_000.0);
        assert_eq!(plan[1].deadline, start + Duration::days(45));

        assert_eq!(plan[2].metric, MetricKind::Revenue);
        assert_eq!(plan[2].target_value, 10_000.0);
        assert_eq!(plan[2].deadline, end);
    }

    #[test]
    fn deadlines_strictly_increase_with_step_order() {
        for days in [15, 30, 90, 365] {
            let (start, end) = period_of_days(days);
            let plan = build_milestones(5_000.0, start, end);
            assert!(plan[0].deadline < plan[1].deadline);
            assert!(plan[1].deadline < plan[2].deadline);
            assert_eq!(
                plan.iter().map(|m| m.step_order).collect::<Vec<_>>(),
                vec![1, 2, 3]
            );
            validate_schedule(&plan).unwrap();
        }
    }

    #[test]
    fn all_generated_milestones_are_blocking() {
        let (start, end) = period_of_days(90);
        assert!(build_milestones(1.0, start, end).iter().all(|m| m.blocking));
    }

    #[test]
    fn same_inputs_same_schedule() {
        let (start, end) = period_of_days(60);
        let a = build_milestones(7_500.0, start, end);
        let b = build_milestones(7_500.0, start, end);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.deadline, y.deadline);
            assert_eq!(x.target_value, y.target_value);
            assert_eq!(x.metric, y.metric);
        }
    }

    #[test]
    fn fourteen_day_period_collides_ramp_and_midpoint() {
        // Midpoint lands exactly on the ramp deadline — schedule rejected.
        let (start, end) = period_of_days(14);
        let plan = build_milestones(1_000.0, start, end);
        assert!(matches!(
            validate_schedule(&plan),
            Err(TargetError::ScheduleNotIncreasing { step: 2, .. })
        ));
    }

    #[test]
    fn ten_day_period_is_rejected() {
        let (start, end) = period_of_days(10);
        let plan = build_milestones(1_000.0, start, end);
        assert!(validate_schedule(&plan).is_err());
    }

    #[test]
    fn nonpositive_goal_is_rejected() {
        let (start, end) = period_of_days(90);
        let mut plan = build_milestones(1_000.0, start, end);
        plan[1].target_value = 0.0;
        assert!(matches!(
            validate_schedule(&plan),
            Err(TargetError::NonPositiveValue(v)) if v == 0.0
        ));
    }
}
