// aggregate.rs — Achievement aggregation: one metric, one window.
//
// The window for a milestone is always [period_start, deadline] — never
// the sweep's wall-clock "now" — so a late-running batch still measures
// the correct historical window, and recomputing after the deadline
// yields the same number unless the underlying records changed.
//
// Zero matching records is an achievement of 0, not an error.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use qg_ledger::{ActivityLog, DealLedger};
use qg_target::MetricKind;

use crate::error::ComplianceError;

/// A closed time window. Both bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Computes a single non-negative achievement value for one agent, one
/// metric, one window. Reads the collaborator ledgers, never writes.
pub struct AchievementAggregator<'a> {
    deals: &'a dyn DealLedger,
    activities: &'a dyn ActivityLog,
}

impl<'a> AchievementAggregator<'a> {
    pub fn new(deals: &'a dyn DealLedger, activities: &'a dyn ActivityLog) -> Self {
        Self { deals, activities }
    }

    /// Compute achievement. One strategy per metric variant:
    ///
    /// - `Revenue` — sum of won deal values last modified in the window
    /// - `PipelineValue` — sum of not-lost (open + won) deal values last
    ///   modified in the window
    /// - `Activities` / `Calls` — count of activity records created in
    ///   the window
    pub fn achieved(
        &self,
        owner_id: Uuid,
        metric: MetricKind,
        window: Window,
    ) -> Result<f64, ComplianceError> {
        let value = match metric {
            MetricKind::Revenue => self
                .deals
                .deals_for_owner(owner_id)?
                .iter()
                .filter(|d| d.is_won() && window.contains(d.updated_at))
                .map(|d| d.amount())
                .sum(),
            MetricKind::PipelineValue => self
                .deals
                .deals_for_owner(owner_id)?
                .iter()
                .filter(|d| !d.is_lost() && window.contains(d.updated_at))
                .map(|d| d.amount())
                .sum(),
            MetricKind::Activities | MetricKind::Calls => self
                .activities
                .activities_for_owner(owner_id)?
                .iter()
                .filter(|a| window.contains(a.created_at))
                .count() as f64,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use qg_ledger::{Activity, Deal, FileActivityLog, FileDealLedger};
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _dir: TempDir,
        deals: FileDealLedger,
        activities: FileActivityLog,
        tenant: Uuid,
        agent: Uuid,
        start: DateTime<Utc>,
    }

    fn fixture() -> Fixture {
        let dir = tempdir().unwrap();
        Fixture {
            deals: FileDealLedger::new(dir.path().join("deals")).unwrap(),
            activities: FileActivityLog::new(dir.path().join("activities")).unwrap(),
            _dir: dir,
            tenant: Uuid::new_v4(),
            agent: Uuid::new_v4(),
            start: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    impl Fixture {
        fn deal(&self, status: &str, value: Option<f64>, day: i64) {
            self.deals
                .record(&Deal::new(
                    self.tenant,
                    self.agent,
                    "deal",
                    value,
                    status,
                    self.start + Duration::days(day),
                ))
                .unwrap();
        }

        fn activity(&self, day: i64) {
            self.activities
                .record(&Activity::new(
                    self.tenant,
                    self.agent,
                    "call",
                    self.start + Duration::days(day),
                ))
                .unwrap();
        }

        fn achieved(&self, metric: MetricKind, end_day: i64) -> f64 {
            AchievementAggregator::new(&self.deals, &self.activities)
                .achieved(
                    self.agent,
                    metric,
                    Window::new(self.start, self.start + Duration::days(end_day)),
                )
                .unwrap()
        }
    }

    #[test]
    fn revenue_sums_only_won_deals_in_window() {
        let f = fixture();
        f.deal("won", Some(1_000.0), 5);
        f.deal("WON", Some(250.0), 10); // case-insensitive
        f.deal("open", Some(9_999.0), 5); // not won
        f.deal("lost", Some(9_999.0), 5); // not won
        f.deal("won", Some(500.0), 40); // outside window

        assert_eq!(f.achieved(MetricKind::Revenue, 30), 1_250.0);
    }

    #[test]
    fn pipeline_sums_everything_not_lost() {
        let f = fixture();
        f.deal("open", Some(1_000.0), 5);
        f.deal("won", Some(2_000.0), 10);
        f.deal("Qualified", Some(4_000.0), 15);
        f.deal("lost", Some(9_999.0), 5);
        f.deal("LOST", Some(9_999.0), 6);

        assert_eq!(f.achieved(MetricKind::PipelineValue, 30), 7_000.0);
    }

    #[test]
    fn activities_and_calls_count_records() {
        let f = fixture();
        for day in [1, 2, 3, 45] {
            f.activity(day);
        }

        assert_eq!(f.achieved(MetricKind::Activities, 30), 3.0);
        assert_eq!(f.achieved(MetricKind::Calls, 30), 3.0);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let f = fixture();
        f.deal("won", Some(100.0), 0); // exactly at start
        f.deal("won", Some(10.0), 30); // exactly at end

        assert_eq!(f.achieved(MetricKind::Revenue, 30), 110.0);
    }

    #[test]
    fn missing_deal_values_count_as_zero() {
        let f = fixture();
        f.deal("won", None, 5);
        f.deal("won", Some(100.0), 6);

        assert_eq!(f.achieved(MetricKind::Revenue, 30), 100.0);
    }

    #[test]
    fn zero_records_means_zero_achievement_for_every_metric() {
        let f = fixture();
        for metric in [
            MetricKind::Revenue,
            MetricKind::PipelineValue,
            MetricKind::Activities,
            MetricKind::Calls,
        ] {
            assert_eq!(f.achieved(metric, 30), 0.0);
        }
    }

    #[test]
    fn other_owners_records_are_ignored() {
        let f = fixture();
        f.deals
            .record(&Deal::new(
                f.tenant,
                Uuid::new_v4(),
                "someone else",
                Some(5_000.0),
                "won",
                f.start + Duration::days(5),
            ))
            .unwrap();

        assert_eq!(f.achieved(MetricKind::Revenue, 30), 0.0);
    }

    #[test]
    fn recomputation_is_stable_without_new_records() {
        let f = fixture();
        f.deal("won", Some(750.0), 3);
        f.activity(4);

        let first = f.achieved(MetricKind::Revenue, 30);
        let second = f.achieved(MetricKind::Revenue, 30);
        assert_eq!(first, second);
    }
}
