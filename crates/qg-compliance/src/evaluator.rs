// evaluator.rs — The compliance sweep.
//
// For each quota-eligible agent: walk their live targets in a
// deterministic order, resolve every milestone whose deadline has passed
// and whose last verdict was not a pass, and stop at the first failing
// blocking milestone — that one failure is the reason recorded on the
// agent, and no further targets or milestones are checked this run.
//
// The early exit is policy, not an accident: the engine reports the
// first infraction found in scan order, never an aggregate of all
// current infractions. Scan order is pinned (targets by period start
// then ID, milestones by step order) so "first" does not depend on how
// a store happens to return rows.
//
// All of a target's milestone writes land in a single store save, so a
// target's sweep is all-or-nothing per run. A data-access failure aborts
// the current agent only — never the batch, and never a block decision
// computed from an incomplete sweep.

use chrono::{DateTime, Utc};

use qg_directory::{AgentRecord, Directory};
use qg_ledger::{ActivityLog, DealLedger};
use qg_target::{Milestone, MilestoneStatus, TargetStore};

use crate::aggregate::{AchievementAggregator, Window};
use crate::enforcer::AccessEnforcer;
use crate::error::ComplianceError;
use crate::report::{AgentFailure, BlockRecord, SweepReport};

/// Outcome of one agent's evaluation, folded into the sweep report.
struct AgentOutcome {
    milestones_passed: usize,
    milestones_failed: usize,
    block: Option<BlockRecord>,
}

/// The batch routine an external scheduler invokes.
pub struct ComplianceEvaluator<'a> {
    targets: &'a dyn TargetStore,
    directory: &'a dyn Directory,
    aggregator: AchievementAggregator<'a>,
}

impl<'a> ComplianceEvaluator<'a> {
    pub fn new(
        targets: &'a dyn TargetStore,
        directory: &'a dyn Directory,
        deals: &'a dyn DealLedger,
        activities: &'a dyn ActivityLog,
    ) -> Self {
        Self {
            targets,
            directory,
            aggregator: AchievementAggregator::new(deals, activities),
        }
    }

    /// Run one sweep at the given instant. `now` decides which
    /// deadlines count as expired; achievement windows always end at
    /// milestone deadlines, not at `now`.
    pub fn run(&self, now: DateTime<Utc>) -> Result<SweepReport, ComplianceError> {
        let mut report = SweepReport::new(now);

        for agent in self.directory.active_agents()? {
            if !agent.is_quota_eligible() {
                report.agents_skipped += 1;
                continue;
            }
            report.agents_scanned += 1;

            match self.evaluate_agent(&agent, now) {
                Ok(outcome) => {
                    report.milestones_passed += outcome.milestones_passed;
                    report.milestones_failed += outcome.milestones_failed;
                    if let Some(block) = outcome.block {
                        report.blocks.push(block);
                    }
                }
                Err(err) => {
                    // Isolate the failure: this agent's sweep is aborted,
                    // the batch continues.
                    tracing::warn!(
                        agent_id = %agent.agent_id,
                        error = %err,
                        "agent evaluation aborted, continuing sweep"
                    );
                    report.errors.push(AgentFailure {
                        agent_id: agent.agent_id,
                        message: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            scanned = report.agents_scanned,
            skipped = report.agents_skipped,
            passed = report.milestones_passed,
            failed = report.milestones_failed,
            blocked = report.blocks.len(),
            "compliance sweep finished"
        );
        Ok(report)
    }

    fn evaluate_agent(
        &self,
        agent: &AgentRecord,
        now: DateTime<Utc>,
    ) -> Result<AgentOutcome, ComplianceError> {
        let mut outcome = AgentOutcome {
            milestones_passed: 0,
            milestones_failed: 0,
            block: None,
        };

        let mut targets = self.targets.live_for_assignee(agent.agent_id)?;
        // The store contract already orders these; sort again so the scan
        // sequence survives a store that doesn't.
        targets.sort_by(|a, b| {
            a.period_start
                .cmp(&b.period_start)
                .then(a.target_id.cmp(&b.target_id))
        });

        for mut target in targets {
            let mut due: Vec<usize> = target
                .milestones
                .iter()
                .enumerate()
                .filter(|(_, m)| m.is_due(now))
                .map(|(i, _)| i)
                .collect();
            due.sort_by_key(|&i| target.milestones[i].step_order);

            if due.is_empty() {
                continue;
            }

            let mut block_reason = None;
            for idx in due {
                let window = Window::new(target.period_start, target.milestones[idx].deadline);
                let achieved =
                    self.aggregator
                        .achieved(agent.agent_id, target.milestones[idx].metric, window)?;

                let milestone = &mut target.milestones[idx];
                match milestone.record_verdict(achieved) {
                    MilestoneStatus::Passed => outcome.milestones_passed += 1,
                    MilestoneStatus::Failed => {
                        outcome.milestones_failed += 1;
                        if milestone.blocking {
                            block_reason = Some(block_reason_for(milestone, achieved));
                            break;
                        }
                    }
                    MilestoneStatus::Pending => {}
                }
            }

            // Rolling, informational achievement against the overall goal.
            target.achieved_value = self.aggregator.achieved(
                agent.agent_id,
                target.target_kind,
                Window::new(target.period_start, target.period_end),
            )?;
            target.updated_at = now;

            // One write covers the verdicts and the rolling value.
            self.targets.save(&target)?;

            if let Some(reason) = block_reason {
                AccessEnforcer::new(self.directory).block(agent.agent_id, &reason, now)?;
                outcome.block = Some(BlockRecord {
                    agent_id: agent.agent_id,
                    display_name: agent.display_name.clone(),
                    reason,
                });
                // First blocking failure ends this agent's run entirely.
                break;
            }
        }

        Ok(outcome)
    }
}

/// The human-readable reason stored on a blocked agent.
fn block_reason_for(milestone: &Milestone, achieved: f64) -> String {
    format!(
        "blocking milestone '{}' missed: {} {} of {} required by {}",
        milestone.name,
        achieved,
        milestone.metric,
        milestone.target_value,
        milestone.deadline.to_rfc3339()
    )
}
