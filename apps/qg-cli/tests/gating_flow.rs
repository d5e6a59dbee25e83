// gating_flow.rs — End-to-end integration test for the compliance gate.
//
// Flow:
//   1. Build a roster: one quota-carrying rep, one tenant admin, one
//      back-office role
//   2. qg assign → target + three generated milestones persisted
//   3. qg sweep → the rep's expired ramp milestone fails, access revoked,
//      block reason merged into metadata; admin and back-office untouched
//   4. qg roster reinstate + backdated activity import
//   5. qg sweep again → the same milestone flips to passed, agent stays
//      active
//
// This drives the same library calls the CLI commands wire together.

use chrono::{Duration, TimeZone, Utc};
use tempfile::TempDir;

use qg_compliance::{assign_target, ComplianceEvaluator};
use qg_directory::{AgentRecord, Directory, FileDirectory, BLOCKED_AT_KEY};
use qg_ledger::{Activity, FileActivityLog, FileDealLedger};
use qg_target::{
    FileTargetStore, MetricKind, MilestoneStatus, PeriodType, TargetDraft, TargetStore,
};

#[test]
fn gating_flow_assign_to_block_to_reinstate() {
    let data = TempDir::new().unwrap();
    let qg = data.path().join(".qg");

    let targets = FileTargetStore::new(qg.join("targets")).unwrap();
    let directory = FileDirectory::new(qg.join("roster")).unwrap();
    let deals = FileDealLedger::new(qg.join("deals")).unwrap();
    let activities = FileActivityLog::new(qg.join("activities")).unwrap();

    // =========================================================
    // 1. Roster
    // =========================================================

    let tenant = uuid::Uuid::new_v4();

    let rep = AgentRecord::new(tenant, "Dana Reyes", "Sales Rep");
    directory.update(&rep).unwrap();

    let mut admin = AgentRecord::new(tenant, "Admin Ann", "sales_rep");
    admin.tenant_admin = true;
    directory.update(&admin).unwrap();

    let clerk = AgentRecord::new(tenant, "Casey Clerk", "accountant");
    directory.update(&clerk).unwrap();

    // =========================================================
    // 2. Assign: period straddles "now", so the ramp milestone
    //    (start + 7d) is already a week overdue.
    // =========================================================

    let now = Utc.with_ymd_and_hms(2025, 6, 15, 9, 0, 0).unwrap();
    let period_start = now - Duration::days(30);

    let target = assign_target(
        &directory,
        &targets,
        TargetDraft {
            assignee_id: rep.agent_id,
            period_type: PeriodType::Quarter,
            period_start,
            period_end: now + Duration::days(30),
            target_kind: MetricKind::Revenue,
            target_value: 10_000.0,
            incentive_amount: 1_000.0,
        },
        now,
    )
    .unwrap();

    assert_eq!(target.tenant_id, tenant);
    assert_eq!(target.milestones.len(), 3);
    assert_eq!(target.milestones[0].deadline, period_start + Duration::days(7));

    // =========================================================
    // 3. First sweep: zero activities → ramp fails → block
    // =========================================================

    let evaluator = ComplianceEvaluator::new(&targets, &directory, &deals, &activities);
    let report = evaluator.run(now).unwrap();

    assert_eq!(report.agents_scanned, 1); // only the rep
    assert_eq!(report.agents_skipped, 2); // admin + back-office
    assert_eq!(report.milestones_failed, 1);
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.blocks[0].agent_id, rep.agent_id);

    let swept = targets.get(target.target_id).unwrap().unwrap();
    assert_eq!(swept.milestones[0].status, MilestoneStatus::Failed);
    assert_eq!(swept.milestones[0].achieved_value, 0.0);

    let blocked = directory.get(rep.agent_id).unwrap().unwrap();
    assert!(!blocked.active);
    assert!(blocked.blocked_reason().unwrap().contains("Activity ramp-up"));
    assert!(blocked.metadata.contains_key(BLOCKED_AT_KEY));

    // Admin kept access despite having a quota-carrying role name.
    assert!(directory.get(admin.agent_id).unwrap().unwrap().active);
    assert!(directory.get(clerk.agent_id).unwrap().unwrap().active);

    // =========================================================
    // 4. Reinstate, then import backdated activities into the
    //    ramp window.
    // =========================================================

    let reinstated = directory.reinstate(rep.agent_id, now).unwrap();
    assert!(reinstated.active);
    // Block history survives reinstatement.
    assert!(reinstated.blocked_reason().is_some());

    for i in 0..50 {
        activities
            .record(&Activity::new(
                tenant,
                rep.agent_id,
                format!("imported call {i}"),
                period_start + Duration::days(3),
            ))
            .unwrap();
    }

    // =========================================================
    // 5. Second sweep: same milestone, new data → verdict flips
    // =========================================================

    let report = evaluator.run(now).unwrap();
    assert_eq!(report.milestones_passed, 1);
    assert!(report.blocks.is_empty());

    let swept = targets.get(target.target_id).unwrap().unwrap();
    assert_eq!(swept.milestones[0].status, MilestoneStatus::Passed);
    assert_eq!(swept.milestones[0].achieved_value, 50.0);
    // Coverage and revenue deadlines haven't passed; still pending.
    assert_eq!(swept.milestones[1].status, MilestoneStatus::Pending);
    assert_eq!(swept.milestones[2].status, MilestoneStatus::Pending);

    assert!(directory.get(rep.agent_id).unwrap().unwrap().active);
}
