// agent.rs — AgentRecord: the directory slice the engine consumes.
//
// The engine reads active flags, role names, and admin-tier flags, and
// writes exactly three metadata keys: blocked_reason and blocked_at when
// enforcing a block, reinstated_at on manual reinstatement. Everything
// else in the metadata bag belongs to other subsystems and is preserved
// untouched.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Metadata key holding the human-readable block reason.
pub const BLOCKED_REASON_KEY: &str = "blocked_reason";

/// Metadata key holding the RFC 3339 timestamp of the block.
pub const BLOCKED_AT_KEY: &str = "blocked_at";

/// Metadata key stamped by manual reinstatement.
pub const REINSTATED_AT_KEY: &str = "reinstated_at";

/// The fixed set of quota-carrying roles.
///
/// Directory role names are free text; eligibility is decided by parsing
/// them into this enum exactly once per scan. A role that doesn't parse
/// is simply not quota-carrying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalesRole {
    Rep,
    AccountExecutive,
    Manager,
}

impl SalesRole {
    /// Parse a free-text role name, case-insensitively. Spaces and
    /// hyphens are treated as underscores so "Sales Rep", "sales-rep",
    /// and "SALES_REP" all resolve the same way.
    pub fn parse(role: &str) -> Option<Self> {
        let normalized: String = role
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalized.as_str() {
            "sales_rep" | "rep" => Some(SalesRole::Rep),
            "account_executive" | "ae" => Some(SalesRole::AccountExecutive),
            "sales_manager" => Some(SalesRole::Manager),
            _ => None,
        }
    }
}

/// One agent's directory record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Unique identifier for this agent.
    pub agent_id: Uuid,

    /// Tenant the agent belongs to.
    pub tenant_id: Uuid,

    /// Display name (e.g., "Dana Reyes").
    pub display_name: String,

    /// Free-text role name as stored by the external directory.
    pub role: String,

    /// Whether the agent can currently sign in. The enforcer flips this
    /// to false; only manual reinstatement flips it back.
    pub active: bool,

    /// Admin-tier flags. Any one of them set exempts the agent from
    /// compliance scanning entirely.
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub tenant_admin: bool,
    #[serde(default)]
    pub platform_admin: bool,

    /// Opaque key-value bag shared with other subsystems.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,

    /// When this record was created.
    pub created_at: DateTime<Utc>,

    /// When this record was last written.
    pub updated_at: DateTime<Utc>,
}

impl AgentRecord {
    /// Create an active agent record with an empty metadata bag.
    pub fn new(
        tenant_id: Uuid,
        display_name: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            agent_id: Uuid::new_v4(),
            tenant_id,
            display_name: display_name.into(),
            role: role.into(),
            active: true,
            admin: false,
            tenant_admin: false,
            platform_admin: false,
            metadata: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether any admin-tier flag is set.
    pub fn is_admin_tier(&self) -> bool {
        self.admin || self.tenant_admin || self.platform_admin
    }

    /// Resolve the free-text role name once.
    pub fn sales_role(&self) -> Option<SalesRole> {
        SalesRole::parse(&self.role)
    }

    /// Whether a compliance sweep should scan this agent: active, a
    /// quota-carrying role, and not admin-tier.
    pub fn is_quota_eligible(&self) -> bool {
        self.active && !self.is_admin_tier() && self.sales_role().is_some()
    }

    /// Apply a block: deactivate and merge the reason and timestamp into
    /// the metadata bag, preserving unrelated keys. Idempotent —
    /// reapplying replaces the stored reason and timestamp.
    pub fn record_block(&mut self, reason: &str, now: DateTime<Utc>) {
        self.active = false;
        self.metadata
            .insert(BLOCKED_REASON_KEY.to_string(), Value::String(reason.to_string()));
        self.metadata
            .insert(BLOCKED_AT_KEY.to_string(), Value::String(now.to_rfc3339()));
        self.updated_at = now;
    }

    /// Manually reinstate a blocked agent. The block history keys stay in
    /// the bag; reinstated_at records when access was restored.
    pub fn record_reinstatement(&mut self, now: DateTime<Utc>) {
        self.active = true;
        self.metadata
            .insert(REINSTATED_AT_KEY.to_string(), Value::String(now.to_rfc3339()));
        self.updated_at = now;
    }

    /// The stored block reason, if any.
    pub fn blocked_reason(&self) -> Option<&str> {
        self.metadata.get(BLOCKED_REASON_KEY).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(role: &str) -> AgentRecord {
        AgentRecord::new(Uuid::new_v4(), "Dana Reyes", role)
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(SalesRole::parse("sales_rep"), Some(SalesRole::Rep));
        assert_eq!(SalesRole::parse("Sales Rep"), Some(SalesRole::Rep));
        assert_eq!(SalesRole::parse("SALES-REP"), Some(SalesRole::Rep));
        assert_eq!(
            SalesRole::parse("Account Executive"),
            Some(SalesRole::AccountExecutive)
        );
        assert_eq!(SalesRole::parse("sales_manager"), Some(SalesRole::Manager));
        assert_eq!(SalesRole::parse("accountant"), None);
        assert_eq!(SalesRole::parse(""), None);
    }

    #[test]
    fn eligibility_requires_role_and_active() {
        let a = agent("sales_rep");
        assert!(a.is_quota_eligible());

        let mut inactive = agent("sales_rep");
        inactive.active = false;
        assert!(!inactive.is_quota_eligible());

        let accountant = agent("accountant");
        assert!(!accountant.is_quota_eligible());
    }

    #[test]
    fn any_admin_flag_exempts() {
        for flag in 0..3 {
            let mut a = agent("sales_rep");
            match flag {
                0 => a.admin = true,
                1 => a.tenant_admin = true,
                _ => a.platform_admin = true,
            }
            assert!(a.is_admin_tier());
            assert!(!a.is_quota_eligible());
        }
    }

    #[test]
    fn block_merges_metadata_preserving_other_keys() {
        let mut a = agent("sales_rep");
        a.metadata
            .insert("theme".to_string(), Value::String("dark".to_string()));

        let now = Utc::now();
        a.record_block("missed pipeline coverage", now);

        assert!(!a.active);
        assert_eq!(a.blocked_reason(), Some("missed pipeline coverage"));
        assert_eq!(
            a.metadata.get(BLOCKED_AT_KEY).and_then(Value::as_str),
            Some(now.to_rfc3339().as_str())
        );
        // Unrelated key survives.
        assert_eq!(
            a.metadata.get("theme").and_then(Value::as_str),
            Some("dark")
        );
    }

    #[test]
    fn reblock_replaces_reason_and_timestamp() {
        let mut a = agent("sales_rep");
        let first = Utc::now();
        a.record_block("first reason", first);
        let second = first + chrono::Duration::hours(1);
        a.record_block("second reason", second);

        assert_eq!(a.blocked_reason(), Some("second reason"));
        assert_eq!(
            a.metadata.get(BLOCKED_AT_KEY).and_then(Value::as_str),
            Some(second.to_rfc3339().as_str())
        );
    }

    #[test]
    fn reinstatement_restores_access_and_keeps_history() {
        let mut a = agent("sales_rep");
        a.record_block("missed ramp", Utc::now());
        assert!(!a.active);

        a.record_reinstatement(Utc::now());
        assert!(a.active);
        // Block history stays for the record.
        assert_eq!(a.blocked_reason(), Some("missed ramp"));
        assert!(a.metadata.contains_key(REINSTATED_AT_KEY));
    }

    #[test]
    fn serialization_round_trip() {
        let mut a = agent("account_executive");
        a.metadata
            .insert("locale".to_string(), Value::String("en-GB".to_string()));
        let json = serde_json::to_string_pretty(&a).unwrap();
        let restored: AgentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.agent_id, a.agent_id);
        assert_eq!(restored.role, "account_executive");
        assert_eq!(restored.metadata.len(), 1);
    }

    #[test]
    fn admin_flags_default_false_when_absent() {
        let a = agent("sales_rep");
        let mut json: Value = serde_json::to_value(&a).unwrap();
        let obj = json.as_object_mut().unwrap();
        obj.remove("admin");
        obj.remove("tenant_admin");
        obj.remove("platform_admin");
        obj.remove("metadata");
        let restored: AgentRecord = serde_json::from_value(json).unwrap();
        assert!(!restored.is_admin_tier());
        assert!(restored.metadata.is_empty());
    }
}
