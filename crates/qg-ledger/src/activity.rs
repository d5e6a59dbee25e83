// activity.rs — Activity: a read-only slice of the external activity log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One activity-log record (a call, a meeting, a note). The engine only
/// counts them within a window; it never inspects what the activity was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier for this activity.
    pub activity_id: Uuid,

    /// Tenant that owns the record.
    pub tenant_id: Uuid,

    /// The agent who logged the activity.
    pub owner_id: Uuid,

    /// Short description (e.g., "Discovery call with Acme").
    pub subject: String,

    /// When the activity was logged — the timestamp count windows
    /// filter on.
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        tenant_id: Uuid,
        owner_id: Uuid,
        subject: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            activity_id: Uuid::new_v4(),
            tenant_id,
            owner_id,
            subject: subject.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization_round_trip() {
        let a = Activity::new(Uuid::new_v4(), Uuid::new_v4(), "Discovery call", Utc::now());
        let json = serde_json::to_string(&a).unwrap();
        let restored: Activity = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.activity_id, a.activity_id);
        assert_eq!(restored.subject, "Discovery call");
    }
}
