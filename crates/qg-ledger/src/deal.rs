// deal.rs — Deal: a read-only slice of the external deal ledger.
//
// Deal status is free text in the source CRM; the engine only cares
// whether a deal is "won" or "lost", matched case-insensitively. A deal
// with no value counts as zero, not as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One deal record as the engine sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    /// Unique identifier for this deal.
    pub deal_id: Uuid,

    /// Tenant that owns the deal.
    pub tenant_id: Uuid,

    /// The agent who owns the deal.
    pub owner_id: Uuid,

    /// Deal title (e.g., "Acme renewal").
    pub title: String,

    /// Deal value. Missing values aggregate as zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Free-text pipeline status (e.g., "open", "Won", "LOST").
    pub status: String,

    /// When the deal was created.
    pub created_at: DateTime<Utc>,

    /// Last modification — the timestamp revenue and pipeline windows
    /// filter on.
    pub updated_at: DateTime<Utc>,
}

impl Deal {
    /// Create a deal whose created/updated stamps are both `at`.
    pub fn new(
        tenant_id: Uuid,
        owner_id: Uuid,
        title: impl Into<String>,
        value: Option<f64>,
        status: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            deal_id: Uuid::new_v4(),
            tenant_id,
            owner_id,
            title: title.into(),
            value,
            status: status.into(),
            created_at: at,
            updated_at: at,
        }
    }

    /// Whether this deal is won, case-insensitively.
    pub fn is_won(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("won")
    }

    /// Whether this deal is lost, case-insensitively.
    pub fn is_lost(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("lost")
    }

    /// Deal value with missing treated as zero.
    pub fn amount(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}
