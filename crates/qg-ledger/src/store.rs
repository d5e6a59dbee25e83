// store.rs — Ledger read traits and file-backed reference stores.
//
// In production the deal ledger and activity log live in the host CRM;
// the engine reaches them through these two read traits. The JSON
// file-based implementations (one file per record) exist so the CLI and
// tests have real collaborators to run against.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::activity::Activity;
use crate::deal::Deal;
use crate::error::LedgerError;

/// Read access to the deal ledger.
pub trait DealLedger {
    /// All deals owned by one agent, in no particular order. Window and
    /// status filtering belong to the caller — the metric semantics live
    /// with the aggregator, not the store.
    fn deals_for_owner(&self, owner_id: Uuid) -> Result<Vec<Deal>, LedgerError>;
}

/// Read access to the activity log.
pub trait ActivityLog {
    /// All activities logged by one agent, in no particular order.
    fn activities_for_owner(&self, owner_id: Uuid) -> Result<Vec<Activity>, LedgerError>;
}

fn read_all<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, LedgerError> {
    let mut records = Vec::new();

    let entries = fs::read_dir(dir).map_err(|source| LedgerError::IoError {
        path: dir.display().to_string(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| LedgerError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "json") {
            let json = fs::read_to_string(&path).map_err(|source| LedgerError::IoError {
                path: path.display().to_string(),
                source,
            })?;
            if let Ok(record) = serde_json::from_str::<T>(&json) {
                records.push(record);
            }
        }
    }

    Ok(records)
}

fn write_one<T: Serialize>(dir: &Path, id: Uuid, record: &T) -> Result<(), LedgerError> {
    let path = dir.join(format!("{}.json", id));
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json).map_err(|source| LedgerError::IoError {
        path: path.display().to_string(),
        source,
    })
}

/// JSON file-based deal ledger.
pub struct FileDealLedger {
    dir: PathBuf,
}

impl FileDealLedger {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| LedgerError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Record a deal (creates or overwrites by deal ID).
    pub fn record(&self, deal: &Deal) -> Result<(), LedgerError> {
        write_one(&self.dir, deal.deal_id, deal)
    }

    /// Every deal in the ledger, across all owners.
    pub fn list(&self) -> Result<Vec<Deal>, LedgerError> {
        read_all(&self.dir)
    }
}

impl DealLedger for FileDealLedger {
    fn deals_for_owner(&self, owner_id: Uuid) -> Result<Vec<Deal>, LedgerError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|d| d.owner_id == owner_id)
            .collect())
    }
}

/// JSON file-based activity log.
pub struct FileActivityLog {
    dir: PathBuf,
}

impl FileActivityLog {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| LedgerError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Record an activity (creates or overwrites by activity ID).
    pub fn record(&self, activity: &Activity) -> Result<(), LedgerError> {
        write_one(&self.dir, activity.activity_id, activity)
    }

    /// Every activity in the log, across all owners.
    pub fn list(&self) -> Result<Vec<Activity>, LedgerError> {
        read_all(&self.dir)
    }
}

impl ActivityLog for FileActivityLog {
    fn activities_for_owner(&self, owner_id: Uuid) -> Result<Vec<Activity>, LedgerError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| a.owner_id == owner_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    #[test]
    fn deals_filtered_by_owner() {
        let dir = tempdir().unwrap();
        let ledger = FileDealLedger::new(dir.path().join("deals")).unwrap();

        let tenant = Uuid::new_v4();
        let dana = Uuid::new_v4();
        let sam = Uuid::new_v4();

        ledger
            .record(&Deal::new(tenant, dana, "Acme", Some(100.0), "won", Utc::now()))
            .unwrap();
        ledger
            .record(&Deal::new(tenant, dana, "Globex", Some(200.0), "open", Utc::now()))
            .unwrap();
        ledger
            .record(&Deal::new(tenant, sam, "Initech", Some(300.0), "won", Utc::now()))
            .unwrap();

        assert_eq!(ledger.deals_for_owner(dana).unwrap().len(), 2);
        assert_eq!(ledger.deals_for_owner(sam).unwrap().len(), 1);
        assert!(ledger.deals_for_owner(Uuid::new_v4()).unwrap().is_empty());
    }

    #[test]
    fn activities_filtered_by_owner() {
        let dir = tempdir().unwrap();
        let log = FileActivityLog::new(dir.path().join("activities")).unwrap();

        let tenant = Uuid::new_v4();
        let dana = Uuid::new_v4();

        for subject in ["Call", "Demo", "Follow-up"] {
            log.record(&Activity::new(tenant, dana, subject, Utc::now()))
                .unwrap();
        }
        log.record(&Activity::new(tenant, Uuid::new_v4(), "Other", Utc::now()))
            .unwrap();

        assert_eq!(log.activities_for_owner(dana).unwrap().len(), 3);
    }

    #[test]
    fn rerecording_same_id_overwrites() {
        let dir = tempdir().unwrap();
        let ledger = FileDealLedger::new(dir.path().join("deals")).unwrap();

        let mut deal = Deal::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Acme",
            Some(100.0),
            "open",
            Utc::now(),
        );
        ledger.record(&deal).unwrap();

        deal.status = "won".to_string();
        deal.updated_at = Utc::now();
        ledger.record(&deal).unwrap();

        let all = ledger.list().unwrap();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_won());
    }

    #[test]
    fn empty_stores_read_as_empty() {
        let dir = tempdir().unwrap();
        let ledger = FileDealLedger::new(dir.path().join("deals")).unwrap();
        let log = FileActivityLog::new(dir.path().join("activities")).unwrap();
        assert!(ledger.list().unwrap().is_empty());
        assert!(log.list().unwrap().is_empty());
    }
}
