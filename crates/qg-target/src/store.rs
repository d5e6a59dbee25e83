// store.rs — Persistence for Target records.
//
// Each target is stored as a JSON file: `<store_dir>/<target_id>.json`.
// Milestones live inside the target document, so saving a target after a
// sweep updates its whole milestone set in one write.
//
// The TargetStore trait is the seam the compliance engine is injected
// with; FileTargetStore is the JSON file-based implementation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::TargetError;
use crate::target::Target;

/// Store abstraction for targets. The compliance engine only ever talks
/// to this trait, never to a concrete backend.
pub trait TargetStore {
    /// Save a target (creates or overwrites).
    fn save(&self, target: &Target) -> Result<(), TargetError>;

    /// Get a specific target by ID.
    fn get(&self, target_id: Uuid) -> Result<Option<Target>, TargetError>;

    /// List all targets, retired ones included, newest first.
    fn list(&self) -> Result<Vec<Target>, TargetError>;

    /// Live (non-retired) targets for one assignee, ordered by period
    /// start then target ID so sweeps see a deterministic sequence.
    fn live_for_assignee(&self, assignee_id: Uuid) -> Result<Vec<Target>, TargetError>;

    /// Soft-delete a target. Returns the retired record.
    fn retire(&self, target_id: Uuid, now: DateTime<Utc>) -> Result<Target, TargetError>;
}

/// JSON file-based target store — one file per target.
pub struct FileTargetStore {
    store_dir: PathBuf,
}

impl FileTargetStore {
    /// Create a store backed by the given directory.
    /// Creates the directory if it doesn't exist.
    pub fn new(store_dir: impl AsRef<Path>) -> Result<Self, TargetError> {
        let store_dir = store_dir.as_ref().to_path_buf();
        fs::create_dir_all(&store_dir).map_err(|source| TargetError::IoError {
            path: store_dir.display().to_string(),
            source,
        })?;
        Ok(Self { store_dir })
    }

    fn target_file(&self, target_id: Uuid) -> PathBuf {
        self.store_dir.join(format!("{}.json", target_id))
    }
}

impl TargetStore for FileTargetStore {
    fn save(&self, target: &Target) -> Result<(), TargetError> {
        let path = self.target_file(target.target_id);
        let json = serde_json::to_string_pretty(target)?;
        fs::write(&path, json).map_err(|source| TargetError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }

    fn get(&self, target_id: Uuid) -> Result<Option<Target>, TargetError> {
        let path = self.target_file(target_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| TargetError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let target: Target = serde_json::from_str(&json)?;
        Ok(Some(target))
    }

    fn list(&self) -> Result<Vec<Target>, TargetError> {
        let mut targets = Vec::new();

        let entries = fs::read_dir(&self.store_dir).map_err(|source| TargetError::IoError {
            path: self.store_dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| TargetError::IoError {
                path: self.store_dir.display().to_string(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| TargetError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                if let Ok(target) = serde_json::from_str::<Target>(&json) {
                    targets.push(target);
                }
            }
        }

        // Sort by assignment time, newest first.
        targets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(targets)
    }

    fn live_for_assignee(&self, assignee_id: Uuid) -> Result<Vec<Target>, TargetError> {
        let mut targets: Vec<Target> = self
            .list()?
            .into_iter()
            .filter(|t| t.assignee_id == assignee_id && !t.is_retired())
            .collect();
        targets.sort_by(|a, b| {
            a.period_start
                .cmp(&b.period_start)
                .then(a.target_id.cmp(&b.target_id))
        });
        Ok(targets)
    }

    fn retire(&self, target_id: Uuid, now: DateTime<Utc>) -> Result<Target, TargetError> {
        let mut target = self.get(target_id)?.ok_or(TargetError::NotFound(target_id))?;
        target.retire(now);
        self.save(&target)?;
        Ok(target)
    }
}
