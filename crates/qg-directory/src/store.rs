// store.rs — Directory persistence.
//
// Each agent is stored as a JSON file: `<dir>/<agent_id>.json`. The
// Directory trait is the injection seam for the compliance engine: the
// evaluator reads active agents through it, the enforcer writes blocks
// through it, and tests swap in whatever implementation they need.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::agent::AgentRecord;
use crate::error::DirectoryError;

/// Read/write access to the agent directory.
pub trait Directory {
    /// All currently active agents, ordered by agent ID for a
    /// deterministic scan sequence.
    fn active_agents(&self) -> Result<Vec<AgentRecord>, DirectoryError>;

    /// Get a specific agent by ID.
    fn get(&self, agent_id: Uuid) -> Result<Option<AgentRecord>, DirectoryError>;

    /// Save an agent record (creates or overwrites).
    fn update(&self, agent: &AgentRecord) -> Result<(), DirectoryError>;
}

/// JSON file-based directory — one file per agent.
pub struct FileDirectory {
    dir: PathBuf,
}

impl FileDirectory {
    /// Create a directory store backed by the given path.
    /// Creates the directory if it doesn't exist.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| DirectoryError::IoError {
            path: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// List every agent record, active or not.
    pub fn list(&self) -> Result<Vec<AgentRecord>, DirectoryError> {
        let mut agents = Vec::new();

        let entries = fs::read_dir(&self.dir).map_err(|source| DirectoryError::IoError {
            path: self.dir.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| DirectoryError::IoError {
                path: self.dir.display().to_string(),
                source,
            })?;
            let path = entry.path();

            if path.extension().is_some_and(|ext| ext == "json") {
                let json = fs::read_to_string(&path).map_err(|source| DirectoryError::IoError {
                    path: path.display().to_string(),
                    source,
                })?;
                if let Ok(agent) = serde_json::from_str::<AgentRecord>(&json) {
                    agents.push(agent);
                }
            }
        }

        agents.sort_by(|a, b| a.agent_id.cmp(&b.agent_id));
        Ok(agents)
    }

    /// Reinstate a blocked agent and persist the record.
    pub fn reinstate(
        &self,
        agent_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<AgentRecord, DirectoryError> {
        let mut agent = self.get(agent_id)?.ok_or(DirectoryError::NotFound(agent_id))?;
        agent.record_reinstatement(now);
        self.update(&agent)?;
        Ok(agent)
    }

    fn agent_file(&self, agent_id: Uuid) -> PathBuf {
        self.dir.join(format!("{}.json", agent_id))
    }
}

impl Directory for FileDirectory {
    fn active_agents(&self) -> Result<Vec<AgentRecord>, DirectoryError> {
        Ok(self.list()?.into_iter().filter(|a| a.active).collect())
    }

    fn get(&self, agent_id: Uuid) -> Result<Option<AgentRecord>, DirectoryError> {
        let path = self.agent_file(agent_id);
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&path).map_err(|source| DirectoryError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        let agent: AgentRecord = serde_json::from_str(&json)?;
        Ok(Some(agent))
    }

    fn update(&self, agent: &AgentRecord) -> Result<(), DirectoryError> {
        let path = self.agent_file(agent.agent_id);
        let json = serde_json::to_string_pretty(agent)?;
        fs::write(&path, json).map_err(|source| DirectoryError::IoError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(())
    }
}
