// config.rs — Engine configuration.
//
// EngineConfig determines where the file-backed stores live. The
// `for_root()` constructor generates the standard layout under a `.qg/`
// directory in the data root.

use std::path::{Path, PathBuf};

/// Directory layout for the engine's file-backed stores.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Root directory everything lives under.
    pub data_root: PathBuf,

    /// Directory for target records (one JSON file per target).
    pub targets_dir: PathBuf,

    /// Directory for agent records (one JSON file per agent).
    pub roster_dir: PathBuf,

    /// Directory for deal records.
    pub deals_dir: PathBuf,

    /// Directory for activity records.
    pub activities_dir: PathBuf,
}

impl EngineConfig {
    /// Create a config with the standard `.qg/` layout for a data root.
    pub fn for_root(data_root: impl AsRef<Path>) -> Self {
        let root = data_root.as_ref().to_path_buf();
        let qg_dir = root.join(".qg");
        Self {
            data_root: root,
            targets_dir: qg_dir.join("targets"),
            roster_dir: qg_dir.join("roster"),
            deals_dir: qg_dir.join("deals"),
            activities_dir: qg_dir.join("activities"),
        }
    }
}
