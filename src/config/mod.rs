use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::WineCategory,
    errors::{Result, TastingError},
    storage::json_backend::{tmp_path, write_atomic, DEFAULT_RETENTION},
};

/// User preferences persisted next to the collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of timestamped copies kept per collection.
    pub backup_retention: usize,
    pub plain_mode: bool,
    pub high_contrast_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<WineCategory>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backup_retention: DEFAULT_RETENTION,
            plain_mode: false,
            high_contrast_mode: false,
            default_category: None,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Stored configuration, or defaults when nothing was saved yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            TastingError::Config(format!("invalid `{}`: {}", self.path.display(), err))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
