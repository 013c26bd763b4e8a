use dirs::home_dir;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{domain::WineCategory, errors::Result};

const DEFAULT_DIR_NAME: &str = ".tasting_core";
const HOME_ENV: &str = "TASTING_CORE_HOME";
const BACKUP_DIR: &str = "backups";
const CONFIG_FILE: &str = "config.json";

/// Resolves every on-disk location used by the application.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory: `$TASTING_CORE_HOME`, else `~/.tasting_core`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn resolve_base(root: Option<PathBuf>) -> PathBuf {
        root.unwrap_or_else(Self::base_dir)
    }

    /// Document file backing the archive of `category`.
    pub fn store_file_in(base: &Path, category: WineCategory) -> PathBuf {
        base.join(category.profile().store_file)
    }

    pub fn backup_dir_in(base: &Path) -> PathBuf {
        base.join(BACKUP_DIR)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

/// Creates `path` (and parents) when missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
