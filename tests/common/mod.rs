use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use once_cell::sync::Lazy;
use tasting_core::{
    config::ConfigManager,
    core::NavigationController,
    storage::{json_backend::DEFAULT_RETENTION, RecordStores},
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated data directory for one test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens the three JSON stores under `base`.
pub fn open_stores(base: &Path) -> RecordStores {
    RecordStores::open_json(Some(base.to_path_buf()), DEFAULT_RETENTION)
        .expect("open json stores")
}

/// A controller and config manager backed by unique directories for each test.
#[allow(dead_code)]
pub fn setup_test_env() -> (NavigationController, ConfigManager, PathBuf) {
    let base = temp_home();
    let controller = NavigationController::new(open_stores(&base));
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (controller, config_manager, base)
}
