mod common;

use std::fs;

use assert_fs::prelude::*;

use tasting_core::{
    config::{Config, ConfigManager},
    domain::{FieldValue, WineCategory, WineRecord},
    storage::{JsonDocumentStore, RecordStore},
    TastingError,
};

use common::{open_stores, temp_home};

fn barolo() -> WineRecord {
    WineRecord::new()
        .with_field("nome_rosso", "Barolo")
        .with_field(
            "profumo_rosso",
            vec!["Fruttato".to_string(), "Cuoio".to_string()],
        )
}

#[test]
fn documents_written_by_older_versions_are_readable() {
    let temp = assert_fs::TempDir::new().expect("temp dir");
    let file = temp.child("white_wine_database.json");
    file.write_str(
        r#"{"_default": {"3": {"nome_bianco": "Soave", "sapore_bianco": ["Minerale"]},
                         "7": {"nome_bianco": "Lugana"}}}"#,
    )
    .expect("seed file");

    let mut store =
        JsonDocumentStore::open_in(temp.path(), WineCategory::White, 5).expect("open store");
    let ids: Vec<u64> = store.all().expect("list").into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![3, 7]);
    let soave = store.get(3).expect("get").expect("present");
    assert_eq!(
        soave.get("sapore_bianco"),
        Some(&FieldValue::Multiple(vec!["Minerale".to_string()]))
    );

    let next = store.insert(WineRecord::new()).expect("insert");
    assert_eq!(next, 8);
    file.assert(predicates::str::contains("\"8\""));
    temp.child("backups/white_wine_database")
        .assert(predicates::path::is_dir());
}

#[test]
fn list_values_survive_a_reopen() {
    let base = temp_home();
    {
        let mut stores = open_stores(&base);
        stores
            .store_mut(WineCategory::Red)
            .insert(barolo())
            .expect("insert");
    }
    let stores = open_stores(&base);
    let records = stores.store(WineCategory::Red).all().expect("list");
    assert_eq!(records, vec![(1, barolo())]);
}

#[test]
fn backups_are_pruned_to_the_retention() {
    let base = temp_home();
    let backups = base.join("backups").join("red_wine_database");
    fs::create_dir_all(&backups).expect("backup dir");
    for stamp in ["20200101_0000", "20200102_0000", "20200103_0000"] {
        fs::write(backups.join(format!("red_wine_database_{stamp}.json")), "{}")
            .expect("seed backup");
    }

    let mut store = JsonDocumentStore::open_in(&base, WineCategory::Red, 2).expect("open");
    store.insert(barolo()).expect("first insert");
    store.insert(barolo()).expect("second insert");

    let listed = store.list_backups().expect("list backups");
    assert_eq!(listed.len(), 2);
    assert!(!listed[0].contains("2020"));
    assert_eq!(listed[1], "red_wine_database_20200103_0000.json");
}

#[test]
fn removing_an_unknown_id_is_an_error() {
    let base = temp_home();
    let mut store = JsonDocumentStore::open_in(&base, WineCategory::Rose, 5).expect("open");
    let err = store.remove(42).expect_err("nothing to remove");
    assert!(matches!(
        err,
        TastingError::RecordNotFound {
            category: WineCategory::Rose,
            id: 42
        }
    ));
    assert!(!store.update(42, barolo()).expect("update is not an error"));
}

#[test]
fn config_round_trips_through_disk() {
    let base = temp_home();
    let manager = ConfigManager::with_base_dir(base.clone()).expect("manager");
    assert_eq!(manager.load().expect("defaults"), Config::default());

    let config = Config {
        backup_retention: 2,
        plain_mode: true,
        high_contrast_mode: false,
        default_category: Some(WineCategory::White),
    };
    manager.save(&config).expect("save");
    assert_eq!(manager.path(), base.join("config.json").as_path());

    let reloaded = ConfigManager::with_base_dir(base).expect("manager").load();
    assert_eq!(reloaded.expect("load"), config);
}

#[test]
fn malformed_config_is_reported() {
    let base = temp_home();
    fs::write(base.join("config.json"), "{ not json").expect("seed");
    let err = ConfigManager::with_base_dir(base)
        .expect("manager")
        .load()
        .expect_err("invalid json");
    assert!(matches!(err, TastingError::Config(_)));
}
