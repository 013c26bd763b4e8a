use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    domain::{DocId, WineCategory, WineRecord},
    errors::{Result, TastingError},
};

use super::RecordStore;

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S%3f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// On-disk shape of a collection: a single default table keyed by document id.
#[derive(Debug, Default, Deserialize)]
struct DocumentFile {
    #[serde(rename = "_default", default)]
    table: BTreeMap<DocId, WineRecord>,
}

#[derive(Serialize)]
struct DocumentFileRef<'a> {
    #[serde(rename = "_default")]
    table: &'a BTreeMap<DocId, WineRecord>,
}

/// A document collection persisted as one JSON file.
///
/// The whole table is kept in memory and rewritten on every mutation. The
/// previous file is copied to `backups/<collection>/` first. A mutation only
/// reaches the in-memory table once the file has been written.
pub struct JsonDocumentStore {
    category: WineCategory,
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    documents: BTreeMap<DocId, WineRecord>,
    last_id: DocId,
}

impl JsonDocumentStore {
    /// Opens the collection of `category` inside the data directory `base`.
    pub fn open_in(base: &Path, category: WineCategory, retention: usize) -> Result<Self> {
        ensure_dir(base)?;
        let path = PathResolver::store_file_in(base, category);
        let backups_dir = PathResolver::backup_dir_in(base).join(collection_name(&path));
        let documents = load_documents(&path)?;
        let last_id = documents.keys().next_back().copied().unwrap_or_default();
        tracing::debug!(
            collection = %category,
            documents = documents.len(),
            "opened record store"
        );
        Ok(Self {
            category,
            path,
            backups_dir,
            retention: retention.max(1),
            documents,
            last_id,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn category(&self) -> WineCategory {
        self.category
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn persist(&self, table: &BTreeMap<DocId, WineRecord>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(&DocumentFileRef { table })?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let collection = collection_name(&self.path);
        let mut stamp = Utc::now();
        let mut target = self.backups_dir.join(backup_name(&collection, stamp));
        while target.exists() {
            stamp = stamp + Duration::milliseconds(1);
            target = self.backups_dir.join(backup_name(&collection, stamp));
        }
        fs::copy(&self.path, &target)?;
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for entry in backups.iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(self.backups_dir.join(entry)) {
                tracing::warn!(
                    collection = %self.category,
                    backup = %entry,
                    error = %err,
                    "failed to prune backup"
                );
            }
        }
        Ok(())
    }
}

impl RecordStore for JsonDocumentStore {
    fn insert(&mut self, record: WineRecord) -> Result<DocId> {
        let current_max = self.documents.keys().next_back().copied().unwrap_or_default();
        let id = self.last_id.max(current_max) + 1;
        let mut table = self.documents.clone();
        table.insert(id, record);
        self.persist(&table)?;
        self.documents = table;
        self.last_id = id;
        tracing::info!(collection = %self.category, id, "record inserted");
        Ok(id)
    }

    fn update(&mut self, id: DocId, record: WineRecord) -> Result<bool> {
        if self.documents.contains_key(&id) {
            let mut table = self.documents.clone();
            table.insert(id, record);
            self.persist(&table)?;
            self.documents = table;
            tracing::info!(collection = %self.category, id, "record updated");
            return Ok(true);
        }
        tracing::warn!(collection = %self.category, id, "update skipped: no such record");
        Ok(false)
    }

    fn remove(&mut self, id: DocId) -> Result<()> {
        let mut table = self.documents.clone();
        if table.remove(&id).is_none() {
            return Err(TastingError::RecordNotFound {
                category: self.category,
                id,
            });
        }
        self.persist(&table)?;
        self.documents = table;
        tracing::info!(collection = %self.category, id, "record removed");
        Ok(())
    }

    fn all(&self) -> Result<Vec<(DocId, WineRecord)>> {
        Ok(self
            .documents
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect())
    }

    fn get(&self, id: DocId) -> Result<Option<WineRecord>> {
        Ok(self.documents.get(&id).cloned())
    }
}

fn load_documents(path: &Path) -> Result<BTreeMap<DocId, WineRecord>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let data = fs::read_to_string(path)?;
    if data.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let file: DocumentFile = serde_json::from_str(&data).map_err(|err| {
        TastingError::Storage(format!("cannot read `{}`: {}", path.display(), err))
    })?;
    Ok(file.table)
}

fn collection_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("collection")
        .to_string()
}

fn backup_name(collection: &str, stamp: DateTime<Utc>) -> String {
    format!(
        "{}_{}.{}",
        collection,
        stamp.format(BACKUP_TIMESTAMP_FORMAT),
        BACKUP_EXTENSION
    )
}

/// Reads the stamp out of `<collection>_YYYYMMDD_HHMMSSmmm.json`. Older
/// minute-resolution names (`_HHMM`) are still recognised.
fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let stem = name.strip_suffix(".json")?;
    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() < 3 {
        return None;
    }
    let date_part = parts[parts.len() - 2];
    let time_part = parts[parts.len() - 1];
    if !is_digits(date_part, 8) {
        return None;
    }
    let (clock, millis) = if is_digits(time_part, 9) {
        (&time_part[..6], time_part[6..].parse::<i64>().ok()?)
    } else if is_digits(time_part, 4) {
        (time_part, 0)
    } else {
        return None;
    };
    let format = if clock.len() == 6 { "%Y%m%d%H%M%S" } else { "%Y%m%d%H%M" };
    NaiveDateTime::parse_from_str(&format!("{date_part}{clock}"), format)
        .ok()
        .map(|naive| {
            DateTime::from_naive_utc_and_offset(naive, Utc) + Duration::milliseconds(millis)
        })
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
