pub mod json_backend;

use std::path::PathBuf;

use crate::{
    core::utils::PathResolver,
    domain::{DocId, WineCategory, WineRecord},
    errors::Result,
};

/// One collection of saved tastings.
pub trait RecordStore: Send {
    /// Appends `record` and returns its freshly assigned id.
    fn insert(&mut self, record: WineRecord) -> Result<DocId>;
    /// Replaces every field of document `id`. Returns `false` when no such
    /// document exists; nothing is written in that case.
    fn update(&mut self, id: DocId, record: WineRecord) -> Result<bool>;
    fn remove(&mut self, id: DocId) -> Result<()>;
    /// Every document in storage order.
    fn all(&self) -> Result<Vec<(DocId, WineRecord)>>;
    fn get(&self, id: DocId) -> Result<Option<WineRecord>>;
}

pub use json_backend::JsonDocumentStore;

/// The three per-category collections, opened once for the process lifetime.
pub struct RecordStores {
    red: Box<dyn RecordStore>,
    white: Box<dyn RecordStore>,
    rose: Box<dyn RecordStore>,
}

impl RecordStores {
    pub fn new(
        red: Box<dyn RecordStore>,
        white: Box<dyn RecordStore>,
        rose: Box<dyn RecordStore>,
    ) -> Self {
        Self { red, white, rose }
    }

    /// Opens the JSON collections under `root` (or the resolved data directory).
    pub fn open_json(root: Option<PathBuf>, retention: usize) -> Result<Self> {
        let base = PathResolver::resolve_base(root);
        let open = |category| -> Result<Box<dyn RecordStore>> {
            Ok(Box::new(JsonDocumentStore::open_in(&base, category, retention)?))
        };
        Ok(Self::new(
            open(WineCategory::Red)?,
            open(WineCategory::White)?,
            open(WineCategory::Rose)?,
        ))
    }

    pub fn store(&self, category: WineCategory) -> &dyn RecordStore {
        match category {
            WineCategory::Red => self.red.as_ref(),
            WineCategory::White => self.white.as_ref(),
            WineCategory::Rose => self.rose.as_ref(),
        }
    }

    pub fn store_mut(&mut self, category: WineCategory) -> &mut dyn RecordStore {
        match category {
            WineCategory::Red => self.red.as_mut(),
            WineCategory::White => self.white.as_mut(),
            WineCategory::Rose => self.rose.as_mut(),
        }
    }
}
