use crate::{
    domain::{DocId, WineCategory, WineRecord},
    errors::Result,
    storage::RecordStore,
};

pub const UNKNOWN_WINE: &str = "Vino Sconosciuto";

/// Detail sections: heading and the stems of the fields it lists.
const DETAIL_SECTIONS: &[(&str, &[&str])] = &[
    (
        "Vista (Limpidezza / Intensità / Colore)",
        &["limpidezza", "intensita_vista", "colore"],
    ),
    (
        "Olfatto (Condizione / Intensità)",
        &["condizione", "intensita_naso"],
    ),
    ("Profumi", &["profumo"]),
    ("Palato", &["dolcezza"]),
    (
        "Corpo / Acidità / Tannini / Alcol",
        &["corpo", "acidita", "tannicita", "livello_alcolico"],
    ),
    ("Sapori", &["sapore"]),
    ("Persistenza / Qualità", &["persistenza", "qualita"]),
];

/// A saved record as listed in the archive.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub id: DocId,
    pub record: WineRecord,
}

impl ArchiveEntry {
    pub fn title(&self, category: WineCategory) -> String {
        record_title(category, &self.record)
    }

    /// Producer and vintage, as shown under the title of a row.
    pub fn subtitle(&self, category: WineCategory) -> String {
        let producer = self.record.text(&category.field("produttore"));
        let vintage = self.record.text(&category.field("annata"));
        match (producer.is_empty(), vintage.is_empty()) {
            (false, false) => format!("{producer} - {vintage}"),
            (false, true) => producer,
            (true, false) => vintage,
            (true, true) => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailSection {
    pub heading: &'static str,
    pub value: String,
}

/// Read-only expansion of one archived record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDetail {
    pub id: DocId,
    pub category: WineCategory,
    pub title: String,
    pub header: String,
    pub sections: Vec<DetailSection>,
}

impl RecordDetail {
    pub fn from_record(category: WineCategory, id: DocId, record: &WineRecord) -> Self {
        let value_or = |stem: &str, fallback: &str| {
            record
                .get(&category.field(stem))
                .filter(|value| !value.is_empty())
                .map(|value| value.display())
                .unwrap_or_else(|| fallback.to_string())
        };
        let header = format!(
            "{}   {}   {}° vol.",
            value_or("produttore", "Produttore N/D"),
            value_or("annata", "Annata N/D"),
            value_or("alcol", "Grad. Alcolica N/D"),
        );
        let sections = DETAIL_SECTIONS
            .iter()
            .map(|&(heading, stems)| DetailSection {
                heading,
                value: stems
                    .iter()
                    .map(|stem| record.display(&category.field(stem)))
                    .collect::<Vec<_>>()
                    .join(" / "),
            })
            .collect();
        Self {
            id,
            category,
            title: record_title(category, record),
            header,
            sections,
        }
    }
}

fn record_title(category: WineCategory, record: &WineRecord) -> String {
    record
        .get(&category.field("nome"))
        .filter(|value| !value.is_empty())
        .map(|value| value.display())
        .unwrap_or_else(|| UNKNOWN_WINE.to_string())
}

/// The saved-records list of one category plus its optional open detail.
#[derive(Debug, Clone)]
pub struct ArchiveView {
    category: WineCategory,
    entries: Vec<ArchiveEntry>,
    detail: Option<RecordDetail>,
}

impl ArchiveView {
    pub fn new(category: WineCategory) -> Self {
        Self {
            category,
            entries: Vec::new(),
            detail: None,
        }
    }

    /// Re-reads every record of the category from `store`.
    pub fn reload(&mut self, store: &dyn RecordStore) -> Result<()> {
        self.entries = store
            .all()?
            .into_iter()
            .map(|(id, record)| ArchiveEntry { id, record })
            .collect();
        tracing::debug!(
            category = %self.category,
            entries = self.entries.len(),
            "archive reloaded"
        );
        Ok(())
    }

    pub fn category(&self) -> WineCategory {
        self.category
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn entry(&self, id: DocId) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn empty_message(&self) -> &'static str {
        self.category.profile().empty_archive_message
    }

    /// Expands record `id`; returns `None` when it is not listed.
    pub fn open_detail(&mut self, id: DocId) -> Option<&RecordDetail> {
        let entry = self.entry(id)?;
        let detail = RecordDetail::from_record(self.category, entry.id, &entry.record);
        self.detail = Some(detail);
        self.detail.as_ref()
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn detail(&self) -> Option<&RecordDetail> {
        self.detail.as_ref()
    }
}
