use crate::domain::{
    schema::{self, TextField},
    DocId, FieldValue, WineCategory, WineRecord,
};

use super::selection::SelectionStore;

pub const SAVE_LABEL: &str = "Salva";
pub const UPDATE_LABEL: &str = "Aggiorna";

/// Identifies the saved record an evaluation is rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditContext {
    pub category: WineCategory,
    pub id: DocId,
}

/// State of the one evaluation currently being filled in.
///
/// A session is rebuilt for every new evaluation and torn down after a save
/// or an abort; nothing about it outlives the form sequence.
#[derive(Debug, Clone, Default)]
pub struct Session {
    category: Option<WineCategory>,
    selections: SelectionStore,
    text: [String; 4],
    edit: Option<EditContext>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh evaluation of `category` with nothing selected.
    pub fn begin(category: WineCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    /// Evaluation pre-filled from saved record `id`.
    ///
    /// Text fields and selection fields are split by name; keys that belong
    /// to neither are dropped.
    pub fn for_edit(category: WineCategory, id: DocId, record: &WineRecord) -> Self {
        let mut session = Self::begin(category);
        session.edit = Some(EditContext { category, id });
        for (key, value) in record.fields() {
            if let Some(field) = TextField::ALL
                .into_iter()
                .find(|field| field.key(category) == key)
            {
                session.set_text(field, value.display());
            } else if schema::is_selection_field(category, key) {
                if matches!(value, FieldValue::Single(text) if text.is_empty()) {
                    continue;
                }
                session.selections.set(key, value.clone());
            } else {
                tracing::debug!(field = key, "ignoring unrecognised record field");
            }
        }
        session
    }

    pub fn category(&self) -> Option<WineCategory> {
        self.category
    }

    pub fn edit(&self) -> Option<EditContext> {
        self.edit
    }

    pub fn is_editing(&self) -> bool {
        self.edit.is_some()
    }

    pub fn selections(&self) -> &SelectionStore {
        &self.selections
    }

    pub fn selections_mut(&mut self) -> &mut SelectionStore {
        &mut self.selections
    }

    pub fn text(&self, field: TextField) -> &str {
        &self.text[text_slot(field)]
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) {
        self.text[text_slot(field)] = value.into();
    }

    /// Label of the button that ends the form sequence.
    pub fn save_label(&self) -> &'static str {
        if self.is_editing() {
            UPDATE_LABEL
        } else {
            SAVE_LABEL
        }
    }

    /// Flattens the session into a record carrying the full field schema of
    /// `category`. Unselected fields are saved as the empty string.
    pub fn build_record(&self, category: WineCategory) -> WineRecord {
        let mut record = WineRecord::new();
        for field in TextField::ALL {
            record.set(field.key(category), self.text(field));
        }
        for field in schema::selection_fields(category) {
            let value = self.selections.value_or_default(&field);
            record.set(field, value);
        }
        record
    }
}

fn text_slot(field: TextField) -> usize {
    match field {
        TextField::Name => 0,
        TextField::Producer => 1,
        TextField::Vintage => 2,
        TextField::Alcohol => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_evaluation_builds_an_all_empty_record() {
        let session = Session::begin(WineCategory::Red);
        let record = session.build_record(WineCategory::Red);
        assert_eq!(record.len(), schema::record_fields(WineCategory::Red).len());
        assert!(record.fields().all(|(_, value)| value.is_empty()));
        assert_eq!(session.save_label(), SAVE_LABEL);
    }

    #[test]
    fn built_records_follow_the_schema_order() {
        let session = Session::begin(WineCategory::White);
        let record = session.build_record(WineCategory::White);
        let keys: Vec<String> = record.fields().map(|(key, _)| key.to_string()).collect();
        assert_eq!(keys, schema::record_fields(WineCategory::White));
    }

    #[test]
    fn build_record_flattens_selections_and_text() {
        let mut session = Session::begin(WineCategory::White);
        session.set_text(TextField::Name, "Soave");
        session.selections_mut().select_single("colore_bianco", "Giallo dorato");
        session.selections_mut().select_multiple("profumo_bianco", "Floreale");

        let record = session.build_record(WineCategory::White);
        assert_eq!(record.text("nome_bianco"), "Soave");
        assert_eq!(record.text("colore_bianco"), "Giallo dorato");
        assert_eq!(
            record.get("profumo_bianco"),
            Some(&FieldValue::Multiple(vec!["Floreale".into()]))
        );
        assert_eq!(record.text("qualita_bianco"), "");
    }

    #[test]
    fn edit_session_splits_text_and_selection_fields() {
        let record = WineRecord::new()
            .with_field("nome_rosso", "Barolo")
            .with_field("alcol_rosso", "14")
            .with_field("colore_rosso", "Granato")
            .with_field("sapore_rosso", vec!["Cuoio".to_string()])
            .with_field("qualita_rosso", "")
            .with_field("note_personali", "legacy");

        let session = Session::for_edit(WineCategory::Red, 3, &record);
        assert_eq!(session.text(TextField::Name), "Barolo");
        assert_eq!(session.text(TextField::Alcohol), "14");
        assert_eq!(
            session.selections().get("colore_rosso"),
            Some(&FieldValue::Single("Granato".into()))
        );
        assert!(session.selections().get("qualita_rosso").is_none());
        assert!(session.selections().get("note_personali").is_none());
        assert!(session.selections().get("nome_rosso").is_none());
        assert_eq!(
            session.edit(),
            Some(EditContext {
                category: WineCategory::Red,
                id: 3
            })
        );
        assert_eq!(session.save_label(), UPDATE_LABEL);
    }

    #[test]
    fn saved_record_survives_an_edit_round_trip() {
        let mut session = Session::begin(WineCategory::Rose);
        session.set_text(TextField::Producer, "Cantina Rosa");
        session.selections_mut().select_single("limpidezza_rosato", "Brillante");
        session.selections_mut().select_multiple("sapore_rosato", "Miele");
        session.selections_mut().select_multiple("sapore_rosato", "Vaniglia");
        let saved = session.build_record(WineCategory::Rose);

        let reopened = Session::for_edit(WineCategory::Rose, 1, &saved);
        assert_eq!(reopened.build_record(WineCategory::Rose), saved);
    }
}
