use std::collections::BTreeMap;

use crate::domain::FieldValue;

/// In-progress answers of the evaluation being filled in.
///
/// Single-select groups hold at most one value; multi-select groups hold a
/// list that is toggled one label at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    values: BTreeMap<String, FieldValue>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `value` for `group`, or clears the group when `value` is
    /// already the current selection. Returns whether `value` ends up selected.
    pub fn select_single(&mut self, group: &str, value: &str) -> bool {
        let already_selected = matches!(
            self.values.get(group),
            Some(FieldValue::Single(current)) if current == value
        );
        if already_selected {
            self.values.remove(group);
            false
        } else {
            self.values
                .insert(group.to_string(), FieldValue::Single(value.to_string()));
            true
        }
    }

    /// Toggles membership of `value` in the list stored under `group`.
    /// Returns whether `value` is a member afterwards.
    pub fn select_multiple(&mut self, group: &str, value: &str) -> bool {
        let entry = self
            .values
            .entry(group.to_string())
            .or_insert_with(|| FieldValue::Multiple(Vec::new()));
        if !matches!(entry, FieldValue::Multiple(_)) {
            *entry = FieldValue::Multiple(Vec::new());
        }
        match entry {
            FieldValue::Multiple(values) => {
                if let Some(index) = values.iter().position(|existing| existing == value) {
                    values.remove(index);
                    false
                } else {
                    values.push(value.to_string());
                    true
                }
            }
            FieldValue::Single(_) => false,
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }

    /// Stored value, or an empty string for fields never selected.
    pub fn value_or_default(&self, field: &str) -> FieldValue {
        self.values.get(field).cloned().unwrap_or_else(FieldValue::empty)
    }

    pub fn set(&mut self, field: impl Into<String>, value: FieldValue) {
        self.values.insert(field.into(), value);
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }
}
