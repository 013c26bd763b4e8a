use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier assigned by a record store on insert.
pub type DocId = u64;

/// Placeholder shown for fields a record does not carry.
pub const MISSING_VALUE: &str = "N/D";

/// Value stored under a record or selection field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn empty() -> Self {
        FieldValue::Single(String::new())
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            FieldValue::Single(value) => Some(value.as_str()),
            FieldValue::Multiple(_) => None,
        }
    }

    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            FieldValue::Single(_) => None,
            FieldValue::Multiple(values) => Some(values.as_slice()),
        }
    }

    /// Whether a button labelled `label` should appear selected for this value.
    pub fn contains(&self, label: &str) -> bool {
        match self {
            FieldValue::Single(value) => value == label,
            FieldValue::Multiple(values) => values.iter().any(|value| value == label),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_empty(),
            FieldValue::Multiple(values) => values.is_empty(),
        }
    }

    /// Flattens the value for display; lists are comma separated.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Single(value) => value.clone(),
            FieldValue::Multiple(values) => values.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(values: Vec<String>) -> Self {
        FieldValue::Multiple(values)
    }
}

/// One saved tasting: a flat field-name → value document. Fields keep the
/// order they were set in, which is the order they are written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WineRecord {
    fields: IndexMap<String, FieldValue>,
}

impl WineRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text form of a field, empty when the field is absent.
    pub fn text(&self, field: &str) -> String {
        self.get(field).map(FieldValue::display).unwrap_or_default()
    }

    /// Display form of a field, [`MISSING_VALUE`] when the field is absent.
    pub fn display(&self, field: &str) -> String {
        self.get(field)
            .map(FieldValue::display)
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
