//! Server-reported validation errors and their projection onto individual fields.

use crate::form::Field;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Field name → message, exactly as the backend reported it after the last attempt.
///
/// Deserializes from the backend's error body. Keys may be wire names (`title`) or the
/// older `<name>Error` keys (`perfumeTitleError`); anything else is dropped.
///
/// ```
/// use perfume_form::{field_errors::ErrorMap, form::Field};
///
/// let errors: ErrorMap =
///     serde_json::from_str(r#"{"perfumeTitleError": "Fill in the input field"}"#).unwrap();
/// assert_eq!(errors.error_for(Field::Title), Some("Fill in the input field"));
/// assert_eq!(errors.error_for(Field::Brand), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, Value>")]
pub struct ErrorMap {
    errors: BTreeMap<Field, String>,
}

impl ErrorMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The message for `field`, or `None` if it currently has no error.
    #[must_use]
    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    #[must_use]
    pub fn with(mut self, field: Field, message: impl Into<String>) -> Self {
        self.errors.insert(field, message.into());
        self
    }
}

impl FromIterator<(Field, String)> for ErrorMap {
    fn from_iter<T: IntoIterator<Item = (Field, String)>>(iter: T) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

fn field_from_error_key(key: &str) -> Option<Field> {
    key.parse()
        .ok()
        .or_else(|| key.strip_suffix("Error").and_then(|k| k.parse().ok()))
}

impl From<HashMap<String, Value>> for ErrorMap {
    fn from(raw: HashMap<String, Value>) -> Self {
        let mut errors = BTreeMap::new();
        for (key, value) in raw {
            let Some(field) = field_from_error_key(&key) else {
                log::warn!("dropping error for unknown field `{key}`");
                continue;
            };
            match value {
                Value::String(message) => {
                    errors.insert(field, message);
                }
                Value::Null => {}
                other => log::warn!("dropping non-text error for `{key}`: {other}"),
            }
        }
        Self { errors }
    }
}
