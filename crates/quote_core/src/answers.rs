//! Answer record and error set.
//!
//! `AnswerRecord` always holds a value for every [`FieldKey`]; a field that
//! was never touched is the empty string. `ErrorSet` only holds keys that
//! failed the most recent validation pass (minus any the user has edited
//! since).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use crate::field::FieldKey;

/// Values entered by the user, one per field key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<FieldKey, String>",
    into = "BTreeMap<FieldKey, String>"
)]
pub struct AnswerRecord {
    values: [String; FieldKey::COUNT],
}

impl AnswerRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: FieldKey) -> &str {
        &self.values[key.index()]
    }

    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        self.values[key.index()] = value.into();
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        FieldKey::iter().map(move |key| (key, self.get(key)))
    }
}

impl From<BTreeMap<FieldKey, String>> for AnswerRecord {
    fn from(map: BTreeMap<FieldKey, String>) -> Self {
        map.into_iter()
            .fold(AnswerRecord::new(), |record, (key, value)| {
                record.with(key, value)
            })
    }
}

impl From<AnswerRecord> for BTreeMap<FieldKey, String> {
    fn from(record: AnswerRecord) -> Self {
        FieldKey::iter()
            .zip(record.values)
            .collect()
    }
}

/// Field-level validation messages currently shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorSet(BTreeMap<FieldKey, String>);

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: FieldKey, message: impl Into<String>) {
        self.0.insert(key, message.into());
    }

    /// Drops the message for `key`, returning it if one was present.
    pub fn remove(&mut self, key: FieldKey) -> Option<String> {
        self.0.remove(&key)
    }

    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.0.contains_key(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        self.0.iter().map(|(key, msg)| (*key, msg.as_str()))
    }
}

impl FromIterator<(FieldKey, String)> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = (FieldKey, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_record_has_every_key_empty() {
        let record = AnswerRecord::new();
        assert_eq!(record.iter().count(), 17);
        assert!(record.iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn set_is_idempotent() {
        let once = AnswerRecord::new().with(FieldKey::City, "Austin");
        let twice = AnswerRecord::new()
            .with(FieldKey::City, "Austin")
            .with(FieldKey::City, "Austin");
        assert_eq!(once, twice);
    }

    #[test]
    fn json_fills_missing_keys_and_rejects_unknown_ones() {
        let record: AnswerRecord =
            serde_json::from_str(r#"{ "make": "honda", "zipCode": "94102" }"#).unwrap();
        assert_eq!(record.get(FieldKey::Make), "honda");
        assert_eq!(record.get(FieldKey::ZipCode), "94102");
        assert_eq!(record.get(FieldKey::Vin), "");

        let err = serde_json::from_str::<AnswerRecord>(r#"{ "colour": "red" }"#);
        assert!(err.is_err());
    }

    #[test]
    fn json_output_lists_all_keys() {
        let value = serde_json::to_value(AnswerRecord::new().with(FieldKey::Year, "2020")).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 17);
        assert_eq!(obj["year"], "2020");
        assert_eq!(obj["violations"], "");
    }

    #[test]
    fn error_set_remove_reports_presence() {
        let mut errors = ErrorSet::new();
        errors.insert(FieldKey::Email, "Email is required");
        assert_eq!(errors.remove(FieldKey::Email).as_deref(), Some("Email is required"));
        assert_eq!(errors.remove(FieldKey::Email), None);
        assert!(errors.is_empty());
    }
}
