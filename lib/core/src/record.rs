use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a backing entity table: an opaque column → scalar mapping
/// that always carries a numeric `id`.
///
/// The server owns the row; a `Record` is a transient snapshot from the
/// last full-table fetch. Columns are untyped on purpose — every screen
/// interprets them through its entity definition, not through a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Record(Map::new())
    }

    /// Row id, if the `id` column is present and numeric.
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    /// Raw column value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Column value rendered as a string; `None` for missing or null columns.
    ///
    /// Numbers and booleans are stringified the way the original screens
    /// showed them in table cells.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(v) => Some(v.to_string()),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Build a record from `(column, value)` pairs. Test and seed helper.
    pub fn from_pairs(pairs: &[(&str, Value)]) -> Self {
        let mut map = Map::new();
        for (k, v) in pairs {
            map.insert((*k).to_string(), v.clone());
        }
        Record(map)
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn id_and_columns() {
        let r = Record::from_pairs(&[
            ("id", json!(7)),
            ("batch_name", json!("B-2024-1145")),
            ("no_of_shoots", json!(1000)),
            ("remark", json!(null)),
        ]);
        assert_eq!(r.id(), Some(7));
        assert_eq!(r.get_str("batch_name").as_deref(), Some("B-2024-1145"));
        assert_eq!(r.get_str("no_of_shoots").as_deref(), Some("1000"));
        assert_eq!(r.get_str("remark"), None);
        assert_eq!(r.get_str("missing"), None);
    }

    #[test]
    fn deserializes_from_plain_object() {
        let r: Record = serde_json::from_value(json!({"id": 3, "crop_name": "Rose"})).unwrap();
        assert_eq!(r.id(), Some(3));
        assert_eq!(r.get_str("crop_name").as_deref(), Some("Rose"));
    }
}
