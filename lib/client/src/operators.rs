//! Typed operator master client.
//!
//! Two schema variants exist in the wild: older rows carry a single
//! `section` string, newer ones a `sections` JSON array — sometimes
//! delivered as a JSON-encoded string, depending on the MySQL driver.
//! `Operator::section_list` absorbs all three shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use plantlab_core::{Error, SelectOption};

use crate::api::Api;

/// One operator row as the API returns it (snake_case columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Older schema: single section string.
    #[serde(default)]
    pub section: Option<String>,
    /// Newer schema: JSON array, or a JSON-encoded string of one.
    #[serde(default)]
    pub sections: Option<Value>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default = "default_active", deserialize_with = "bool_or_tinyint")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

// MySQL BOOLEAN is a tinyint; the driver hands it over as 0/1.
fn bool_or_tinyint<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(de)? {
        Value::Bool(b) => Ok(b),
        Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
        other => Err(serde::de::Error::custom(format!(
            "expected bool or 0/1 for is_active, got {other}"
        ))),
    }
}

impl Operator {
    /// Sections this operator works in, across both schema variants.
    pub fn section_list(&self) -> Vec<String> {
        if let Some(sections) = &self.sections {
            match sections {
                Value::Array(items) => {
                    return items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect();
                }
                Value::String(s) => {
                    // JSON column serialized to a string by the driver.
                    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(s) {
                        return items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect();
                    }
                    if !s.is_empty() {
                        return vec![s.clone()];
                    }
                }
                _ => {}
            }
        }
        self.section.clone().into_iter().collect()
    }

    /// Name shown in operator dropdowns: short name when set, else
    /// "First Last".
    pub fn display_name(&self) -> String {
        match self.short_name.as_deref().filter(|s| !s.is_empty()) {
            Some(short) => short.to_string(),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Create/update payload — the API expects camelCase here, unlike the
/// rows it returns.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorPayload {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub sections: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub is_active: bool,
}

/// Thin wrapper around the `/operators` endpoints.
#[derive(Debug, Clone)]
pub struct OperatorClient {
    api: Api,
}

impl OperatorClient {
    pub fn new(api: Api) -> Self {
        OperatorClient { api }
    }

    pub fn list(&self) -> Result<Vec<Operator>, Error> {
        let body = self.api.get_json("/operators")?;
        serde_json::from_value(body)
            .map_err(|e| Error::Transport(format!("unexpected operator list: {e}")))
    }

    /// Active operators assigned to a section.
    pub fn by_section(&self, section: &str) -> Result<Vec<Operator>, Error> {
        let path = format!("/operators/section/{}", urlencode(section));
        let body = self.api.get_json(&path)?;
        serde_json::from_value(body)
            .map_err(|e| Error::Transport(format!("unexpected operator list: {e}")))
    }

    pub fn create(&self, payload: &OperatorPayload) -> Result<(), Error> {
        let value = serde_json::to_value(payload)
            .map_err(|e| Error::Transport(e.to_string()))?;
        self.api.create("/operators", &value).map(|_| ())
    }

    pub fn update(&self, id: i64, payload: &OperatorPayload) -> Result<(), Error> {
        let value = serde_json::to_value(payload)
            .map_err(|e| Error::Transport(e.to_string()))?;
        self.api.update("/operators", id, &value).map(|_| ())
    }

    pub fn delete(&self, id: i64) -> Result<(), Error> {
        self.api.delete("/operators", id)
    }

    /// Dropdown options for operator-select fields: active operators
    /// only, value = display name (the forms store names, not ids).
    pub fn options(&self) -> Result<Vec<SelectOption>, Error> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|op| op.is_active)
            .map(|op| SelectOption::plain(op.display_name()))
            .collect())
    }
}

/// Percent-encode a path segment. Only what section names need.
fn urlencode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
