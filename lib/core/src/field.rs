use std::collections::BTreeMap;

use serde_json::Value;

use crate::record::Record;

/// In-progress form values, keyed by field key. Exists only while an
/// add/edit modal is open; discarded on close or successful save.
pub type FormValues = BTreeMap<String, String>;

/// Where a select field gets its options from.
///
/// Named sources instead of embedded closures: the rendering layer looks
/// the source up, the definition stays plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectSource {
    /// Fixed option list (e.g. tunnels T-1 … T-48).
    Static(&'static [&'static str]),
    /// Active operators from the operator master.
    Operators,
    /// Batch codes from the batch feed.
    Batches,
}

/// Input kind for one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Time,
    Textarea,
    Select(SelectSource),
    /// Shown but not editable (filled by a select side-effect, e.g. crop
    /// name following the chosen batch).
    ReadOnly,
    /// Entity-specific widget, dispatched by tag (e.g. "tray_management").
    Custom(&'static str),
}

/// Static metadata for one form field. Defined per entity at compile
/// time; never persisted.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    /// Grid column span (1 or 2).
    pub span: u8,
    pub required: bool,
}

impl FieldDef {
    pub fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        // Free-text annotations and derived fields are never required.
        let required = !matches!(
            kind,
            FieldKind::Textarea | FieldKind::ReadOnly | FieldKind::Custom(_)
        );
        FieldDef { key, label, kind, placeholder: None, span: 1, required }
    }

    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Text)
    }

    pub fn number(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Number)
    }

    pub fn date(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Date)
    }

    pub fn time(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Time)
    }

    pub fn textarea(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::Textarea)
    }

    pub fn select(key: &'static str, label: &'static str, source: SelectSource) -> Self {
        Self::new(key, label, FieldKind::Select(source))
    }

    pub fn read_only(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FieldKind::ReadOnly)
    }

    pub fn placeholder(mut self, text: &'static str) -> Self {
        self.placeholder = Some(text);
        self
    }

    pub fn span2(mut self) -> Self {
        self.span = 2;
        self
    }

    /// Mark an otherwise-required field as optional (e.g. `remark`,
    /// `contamination`).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// The two-field cascading filter configuration of one screen.
#[derive(Debug, Clone, Copy)]
pub struct FilterFields {
    pub field1_key: &'static str,
    pub field1_label: &'static str,
    pub field2_key: &'static str,
    pub field2_label: &'static str,
}

/// Everything one CRUD screen is parameterized by: field descriptors,
/// table layout, API path, filter configuration, and the two named
/// mapping functions (record → form, form → payload).
#[derive(Clone)]
pub struct EntityDef {
    /// Registry name, e.g. "subculturing".
    pub name: &'static str,
    /// Human title, e.g. "Subculturing".
    pub title: &'static str,
    /// API path under the base URL, e.g. "/indoor/subculturing".
    pub path: &'static str,
    pub fields: Vec<FieldDef>,
    pub columns: &'static [&'static str],
    /// Database column keys backing `columns`, in the same order.
    pub data_keys: &'static [&'static str],
    pub filter: Option<FilterFields>,
    pub to_form: fn(&Record) -> FormValues,
    pub to_payload: fn(&FormValues) -> Value,
}

impl std::fmt::Debug for EntityDef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityDef")
            .field("name", &self.name)
            .field("path", &self.path)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Labels of required fields that are blank (missing or whitespace-only)
/// in `form`. An empty result means the form may be submitted.
pub fn missing_required(fields: &[FieldDef], form: &FormValues) -> Vec<String> {
    fields
        .iter()
        .filter(|f| f.required)
        .filter(|f| {
            form.get(f.key)
                .map(|v| v.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|f| f.label.to_string())
        .collect()
}

/// Coerce a count field to a number the way the original forms did
/// (`parseInt(...) || 0`): leading integer prefix, anything else is 0.
///
/// Non-numeric input collapsing to 0 is logged — it may be an operator
/// typo, and the ledger would otherwise hide it.
pub fn coerce_count(raw: &str) -> i64 {
    let s = raw.trim();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, s.strip_prefix('+').unwrap_or(s)),
    };
    let prefix: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    match prefix.parse::<i64>() {
        Ok(n) => sign * n,
        Err(_) => {
            if !s.is_empty() {
                tracing::warn!(value = raw, "non-numeric count coerced to 0");
            }
            0
        }
    }
}

/// Form value for `key`, or the empty string.
pub fn form_str(form: &FormValues, key: &str) -> String {
    form.get(key).cloned().unwrap_or_default()
}

/// Build form values from `(form_key, column_key)` pairs. Null and
/// missing columns become absent entries, numbers are stringified and
/// date columns are truncated to their date part, the same shape the
/// screens' record-to-form mappings produced.
pub fn form_from_record(record: &Record, keys: &[(&str, &str)]) -> FormValues {
    let mut form = FormValues::new();
    for (form_key, column) in keys {
        if let Some(value) = record.get_str(column) {
            let value = if crate::filter::is_date_key(column) {
                crate::filter::date_part(&value).to_string()
            } else {
                value
            };
            form.insert((*form_key).to_string(), value);
        }
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> Vec<FieldDef> {
        vec![
            FieldDef::date("transferDate", "Transfer Date"),
            FieldDef::text("batchName", "Batch Name").placeholder("B-2024-1145"),
            FieldDef::number("noOfShoots", "No. of Shoots"),
            FieldDef::textarea("remark", "Remark").span2(),
        ]
    }

    #[test]
    fn required_defaults_follow_kind() {
        let fields = sample_fields();
        assert!(fields[0].required);
        assert!(fields[2].required);
        assert!(!fields[3].required, "textarea is exempt");
        assert!(!FieldDef::read_only("cropName", "Crop Name").required);
        assert!(!FieldDef::textarea("contamination", "Contamination").required);
    }

    #[test]
    fn missing_required_reports_blank_labels() {
        let fields = sample_fields();
        let mut form = FormValues::new();
        form.insert("transferDate".into(), "2024-01-05".into());
        form.insert("batchName".into(), "   ".into());
        // noOfShoots absent, remark absent (optional).
        let missing = missing_required(&fields, &form);
        assert_eq!(missing, vec!["Batch Name".to_string(), "No. of Shoots".to_string()]);
    }

    #[test]
    fn missing_required_empty_when_complete() {
        let fields = sample_fields();
        let mut form = FormValues::new();
        form.insert("transferDate".into(), "2024-01-05".into());
        form.insert("batchName".into(), "B-001".into());
        form.insert("noOfShoots".into(), "1000".into());
        assert!(missing_required(&fields, &form).is_empty());
    }

    #[test]
    fn coerce_count_matches_parse_int_or_zero() {
        assert_eq!(coerce_count("1000"), 1000);
        assert_eq!(coerce_count("  42  "), 42);
        assert_eq!(coerce_count("12abc"), 12); // parseInt takes the prefix
        assert_eq!(coerce_count("abc"), 0);
        assert_eq!(coerce_count(""), 0);
        assert_eq!(coerce_count("-5"), -5);
        assert_eq!(coerce_count("+7"), 7);
    }

    #[test]
    fn form_from_record_truncates_date_columns() {
        let record = Record::from_pairs(&[
            ("transfer_date", serde_json::json!("2024-01-05T00:00:00Z")),
            ("batch_name", serde_json::json!("B-001")),
        ]);
        let form = form_from_record(
            &record,
            &[("transferDate", "transfer_date"), ("batchName", "batch_name")],
        );
        assert_eq!(form.get("transferDate").map(String::as_str), Some("2024-01-05"));
        assert_eq!(form.get("batchName").map(String::as_str), Some("B-001"));
    }
}
