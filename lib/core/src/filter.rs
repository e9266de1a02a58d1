//! Dropdown option derivation.
//!
//! Pure functions over a loaded record set. Results are recomputed on
//! every call — options must always reflect the current snapshot, never
//! a cache from before a mutation.

use std::collections::HashSet;

use crate::record::Record;

/// One `{value, label}` dropdown entry. Value and label are identical
/// for derived options; labels diverge only for curated sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        SelectOption { label: value.clone(), value }
    }
}

/// Date columns arrive as `YYYY-MM-DDTHH:MM:SS...`; screens compare and
/// display only the date part.
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

/// Whether a column key is date-typed for truncation purposes.
pub(crate) fn is_date_key(key: &str) -> bool {
    key.contains("date")
}

/// Column value normalized for filtering: stringified, date-truncated
/// when the key is date-typed, `None` for null/missing/empty.
pub(crate) fn normalized(record: &Record, key: &str) -> Option<String> {
    let raw = record.get_str(key)?;
    let value = if is_date_key(key) { date_part(&raw).to_string() } else { raw };
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Distinct non-null values of column `key` across `records`, in first-
/// occurrence order.
pub fn field_options(records: &[Record], key: &str) -> Vec<SelectOption> {
    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for record in records {
        if let Some(value) = normalized(record, key) {
            if seen.insert(value.clone()) {
                options.push(SelectOption::plain(value));
            }
        }
    }
    options
}

/// Options for the second filter field, cascaded by the first: when
/// `parent` is selected, only rows whose `parent_key` column matches it
/// contribute; otherwise the full set does.
pub fn cascaded_options(
    records: &[Record],
    parent_key: &str,
    key: &str,
    parent: Option<&str>,
) -> Vec<SelectOption> {
    match parent {
        None | Some("") => field_options(records, key),
        Some(selected) => {
            let restricted: Vec<Record> = records
                .iter()
                .filter(|r| normalized(r, parent_key).as_deref() == Some(selected))
                .cloned()
                .collect();
            field_options(&restricted, key)
        }
    }
}
