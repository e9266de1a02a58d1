//! Latest-date-wins stage derivation.

use std::collections::HashMap;

use chrono::NaiveDate;

use plantlab_core::{date_part, Record};

use crate::stage::Stage;

/// One record collection participating in the derivation, with the
/// column names that vary per table (`transfer_date` vs
/// `subculture_date` vs `sample_date`; sampling rows carry no stage).
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    pub records: &'a [Record],
    pub date_key: &'a str,
    pub stage_key: Option<&'a str>,
}

impl<'a> Collection<'a> {
    pub fn subculturing(records: &'a [Record]) -> Self {
        Collection { records, date_key: "transfer_date", stage_key: Some("stage_number") }
    }

    pub fn incubation(records: &'a [Record]) -> Self {
        Collection { records, date_key: "subculture_date", stage_key: Some("stage") }
    }

    pub fn sampling(records: &'a [Record]) -> Self {
        Collection { records, date_key: "sample_date", stage_key: None }
    }
}

/// The derived state of one batch: latest activity date and, when any
/// stage-bearing record exists, its stage.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSnapshot {
    pub batch_code: String,
    pub crop_name: Option<String>,
    pub stage: Option<Stage>,
    /// Date of the record that decided `stage` (or the latest activity
    /// if no record carries a stage).
    pub latest: NaiveDate,
}

impl BatchSnapshot {
    /// Option label the screens show: "CODE (crop)".
    pub fn label(&self) -> String {
        match &self.crop_name {
            Some(crop) => format!("{} ({})", self.batch_code, crop),
            None => self.batch_code.clone(),
        }
    }
}

fn record_date(record: &Record, date_key: &str) -> Option<NaiveDate> {
    let raw = record.get_str(date_key)?;
    NaiveDate::parse_from_str(date_part(&raw), "%Y-%m-%d").ok()
}

/// Unite `batch_code`s across the given collections and reduce each
/// batch to its latest-dated entry. For the stage, only stage-bearing
/// records compete; the latest date wins, first-seen wins a tie.
///
/// Recomputed on every call. The result can be momentarily stale or
/// inconsistent when the collections disagree — the feed's revision
/// check exists for exactly that window.
pub fn derive_batches(collections: &[Collection<'_>]) -> Vec<BatchSnapshot> {
    // Insertion-ordered accumulation: first appearance fixes position.
    let mut order: Vec<String> = Vec::new();
    let mut by_code: HashMap<String, BatchSnapshot> = HashMap::new();
    // Latest stage-bearing date per batch, tracked separately from the
    // overall latest activity.
    let mut stage_date: HashMap<String, NaiveDate> = HashMap::new();

    for coll in collections {
        for record in coll.records {
            let Some(code) = record.get_str("batch_code") else {
                continue;
            };
            let Some(date) = record_date(record, coll.date_key) else {
                continue;
            };
            let crop = record.get_str("crop_name");
            let stage = coll
                .stage_key
                .and_then(|k| record.get_str(k))
                .and_then(|s| s.parse::<Stage>().ok());

            let entry = by_code.entry(code.clone()).or_insert_with(|| {
                order.push(code.clone());
                BatchSnapshot {
                    batch_code: code.clone(),
                    crop_name: None,
                    stage: None,
                    latest: date,
                }
            });
            if date > entry.latest {
                entry.latest = date;
            }
            if entry.crop_name.is_none() {
                entry.crop_name = crop;
            }
            if let Some(stage) = stage {
                let newer = stage_date.get(&code).map(|d| date > *d).unwrap_or(true);
                if newer {
                    stage_date.insert(code.clone(), date);
                    entry.stage = Some(stage);
                }
            }
        }
    }

    order
        .into_iter()
        .filter_map(|code| by_code.remove(&code))
        .collect()
}
