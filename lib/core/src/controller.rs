//! The generic CRUD table controller.
//!
//! One controller drives one entity screen: it owns the record snapshot,
//! the modal/form state machine, the delete confirmation, and the
//! two-field cascading filter. Everything entity-specific comes in
//! through the [`EntityDef`] and the [`RecordStore`] implementation.

use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::field::{missing_required, EntityDef, FormValues};
use crate::filter::{cascaded_options, field_options, normalized, SelectOption};
use crate::record::Record;

/// Repository seam between the controller and whatever holds the rows.
///
/// The production implementation is an HTTP entity client; tests use an
/// in-memory store. The contract is deliberately coarse: `list` is a
/// full-table fetch, newest first, and every mutation is followed by a
/// fresh `list` — there is no incremental sync.
pub trait RecordStore {
    fn list(&self) -> Result<Vec<Record>, Error>;
    fn create(&self, payload: &Value) -> Result<(), Error>;
    fn update(&self, id: i64, payload: &Value) -> Result<(), Error>;
    fn delete(&self, id: i64) -> Result<(), Error>;
}

/// Add/edit modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Create,
    /// Editing; `id` is the row under edit. A missing id falls back to
    /// the create path on save, as the original screens did.
    Edit { id: Option<i64> },
}

/// What a successful save did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created,
    Updated(i64),
}

pub struct TableController<S: RecordStore> {
    def: EntityDef,
    store: S,
    records: Vec<Record>,
    modal: Modal,
    form: FormValues,
    pending_delete: Option<i64>,
    // Filter state. Empty string means unselected.
    field1: String,
    field2: String,
    filtered: bool,
}

impl<S: RecordStore> TableController<S> {
    pub fn new(def: EntityDef, store: S) -> Self {
        TableController {
            def,
            store,
            records: Vec::new(),
            modal: Modal::Closed,
            form: FormValues::new(),
            pending_delete: None,
            field1: String::new(),
            field2: String::new(),
            filtered: false,
        }
    }

    pub fn def(&self) -> &EntityDef {
        &self.def
    }

    /// Full record snapshot, as loaded (newest first).
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Refresh the snapshot from the store. On failure the prior
    /// snapshot stays in place and the error is returned to the caller.
    pub fn load(&mut self) -> Result<(), Error> {
        match self.store.list() {
            Ok(rows) => {
                self.records = rows;
                Ok(())
            }
            Err(e) => {
                warn!(entity = self.def.name, error = %e, "record load failed, keeping prior snapshot");
                Err(e)
            }
        }
    }

    // ── Modal / form ────────────────────────────────────────────────

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn open_for_create(&mut self) {
        self.form.clear();
        self.modal = Modal::Create;
    }

    pub fn open_for_edit(&mut self, record: &Record) {
        self.form = (self.def.to_form)(record);
        self.modal = Modal::Edit { id: record.id() };
    }

    pub fn close_modal(&mut self) {
        self.modal = Modal::Closed;
        self.form.clear();
    }

    pub fn set_field(&mut self, key: &str, value: impl Into<String>) {
        self.form.insert(key.to_string(), value.into());
    }

    /// Named transition for the batch select: choosing a batch also
    /// fills the read-only crop name (the original did this with an
    /// inline onChange closure).
    pub fn select_batch(&mut self, batch_code: &str, crop_name: &str) {
        self.form.insert("batchName".to_string(), batch_code.to_string());
        self.form.insert("cropName".to_string(), crop_name.to_string());
    }

    /// Validate and persist the open form.
    ///
    /// A blank required field aborts with `Error::Validation` before any
    /// store call. A rejected store call leaves the modal open and the
    /// form intact. On success the snapshot is reloaded and the modal
    /// closed; a reload failure after a successful save is logged but
    /// does not fail the save.
    pub fn save(&mut self) -> Result<Saved, Error> {
        let missing = missing_required(&self.def.fields, &self.form);
        if !missing.is_empty() {
            return Err(Error::Validation(missing));
        }

        let payload = (self.def.to_payload)(&self.form);
        let saved = match self.modal {
            Modal::Edit { id: Some(id) } => {
                self.store.update(id, &payload)?;
                Saved::Updated(id)
            }
            _ => {
                self.store.create(&payload)?;
                Saved::Created
            }
        };

        if let Err(e) = self.load() {
            warn!(entity = self.def.name, error = %e, "reload after save failed");
        }
        self.close_modal();
        Ok(saved)
    }

    // ── Delete ──────────────────────────────────────────────────────

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    /// Open the delete confirmation. Closes the edit modal, as the
    /// screens do when the delete button inside it is pressed.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
        self.modal = Modal::Closed;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending row and reload. On failure the confirmation
    /// stays open. There is no undo.
    pub fn confirm_delete(&mut self) -> Result<(), Error> {
        let Some(id) = self.pending_delete else {
            return Ok(());
        };
        self.store.delete(id)?;
        if let Err(e) = self.load() {
            warn!(entity = self.def.name, error = %e, "reload after delete failed");
        }
        self.pending_delete = None;
        Ok(())
    }

    // ── Filter ──────────────────────────────────────────────────────

    pub fn filter1_options(&self) -> Vec<SelectOption> {
        match &self.def.filter {
            Some(f) => field_options(&self.records, f.field1_key),
            None => Vec::new(),
        }
    }

    pub fn filter2_options(&self) -> Vec<SelectOption> {
        match &self.def.filter {
            Some(f) => {
                let parent = (!self.field1.is_empty()).then_some(self.field1.as_str());
                cascaded_options(&self.records, f.field1_key, f.field2_key, parent)
            }
            None => Vec::new(),
        }
    }

    /// Select the first filter field; the second resets (cascading).
    pub fn set_filter1(&mut self, value: impl Into<String>) {
        self.field1 = value.into();
        self.field2.clear();
    }

    pub fn set_filter2(&mut self, value: impl Into<String>) {
        self.field2 = value.into();
    }

    /// Activate filtered mode — only if at least one field is selected.
    pub fn apply_filter(&mut self) {
        if !self.field1.is_empty() || !self.field2.is_empty() {
            self.filtered = true;
        }
    }

    /// Back to the default 5-most-recent view.
    pub fn reset_filter(&mut self) {
        self.field1.clear();
        self.field2.clear();
        self.filtered = false;
    }

    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Rows currently on screen: all matches when filtered, otherwise
    /// the first 5 of as-loaded order. No client-side re-sort.
    pub fn visible(&self) -> Vec<&Record> {
        if self.filtered {
            if let Some(f) = &self.def.filter {
                return self
                    .records
                    .iter()
                    .filter(|r| {
                        self.field1.is_empty()
                            || normalized(r, f.field1_key).as_deref() == Some(self.field1.as_str())
                    })
                    .filter(|r| {
                        self.field2.is_empty()
                            || r.get_str(f.field2_key).as_deref() == Some(self.field2.as_str())
                    })
                    .collect();
            }
        }
        self.records.iter().take(5).collect()
    }

    // ── Search-to-edit ──────────────────────────────────────────────

    /// Second-field choices for the search dialog, restricted to rows
    /// on the given date. Empty until a date is picked.
    pub fn search_options(&self, date: &str) -> Vec<SelectOption> {
        match &self.def.filter {
            Some(f) if !date.is_empty() => {
                cascaded_options(&self.records, f.field1_key, f.field2_key, Some(date))
            }
            _ => Vec::new(),
        }
    }

    /// Locate a record by exact date + second-field match and open it
    /// for editing. Duplicates resolve to the first match; zero matches
    /// is an error.
    pub fn search_to_edit(&mut self, date: &str, value: &str) -> Result<(), Error> {
        let Some(f) = self.def.filter else {
            return Err(Error::Config(format!(
                "{} has no filter configuration",
                self.def.name
            )));
        };
        if date.is_empty() || value.is_empty() {
            let mut missing = Vec::new();
            if date.is_empty() {
                missing.push(f.field1_label.to_string());
            }
            if value.is_empty() {
                missing.push(f.field2_label.to_string());
            }
            return Err(Error::Validation(missing));
        }
        let found = self
            .records
            .iter()
            .find(|r| {
                normalized(r, f.field1_key).as_deref() == Some(date)
                    && r.get_str(f.field2_key).as_deref() == Some(value)
            })
            .cloned();
        match found {
            Some(record) => {
                self.open_for_edit(&record);
                Ok(())
            }
            None => Err(Error::NotFound("no record found".to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDef, FilterFields};
    use serde_json::json;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// In-memory store: newest first, server-assigned ids, optional
    /// injected failure for the next mutation.
    #[derive(Default)]
    struct MemStore {
        rows: Rc<RefCell<Vec<Record>>>,
        next_id: Cell<i64>,
        calls: Cell<usize>,
        fail_next: Cell<bool>,
    }

    impl MemStore {
        fn seeded(rows: Vec<Record>) -> Self {
            let max_id = rows.iter().filter_map(|r| r.id()).max().unwrap_or(0);
            let store = MemStore::default();
            *store.rows.borrow_mut() = rows;
            store.next_id.set(max_id);
            store
        }

        fn take_failure(&self) -> Result<(), Error> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_next.take() {
                return Err(Error::Api { status: 500, message: "database is down".into() });
            }
            Ok(())
        }
    }

    impl RecordStore for MemStore {
        fn list(&self) -> Result<Vec<Record>, Error> {
            Ok(self.rows.borrow().clone())
        }

        fn create(&self, payload: &Value) -> Result<(), Error> {
            self.take_failure()?;
            let id = self.next_id.get() + 1;
            self.next_id.set(id);
            let mut record = Record::new();
            record.insert("id", json!(id));
            if let Some(obj) = payload.as_object() {
                for (k, v) in obj {
                    record.insert(k.clone(), v.clone());
                }
            }
            self.rows.borrow_mut().insert(0, record);
            Ok(())
        }

        fn update(&self, id: i64, payload: &Value) -> Result<(), Error> {
            self.take_failure()?;
            let mut rows = self.rows.borrow_mut();
            let row = rows.iter_mut().find(|r| r.id() == Some(id)).unwrap();
            if let Some(obj) = payload.as_object() {
                for (k, v) in obj {
                    row.insert(k.clone(), v.clone());
                }
            }
            Ok(())
        }

        fn delete(&self, id: i64) -> Result<(), Error> {
            self.take_failure()?;
            self.rows.borrow_mut().retain(|r| r.id() != Some(id));
            Ok(())
        }
    }

    fn to_form(r: &Record) -> FormValues {
        let mut form = FormValues::new();
        for key in ["transferDate", "batchName", "noOfShoots"] {
            let col = match key {
                "transferDate" => "transfer_date",
                "batchName" => "batch_name",
                _ => "no_of_shoots",
            };
            if let Some(v) = r.get_str(col) {
                form.insert(key.to_string(), v);
            }
        }
        form
    }

    fn to_payload(f: &FormValues) -> Value {
        json!({
            "transfer_date": f.get("transferDate").cloned().unwrap_or_default(),
            "batch_name": f.get("batchName").cloned().unwrap_or_default(),
            "no_of_shoots": crate::field::coerce_count(
                f.get("noOfShoots").map(String::as_str).unwrap_or("")
            ),
        })
    }

    fn test_def() -> EntityDef {
        EntityDef {
            name: "subculturing",
            title: "Subculturing",
            path: "/indoor/subculturing",
            fields: vec![
                FieldDef::date("transferDate", "Transfer Date"),
                FieldDef::text("batchName", "Batch Name"),
                FieldDef::number("noOfShoots", "No. of Shoots"),
            ],
            columns: &["Transfer Date", "Batch Name", "No. of Shoots"],
            data_keys: &["transfer_date", "batch_name", "no_of_shoots"],
            filter: Some(FilterFields {
                field1_key: "transfer_date",
                field1_label: "Date",
                field2_key: "batch_name",
                field2_label: "Batch Name",
            }),
            to_form,
            to_payload,
        }
    }

    fn seed(n: usize) -> Vec<Record> {
        // Newest first, like the API returns.
        (0..n)
            .map(|i| {
                let id = (n - i) as i64;
                Record::from_pairs(&[
                    ("id", json!(id)),
                    ("transfer_date", json!(format!("2024-01-{:02}T00:00:00.000Z", (id % 3) + 1))),
                    ("batch_name", json!(if id % 2 == 0 { "B-001" } else { "B-002" })),
                    ("no_of_shoots", json!(100 * id)),
                ])
            })
            .collect()
    }

    fn loaded_controller(rows: Vec<Record>) -> TableController<MemStore> {
        let mut c = TableController::new(test_def(), MemStore::seeded(rows));
        c.load().unwrap();
        c
    }

    #[test]
    fn default_view_is_first_five_as_loaded() {
        let c = loaded_controller(seed(8));
        let visible = c.visible();
        assert_eq!(visible.len(), 5);
        let ids: Vec<i64> = visible.iter().filter_map(|r| r.id()).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
    }

    #[test]
    fn apply_filter_needs_a_selection() {
        let mut c = loaded_controller(seed(8));
        c.apply_filter();
        assert!(!c.is_filtered());
        c.set_filter2("B-001");
        c.apply_filter();
        assert!(c.is_filtered());
    }

    #[test]
    fn filter_is_conjunctive_and_date_normalized() {
        let mut c = loaded_controller(seed(8));
        c.set_filter1("2024-01-01");
        c.set_filter2("B-002");
        c.apply_filter();
        for r in c.visible() {
            assert_eq!(
                r.get_str("transfer_date").as_deref(),
                Some("2024-01-01T00:00:00.000Z")
            );
            assert_eq!(r.get_str("batch_name").as_deref(), Some("B-002"));
        }
        assert!(!c.visible().is_empty());
    }

    #[test]
    fn reset_restores_default_view_exactly() {
        let mut c = loaded_controller(seed(8));
        let before: Vec<Record> = c.visible().into_iter().cloned().collect();
        c.set_filter1("2024-01-02");
        c.apply_filter();
        c.reset_filter();
        let after: Vec<Record> = c.visible().into_iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn setting_field1_resets_field2() {
        let mut c = loaded_controller(seed(8));
        c.set_filter2("B-001");
        c.set_filter1("2024-01-02");
        assert!(c.field2.is_empty());
    }

    #[test]
    fn save_with_blank_required_field_hits_no_network() {
        let mut c = loaded_controller(seed(2));
        c.open_for_create();
        c.set_field("transferDate", "2024-02-01");
        // batchName and noOfShoots blank.
        let err = c.save().unwrap_err();
        match err {
            Error::Validation(labels) => {
                assert_eq!(labels, vec!["Batch Name".to_string(), "No. of Shoots".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(c.store.calls.get(), 0);
        assert_eq!(c.modal(), Modal::Create);
    }

    #[test]
    fn save_creates_and_closes_modal() {
        let mut c = loaded_controller(seed(2));
        c.open_for_create();
        c.set_field("transferDate", "2024-02-01");
        c.set_field("batchName", "B-100");
        c.set_field("noOfShoots", "500");
        assert_eq!(c.save().unwrap(), Saved::Created);
        assert_eq!(c.modal(), Modal::Closed);
        assert!(c.form().is_empty());
        // Reload happened: new row is visible at the top.
        assert_eq!(c.visible()[0].get_str("batch_name").as_deref(), Some("B-100"));
    }

    #[test]
    fn save_coerces_count_like_the_forms_did() {
        // "abc" becomes 0 on the wire, not a rejection.
        let mut c = loaded_controller(seed(1));
        c.open_for_create();
        c.set_field("transferDate", "2024-02-01");
        c.set_field("batchName", "B-100");
        c.set_field("noOfShoots", "abc");
        c.save().unwrap();
        assert_eq!(c.records()[0].get("no_of_shoots"), Some(&json!(0)));
    }

    #[test]
    fn save_in_edit_mode_updates_by_id() {
        let mut c = loaded_controller(seed(3));
        let target = c.records()[1].clone();
        c.open_for_edit(&target);
        assert_eq!(c.modal(), Modal::Edit { id: target.id() });
        c.set_field("noOfShoots", "9999");
        assert_eq!(c.save().unwrap(), Saved::Updated(target.id().unwrap()));
        let updated = c
            .records()
            .iter()
            .find(|r| r.id() == target.id())
            .unwrap();
        assert_eq!(updated.get("no_of_shoots"), Some(&json!(9999)));
    }

    #[test]
    fn failed_save_leaves_modal_open_with_form_intact() {
        let mut c = loaded_controller(seed(2));
        c.open_for_create();
        c.set_field("transferDate", "2024-02-01");
        c.set_field("batchName", "B-100");
        c.set_field("noOfShoots", "500");
        c.store.fail_next.set(true);
        let err = c.save().unwrap_err();
        assert_eq!(err.to_string(), "database is down");
        assert_eq!(c.modal(), Modal::Create);
        assert_eq!(c.form().get("batchName").map(String::as_str), Some("B-100"));
    }

    #[test]
    fn delete_then_reload_drops_the_row() {
        // id 5 never visible after its delete.
        let mut c = loaded_controller(seed(8));
        c.request_delete(5);
        c.confirm_delete().unwrap();
        assert!(c.records().iter().all(|r| r.id() != Some(5)));
        assert!(c.visible().iter().all(|r| r.id() != Some(5)));
        assert_eq!(c.pending_delete(), None);
    }

    #[test]
    fn failed_delete_keeps_confirmation_open() {
        let mut c = loaded_controller(seed(3));
        c.request_delete(2);
        c.store.fail_next.set(true);
        assert!(c.confirm_delete().is_err());
        assert_eq!(c.pending_delete(), Some(2));
        assert!(c.records().iter().any(|r| r.id() == Some(2)));
    }

    #[test]
    fn search_to_edit_opens_first_match() {
        let mut c = loaded_controller(seed(8));
        let expected = c
            .records()
            .iter()
            .find(|r| {
                r.get_str("transfer_date").as_deref() == Some("2024-01-02T00:00:00.000Z")
                    && r.get_str("batch_name").as_deref() == Some("B-002")
            })
            .unwrap()
            .clone();
        c.search_to_edit("2024-01-02", "B-002").unwrap();
        assert_eq!(c.modal(), Modal::Edit { id: expected.id() });
        assert_eq!(
            c.form().get("batchName").map(String::as_str),
            Some("B-002")
        );
    }

    #[test]
    fn search_to_edit_with_no_match_errors() {
        let mut c = loaded_controller(seed(8));
        let err = c.search_to_edit("2030-01-01", "B-999").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(c.modal(), Modal::Closed);
    }

    #[test]
    fn search_to_edit_requires_both_inputs() {
        let mut c = loaded_controller(seed(8));
        let err = c.search_to_edit("", "B-002").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn search_options_follow_the_date() {
        let c = loaded_controller(seed(8));
        assert!(c.search_options("").is_empty());
        let opts = c.search_options("2024-01-02");
        assert!(!opts.is_empty());
        for opt in opts {
            assert!(["B-001", "B-002"].contains(&opt.value.as_str()));
        }
    }

    #[test]
    fn load_failure_keeps_prior_snapshot() {
        struct FailingStore;
        impl RecordStore for FailingStore {
            fn list(&self) -> Result<Vec<Record>, Error> {
                Err(Error::Transport("connection refused".into()))
            }
            fn create(&self, _: &Value) -> Result<(), Error> {
                unreachable!()
            }
            fn update(&self, _: i64, _: &Value) -> Result<(), Error> {
                unreachable!()
            }
            fn delete(&self, _: i64) -> Result<(), Error> {
                unreachable!()
            }
        }
        let mut c = TableController::new(test_def(), FailingStore);
        assert!(c.load().is_err());
        assert!(c.records().is_empty());
    }
}
