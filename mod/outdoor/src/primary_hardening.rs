//! Primary hardening register — batches moved from the lab into tunnels.
//!
//! Tray sizes are managed by a dedicated widget; the form carries them
//! as a JSON array in the `trayManagement` value and the payload sends
//! them under `trays`. Tray count and plant totals in the table come
//! back denormalized from the server.

use serde_json::{json, Value};

use plantlab_core::{
    form_from_record, form_str, EntityDef, FieldDef, FieldKind, FilterFields, FormValues,
    Record, SelectSource,
};

/// Tunnels T-1 through T-48.
pub const TUNNELS: [&str; 48] = [
    "T-1", "T-2", "T-3", "T-4", "T-5", "T-6", "T-7", "T-8", "T-9", "T-10", "T-11", "T-12",
    "T-13", "T-14", "T-15", "T-16", "T-17", "T-18", "T-19", "T-20", "T-21", "T-22", "T-23",
    "T-24", "T-25", "T-26", "T-27", "T-28", "T-29", "T-30", "T-31", "T-32", "T-33", "T-34",
    "T-35", "T-36", "T-37", "T-38", "T-39", "T-40", "T-41", "T-42", "T-43", "T-44", "T-45",
    "T-46", "T-47", "T-48",
];

pub fn fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::read_only("cropName", "Crop Name"),
        FieldDef::select("batchName", "Batch Name", SelectSource::Batches),
        FieldDef::select("tunnel", "Tunnel", SelectSource::Static(&TUNNELS)),
        FieldDef::number("workers", "Workers"),
        FieldDef::number("waitingPeriod", "Waiting Period (days)"),
        FieldDef::new("trayManagement", "Tray Management", FieldKind::Custom("tray_management"))
            .span2(),
        FieldDef::textarea("notes", "Notes").span2(),
    ]
}

pub fn to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("date", "date"),
            ("cropName", "crop_name"),
            ("batchName", "batch_code"),
            ("tunnel", "tunnel"),
            ("workers", "workers"),
            ("waitingPeriod", "waiting_period"),
            ("notes", "notes"),
        ],
    )
}

/// Tray entries out of the `trayManagement` form value. Anything that
/// does not parse as a JSON array means no trays.
fn trays(form: &FormValues) -> Value {
    form.get("trayManagement")
        .and_then(|raw| serde_json::from_str::<Value>(raw).ok())
        .filter(Value::is_array)
        .unwrap_or_else(|| json!([]))
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "cropName": form_str(form, "cropName"),
        "batchName": form_str(form, "batchName"),
        "tunnel": form_str(form, "tunnel"),
        "workers": form_str(form, "workers"),
        "waitingPeriod": form_str(form, "waitingPeriod"),
        "trays": trays(form),
        "notes": form_str(form, "notes"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "primary-hardening",
        title: "Primary Hardening Register",
        path: "/outdoor/primary-hardening",
        fields: fields(),
        columns: &[
            "Date",
            "Crop Name",
            "Batch Name",
            "Tunnel",
            "Tray Count",
            "Plants",
            "Workers",
            "Waiting Period",
            "Notes",
        ],
        data_keys: &[
            "date",
            "crop_name",
            "batch_code",
            "tunnel",
            "tray_count",
            "plants",
            "workers",
            "waiting_period",
            "notes",
        ],
        filter: Some(FilterFields {
            field1_key: "crop_name",
            field1_label: "Crop Name",
            field2_key: "batch_code",
            field2_label: "Batch Name",
        }),
        to_form,
        to_payload,
    }
}
