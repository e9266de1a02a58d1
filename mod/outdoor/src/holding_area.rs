//! Holding area — finished batches awaiting dispatch.

use serde_json::{json, Value};

use plantlab_core::{
    form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues, Record,
    SelectSource,
};

pub fn fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::read_only("cropName", "Crop Name"),
        FieldDef::select("batchName", "Batch Name", SelectSource::Batches),
        FieldDef::text("location", "Location"),
        FieldDef::number("plants", "Plants"),
        FieldDef::text("status", "Status"),
        FieldDef::date("expectedDispatch", "Expected Dispatch"),
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
            ("location", "location"),
            ("plants", "plants"),
            ("status", "status"),
            ("expectedDispatch", "expected_dispatch"),
            ("notes", "notes"),
        ],
    )
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "cropName": form_str(form, "cropName"),
        "batchName": form_str(form, "batchName"),
        "location": form_str(form, "location"),
        "plants": form_str(form, "plants"),
        "status": form_str(form, "status"),
        "expectedDispatch": form_str(form, "expectedDispatch"),
        "notes": form_str(form, "notes"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "holding-area",
        title: "Holding Area",
        path: "/outdoor/holding-area",
        fields: fields(),
        columns: &[
            "Date",
            "Crop Name",
            "Batch Name",
            "Location",
            "Plants",
            "Status",
            "Expected Dispatch",
            "Notes",
        ],
        data_keys: &[
            "date",
            "crop_name",
            "batch_code",
            "location",
            "plants",
            "status",
            "expected_dispatch",
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
