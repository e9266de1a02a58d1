//! Outdoor mortality — plant losses in the hardening yard, with the
//! action taken in response.

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
        FieldDef::text("mortalityType", "Mortality Type"),
        FieldDef::number("affectedPlants", "Affected Plants"),
        FieldDef::textarea("actionTaken", "Action Taken"),
        FieldDef::textarea("notes", "Notes"),
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
            ("mortalityType", "mortality_type"),
            ("affectedPlants", "affected_plants"),
            ("actionTaken", "action_taken"),
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
        "mortalityType": form_str(form, "mortalityType"),
        "affectedPlants": form_str(form, "affectedPlants"),
        "actionTaken": form_str(form, "actionTaken"),
        "notes": form_str(form, "notes"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "outdoor-mortality",
        title: "Outdoor Mortality",
        path: "/outdoor/outdoor-mortality",
        fields: fields(),
        columns: &[
            "Date",
            "Crop Name",
            "Batch Name",
            "Location",
            "Mortality Type",
            "Affected Plants",
            "Action Taken",
            "Notes",
        ],
        data_keys: &[
            "date",
            "crop_name",
            "batch_code",
            "location",
            "mortality_type",
            "affected_plants",
            "action_taken",
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
