//! Shifting — plants moved between outdoor locations.

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
        FieldDef::text("oldLocation", "Old Location"),
        FieldDef::text("newLocation", "New Location"),
        FieldDef::number("plants", "Plants"),
        FieldDef::text("reason", "Reason"),
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
            ("oldLocation", "old_location"),
            ("newLocation", "new_location"),
            ("plants", "plants"),
            ("reason", "reason"),
            ("notes", "notes"),
        ],
    )
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "cropName": form_str(form, "cropName"),
        "batchName": form_str(form, "batchName"),
        "oldLocation": form_str(form, "oldLocation"),
        "newLocation": form_str(form, "newLocation"),
        "plants": form_str(form, "plants"),
        "reason": form_str(form, "reason"),
        "notes": form_str(form, "notes"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "shifting",
        title: "Shifting",
        path: "/outdoor/shifting",
        fields: fields(),
        columns: &[
            "Date",
            "Crop Name",
            "Batch Name",
            "Old Location",
            "New Location",
            "Plants",
            "Reason",
            "Notes",
        ],
        data_keys: &[
            "date",
            "crop_name",
            "batch_code",
            "old_location",
            "new_location",
            "plants",
            "reason",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_mirrors_form_values() {
        let mut form = FormValues::new();
        form.insert("date".into(), "2024-05-10".into());
        form.insert("batchName".into(), "B-2024-1145".into());
        form.insert("oldLocation".into(), "T-3".into());
        form.insert("newLocation".into(), "T-9".into());
        let payload = to_payload(&form);
        assert_eq!(payload["oldLocation"], "T-3");
        assert_eq!(payload["newLocation"], "T-9");
        // Untouched fields still appear, as empty strings.
        assert_eq!(payload["reason"], "");
    }
}
