//! Fertilization and treatment activity log.

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
        FieldDef::text("activityType", "Activity Type"),
        FieldDef::text("materialsUsed", "Materials Used"),
        FieldDef::text("quantity", "Quantity"),
        FieldDef::text("operatorName", "Operator Name"),
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
            ("activityType", "activity_type"),
            ("materialsUsed", "materials_used"),
            ("quantity", "quantity"),
            ("operatorName", "operator_name"),
            ("notes", "notes"),
        ],
    )
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "cropName": form_str(form, "cropName"),
        "batchName": form_str(form, "batchName"),
        "activityType": form_str(form, "activityType"),
        "materialsUsed": form_str(form, "materialsUsed"),
        "quantity": form_str(form, "quantity"),
        "operatorName": form_str(form, "operatorName"),
        "notes": form_str(form, "notes"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "fertilization",
        title: "Fertilization",
        path: "/outdoor/fertilization",
        fields: fields(),
        columns: &[
            "Date",
            "Crop Name",
            "Batch Name",
            "Activity Type",
            "Materials Used",
            "Quantity",
            "Operator Name",
            "Notes",
        ],
        data_keys: &[
            "date",
            "crop_name",
            "batch_code",
            "activity_type",
            "materials_used",
            "quantity",
            "operator_name",
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
    fn quantity_is_free_text() {
        // "2kg per bed" style entries; deliberately not a number field.
        let quantity = fields().into_iter().find(|f| f.key == "quantity").unwrap();
        assert_eq!(quantity.kind, plantlab_core::FieldKind::Text);
    }
}
