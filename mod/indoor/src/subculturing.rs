//! Subculturing — the stage-transfer ledger. Creating a record here is
//! what moves a batch to its next stage.

use serde_json::{json, Value};

use plantlab_core::{
    coerce_count, form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues,
    Record, SelectSource,
};

pub fn fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("transferDate", "Transfer Date"),
        FieldDef::text("stageNumber", "Stage Number").placeholder("Stage 1"),
        FieldDef::text("batchName", "Batch Name").placeholder("B-2024-1145"),
        FieldDef::text("mediaCode", "Media Code").placeholder("MS-001"),
        FieldDef::text("cropName", "Crop Name").placeholder("Rose"),
        FieldDef::number("noOfBottles", "No. of Bottles").placeholder("50"),
        FieldDef::number("noOfShoots", "No. of Shoots").placeholder("1000"),
        FieldDef::select("operatorName", "Operator Name", SelectSource::Operators),
        FieldDef::text("mortality", "Mortality").placeholder("Low/Medium/High"),
        FieldDef::textarea("remark", "Remark").span2(),
    ]
}

pub fn to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("transferDate", "transfer_date"),
            ("stageNumber", "stage_number"),
            ("batchName", "batch_name"),
            ("mediaCode", "media_code"),
            ("cropName", "crop_name"),
            ("noOfBottles", "no_of_bottles"),
            ("noOfShoots", "no_of_shoots"),
            ("operatorName", "operator_name"),
            ("mortality", "mortality"),
            ("remark", "remark"),
        ],
    )
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "transferDate": form_str(form, "transferDate"),
        "stageNumber": form_str(form, "stageNumber"),
        "batchName": form_str(form, "batchName"),
        "mediaCode": form_str(form, "mediaCode"),
        "cropName": form_str(form, "cropName"),
        "noOfBottles": coerce_count(&form_str(form, "noOfBottles")),
        "noOfShoots": coerce_count(&form_str(form, "noOfShoots")),
        "operatorName": form_str(form, "operatorName"),
        "mortality": form_str(form, "mortality"),
        "remark": form_str(form, "remark"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "subculturing",
        title: "Subculturing",
        path: "/indoor/subculturing",
        fields: fields(),
        columns: &[
            "Transfer Date",
            "Stage Number",
            "Batch Name",
            "Media Code",
            "Crop Name",
            "No. of Bottles",
            "No. of Shoots",
            "Operator Name",
            "Mortality",
            "Remark",
        ],
        data_keys: &[
            "transfer_date",
            "stage_number",
            "batch_name",
            "media_code",
            "crop_name",
            "no_of_bottles",
            "no_of_shoots",
            "operator_name",
            "mortality",
            "remark",
        ],
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_round_trips_record_columns() {
        let record = Record::from_pairs(&[
            ("id", json!(12)),
            ("transfer_date", json!("2024-01-05T00:00:00.000Z")),
            ("stage_number", json!("Stage-2")),
            ("batch_name", json!("B-2024-1145")),
            ("no_of_bottles", json!(50)),
            ("no_of_shoots", json!(1000)),
            ("remark", json!(null)),
        ]);
        let form = to_form(&record);
        assert_eq!(form.get("stageNumber").map(String::as_str), Some("Stage-2"));
        // Numbers come back as editable strings.
        assert_eq!(form.get("noOfShoots").map(String::as_str), Some("1000"));
        assert!(form.get("remark").is_none());
    }

    #[test]
    fn payload_coerces_counts() {
        // Non-numeric shoot count goes out as 0, not a rejection.
        let mut form = FormValues::new();
        form.insert("transferDate".into(), "2024-01-05".into());
        form.insert("batchName".into(), "B-001".into());
        form.insert("noOfShoots".into(), "abc".into());
        form.insert("noOfBottles".into(), "50".into());
        let payload = to_payload(&form);
        assert_eq!(payload["noOfShoots"], json!(0));
        assert_eq!(payload["noOfBottles"], json!(50));
        assert_eq!(payload["batchName"], "B-001");
    }

    #[test]
    fn remark_is_optional_everything_else_required() {
        let required: Vec<&str> = fields()
            .iter()
            .filter(|f| f.required)
            .map(|f| f.key)
            .collect();
        assert!(!required.contains(&"remark"));
        assert_eq!(required.len(), fields().len() - 1);
    }
}
