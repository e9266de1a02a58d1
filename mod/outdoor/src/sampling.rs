//! Outdoor sampling — yard samples sent out for certification. Same
//! certificate workflow as indoor sampling, but keyed to a batch from
//! the feed instead of free-text batch and location fields.

use serde_json::{json, Value};

use plantlab_core::{
    form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues, Record,
    SelectSource,
};

pub fn fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("sampleDate", "Sample Date"),
        FieldDef::read_only("cropName", "Crop Name"),
        FieldDef::select("batchName", "Batch Name", SelectSource::Batches),
        FieldDef::text("stage", "Stage"),
        FieldDef::date("sentDate", "Sent Date"),
        FieldDef::date("receivedDate", "Received Date"),
        FieldDef::text("status", "Status"),
        FieldDef::text("govtCertificate", "Govt Certificate"),
        FieldDef::text("certificateNo", "Certificate No"),
        FieldDef::textarea("reason", "Reason").span2(),
    ]
}

pub fn to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("sampleDate", "sample_date"),
            ("cropName", "crop_name"),
            ("batchName", "batch_code"),
            ("stage", "stage"),
            ("sentDate", "sent_date"),
            ("receivedDate", "received_date"),
            ("status", "status"),
            ("govtCertificate", "govt_certificate"),
            ("certificateNo", "certificate_no"),
            ("reason", "reason"),
        ],
    )
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "sampleDate": form_str(form, "sampleDate"),
        "cropName": form_str(form, "cropName"),
        "batchName": form_str(form, "batchName"),
        "stage": form_str(form, "stage"),
        "sentDate": form_str(form, "sentDate"),
        "receivedDate": form_str(form, "receivedDate"),
        "status": form_str(form, "status"),
        "govtCertificate": form_str(form, "govtCertificate"),
        "certificateNo": form_str(form, "certificateNo"),
        "reason": form_str(form, "reason"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "outdoor-sampling",
        title: "Outdoor Sampling",
        path: "/outdoor/outdoor-sampling",
        fields: fields(),
        columns: &[
            "Sample Date",
            "Crop Name",
            "Batch Name",
            "Stage",
            "Sent Date",
            "Received Date",
            "Status",
            "Govt Certificate",
            "Certificate No",
            "Reason",
        ],
        data_keys: &[
            "sample_date",
            "crop_name",
            "batch_code",
            "stage",
            "sent_date",
            "received_date",
            "status",
            "govt_certificate",
            "certificate_no",
            "reason",
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
    fn differs_from_indoor_sampling_in_batch_source() {
        let def = def();
        assert_eq!(def.path, "/outdoor/outdoor-sampling");
        let batch = def.fields.iter().find(|f| f.key == "batchName").unwrap();
        assert_eq!(
            batch.kind,
            plantlab_core::FieldKind::Select(SelectSource::Batches)
        );
    }
}
