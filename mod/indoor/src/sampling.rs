//! Indoor sampling — lab samples sent out for certification.

use serde_json::{json, Value};

use plantlab_core::{
    form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues, Record,
};

pub fn fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("sampleDate", "Sample Date"),
        FieldDef::text("cropName", "Crop Name").placeholder("Rose"),
        FieldDef::text("batchName", "Batch Name").placeholder("B-2024-1145"),
        FieldDef::text("stage", "Stage").placeholder("Subculturing"),
        FieldDef::text("tunnelNo", "Tunnel No").placeholder("T1"),
        FieldDef::text("trayBedNo", "Tray/Bed No").placeholder("Tray 12"),
        FieldDef::date("sentDate", "Sent Date"),
        FieldDef::date("receivedDate", "Received Date"),
        FieldDef::text("status", "Status").placeholder("Approved/Rejected"),
        FieldDef::text("govtCertificate", "Govt Certificate").placeholder("Yes/No"),
        FieldDef::text("certificateNo", "Certificate No").placeholder("CERT-001"),
        FieldDef::textarea("reason", "Reason (if rejected)").span2(),
    ]
}

pub fn to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("sampleDate", "sample_date"),
            ("cropName", "crop_name"),
            ("batchName", "batch_name"),
            ("stage", "stage"),
            ("tunnelNo", "tunnel_no"),
            ("trayBedNo", "tray_bed_no"),
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
        "tunnelNo": form_str(form, "tunnelNo"),
        "trayBedNo": form_str(form, "trayBedNo"),
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
        name: "sampling",
        title: "Sampling",
        path: "/indoor/sampling",
        fields: fields(),
        columns: &[
            "Sample Date",
            "Crop Name",
            "Batch Name",
            "Stage",
            "Tunnel No",
            "Tray/Bed No",
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
            "batch_name",
            "stage",
            "tunnel_no",
            "tray_bed_no",
            "sent_date",
            "received_date",
            "status",
            "govt_certificate",
            "certificate_no",
            "reason",
        ],
        filter: Some(FilterFields {
            field1_key: "sample_date",
            field1_label: "Date",
            field2_key: "batch_name",
            field2_label: "Batch Name",
        }),
        to_form,
        to_payload,
    }
}
