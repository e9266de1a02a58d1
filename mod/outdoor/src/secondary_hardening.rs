//! Secondary hardening — plants moved on from a tunnel to a secondary
//! unit. The source tunnel and plant count follow the chosen batch's
//! primary hardening record, so both are read-only here.

use serde_json::{json, Value};

use plantlab_core::{
    form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues, Record,
    SelectSource,
};

pub fn fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("transferDate", "Transfer Date"),
        FieldDef::read_only("cropName", "Crop Name"),
        FieldDef::select("batchName", "Batch Name", SelectSource::Batches),
        FieldDef::read_only("fromLocation", "From Tunnel"),
        FieldDef::text("toBed", "Secondary Unit"),
        FieldDef::read_only("plants", "Plants"),
        FieldDef::textarea("notes", "Notes").span2(),
    ]
}

pub fn to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("transferDate", "transfer_date"),
            ("cropName", "crop_name"),
            ("batchName", "batch_code"),
            ("fromLocation", "from_location"),
            ("toBed", "to_bed"),
            ("plants", "plants"),
            ("notes", "notes"),
        ],
    )
}

pub fn to_payload(form: &FormValues) -> Value {
    json!({
        "transferDate": form_str(form, "transferDate"),
        "cropName": form_str(form, "cropName"),
        "batchName": form_str(form, "batchName"),
        "fromLocation": form_str(form, "fromLocation"),
        "toBed": form_str(form, "toBed"),
        "plants": form_str(form, "plants"),
        "notes": form_str(form, "notes"),
    })
}

pub fn def() -> EntityDef {
    EntityDef {
        name: "secondary-hardening",
        title: "Secondary Hardening",
        path: "/outdoor/secondary-hardening",
        fields: fields(),
        columns: &[
            "Transfer Date",
            "Crop Name",
            "Batch Name",
            "From Tunnel",
            "Secondary Unit",
            "Plants",
            "Notes",
        ],
        data_keys: &[
            "transfer_date",
            "crop_name",
            "batch_code",
            "from_location",
            "to_bed",
            "plants",
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
