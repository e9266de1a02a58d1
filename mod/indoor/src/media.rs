//! Media preparation: autoclave sterilization cycles and prepared
//! media batches.

use serde_json::{json, Value};

use plantlab_core::{
    coerce_count, form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues,
    Record, SelectSource,
};

// ── Autoclave cycles ────────────────────────────────────────────────

fn autoclave_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::text("mediaCode", "Media Code").placeholder("MS-001"),
        FieldDef::select("operatorName", "Operator Name", SelectSource::Operators),
        FieldDef::text("typeOfMedia", "Type of Media").placeholder("MS Medium"),
        FieldDef::time("autoclaveOnTime", "Autoclave ON Time"),
        FieldDef::time("mediaLoadingTime", "Media Loading Time"),
        FieldDef::time("pressureTime", "Pressure Time"),
        FieldDef::time("offTime", "Off Time"),
        FieldDef::time("openTime", "Open Time"),
        FieldDef::text("mediaTotal", "Media Total").placeholder("3:00"),
        FieldDef::textarea("remark", "Remark").span2(),
    ]
}

fn autoclave_to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("date", "date"),
            ("mediaCode", "media_code"),
            ("operatorName", "operator_name"),
            ("typeOfMedia", "type_of_media"),
            ("autoclaveOnTime", "autoclave_on_time"),
            ("mediaLoadingTime", "media_loading_time"),
            ("pressureTime", "pressure_time"),
            ("offTime", "off_time"),
            ("openTime", "open_time"),
            ("mediaTotal", "media_total"),
            ("remark", "remark"),
        ],
    )
}

fn autoclave_to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "mediaCode": form_str(form, "mediaCode"),
        "operatorName": form_str(form, "operatorName"),
        "typeOfMedia": form_str(form, "typeOfMedia"),
        "autoclaveOnTime": form_str(form, "autoclaveOnTime"),
        "mediaLoadingTime": form_str(form, "mediaLoadingTime"),
        "pressureTime": form_str(form, "pressureTime"),
        "offTime": form_str(form, "offTime"),
        "openTime": form_str(form, "openTime"),
        "mediaTotal": form_str(form, "mediaTotal"),
        "remark": form_str(form, "remark"),
    })
}

pub fn autoclave_cycles() -> EntityDef {
    EntityDef {
        name: "autoclave-cycles",
        title: "Autoclave Cycle",
        path: "/indoor/autoclave-cycles",
        fields: autoclave_fields(),
        columns: &[
            "Date",
            "Media Code",
            "Operator Name",
            "Type of Media",
            "Autoclave ON Time",
            "Media Loading Time",
            "Pressure Time",
            "Off Time",
            "Open Time",
            "Media Total",
            "Remark",
        ],
        data_keys: &[
            "date",
            "media_code",
            "operator_name",
            "type_of_media",
            "autoclave_on_time",
            "media_loading_time",
            "pressure_time",
            "off_time",
            "open_time",
            "media_total",
            "remark",
        ],
        filter: Some(FilterFields {
            field1_key: "date",
            field1_label: "Date",
            field2_key: "media_code",
            field2_label: "Media Code",
        }),
        to_form: autoclave_to_form,
        to_payload: autoclave_to_payload,
    }
}

// ── Media batches ───────────────────────────────────────────────────

fn batch_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::text("mediaCode", "Media Code").placeholder("MS-001"),
        FieldDef::select("operatorName", "Operator Name", SelectSource::Operators),
        FieldDef::text("quantity", "Quantity").placeholder("5L"),
        FieldDef::number("bottles", "Bottles").placeholder("120"),
        FieldDef::textarea("contamination", "Contamination"),
    ]
}

fn batch_to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("date", "date"),
            ("mediaCode", "media_code"),
            ("operatorName", "operator_name"),
            ("quantity", "quantity"),
            ("bottles", "bottles"),
            ("contamination", "contamination"),
        ],
    )
}

fn batch_to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "mediaCode": form_str(form, "mediaCode"),
        "operatorName": form_str(form, "operatorName"),
        "quantity": form_str(form, "quantity"),
        "bottles": coerce_count(&form_str(form, "bottles")),
        "contamination": form_str(form, "contamination"),
    })
}

pub fn media_batches() -> EntityDef {
    EntityDef {
        name: "media-batches",
        title: "Media Batch",
        path: "/indoor/media-batches",
        fields: batch_fields(),
        columns: &["Date", "Media Code", "Operator Name", "Quantity", "Bottles", "Contamination"],
        data_keys: &["date", "media_code", "operator_name", "quantity", "bottles", "contamination"],
        filter: Some(FilterFields {
            field1_key: "date",
            field1_label: "Date",
            field2_key: "media_code",
            field2_label: "Media Code",
        }),
        to_form: batch_to_form,
        to_payload: batch_to_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contamination_is_exempt_from_validation() {
        let def = media_batches();
        let contamination = def
            .fields
            .iter()
            .find(|f| f.key == "contamination")
            .unwrap();
        assert!(!contamination.required);
    }

    #[test]
    fn bottles_coerce_on_the_way_out() {
        let mut form = FormValues::new();
        form.insert("bottles".into(), "120 pcs".into());
        let payload = batch_to_payload(&form);
        assert_eq!(payload["bottles"], json!(120));
    }

    #[test]
    fn autoclave_columns_align_with_data_keys() {
        let def = autoclave_cycles();
        assert_eq!(def.columns.len(), def.data_keys.len());
        assert_eq!(def.fields.len(), def.columns.len());
    }
}
