//! Lab hygiene logs: routine area cleaning and deep instrument cleaning.

use serde_json::{json, Value};

use plantlab_core::{
    form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues, Record,
    SelectSource,
};

// ── cleaning record ──

fn cleaning_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::select("operatorName", "Operator Name", SelectSource::Operators),
        FieldDef::textarea("areaCleaned", "Area Cleaned").span2(),
    ]
}

fn cleaning_to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("date", "date"),
            ("operatorName", "operator_name"),
            ("areaCleaned", "area_cleaned"),
        ],
    )
}

fn cleaning_to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "operatorName": form_str(form, "operatorName"),
        "areaCleaned": form_str(form, "areaCleaned"),
    })
}

pub fn cleaning_record() -> EntityDef {
    EntityDef {
        name: "cleaning-record",
        title: "Cleaning Record",
        path: "/indoor/cleaning-record",
        fields: cleaning_fields(),
        columns: &["Date", "Operator Name", "Area Cleaned"],
        data_keys: &["date", "operator_name", "area_cleaned"],
        filter: Some(FilterFields {
            field1_key: "date",
            field1_label: "Date",
            field2_key: "operator_name",
            field2_label: "Operator Name",
        }),
        to_form: cleaning_to_form,
        to_payload: cleaning_to_payload,
    }
}

// ── deep cleaning record ──

fn deep_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::select("operator", "Operator", SelectSource::Operators),
        FieldDef::textarea("instrumentCleaned", "Instrument Cleaned").span2(),
    ]
}

fn deep_to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("date", "date"),
            ("operator", "operator"),
            ("instrumentCleaned", "instrument_cleaned"),
        ],
    )
}

fn deep_to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "operator": form_str(form, "operator"),
        "instrumentCleaned": form_str(form, "instrumentCleaned"),
    })
}

pub fn deep_cleaning_record() -> EntityDef {
    EntityDef {
        name: "deep-cleaning-record",
        title: "Deep Cleaning Record",
        path: "/indoor/deep-cleaning-record",
        fields: deep_fields(),
        columns: &["Date", "Operator", "Instrument Cleaned"],
        data_keys: &["date", "operator", "instrument_cleaned"],
        filter: Some(FilterFields {
            field1_key: "date",
            field1_label: "Date",
            field2_key: "operator",
            field2_label: "Operator",
        }),
        to_form: deep_to_form,
        to_payload: deep_to_payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_fields_pull_from_operator_directory() {
        let op = &cleaning_fields()[1];
        assert!(matches!(
            op.kind,
            plantlab_core::FieldKind::Select(SelectSource::Operators)
        ));
        let op = &deep_fields()[1];
        assert!(matches!(
            op.kind,
            plantlab_core::FieldKind::Select(SelectSource::Operators)
        ));
    }

    #[test]
    fn round_trip_record_to_form() {
        let record = Record::from_pairs(&[
            ("date", json!("2024-05-01T00:00:00Z")),
            ("operator_name", json!("Asha")),
            ("area_cleaned", json!("Laminar room")),
        ]);
        let form = cleaning_to_form(&record);
        assert_eq!(form.get("operatorName").map(String::as_str), Some("Asha"));
        assert_eq!(
            form.get("areaCleaned").map(String::as_str),
            Some("Laminar room")
        );
    }
}
