//! Incubation room records and the mortality ledger for vessel losses.

use serde_json::{json, Value};

use plantlab_core::{
    coerce_count, form_from_record, form_str, EntityDef, FieldDef, FilterFields, FormValues,
    Record, SelectSource,
};

// ── Incubation ──────────────────────────────────────────────────────

fn incubation_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("subcultureDate", "Subculture Date"),
        FieldDef::text("stage", "Stage").placeholder("Stage 1"),
        FieldDef::text("batchName", "Batch Name").placeholder("B-2024-1145"),
        FieldDef::text("mediaCode", "Media Code").placeholder("MS-001"),
        FieldDef::select("operatorName", "Operator Name", SelectSource::Operators),
        FieldDef::text("cropName", "Crop Name").placeholder("Rose"),
        FieldDef::number("noOfVessels", "No. of Vessels").placeholder("50"),
        FieldDef::number("noOfShoots", "No. of Shoots").placeholder("1000"),
        FieldDef::text("temp", "Temp").placeholder("25°C"),
        FieldDef::text("humidity", "Humidity").placeholder("70%"),
        FieldDef::text("photoPeriod", "Photo Period").placeholder("16/8"),
        FieldDef::text("lightIntensity", "Light Intensity").placeholder("3000 lux"),
    ]
}

fn incubation_to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("subcultureDate", "subculture_date"),
            ("stage", "stage"),
            ("batchName", "batch_name"),
            ("mediaCode", "media_code"),
            ("operatorName", "operator_name"),
            ("cropName", "crop_name"),
            ("noOfVessels", "no_of_vessels"),
            ("noOfShoots", "no_of_shoots"),
            ("temp", "temp"),
            ("humidity", "humidity"),
            ("photoPeriod", "photo_period"),
            ("lightIntensity", "light_intensity"),
        ],
    )
}

fn incubation_to_payload(form: &FormValues) -> Value {
    json!({
        "subcultureDate": form_str(form, "subcultureDate"),
        "stage": form_str(form, "stage"),
        "batchName": form_str(form, "batchName"),
        "mediaCode": form_str(form, "mediaCode"),
        "operatorName": form_str(form, "operatorName"),
        "cropName": form_str(form, "cropName"),
        "noOfVessels": coerce_count(&form_str(form, "noOfVessels")),
        "noOfShoots": coerce_count(&form_str(form, "noOfShoots")),
        "temp": form_str(form, "temp"),
        "humidity": form_str(form, "humidity"),
        "photoPeriod": form_str(form, "photoPeriod"),
        "lightIntensity": form_str(form, "lightIntensity"),
    })
}

pub fn incubation() -> EntityDef {
    EntityDef {
        name: "incubation",
        title: "Incubation",
        path: "/indoor/incubation",
        fields: incubation_fields(),
        columns: &[
            "Subculture Date",
            "Stage",
            "Batch Name",
            "Media Code",
            "Operator Name",
            "Crop Name",
            "No. of Vessels",
            "No. of Shoots",
            "Temp",
            "Humidity",
            "Photo Period",
            "Light Intensity",
        ],
        data_keys: &[
            "subculture_date",
            "stage",
            "batch_name",
            "media_code",
            "operator_name",
            "crop_name",
            "no_of_vessels",
            "no_of_shoots",
            "temp",
            "humidity",
            "photo_period",
            "light_intensity",
        ],
        filter: Some(FilterFields {
            field1_key: "subculture_date",
            field1_label: "Date",
            field2_key: "batch_name",
            field2_label: "Batch Name",
        }),
        to_form: incubation_to_form,
        to_payload: incubation_to_payload,
    }
}

// ── Mortality record ────────────────────────────────────────────────

fn mortality_fields() -> Vec<FieldDef> {
    vec![
        FieldDef::date("date", "Date"),
        FieldDef::text("batchName", "Batch Name").placeholder("B-2024-1145"),
        FieldDef::number("vesselCount", "Vessel Count").placeholder("10"),
        FieldDef::text("typeOfMortality", "Type of Mortality").placeholder("Contamination/Drying"),
        FieldDef::textarea("possibleSource", "Possible Source"),
        FieldDef::textarea("disposalMethod", "Disposal Method"),
    ]
}

fn mortality_to_form(record: &Record) -> FormValues {
    form_from_record(
        record,
        &[
            ("date", "date"),
            ("batchName", "batch_name"),
            ("vesselCount", "vessel_count"),
            ("typeOfMortality", "type_of_mortality"),
            ("possibleSource", "possible_source"),
            ("disposalMethod", "disposal_method"),
        ],
    )
}

fn mortality_to_payload(form: &FormValues) -> Value {
    json!({
        "date": form_str(form, "date"),
        "batchName": form_str(form, "batchName"),
        "vesselCount": coerce_count(&form_str(form, "vesselCount")),
        "typeOfMortality": form_str(form, "typeOfMortality"),
        "possibleSource": form_str(form, "possibleSource"),
        "disposalMethod": form_str(form, "disposalMethod"),
    })
}

pub fn mortality_record() -> EntityDef {
    EntityDef {
        name: "mortality-record",
        title: "Mortality Record",
        path: "/indoor/mortality-record",
        fields: mortality_fields(),
        columns: &[
            "Date",
            "Batch Name",
            "Vessel Count",
            "Type of Mortality",
            "Possible Source",
            "Disposal Method",
        ],
        data_keys: &[
            "date",
            "batch_name",
            "vessel_count",
            "type_of_mortality",
            "possible_source",
            "disposal_method",
        ],
        filter: Some(FilterFields {
            field1_key: "date",
            field1_label: "Date",
            field2_key: "batch_name",
            field2_label: "Batch Name",
        }),
        to_form: mortality_to_form,
        to_payload: mortality_to_payload,
    }
}
