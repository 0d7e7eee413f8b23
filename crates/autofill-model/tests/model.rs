//! Tests for autofill-model types.

use std::collections::BTreeMap;

use autofill_model::{CaseField, CaseRecord, RawRow, ValidationResult, records_from_rows};

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn records_from_rows_preserves_order() {
    let records = records_from_rows(vec![
        row(&[("case_id", "B")]),
        row(&[("case_id", "A")]),
        row(&[("case_id", "C")]),
    ]);
    let ids: Vec<&str> = records.iter().map(|r| r.case_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A", "C"]);
}

#[test]
fn raw_payload_keeps_unmapped_columns() {
    let record = CaseRecord::from_row(row(&[
        ("case_id", "C-9"),
        ("indication", "Hypertension"),
    ]));
    assert_eq!(
        record.raw_payload.get("indication").map(String::as_str),
        Some("Hypertension")
    );
}

#[test]
fn case_field_serializes_as_column_name() {
    let mut map = BTreeMap::new();
    map.insert(CaseField::MeddraCode, "input[name=\"meddraCode\"]".to_string());
    let json = serde_json::to_string(&map).expect("serialize mapping");
    assert_eq!(json, r#"{"meddra_code":"input[name=\"meddraCode\"]"}"#);

    let back: BTreeMap<CaseField, String> = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, map);
}

#[test]
fn validation_result_exposes_record() {
    let record = CaseRecord::from_row(row(&[("case_id", "C-4")]));
    let result = ValidationResult::new(record, vec!["boom".to_string()], vec![]);
    assert_eq!(result.case_id(), "C-4");
    assert_eq!(result.record().case_id, "C-4");
    assert!(!result.is_valid());
}
