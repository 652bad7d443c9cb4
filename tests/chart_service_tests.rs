//! Chart file persistence through `ChartService`.

mod fixtures;

use chrono::{Duration, TimeZone, Utc};
use fixtures::{sample_chart, sample_document, temp_workspace_with_chart, write_chart_file};
use odontochart::models::{ChartDocument, Surface, ToothId, ToothSurfaceMap, TreatmentKind};
use odontochart::services::ChartService;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_save_and_load_round_trip() {
    let (_temp_dir, path) = temp_workspace_with_chart("jane_doe", "Jane Doe");

    let loaded = ChartService::load(&path).unwrap();
    assert_eq!(loaded, sample_document("Jane Doe"));
    assert_eq!(loaded.to_chart(), sample_chart());
    assert_eq!(loaded.metadata.notes, "Recall in six months");
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (temp_dir, path) = temp_workspace_with_chart("jane_doe", "Jane Doe");

    assert!(path.exists());
    let names: Vec<String> = fs::read_dir(temp_dir.path())
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["jane_doe.json".to_string()]);
}

#[test]
fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("clinic").join("2025").join("chart.json");

    ChartService::save(&sample_document("Nested"), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_saved_file_uses_wire_names() {
    let (_temp_dir, path) = temp_workspace_with_chart("wire", "Wire Names");
    let content = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();

    assert_eq!(value["teeth"]["16"]["occlusal"], "caries");
    assert_eq!(value["teeth"]["36"]["lingual"], "extraction");
    assert_eq!(value["metadata"]["patient"], "Wire Names");
}

#[test]
fn test_load_invalid_json_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = ChartService::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse chart file"));
}

#[test]
fn test_load_missing_file_is_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ChartService::load(&temp_dir.path().join("absent.json")).is_err());
}

#[test]
fn test_load_is_lenient_about_content() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("old.json");
    fs::write(
        &path,
        r#"{
            "metadata": { "patient": "Legacy", "clinic": "North" },
            "teeth": {
                "24": { "occlusal": "restoration", "cervical": "caries" },
                "tooth-x": { "occlusal": "caries" },
                "25": { "mesial": "extraction" }
            },
            "attachments": []
        }"#,
    )
    .unwrap();

    let chart = ChartService::load(&path).unwrap().to_chart();
    assert_eq!(
        chart.get_tooth(ToothId(24)),
        ToothSurfaceMap::empty().with(Surface::Occlusal, TreatmentKind::Restoration)
    );
    assert_eq!(
        chart.get_tooth(ToothId(25)),
        ToothSurfaceMap::filled(TreatmentKind::Extraction)
    );
    assert_eq!(chart.charted_teeth().count(), 2);
}

#[test]
fn test_load_without_metadata_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bare.json");
    fs::write(&path, r#"{ "teeth": { "11": { "occlusal": "caries" } } }"#).unwrap();

    let doc = ChartService::load(&path).unwrap();
    assert_eq!(doc.metadata.display_label(), "Unnamed patient");
    assert_eq!(doc.teeth.len(), 1);
}

#[test]
fn test_list_newest_first_and_skips_bad_files() {
    let temp_dir = TempDir::new().unwrap();

    let mut older = sample_document("Older");
    older.metadata.modified = Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap();
    write_chart_file(temp_dir.path(), "older", &older);

    let newer: ChartDocument = sample_document("Newer");
    write_chart_file(temp_dir.path(), "newer", &newer);

    fs::write(temp_dir.path().join("broken.json"), "garbage").unwrap();
    fs::write(temp_dir.path().join("notes.txt"), "not a chart").unwrap();

    let summaries = ChartService::list(temp_dir.path()).unwrap();
    let names: Vec<&str> = summaries.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, vec!["newer.json", "older.json"]);
    assert_eq!(summaries[0].patient, "Newer");
    assert_eq!(summaries[0].charted_teeth, 5);
}

#[test]
fn test_list_orders_by_timestamp_within_a_second() {
    let temp_dir = TempDir::new().unwrap();
    let base = Utc.with_ymd_and_hms(2025, 3, 4, 10, 0, 0).unwrap();

    for (name, millis) in [("whole", 0), ("late", 750), ("early", 250)] {
        let mut doc = sample_document(name);
        doc.metadata.modified = base + Duration::milliseconds(millis);
        write_chart_file(temp_dir.path(), name, &doc);
    }

    let summaries = ChartService::list(temp_dir.path()).unwrap();
    let names: Vec<&str> = summaries.iter().map(|s| s.filename.as_str()).collect();
    assert_eq!(names, vec!["late.json", "early.json", "whole.json"]);
}

#[test]
fn test_load_keeps_metadata_around_a_bad_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("drift.json");
    fs::write(
        &path,
        r#"{ "metadata": { "patient": "Jane Doe", "notes": "allergic", "created": "yesterday" },
             "teeth": {} }"#,
    )
    .unwrap();

    let doc = ChartService::load(&path).unwrap();
    assert_eq!(doc.metadata.patient, "Jane Doe");
    assert_eq!(doc.metadata.notes, "allergic");
}

#[test]
fn test_list_missing_directory_is_error() {
    let temp_dir = TempDir::new().unwrap();
    assert!(ChartService::list(&temp_dir.path().join("nope")).is_err());
}

#[test]
fn test_path_for_appends_extension() {
    let dir = std::path::Path::new("/charts");
    assert_eq!(ChartService::path_for(dir, "jane"), dir.join("jane.json"));
    assert_eq!(ChartService::path_for(dir, "jane.json"), dir.join("jane.json"));
}
