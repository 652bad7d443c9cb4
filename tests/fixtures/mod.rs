//! Shared test fixtures for integration tests.
#![allow(dead_code)] // Not every test file uses every fixture

use chrono::{TimeZone, Utc};
use odontochart::models::{
    Arcade, ArcadeLayout, Chart, ChartDocument, ChartMetadata, Surface, ToothId, TreatmentKind,
};
use odontochart::services::ChartService;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Every tooth of the permanent dentition, upper arcade first.
pub fn all_teeth() -> Vec<ToothId> {
    let layout = ArcadeLayout::default();
    [Arcade::Upper, Arcade::Lower]
        .into_iter()
        .flat_map(|arcade| layout.row(arcade).to_vec())
        .collect()
}

/// Treatment kinds other than extraction.
pub fn surface_kinds() -> Vec<TreatmentKind> {
    TreatmentKind::ALL
        .into_iter()
        .filter(|kind| *kind != TreatmentKind::Extraction)
        .collect()
}

/// Builds a chart through the public mutator.
pub fn chart_with(entries: &[(u8, Surface, TreatmentKind)]) -> Chart {
    let mut chart = Chart::new();
    for (tooth, surface, kind) in entries {
        chart.set_surface(ToothId(*tooth), *surface, Some(*kind));
    }
    chart
}

/// A chart touching several teeth with every kind of treatment.
pub fn sample_chart() -> Chart {
    chart_with(&[
        (16, Surface::Occlusal, TreatmentKind::Caries),
        (16, Surface::Mesial, TreatmentKind::Restoration),
        (26, Surface::Distal, TreatmentKind::Canal),
        (36, Surface::Vestibular, TreatmentKind::Extraction),
        (46, Surface::Occlusal, TreatmentKind::Implant),
        (11, Surface::Lingual, TreatmentKind::Restoration),
    ])
}

/// Metadata with deterministic timestamps.
pub fn sample_metadata(patient: &str) -> ChartMetadata {
    let mut metadata = ChartMetadata::new(patient).expect("valid patient label");
    metadata.created = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
    metadata.modified = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();
    metadata.notes = "Recall in six months".to_string();
    metadata
}

/// Sample document for `patient`.
pub fn sample_document(patient: &str) -> ChartDocument {
    ChartDocument::new(sample_metadata(patient), &sample_chart())
}

/// Writes a document into `dir` and returns its path.
pub fn write_chart_file(dir: &Path, name: &str, document: &ChartDocument) -> PathBuf {
    let path = ChartService::path_for(dir, name);
    ChartService::save(document, &path).expect("Failed to write chart file");
    path
}

/// Creates a temporary workspace holding one sample chart.
pub fn temp_workspace_with_chart(name: &str, patient: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_chart_file(temp_dir.path(), name, &sample_document(patient));
    (temp_dir, path)
}
