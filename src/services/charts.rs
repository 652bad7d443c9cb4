//! Chart file I/O service.
//!
//! This module centralizes chart document persistence: loading, atomic
//! saving, and listing the documents in a directory.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::models::ChartDocument;

/// File extension of chart documents.
pub const CHART_EXTENSION: &str = "json";

/// Summary of a chart file for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSummary {
    /// File name within the directory
    pub filename: String,
    /// Patient label
    pub patient: String,
    /// Number of teeth with at least one treatment
    pub charted_teeth: usize,
    /// Last modified timestamp (RFC 3339)
    pub modified: String,
}

/// Service for chart document I/O.
pub struct ChartService;

impl ChartService {
    /// Loads a chart document.
    ///
    /// Only unreadable files and invalid JSON are errors; unknown fields,
    /// tooth keys and surface names are dropped.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use odontochart::services::ChartService;
    ///
    /// let doc = ChartService::load(Path::new("jane_doe.json"))?;
    /// let chart = doc.to_chart();
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<ChartDocument> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read chart file {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse chart file {}", path.display()))?;

        let doc = ChartDocument::from_json_value(&value);
        info!(
            "Loaded chart for {} from {} ({} teeth)",
            doc.metadata.display_label(),
            path.display(),
            doc.teeth.len()
        );
        Ok(doc)
    }

    /// Saves a chart document with a temp file + rename so the target is
    /// never left half-written.
    pub fn save(doc: &ChartDocument, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let content =
            serde_json::to_string_pretty(doc).context("Failed to serialize chart document")?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, content)
            .with_context(|| format!("Failed to write temp chart file {}", temp_path.display()))?;
        fs::rename(&temp_path, path).with_context(|| {
            format!(
                "Failed to rename temp chart file to {}",
                path.display()
            )
        })?;

        info!("Saved chart to {}", path.display());
        Ok(())
    }

    /// Lists chart documents in `dir`, newest first.
    ///
    /// Files that cannot be parsed are skipped with a warning.
    pub fn list(dir: &Path) -> Result<Vec<ChartSummary>> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read chart directory {}", dir.display()))?;

        let mut dated = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == CHART_EXTENSION) {
                continue;
            }
            let Some(filename) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };

            match Self::load(&path) {
                Ok(doc) => dated.push((
                    doc.metadata.modified,
                    ChartSummary {
                        filename,
                        patient: doc.metadata.patient.clone(),
                        charted_teeth: doc.teeth.len(),
                        modified: doc.metadata.modified.to_rfc3339(),
                    },
                )),
                Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
            }
        }

        dated.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(dated.into_iter().map(|(_, summary)| summary).collect())
    }

    /// File stem derived from a patient label: lowercase ASCII alphanumerics
    /// with runs of anything else collapsed to `_`. Empty labels give
    /// `untitled`.
    #[must_use]
    pub fn suggested_filename(patient: &str) -> String {
        let mut stem = String::new();
        for c in patient.trim().chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
            } else if !stem.is_empty() && !stem.ends_with('_') {
                stem.push('_');
            }
        }
        let stem = stem.trim_end_matches('_');

        if stem.is_empty() {
            "untitled".to_string()
        } else {
            stem.to_string()
        }
    }

    /// Path for a chart file name in `dir`, appending the extension when missing.
    #[must_use]
    pub fn path_for(dir: &Path, name: &str) -> PathBuf {
        let has_extension = Path::new(name)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(CHART_EXTENSION));
        if has_extension {
            dir.join(name)
        } else {
            dir.join(format!("{name}.{CHART_EXTENSION}"))
        }
    }
}
