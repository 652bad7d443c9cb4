//! Persisted chart document: metadata plus a chart snapshot.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{Chart, ChartSnapshot};

/// Current document schema version.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Document metadata stored alongside the chart.
///
/// # Validation
///
/// - patient label max 100 characters (may be empty for unnamed charts)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartMetadata {
    /// Patient label shown in titles and listings
    pub patient: String,
    /// Free-form clinician notes
    pub notes: String,
    /// Creation timestamp (ISO 8601)
    pub created: DateTime<Utc>,
    /// Last modification timestamp (ISO 8601)
    pub modified: DateTime<Utc>,
    /// Schema version
    pub version: String,
}

impl ChartMetadata {
    /// Creates metadata for a new chart.
    pub fn new(patient: impl Into<String>) -> Result<Self> {
        let patient = patient.into();
        Self::validate_patient(&patient)?;

        let now = Utc::now();
        Ok(Self {
            patient,
            notes: String::new(),
            created: now,
            modified: now,
            version: DOCUMENT_VERSION.to_string(),
        })
    }

    fn validate_patient(patient: &str) -> Result<()> {
        if patient.chars().count() > 100 {
            anyhow::bail!(
                "Patient label '{}' exceeds maximum length of 100 characters (got {})",
                patient,
                patient.chars().count()
            );
        }
        Ok(())
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// Sets the patient label with validation.
    pub fn set_patient(&mut self, patient: impl Into<String>) -> Result<()> {
        let patient = patient.into();
        Self::validate_patient(&patient)?;
        self.patient = patient;
        self.touch();
        Ok(())
    }

    /// Label for titles; falls back to "Unnamed patient".
    #[must_use]
    pub fn display_label(&self) -> &str {
        if self.patient.trim().is_empty() {
            "Unnamed patient"
        } else {
            &self.patient
        }
    }
}

impl ChartMetadata {
    /// Reads metadata field by field.
    ///
    /// A missing or malformed field falls back to its default on its own,
    /// so one drifted field never costs the patient label or the notes.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let mut metadata = Self::default();
        let Some(fields) = value.as_object() else {
            warn!("Ignoring malformed chart metadata: not an object");
            return metadata;
        };

        if let Some(patient) = string_field(fields, "patient") {
            match Self::validate_patient(&patient) {
                Ok(()) => metadata.patient = patient,
                Err(e) => warn!("Ignoring chart metadata field 'patient': {:#}", e),
            }
        }
        if let Some(notes) = string_field(fields, "notes") {
            metadata.notes = notes;
        }
        if let Some(version) = string_field(fields, "version") {
            metadata.version = version;
        }
        if let Some(created) = timestamp_field(fields, "created") {
            metadata.created = created;
        }
        if let Some(modified) = timestamp_field(fields, "modified") {
            metadata.modified = modified;
        }
        metadata
    }
}

fn string_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    let raw = fields.get(key)?;
    let value = raw.as_str().map(str::to_string);
    if value.is_none() {
        warn!("Ignoring chart metadata field '{}': expected a string, got {}", key, raw);
    }
    value
}

fn timestamp_field(fields: &serde_json::Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    let raw = fields.get(key)?;
    let parsed = raw.as_str().and_then(|s| s.parse::<DateTime<Utc>>().ok());
    if parsed.is_none() {
        warn!("Ignoring chart metadata field '{}': invalid timestamp {}", key, raw);
    }
    parsed
}

impl Default for ChartMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            patient: String::new(),
            notes: String::new(),
            created: now,
            modified: now,
            version: DOCUMENT_VERSION.to_string(),
        }
    }
}

/// Saveable snapshot of one patient's chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDocument {
    /// Document metadata
    #[serde(default)]
    pub metadata: ChartMetadata,
    /// Tooth id -> surface -> treatment
    #[serde(default)]
    pub teeth: ChartSnapshot,
}

impl ChartDocument {
    /// Wraps a chart with the given metadata.
    #[must_use]
    pub fn new(metadata: ChartMetadata, chart: &Chart) -> Self {
        Self {
            metadata,
            teeth: chart.snapshot(),
        }
    }

    /// Reads a document leniently.
    ///
    /// Metadata goes through [`ChartMetadata::from_json_value`]; teeth go through
    /// [`Chart::from_json_value`] so unknown keys are dropped and extraction
    /// is normalized.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let metadata = value
            .get("metadata")
            .map(ChartMetadata::from_json_value)
            .unwrap_or_default();

        let chart = value
            .get("teeth")
            .map(Chart::from_json_value)
            .unwrap_or_default();

        Self::new(metadata, &chart)
    }

    /// Rebuilds the live chart.
    #[must_use]
    pub fn to_chart(&self) -> Chart {
        Chart::restore(&self.teeth)
    }
}
