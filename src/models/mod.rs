//! Data models for the dental chart.
//!
//! This module contains the treatment vocabulary, tooth surface maps, the
//! chart itself and its persisted document form. Models are independent of
//! UI and I/O.

pub mod arcade;
pub mod chart;
pub mod document;
pub mod rgb;
pub mod surface;
pub mod tooth;
pub mod treatment;

// Re-export all model types
pub use arcade::{Arcade, ArcadeLayout, ARCADE_LEN};
pub use chart::{Chart, ChartSnapshot};
pub use document::{ChartDocument, ChartMetadata};
pub use rgb::RgbColor;
pub use surface::Surface;
pub use tooth::{ToothId, ToothSurfaceMap};
pub use treatment::{treatment_color, Tool, TreatmentKind, UNTREATED_COLOR};
