//! Whole-tooth projection: five surfaces reduced to one representative kind.

use serde::Serialize;

use crate::models::{treatment_color, RgbColor, ToothId, ToothSurfaceMap, TreatmentKind};

/// Scan order for [`dominant_treatment`]. Extraction hides everything else;
/// active caries outranks completed work.
pub const AGGREGATE_PRIORITY: [TreatmentKind; 5] = [
    TreatmentKind::Extraction,
    TreatmentKind::Caries,
    TreatmentKind::Restoration,
    TreatmentKind::Canal,
    TreatmentKind::Implant,
];

/// First kind in [`AGGREGATE_PRIORITY`] present on any surface.
#[must_use]
pub fn dominant_treatment(map: &ToothSurfaceMap) -> Option<TreatmentKind> {
    AGGREGATE_PRIORITY
        .into_iter()
        .find(|kind| map.contains(*kind))
}

/// Render-ready aggregate view of one tooth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AggregateToothView {
    /// Tooth being shown
    pub tooth: ToothId,
    /// Representative treatment, `None` when untreated
    pub dominant: Option<TreatmentKind>,
    /// Solid fill color
    pub color: RgbColor,
}

impl AggregateToothView {
    /// Derives the view from a surface map.
    #[must_use]
    pub fn from_map(tooth: ToothId, map: &ToothSurfaceMap) -> Self {
        let dominant = dominant_treatment(map);
        Self {
            tooth,
            dominant,
            color: treatment_color(dominant),
        }
    }
}
