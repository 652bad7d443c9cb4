//! Per-surface projection of a tooth (the five-region face diagram).

use serde::Serialize;

use crate::models::{treatment_color, RgbColor, Surface, ToothId, ToothSurfaceMap, TreatmentKind};

/// Brightness applied to a fully extracted tooth.
pub const EXTRACTED_OPACITY_PERCENT: u8 = 40;

/// True when every surface holds `extraction`.
#[must_use]
pub fn is_fully_extracted(map: &ToothSurfaceMap) -> bool {
    Surface::ALL
        .iter()
        .all(|s| map.get(*s) == Some(TreatmentKind::Extraction))
}

/// One clickable region of the face diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurfaceRegion {
    /// Surface this region represents
    pub surface: Surface,
    /// Treatment recorded on the surface
    pub treatment: Option<TreatmentKind>,
    /// Fill color from the vocabulary
    pub color: RgbColor,
}

/// Render-ready flat view of one tooth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatToothView {
    /// Tooth being shown
    pub tooth: ToothId,
    /// Five regions in [`Surface::ALL`] order
    pub regions: [SurfaceRegion; 5],
    /// Whether the tooth is entirely extracted
    pub is_fully_extracted: bool,
    /// Brightness to draw the tooth at (100 = normal)
    pub opacity_percent: u8,
}

impl FlatToothView {
    /// Derives the view from a surface map. Pure; never touches the chart.
    #[must_use]
    pub fn from_map(tooth: ToothId, map: &ToothSurfaceMap) -> Self {
        let regions = Surface::ALL.map(|surface| {
            let treatment = map.get(surface);
            SurfaceRegion {
                surface,
                treatment,
                color: treatment_color(treatment),
            }
        });
        let extracted = is_fully_extracted(map);

        Self {
            tooth,
            regions,
            is_fully_extracted: extracted,
            opacity_percent: if extracted { EXTRACTED_OPACITY_PERCENT } else { 100 },
        }
    }

    /// Region for one surface.
    #[must_use]
    pub const fn region(&self, surface: Surface) -> &SurfaceRegion {
        &self.regions[surface.index()]
    }

    /// Region color with the view's opacity applied.
    #[must_use]
    pub fn display_color(&self, surface: Surface) -> RgbColor {
        self.region(surface).color.dim(self.opacity_percent)
    }

    /// Whether the "removed" marker is drawn over the tooth.
    #[must_use]
    pub const fn shows_removed_marker(&self) -> bool {
        self.is_fully_extracted
    }
}
