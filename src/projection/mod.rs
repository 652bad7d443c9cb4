//! Read-only projections of the chart.
//!
//! Both views are pure functions of a [`ToothSurfaceMap`](crate::models::ToothSurfaceMap):
//! the flat view keeps per-surface resolution, the aggregate view collapses
//! a tooth to one representative treatment. Renderers in `tui` and the web
//! API draw from these; neither ever writes to the chart.

pub mod aggregate;
pub mod flat;

pub use aggregate::{dominant_treatment, AggregateToothView, AGGREGATE_PRIORITY};
pub use flat::{is_fully_extracted, FlatToothView, SurfaceRegion};

use crate::models::{Chart, ToothId};

/// Which projection a screen shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartView {
    /// Five regions per tooth
    #[default]
    Flat,
    /// One solid color per tooth
    Aggregate,
}

impl ChartView {
    /// The other view.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Flat => Self::Aggregate,
            Self::Aggregate => Self::Flat,
        }
    }

    /// Label for titles.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Flat => "Surfaces",
            Self::Aggregate => "Whole tooth",
        }
    }
}

impl std::str::FromStr for ChartView {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "flat" => Ok(Self::Flat),
            "aggregate" => Ok(Self::Aggregate),
            other => anyhow::bail!("Unknown chart view '{other}' (expected flat or aggregate)"),
        }
    }
}

/// Flat view of one tooth read from the chart.
#[must_use]
pub fn flat_view(chart: &Chart, tooth: ToothId) -> FlatToothView {
    FlatToothView::from_map(tooth, &chart.get_tooth(tooth))
}

/// Aggregate view of one tooth read from the chart.
#[must_use]
pub fn aggregate_view(chart: &Chart, tooth: ToothId) -> AggregateToothView {
    AggregateToothView::from_map(tooth, &chart.get_tooth(tooth))
}
