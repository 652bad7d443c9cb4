//! Tool selection and click-to-mutation translation.

use serde::Serialize;
use tracing::debug;

use crate::models::{Chart, Surface, Tool, ToothId, ToothSurfaceMap, TreatmentKind};

/// Surface written by whole-tooth clicks from the aggregate view.
pub const NOMINAL_SURFACE: Surface = Surface::Occlusal;

/// Record of one chart mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartChange {
    /// Tooth that was written
    pub tooth: ToothId,
    /// Surface the click targeted
    pub surface: Surface,
    /// Tool that produced the change
    pub tool: Tool,
    /// Tooth state before the click
    pub before: ToothSurfaceMap,
    /// Tooth state after the click
    pub after: ToothSurfaceMap,
}

impl ChartChange {
    /// Surfaces whose value differs between `before` and `after`.
    pub fn changed_surfaces(&self) -> impl Iterator<Item = Surface> + '_ {
        Surface::ALL
            .into_iter()
            .filter(|s| self.before.get(*s) != self.after.get(*s))
    }

    /// True when the click left the tooth as it was.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// Holds the selected tool and applies clicks to a chart.
///
/// The controller owns no chart; the caller passes the one chart for the
/// open encounter on every click, so there is a single writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChartingController {
    selected_tool: Tool,
}

impl ChartingController {
    /// Creates a controller holding `tool`.
    #[must_use]
    pub const fn new(tool: Tool) -> Self {
        Self {
            selected_tool: tool,
        }
    }

    /// Currently selected tool.
    #[must_use]
    pub const fn selected_tool(&self) -> Tool {
        self.selected_tool
    }

    /// Selects a tool (palette entry point).
    pub fn set_tool(&mut self, tool: Tool) {
        debug!("Tool selected: {}", tool);
        self.selected_tool = tool;
    }

    /// Selects a treatment kind, or the eraser for `None`.
    pub fn select_treatment(&mut self, treatment: Option<TreatmentKind>) {
        self.set_tool(Tool::from(treatment));
    }

    /// Applies the selected tool to one surface of one tooth.
    ///
    /// - Eraser: clears `surface` only.
    /// - Extraction: marks all five surfaces of the tooth.
    /// - Any other kind: writes `surface` only.
    pub fn apply_surface_click(
        &self,
        chart: &mut Chart,
        tooth: ToothId,
        surface: Surface,
    ) -> ChartChange {
        let before = chart.get_tooth(tooth);
        let after = chart.set_surface(tooth, surface, self.selected_tool.treatment());

        let change = ChartChange {
            tooth,
            surface,
            tool: self.selected_tool,
            before,
            after,
        };
        debug!(
            "Applied {} to tooth {} {} ({} surfaces changed)",
            self.selected_tool,
            tooth,
            surface,
            change.changed_surfaces().count()
        );
        change
    }

    /// Applies the selected tool to a whole tooth from the aggregate view.
    ///
    /// Identical to a surface click on [`NOMINAL_SURFACE`].
    pub fn apply_tooth_click(&self, chart: &mut Chart, tooth: ToothId) -> ChartChange {
        self.apply_surface_click(chart, tooth, NOMINAL_SURFACE)
    }
}
