//! Screen geometry of the two-arcade chart.
//!
//! Each tooth is a 6x3 cell block made of a 3x3 grid of two-character
//! slots. The middle slot is the occlusal surface; the slots around it are
//! oriented the way the tooth sits in the mouth, so vestibular faces away
//! from the occlusal plane and mesial faces the midline.
//!
//! ```text
//!  upper  ┌ V V V ┐        lower  ┌ L L L ┐
//!         │ D O M │  (left half)  │ D O M │
//!         └ L L L ┘               └ V V V ┘
//! ```
//!
//! Rendering and mouse hit-testing both go through [`ChartGeometry`] so a
//! click always lands on the region that was drawn.

use ratatui::layout::Rect;

use crate::models::{Arcade, Surface, ARCADE_LEN};

/// Width of one tooth block in cells.
pub const TOOTH_WIDTH: u16 = 6;
/// Height of one tooth block in cells.
pub const TOOTH_HEIGHT: u16 = 3;
/// Width of one surface slot in cells.
pub const SLOT_WIDTH: u16 = 2;

const TOOTH_GAP: u16 = 1;
const MIDLINE_GAP: u16 = 2;
const MIDLINE_COLUMN: usize = ARCADE_LEN / 2;

/// Inner width needed to draw both arcades.
pub const CHART_INNER_WIDTH: u16 =
    ARCADE_LEN as u16 * (TOOTH_WIDTH + TOOTH_GAP) - TOOTH_GAP + MIDLINE_GAP;
/// Inner height: upper teeth, upper labels, spacer, lower labels, lower teeth.
pub const CHART_INNER_HEIGHT: u16 = TOOTH_HEIGHT * 2 + 3;

/// Order tried when picking the slot that marks a focused surface.
const FOCUS_SLOT_ORDER: [(usize, usize); 5] = [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)];

/// Surface drawn at `(row, col)` of a tooth's 3x3 slot grid.
///
/// Rows and columns outside `0..3` are clamped.
#[must_use]
pub fn surface_at(arcade: Arcade, column: usize, row: usize, col: usize) -> Surface {
    let left_half = column < MIDLINE_COLUMN;
    match (row.min(2), col.min(2)) {
        (0, _) => match arcade {
            Arcade::Upper => Surface::Vestibular,
            Arcade::Lower => Surface::Lingual,
        },
        (2, _) => match arcade {
            Arcade::Upper => Surface::Lingual,
            Arcade::Lower => Surface::Vestibular,
        },
        (_, 0) if left_half => Surface::Distal,
        (_, 0) => Surface::Mesial,
        (_, 2) if left_half => Surface::Mesial,
        (_, 2) => Surface::Distal,
        _ => Surface::Occlusal,
    }
}

/// Slot used to mark `surface` as focused.
#[must_use]
pub fn focus_slot(arcade: Arcade, column: usize, surface: Surface) -> (usize, usize) {
    FOCUS_SLOT_ORDER
        .into_iter()
        .find(|(row, col)| surface_at(arcade, column, *row, *col) == surface)
        .unwrap_or((1, 1))
}

/// Result of a hit test on the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartHit {
    /// Arcade of the tooth under the pointer
    pub arcade: Arcade,
    /// Display column of the tooth
    pub column: usize,
    /// Surface under the pointer, `None` on the tooth number label
    pub surface: Option<Surface>,
}

/// Position of the chart inside an area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartGeometry {
    origin_x: u16,
    origin_y: u16,
}

impl ChartGeometry {
    /// Centers the chart inside `inner` (the area inside the border).
    ///
    /// `None` when `inner` cannot hold the whole chart; nothing is drawn
    /// then, so nothing may be hit either.
    #[must_use]
    pub fn fit(inner: Rect) -> Option<Self> {
        if inner.width < CHART_INNER_WIDTH || inner.height < CHART_INNER_HEIGHT {
            return None;
        }
        let pad_x = (inner.width - CHART_INNER_WIDTH) / 2;
        let pad_y = (inner.height - CHART_INNER_HEIGHT) / 2;
        Some(Self {
            origin_x: inner.x + pad_x,
            origin_y: inner.y + pad_y,
        })
    }

    /// Left edge of the tooth at `column`.
    #[must_use]
    pub fn tooth_x(&self, column: usize) -> u16 {
        let column = column.min(ARCADE_LEN - 1);
        let midline = if column >= MIDLINE_COLUMN { MIDLINE_GAP } else { 0 };
        self.origin_x + column as u16 * (TOOTH_WIDTH + TOOTH_GAP) + midline
    }

    /// Top edge of the tooth blocks of `arcade`.
    #[must_use]
    pub const fn teeth_y(&self, arcade: Arcade) -> u16 {
        match arcade {
            Arcade::Upper => self.origin_y,
            Arcade::Lower => self.origin_y + TOOTH_HEIGHT + 3,
        }
    }

    /// Row of the tooth number labels of `arcade`.
    #[must_use]
    pub const fn label_y(&self, arcade: Arcade) -> u16 {
        match arcade {
            Arcade::Upper => self.origin_y + TOOTH_HEIGHT,
            Arcade::Lower => self.origin_y + TOOTH_HEIGHT + 2,
        }
    }

    /// Maps a terminal cell to the tooth and surface drawn there.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ChartHit> {
        let column = (0..ARCADE_LEN).find(|c| {
            let left = self.tooth_x(*c);
            x >= left && x < left + TOOTH_WIDTH
        })?;
        let slot_col = usize::from((x - self.tooth_x(column)) / SLOT_WIDTH);

        for arcade in [Arcade::Upper, Arcade::Lower] {
            let top = self.teeth_y(arcade);
            if y >= top && y < top + TOOTH_HEIGHT {
                let row = usize::from(y - top);
                return Some(ChartHit {
                    arcade,
                    column,
                    surface: Some(surface_at(arcade, column, row, slot_col)),
                });
            }
            if y == self.label_y(arcade) {
                return Some(ChartHit {
                    arcade,
                    column,
                    surface: None,
                });
            }
        }
        None
    }
}
