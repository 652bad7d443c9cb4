//! Display ordering for the two dental arcades.

use serde::{Deserialize, Serialize};

use crate::models::ToothId;

/// Number of teeth in one arcade row.
pub const ARCADE_LEN: usize = 16;

/// Which jaw a row of teeth belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arcade {
    /// Maxillary arch
    Upper,
    /// Mandibular arch
    Lower,
}

impl Arcade {
    /// The other arcade.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Upper => Self::Lower,
            Self::Lower => Self::Upper,
        }
    }
}

/// Two fixed, ordered tooth sequences used purely for layout.
///
/// The sequences are supplied by the caller and not validated; the default
/// is the permanent dentition as seen facing the patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArcadeLayout {
    /// Upper arcade, left to right on screen
    pub upper: [ToothId; ARCADE_LEN],
    /// Lower arcade, left to right on screen
    pub lower: [ToothId; ARCADE_LEN],
}

const fn ids(numbers: [u8; ARCADE_LEN]) -> [ToothId; ARCADE_LEN] {
    let mut out = [ToothId(0); ARCADE_LEN];
    let mut i = 0;
    while i < ARCADE_LEN {
        out[i] = ToothId(numbers[i]);
        i += 1;
    }
    out
}

impl ArcadeLayout {
    /// Permanent dentition in FDI notation.
    pub const PERMANENT: Self = Self {
        upper: ids([18, 17, 16, 15, 14, 13, 12, 11, 21, 22, 23, 24, 25, 26, 27, 28]),
        lower: ids([48, 47, 46, 45, 44, 43, 42, 41, 31, 32, 33, 34, 35, 36, 37, 38]),
    };

    /// Creates a layout from caller-supplied sequences.
    #[must_use]
    pub const fn new(upper: [ToothId; ARCADE_LEN], lower: [ToothId; ARCADE_LEN]) -> Self {
        Self { upper, lower }
    }

    /// Teeth of one arcade in display order.
    #[must_use]
    pub const fn row(&self, arcade: Arcade) -> &[ToothId; ARCADE_LEN] {
        match arcade {
            Arcade::Upper => &self.upper,
            Arcade::Lower => &self.lower,
        }
    }

    /// Tooth at a display slot, clamping the column to the row.
    #[must_use]
    pub fn tooth_at(&self, arcade: Arcade, column: usize) -> ToothId {
        self.row(arcade)[column.min(ARCADE_LEN - 1)]
    }

    /// Display slot of a tooth, if it appears in either arcade.
    #[must_use]
    pub fn locate(&self, id: ToothId) -> Option<(Arcade, usize)> {
        [Arcade::Upper, Arcade::Lower].into_iter().find_map(|arcade| {
            self.row(arcade)
                .iter()
                .position(|t| *t == id)
                .map(|column| (arcade, column))
        })
    }
}

impl Default for ArcadeLayout {
    fn default() -> Self {
        Self::PERMANENT
    }
}
