//! Anatomical tooth surfaces.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five faces of a tooth on which a treatment can be recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Facing the lips or cheek
    Vestibular,
    /// Facing the tongue or palate
    Lingual,
    /// Toward the midline of the arch
    Mesial,
    /// Away from the midline of the arch
    Distal,
    /// Chewing surface
    Occlusal,
}

impl Surface {
    /// All surfaces in rendering order (top, bottom, left, right, center of the face diagram).
    pub const ALL: [Self; 5] = [
        Self::Vestibular,
        Self::Lingual,
        Self::Mesial,
        Self::Distal,
        Self::Occlusal,
    ];

    /// Wire name used in snapshots.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vestibular => "vestibular",
            Self::Lingual => "lingual",
            Self::Mesial => "mesial",
            Self::Distal => "distal",
            Self::Occlusal => "occlusal",
        }
    }

    /// Single-letter abbreviation used in compact terminal labels.
    #[must_use]
    pub const fn abbreviation(self) -> char {
        match self {
            Self::Vestibular => 'V',
            Self::Lingual => 'L',
            Self::Mesial => 'M',
            Self::Distal => 'D',
            Self::Occlusal => 'O',
        }
    }

    /// Position of this surface in [`Surface::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Vestibular => 0,
            Self::Lingual => 1,
            Self::Mesial => 2,
            Self::Distal => 3,
            Self::Occlusal => 4,
        }
    }

    /// Next surface in rendering order, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous surface in rendering order, wrapping around.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Surface {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|surface| surface.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown surface '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, surface) in Surface::ALL.iter().enumerate() {
            assert_eq!(surface.index(), i);
        }
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Surface::Occlusal.next(), Surface::Vestibular);
        assert_eq!(Surface::Vestibular.previous(), Surface::Occlusal);
        assert_eq!(Surface::Mesial.next().previous(), Surface::Mesial);
    }

    #[test]
    fn test_parse() {
        assert_eq!("distal".parse::<Surface>().unwrap(), Surface::Distal);
        assert!("buccal".parse::<Surface>().is_err());
        assert!("".parse::<Surface>().is_err());
    }
}
