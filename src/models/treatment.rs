//! Treatment vocabulary: the closed set of clinical findings a surface can carry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::RgbColor;

/// Color of a surface with no treatment recorded.
pub const UNTREATED_COLOR: RgbColor = RgbColor::new(0xff, 0xff, 0xff);

/// Clinical treatment or finding recorded on a tooth surface.
///
/// "No treatment" is not a member; an untouched surface is `None` in a
/// [`ToothSurfaceMap`](crate::models::ToothSurfaceMap).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreatmentKind {
    /// Active decay
    Caries,
    /// Completed filling or crown work
    Restoration,
    /// Root canal treatment
    Canal,
    /// Tooth removed; always applies to the whole tooth
    Extraction,
    /// Implant in place of the natural tooth
    Implant,
}

impl TreatmentKind {
    /// All kinds in tool palette order.
    pub const ALL: [Self; 5] = [
        Self::Caries,
        Self::Restoration,
        Self::Canal,
        Self::Extraction,
        Self::Implant,
    ];

    /// Canonical display color.
    #[must_use]
    pub const fn color(self) -> RgbColor {
        match self {
            Self::Caries => RgbColor::new(0xef, 0x44, 0x44),
            Self::Restoration => RgbColor::new(0x3b, 0x82, 0xf6),
            Self::Canal => RgbColor::new(0x22, 0xc5, 0x5e),
            Self::Implant => RgbColor::new(0xa8, 0x55, 0xf7),
            Self::Extraction => RgbColor::new(0x1f, 0x29, 0x37),
        }
    }

    /// Wire name used in snapshots ("caries", "restoration", ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Caries => "caries",
            Self::Restoration => "restoration",
            Self::Canal => "canal",
            Self::Extraction => "extraction",
            Self::Implant => "implant",
        }
    }

    /// Human-readable label for palettes and legends.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Caries => "Caries",
            Self::Restoration => "Restoration",
            Self::Canal => "Root canal",
            Self::Extraction => "Extraction",
            Self::Implant => "Implant",
        }
    }
}

impl fmt::Display for TreatmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TreatmentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown treatment kind '{s}'"))
    }
}

/// Color for an optional treatment, falling back to [`UNTREATED_COLOR`].
#[must_use]
pub const fn treatment_color(treatment: Option<TreatmentKind>) -> RgbColor {
    match treatment {
        Some(kind) => kind.color(),
        None => UNTREATED_COLOR,
    }
}

/// Tool held by the charting controller.
///
/// `Erase` is a tool in its own right; there is no "nothing selected" state.
/// Serialized as the treatment's wire name or `"erase"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Tool {
    /// Record a treatment kind
    Apply(TreatmentKind),
    /// Clear the clicked surface
    Erase,
}

impl Tool {
    /// The treatment this tool writes, `None` for the eraser.
    #[must_use]
    pub const fn treatment(self) -> Option<TreatmentKind> {
        match self {
            Self::Apply(kind) => Some(kind),
            Self::Erase => None,
        }
    }

    /// Label for status lines.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Apply(kind) => kind.display_name(),
            Self::Erase => "Eraser",
        }
    }
}

impl Default for Tool {
    fn default() -> Self {
        Self::Apply(TreatmentKind::Caries)
    }
}

impl From<Option<TreatmentKind>> for Tool {
    fn from(treatment: Option<TreatmentKind>) -> Self {
        treatment.map_or(Self::Erase, Self::Apply)
    }
}

impl From<TreatmentKind> for Tool {
    fn from(kind: TreatmentKind) -> Self {
        Self::Apply(kind)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Apply(kind) => f.write_str(kind.as_str()),
            Self::Erase => f.write_str("erase"),
        }
    }
}

impl FromStr for Tool {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "erase" {
            Ok(Self::Erase)
        } else {
            s.parse::<TreatmentKind>().map(Self::Apply)
        }
    }
}

impl From<Tool> for String {
    fn from(tool: Tool) -> Self {
        tool.to_string()
    }
}

impl TryFrom<String> for Tool {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
