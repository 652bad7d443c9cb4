//! Tooth identifiers and per-tooth surface maps.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::models::{Surface, TreatmentKind};

/// Tooth number in two-digit dental notation (e.g. 16, 48, 55).
///
/// Treated as an opaque key: the only operations are identity and ordering.
/// Any value is accepted; unknown numbers simply become new chart entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToothId(pub u8);

impl ToothId {
    /// Raw tooth number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }
}

impl From<u8> for ToothId {
    fn from(number: u8) -> Self {
        Self(number)
    }
}

impl fmt::Display for ToothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ToothId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map(Self)
            .map_err(|e| anyhow::anyhow!("Invalid tooth id '{s}': {e}"))
    }
}

/// Treatment state of the five surfaces of one tooth.
///
/// Keys are fixed; each value is independently optional. A map holding
/// `extraction` on one surface holds it on all five when built through
/// [`Chart`](crate::models::Chart).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ToothSurfaceMap {
    surfaces: [Option<TreatmentKind>; 5],
}

impl ToothSurfaceMap {
    /// A map with every surface untreated.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            surfaces: [None; 5],
        }
    }

    /// A map with every surface holding `kind`.
    #[must_use]
    pub const fn filled(kind: TreatmentKind) -> Self {
        Self {
            surfaces: [Some(kind); 5],
        }
    }

    /// Treatment on `surface`, if any.
    #[must_use]
    pub const fn get(&self, surface: Surface) -> Option<TreatmentKind> {
        self.surfaces[surface.index()]
    }

    /// Sets exactly one surface. Invariant enforcement lives in `Chart`.
    pub fn set(&mut self, surface: Surface, treatment: Option<TreatmentKind>) {
        self.surfaces[surface.index()] = treatment;
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, surface: Surface, treatment: TreatmentKind) -> Self {
        self.set(surface, Some(treatment));
        self
    }

    /// Iterates all five surfaces with their values, in rendering order.
    pub fn iter(&self) -> impl Iterator<Item = (Surface, Option<TreatmentKind>)> + '_ {
        Surface::ALL.into_iter().map(|s| (s, self.get(s)))
    }

    /// Iterates only the surfaces that carry a treatment.
    pub fn treated(&self) -> impl Iterator<Item = (Surface, TreatmentKind)> + '_ {
        self.iter().filter_map(|(s, t)| t.map(|t| (s, t)))
    }

    /// True when no surface carries a treatment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.iter().all(Option::is_none)
    }

    /// True when any surface holds `kind`.
    #[must_use]
    pub fn contains(&self, kind: TreatmentKind) -> bool {
        self.surfaces.contains(&Some(kind))
    }
}

impl Serialize for ToothSurfaceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (surface, kind) in self.treated() {
            map.serialize_entry(surface.as_str(), kind.as_str())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tooth_id_parse() {
        assert_eq!("16".parse::<ToothId>().unwrap(), ToothId(16));
        assert_eq!(" 48 ".parse::<ToothId>().unwrap(), ToothId(48));
        assert!("abc".parse::<ToothId>().is_err());
        assert!("300".parse::<ToothId>().is_err());
        assert!("-1".parse::<ToothId>().is_err());
    }

    #[test]
    fn test_empty_map() {
        let map = ToothSurfaceMap::empty();
        assert!(map.is_empty());
        assert_eq!(map.treated().count(), 0);
        assert!(Surface::ALL.iter().all(|s| map.get(*s).is_none()));
    }

    #[test]
    fn test_set_single_surface() {
        let mut map = ToothSurfaceMap::empty();
        map.set(Surface::Mesial, Some(TreatmentKind::Caries));

        assert_eq!(map.get(Surface::Mesial), Some(TreatmentKind::Caries));
        assert_eq!(map.treated().count(), 1);
        assert!(map.contains(TreatmentKind::Caries));
        assert!(!map.contains(TreatmentKind::Implant));

        map.set(Surface::Mesial, None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_serialize_omits_untreated() {
        let map = ToothSurfaceMap::empty()
            .with(Surface::Occlusal, TreatmentKind::Restoration)
            .with(Surface::Distal, TreatmentKind::Caries);

        let json = serde_json::to_value(map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"distal": "caries", "occlusal": "restoration"})
        );
    }
}
