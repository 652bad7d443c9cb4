//! The chart: single source of truth for one patient's mouth.

use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{Surface, ToothId, ToothSurfaceMap, TreatmentKind};

/// Plain nested mapping used for persistence: tooth id -> surface name -> treatment name.
///
/// Untreated surfaces and teeth with nothing charted are omitted.
pub type ChartSnapshot = BTreeMap<String, BTreeMap<String, String>>;

/// Mapping from tooth id to its surface map.
///
/// Teeth absent from the mapping are untreated. The whole-tooth extraction
/// invariant is maintained by [`Chart::set_surface`]: a tooth either holds
/// `extraction` on all five surfaces or on none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chart {
    teeth: BTreeMap<ToothId, ToothSurfaceMap>,
}

impl Chart {
    /// Creates an empty chart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface map for `id`; an all-empty map when the tooth was never charted.
    #[must_use]
    pub fn get_tooth(&self, id: ToothId) -> ToothSurfaceMap {
        self.teeth.get(&id).copied().unwrap_or_default()
    }

    /// Writes one surface and returns the tooth's resulting map.
    ///
    /// - `extraction` on any surface marks all five surfaces extracted.
    /// - Any other value written to an extracted tooth first resets that tooth,
    ///   then writes the single surface.
    /// - Otherwise only `surface` changes.
    ///
    /// Erasing is "any other value" too: erasing one surface of an extracted
    /// tooth clears all five. Keeping the other four as `extraction` would
    /// leave a partial extraction, which a surface map may never hold, so
    /// here the whole-tooth rule wins over "the eraser touches one surface".
    pub fn set_surface(
        &mut self,
        id: ToothId,
        surface: Surface,
        treatment: Option<TreatmentKind>,
    ) -> ToothSurfaceMap {
        let mut map = self.get_tooth(id);

        if treatment == Some(TreatmentKind::Extraction) {
            map = ToothSurfaceMap::filled(TreatmentKind::Extraction);
        } else {
            if map.contains(TreatmentKind::Extraction) {
                map = ToothSurfaceMap::empty();
            }
            map.set(surface, treatment);
        }

        self.store(id, map);
        map
    }

    /// Removes every treatment from a tooth.
    pub fn clear_tooth(&mut self, id: ToothId) {
        self.teeth.remove(&id);
    }

    /// True when no tooth carries any treatment.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teeth.is_empty()
    }

    /// Ids of teeth with at least one treated surface, in ascending order.
    pub fn charted_teeth(&self) -> impl Iterator<Item = ToothId> + '_ {
        self.teeth.keys().copied()
    }

    /// Exports the chart as a plain nested mapping.
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        self.teeth
            .iter()
            .map(|(id, map)| {
                let surfaces = map
                    .treated()
                    .map(|(surface, kind)| (surface.as_str().to_string(), kind.as_str().to_string()))
                    .collect();
                (id.to_string(), surfaces)
            })
            .collect()
    }

    /// Rebuilds a chart from a snapshot.
    ///
    /// Unknown tooth keys, surface names and treatment names are dropped
    /// without failing. A tooth carrying `extraction` anywhere is restored
    /// as fully extracted.
    #[must_use]
    pub fn restore(snapshot: &ChartSnapshot) -> Self {
        let mut chart = Self::new();

        for (tooth_key, surfaces) in snapshot {
            let Ok(id) = tooth_key.parse::<ToothId>() else {
                debug!("Ignoring unrecognized tooth key '{}' in chart snapshot", tooth_key);
                continue;
            };

            let mut map = ToothSurfaceMap::empty();
            for (surface_key, treatment_key) in surfaces {
                let Ok(surface) = surface_key.parse::<Surface>() else {
                    debug!("Ignoring unrecognized surface '{}' on tooth {}", surface_key, id);
                    continue;
                };
                let Ok(kind) = treatment_key.parse::<TreatmentKind>() else {
                    debug!(
                        "Ignoring unrecognized treatment '{}' on tooth {} {}",
                        treatment_key, id, surface
                    );
                    continue;
                };
                map.set(surface, Some(kind));
            }

            if map.contains(TreatmentKind::Extraction) {
                map = ToothSurfaceMap::filled(TreatmentKind::Extraction);
            }
            chart.store(id, map);
        }

        chart
    }

    /// Rebuilds a chart from loosely-typed JSON in snapshot shape.
    ///
    /// Anything that is not an object of objects of strings is skipped, so
    /// payloads written by older or newer versions still load.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Self {
        let Some(teeth) = value.as_object() else {
            debug!("Chart payload is not an object; starting empty");
            return Self::new();
        };

        let snapshot: ChartSnapshot = teeth
            .iter()
            .filter_map(|(tooth_key, surfaces)| {
                let surfaces = surfaces.as_object()?;
                let surfaces = surfaces
                    .iter()
                    .filter_map(|(surface_key, treatment)| {
                        treatment
                            .as_str()
                            .map(|t| (surface_key.clone(), t.to_string()))
                    })
                    .collect();
                Some((tooth_key.clone(), surfaces))
            })
            .collect();

        Self::restore(&snapshot)
    }

    fn store(&mut self, id: ToothId, map: ToothSurfaceMap) {
        if map.is_empty() {
            self.teeth.remove(&id);
        } else {
            self.teeth.insert(id, map);
        }
    }
}
