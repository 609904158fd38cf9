//! The mutable scenario state: a mapping from lever id to its current
//! percentage setting.
//!
//! Missing ids read as 0 ("no change"). Writes to registry levers clamp
//! into the lever's bounds; bundle-only ids are stored as given.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::{LeverId, ScenarioPreset, clamp_to_bounds, levers};

/// Lever-value mapping for one scenario session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeverValues(FxHashMap<LeverId, f64>);

impl LeverValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current setting for a lever; absent ids read as 0.
    #[must_use]
    pub fn get(&self, id: LeverId) -> f64 {
        self.0.get(&id).copied().unwrap_or(0.0)
    }

    /// Set a lever, clamping into its registry bounds. Returns the value
    /// actually stored.
    pub fn set(&mut self, id: LeverId, value: f64) -> f64 {
        let clamped = clamp_to_bounds(id, value);
        self.0.insert(id, clamped);
        clamped
    }

    /// Replace the whole mapping with a preset: every registry lever resets
    /// to its default, then the preset's bundle overlays its own values.
    /// Prior manual adjustments to unlisted levers do not survive.
    pub fn apply_preset(&mut self, preset: &ScenarioPreset) {
        self.0.clear();
        for lever in levers() {
            self.0.insert(lever.id, lever.default_value);
        }
        for (id, value) in preset.bundle {
            self.set(*id, *value);
        }
    }

    /// Overlay another mapping onto this one, re-clamping each value.
    /// Levers absent from `other` keep their current setting.
    pub fn merge(&mut self, other: &LeverValues) {
        for (id, value) in &other.0 {
            self.set(*id, *value);
        }
    }

    /// Reset every stored lever back to 0.
    pub fn reset(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate stored entries in arbitrary order. For display, iterate the
    /// registry instead and call [`get`](Self::get).
    pub fn iter(&self) -> impl Iterator<Item = (LeverId, f64)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }

    /// True when every stored lever sits at 0.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.0.values().all(|v| *v == 0.0)
    }
}

impl FromIterator<(LeverId, f64)> for LeverValues {
    fn from_iter<I: IntoIterator<Item = (LeverId, f64)>>(iter: I) -> Self {
        let mut values = LeverValues::new();
        for (id, value) in iter {
            values.set(id, value);
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::find_preset;

    #[test]
    fn test_missing_levers_read_as_zero() {
        let values = LeverValues::new();
        assert_eq!(values.get(LeverId::Tariffs), 0.0);
        assert!(values.is_empty());
    }

    #[test]
    fn test_set_clamps_to_registry_bounds() {
        let mut values = LeverValues::new();
        assert_eq!(values.set(LeverId::Tariffs, 75.0), 50.0);
        assert_eq!(values.set(LeverId::Tariffs, -5.0), 0.0);
        assert_eq!(values.set(LeverId::MarketingSpend, -45.0), -30.0);
        assert_eq!(values.get(LeverId::MarketingSpend), -30.0);
    }

    #[test]
    fn test_set_is_idempotent() {
        let mut values = LeverValues::new();
        values.set(LeverId::PriceChange, 7.5);
        let snapshot = values.clone();
        values.set(LeverId::PriceChange, 7.5);
        assert_eq!(values, snapshot);
    }

    #[test]
    fn test_apply_preset_overwrites_everything() {
        let mut values = LeverValues::new();
        values.set(LeverId::WarrantyCosts, 20.0);

        let preset = find_preset("moderate-tariffs").unwrap();
        values.apply_preset(preset);

        assert_eq!(values.get(LeverId::Tariffs), 10.0);
        assert_eq!(values.get(LeverId::MaterialInflation), 1.0);
        assert_eq!(values.get(LeverId::PriceChange), 1.0);
        // Manual adjustment from before the preset is gone
        assert_eq!(values.get(LeverId::WarrantyCosts), 0.0);
        assert_eq!(values.len(), 11);
    }

    #[test]
    fn test_bundle_only_ids_survive_preset_application() {
        let mut values = LeverValues::new();
        values.apply_preset(find_preset("growth").unwrap());

        assert_eq!(values.get(LeverId::OperationalEfficiency), 5.0);
        // 11 registry levers plus the bundle-only id
        assert_eq!(values.len(), 12);
    }

    #[test]
    fn test_merge_overlays_and_reclamps() {
        let mut session = LeverValues::new();
        session.set(LeverId::VolumeGrowth, 5.0);
        session.set(LeverId::FxRate, -3.0);

        let parsed: LeverValues =
            [(LeverId::VolumeGrowth, -12.0), (LeverId::Tariffs, 80.0)].into_iter().collect();
        session.merge(&parsed);

        assert_eq!(session.get(LeverId::VolumeGrowth), -12.0);
        assert_eq!(session.get(LeverId::Tariffs), 50.0);
        assert_eq!(session.get(LeverId::FxRate), -3.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut values = LeverValues::new();
        values.set(LeverId::Tariffs, 25.0);
        values.set(LeverId::MarketShare, -2.0);

        let json = serde_json::to_string(&values).unwrap();
        assert!(json.contains("\"tariffs\""));
        assert!(json.contains("\"market-share\""));

        let back: LeverValues = serde_json::from_str(&json).unwrap();
        assert_eq!(back, values);
    }
}
