//! Scenario presets: named lever bundles that seed a scenario directly.

use serde::Serialize;

use super::levers::LeverId;

/// A named what-if bundle.
///
/// `headline_impact` (USD millions) and `headline_confidence` (percent) are
/// static annotations authored alongside the preset for comparison cards.
/// They are NOT derived from the impact calculator and can disagree with a
/// live `compute_impact` over the same bundle; both values are kept on
/// purpose rather than recomputed.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Partial lever mapping; levers not listed reset to 0 on apply.
    pub bundle: &'static [(LeverId, f64)],
    pub headline_impact: f64,
    pub headline_confidence: f64,
}

const PRESETS: &[ScenarioPreset] = &[
    ScenarioPreset {
        id: "tariff-escalation",
        name: "Tariff Escalation",
        description: "25% import tariffs with partial price pass-through, \
                      share erosion and costlier sourcing",
        bundle: &[
            (LeverId::Tariffs, 25.0),
            (LeverId::MarketShare, -2.0),
            (LeverId::PriceChange, 3.0),
            (LeverId::MaterialInflation, 2.0),
        ],
        headline_impact: -850.0,
        headline_confidence: 72.0,
    },
    ScenarioPreset {
        id: "recession",
        name: "Recession Scenario",
        description: "Broad demand contraction: volumes and prices fall, \
                      financing costs rise, marketing is pulled back",
        bundle: &[
            (LeverId::VolumeGrowth, -12.0),
            (LeverId::PriceChange, -5.0),
            (LeverId::MarketShare, -3.0),
            (LeverId::InterestRates, 3.0),
            (LeverId::MarketingSpend, -10.0),
        ],
        headline_impact: -1_400.0,
        headline_confidence: 65.0,
    },
    ScenarioPreset {
        id: "moderate-tariffs",
        name: "Moderate Tariffs",
        description: "10% tariffs with limited pricing response and mild \
                      input-cost drift",
        bundle: &[
            (LeverId::Tariffs, 10.0),
            (LeverId::MaterialInflation, 1.0),
            (LeverId::PriceChange, 1.0),
        ],
        headline_impact: -320.0,
        headline_confidence: 80.0,
    },
    ScenarioPreset {
        id: "growth",
        name: "Growth Scenario",
        description: "Share gains and firm pricing on top of strong volume, \
                      helped by productivity and efficiency programs",
        bundle: &[
            (LeverId::MarketShare, 2.0),
            (LeverId::PriceChange, 2.0),
            (LeverId::VolumeGrowth, 8.0),
            (LeverId::LaborProductivity, 3.0),
            (LeverId::OperationalEfficiency, 5.0),
        ],
        headline_impact: 980.0,
        headline_confidence: 68.0,
    },
];

/// The ordered preset catalog.
#[must_use]
pub fn presets() -> &'static [ScenarioPreset] {
    PRESETS
}

/// Look up a preset by its stable id.
#[must_use]
pub fn find_preset(id: &str) -> Option<&'static ScenarioPreset> {
    PRESETS.iter().find(|preset| preset.id == id)
}
