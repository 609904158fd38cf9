//! Lever registry: the catalog of adjustable financial drivers.
//!
//! Every lever is a bounded percentage input. The registry is static and
//! ordered; the active values live in a `LeverValues` mapping, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLeverIdError;

/// Identifier for a financial lever.
///
/// `OperationalEfficiency` is a bundle-only id: it can appear in scenario
/// preset bundles but carries no registry entry and no weight in the P&L
/// calculator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum LeverId {
    Tariffs,
    MarketShare,
    VolumeGrowth,
    PriceChange,
    MaterialInflation,
    SupplyChain,
    LaborProductivity,
    WarrantyCosts,
    MarketingSpend,
    InterestRates,
    FxRate,
    OperationalEfficiency,
}

impl LeverId {
    /// Stable kebab-case identifier, matching the serialized form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LeverId::Tariffs => "tariffs",
            LeverId::MarketShare => "market-share",
            LeverId::VolumeGrowth => "volume-growth",
            LeverId::PriceChange => "price-change",
            LeverId::MaterialInflation => "material-inflation",
            LeverId::SupplyChain => "supply-chain",
            LeverId::LaborProductivity => "labor-productivity",
            LeverId::WarrantyCosts => "warranty-costs",
            LeverId::MarketingSpend => "marketing-spend",
            LeverId::InterestRates => "interest-rates",
            LeverId::FxRate => "fx-rate",
            LeverId::OperationalEfficiency => "operational-efficiency",
        }
    }
}

impl fmt::Display for LeverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeverId {
    type Err = ParseLeverIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tariffs" => Ok(LeverId::Tariffs),
            "market-share" => Ok(LeverId::MarketShare),
            "volume-growth" => Ok(LeverId::VolumeGrowth),
            "price-change" => Ok(LeverId::PriceChange),
            "material-inflation" => Ok(LeverId::MaterialInflation),
            "supply-chain" => Ok(LeverId::SupplyChain),
            "labor-productivity" => Ok(LeverId::LaborProductivity),
            "warranty-costs" => Ok(LeverId::WarrantyCosts),
            "marketing-spend" => Ok(LeverId::MarketingSpend),
            "interest-rates" => Ok(LeverId::InterestRates),
            "fx-rate" => Ok(LeverId::FxRate),
            "operational-efficiency" => Ok(LeverId::OperationalEfficiency),
            other => Err(ParseLeverIdError(other.to_string())),
        }
    }
}

/// Grouping label for dashboard display. Informational only; the calculator
/// never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverCategory {
    MarketAndDemand,
    PricingPower,
    VolumeGrowth,
    Operations,
    Financial,
}

impl fmt::Display for LeverCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LeverCategory::MarketAndDemand => "Market & Demand",
            LeverCategory::PricingPower => "Pricing Power",
            LeverCategory::VolumeGrowth => "Volume Growth",
            LeverCategory::Operations => "Operations",
            LeverCategory::Financial => "Financial",
        };
        f.write_str(label)
    }
}

/// Qualitative weight tag shown next to each slider. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactWeight {
    High,
    Medium,
    Low,
}

impl fmt::Display for ImpactWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImpactWeight::High => "High",
            ImpactWeight::Medium => "Medium",
            ImpactWeight::Low => "Low",
        };
        f.write_str(label)
    }
}

/// A named, bounded financial input.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Lever {
    pub id: LeverId,
    pub name: &'static str,
    pub category: LeverCategory,
    /// Starting value for a fresh scenario. Always 0 ("no change").
    pub default_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub unit: &'static str,
    pub impact: ImpactWeight,
}

impl Lever {
    /// Clamp a requested setting into this lever's inclusive bounds.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_value, self.max_value)
    }

    /// Width of the adjustable range, used by the simulator's perturbation.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max_value - self.min_value
    }
}

const LEVERS: &[Lever] = &[
    Lever {
        id: LeverId::Tariffs,
        name: "Import Tariffs",
        category: LeverCategory::MarketAndDemand,
        default_value: 0.0,
        min_value: 0.0,
        max_value: 50.0,
        unit: "%",
        impact: ImpactWeight::High,
    },
    Lever {
        id: LeverId::MarketShare,
        name: "Market Share Shift",
        category: LeverCategory::MarketAndDemand,
        default_value: 0.0,
        min_value: -10.0,
        max_value: 10.0,
        unit: "%",
        impact: ImpactWeight::High,
    },
    Lever {
        id: LeverId::VolumeGrowth,
        name: "Volume Growth",
        category: LeverCategory::VolumeGrowth,
        default_value: 0.0,
        min_value: -20.0,
        max_value: 20.0,
        unit: "%",
        impact: ImpactWeight::High,
    },
    Lever {
        id: LeverId::PriceChange,
        name: "Average Price Change",
        category: LeverCategory::PricingPower,
        default_value: 0.0,
        min_value: -15.0,
        max_value: 15.0,
        unit: "%",
        impact: ImpactWeight::High,
    },
    Lever {
        id: LeverId::MaterialInflation,
        name: "Material Cost Inflation",
        category: LeverCategory::Operations,
        default_value: 0.0,
        min_value: -10.0,
        max_value: 40.0,
        unit: "%",
        impact: ImpactWeight::High,
    },
    Lever {
        id: LeverId::SupplyChain,
        name: "Supply Chain Efficiency",
        category: LeverCategory::Operations,
        default_value: 0.0,
        min_value: -30.0,
        max_value: 30.0,
        unit: "%",
        impact: ImpactWeight::Medium,
    },
    Lever {
        id: LeverId::LaborProductivity,
        name: "Labor Productivity",
        category: LeverCategory::Operations,
        default_value: 0.0,
        min_value: -10.0,
        max_value: 15.0,
        unit: "%",
        impact: ImpactWeight::Medium,
    },
    Lever {
        id: LeverId::WarrantyCosts,
        name: "Warranty Costs",
        category: LeverCategory::Operations,
        default_value: 0.0,
        min_value: -25.0,
        max_value: 50.0,
        unit: "%",
        impact: ImpactWeight::Low,
    },
    Lever {
        id: LeverId::MarketingSpend,
        name: "Marketing Spend",
        category: LeverCategory::PricingPower,
        default_value: 0.0,
        min_value: -30.0,
        max_value: 30.0,
        unit: "%",
        impact: ImpactWeight::Medium,
    },
    Lever {
        id: LeverId::InterestRates,
        name: "Interest Rates",
        category: LeverCategory::Financial,
        default_value: 0.0,
        min_value: -5.0,
        max_value: 10.0,
        unit: "%",
        impact: ImpactWeight::Low,
    },
    Lever {
        id: LeverId::FxRate,
        name: "FX Rate Movement",
        category: LeverCategory::Financial,
        default_value: 0.0,
        min_value: -20.0,
        max_value: 20.0,
        unit: "%",
        impact: ImpactWeight::Low,
    },
];

/// The ordered lever registry (11 entries).
#[must_use]
pub fn levers() -> &'static [Lever] {
    LEVERS
}

/// Look up a registry entry by id. Bundle-only ids return `None`.
#[must_use]
pub fn find_lever(id: LeverId) -> Option<&'static Lever> {
    LEVERS.iter().find(|lever| lever.id == id)
}

/// Clamp a value into a lever's bounds, passing it through unchanged for
/// ids without a registry entry.
#[must_use]
pub fn clamp_to_bounds(id: LeverId, value: f64) -> f64 {
    match find_lever(id) {
        Some(lever) => lever.clamp(value),
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_eleven_ordered_levers() {
        assert_eq!(levers().len(), 11);
        assert_eq!(levers()[0].id, LeverId::Tariffs);
        assert_eq!(levers()[10].id, LeverId::FxRate);
    }

    #[test]
    fn test_registry_covers_all_categories() {
        let categories: Vec<_> = levers().iter().map(|l| l.category).collect();
        assert!(categories.contains(&LeverCategory::MarketAndDemand));
        assert!(categories.contains(&LeverCategory::PricingPower));
        assert!(categories.contains(&LeverCategory::VolumeGrowth));
        assert!(categories.contains(&LeverCategory::Operations));
        assert!(categories.contains(&LeverCategory::Financial));
    }

    #[test]
    fn test_bounds_are_well_formed() {
        for lever in levers() {
            assert!(
                lever.min_value < lever.max_value,
                "{} has inverted bounds",
                lever.id
            );
            assert!(lever.clamp(lever.default_value) == lever.default_value);
            assert_eq!(lever.unit, "%");
        }
    }

    #[test]
    fn test_operational_efficiency_is_not_in_registry() {
        assert!(find_lever(LeverId::OperationalEfficiency).is_none());
        // Unregistered ids pass through unclamped
        assert_eq!(clamp_to_bounds(LeverId::OperationalEfficiency, 500.0), 500.0);
    }

    #[test]
    fn test_lever_id_round_trips_through_str() {
        for lever in levers() {
            let parsed: LeverId = lever.id.as_str().parse().unwrap();
            assert_eq!(parsed, lever.id);
        }
        assert!("flux-capacitor".parse::<LeverId>().is_err());
    }
}
