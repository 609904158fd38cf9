//! Pro-forma P&L statement types and the fixed baseline book.

use serde::{Deserialize, Serialize};

/// Baseline reference constants in USD millions, representing a $31B-revenue
/// automotive book. Impacts are always deltas against these values.
pub mod baseline {
    pub const REVENUE: f64 = 31_000.0;
    /// 60% of revenue.
    pub const PASSENGER_VEHICLES: f64 = 18_600.0;
    /// 15% of revenue.
    pub const COMMERCIAL_VEHICLES: f64 = 4_650.0;
    /// 25% of revenue.
    pub const PARTS_SERVICES: f64 = 7_750.0;

    pub const MATERIALS: f64 = 10_850.0;
    pub const LABOR: f64 = 4_650.0;
    pub const MANUFACTURING_OVERHEAD: f64 = 3_100.0;
    pub const COGS: f64 = MATERIALS + LABOR + MANUFACTURING_OVERHEAD;

    pub const GROSS_PROFIT: f64 = REVENUE - COGS;

    pub const RESEARCH_DEVELOPMENT: f64 = 2_325.0;
    pub const MARKETING: f64 = 1_550.0;
    pub const WARRANTY: f64 = 775.0;
    pub const SGA: f64 = 3_100.0;
    pub const OTHER_OPEX: f64 = 775.0;
    pub const OPERATING_EXPENSES: f64 =
        RESEARCH_DEVELOPMENT + MARKETING + WARRANTY + SGA + OTHER_OPEX;

    pub const EBIT: f64 = GROSS_PROFIT - OPERATING_EXPENSES;
    pub const INTEREST: f64 = 350.0;
    pub const EBT: f64 = EBIT - INTEREST;

    pub const TAX_RATE: f64 = 0.25;
    pub const TAX: f64 = EBT * TAX_RATE;
    pub const NET_INCOME: f64 = EBT - TAX;

    /// EBIT / revenue at baseline, in percent. Exactly 12.5.
    pub const EBIT_MARGIN: f64 = EBIT / REVENUE * 100.0;
}

/// One statement line: the fixed baseline value and the scenario delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub base: f64,
    pub impact: f64,
}

impl LineItem {
    #[must_use]
    pub fn new(base: f64, impact: f64) -> Self {
        Self { base, impact }
    }

    /// Baseline plus scenario delta.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.base + self.impact
    }
}

/// Full pro-forma P&L produced by the impact calculator.
///
/// Aggregate lines always equal the algebraic sum of their children:
/// revenue is the three segments, COGS the three cost components, operating
/// expenses the five expense components, and the subtotals cascade from
/// there down to net income at a fixed 25% tax rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProFormaStatement {
    pub revenue: LineItem,
    pub passenger_vehicles: LineItem,
    pub commercial_vehicles: LineItem,
    pub parts_services: LineItem,

    pub cogs: LineItem,
    pub materials: LineItem,
    pub labor: LineItem,
    pub manufacturing_overhead: LineItem,

    pub gross_profit: LineItem,

    pub operating_expenses: LineItem,
    pub research_development: LineItem,
    pub marketing: LineItem,
    pub warranty: LineItem,
    pub sga: LineItem,
    pub other_opex: LineItem,

    pub ebit: LineItem,
    pub interest: LineItem,
    pub ebt: LineItem,
    pub tax: LineItem,
    pub net_income: LineItem,

    /// Absolute margin in percent, not a delta. 12.5 at baseline.
    pub ebit_margin: f64,
}
