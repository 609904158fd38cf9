//! P&L impact calculator.
//!
//! Pure function from a lever-value mapping to a full pro-forma statement.
//! Each line's impact is a weighted linear combination of lever values
//! against the fixed baseline book; aggregates are exact sums of their
//! children, so the statement always foots.

use crate::model::{LeverId, LineItem, ProFormaStatement, baseline};
use crate::scenario::LeverValues;

/// Compute the pro-forma statement for the given lever settings.
///
/// Missing levers contribute 0. Out-of-range values are used as passed;
/// writers (`LeverValues::set`, the parser, the optimizer) clamp before
/// anything reaches this function.
#[must_use]
pub fn compute_impact(levers: &LeverValues) -> ProFormaStatement {
    let volume = levers.get(LeverId::VolumeGrowth) / 100.0;
    let price = levers.get(LeverId::PriceChange) / 100.0;
    let share = levers.get(LeverId::MarketShare) / 100.0;
    let tariffs = levers.get(LeverId::Tariffs) / 100.0;
    let material = levers.get(LeverId::MaterialInflation) / 100.0;
    let supply = levers.get(LeverId::SupplyChain) / 100.0;
    let labor_prod = levers.get(LeverId::LaborProductivity) / 100.0;
    let warranty = levers.get(LeverId::WarrantyCosts) / 100.0;
    let marketing = levers.get(LeverId::MarketingSpend) / 100.0;
    let rates = levers.get(LeverId::InterestRates) / 100.0;
    let fx = levers.get(LeverId::FxRate) / 100.0;

    // Revenue segments. Commercial and parts react less to volume, price
    // and share than the passenger book does.
    let passenger = baseline::PASSENGER_VEHICLES * (volume + price + 0.5 * share);
    let commercial = baseline::COMMERCIAL_VEHICLES * (0.8 * volume + 0.6 * price + 0.3 * share);
    let parts = baseline::PARTS_SERVICES * (0.6 * volume + 0.4 * price + 0.2 * share);
    let revenue = passenger + commercial + parts;

    // Cost of goods sold.
    let materials =
        baseline::MATERIALS * (volume + 0.8 * material + 0.5 * tariffs - 0.15 * supply);
    let labor = baseline::LABOR * (volume - 0.3 * labor_prod);
    let overhead = baseline::MANUFACTURING_OVERHEAD * (0.6 * volume - 0.1 * supply);
    let cogs = materials + labor + overhead;

    let gross_profit = revenue - cogs;

    // Operating expenses.
    let rd = baseline::RESEARCH_DEVELOPMENT * 0.2 * volume;
    let mkt = baseline::MARKETING * (marketing + 0.3 * volume);
    let warr = baseline::WARRANTY * (warranty + 0.6 * volume);
    let sga = baseline::SGA * (0.5 * volume - 0.2 * labor_prod);
    let other = baseline::OTHER_OPEX * 0.3 * volume;
    let opex = rd + mkt + warr + sga + other;

    let ebit = gross_profit - opex;
    let interest = baseline::INTEREST * (0.5 * rates + 0.1 * fx);
    let ebt = ebit - interest;
    let tax = ebt * baseline::TAX_RATE;
    let net_income = ebt - tax;

    let pro_forma_revenue = baseline::REVENUE + revenue;
    let ebit_margin = if pro_forma_revenue > 0.0 {
        (baseline::EBIT + ebit) / pro_forma_revenue * 100.0
    } else {
        baseline::EBIT_MARGIN
    };

    ProFormaStatement {
        revenue: LineItem::new(baseline::REVENUE, revenue),
        passenger_vehicles: LineItem::new(baseline::PASSENGER_VEHICLES, passenger),
        commercial_vehicles: LineItem::new(baseline::COMMERCIAL_VEHICLES, commercial),
        parts_services: LineItem::new(baseline::PARTS_SERVICES, parts),

        cogs: LineItem::new(baseline::COGS, cogs),
        materials: LineItem::new(baseline::MATERIALS, materials),
        labor: LineItem::new(baseline::LABOR, labor),
        manufacturing_overhead: LineItem::new(baseline::MANUFACTURING_OVERHEAD, overhead),

        gross_profit: LineItem::new(baseline::GROSS_PROFIT, gross_profit),

        operating_expenses: LineItem::new(baseline::OPERATING_EXPENSES, opex),
        research_development: LineItem::new(baseline::RESEARCH_DEVELOPMENT, rd),
        marketing: LineItem::new(baseline::MARKETING, mkt),
        warranty: LineItem::new(baseline::WARRANTY, warr),
        sga: LineItem::new(baseline::SGA, sga),
        other_opex: LineItem::new(baseline::OTHER_OPEX, other),

        ebit: LineItem::new(baseline::EBIT, ebit),
        interest: LineItem::new(baseline::INTEREST, interest),
        ebt: LineItem::new(baseline::EBT, ebt),
        tax: LineItem::new(baseline::TAX, tax),
        net_income: LineItem::new(baseline::NET_INCOME, net_income),

        ebit_margin,
    }
}
