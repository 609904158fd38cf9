//! Plain-text rendering of engine output for the terminal.
//!
//! Every function returns a ready-to-print `String`. Monetary values are in
//! USD millions throughout, matching the engine's baseline book.

use std::fmt::Write as _;

use proforma_core::{
    LeverValues, LineItem, OptimizationOutcome, ParsedScenario, ProFormaStatement, ScenarioPreset,
    SimulationSummary, find_lever, levers,
};

/// Render the full pro-forma P&L as a Base / Impact / Total table.
#[must_use]
pub fn render_statement(statement: &ProFormaStatement) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<28} {:>12} {:>12} {:>12}",
        "Line", "Base", "Impact", "Total"
    );
    let _ = writeln!(out, "{}", "-".repeat(67));

    let row = |out: &mut String, label: &str, line: &LineItem| {
        let _ = writeln!(
            out,
            "{:<28} {:>12.2} {:>+12.2} {:>12.2}",
            label,
            line.base,
            line.impact,
            line.total()
        );
    };

    row(&mut out, "Revenue", &statement.revenue);
    row(&mut out, "  Passenger Vehicles", &statement.passenger_vehicles);
    row(&mut out, "  Commercial Vehicles", &statement.commercial_vehicles);
    row(&mut out, "  Parts & Services", &statement.parts_services);
    row(&mut out, "COGS", &statement.cogs);
    row(&mut out, "  Materials", &statement.materials);
    row(&mut out, "  Labor", &statement.labor);
    row(&mut out, "  Manufacturing Overhead", &statement.manufacturing_overhead);
    row(&mut out, "Gross Profit", &statement.gross_profit);
    row(&mut out, "Operating Expenses", &statement.operating_expenses);
    row(&mut out, "  R&D", &statement.research_development);
    row(&mut out, "  Marketing", &statement.marketing);
    row(&mut out, "  Warranty", &statement.warranty);
    row(&mut out, "  SG&A", &statement.sga);
    row(&mut out, "  Other OpEx", &statement.other_opex);
    row(&mut out, "EBIT", &statement.ebit);
    row(&mut out, "Interest", &statement.interest);
    row(&mut out, "EBT", &statement.ebt);
    row(&mut out, "Tax (25%)", &statement.tax);
    row(&mut out, "Net Income", &statement.net_income);

    let _ = writeln!(out, "{}", "-".repeat(67));
    let _ = writeln!(out, "EBIT Margin: {:.2}%", statement.ebit_margin);
    out
}

/// Render the lever registry as a catalog table.
#[must_use]
pub fn render_levers() -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<22} {:<26} {:<16} {:>14} {:>8}",
        "Id", "Name", "Category", "Range", "Impact"
    );
    let _ = writeln!(out, "{}", "-".repeat(90));
    for lever in levers() {
        let range = format!("{:+.0}..{:+.0}{}", lever.min_value, lever.max_value, lever.unit);
        let _ = writeln!(
            out,
            "{:<22} {:<26} {:<16} {:>14} {:>8}",
            lever.id.as_str(),
            lever.name,
            lever.category.to_string(),
            range,
            lever.impact.to_string()
        );
    }
    out
}

/// Render current lever settings, registry order first, bundle-only ids after.
#[must_use]
pub fn render_lever_values(values: &LeverValues) -> String {
    if values.is_neutral() {
        return String::from("(neutral scenario; all levers at 0)\n");
    }

    let mut out = String::new();
    for lever in levers() {
        let value = values.get(lever.id);
        if value != 0.0 {
            let _ = writeln!(out, "  {:<22} {:>+8.2}{}", lever.id.as_str(), value, lever.unit);
        }
    }

    let mut extras: Vec<(&'static str, f64)> = values
        .iter()
        .filter(|(id, value)| find_lever(*id).is_none() && *value != 0.0)
        .map(|(id, value)| (id.as_str(), value))
        .collect();
    extras.sort_by_key(|(id, _)| *id);
    for (id, value) in extras {
        let _ = writeln!(out, "  {:<22} {:>+8.2}%", id, value);
    }
    out
}

/// Render the preset catalog.
#[must_use]
pub fn render_presets(presets: &[ScenarioPreset]) -> String {
    let mut out = String::new();
    for preset in presets {
        let _ = writeln!(
            out,
            "{:<20} {} (headline {:+.0} $M, {:.0}% confidence)",
            preset.id, preset.name, preset.headline_impact, preset.headline_confidence
        );
        let _ = writeln!(out, "    {}", preset.description);
    }
    out
}

/// Render a Monte Carlo summary, one row per outcome metric.
#[must_use]
pub fn render_summary(summary: &SimulationSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Simulation of {} iterations", summary.iterations);
    let _ = writeln!(
        out,
        "{:<17} {:>10} {:>10} {:>10} {:>10} {:>9}  {}",
        "Metric", "P10", "P50", "P90", "Mean", "Std Dev", "95% CI"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));
    for (metric, stats) in summary.iter() {
        let label = format!("{} ({})", metric.label(), metric.unit());
        let _ = writeln!(
            out,
            "{:<17} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>9.2}  [{:.2}, {:.2}]",
            label,
            stats.p10,
            stats.p50,
            stats.p90,
            stats.mean,
            stats.std_dev,
            stats.ci95_lower,
            stats.ci95_upper
        );
    }
    out
}

/// Render a goal-seek outcome: status line plus the recommended levers.
#[must_use]
pub fn render_outcome(outcome: &OptimizationOutcome) -> String {
    let mut out = String::new();
    if outcome.converged {
        let _ = writeln!(
            out,
            "Converged in {} iterations: achieved {:.2} (gap {:+.2})",
            outcome.iterations, outcome.achieved, outcome.gap
        );
    } else {
        let _ = writeln!(
            out,
            "Stopped at the iteration cap ({} iterations): achieved {:.2} (gap {:+.2})",
            outcome.iterations, outcome.achieved, outcome.gap
        );
    }
    let _ = writeln!(out, "Recommended levers:");
    out.push_str(&render_lever_values(&outcome.levers));
    out
}

/// Render a parsed scenario: the explanation plus any extracted levers.
#[must_use]
pub fn render_parsed(parsed: &ParsedScenario) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", parsed.explanation);
    if !parsed.levers.is_empty() {
        out.push_str(&render_lever_values(&parsed.levers));
    }
    out
}
