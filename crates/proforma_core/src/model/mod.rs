mod levers;
mod presets;
mod results;
mod statement;

pub use levers::{
    ImpactWeight, Lever, LeverCategory, LeverId, clamp_to_bounds, find_lever, levers,
};
pub use presets::{ScenarioPreset, find_preset, presets};
pub use results::{MetricStats, OutcomeMetric, SimulationSummary, percentile};
pub use statement::{LineItem, ProFormaStatement, baseline};
