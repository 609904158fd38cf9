//! Scenario-modeling engine for an automotive pro-forma P&L.
//!
//! Everything here is deterministic and I/O-free, so the crate embeds
//! cleanly under a CLI, a service, or a test harness:
//!
//! - A registry of bounded scenario levers with clamping ([`model`])
//! - A deterministic impact calculator that prices a lever mapping into a
//!   full pro-forma statement ([`pnl`])
//! - A keyword-driven parser from free text to lever values ([`parse`])
//! - A batched Monte Carlo simulator with progress reporting and
//!   cancellation ([`simulation`])
//! - A goal-seek optimizer over the impact model ([`optimization`])
//!
//! ```
//! use proforma_core::{LeverId, LeverValues, compute_impact};
//!
//! let mut levers = LeverValues::new();
//! levers.set(LeverId::Tariffs, 25.0);
//! let statement = compute_impact(&levers);
//! assert!(statement.net_income.impact < 0.0);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod optimization;
pub mod parse;
pub mod pnl;
pub mod scenario;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod error;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{LookupError, ParseLeverIdError, ParseTargetMetricError, SimulationError};
pub use model::{
    ImpactWeight, Lever, LeverCategory, LeverId, LineItem, MetricStats, OutcomeMetric,
    ProFormaStatement, ScenarioPreset, SimulationSummary, baseline, clamp_to_bounds, find_lever,
    find_preset, levers, presets,
};
pub use optimization::{
    OptimizationOutcome, OptimizationTarget, TargetMetric, TerminationReason, run_optimization,
};
pub use parse::{ParsedScenario, parse_scenario};
pub use pnl::compute_impact;
pub use scenario::LeverValues;
pub use simulation::{SimulationConfig, SimulationProgress, run_simulation};
