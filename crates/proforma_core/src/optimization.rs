//! Goal-seek over the deterministic impact model.
//!
//! Given a target delta for EBIT or revenue, the optimizer nudges a fixed
//! set of priority levers each iteration, proportional to the remaining
//! gap, and re-evaluates the full statement until the gap falls within
//! tolerance or the iteration cap is hit. Clamping applies throughout, so
//! unreachable targets saturate at lever bounds and report non-convergence
//! rather than running away.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseTargetMetricError;
use crate::model::LeverId;
use crate::pnl::compute_impact;
use crate::scenario::LeverValues;

const MAX_ITERATIONS: usize = 100;
/// Convergence tolerance on the remaining gap, $M of impact.
const TOLERANCE: f64 = 10.0;

/// Levers the optimizer is allowed to move, with step weights. Negative
/// weights point cost levers opposite to the gap: closing an EBIT shortfall
/// means pushing material inflation and tariffs down, not up.
const PRIORITY_LEVERS: &[(LeverId, f64)] = &[
    (LeverId::PriceChange, 1.5),
    (LeverId::VolumeGrowth, 1.3),
    (LeverId::LaborProductivity, 1.2),
    (LeverId::MaterialInflation, -0.8),
    (LeverId::Tariffs, -0.5),
];

/// Which statement line the optimizer steers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetMetric {
    Ebit,
    Revenue,
}

impl TargetMetric {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            TargetMetric::Ebit => "EBIT",
            TargetMetric::Revenue => "Revenue",
        }
    }
}

impl fmt::Display for TargetMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TargetMetric {
    type Err = ParseTargetMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ebit" => Ok(TargetMetric::Ebit),
            "revenue" => Ok(TargetMetric::Revenue),
            other => Err(ParseTargetMetricError(other.to_string())),
        }
    }
}

/// The goal: a delta against baseline in $M for the chosen metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimizationTarget {
    pub metric: TargetMetric,
    pub value: f64,
}

/// Why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminationReason {
    Converged,
    IterationCapReached,
}

/// Result of one goal-seek run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    /// Lever values after the final iteration, clamped to bounds.
    pub levers: LeverValues,
    pub converged: bool,
    pub reason: TerminationReason,
    /// Adjustment rounds performed. Zero when the start already satisfied
    /// the target.
    pub iterations: usize,
    /// Impact of the final lever values on the target metric, $M.
    pub achieved: f64,
    /// `target - achieved`, $M.
    pub gap: f64,
    /// Achieved impact after each evaluation, starting with the untouched
    /// input. Always `iterations + 1` entries.
    pub history: Vec<f64>,
}

fn achieved_impact(levers: &LeverValues, metric: TargetMetric) -> f64 {
    let statement = compute_impact(levers);
    match metric {
        TargetMetric::Ebit => statement.ebit.impact,
        TargetMetric::Revenue => statement.revenue.impact,
    }
}

/// Seek lever values whose impact on `target.metric` reaches `target.value`.
///
/// Pure with respect to its inputs: `start` is not modified, and the same
/// inputs always produce the same outcome.
#[must_use]
pub fn run_optimization(start: &LeverValues, target: &OptimizationTarget) -> OptimizationOutcome {
    let mut working = start.clone();
    // A zero target would make the proportional step divide by zero.
    let denominator = if target.value.abs() < f64::EPSILON {
        1.0
    } else {
        target.value
    };

    let mut achieved = achieved_impact(&working, target.metric);
    let mut history = vec![achieved];
    let mut iterations = 0;

    while (target.value - achieved).abs() > TOLERANCE && iterations < MAX_ITERATIONS {
        let step = (target.value - achieved) / denominator * 2.0;
        for &(id, weight) in PRIORITY_LEVERS {
            let next = working.get(id) + step * weight;
            working.set(id, next);
        }
        iterations += 1;
        achieved = achieved_impact(&working, target.metric);
        history.push(achieved);
    }

    let gap = target.value - achieved;
    let converged = gap.abs() <= TOLERANCE;
    OptimizationOutcome {
        levers: working,
        converged,
        reason: if converged {
            TerminationReason::Converged
        } else {
            TerminationReason::IterationCapReached
        },
        iterations,
        achieved,
        gap,
        history,
    }
}
