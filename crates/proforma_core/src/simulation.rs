//! Monte Carlo simulation over lever uncertainty.
//!
//! Each iteration perturbs every registered lever around its scenario value
//! and reruns a condensed financial model, producing outcome distributions
//! for revenue, EBIT, net income, EBIT margin and cash flow. Work is done
//! in fixed-size batches so progress reporting and cancellation stay
//! responsive, and each batch gets its own deterministic RNG stream so a
//! seeded run reproduces exactly regardless of thread scheduling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SimulationError;
use crate::model::{LeverId, MetricStats, SimulationSummary, baseline, levers};
use crate::scenario::LeverValues;

/// Iterations per work unit. Small enough that progress ticks smoothly and
/// a cancel lands within a few milliseconds.
const MAX_BATCH_SIZE: usize = 100;

/// Triangular-ish noise amplitude: sum of three unit uniforms, recentered.
const PERTURBATION_SCALE: f64 = 0.3;
/// Fraction of a lever's full span that the noise amplitude covers.
const SPAN_FRACTION: f64 = 0.2;

/// Operating margin of the condensed stochastic model.
const EBIT_RATE: f64 = 0.12;
/// EBIT sensitivity to one tariff point, $M.
const TARIFF_EBIT_SLOPE: f64 = 30.6;
/// EBIT sensitivity to one material-inflation point, $M.
const MATERIAL_EBIT_SLOPE: f64 = 12.25;
/// Depreciation and working-capital add-back, $M.
const CASH_FLOW_OFFSET: f64 = 800.0;

/// Simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of Monte Carlo iterations. Must be positive.
    pub iterations: usize,
    /// Fixed RNG seed for reproducible runs. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            seed: None,
        }
    }
}

/// Shared progress and cancellation state for a simulation run.
///
/// Clones share the same underlying counters, so one handle can live with
/// the worker doing the run while another drives a status display.
#[derive(Debug, Clone, Default)]
pub struct SimulationProgress {
    completed: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl SimulationProgress {
    #[must_use]
    pub fn new(total: usize) -> Self {
        let progress = Self::default();
        progress.total.store(total, Ordering::Relaxed);
        progress
    }

    /// Build from existing atomics, sharing state with their other owners.
    #[must_use]
    pub fn from_atomics(
        completed: Arc<AtomicUsize>,
        total: Arc<AtomicUsize>,
        cancelled: Arc<AtomicBool>,
    ) -> Self {
        Self {
            completed,
            total,
            cancelled,
        }
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    pub fn add(&self, n: usize) {
        self.completed.fetch_add(n, Ordering::Relaxed);
    }

    /// Zero the counters for a fresh run and clear any cancellation.
    pub fn reset(&self, total: usize) {
        self.completed.store(0, Ordering::Relaxed);
        self.total.store(total, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

struct IterationOutcome {
    revenue: f64,
    ebit: f64,
    net_income: f64,
    ebit_margin: f64,
    cash_flow: f64,
}

/// Run a Monte Carlo simulation of the given scenario.
///
/// `progress`, when supplied, is only ever advanced and polled for
/// cancellation; the caller owns resetting it before the run. A cancel
/// takes effect at the next batch boundary and yields
/// [`SimulationError::Cancelled`].
pub fn run_simulation(
    scenario: &LeverValues,
    config: &SimulationConfig,
    progress: Option<&SimulationProgress>,
) -> Result<SimulationSummary, SimulationError> {
    if config.iterations == 0 {
        return Err(SimulationError::Config(String::from(
            "iterations must be positive",
        )));
    }

    let master_seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let batches = config.iterations.div_ceil(MAX_BATCH_SIZE);

    let outcomes = collect_batches(scenario, config.iterations, master_seed, batches, progress)?;

    let mut revenue = Vec::with_capacity(config.iterations);
    let mut ebit = Vec::with_capacity(config.iterations);
    let mut net_income = Vec::with_capacity(config.iterations);
    let mut ebit_margin = Vec::with_capacity(config.iterations);
    let mut cash_flow = Vec::with_capacity(config.iterations);
    for outcome in outcomes.into_iter().flatten() {
        revenue.push(outcome.revenue);
        ebit.push(outcome.ebit);
        net_income.push(outcome.net_income);
        ebit_margin.push(outcome.ebit_margin);
        cash_flow.push(outcome.cash_flow);
    }

    Ok(SimulationSummary {
        iterations: config.iterations,
        revenue: MetricStats::from_samples(&mut revenue),
        ebit: MetricStats::from_samples(&mut ebit),
        net_income: MetricStats::from_samples(&mut net_income),
        ebit_margin: MetricStats::from_samples(&mut ebit_margin),
        cash_flow: MetricStats::from_samples(&mut cash_flow),
    })
}

#[cfg(feature = "parallel")]
fn collect_batches(
    scenario: &LeverValues,
    iterations: usize,
    master_seed: u64,
    batches: usize,
    progress: Option<&SimulationProgress>,
) -> Result<Vec<Vec<IterationOutcome>>, SimulationError> {
    (0..batches)
        .into_par_iter()
        .map(|index| run_batch(scenario, iterations, master_seed, index, progress))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn collect_batches(
    scenario: &LeverValues,
    iterations: usize,
    master_seed: u64,
    batches: usize,
    progress: Option<&SimulationProgress>,
) -> Result<Vec<Vec<IterationOutcome>>, SimulationError> {
    (0..batches)
        .map(|index| run_batch(scenario, iterations, master_seed, index, progress))
        .collect()
}

fn run_batch(
    scenario: &LeverValues,
    iterations: usize,
    master_seed: u64,
    index: usize,
    progress: Option<&SimulationProgress>,
) -> Result<Vec<IterationOutcome>, SimulationError> {
    if progress.is_some_and(SimulationProgress::is_cancelled) {
        return Err(SimulationError::Cancelled);
    }

    let start = index * MAX_BATCH_SIZE;
    let size = MAX_BATCH_SIZE.min(iterations - start);
    let mut rng = SmallRng::seed_from_u64(batch_seed(master_seed, index));
    let outcomes = (0..size)
        .map(|_| simulate_iteration(scenario, &mut rng))
        .collect();

    if let Some(p) = progress {
        p.add(size);
    }
    Ok(outcomes)
}

/// Decorrelate per-batch streams from one master seed.
fn batch_seed(master_seed: u64, index: usize) -> u64 {
    master_seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

fn simulate_iteration(scenario: &LeverValues, rng: &mut SmallRng) -> IterationOutcome {
    // Every registered lever draws its noise, in registry order, whether or
    // not the condensed model reads it. That keeps the stream layout stable
    // as the model grows.
    let mut perturbed = LeverValues::new();
    for lever in levers() {
        let noise = (rng.random::<f64>() + rng.random::<f64>() + rng.random::<f64>() - 1.5)
            * PERTURBATION_SCALE
            * lever.span()
            * SPAN_FRACTION;
        perturbed.set(lever.id, scenario.get(lever.id) + noise);
    }

    let volume = perturbed.get(LeverId::VolumeGrowth);
    let price = perturbed.get(LeverId::PriceChange);
    let tariffs = perturbed.get(LeverId::Tariffs);
    let material = perturbed.get(LeverId::MaterialInflation);

    let revenue = baseline::REVENUE * (1.0 + volume / 100.0) * (1.0 + price / 100.0);
    let ebit = revenue * EBIT_RATE - tariffs * TARIFF_EBIT_SLOPE - material * MATERIAL_EBIT_SLOPE;
    let net_income = ebit * (1.0 - baseline::TAX_RATE);
    // Revenue stays positive inside lever bounds, so the ratio is safe.
    let ebit_margin = ebit / revenue * 100.0;
    let cash_flow = net_income + CASH_FLOW_OFFSET;

    IterationOutcome {
        revenue,
        ebit,
        net_income,
        ebit_margin,
        cash_flow,
    }
}
