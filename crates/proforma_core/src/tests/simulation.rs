use crate::error::SimulationError;
use crate::{
    LeverId, LeverValues, SimulationConfig, SimulationProgress, baseline, run_simulation,
};

fn seeded(iterations: usize, seed: u64) -> SimulationConfig {
    SimulationConfig {
        iterations,
        seed: Some(seed),
    }
}

/// Test that every metric's summary is internally ordered: percentiles
/// ascend and the confidence interval brackets the mean.
#[test]
fn test_summary_is_internally_ordered() {
    let summary = run_simulation(&LeverValues::new(), &seeded(2_000, 42), None)
        .expect("simulation should run");

    assert_eq!(summary.iterations, 2_000);
    for (metric, stats) in summary.iter() {
        assert!(stats.p10 <= stats.p25, "{metric}: p10 > p25");
        assert!(stats.p25 <= stats.p50, "{metric}: p25 > p50");
        assert!(stats.p50 <= stats.p75, "{metric}: p50 > p75");
        assert!(stats.p75 <= stats.p90, "{metric}: p75 > p90");
        assert!(stats.std_dev >= 0.0);
        assert!(stats.ci95_lower <= stats.mean && stats.mean <= stats.ci95_upper);
    }
}

/// Test that a fixed seed reproduces the full summary exactly.
#[test]
fn test_seeded_runs_reproduce() {
    let mut levers = LeverValues::new();
    levers.set(LeverId::Tariffs, 25.0);

    let a = run_simulation(&levers, &seeded(1_000, 42), None).expect("simulation should run");
    let b = run_simulation(&levers, &seeded(1_000, 42), None).expect("simulation should run");
    assert_eq!(a, b, "same seed must reproduce bit for bit");
}

/// Test that different seeds actually change the draw.
#[test]
fn test_different_seeds_differ() {
    let a = run_simulation(&LeverValues::new(), &seeded(500, 1), None)
        .expect("simulation should run");
    let b = run_simulation(&LeverValues::new(), &seeded(500, 2), None)
        .expect("simulation should run");
    assert!(a.revenue.mean != b.revenue.mean);
}

/// Test that a neutral scenario centers revenue on the baseline. Noise is
/// symmetric and volume and price sit mid-range, so nothing clamps.
#[test]
fn test_neutral_scenario_centers_revenue() {
    let summary = run_simulation(&LeverValues::new(), &seeded(2_000, 7), None)
        .expect("simulation should run");

    assert!(
        (summary.revenue.mean - baseline::REVENUE).abs() < 60.0,
        "revenue mean drifted to {}",
        summary.revenue.mean
    );
    assert!(summary.revenue.std_dev > 0.0);
}

/// Test the fixed identities between metric columns: net income is
/// after-tax EBIT and cash flow adds the fixed offset to net income.
#[test]
fn test_metric_column_identities() {
    let summary = run_simulation(&LeverValues::new(), &seeded(2_000, 9), None)
        .expect("simulation should run");

    assert!((summary.net_income.mean - summary.ebit.mean * 0.75).abs() < 1e-6);
    assert!((summary.cash_flow.mean - summary.net_income.mean - 800.0).abs() < 1e-6);
}

/// Test that a tariff scenario shifts the EBIT distribution down by about
/// the tariff slope.
#[test]
fn test_tariff_scenario_shifts_ebit_down() {
    let mut levers = LeverValues::new();
    levers.set(LeverId::Tariffs, 25.0);

    let base = run_simulation(&LeverValues::new(), &seeded(2_000, 11), None)
        .expect("simulation should run");
    let shocked = run_simulation(&levers, &seeded(2_000, 11), None)
        .expect("simulation should run");

    let shift = shocked.ebit.mean - base.ebit.mean;
    assert!(
        (-800.0..=-700.0).contains(&shift),
        "expected roughly -765 from 25 tariff points, got {shift}"
    );
}

/// Test progress accounting over a full run.
#[test]
fn test_progress_counts_every_iteration() {
    let progress = SimulationProgress::new(550);
    let summary = run_simulation(&LeverValues::new(), &seeded(550, 3), Some(&progress))
        .expect("simulation should run");

    assert_eq!(summary.iterations, 550);
    assert_eq!(progress.completed(), 550, "all iterations must be accounted");
    assert_eq!(progress.total(), 550);
    assert!(!progress.is_cancelled());
}

/// Test that a cancellation set before the run aborts it.
#[test]
fn test_pre_cancelled_run_aborts() {
    let progress = SimulationProgress::new(10_000);
    progress.cancel();

    let result = run_simulation(&LeverValues::new(), &seeded(10_000, 5), Some(&progress));
    assert!(matches!(result, Err(SimulationError::Cancelled)));
}

/// Test that zero iterations is a configuration error, not a panic.
#[test]
fn test_zero_iterations_rejected() {
    let config = SimulationConfig {
        iterations: 0,
        seed: None,
    };
    let result = run_simulation(&LeverValues::new(), &config, None);
    assert!(matches!(result, Err(SimulationError::Config(_))));
}

/// Test that progress reset clears a previous cancellation.
#[test]
fn test_progress_reset_clears_cancel() {
    let progress = SimulationProgress::new(100);
    progress.add(40);
    progress.cancel();

    progress.reset(200);
    assert_eq!(progress.completed(), 0);
    assert_eq!(progress.total(), 200);
    assert!(!progress.is_cancelled());

    let summary = run_simulation(&LeverValues::new(), &seeded(200, 13), Some(&progress))
        .expect("run after reset should succeed");
    assert_eq!(summary.iterations, 200);
    assert_eq!(progress.completed(), 200);
}
