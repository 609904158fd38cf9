//! Simulation output types and the statistical summary helpers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five dependent metrics the simulator reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutcomeMetric {
    Revenue,
    Ebit,
    NetIncome,
    EbitMargin,
    CashFlow,
}

impl OutcomeMetric {
    pub const ALL: [OutcomeMetric; 5] = [
        OutcomeMetric::Revenue,
        OutcomeMetric::Ebit,
        OutcomeMetric::NetIncome,
        OutcomeMetric::EbitMargin,
        OutcomeMetric::CashFlow,
    ];

    /// Display label for tables and logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeMetric::Revenue => "Revenue",
            OutcomeMetric::Ebit => "EBIT",
            OutcomeMetric::NetIncome => "Net Income",
            OutcomeMetric::EbitMargin => "EBIT Margin",
            OutcomeMetric::CashFlow => "Cash Flow",
        }
    }

    /// Unit suffix for display. Margin is in percent, everything else $M.
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            OutcomeMetric::EbitMargin => "%",
            _ => "$M",
        }
    }
}

impl fmt::Display for OutcomeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Statistical summary of one metric's sampled outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
    pub mean: f64,
    /// Population standard deviation (divides by n, not n-1).
    pub std_dev: f64,
    pub ci95_lower: f64,
    pub ci95_upper: f64,
}

impl MetricStats {
    /// Summarize a sample set. Sorts in place; `samples` must be non-empty.
    #[must_use]
    pub fn from_samples(samples: &mut [f64]) -> Self {
        samples.sort_by(|a, b| a.total_cmp(b));

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();
        let half_width = 1.96 * std_dev / n.sqrt();

        Self {
            p10: percentile(samples, 10.0),
            p25: percentile(samples, 25.0),
            p50: percentile(samples, 50.0),
            p75: percentile(samples, 75.0),
            p90: percentile(samples, 90.0),
            mean,
            std_dev,
            ci95_lower: mean - half_width,
            ci95_upper: mean + half_width,
        }
    }
}

/// Floor-index percentile over an ascending-sorted slice.
#[must_use]
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    let index = (p / 100.0 * sorted.len() as f64).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Complete Monte Carlo output: one `MetricStats` per outcome metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub iterations: usize,
    pub revenue: MetricStats,
    pub ebit: MetricStats,
    pub net_income: MetricStats,
    pub ebit_margin: MetricStats,
    pub cash_flow: MetricStats,
}

impl SimulationSummary {
    /// Stats for a metric by name.
    #[must_use]
    pub fn metric(&self, metric: OutcomeMetric) -> &MetricStats {
        match metric {
            OutcomeMetric::Revenue => &self.revenue,
            OutcomeMetric::Ebit => &self.ebit,
            OutcomeMetric::NetIncome => &self.net_income,
            OutcomeMetric::EbitMargin => &self.ebit_margin,
            OutcomeMetric::CashFlow => &self.cash_flow,
        }
    }

    /// Iterate metrics in their canonical reporting order.
    pub fn iter(&self) -> impl Iterator<Item = (OutcomeMetric, &MetricStats)> {
        OutcomeMetric::ALL.iter().map(|m| (*m, self.metric(*m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_uses_floor_index() {
        let sorted: Vec<f64> = (1..=10).map(f64::from).collect();
        // floor(0.10 * 10) = 1 -> second element
        assert_eq!(percentile(&sorted, 10.0), 2.0);
        assert_eq!(percentile(&sorted, 50.0), 6.0);
        // floor(0.90 * 10) = 9 -> last element
        assert_eq!(percentile(&sorted, 90.0), 10.0);
    }

    #[test]
    fn test_single_sample_collapses_everything() {
        let mut samples = vec![42.0];
        let stats = MetricStats::from_samples(&mut samples);
        assert_eq!(stats.p10, 42.0);
        assert_eq!(stats.p90, 42.0);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.ci95_lower, 42.0);
        assert_eq!(stats.ci95_upper, 42.0);
    }

    #[test]
    fn test_population_std_dev() {
        let mut samples = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = MetricStats::from_samples(&mut samples);
        // Classic textbook set: mean 5, population std dev exactly 2
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        let half = 1.96 * 2.0 / (8.0_f64).sqrt();
        assert!((stats.ci95_lower - (5.0 - half)).abs() < 1e-12);
        assert!((stats.ci95_upper - (5.0 + half)).abs() < 1e-12);
    }
}
