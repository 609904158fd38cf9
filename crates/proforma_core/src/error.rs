use std::fmt;

/// A lever id string that does not name any known lever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLeverIdError(pub String);

impl fmt::Display for ParseLeverIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown lever id '{}'", self.0)
    }
}

impl std::error::Error for ParseLeverIdError {}

/// A target metric name that the optimizer does not recognize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTargetMetricError(pub String);

impl fmt::Display for ParseTargetMetricError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown target metric '{}', expected 'ebit' or 'revenue'", self.0)
    }
}

impl std::error::Error for ParseTargetMetricError {}

/// Errors related to catalog lookups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    PresetNotFound(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::PresetNotFound(id) => write!(f, "preset '{id}' not found"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Errors from the Monte Carlo driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Simulation was cancelled by user request
    Cancelled,
    /// Configuration error
    Config(String),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
            SimulationError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}
