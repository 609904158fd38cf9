//! Scenario modeling CLI for an automotive pro-forma P&L.
//!
//! This crate wraps the `proforma_core` engine in a terminal surface:
//! - One-shot commands for the lever catalog, presets, impact statements,
//!   Monte Carlo simulation and goal-seek optimization
//! - A keyword scenario parser driven from free text
//! - An interactive chat loop with a background engine worker
//! - File logging with size-based rotation

// ============================================================================
// Core modules
// ============================================================================

pub mod commands;
pub mod logging;
pub mod report;
pub mod session;
pub mod worker;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use commands::ScenarioArgs;
pub use logging::init_logging;
pub use session::{ChatMessage, Role, ScenarioSession};
pub use worker::{EngineRequest, EngineResponse, EngineWorker};
