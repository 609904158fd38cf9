//! Engine test suite, grouped by concern:
//!
//! - `calculator`: deterministic statement math and structural identities
//! - `parser`: free-text scenario extraction
//! - `presets`: the canned scenario catalog end to end
//! - `simulation`: Monte Carlo distributions, determinism and run control
//! - `optimization`: goal-seek convergence and saturation behavior

mod parser;
mod presets;
mod simulation;
