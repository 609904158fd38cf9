//! Interactive scenario session state.
//!
//! A session carries the working lever mapping, the chat transcript, the
//! most recent long-run results, and a busy latch that serializes engine
//! work: one simulation or optimization at a time, new requests rejected
//! until the running one completes or is cancelled.

use jiff::Zoned;

use proforma_core::{LeverId, LeverValues, OptimizationOutcome, ScenarioPreset, SimulationSummary};

/// Who authored a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the session transcript. Append-only, session-scoped.
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: Zoned,
}

/// State of one interactive session.
#[derive(Debug, Default)]
pub struct ScenarioSession {
    levers: LeverValues,
    messages: Vec<ChatMessage>,
    next_message_id: u64,
    last_simulation: Option<SimulationSummary>,
    last_optimization: Option<OptimizationOutcome>,
    busy: bool,
}

impl ScenarioSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn levers(&self) -> &LeverValues {
        &self.levers
    }

    /// Set one lever, returning the stored (clamped) value.
    pub fn set_lever(&mut self, id: LeverId, value: f64) -> f64 {
        self.levers.set(id, value)
    }

    /// Replace the mapping with a preset's bundle over registry defaults.
    pub fn apply_preset(&mut self, preset: &ScenarioPreset) {
        self.levers.apply_preset(preset);
    }

    /// Overlay parsed or explicit values onto the mapping.
    pub fn merge(&mut self, other: &LeverValues) {
        self.levers.merge(other);
    }

    pub fn reset_levers(&mut self) {
        self.levers.reset();
    }

    pub fn push_user(&mut self, content: &str) -> u64 {
        self.push_message(Role::User, content)
    }

    pub fn push_assistant(&mut self, content: &str) -> u64 {
        self.push_message(Role::Assistant, content)
    }

    fn push_message(&mut self, role: Role, content: &str) -> u64 {
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_message_id,
            role,
            content: content.to_string(),
            timestamp: Zoned::now(),
        });
        self.next_message_id
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Claim the busy latch for a new engine run. Returns false when a run
    /// is already in flight.
    pub fn begin_run(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        true
    }

    pub fn finish_run(&mut self) {
        self.busy = false;
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn set_simulation(&mut self, summary: SimulationSummary) {
        self.last_simulation = Some(summary);
    }

    #[must_use]
    pub fn last_simulation(&self) -> Option<&SimulationSummary> {
        self.last_simulation.as_ref()
    }

    pub fn set_optimization(&mut self, outcome: OptimizationOutcome) {
        self.last_optimization = Some(outcome);
    }

    #[must_use]
    pub fn last_optimization(&self) -> Option<&OptimizationOutcome> {
        self.last_optimization.as_ref()
    }
}
