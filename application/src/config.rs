//! Application-level configuration.
//!
//! [`BrainConfig`] groups the parameters that control how the brain calls the
//! language model and how long the safety interlock waits for an operator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Brain behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrainConfig {
    /// Output-length ceiling for the routing call.
    pub max_tokens: u32,
    /// Sampling temperature for the routing call; kept low for stable routing.
    pub temperature: f32,
    /// How long to wait for a hazardous-tool confirmation. `None` waits forever.
    pub confirmation_timeout: Option<Duration>,
    /// Task history capacity for agents built on this brain.
    pub history_capacity: usize,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.3,
            confirmation_timeout: Some(Duration::from_secs(120)),
            history_capacity: squadron_domain::DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl BrainConfig {
    // ==================== Builder Methods ====================

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Creates the confirmation timeout from optional seconds.
    ///
    /// If `seconds` is `None`, confirmation waits indefinitely.
    pub fn with_confirmation_timeout_seconds(self, seconds: Option<u64>) -> Self {
        self.with_confirmation_timeout(seconds.map(Duration::from_secs))
    }

    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
