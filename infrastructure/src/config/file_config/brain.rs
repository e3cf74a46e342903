//! `[brain]` section

use serde::{Deserialize, Serialize};
use squadron_application::BrainConfig;
use squadron_domain::DEFAULT_HISTORY_CAPACITY;

/// Generation parameters shared by every agent's brain.
///
/// ```toml
/// [brain]
/// max_tokens = 1000
/// temperature = 0.3
/// history_capacity = 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBrainConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub history_capacity: usize,
}

impl Default for FileBrainConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1000,
            temperature: 0.3,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl FileBrainConfig {
    /// Build the brain config; the confirmation timeout comes from `[safety]`.
    pub fn to_brain_config(&self, confirmation_timeout_secs: Option<u64>) -> BrainConfig {
        BrainConfig::default()
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_history_capacity(self.history_capacity)
            .with_confirmation_timeout_seconds(confirmation_timeout_secs)
    }
}
