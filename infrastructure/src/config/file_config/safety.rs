//! `[safety]` section
//!
//! ```toml
//! [safety]
//! enabled = true
//! confirmation_timeout_secs = 120   # 0 waits forever
//! confirm = "interactive"           # or "auto_reject" / "auto_approve"
//! ```

use serde::{Deserialize, Serialize};

/// Who answers confirmation requests for hazardous tools
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmMode {
    /// Ask on the terminal
    Interactive,
    #[default]
    AutoReject,
    AutoApprove,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSafetyConfig {
    pub enabled: bool,
    pub confirmation_timeout_secs: Option<u64>,
    pub confirm: ConfirmMode,
}

impl Default for FileSafetyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            confirmation_timeout_secs: Some(120),
            confirm: ConfirmMode::default(),
        }
    }
}

impl FileSafetyConfig {
    /// Seconds to wait for confirmation; `None` waits indefinitely.
    pub fn confirmation_timeout(&self) -> Option<u64> {
        self.confirmation_timeout_secs.filter(|&secs| secs > 0)
    }
}
