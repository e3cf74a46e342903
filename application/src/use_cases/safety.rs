//! Safety interlock.
//!
//! Gate evaluated before every tool invocation:
//!
//! | Tool | Safety mode | Outcome |
//! |------|-------------|---------|
//! | not hazardous | any | allow |
//! | hazardous | off (god mode) | allow |
//! | hazardous | on | ask [`SafetyConfirmationPort`]; only `Approve` allows |
//!
//! Rejections, confirmation errors and an expired confirmation wait all deny.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use squadron_domain::{ToolArgs, ToolDefinition};
use tracing::{debug, info, warn};

use crate::ports::safety_confirmation::{
    AutoRejectConfirmation, ConfirmationDecision, SafetyConfirmationPort,
};

/// Shareable safety mode flag (on by default).
///
/// Clones share the same flag; hand one switch to several brains to make the
/// mode process-wide.
#[derive(Debug, Clone)]
pub struct SafetySwitch(Arc<AtomicBool>);

impl Default for SafetySwitch {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SafetySwitch {
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Set safety mode; idempotent.
    pub fn set(&self, enabled: bool) {
        let previous = self.0.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            if enabled {
                info!("Safety mode enabled");
            } else {
                warn!("Safety mode disabled (god mode): hazardous tools run without confirmation");
            }
        }
    }
}

pub struct SafetyInterlock {
    switch: SafetySwitch,
    confirmation: Arc<dyn SafetyConfirmationPort>,
    timeout: Option<Duration>,
}

impl Default for SafetyInterlock {
    fn default() -> Self {
        Self::new(SafetySwitch::default(), Arc::new(AutoRejectConfirmation))
    }
}

impl SafetyInterlock {
    pub fn new(switch: SafetySwitch, confirmation: Arc<dyn SafetyConfirmationPort>) -> Self {
        Self {
            switch,
            confirmation,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn set_switch(&mut self, switch: SafetySwitch) {
        self.switch = switch;
    }

    pub fn set_confirmation(&mut self, confirmation: Arc<dyn SafetyConfirmationPort>) {
        self.confirmation = confirmation;
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn switch(&self) -> &SafetySwitch {
        &self.switch
    }

    pub fn safety_mode(&self) -> bool {
        self.switch.is_enabled()
    }

    pub fn toggle(&self, enabled: bool) {
        self.switch.set(enabled);
    }

    /// Decide whether a call to `definition` with `args` may proceed.
    pub async fn check(&self, definition: &ToolDefinition, args: &ToolArgs) -> bool {
        if !definition.hazardous {
            return true;
        }
        if !self.switch.is_enabled() {
            debug!(tool = %definition.name, "God mode: hazardous tool allowed");
            return true;
        }

        info!(tool = %definition.name, "Hazardous tool requires confirmation");
        let request = self.confirmation.confirm(&definition.name, args);
        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, request).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(
                        tool = %definition.name,
                        "No confirmation within {}s, denying",
                        limit.as_secs()
                    );
                    return false;
                }
            },
            None => request.await,
        };

        match outcome {
            Ok(ConfirmationDecision::Approve) => {
                info!(tool = %definition.name, "Hazardous tool approved");
                true
            }
            Ok(ConfirmationDecision::Reject) => {
                info!(tool = %definition.name, "Hazardous tool rejected");
                false
            }
            Err(e) => {
                warn!(tool = %definition.name, "Confirmation failed, denying: {}", e);
                false
            }
        }
    }
}
