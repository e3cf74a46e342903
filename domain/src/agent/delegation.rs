//! Delegation metadata carried by a handed-off task.

use serde::{Deserialize, Serialize};

/// Provenance attached to one task invocation.
///
/// Folded into the effective system prompt for that call only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delegated_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_results: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DelegationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delegated_by(mut self, agent: impl Into<String>) -> Self {
        self.delegated_by = Some(agent.into());
        self
    }

    pub fn original_request(mut self, request: impl Into<String>) -> Self {
        self.original_request = Some(request.into());
        self
    }

    pub fn previous_results(mut self, results: impl Into<String>) -> Self {
        self.previous_results = Some(results.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Render the `## Delegation Context` block.
    ///
    /// Fields appear in a fixed order and only when set and non-empty.
    pub fn render_block(&self) -> String {
        let fields = [
            ("Delegated By", &self.delegated_by),
            ("Original Request", &self.original_request),
            ("Previous Results", &self.previous_results),
            ("Notes", &self.notes),
        ];

        let mut lines = vec!["## Delegation Context".to_string()];
        for (label, value) in fields {
            if let Some(value) = value
                && !value.is_empty()
            {
                lines.push(format!("- **{}**: {}", label, value));
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_block_fixed_order() {
        let ctx = DelegationContext::new()
            .notes("I've planned it, you code it")
            .delegated_by("Marcus")
            .original_request("Continue implementation");

        assert_eq!(
            ctx.render_block(),
            "## Delegation Context\n\
             - **Delegated By**: Marcus\n\
             - **Original Request**: Continue implementation\n\
             - **Notes**: I've planned it, you code it"
        );
    }

    #[test]
    fn test_render_block_skips_empty_fields() {
        let ctx = DelegationContext::new().previous_results("").notes("n");
        assert_eq!(ctx.render_block(), "## Delegation Context\n- **Notes**: n");

        assert_eq!(DelegationContext::new().render_block(), "## Delegation Context");
    }
}
