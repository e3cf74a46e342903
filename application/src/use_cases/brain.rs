//! Decision engine.
//!
//! The [`Brain`] turns natural-language input plus an agent identity into a
//! [`Decision`] (`think`), then turns that decision into a [`ToolResult`]
//! (`execute`). Neither operation fails: every error path converges to text.
//!
//! ```text
//! input ──▶ think ──▶ LanguageModel ──▶ parse_decision ──▶ Decision
//!                                         │ (error)
//!                                         └──▶ FALLBACK_REPLY
//!
//! Decision ──▶ execute ─┬─ Reply ─────────────────────────▶ text
//!                       └─ ToolCall ─▶ registry ─▶ interlock ─▶ Tool::invoke
//! ```
//!
//! # External tools
//!
//! When an [`ExternalToolSource`] is attached, the first `think` loads it and
//! registers whatever it discovers. The load runs at most once per brain;
//! a failed load is logged and never retried.

use std::panic::AssertUnwindSafe;
use std::sync::{Arc, PoisonError, RwLock};

use futures::FutureExt;
use squadron_domain::{
    AgentProfile, Decision, RegisteredTool, Tool, ToolArgs, ToolDefinition, ToolRegistry,
    ToolResult, parse_decision,
};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::config::BrainConfig;
use crate::ports::language_model::LanguageModel;
use crate::ports::safety_confirmation::SafetyConfirmationPort;
use crate::ports::tool_source::ExternalToolSource;
use crate::use_cases::safety::{SafetyInterlock, SafetySwitch};

/// Last line of every routing prompt; adapters may key JSON mode off it.
pub const JSON_RESPONSE_MARKER: &str = "RESPONSE (JSON):";

/// Result text for a raw decision that is neither a reply nor a tool call.
pub const UNKNOWN_ACTION: &str = "Unknown action.";

const OUTPUT_INSTRUCTIONS: &str = "INSTRUCTIONS:\n\
- If the user asks for something that requires a tool, output JSON: {\"action\": \"tool\", \"tool_name\": \"...\", \"args\": {...}}\n\
- If the user just wants to chat, output JSON: {\"action\": \"reply\", \"content\": \"...\"}\n\
- Be concise.";

pub struct Brain {
    model: Arc<dyn LanguageModel>,
    registry: RwLock<ToolRegistry>,
    safety: SafetyInterlock,
    config: BrainConfig,
    tool_source: Option<Arc<dyn ExternalToolSource>>,
    external_loaded: OnceCell<()>,
}

impl Brain {
    /// A brain with an empty registry, safety on, and auto-reject confirmation.
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        let config = BrainConfig::default();
        Self {
            model,
            registry: RwLock::new(ToolRegistry::new()),
            safety: SafetyInterlock::default().with_timeout(config.confirmation_timeout),
            config,
            tool_source: None,
            external_loaded: OnceCell::new(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_config(mut self, config: BrainConfig) -> Self {
        self.safety.set_timeout(config.confirmation_timeout);
        self.config = config;
        self
    }

    /// Share a safety switch with other brains.
    pub fn with_safety_switch(mut self, switch: SafetySwitch) -> Self {
        self.safety.set_switch(switch);
        self
    }

    pub fn with_confirmation(mut self, confirmation: Arc<dyn SafetyConfirmationPort>) -> Self {
        self.safety.set_confirmation(confirmation);
        self
    }

    pub fn with_tool_source(mut self, source: Arc<dyn ExternalToolSource>) -> Self {
        self.tool_source = Some(source);
        self
    }

    pub fn with_tools(self, tools: impl IntoIterator<Item = RegisteredTool>) -> Self {
        for tool in tools {
            self.register_tool(tool.definition, tool.handler);
        }
        self
    }

    pub fn config(&self) -> &BrainConfig {
        &self.config
    }

    // ==================== Registry ====================

    /// Register a tool; an existing tool with the same name is replaced.
    pub fn register_tool(&self, definition: ToolDefinition, tool: Arc<dyn Tool>) {
        let name = definition.name.clone();
        let replaced = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(definition, tool);
        if replaced.is_some() {
            debug!(tool = %name, "Replaced registered tool");
        } else {
            debug!(tool = %name, "Registered tool");
        }
    }

    /// Registered tool names in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .names()
            .map(str::to_string)
            .collect()
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .definitions()
            .cloned()
            .collect()
    }

    fn lookup(&self, name: &str) -> Option<RegisteredTool> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Load the external tool source if one is attached and not yet loaded.
    pub async fn ensure_external_tools(&self) {
        let Some(source) = &self.tool_source else {
            return;
        };
        self.external_loaded
            .get_or_init(|| async {
                match source.load_tools().await {
                    Ok(tools) => {
                        let count = tools.len();
                        for tool in tools {
                            self.register_tool(tool.definition, tool.handler);
                        }
                        info!("Loaded {} external tool(s)", count);
                    }
                    Err(e) => warn!("External tools unavailable: {}", e),
                }
            })
            .await;
    }

    // ==================== Safety ====================

    pub fn toggle_safety(&self, enabled: bool) {
        self.safety.toggle(enabled);
    }

    pub fn safety_mode(&self) -> bool {
        self.safety.safety_mode()
    }

    /// Whether `tool_name` may run with `args` right now.
    ///
    /// Unregistered names are not hazardous and are allowed; `execute`
    /// rejects them separately.
    pub async fn check_safety(&self, tool_name: &str, args: &ToolArgs) -> bool {
        match self.lookup(tool_name) {
            Some(entry) => self.safety.check(&entry.definition, args).await,
            None => true,
        }
    }

    // ==================== Think ====================

    fn build_prompt(&self, input: &str, profile: &AgentProfile) -> String {
        let tools = self
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .describe();
        format!(
            "{}\n\nYou have access to the following tools:\n{}\n\n{}\n\nUSER: {}\n{}",
            profile.system_prompt, tools, OUTPUT_INSTRUCTIONS, input, JSON_RESPONSE_MARKER
        )
    }

    /// Decide how to handle `input`. Never fails.
    pub async fn think(&self, input: &str, profile: &AgentProfile) -> Decision {
        self.ensure_external_tools().await;

        let prompt = self.build_prompt(input, profile);
        debug!(agent = %profile.name, prompt_chars = prompt.len(), "Routing request");

        let raw = match self
            .model
            .generate(&prompt, self.config.max_tokens, self.config.temperature)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                error!(agent = %profile.name, "Language model call failed: {}", e);
                return Decision::fallback();
            }
        };

        match parse_decision(&raw) {
            Ok(decision) => decision,
            Err(e) => {
                error!(agent = %profile.name, "Could not decode decision: {}", e);
                Decision::fallback()
            }
        }
    }

    // ==================== Execute ====================

    /// Carry out a decision. Never fails.
    pub async fn execute(&self, decision: &Decision) -> ToolResult {
        match decision {
            Decision::Reply { content } => ToolResult::text(content.clone()),
            Decision::ToolCall { tool_name, args } => self.execute_tool(tool_name, args).await,
        }
    }

    /// Carry out a decision still in raw JSON form.
    ///
    /// Anything that is not a well-formed reply or tool call yields
    /// [`UNKNOWN_ACTION`].
    pub async fn execute_value(&self, value: serde_json::Value) -> ToolResult {
        match Decision::from_value(value) {
            Ok(decision) => self.execute(&decision).await,
            Err(e) => {
                warn!("Rejected raw decision: {}", e);
                ToolResult::text(UNKNOWN_ACTION)
            }
        }
    }

    async fn execute_tool(&self, tool_name: &str, args: &ToolArgs) -> ToolResult {
        let Some(entry) = self.lookup(tool_name) else {
            warn!(tool = %tool_name, "Tool not found");
            return ToolResult::text(format!("Error: Tool '{}' not found.", tool_name));
        };

        if !self.safety.check(&entry.definition, args).await {
            return ToolResult::text(format!(
                "Execution of '{}' was blocked by the safety interlock.",
                tool_name
            ));
        }

        info!(tool = %tool_name, "Executing tool with {}", serde_json::Value::Object(args.clone()));
        match AssertUnwindSafe(entry.handler.invoke(args))
            .catch_unwind()
            .await
        {
            Ok(Ok(output)) => output.into_tool_result(),
            Ok(Err(e)) => {
                error!(tool = %tool_name, "Tool failed: {}", e);
                ToolResult::text(format!("Tool Error: {}", e))
            }
            Err(_) => {
                error!(tool = %tool_name, "Tool panicked");
                ToolResult::text(format!("Tool Error: tool '{}' panicked", tool_name))
            }
        }
    }
}
