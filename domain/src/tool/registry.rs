//! Tool Registry
//!
//! The [`ToolRegistry`] maps tool names to their definition and handler.
//! Registration order is preserved so the routing prompt is reproducible.
//!
//! # Overwrite semantics
//!
//! Registering a name that already exists replaces the entry in place: the
//! newest definition and handler win, while the listing position of the
//! first registration is kept. There is no removal primitive.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::entities::ToolDefinition;
use super::traits::Tool;

/// A registered tool: its metadata plus the callable behind it.
#[derive(Clone)]
pub struct RegisteredTool {
    pub definition: ToolDefinition,
    pub handler: Arc<dyn Tool>,
}

impl RegisteredTool {
    pub fn new(definition: ToolDefinition, handler: Arc<dyn Tool>) -> Self {
        Self {
            definition,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered registry of tools.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    entries: Vec<RegisteredTool>,
    /// Tool name -> index into `entries`
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, returning the entry it replaced (if any).
    pub fn register(
        &mut self,
        definition: ToolDefinition,
        handler: Arc<dyn Tool>,
    ) -> Option<RegisteredTool> {
        let entry = RegisteredTool::new(definition, handler);
        match self.index.get(entry.name()) {
            Some(&slot) => Some(std::mem::replace(&mut self.entries[slot], entry)),
            None => {
                self.index.insert(entry.name().to_string(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered tools in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name())
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.entries.iter().map(|e| &e.definition)
    }

    /// One `- name: description` line per tool, in registration order.
    pub fn describe(&self) -> String {
        self.definitions()
            .map(ToolDefinition::prompt_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::traits::tool_fn;
    use crate::tool::value_objects::ToolOutput;

    fn constant(text: &'static str) -> Arc<dyn Tool> {
        tool_fn(move |_| Ok(ToolOutput::from(text)))
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDefinition::new("read_file", "Read file"), constant("a"));
        registry.register(
            ToolDefinition::new("run_command", "Run command").hazardous(),
            constant("b"),
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("read_file"));
        assert!(registry.get("run_command").unwrap().definition.hazardous);
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_registration_order_is_stable() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(ToolDefinition::new(name, format!("{} tool", name)), constant("x"));
        }

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            registry.describe(),
            "- zeta: zeta tool\n- alpha: alpha tool\n- mid: mid tool"
        );
    }

    #[tokio::test]
    async fn test_last_registration_wins_in_place() {
        let mut registry = ToolRegistry::new();
        registry.register(ToolDefinition::new("first", "1"), constant("old"));
        registry.register(ToolDefinition::new("second", "2"), constant("second"));

        let replaced = registry.register(
            ToolDefinition::new("first", "replacement").hazardous(),
            constant("new"),
        );

        assert_eq!(replaced.unwrap().definition.description, "1");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["first", "second"]);

        let entry = registry.get("first").unwrap();
        assert_eq!(entry.definition.description, "replacement");
        assert!(entry.definition.hazardous);
        let output = entry.handler.invoke(&Default::default()).await.unwrap();
        assert_eq!(output, ToolOutput::from("new"));
    }

    #[test]
    fn test_empty_registry_describes_nothing() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.describe(), "");
    }
}
