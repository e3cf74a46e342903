//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod brain;
mod model;
mod safety;
mod tools;

pub use brain::FileBrainConfig;
pub use model::FileModelConfig;
pub use safety::{ConfirmMode, FileSafetyConfig};
pub use tools::{FileBuiltinToolsConfig, FileMcpConfig};

use serde::{Deserialize, Serialize};
use squadron_application::BrainConfig;
use squadron_domain::{AgentProfile, default_roster};
use std::collections::HashSet;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("brain.max_tokens cannot be 0")]
    ZeroMaxTokens,

    #[error("brain.temperature must be between 0.0 and 2.0 (got {0})")]
    TemperatureOutOfRange(f32),

    #[error("brain.history_capacity cannot be 0")]
    ZeroHistoryCapacity,

    #[error("mcp.servers.{0}: command cannot be empty")]
    EmptyServerCommand(String),

    #[error("mcp.servers.{0}: timeout_secs cannot be 0")]
    ZeroServerTimeout(String),

    #[error("agents: duplicate agent name '{0}'")]
    DuplicateAgent(String),

    #[error("agents: agent name cannot be empty")]
    EmptyAgentName,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub brain: FileBrainConfig,
    pub safety: FileSafetyConfig,
    pub model: FileModelConfig,
    pub mcp: FileMcpConfig,
    pub builtin_tools: FileBuiltinToolsConfig,
    /// Replaces the default roster when non-empty
    pub agents: Vec<AgentProfile>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.brain.max_tokens == 0 {
            issues.push(ConfigValidationError::ZeroMaxTokens);
        }
        if !(0.0..=2.0).contains(&self.brain.temperature) {
            issues.push(ConfigValidationError::TemperatureOutOfRange(
                self.brain.temperature,
            ));
        }
        if self.brain.history_capacity == 0 {
            issues.push(ConfigValidationError::ZeroHistoryCapacity);
        }

        for (name, server) in &self.mcp.servers {
            if server.command.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyServerCommand(name.clone()));
            }
            if server.timeout_secs == 0 {
                issues.push(ConfigValidationError::ZeroServerTimeout(name.clone()));
            }
        }

        let mut seen = HashSet::new();
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                issues.push(ConfigValidationError::EmptyAgentName);
            } else if !seen.insert(agent.name.to_lowercase()) {
                issues.push(ConfigValidationError::DuplicateAgent(agent.name.clone()));
            }
        }

        issues
    }

    pub fn brain_config(&self) -> BrainConfig {
        self.brain
            .to_brain_config(self.safety.confirmation_timeout())
    }

    /// Configured agents, or the default roster when none are configured.
    pub fn agent_profiles(&self) -> Vec<AgentProfile> {
        if self.agents.is_empty() {
            default_roster()
        } else {
            self.agents.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.safety.enabled);
        assert_eq!(config.safety.confirm, ConfirmMode::AutoReject);
        assert!(config.builtin_tools.enabled);
        assert!(config.mcp.servers.is_empty());

        let brain = config.brain_config();
        assert_eq!(brain.max_tokens, 1000);
        assert_eq!(brain.confirmation_timeout, Some(Duration::from_secs(120)));

        let names: Vec<_> = config
            .agent_profiles()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Marcus", "Caleb"]);
    }

    #[test]
    fn test_parse_full_toml() {
        let config: FileConfig = toml::from_str(
            r#"
[brain]
temperature = 0.7

[safety]
confirm = "interactive"
confirmation_timeout_secs = 0

[mcp.servers.fs]
command = "mcp-fs"
args = ["--root", "."]
hazardous_tools = ["write"]

[[agents]]
name = "Ada"
role = "Reviewer"
system_prompt = "You are Ada."
specialties = ["review"]
"#,
        )
        .unwrap();

        assert_eq!(config.brain.temperature, 0.7);
        assert_eq!(config.brain.max_tokens, 1000);
        assert_eq!(config.safety.confirm, ConfirmMode::Interactive);
        assert_eq!(config.brain_config().confirmation_timeout, None);

        let fs = &config.mcp.servers["fs"];
        assert_eq!(fs.args, vec!["--root", "."]);
        assert_eq!(fs.timeout_secs, 60);
        assert!(fs.is_hazardous("write"));

        let agents = config.agent_profiles();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].role, "Reviewer");
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config: FileConfig = toml::from_str(
            r#"
[brain]
max_tokens = 0
temperature = 3.5

[mcp.servers.broken]
command = ""
timeout_secs = 0
"#,
        )
        .unwrap();
        config.agents = vec![
            AgentProfile::new("Ada", "a"),
            AgentProfile::new("ada", "b"),
        ];

        let issues = config.validate();
        assert!(issues.contains(&ConfigValidationError::ZeroMaxTokens));
        assert!(issues.contains(&ConfigValidationError::TemperatureOutOfRange(3.5)));
        assert!(issues.contains(&ConfigValidationError::EmptyServerCommand("broken".into())));
        assert!(issues.contains(&ConfigValidationError::ZeroServerTimeout("broken".into())));
        assert!(issues.contains(&ConfigValidationError::DuplicateAgent("ada".into())));
        assert_eq!(issues.len(), 5);
    }
}
