//! Agent identity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Immutable identity of an agent: who it is and how it should behave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub system_prompt: String,
    #[serde(default)]
    pub specialties: BTreeSet<String>,
    #[serde(default = "default_personality")]
    pub personality: String,
}

fn default_personality() -> String {
    "professional".to_string()
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: String::new(),
            system_prompt: system_prompt.into(),
            specialties: BTreeSet::new(),
            personality: default_personality(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_specialties<I, S>(mut self, specialties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specialties = specialties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    /// Same identity with a different system prompt.
    ///
    /// Used to fold per-call context into the prompt without touching the
    /// stored profile.
    pub fn with_system_prompt(&self, system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            ..self.clone()
        }
    }
}

/// The built-in roster: a planner and an implementer.
pub fn default_roster() -> Vec<AgentProfile> {
    vec![
        AgentProfile::new(
            "Marcus",
            "You are Marcus, the Product Manager.\n\
             You excel at understanding requirements, breaking down tasks, creating plans,\n\
             and coordinating work. You're organized, strategic, and user-focused.\n\
             When given a task, you think about the big picture and create actionable plans.",
        )
        .with_role("Product Manager")
        .with_specialties(["planning", "requirements", "coordination", "documentation"])
        .with_personality("strategic"),
        AgentProfile::new(
            "Caleb",
            "You are Caleb, the Software Engineer.\n\
             You're an expert coder who writes clean, efficient, and well-documented code.\n\
             You love solving technical problems and building features.\n\
             When given a task, you focus on implementation and code quality.",
        )
        .with_role("Software Engineer")
        .with_specialties(["coding", "debugging", "implementation", "architecture"])
        .with_personality("technical"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let roster = default_roster();
        let names: Vec<_> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Marcus", "Caleb"]);

        let caleb = &roster[1];
        assert_eq!(caleb.role, "Software Engineer");
        assert!(caleb.specialties.contains("debugging"));
        assert!(caleb.system_prompt.starts_with("You are Caleb"));
    }

    #[test]
    fn test_with_system_prompt_keeps_identity() {
        let base = AgentProfile::new("Ada", "base").with_role("Reviewer");
        let derived = base.with_system_prompt("base\n\nextra");
        assert_eq!(derived.name, "Ada");
        assert_eq!(derived.role, "Reviewer");
        assert_eq!(derived.system_prompt, "base\n\nextra");
        assert_eq!(base.system_prompt, "base");
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let profile: AgentProfile =
            toml::from_str("name = \"Ada\"\nsystem_prompt = \"You review code.\"").unwrap();
        assert_eq!(profile.personality, "professional");
        assert!(profile.specialties.is_empty());
        assert!(profile.role.is_empty());
    }
}
