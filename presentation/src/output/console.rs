//! Console output for command results

use colored::Colorize;
use squadron_domain::{ActivityState, AgentProfile, AgentStatus, ToolDefinition, ToolResult};

/// Formats results, rosters and tool listings for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// A task result: the text, then any produced files
    pub fn format_result(agent: &str, result: &ToolResult) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&format!("{} says", agent)));
        output.push('\n');
        output.push_str(&result.text);
        output.push('\n');

        if !result.files.is_empty() {
            output.push_str(&format!("\n{}\n", "Files:".cyan().bold()));
            for file in &result.files {
                output.push_str(&format!("  * {}\n", file));
            }
        }
        output
    }

    pub fn format_agents(profiles: &[AgentProfile], statuses: &[AgentStatus]) -> String {
        let mut output = Self::header("Agents");
        output.push('\n');

        for profile in profiles {
            let state = statuses
                .iter()
                .find(|s| s.name == profile.name)
                .map(|s| s.status)
                .unwrap_or(ActivityState::Idle);
            let state = match state {
                ActivityState::Active => state.as_str().green(),
                ActivityState::Idle => state.as_str().dimmed(),
            };

            output.push_str(&format!(
                "{} ({}) [{}]\n",
                profile.name.yellow().bold(),
                profile.role,
                state
            ));
            if !profile.specialties.is_empty() {
                let specialties: Vec<&str> =
                    profile.specialties.iter().map(String::as_str).collect();
                output.push_str(&format!("  specialties: {}\n", specialties.join(", ")));
            }
        }
        output
    }

    pub fn format_tools(definitions: &[ToolDefinition]) -> String {
        let mut output = Self::header("Tools");
        output.push('\n');

        if definitions.is_empty() {
            output.push_str("  (no tools registered)\n");
            return output;
        }

        for definition in definitions {
            let marker = if definition.hazardous {
                " [hazardous]".red().bold().to_string()
            } else {
                String::new()
            };
            output.push_str(&format!(
                "{}{}\n  {}\n",
                definition.name.bold(),
                marker,
                definition.description
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        format!("{}\n", format!("── {} ──", title).cyan().bold())
    }
}
