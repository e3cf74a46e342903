//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for squadron
#[derive(Parser, Debug)]
#[command(name = "squadron")]
#[command(author, version, about = "Route tasks to agents that reply or call tools")]
#[command(long_about = r#"
Squadron runs a small roster of agents. Each agent asks a language model to
either answer a task directly or call one of its tools (builtin file and shell
tools, plus tools discovered from MCP servers). Hazardous tools need
confirmation while safety mode is on.

Configuration files are loaded from (in priority order):
1. SQUADRON_* environment variables
2. --config <path>     Explicit config file
3. ./squadron.toml     Project-level config
4. ~/.config/squadron/config.toml   Global config

Example:
  squadron ask Caleb "read Cargo.toml and list the dependencies"
  squadron handoff --from Marcus --to Caleb --notes "plan is approved" "implement the parser"
  squadron tools
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Run hazardous tools without confirmation (turns safety mode off)
    #[arg(long, global = true)]
    pub god_mode: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Append agent events as JSON lines to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub events_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Give a task to one agent and print the result
    Ask {
        /// Agent name (case-insensitive)
        agent: String,
        /// The task
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,
    },

    /// Hand a task from one agent to another
    Handoff {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Notes for the receiving agent
        #[arg(long)]
        notes: Option<String>,
        #[arg(required = true, num_args = 1..)]
        task: Vec<String>,
    },

    /// List the agent roster
    Agents,

    /// List every tool an agent can use
    Tools,

    /// Show configuration file locations
    Config,
}

impl Command {
    /// The task words joined back into one string.
    pub fn task_text(&self) -> Option<String> {
        match self {
            Command::Ask { task, .. } | Command::Handoff { task, .. } => Some(task.join(" ")),
            _ => None,
        }
    }
}
