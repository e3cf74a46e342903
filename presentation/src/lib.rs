//! Presentation layer for squadron
//!
//! This crate contains CLI definitions, the terminal confirmation prompt,
//! the console event printer and output formatters.

pub mod agent;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use agent::{ConsoleAgentEvents, InteractiveConfirmation};
pub use cli::commands::{Cli, Command};
pub use output::console::ConsoleFormatter;
