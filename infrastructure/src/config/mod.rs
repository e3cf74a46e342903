//! Configuration file loading for squadron
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SQUADRON_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./squadron.toml` or `./.squadron.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/squadron/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, ConfirmMode, FileBrainConfig, FileBuiltinToolsConfig, FileConfig,
    FileMcpConfig, FileModelConfig, FileSafetyConfig,
};
pub use loader::ConfigLoader;
