//! Builtin tools
//!
//! | Tool          | Hazardous | Args                                      |
//! |---------------|-----------|-------------------------------------------|
//! | `read_file`   | no        | `path`, `offset?`, `limit?`               |
//! | `write_file`  | yes       | `path`, `content`, `create_dirs?`         |
//! | `run_command` | yes       | `command`, `working_dir?`, `timeout_secs?` |
//!
//! Hazardous tools go through the safety interlock before they run.

pub mod command;
pub mod file;

pub use command::{RUN_COMMAND, RunCommandTool, run_command_definition};
pub use file::{READ_FILE, ReadFileTool, WRITE_FILE, WriteFileTool, read_file_definition, write_file_definition};

use squadron_domain::RegisteredTool;
use std::sync::Arc;

/// Every builtin tool, ready to register on a brain.
pub fn builtin_tools() -> Vec<RegisteredTool> {
    vec![
        RegisteredTool::new(read_file_definition(), Arc::new(ReadFileTool)),
        RegisteredTool::new(write_file_definition(), Arc::new(WriteFileTool)),
        RegisteredTool::new(run_command_definition(), Arc::new(RunCommandTool)),
    ]
}
