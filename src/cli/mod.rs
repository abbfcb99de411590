//! CLI module
//!
//! Provides:
//! - Argument parsing (clap derive)
//! - Database path resolution (flag → env → config → cwd)
//! - Subcommand dispatch and exit code mapping

pub mod args;
pub mod db_path;
pub mod dispatch;

// Re-exports
pub use args::{Args, Command};
pub use db_path::resolve_db_path;
pub use dispatch::{exit_code_for, run_cli, run_command, ExitCode};

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_DB_ERROR: i32 = 2;
