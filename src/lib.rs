//! Coordinator tools: inspection, seeding and status resets for the
//! dispatch coordinator's SQLite database
//!
//! The coordination backend owns the database. These tools read it, insert
//! fixed test scenarios into it, and flip batch processed flags, nothing
//! more.

pub mod cli;
pub mod commands;
pub mod config;
pub mod database;
pub mod queries;
pub mod report;

// Re-export database access
pub use database::CoordinatorDb;

// Re-export configuration
pub use config::ToolConfig;

// Re-export reporting
pub use report::{Column, OutputFormat, Table};
