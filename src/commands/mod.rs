//! Maintenance commands, one per `coordctl` subcommand
//!
//! Reports take a read-only `CoordinatorDb`; mutations take `&mut` and
//! commit exactly once. Each `run` returns what it printed so tests can
//! check the data without parsing console text.

pub mod add_actl;
pub mod batch_status;
pub mod check;
pub mod dump_batches;
pub mod fixtures;
pub mod init;
pub mod overview;
pub mod reset_processed;
pub mod seed;

/// Console width of banners and header rules
pub const REPORT_WIDTH: usize = 120;
