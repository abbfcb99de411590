//! Parameterized queries over the coordinator tables
//!
//! Every statement the tools run lives here, one module per table.
//! Reads carry a deterministic ORDER BY. Functions take a plain
//! `&Connection`, so they work the same inside a transaction.

pub mod actls;
pub mod batches;
pub mod carrier_steps;
pub mod equipment;
pub mod types;
pub mod wips;

pub use types::*;
