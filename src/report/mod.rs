//! Console reporting
//!
//! - `table.rs`: fixed-width column tables
//!
//! Reports write to any `io::Write`; the binary passes stdout.

pub mod table;

pub use table::{banner, rule, Column, ProcessedMark, Table};

use serde::Serialize;
use std::io::{self, Write};

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width console tables
    #[default]
    Table,
    /// One pretty-printed JSON document
    Json,
}

/// Write `value` as pretty JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
