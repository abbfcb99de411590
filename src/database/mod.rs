//! Coordinator database access
//!
//! ## Architecture
//!
//! - `db.rs`: CoordinatorDb, connection management over the shared database file
//! - `schema.rs`: table and index definitions (scratch databases only)
//! - `sql.rs`: placeholder and timestamp helpers shared by the query modules
//!
//! The coordination backend owns the database. Nothing here enforces the
//! batch/actl invariants; the tools only read, insert, or flip flags.

pub mod db;
pub mod schema;
pub mod sql;

pub use db::CoordinatorDb;

/// Database access errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database file not found: {0}")]
    NotFound(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("time offset out of range: {0}")]
    OffsetOutOfRange(String),
}
