//! Coordinator database handle
//!
//! - `CoordinatorDb::open()`: read/write access to an existing database file
//! - `CoordinatorDb::open_readonly()`: read-only access for reports
//! - `CoordinatorDb::create()`: create the file and install the schema
//!
//! `open` and `open_readonly` never create the file. SQLite would otherwise
//! silently produce an empty database at a mistyped path.

use super::{schema, Error};
use anyhow::{Context, Result};
use rusqlite::{Connection, OpenFlags, Transaction};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Handle over the coordinator database (one connection per invocation)
pub struct CoordinatorDb {
    conn: Connection,
    path: PathBuf,
}

impl CoordinatorDb {
    /// Open an existing database for reading and writing
    ///
    /// # Returns
    /// * `Ok(CoordinatorDb)`: connection open
    /// * `Err(Error::NotFound)`: no file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    /// Open an existing database read-only
    ///
    /// Used by every report so that a report can never mutate state.
    pub fn open_readonly<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_flags(
            path.as_ref(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    /// Create (or reopen) a database file and install the coordinator schema
    ///
    /// Schema creation is idempotent; existing tables and rows are kept.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to create database at {}", path.display()))?;
        schema::init_schema(&conn)?;
        debug!(path = %path.display(), "coordinator schema ready");

        Ok(CoordinatorDb {
            conn,
            path: path.to_path_buf(),
        })
    }

    fn open_with_flags(path: &Path, flags: OpenFlags) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotFound(path.display().to_string()))
                .context("coordinator database missing");
        }

        let conn = Connection::open_with_flags(path, flags)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        debug!(path = %path.display(), ?flags, "opened coordinator database");

        Ok(CoordinatorDb {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Connection for queries
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Start a transaction; dropping it without `commit()` rolls back
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn
            .transaction()
            .context("Failed to begin transaction")
    }

    /// Path the handle was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }
}
