//! Coordinator schema
//!
//! Mirrors the tables the coordination backend creates on first start,
//! including its lookup indexes. Production databases already carry this
//! schema; `init_schema` exists for scratch databases and tests.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Table names, in creation order
pub const TABLES: [&str; 6] = [
    "DC_Eqps",
    "DC_Wips",
    "DC_CarrierSteps",
    "DC_Batch",
    "DC_BatchMembers",
    "DC_Actl",
];

const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS DC_Eqps (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT NOT NULL,
    Type TEXT NOT NULL,
    Line TEXT NOT NULL,
    Note TEXT
);

CREATE TABLE IF NOT EXISTS DC_Wips (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Priority INTEGER NOT NULL,
    Technology TEXT NOT NULL,
    Carrier TEXT NOT NULL,
    LotId TEXT NOT NULL,
    Qty INTEGER NOT NULL,
    PartName TEXT NOT NULL DEFAULT '',
    CurrentStage TEXT NOT NULL DEFAULT '',
    CurrentStep TEXT NOT NULL DEFAULT '',
    TargetStage TEXT NOT NULL DEFAULT '',
    TargetStep TEXT NOT NULL DEFAULT '',
    TargetEqpId TEXT NOT NULL DEFAULT '',
    TargetPPID TEXT NOT NULL DEFAULT '',
    State TEXT NOT NULL DEFAULT '',
    Next1 TEXT NOT NULL DEFAULT '',
    Next2 TEXT NOT NULL DEFAULT '',
    Next3 TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS DC_CarrierSteps (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    Carrier TEXT NOT NULL,
    Qty INTEGER NOT NULL,
    Step INTEGER NOT NULL,
    EqpId TEXT NOT NULL,
    PPID TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS DC_Batch (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    BatchId TEXT NOT NULL,
    Step INTEGER NOT NULL,
    CarrierId TEXT NOT NULL,
    LotId TEXT,
    Qty INTEGER NOT NULL DEFAULT 0,
    Technology TEXT,
    EqpId TEXT NOT NULL,
    PPID TEXT NOT NULL,
    NextEqpId TEXT NOT NULL DEFAULT '',
    IsProcessed INTEGER NOT NULL DEFAULT 0,
    CreatedAt TEXT NOT NULL,
    ProcessedAt TEXT
);

CREATE TABLE IF NOT EXISTS DC_BatchMembers (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    BatchId TEXT NOT NULL,
    CarrierId TEXT NOT NULL,
    LotId TEXT NOT NULL,
    Qty INTEGER NOT NULL DEFAULT 0,
    Technology TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS DC_Actl (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    EqpId TEXT NOT NULL,
    LotId TEXT NOT NULL,
    LotType TEXT NOT NULL,
    TrackInTime TEXT NOT NULL,
    Carrier TEXT NOT NULL DEFAULT '',
    Qty INTEGER NOT NULL DEFAULT 0,
    PPID TEXT NOT NULL DEFAULT '',
    Next TEXT NOT NULL DEFAULT '',
    Location TEXT NOT NULL DEFAULT '',
    EndTime TEXT
);
";

const CREATE_INDEXES: &str = "
CREATE INDEX IF NOT EXISTS IX_DC_Eqps_Type_Line ON DC_Eqps (Type, Line);
CREATE INDEX IF NOT EXISTS IX_DC_Wips_TargetEqpId ON DC_Wips (TargetEqpId);
CREATE INDEX IF NOT EXISTS IX_DC_CarrierSteps_Carrier ON DC_CarrierSteps (Carrier);
CREATE INDEX IF NOT EXISTS IX_DC_Batch_BatchId_EqpId ON DC_Batch (BatchId, EqpId);
CREATE INDEX IF NOT EXISTS IX_DC_BatchMembers_BatchId ON DC_BatchMembers (BatchId);
CREATE INDEX IF NOT EXISTS IX_DC_Actl_EqpId_TrackInTime ON DC_Actl (EqpId, TrackInTime);
";

/// Create all coordinator tables and indexes if they do not exist yet
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(CREATE_TABLES)
        .context("Failed to create coordinator tables")?;
    conn.execute_batch(CREATE_INDEXES)
        .context("Failed to create coordinator indexes")?;
    Ok(())
}

/// Names of coordinator tables present in the database
pub fn existing_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master
         WHERE type = 'table' AND name LIKE 'DC\\_%' ESCAPE '\\'
         ORDER BY name",
    )?;
    let rows = stmt.query_map([], |r| r.get(0))?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}
