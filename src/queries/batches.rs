//! DC_Batch and DC_BatchMembers queries
//!
//! Members join their batch row on (BatchId, CarrierId); one batch row
//! exists per carrier and step.

use super::types::{BatchMemberRow, BatchRow, BatchSummary, ProcessedCount, UntrackedMember};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};
use tracing::debug;

const MEMBER_JOIN: &str = "SELECT b.Id, b.BatchId, b.Step, b.CarrierId, b.EqpId, b.PPID, b.IsProcessed, m.LotId
     FROM DC_Batch b
     JOIN DC_BatchMembers m ON b.BatchId = m.BatchId AND b.CarrierId = m.CarrierId";

/// Every batch row
///
/// ORDER BY: Id
pub fn list_all(conn: &Connection) -> Result<Vec<BatchRow>> {
    let mut stmt = conn.prepare(
        "SELECT Id, BatchId, Step, CarrierId, EqpId, PPID, IsProcessed, CreatedAt
         FROM DC_Batch
         ORDER BY Id",
    )?;
    let rows = stmt.query_map([], row_to_batch)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Member lots of batch rows scheduled on one tool
///
/// ORDER BY: b.Id, m.Id
pub fn members_for_equipment(conn: &Connection, eqp_id: &str) -> Result<Vec<BatchMemberRow>> {
    let sql = format!("{} WHERE b.EqpId = ?1 ORDER BY b.Id, m.Id", MEMBER_JOIN);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![eqp_id], row_to_member)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Member lots of one batch, across all its steps
///
/// ORDER BY: b.Step, b.CarrierId, m.Id
pub fn members_for_batch(conn: &Connection, batch_id: &str) -> Result<Vec<BatchMemberRow>> {
    let sql = format!(
        "{} WHERE b.BatchId = ?1 ORDER BY b.Step, b.CarrierId, m.Id",
        MEMBER_JOIN
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![batch_id], row_to_member)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Batch rows per processed flag value for one batch
///
/// ORDER BY: IsProcessed
pub fn processed_counts(conn: &Connection, batch_id: &str) -> Result<Vec<ProcessedCount>> {
    let mut stmt = conn.prepare(
        "SELECT IsProcessed != 0, COUNT(*)
         FROM DC_Batch
         WHERE BatchId = ?1
         GROUP BY IsProcessed != 0
         ORDER BY IsProcessed != 0",
    )?;
    let rows = stmt.query_map(params![batch_id], |r| {
        Ok(ProcessedCount {
            is_processed: r.get(0)?,
            count: r.get(1)?,
        })
    })?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// One summary line per batch
///
/// ORDER BY: CreatedAt, BatchId
pub fn summaries(conn: &Connection) -> Result<Vec<BatchSummary>> {
    let mut stmt = conn.prepare(
        "SELECT BatchId, COUNT(*), GROUP_CONCAT(DISTINCT CarrierId), MIN(CreatedAt)
         FROM DC_Batch
         GROUP BY BatchId
         ORDER BY MIN(CreatedAt), BatchId",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(BatchSummary {
            batch_id: r.get(0)?,
            records: r.get(1)?,
            carriers: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
            created_at: r.get(3)?,
        })
    })?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Clear the processed flag on every batch row not scheduled on `keep_eqp_id`
///
/// Single unconditional UPDATE. Rows already false are left alone, so the
/// returned count is the number of rows whose flag actually changed.
pub fn reset_processed(conn: &Connection, keep_eqp_id: &str) -> Result<usize> {
    debug!(keep = keep_eqp_id, "clearing IsProcessed");
    conn.execute(
        "UPDATE DC_Batch
         SET IsProcessed = 0
         WHERE EqpId != ?1 AND IsProcessed != 0",
        params![keep_eqp_id],
    )
    .context("Failed to reset IsProcessed")
}

/// Processed batch members that have no actl record on the batch's tool
///
/// ORDER BY: b.BatchId, b.Step, b.CarrierId, m.LotId
pub fn untracked_processed_members(conn: &Connection) -> Result<Vec<UntrackedMember>> {
    let mut stmt = conn.prepare(
        "SELECT b.Id, b.BatchId, b.Step, b.CarrierId, b.EqpId, m.LotId
         FROM DC_Batch b
         JOIN DC_BatchMembers m ON b.BatchId = m.BatchId AND b.CarrierId = m.CarrierId
         WHERE b.IsProcessed != 0
           AND NOT EXISTS (
               SELECT 1 FROM DC_Actl a
               WHERE a.EqpId = b.EqpId AND a.LotId = m.LotId
           )
         ORDER BY b.BatchId, b.Step, b.CarrierId, m.LotId",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(UntrackedMember {
            id: r.get(0)?,
            batch_id: r.get(1)?,
            step: r.get(2)?,
            carrier_id: r.get(3)?,
            eqp_id: r.get(4)?,
            lot_id: r.get(5)?,
        })
    })?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

fn row_to_batch(row: &Row) -> rusqlite::Result<BatchRow> {
    Ok(BatchRow {
        id: row.get(0)?,
        batch_id: row.get(1)?,
        step: row.get(2)?,
        carrier_id: row.get(3)?,
        eqp_id: row.get(4)?,
        ppid: row.get(5)?,
        is_processed: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_member(row: &Row) -> rusqlite::Result<BatchMemberRow> {
    Ok(BatchMemberRow {
        id: row.get(0)?,
        batch_id: row.get(1)?,
        step: row.get(2)?,
        carrier_id: row.get(3)?,
        eqp_id: row.get(4)?,
        ppid: row.get(5)?,
        is_processed: row.get::<_, i64>(6)? != 0,
        lot_id: row.get(7)?,
    })
}
