//! `reset-processed`: clear IsProcessed on every batch row except one tool's
//!
//! No dry run, no prompt, no undo. The backend reacts to the cleared flags
//! on its next pass.

use crate::database::CoordinatorDb;
use crate::queries::{batches, BatchRow};
use crate::report::{rule, write_json, OutputFormat, ProcessedMark};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::info;

const WIDTH: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetOutcome {
    pub keep_equipment: String,
    pub updated: usize,
    pub before: Vec<BatchRow>,
    pub after: Vec<BatchRow>,
}

pub fn run<W: Write>(
    db: &mut CoordinatorDb,
    keep_equipment: &str,
    out: &mut W,
    format: OutputFormat,
) -> Result<ResetOutcome> {
    let table = format == OutputFormat::Table;

    let before = batches::list_all(db.conn())?;
    if table {
        writeln!(out, "Current DC_Batch status:")?;
        write_status(out, &before, false)?;
        writeln!(out)?;
        writeln!(out, "{}", rule('=', WIDTH))?;
        writeln!(
            out,
            "Updating IsProcessed to FALSE for all records except {}...",
            keep_equipment
        )?;
        writeln!(out, "{}", rule('=', WIDTH))?;
    }

    let updated = batches::reset_processed(db.conn(), keep_equipment)?;
    info!(updated, keep = keep_equipment, "reset IsProcessed");

    let after = batches::list_all(db.conn())?;
    let outcome = ResetOutcome {
        keep_equipment: keep_equipment.to_string(),
        updated,
        before,
        after,
    };

    if !table {
        write_json(out, &outcome)?;
        return Ok(outcome);
    }

    writeln!(out)?;
    writeln!(out, "✅ Updated {} records", updated)?;
    writeln!(out)?;
    writeln!(out, "Updated DC_Batch status:")?;
    write_status(out, &outcome.after, true)?;

    writeln!(out)?;
    writeln!(out, "{}", rule('=', WIDTH))?;
    writeln!(out, "Summary:")?;
    writeln!(out, "- Equipment other than {}: IsProcessed = FALSE", keep_equipment)?;
    writeln!(out, "- {}: IsProcessed unchanged", keep_equipment)?;
    writeln!(out, "{}", rule('=', WIDTH))?;

    Ok(outcome)
}

fn write_status<W: Write>(out: &mut W, rows: &[BatchRow], marked: bool) -> Result<()> {
    for row in rows {
        let mark = if marked {
            ProcessedMark::Marked(row.processed())
        } else {
            ProcessedMark::Plain(row.processed())
        };
        writeln!(
            out,
            "Id: {}, Step: {}, CarrierId: {}, EqpId: {}, IsProcessed: {}",
            row.id, row.step, row.carrier_id, row.eqp_id, mark
        )?;
    }
    Ok(())
}
