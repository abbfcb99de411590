//! `batch-status`: one batch's member lots, processed flags, and whether
//! each step's lots show up in the processing log yet

use super::REPORT_WIDTH;
use crate::database::CoordinatorDb;
use crate::queries::{actls, batches, BatchMemberRow, ProcessedCount};
use crate::report::{banner, rule, write_json, Column, OutputFormat, ProcessedMark, Table};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

const COLUMNS: [Column; 8] = [
    Column::new("Id", 5),
    Column::new("BatchId", 20),
    Column::new("Step", 6),
    Column::new("CarrierId", 12),
    Column::new("EqpId", 10),
    Column::new("PPID", 10),
    Column::new("IsProcessed", 12),
    Column::new("LotId", 15),
];

/// Member lots of one step of the batch that have actl records on its tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTracking {
    pub step: i64,
    pub eqp_id: String,
    pub lots: Vec<String>,
    pub tracked: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchStatus {
    pub batch_id: String,
    pub rows: Vec<BatchMemberRow>,
    pub counts: Vec<ProcessedCount>,
    pub tracking: Vec<StepTracking>,
}

pub fn run<W: Write>(
    db: &CoordinatorDb,
    batch_id: &str,
    out: &mut W,
    format: OutputFormat,
) -> Result<BatchStatus> {
    let rows = batches::members_for_batch(db.conn(), batch_id)?;
    let counts = batches::processed_counts(db.conn(), batch_id)?;
    let tracking = step_tracking(db, &rows)?;
    let status = BatchStatus {
        batch_id: batch_id.to_string(),
        rows,
        counts,
        tracking,
    };

    if format == OutputFormat::Json {
        write_json(out, &status)?;
        return Ok(status);
    }

    banner(out, &format!("DC_Batch Status Check - BatchId: {}", batch_id), REPORT_WIDTH)?;
    writeln!(out)?;

    let table = Table::new(&COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for row in &status.rows {
        table.write_row(
            out,
            &[
                &row.id,
                &row.batch_id,
                &row.step,
                &row.carrier_id,
                &row.eqp_id,
                &row.ppid,
                &ProcessedMark::Marked(row.is_processed),
                &row.lot_id,
            ],
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", rule('=', REPORT_WIDTH))?;
    writeln!(out, "Summary:")?;
    writeln!(out, "{}", rule('-', REPORT_WIDTH))?;
    for count in &status.counts {
        let label = if count.is_processed {
            "IsProcessed = TRUE"
        } else {
            "IsProcessed = FALSE"
        };
        writeln!(out, "{}: {} records", label, count.count)?;
    }

    if !status.tracking.is_empty() {
        writeln!(out)?;
        writeln!(out, "Processing log:")?;
        for step in &status.tracking {
            writeln!(
                out,
                "Step {} {}: {}/{} lots tracked in",
                step.step,
                step.eqp_id,
                step.tracked.len(),
                step.lots.len()
            )?;
        }
    }

    Ok(status)
}

/// Group member rows by (step, tool) in row order and look up their lots
fn step_tracking(db: &CoordinatorDb, rows: &[BatchMemberRow]) -> Result<Vec<StepTracking>> {
    let mut groups: Vec<StepTracking> = Vec::new();
    for row in rows {
        match groups
            .iter_mut()
            .find(|g| g.step == row.step && g.eqp_id == row.eqp_id)
        {
            Some(group) => {
                if !group.lots.contains(&row.lot_id) {
                    group.lots.push(row.lot_id.clone());
                }
            }
            None => groups.push(StepTracking {
                step: row.step,
                eqp_id: row.eqp_id.clone(),
                lots: vec![row.lot_id.clone()],
                tracked: Vec::new(),
            }),
        }
    }

    for group in &mut groups {
        group.tracked = actls::tracked_lots(db.conn(), &group.eqp_id, &group.lots)?;
    }
    Ok(groups)
}
