//! `dump-batches`: full DC_Batch contents

use super::REPORT_WIDTH;
use crate::database::CoordinatorDb;
use crate::queries::{batches, BatchRow};
use crate::report::{rule, write_json, Column, OutputFormat, Table};
use anyhow::Result;
use std::io::Write;

const COLUMNS: [Column; 8] = [
    Column::new("Id", 5),
    Column::new("BatchId", 20),
    Column::new("Step", 6),
    Column::new("CarrierId", 12),
    Column::new("EqpId", 10),
    Column::new("PPID", 10),
    Column::new("IsProcessed", 12),
    Column::new("CreatedAt", 20),
];

pub fn run<W: Write>(db: &CoordinatorDb, out: &mut W, format: OutputFormat) -> Result<Vec<BatchRow>> {
    let rows = batches::list_all(db.conn())?;

    if format == OutputFormat::Json {
        write_json(out, &rows)?;
        return Ok(rows);
    }

    writeln!(out, "DC_Batch Table Contents:")?;
    writeln!(out, "{}", rule('=', REPORT_WIDTH))?;
    writeln!(out, "Total Records: {}", rows.len())?;
    writeln!(out)?;

    if rows.is_empty() {
        writeln!(out, "No records found in DC_Batch table.")?;
        return Ok(rows);
    }

    let table = Table::new(&COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for row in &rows {
        let created_at = row.created_at.as_deref().unwrap_or("");
        table.write_row(
            out,
            &[
                &row.id,
                &row.batch_id,
                &row.step,
                &row.carrier_id,
                &row.eqp_id,
                &row.ppid,
                &row.is_processed,
                &created_at,
            ],
        )?;
    }

    Ok(rows)
}
