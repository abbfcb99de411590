//! `check`: report rows that break the batch/actl invariants
//!
//! Nothing in the database enforces these; the backend is expected to keep
//! them. This command only lists violations and never repairs them.

use super::overview::write_actls;
use super::REPORT_WIDTH;
use crate::database::CoordinatorDb;
use crate::queries::{actls, batches, carrier_steps, ActlRow, StepRegression, UntrackedMember};
use crate::report::{banner, write_json, Column, OutputFormat, Table};
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;
use tracing::info;

const UNTRACKED_COLUMNS: [Column; 6] = [
    Column::new("Id", 5),
    Column::new("BatchId", 20),
    Column::new("Step", 6),
    Column::new("CarrierId", 12),
    Column::new("EqpId", 10),
    Column::new("LotId", 15),
];

const REGRESSION_COLUMNS: [Column; 4] = [
    Column::new("Id", 5),
    Column::new("Carrier", 12),
    Column::new("Step", 6),
    Column::new("PrevStep", 8),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub untracked_members: Vec<UntrackedMember>,
    pub step_regressions: Vec<StepRegression>,
    pub future_track_ins: Vec<ActlRow>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.untracked_members.is_empty()
            && self.step_regressions.is_empty()
            && self.future_track_ins.is_empty()
    }

    pub fn violations(&self) -> usize {
        self.untracked_members.len() + self.step_regressions.len() + self.future_track_ins.len()
    }
}

pub fn run<W: Write>(
    db: &CoordinatorDb,
    now: NaiveDateTime,
    out: &mut W,
    format: OutputFormat,
) -> Result<CheckReport> {
    let report = CheckReport {
        untracked_members: batches::untracked_processed_members(db.conn())?,
        step_regressions: carrier_steps::step_regressions(db.conn())?,
        future_track_ins: actls::tracked_in_after(db.conn(), now)?,
    };
    info!(violations = report.violations(), "invariant check finished");

    if format == OutputFormat::Json {
        write_json(out, &report)?;
        return Ok(report);
    }

    banner(out, "Processed batch rows with lots missing from DC_Actl", REPORT_WIDTH)?;
    let table = Table::new(&UNTRACKED_COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for row in &report.untracked_members {
        table.write_row(
            out,
            &[&row.id, &row.batch_id, &row.step, &row.carrier_id, &row.eqp_id, &row.lot_id],
        )?;
    }
    writeln!(out)?;

    banner(out, "Carrier steps not increasing", REPORT_WIDTH)?;
    let table = Table::new(&REGRESSION_COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for row in &report.step_regressions {
        table.write_row(out, &[&row.id, &row.carrier, &row.step, &row.previous_step])?;
    }
    writeln!(out)?;

    banner(out, "Actl records tracked in after now", REPORT_WIDTH)?;
    write_actls(out, &report.future_track_ins, REPORT_WIDTH)?;
    writeln!(out)?;

    if report.is_clean() {
        writeln!(out, "✅ No violations found")?;
    } else {
        writeln!(out, "❌ {} violations found", report.violations())?;
    }

    Ok(report)
}
