//! `add-actl`: record track-ins for every lot batched onto one tool
//!
//! Makes the backend see the tool's batch lots as already processed there.
//! Repeated runs insert the same lots again.

use super::overview::write_actls;
use super::REPORT_WIDTH;
use crate::database::sql::{format_timestamp, hours_before};
use crate::database::CoordinatorDb;
use crate::queries::{actls, batches, ActlRow, BatchMemberRow, NewActl};
use crate::report::{rule, write_json, Column, OutputFormat, ProcessedMark, Table};
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;
use tracing::info;

const MEMBER_COLUMNS: [Column; 8] = [
    Column::new("Id", 5),
    Column::new("BatchId", 20),
    Column::new("Step", 6),
    Column::new("CarrierId", 12),
    Column::new("EqpId", 10),
    Column::new("PPID", 10),
    Column::new("IsProcessed", 12),
    Column::new("LotId", 15),
];

/// Parameters of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddActlOptions {
    pub equipment: String,
    pub hours_ago: i64,
    pub lot_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddActlOutcome {
    pub equipment: String,
    pub track_in_time: String,
    pub members: Vec<BatchMemberRow>,
    /// Lots inserted, in insertion order
    pub added: Vec<String>,
    /// Every actl row on the tool after the insert
    pub actls: Vec<ActlRow>,
}

pub fn run<W: Write>(
    db: &mut CoordinatorDb,
    options: &AddActlOptions,
    now: NaiveDateTime,
    out: &mut W,
    format: OutputFormat,
) -> Result<AddActlOutcome> {
    let table = format == OutputFormat::Table;
    let eqp = options.equipment.as_str();
    let track_in_time = hours_before(now, options.hours_ago)?;
    let stamp = format_timestamp(track_in_time);

    let members = batches::members_for_equipment(db.conn(), eqp)?;
    if table {
        writeln!(out, "{} batch information:", eqp)?;
        let member_table = Table::new(&MEMBER_COLUMNS, REPORT_WIDTH);
        member_table.write_header(out)?;
        for row in &members {
            member_table.write_row(
                out,
                &[
                    &row.id,
                    &row.batch_id,
                    &row.step,
                    &row.carrier_id,
                    &row.eqp_id,
                    &row.ppid,
                    &ProcessedMark::Plain(row.is_processed),
                    &row.lot_id,
                ],
            )?;
        }
        writeln!(out)?;
        writeln!(out, "{}", rule('=', REPORT_WIDTH))?;
        writeln!(out, "Adding {} actl records...", eqp)?;
        writeln!(out, "{}", rule('=', REPORT_WIDTH))?;
    }

    let tx = db.transaction()?;
    let mut added = Vec::with_capacity(members.len());
    for member in &members {
        actls::insert(
            &tx,
            &NewActl {
                eqp_id: eqp,
                lot_id: &member.lot_id,
                lot_type: &options.lot_type,
                track_in_time,
            },
        )?;
        if table {
            writeln!(
                out,
                "✅ Added: LotId={}, TrackInTime={}",
                member.lot_id, stamp
            )?;
        }
        added.push(member.lot_id.clone());
    }
    tx.commit()?;
    info!(equipment = eqp, added = added.len(), "inserted actl records");

    let outcome = AddActlOutcome {
        equipment: eqp.to_string(),
        track_in_time: stamp,
        actls: actls::list_for_equipment(db.conn(), eqp)?,
        members,
        added,
    };

    if !table {
        write_json(out, &outcome)?;
        return Ok(outcome);
    }

    writeln!(out)?;
    writeln!(out, "✅ Added {} actl records for {}", outcome.added.len(), eqp)?;
    writeln!(out)?;
    writeln!(out, "{}", rule('=', REPORT_WIDTH))?;
    writeln!(out, "{} actl records:", eqp)?;
    writeln!(out, "{}", rule('=', REPORT_WIDTH))?;
    write_actls(out, &outcome.actls, REPORT_WIDTH)?;

    Ok(outcome)
}
