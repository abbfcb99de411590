//! `seed`: insert the fixed WIP / actl / carrier-step scenario
//!
//! Inserts are unconditional. Running twice doubles every row. Track-in
//! times are relative to `now`, so the scenario only makes sense for a
//! while after it was written.

use super::fixtures::{ActlSeed, SEED_ACTLS, SEED_CARRIER_STEPS, SEED_WIPS};
use crate::database::sql::minutes_before;
use crate::database::CoordinatorDb;
use crate::queries::{actls, carrier_steps, equipment, wips, NewActl};
use crate::report::{write_json, OutputFormat};
use anyhow::Result;
use chrono::NaiveDateTime;
use rusqlite::Connection;
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// Rows inserted by one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub wips: usize,
    pub actls: usize,
    pub carrier_steps: usize,
}

pub fn run<W: Write>(
    db: &mut CoordinatorDb,
    now: NaiveDateTime,
    out: &mut W,
    format: OutputFormat,
) -> Result<SeedSummary> {
    let table = format == OutputFormat::Table;

    let names = equipment::list_names(db.conn())?;
    if table {
        writeln!(out, "Found {} equipments: {:?}", names.len(), names)?;
        writeln!(out)?;
    }

    // One transaction: a failure part-way leaves nothing from this run
    let tx = db.transaction()?;

    for wip in &SEED_WIPS {
        wips::insert(&tx, wip)?;
    }
    if table {
        writeln!(out, "Inserted {} WIP records", SEED_WIPS.len())?;
    }

    insert_actls(&tx, &SEED_ACTLS, now)?;
    if table {
        writeln!(out, "Inserted {} Actual processing records", SEED_ACTLS.len())?;
    }

    for step in &SEED_CARRIER_STEPS {
        carrier_steps::insert(&tx, step)?;
    }
    if table {
        writeln!(out, "Inserted {} Carrier Steps records", SEED_CARRIER_STEPS.len())?;
    }

    tx.commit()?;

    let summary = SeedSummary {
        wips: SEED_WIPS.len(),
        actls: SEED_ACTLS.len(),
        carrier_steps: SEED_CARRIER_STEPS.len(),
    };
    info!(
        wips = summary.wips,
        actls = summary.actls,
        carrier_steps = summary.carrier_steps,
        "seeded test scenario"
    );

    if table {
        writeln!(out)?;
        writeln!(out, "✅ Test data insertion completed successfully!")?;
        writeln!(out)?;
        writeln!(out, "Summary:")?;
        writeln!(out, "  - {} WIP records", summary.wips)?;
        writeln!(out, "  - {} Actual processing records", summary.actls)?;
        writeln!(out, "  - {} Carrier Steps records", summary.carrier_steps)?;
    } else {
        write_json(out, &summary)?;
    }

    Ok(summary)
}

/// Insert actl templates with track-in times relative to `now`
pub(crate) fn insert_actls(conn: &Connection, seeds: &[ActlSeed], now: NaiveDateTime) -> Result<()> {
    for seed in seeds {
        actls::insert(
            conn,
            &NewActl {
                eqp_id: seed.eqp_id,
                lot_id: seed.lot_id,
                lot_type: seed.lot_type,
                track_in_time: minutes_before(now, seed.minutes_ago)?,
            },
        )?;
    }
    Ok(())
}
