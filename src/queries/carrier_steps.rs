//! DC_CarrierSteps queries

use super::types::{NewCarrierStep, StepRegression};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

/// Number of carrier-step rows
pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM DC_CarrierSteps", [], |r| r.get(0))
        .map_err(Into::into)
}

/// Insert one routing step (no ordering check)
pub fn insert(conn: &Connection, step: &NewCarrierStep<'_>) -> Result<()> {
    conn.execute(
        "INSERT INTO DC_CarrierSteps (Carrier, Qty, Step, EqpId, PPID) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![step.carrier, step.qty, step.step, step.eqp_id, step.ppid],
    )
    .with_context(|| format!("Failed to insert step {} for {}", step.step, step.carrier))?;
    Ok(())
}

/// Steps that do not increase over the carrier's previous row (by Id)
///
/// ORDER BY: Carrier, Id
pub fn step_regressions(conn: &Connection) -> Result<Vec<StepRegression>> {
    let mut stmt = conn.prepare(
        "SELECT c.Id, c.Carrier, c.Step, p.Step
         FROM DC_CarrierSteps c
         JOIN DC_CarrierSteps p
           ON p.Carrier = c.Carrier
          AND p.Id = (SELECT MAX(q.Id) FROM DC_CarrierSteps q
                      WHERE q.Carrier = c.Carrier AND q.Id < c.Id)
         WHERE c.Step <= p.Step
         ORDER BY c.Carrier, c.Id",
    )?;
    let rows = stmt.query_map([], row_to_regression)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

fn row_to_regression(row: &Row) -> rusqlite::Result<StepRegression> {
    Ok(StepRegression {
        id: row.get(0)?,
        carrier: row.get(1)?,
        step: row.get(2)?,
        previous_step: row.get(3)?,
    })
}
