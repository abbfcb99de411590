//! DC_Wips queries

use super::types::{NewWip, WipRow};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

/// WIP lots with their target tool and recipe
///
/// ORDER BY: TargetEqpId, Carrier
pub fn list_targets(conn: &Connection) -> Result<Vec<WipRow>> {
    let mut stmt = conn.prepare(
        "SELECT Carrier, LotId, Technology, Qty, TargetEqpId, TargetPPID
         FROM DC_Wips
         ORDER BY TargetEqpId, Carrier",
    )?;
    let rows = stmt.query_map([], row_to_wip)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Number of WIP rows
pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM DC_Wips", [], |r| r.get(0))
        .map_err(Into::into)
}

/// Insert one WIP row (no duplicate check)
pub fn insert(conn: &Connection, wip: &NewWip<'_>) -> Result<()> {
    conn.execute(
        "INSERT INTO DC_Wips (Priority, Technology, Carrier, LotId, Qty, PartName,
                              CurrentStage, CurrentStep, TargetStage, TargetStep,
                              TargetEqpId, TargetPPID)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            wip.priority,
            wip.technology,
            wip.carrier,
            wip.lot_id,
            wip.qty,
            wip.part_name,
            wip.current_stage,
            wip.current_step,
            wip.target_stage,
            wip.target_step,
            wip.target_eqp_id,
            wip.target_ppid,
        ],
    )
    .with_context(|| format!("Failed to insert WIP {}", wip.lot_id))?;
    Ok(())
}

fn row_to_wip(row: &Row) -> rusqlite::Result<WipRow> {
    Ok(WipRow {
        carrier: row.get(0)?,
        lot_id: row.get(1)?,
        technology: row.get(2)?,
        qty: row.get(3)?,
        target_eqp_id: row.get(4)?,
        target_ppid: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;

    fn wip<'a>(carrier: &'a str, lot_id: &'a str, target: &'a str) -> NewWip<'a> {
        NewWip {
            priority: 3,
            technology: "T8-HV",
            carrier,
            lot_id,
            qty: 24,
            part_name: "WA0050-FN50-V-S-2",
            current_stage: "BL-OX",
            current_step: "OX01",
            target_stage: "G-SIO",
            target_step: "FDP02",
            target_eqp_id: target,
            target_ppid: "GSIO5F2",
        }
    }

    #[test]
    fn test_list_targets_ordering() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        insert(&conn, &wip("C30002", "LT30002.1", "DVETC26")).unwrap();
        insert(&conn, &wip("C40001", "LT40001.1", "DVETC25")).unwrap();
        insert(&conn, &wip("C30001", "LT30001.1", "DVETC26")).unwrap();

        let rows = list_targets(&conn).unwrap();
        let carriers: Vec<_> = rows.iter().map(|r| r.carrier.as_str()).collect();
        assert_eq!(carriers, vec!["C40001", "C30001", "C30002"]);
        assert_eq!(rows[0].qty, 24);
        assert_eq!(rows[0].target_ppid, "GSIO5F2");
    }

    #[test]
    fn test_insert_does_not_deduplicate() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        let row = wip("C30001", "LT30001.1", "DVETC26");
        insert(&conn, &row).unwrap();
        insert(&conn, &row).unwrap();

        assert_eq!(count(&conn).unwrap(), 2);
    }
}
