//! DC_Eqps queries

use super::types::{EquipmentStatus, NewEquipment};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

/// All equipment names, in insertion order
pub fn list_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT Name FROM DC_Eqps ORDER BY Id")?;
    let rows = stmt.query_map([], |r| r.get(0))?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Number of equipment rows
pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM DC_Eqps", [], |r| r.get(0))
        .map_err(Into::into)
}

/// WIP, actl and batch counts per tool
///
/// ORDER BY: Type, Name
pub fn status_by_equipment(conn: &Connection) -> Result<Vec<EquipmentStatus>> {
    let mut stmt = conn.prepare(
        "SELECT
            e.Name,
            e.Type,
            e.Line,
            (SELECT COUNT(*) FROM DC_Wips w WHERE w.TargetEqpId = e.Name) AS WipCount,
            (SELECT COUNT(*) FROM DC_Actl a WHERE a.EqpId = e.Name) AS ActlCount,
            (SELECT COUNT(DISTINCT b.BatchId) FROM DC_Batch b
              WHERE b.EqpId = e.Name AND b.Step = 1) AS BatchCount
         FROM DC_Eqps e
         ORDER BY e.Type, e.Name",
    )?;
    let rows = stmt.query_map([], row_to_status)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Insert one equipment row
pub fn insert(conn: &Connection, eqp: &NewEquipment<'_>) -> Result<()> {
    conn.execute(
        "INSERT INTO DC_Eqps (Name, Type, Line) VALUES (?1, ?2, ?3)",
        params![eqp.name, eqp.kind, eqp.line],
    )
    .with_context(|| format!("Failed to insert equipment {}", eqp.name))?;
    Ok(())
}

fn row_to_status(row: &Row) -> rusqlite::Result<EquipmentStatus> {
    Ok(EquipmentStatus {
        name: row.get(0)?,
        kind: row.get(1)?,
        line: row.get(2)?,
        wip_count: row.get(3)?,
        actl_count: row.get(4)?,
        batch_count: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;

    #[test]
    fn test_status_counts_per_tool() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute_batch(
            "INSERT INTO DC_Eqps (Name, Type, Line) VALUES
                ('DVETC38', 'G_POLY', 'A'),
                ('DVETC26', 'G_SIO', 'A'),
                ('DVETC25', 'G_SIO', 'A');
             INSERT INTO DC_Wips (Priority, Technology, Carrier, LotId, Qty, TargetEqpId)
                VALUES (1, 'T8-HV', 'C1', 'L1.1', 24, 'DVETC26'),
                       (1, 'T8-HV', 'C2', 'L2.1', 24, 'DVETC26');
             INSERT INTO DC_Actl (EqpId, LotId, LotType, TrackInTime)
                VALUES ('DVETC38', 'SY1.1', 'PS', '2025-11-11 10:00:00');
             INSERT INTO DC_Batch (BatchId, Step, CarrierId, EqpId, PPID, CreatedAt) VALUES
                ('B1', 1, 'C1', 'DVETC25', 'P1', '2025-11-11 10:00:00'),
                ('B1', 1, 'C2', 'DVETC25', 'P1', '2025-11-11 10:00:00'),
                ('B1', 2, 'C1', 'DVETC26', 'P2', '2025-11-11 10:00:00'),
                ('B2', 1, 'C3', 'DVETC25', 'P1', '2025-11-11 11:00:00');",
        )
        .unwrap();

        let status = status_by_equipment(&conn).unwrap();
        let names: Vec<_> = status.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["DVETC38", "DVETC25", "DVETC26"]);

        let dvetc25 = &status[1];
        assert_eq!(dvetc25.batch_count, 2);
        assert_eq!(dvetc25.wip_count, 0);

        // Step-2 rows do not count as batches on a tool
        let dvetc26 = &status[2];
        assert_eq!(dvetc26.wip_count, 2);
        assert_eq!(dvetc26.batch_count, 0);

        assert_eq!(status[0].actl_count, 1);
    }

    #[test]
    fn test_insert_and_list_names() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        insert(&conn, &NewEquipment { name: "DVETC25", kind: "G_SIO", line: "A" }).unwrap();
        insert(&conn, &NewEquipment { name: "DVETC38", kind: "G_POLY", line: "A" }).unwrap();

        assert_eq!(list_names(&conn).unwrap(), vec!["DVETC25", "DVETC38"]);
        assert_eq!(count(&conn).unwrap(), 2);
    }
}
