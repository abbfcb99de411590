//! DC_Actl queries

use super::types::{ActlRow, NewActl};
use crate::database::sql::{format_timestamp, in_clause, parse_timestamp};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{params, params_from_iter, types::Value, Connection, Row};

const ACTL_COLUMNS: &str = "EqpId, LotId, LotType, TrackInTime";

/// Every actl record
///
/// ORDER BY: EqpId, TrackInTime
pub fn list_all(conn: &Connection) -> Result<Vec<ActlRow>> {
    let sql = format!(
        "SELECT {} FROM DC_Actl ORDER BY EqpId, TrackInTime",
        ACTL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], row_to_actl)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Actl records on one tool
///
/// ORDER BY: TrackInTime, Id
pub fn list_for_equipment(conn: &Connection, eqp_id: &str) -> Result<Vec<ActlRow>> {
    let sql = format!(
        "SELECT {} FROM DC_Actl WHERE EqpId = ?1 ORDER BY TrackInTime, Id",
        ACTL_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![eqp_id], row_to_actl)?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Subset of `lot_ids` that have at least one actl record on `eqp_id`
///
/// ORDER BY: LotId
pub fn tracked_lots(conn: &Connection, eqp_id: &str, lot_ids: &[String]) -> Result<Vec<String>> {
    let sql = format!(
        "SELECT DISTINCT LotId FROM DC_Actl
         WHERE EqpId = ?1 AND LotId IN ({})
         ORDER BY LotId",
        in_clause(2, lot_ids.len())
    );

    let mut values = Vec::with_capacity(lot_ids.len() + 1);
    values.push(Value::Text(eqp_id.to_string()));
    values.extend(lot_ids.iter().cloned().map(Value::Text));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values), |r| r.get(0))?;
    rows.collect::<::std::result::Result<Vec<_>, _>>()
        .map_err(Into::into)
}

/// Actl records whose track-in time lies after `now`
///
/// Compared as parsed timestamps, since the backend may store a `T`
/// separator or fractional seconds that break text comparison.
/// An unparseable TrackInTime is an error.
///
/// ORDER BY: parsed TrackInTime, Id
pub fn tracked_in_after(conn: &Connection, now: NaiveDateTime) -> Result<Vec<ActlRow>> {
    let sql = format!("SELECT {} FROM DC_Actl ORDER BY Id", ACTL_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], row_to_actl)?
        .collect::<::std::result::Result<Vec<_>, _>>()?;

    let mut future = Vec::new();
    for row in rows {
        let ts = parse_timestamp(&row.track_in_time)
            .with_context(|| format!("DC_Actl row for {} on {}", row.lot_id, row.eqp_id))?;
        if ts > now {
            future.push((ts, row));
        }
    }
    // Stable sort keeps Id order among equal times
    future.sort_by_key(|(ts, _)| *ts);
    Ok(future.into_iter().map(|(_, row)| row).collect())
}

/// Number of actl rows
pub fn count(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM DC_Actl", [], |r| r.get(0))
        .map_err(Into::into)
}

/// Insert one actl record (no duplicate check)
pub fn insert(conn: &Connection, actl: &NewActl<'_>) -> Result<()> {
    conn.execute(
        "INSERT INTO DC_Actl (EqpId, LotId, LotType, TrackInTime) VALUES (?1, ?2, ?3, ?4)",
        params![
            actl.eqp_id,
            actl.lot_id,
            actl.lot_type,
            format_timestamp(actl.track_in_time),
        ],
    )
    .with_context(|| format!("Failed to insert actl {} on {}", actl.lot_id, actl.eqp_id))?;
    Ok(())
}

fn row_to_actl(row: &Row) -> rusqlite::Result<ActlRow> {
    Ok(ActlRow {
        eqp_id: row.get(0)?,
        lot_id: row.get(1)?,
        lot_type: row.get(2)?,
        track_in_time: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::init_schema;
    use crate::database::sql::minutes_before;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        for (eqp, lot, minutes) in [
            ("DVETC27", "LT30002.1", 121),
            ("DVETC26", "LT20005.1", 15),
            ("DVETC26", "LT20001.1", 180),
            ("DVETC27", "LT30001.1", 120),
        ] {
            insert(
                &conn,
                &NewActl {
                    eqp_id: eqp,
                    lot_id: lot,
                    lot_type: "PS",
                    track_in_time: minutes_before(now(), minutes).unwrap(),
                },
            )
            .unwrap();
        }
        conn
    }

    #[test]
    fn test_list_all_orders_by_tool_then_time() {
        let conn = seeded();
        let lots: Vec<_> = list_all(&conn)
            .unwrap()
            .into_iter()
            .map(|r| r.lot_id)
            .collect();
        assert_eq!(lots, vec!["LT20001.1", "LT20005.1", "LT30002.1", "LT30001.1"]);
    }

    #[test]
    fn test_list_for_equipment() {
        let conn = seeded();
        let rows = list_for_equipment(&conn, "DVETC26").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].track_in_time, "2025-11-12 06:00:00");
        assert!(rows.iter().all(|r| r.eqp_id == "DVETC26"));
    }

    #[test]
    fn test_tracked_lots_filters_by_tool() {
        let conn = seeded();
        let lots = vec![
            "LT30001.1".to_string(),
            "LT20001.1".to_string(),
            "LT99999.1".to_string(),
        ];
        assert_eq!(
            tracked_lots(&conn, "DVETC27", &lots).unwrap(),
            vec!["LT30001.1"]
        );
        assert!(tracked_lots(&conn, "DVETC27", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_tracked_in_after() {
        let conn = seeded();
        insert(
            &conn,
            &NewActl {
                eqp_id: "DVETC39",
                lot_id: "LT40001.1",
                lot_type: "PS",
                track_in_time: now() + chrono::Duration::minutes(5),
            },
        )
        .unwrap();

        let future = tracked_in_after(&conn, now()).unwrap();
        assert_eq!(future.len(), 1);
        assert_eq!(future[0].lot_id, "LT40001.1");
    }

    #[test]
    fn test_tracked_in_after_reads_backend_formats() {
        let conn = seeded();
        conn.execute_batch(
            "INSERT INTO DC_Actl (EqpId, LotId, LotType, TrackInTime) VALUES
                ('DVETC38', 'SY79874.1', 'PS', '2025-11-12T06:00:00'),
                ('DVETC38', 'SY79872.1', 'PS', '2025-11-12 08:59:59.900'),
                ('DVETC38', 'SY79906.1', 'PS', '2025-11-12T09:30:00.250'),
                ('DVETC38', 'SY78841.1', 'PS', '2025-11-12 09:10:00');",
        )
        .unwrap();

        let lots: Vec<_> = tracked_in_after(&conn, now())
            .unwrap()
            .into_iter()
            .map(|r| r.lot_id)
            .collect();
        assert_eq!(lots, vec!["SY78841.1", "SY79906.1"]);
    }

    #[test]
    fn test_tracked_in_after_rejects_garbage() {
        let conn = seeded();
        conn.execute_batch(
            "INSERT INTO DC_Actl (EqpId, LotId, LotType, TrackInTime)
             VALUES ('DVETC38', 'SY79874.1', 'PS', 'yesterday');",
        )
        .unwrap();

        let err = tracked_in_after(&conn, now()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::database::Error>(),
            Some(crate::database::Error::InvalidTimestamp(_))
        ));
    }
}
