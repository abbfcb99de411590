//! `overview`: WIPs, actl records, batch summary and per-tool counts

use super::REPORT_WIDTH;
use crate::database::CoordinatorDb;
use crate::queries::{actls, batches, equipment, wips, ActlRow, BatchSummary, EquipmentStatus, WipRow};
use crate::report::{banner, write_json, Column, OutputFormat, Table};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

const WIP_COLUMNS: [Column; 6] = [
    Column::new("Carrier", 10),
    Column::new("LotId", 15),
    Column::new("Technology", 10),
    Column::new("Qty", 5),
    Column::new("TargetEqpId", 12),
    Column::new("TargetPPID", 12),
];

pub(crate) const ACTL_COLUMNS: [Column; 4] = [
    Column::new("EqpId", 10),
    Column::new("LotId", 15),
    Column::new("LotType", 10),
    Column::new("TrackInTime", 25),
];

const BATCH_COLUMNS: [Column; 4] = [
    Column::new("BatchId", 20),
    Column::new("Records", 10),
    Column::new("Carriers", 30),
    Column::new("CreatedAt", 25),
];

const EQUIPMENT_COLUMNS: [Column; 6] = [
    Column::new("Name", 10),
    Column::new("Type", 10),
    Column::new("Line", 6),
    Column::new("WIP", 6),
    Column::new("Actl", 6),
    Column::new("Batches", 8),
];

/// Everything the overview prints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub wips: Vec<WipRow>,
    pub actls: Vec<ActlRow>,
    pub batches: Vec<BatchSummary>,
    pub equipment: Vec<EquipmentStatus>,
}

pub fn run<W: Write>(db: &CoordinatorDb, out: &mut W, format: OutputFormat) -> Result<Overview> {
    let overview = Overview {
        wips: wips::list_targets(db.conn())?,
        actls: actls::list_all(db.conn())?,
        batches: batches::summaries(db.conn())?,
        equipment: equipment::status_by_equipment(db.conn())?,
    };

    if format == OutputFormat::Json {
        write_json(out, &overview)?;
        return Ok(overview);
    }

    banner(out, "DC_Wips - work in process", REPORT_WIDTH)?;
    let table = Table::new(&WIP_COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for wip in &overview.wips {
        table.write_row(
            out,
            &[
                &wip.carrier,
                &wip.lot_id,
                &wip.technology,
                &wip.qty,
                &wip.target_eqp_id,
                &wip.target_ppid,
            ],
        )?;
    }

    writeln!(out)?;
    banner(out, "DC_Actl - actual processing", REPORT_WIDTH)?;
    write_actls(out, &overview.actls, REPORT_WIDTH)?;

    writeln!(out)?;
    banner(out, "DC_Batch - batch summary", REPORT_WIDTH)?;
    let table = Table::new(&BATCH_COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for batch in &overview.batches {
        let created_at = batch.created_at.as_deref().unwrap_or("");
        table.write_row(
            out,
            &[&batch.batch_id, &batch.records, &batch.carriers, &created_at],
        )?;
    }

    writeln!(out)?;
    banner(out, "Status by equipment", REPORT_WIDTH)?;
    let table = Table::new(&EQUIPMENT_COLUMNS, REPORT_WIDTH);
    table.write_header(out)?;
    for eqp in &overview.equipment {
        table.write_row(
            out,
            &[
                &eqp.name,
                &eqp.kind,
                &eqp.line,
                &eqp.wip_count,
                &eqp.actl_count,
                &eqp.batch_count,
            ],
        )?;
    }

    Ok(overview)
}

/// Actl table (header always printed)
pub(crate) fn write_actls<W: Write>(out: &mut W, rows: &[ActlRow], rule_width: usize) -> Result<()> {
    let table = Table::new(&ACTL_COLUMNS, rule_width);
    table.write_header(out)?;
    for row in rows {
        table.write_row(
            out,
            &[&row.eqp_id, &row.lot_id, &row.lot_type, &row.track_in_time],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_database_prints_headers_only() {
        let temp_dir = TempDir::new().unwrap();
        let db = CoordinatorDb::create(temp_dir.path().join("coordinator.db")).unwrap();

        let mut out = Vec::new();
        let overview = run(&db, &mut out, OutputFormat::Table).unwrap();
        assert!(overview.wips.is_empty());
        assert!(overview.equipment.is_empty());

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(&"-".repeat(REPORT_WIDTH)).count(), 4);
        assert!(text.contains("TargetPPID"));
        assert!(text.contains("TrackInTime"));
        assert!(text.contains("Carriers"));
        assert!(text.contains("Batches"));
    }

    #[test]
    fn test_sections_are_filled() {
        let temp_dir = TempDir::new().unwrap();
        let db = CoordinatorDb::create(temp_dir.path().join("coordinator.db")).unwrap();
        db.conn()
            .execute_batch(
                "INSERT INTO DC_Eqps (Name, Type, Line) VALUES ('DVETC26', 'G_SIO', 'A');
                 INSERT INTO DC_Wips (Priority, Technology, Carrier, LotId, Qty, TargetEqpId, TargetPPID)
                    VALUES (3, 'T8-HV', 'C30001', 'LT30001.1', 24, 'DVETC26', 'GSIO5F2');
                 INSERT INTO DC_Actl (EqpId, LotId, LotType, TrackInTime)
                    VALUES ('DVETC26', 'LT20001.1', 'PS', '2025-11-11 18:00:00');
                 INSERT INTO DC_Batch (BatchId, Step, CarrierId, EqpId, PPID, CreatedAt)
                    VALUES ('B1', 1, 'C30001', 'DVETC26', 'PPID1', '2025-11-11 21:57:40');",
            )
            .unwrap();

        let mut out = Vec::new();
        let overview = run(&db, &mut out, OutputFormat::Table).unwrap();
        assert_eq!(overview.equipment[0].wip_count, 1);
        assert_eq!(overview.equipment[0].actl_count, 1);
        assert_eq!(overview.equipment[0].batch_count, 1);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("C30001     LT30001.1       T8-HV      24    DVETC26      GSIO5F2"));
        assert!(text.contains("DVETC26    LT20001.1       PS         2025-11-11 18:00:00"));
        assert!(text.contains("DVETC26    G_SIO      A      1      1      1"));
    }
}
