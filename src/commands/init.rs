//! `init`: create a scratch coordinator database
//!
//! Installs the schema on a new or existing file. With `baseline`, an empty
//! DC_Eqps gets the starting tools, WIPs, carrier steps and actl records the
//! backend writes on its first start.

use super::fixtures::{BASELINE_ACTLS, BASELINE_CARRIER_STEPS, BASELINE_EQUIPMENT, BASELINE_WIPS};
use super::seed::insert_actls;
use crate::database::{schema, CoordinatorDb};
use crate::queries::{carrier_steps, equipment, wips};
use crate::report::{write_json, OutputFormat};
use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitOutcome {
    pub path: String,
    pub tables: Vec<String>,
    pub baseline_inserted: bool,
}

pub fn run<W: Write>(
    path: &Path,
    baseline: bool,
    now: NaiveDateTime,
    out: &mut W,
    format: OutputFormat,
) -> Result<InitOutcome> {
    let mut db = CoordinatorDb::create(path)?;

    let mut baseline_inserted = false;
    if baseline {
        if equipment::count(db.conn())? == 0 {
            let tx = db.transaction()?;
            for eqp in &BASELINE_EQUIPMENT {
                equipment::insert(&tx, eqp)?;
            }
            for wip in &BASELINE_WIPS {
                wips::insert(&tx, wip)?;
            }
            for step in &BASELINE_CARRIER_STEPS {
                carrier_steps::insert(&tx, step)?;
            }
            insert_actls(&tx, &BASELINE_ACTLS, now)?;
            tx.commit()?;
            baseline_inserted = true;
            info!(path = %path.display(), "inserted baseline data");
        } else {
            info!(path = %path.display(), "DC_Eqps not empty, baseline skipped");
        }
    }

    let outcome = InitOutcome {
        path: db.path().display().to_string(),
        tables: schema::existing_tables(db.conn())?,
        baseline_inserted,
    };

    if format == OutputFormat::Json {
        write_json(out, &outcome)?;
        return Ok(outcome);
    }

    writeln!(out, "Database: {}", outcome.path)?;
    writeln!(out, "Tables: {}", outcome.tables.join(", "))?;
    if baseline_inserted {
        writeln!(out, "✅ Baseline data inserted")?;
        writeln!(out, "  - {} equipments", BASELINE_EQUIPMENT.len())?;
        writeln!(out, "  - {} WIP records", BASELINE_WIPS.len())?;
        writeln!(out, "  - {} Carrier Steps records", BASELINE_CARRIER_STEPS.len())?;
        writeln!(out, "  - {} Actual processing records", BASELINE_ACTLS.len())?;
    } else if baseline {
        writeln!(out, "Equipment already present, baseline skipped")?;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::actls;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 12)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_init_without_baseline_creates_empty_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("coordinator.db");

        let outcome = run(&path, false, now(), &mut Vec::new(), OutputFormat::Table).unwrap();

        assert_eq!(outcome.tables.len(), 6);
        assert!(!outcome.baseline_inserted);
        let db = CoordinatorDb::open_readonly(&path).unwrap();
        assert_eq!(equipment::count(db.conn()).unwrap(), 0);
    }

    #[test]
    fn test_baseline_inserted_once() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("coordinator.db");

        let first = run(&path, true, now(), &mut Vec::new(), OutputFormat::Table).unwrap();
        let mut out = Vec::new();
        let second = run(&path, true, now(), &mut out, OutputFormat::Table).unwrap();

        assert!(first.baseline_inserted);
        assert!(!second.baseline_inserted);
        assert!(String::from_utf8(out).unwrap().contains("baseline skipped"));

        let db = CoordinatorDb::open_readonly(&path).unwrap();
        assert_eq!(equipment::count(db.conn()).unwrap(), 6);
        assert_eq!(wips::count(db.conn()).unwrap(), 2);
        assert_eq!(carrier_steps::count(db.conn()).unwrap(), 8);
        assert_eq!(actls::count(db.conn()).unwrap(), 12);

        let recent = actls::list_for_equipment(db.conn(), "DVETC38").unwrap();
        assert_eq!(recent[0].track_in_time, "2025-11-12 06:00:00");
        assert_eq!(recent[11].track_in_time, "2025-11-12 08:45:00");
    }
}
