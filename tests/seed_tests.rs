//! Seed inserter integration tests
//!
//! - `seed` runs are unconditional (no dedup)
//! - track-in times read back relative to the clock
//! - `add-actl` inserts one row per batched lot on the tool

use chrono::{Local, NaiveDateTime};
use coordinator_tools::commands::add_actl::{self, AddActlOptions};
use coordinator_tools::commands::{check, seed};
use coordinator_tools::database::sql::parse_timestamp;
use coordinator_tools::queries::{actls, carrier_steps, wips};
use coordinator_tools::{CoordinatorDb, OutputFormat};
use tempfile::TempDir;

fn scratch_db() -> (TempDir, CoordinatorDb) {
    let temp_dir = TempDir::new().unwrap();
    let db = CoordinatorDb::create(temp_dir.path().join("coordinator.db")).unwrap();
    (temp_dir, db)
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[test]
fn test_seed_twice_doubles_rows() {
    let (_dir, mut db) = scratch_db();

    seed::run(&mut db, now(), &mut Vec::new(), OutputFormat::Table).unwrap();
    seed::run(&mut db, now(), &mut Vec::new(), OutputFormat::Table).unwrap();

    assert_eq!(wips::count(db.conn()).unwrap(), 14);
    assert_eq!(actls::count(db.conn()).unwrap(), 32);
    assert_eq!(carrier_steps::count(db.conn()).unwrap(), 20);
}

#[test]
fn test_seed_lists_existing_equipment() {
    let (_dir, mut db) = scratch_db();
    db.conn()
        .execute_batch(
            "INSERT INTO DC_Eqps (Name, Type, Line) VALUES ('DVETC25', 'G_SIO', 'A'), ('DVETC26', 'G_SIO', 'A');",
        )
        .unwrap();

    let mut out = Vec::new();
    seed::run(&mut db, now(), &mut out, OutputFormat::Table).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Found 2 equipments: [\"DVETC25\", \"DVETC26\"]\n"));
}

#[test]
fn test_seeded_track_ins_are_in_the_past() {
    let (_dir, mut db) = scratch_db();
    let before = now();
    seed::run(&mut db, before, &mut Vec::new(), OutputFormat::Json).unwrap();

    for row in actls::list_all(db.conn()).unwrap() {
        let ts = parse_timestamp(&row.track_in_time).unwrap();
        assert!(ts < now(), "{} not in the past", row.track_in_time);
        assert!(before - ts <= chrono::Duration::minutes(184), "{}", row.track_in_time);
    }

    let report = check::run(&db, now(), &mut Vec::new(), OutputFormat::Json).unwrap();
    assert!(report.future_track_ins.is_empty());
}

#[test]
fn test_second_seed_breaks_step_order() {
    let (_dir, mut db) = scratch_db();
    seed::run(&mut db, now(), &mut Vec::new(), OutputFormat::Json).unwrap();

    let clean = check::run(&db, now(), &mut Vec::new(), OutputFormat::Json).unwrap();
    assert!(clean.step_regressions.is_empty());

    seed::run(&mut db, now(), &mut Vec::new(), OutputFormat::Json).unwrap();
    let report = check::run(&db, now(), &mut Vec::new(), OutputFormat::Json).unwrap();
    let carriers: Vec<_> = report.step_regressions.iter().map(|r| r.carrier.as_str()).collect();
    assert_eq!(carriers, vec!["C30001", "C30002", "C40001", "C60001"]);
}

#[test]
fn test_add_actl_three_hours_ago() {
    let (_dir, mut db) = scratch_db();
    db.conn()
        .execute_batch(
            "INSERT INTO DC_Batch (BatchId, Step, CarrierId, EqpId, PPID, CreatedAt) VALUES
                ('20251111215740745', 4, 'C22667', 'DVETC28', 'PPID4', '2025-11-11 21:57:40');
             INSERT INTO DC_BatchMembers (BatchId, CarrierId, LotId) VALUES
                ('20251111215740745', 'C22667', 'JM86146.1');",
        )
        .unwrap();

    let options = AddActlOptions {
        equipment: "DVETC28".to_string(),
        hours_ago: 3,
        lot_type: "PS".to_string(),
    };
    let started = now();
    let outcome = add_actl::run(&mut db, &options, started, &mut Vec::new(), OutputFormat::Table).unwrap();

    assert_eq!(outcome.added, vec!["JM86146.1"]);
    let ts = parse_timestamp(&outcome.actls[0].track_in_time).unwrap();
    assert!(ts < now());
    let offset = (started - ts).num_seconds();
    assert!((3 * 3600..3 * 3600 + 60).contains(&offset), "offset {}s", offset);
}

#[test]
fn test_failed_seed_leaves_nothing_behind() {
    let (_dir, mut db) = scratch_db();
    seed::run(&mut db, now(), &mut Vec::new(), OutputFormat::Json).unwrap();

    // Carrier steps are inserted last; without the table the run fails there
    db.conn().execute_batch("DROP TABLE DC_CarrierSteps;").unwrap();
    let result = seed::run(&mut db, now(), &mut Vec::new(), OutputFormat::Table);

    assert!(result.is_err());
    assert_eq!(wips::count(db.conn()).unwrap(), 7);
    assert_eq!(actls::count(db.conn()).unwrap(), 16);
}

#[test]
fn test_failed_add_actl_leaves_nothing_behind() {
    let (_dir, mut db) = scratch_db();
    db.conn()
        .execute_batch(
            "INSERT INTO DC_Batch (BatchId, Step, CarrierId, EqpId, PPID, CreatedAt) VALUES
                ('20251111215740745', 4, 'C22667', 'DVETC28', 'PPID4', '2025-11-11 21:57:40');
             INSERT INTO DC_BatchMembers (BatchId, CarrierId, LotId) VALUES
                ('20251111215740745', 'C22667', 'JM86146.1'),
                ('20251111215740745', 'C22667', 'JM86147.1');
             CREATE TRIGGER reject_second_lot BEFORE INSERT ON DC_Actl
             WHEN NEW.LotId = 'JM86147.1'
             BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .unwrap();

    let options = AddActlOptions {
        equipment: "DVETC28".to_string(),
        hours_ago: 3,
        lot_type: "PS".to_string(),
    };
    let result = add_actl::run(&mut db, &options, now(), &mut Vec::new(), OutputFormat::Table);

    assert!(result.is_err());
    assert_eq!(actls::count(db.conn()).unwrap(), 0);
}
