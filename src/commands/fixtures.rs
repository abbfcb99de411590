//! Fixed test scenarios
//!
//! `SEED_*` is the scenario `seed` inserts on top of whatever is already in
//! the database. `BASELINE_*` is the starting data `init --baseline` writes
//! into an empty database (the same rows the backend writes on first start).
//!
//! Actl offsets are minutes before the moment the command runs.

use crate::queries::{NewCarrierStep, NewEquipment, NewWip};

/// Actl template: track-in time is `now - minutes_ago`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActlSeed {
    pub eqp_id: &'static str,
    pub lot_id: &'static str,
    pub lot_type: &'static str,
    pub minutes_ago: i64,
}

const fn actl(eqp_id: &'static str, lot_id: &'static str, minutes_ago: i64) -> ActlSeed {
    ActlSeed {
        eqp_id,
        lot_id,
        lot_type: "PS",
        minutes_ago,
    }
}

#[allow(clippy::too_many_arguments)]
const fn wip(
    priority: i64,
    technology: &'static str,
    carrier: &'static str,
    lot_id: &'static str,
    qty: i64,
    part_name: &'static str,
    current: (&'static str, &'static str),
    target: (&'static str, &'static str),
    target_eqp_id: &'static str,
    target_ppid: &'static str,
) -> NewWip<'static> {
    NewWip {
        priority,
        technology,
        carrier,
        lot_id,
        qty,
        part_name,
        current_stage: current.0,
        current_step: current.1,
        target_stage: target.0,
        target_step: target.1,
        target_eqp_id,
        target_ppid,
    }
}

const fn step(
    carrier: &'static str,
    qty: i64,
    step: i64,
    eqp_id: &'static str,
    ppid: &'static str,
) -> NewCarrierStep<'static> {
    NewCarrierStep {
        carrier,
        qty,
        step,
        eqp_id,
        ppid,
    }
}

pub const SEED_WIPS: [NewWip<'static>; 7] = [
    // DVETC26
    wip(3, "T8-HV", "C30001", "LT30001.1", 24, "WA0050-FN50-V-S-2", ("BL-OX", "OX01"), ("G-SIO", "FDP02"), "DVETC26", "GSIO5F2"),
    wip(4, "T8-HV", "C30002", "LT30002.1", 24, "WA0050-FN50-V-S-2", ("BL-OX", "OX01"), ("G-SIO", "FDP02"), "DVETC26", "GSIO5F2"),
    // DVETC27
    wip(2, "T9-MV", "C40001", "LT40001.1", 25, "WA0060-FN60-V-S-3", ("BL-NI", "NI01"), ("G-SIO", "FDP03"), "DVETC27", "GSIO7F3"),
    // DVETC38, lots already tracked in by the baseline
    wip(1, "T10-PS", "C50001", "SY79874.1", 23, "WA0070-FN70-V-S-4", ("BL-POLY", "POLY01"), ("G-POLY", "FDP04"), "DVETC38", "GPOLY2F1"),
    wip(1, "T10-PS", "C50002", "SY79872.1", 23, "WA0070-FN70-V-S-4", ("BL-POLY", "POLY01"), ("G-POLY", "FDP04"), "DVETC38", "GPOLY2F1"),
    wip(1, "T10-PS", "C50003", "SY79906.1", 23, "WA0070-FN70-V-S-4", ("BL-POLY", "POLY01"), ("G-POLY", "FDP04"), "DVETC38", "GPOLY2F1"),
    // DVETC39
    wip(2, "T11-HV", "C60001", "LT60001.1", 25, "WA0080-FN80-V-S-5", ("BL-TI", "TI01"), ("G-POLY", "FDP05"), "DVETC39", "GPOLY3F2"),
];

pub const SEED_ACTLS: [ActlSeed; 16] = [
    // DVETC26 in process
    actl("DVETC26", "LT20001.1", 180),
    actl("DVETC26", "LT20002.1", 180),
    actl("DVETC26", "LT20003.1", 182),
    actl("DVETC26", "LT20004.1", 183),
    // DVETC26 waiting
    actl("DVETC26", "LT20005.1", 15),
    actl("DVETC26", "LT20006.1", 15),
    actl("DVETC26", "LT20007.1", 16),
    // DVETC27 in process
    actl("DVETC27", "LT30001.1", 120),
    actl("DVETC27", "LT30002.1", 121),
    actl("DVETC27", "LT30003.1", 122),
    // DVETC27 waiting
    actl("DVETC27", "LT30004.1", 10),
    actl("DVETC27", "LT30005.1", 11),
    // DVETC39 in process
    actl("DVETC39", "LT40001.1", 90),
    actl("DVETC39", "LT40002.1", 92),
    actl("DVETC39", "LT40003.1", 93),
    actl("DVETC39", "LT40004.1", 94),
];

pub const SEED_CARRIER_STEPS: [NewCarrierStep<'static>; 10] = [
    step("C30001", 24, 1, "DVETC26", "PPID_C30001_1"),
    step("C30001", 24, 2, "DVETC27", "PPID_C30001_2"),
    step("C30001", 24, 3, "DVETC28", "PPID_C30001_3"),
    step("C30002", 24, 1, "DVETC26", "PPID_C30002_1"),
    step("C30002", 24, 2, "DVETC27", "PPID_C30002_2"),
    step("C30002", 24, 3, "DVETC28", "PPID_C30002_3"),
    step("C40001", 25, 1, "DVETC27", "PPID_C40001_1"),
    step("C40001", 25, 2, "DVETC28", "PPID_C40001_2"),
    step("C60001", 25, 1, "DVETC39", "PPID_C60001_1"),
    step("C60001", 25, 2, "DVETC38", "PPID_C60001_2"),
];

pub const BASELINE_EQUIPMENT: [NewEquipment<'static>; 6] = [
    NewEquipment { name: "DVETC25", kind: "G_SIO", line: "A" },
    NewEquipment { name: "DVETC26", kind: "G_SIO", line: "A" },
    NewEquipment { name: "DVETC27", kind: "G_SIO", line: "B" },
    NewEquipment { name: "DVETC28", kind: "G_SIO", line: "B" },
    NewEquipment { name: "DVETC38", kind: "G_POLY", line: "A" },
    NewEquipment { name: "DVETC39", kind: "G_POLY", line: "A" },
];

pub const BASELINE_WIPS: [NewWip<'static>; 2] = [
    wip(5, "T6-MV", "C22667", "JM86146.1", 25, "WA0037-FN46-V-S-1", ("BL-AN", "DAN01"), ("G-SIO", "FDP01"), "DVETC25", "GSIO3F4"),
    wip(5, "T6-MV", "C22668", "JM86147.1", 25, "WA0037-FN46-V-S-1", ("BL-AN", "DAN01"), ("G-SIO", "FDP01"), "DVETC25", "GSIO3F4"),
];

pub const BASELINE_CARRIER_STEPS: [NewCarrierStep<'static>; 8] = [
    step("C22667", 25, 1, "DVETC25", "PPID1"),
    step("C22667", 25, 2, "DVETC26", "PPID2"),
    step("C22667", 25, 3, "DVETC27", "PPID3"),
    step("C22667", 25, 4, "DVETC28", "PPID4"),
    step("C22668", 25, 1, "DVETC25", "PPID1"),
    step("C22668", 25, 2, "DVETC26", "PPID2"),
    step("C22668", 25, 3, "DVETC27", "PPID3"),
    step("C22668", 25, 4, "DVETC28", "PPID4"),
];

pub const BASELINE_ACTLS: [ActlSeed; 12] = [
    actl("DVETC38", "SY79874.1", 180),
    actl("DVETC38", "SY79872.1", 180),
    actl("DVETC38", "SY79906.1", 180),
    actl("DVETC38", "SY78841.1", 180),
    actl("DVETC38", "SY79885.1", 180),
    actl("DVETC38", "SY79903.1", 180),
    actl("DVETC38", "SY78840.1", 15),
    actl("DVETC38", "SY79506.1", 15),
    actl("DVETC38", "SY78842.1", 15),
    actl("DVETC38", "SY78360.1", 15),
    actl("DVETC38", "SY79472.1", 15),
    actl("DVETC38", "SY79509.1", 15),
];
