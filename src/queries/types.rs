//! Row types returned and accepted by the query functions
//!
//! Read types own their data and serialize for `--json` output.
//! Insert types borrow, so fixed scenarios can live in `const` tables.

use chrono::NaiveDateTime;
use serde::Serialize;

/// DC_Eqps row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equipment {
    pub name: String,
    pub kind: String,
    pub line: String,
}

/// Per-equipment counts for the overview report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentStatus {
    pub name: String,
    pub kind: String,
    pub line: String,
    pub wip_count: i64,
    pub actl_count: i64,
    /// Distinct batches with a step-1 row on this tool
    pub batch_count: i64,
}

/// DC_Wips projection shown in the overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WipRow {
    pub carrier: String,
    pub lot_id: String,
    pub technology: String,
    pub qty: i64,
    pub target_eqp_id: String,
    pub target_ppid: String,
}

/// DC_Actl projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActlRow {
    pub eqp_id: String,
    pub lot_id: String,
    pub lot_type: String,
    pub track_in_time: String,
}

/// DC_Batch row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchRow {
    pub id: i64,
    pub batch_id: String,
    pub step: i64,
    pub carrier_id: String,
    pub eqp_id: String,
    pub ppid: String,
    pub is_processed: i64,
    pub created_at: Option<String>,
}

impl BatchRow {
    pub fn processed(&self) -> bool {
        self.is_processed != 0
    }
}

/// DC_Batch joined with DC_BatchMembers on (BatchId, CarrierId)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchMemberRow {
    pub id: i64,
    pub batch_id: String,
    pub step: i64,
    pub carrier_id: String,
    pub eqp_id: String,
    pub ppid: String,
    pub is_processed: bool,
    pub lot_id: String,
}

/// One DC_Batch group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub batch_id: String,
    pub records: i64,
    /// Comma-joined distinct carrier ids
    pub carriers: String,
    pub created_at: Option<String>,
}

/// Row count per processed flag value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessedCount {
    pub is_processed: bool,
    pub count: i64,
}

/// Processed batch member with no actl record on the batch's tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UntrackedMember {
    pub id: i64,
    pub batch_id: String,
    pub step: i64,
    pub carrier_id: String,
    pub eqp_id: String,
    pub lot_id: String,
}

/// Carrier step whose number does not exceed the previous step of its carrier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRegression {
    pub id: i64,
    pub carrier: String,
    pub step: i64,
    pub previous_step: i64,
}

/// New DC_Eqps row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEquipment<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub line: &'a str,
}

/// New DC_Wips row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewWip<'a> {
    pub priority: i64,
    pub technology: &'a str,
    pub carrier: &'a str,
    pub lot_id: &'a str,
    pub qty: i64,
    pub part_name: &'a str,
    pub current_stage: &'a str,
    pub current_step: &'a str,
    pub target_stage: &'a str,
    pub target_step: &'a str,
    pub target_eqp_id: &'a str,
    pub target_ppid: &'a str,
}

/// New DC_Actl row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewActl<'a> {
    pub eqp_id: &'a str,
    pub lot_id: &'a str,
    pub lot_type: &'a str,
    pub track_in_time: NaiveDateTime,
}

/// New DC_CarrierSteps row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewCarrierStep<'a> {
    pub carrier: &'a str,
    pub qty: i64,
    pub step: i64,
    pub eqp_id: &'a str,
    pub ppid: &'a str,
}
