//! Account records — the validated row, its enriched insight, and rejects.
//!
//! RULE: Records are built once during a load and never mutated.
//! Derived metrics live only on AccountInsight and are never recomputed.

use crate::types::{
    AccountId, ChurnRisk, HealthScore, RowNumber, STATUS_ACTIVE, STATUS_INACTIVE,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One source row before parsing: column header → raw cell text.
pub type RawRow = BTreeMap<String, String>;

/// A validated input row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountRecord {
    pub account_uuid:         AccountId,
    pub account_label:        String,
    pub subscription_status:  String,
    pub admin_seats:          u64,
    pub user_seats:           u64,
    pub read_only_seats:      u64,
    pub total_records:        u64,
    pub automation_count:     u64,
    pub workflow_title:       Option<String>,
    pub messages_processed:   u64,
    pub notifications_sent:   u64,
    pub notifications_billed: u64,
}

impl AccountRecord {
    pub fn is_active(&self) -> bool {
        self.subscription_status == STATUS_ACTIVE
    }

    pub fn is_inactive(&self) -> bool {
        self.subscription_status == STATUS_INACTIVE
    }

    /// Saturates at `u64::MAX`. Validated records never reach it.
    pub fn total_seats(&self) -> u64 {
        self.admin_seats
            .saturating_add(self.user_seats)
            .saturating_add(self.read_only_seats)
    }
}

/// An AccountRecord enriched with derived metrics.
/// Serializes flat: record fields first, derived fields after.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountInsight {
    #[serde(flatten)]
    pub record:              AccountRecord,
    pub total_seats:         u64,
    pub seat_utilisation:    f64,
    pub billing_utilisation: f64,
    pub health_score:        HealthScore,
    pub churn_risk:          ChurnRisk,
    /// Synthetic, see `calendar::ReportCalendar`.
    pub report_date:         NaiveDate,
}

/// A source row that failed parsing or a business rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvalidRow {
    pub row_number: RowNumber,
    pub raw_row:    RawRow,
    pub error:      String,
}
