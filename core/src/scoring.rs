//! Insight engine — derived metrics, health score and churn risk.
//!
//! The health score is the sum of four sub-scores, each read from an ordered
//! threshold table (first matching step wins, otherwise the fallback):
//!
//!   factor      input                 steps                   fallback
//!   usage       messages_processed    <100k → 10, <1M → 25    40
//!   automation  automation_count      =0 → 0, ≤3 → 10         20
//!   footprint   total_records         <10k → 5, <50k → 15     20
//!   billing     billing_utilisation   =0 → 0, ≤90 → 10        20
//!
//! Inactive accounts score 0 regardless of sub-scores.
//! Churn risk: inactive → churned, score < 40 → at_risk, else healthy.
//!
//! These boundaries are contractual. Change them only with the tests.

use crate::{
    record::{AccountInsight, AccountRecord},
    types::{round2, ChurnRisk, HealthScore},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Active accounts below this score are at risk.
pub const AT_RISK_BELOW: HealthScore = 40;

// ── Threshold tables ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    LessThan(f64),
    AtMost(f64),
    EqualTo(f64),
}

impl Threshold {
    pub fn matches(&self, value: f64) -> bool {
        match *self {
            Threshold::LessThan(limit) => value < limit,
            Threshold::AtMost(limit)   => value <= limit,
            Threshold::EqualTo(limit)  => value == limit,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ThresholdTable {
    pub steps:     &'static [(Threshold, HealthScore)],
    pub otherwise: HealthScore,
}

impl ThresholdTable {
    pub fn score(&self, value: f64) -> HealthScore {
        self.steps
            .iter()
            .find(|(threshold, _)| threshold.matches(value))
            .map(|(_, score)| *score)
            .unwrap_or(self.otherwise)
    }

    /// Largest score this table can produce.
    pub fn max_score(&self) -> HealthScore {
        self.steps
            .iter()
            .map(|(_, score)| *score)
            .fold(self.otherwise, HealthScore::max)
    }
}

pub const USAGE_TABLE: ThresholdTable = ThresholdTable {
    steps: &[
        (Threshold::LessThan(100_000.0), 10),
        (Threshold::LessThan(1_000_000.0), 25),
    ],
    otherwise: 40,
};

pub const AUTOMATION_TABLE: ThresholdTable = ThresholdTable {
    steps: &[
        (Threshold::EqualTo(0.0), 0),
        (Threshold::AtMost(3.0), 10),
    ],
    otherwise: 20,
};

pub const FOOTPRINT_TABLE: ThresholdTable = ThresholdTable {
    steps: &[
        (Threshold::LessThan(10_000.0), 5),
        (Threshold::LessThan(50_000.0), 15),
    ],
    otherwise: 20,
};

pub const BILLING_TABLE: ThresholdTable = ThresholdTable {
    steps: &[
        (Threshold::EqualTo(0.0), 0),
        (Threshold::AtMost(90.0), 10),
    ],
    otherwise: 20,
};

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Per-factor contributions before the inactive override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthBreakdown {
    pub usage:      HealthScore,
    pub automation: HealthScore,
    pub footprint:  HealthScore,
    pub billing:    HealthScore,
}

impl HealthBreakdown {
    /// `billing_utilisation` is the unrounded percentage.
    pub fn for_record(record: &AccountRecord, billing_utilisation: f64) -> Self {
        Self {
            usage:      USAGE_TABLE.score(record.messages_processed as f64),
            automation: AUTOMATION_TABLE.score(record.automation_count as f64),
            footprint:  FOOTPRINT_TABLE.score(record.total_records as f64),
            billing:    BILLING_TABLE.score(billing_utilisation),
        }
    }

    pub fn total(&self) -> HealthScore {
        self.usage + self.automation + self.footprint + self.billing
    }
}

/// Messages processed per seat; 0 when there are no seats.
pub fn seat_utilisation(messages_processed: u64, total_seats: u64) -> f64 {
    if total_seats > 0 {
        messages_processed as f64 / total_seats as f64
    } else {
        0.0
    }
}

/// Percentage of sent notifications that were billed; 0 when nothing was sent.
pub fn billing_utilisation(notifications_billed: u64, notifications_sent: u64) -> f64 {
    if notifications_sent > 0 {
        (notifications_billed as f64 / notifications_sent as f64) * 100.0
    } else {
        0.0
    }
}

pub fn health_score(record: &AccountRecord, billing_utilisation: f64) -> HealthScore {
    if record.is_inactive() {
        return 0;
    }
    HealthBreakdown::for_record(record, billing_utilisation).total()
}

pub fn churn_risk(record: &AccountRecord, health_score: HealthScore) -> ChurnRisk {
    if record.is_inactive() {
        ChurnRisk::Churned
    } else if health_score < AT_RISK_BELOW {
        ChurnRisk::AtRisk
    } else {
        ChurnRisk::Healthy
    }
}

/// Enrich a validated record. Pure and deterministic.
pub fn compute_insight(record: AccountRecord, report_date: NaiveDate) -> AccountInsight {
    let total_seats = record.total_seats();
    let seat_util = seat_utilisation(record.messages_processed, total_seats);
    let billing_util = billing_utilisation(record.notifications_billed, record.notifications_sent);

    // Scored on the unrounded utilisation; rounding is for presentation only.
    let health_score = health_score(&record, billing_util);
    let churn_risk = churn_risk(&record, health_score);

    AccountInsight {
        record,
        total_seats,
        seat_utilisation: round2(seat_util),
        billing_utilisation: round2(billing_util),
        health_score,
        churn_risk,
        report_date,
    }
}
