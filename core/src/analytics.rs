//! Aggregation layer — summary KPIs and analytics breakdowns.
//!
//! Every function here is a read-only pass over a snapshot.
//! Empty input is valid and produces zeros, never an error.
//! Status breakdowns always report all three churn buckets, in the order
//! healthy, at_risk, churned.
//! Sums of per-account u64 counters are accumulated and reported as u128,
//! which cannot overflow for any dataset that fits in memory.

use crate::{
    record::AccountInsight,
    store::Dataset,
    types::{round2, ChurnRisk},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_accounts:                      u64,
    pub active_accounts:                     u64,
    pub inactive_accounts:                   u64,
    pub total_notifications_billed:          u128,
    pub avg_notifications_billed_per_active: f64,
    pub total_messages_processed:            u128,
    pub avg_messages_per_account:            f64,
    pub avg_health_score:                    f64,
    pub at_risk_accounts:                    u64,
    pub churned_accounts:                    u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthByStatus {
    pub status:        ChurnRisk,
    pub account_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RevenueByStatus {
    pub status:                     ChurnRisk,
    pub total_notifications_billed: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationsOnDate {
    pub date:                       NaiveDate,
    pub total_notifications_billed: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthCheck {
    pub status:         String,
    pub records_loaded: usize,
    pub invalid_rows:   usize,
}

// ── Aggregations ─────────────────────────────────────────────────────────────

pub fn summary(insights: &[AccountInsight]) -> Summary {
    let total_accounts = insights.len() as u64;
    let active_accounts = insights.iter().filter(|i| i.record.is_active()).count() as u64;
    let inactive_accounts = insights.iter().filter(|i| i.record.is_inactive()).count() as u64;

    let total_notifications_billed: u128 = insights
        .iter()
        .map(|i| u128::from(i.record.notifications_billed))
        .sum();
    let total_messages_processed: u128 = insights
        .iter()
        .map(|i| u128::from(i.record.messages_processed))
        .sum();
    let total_health: u128 = insights.iter().map(|i| u128::from(i.health_score)).sum();

    let avg_notifications_billed_per_active = if active_accounts > 0 {
        total_notifications_billed as f64 / active_accounts as f64
    } else {
        0.0
    };
    let (avg_messages_per_account, avg_health_score) = if total_accounts > 0 {
        (
            total_messages_processed as f64 / total_accounts as f64,
            total_health as f64 / total_accounts as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let count_risk = |risk: ChurnRisk| insights.iter().filter(|i| i.churn_risk == risk).count() as u64;

    Summary {
        total_accounts,
        active_accounts,
        inactive_accounts,
        total_notifications_billed,
        avg_notifications_billed_per_active: round2(avg_notifications_billed_per_active),
        total_messages_processed,
        avg_messages_per_account: round2(avg_messages_per_account),
        avg_health_score: round2(avg_health_score),
        at_risk_accounts: count_risk(ChurnRisk::AtRisk),
        churned_accounts: count_risk(ChurnRisk::Churned),
    }
}

/// Sum `value` per churn bucket. All three buckets are always present.
fn by_churn_risk(
    insights: &[AccountInsight],
    value: impl Fn(&AccountInsight) -> u128,
) -> BTreeMap<ChurnRisk, u128> {
    let mut buckets: BTreeMap<ChurnRisk, u128> =
        ChurnRisk::ALL.iter().map(|risk| (*risk, 0)).collect();
    for insight in insights {
        *buckets.entry(insight.churn_risk).or_default() += value(insight);
    }
    buckets
}

pub fn health_by_status(insights: &[AccountInsight]) -> Vec<HealthByStatus> {
    by_churn_risk(insights, |_| 1)
        .into_iter()
        // A bucket count never exceeds insights.len().
        .map(|(status, count)| HealthByStatus { status, account_count: count as u64 })
        .collect()
}

pub fn revenue_by_status(insights: &[AccountInsight]) -> Vec<RevenueByStatus> {
    by_churn_risk(insights, |i| u128::from(i.record.notifications_billed))
        .into_iter()
        .map(|(status, total_notifications_billed)| RevenueByStatus {
            status,
            total_notifications_billed,
        })
        .collect()
}

/// Notifications billed per report date within `[start, end]` (inclusive).
/// Missing bounds default to the earliest / latest report date present.
/// Dates with no accounts are omitted, not zero-filled.
pub fn notifications_over_time(
    insights: &[AccountInsight],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<NotificationsOnDate> {
    let dates = insights.iter().map(|i| i.report_date);
    let (Some(min_date), Some(max_date)) = (dates.clone().min(), dates.max()) else {
        return Vec::new();
    };
    let start = start.unwrap_or(min_date);
    let end = end.unwrap_or(max_date);

    let mut buckets: BTreeMap<NaiveDate, u128> = BTreeMap::new();
    for insight in insights {
        if (start..=end).contains(&insight.report_date) {
            *buckets.entry(insight.report_date).or_default() +=
                u128::from(insight.record.notifications_billed);
        }
    }

    buckets
        .into_iter()
        .map(|(date, total_notifications_billed)| NotificationsOnDate {
            date,
            total_notifications_billed,
        })
        .collect()
}

pub fn health_check(dataset: &Dataset) -> HealthCheck {
    HealthCheck {
        status:         "ok".into(),
        records_loaded: dataset.records_loaded(),
        invalid_rows:   dataset.invalid_count(),
    }
}
