//! Shared primitive types used across the insights pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stable identifier for an account, as found in the source file.
/// Uniqueness is not enforced.
pub type AccountId = String;

/// 1-based source row number. The header is row 1.
pub type RowNumber = usize;

/// Composite 0–100 health metric.
pub type HealthScore = u32;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Three-valued churn classification derived from status and health score.
/// Declaration order is the order breakdowns are reported in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ChurnRisk {
    Healthy,
    AtRisk,
    Churned,
}

impl ChurnRisk {
    pub const ALL: [ChurnRisk; 3] = [ChurnRisk::Healthy, ChurnRisk::AtRisk, ChurnRisk::Churned];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnRisk::Healthy => "healthy",
            ChurnRisk::AtRisk  => "at_risk",
            ChurnRisk::Churned => "churned",
        }
    }
}

impl fmt::Display for ChurnRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
