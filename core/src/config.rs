//! Runtime configuration.
//!
//! Every field has a default, so an empty JSON object `{}` is a valid config.
//! In tests, use InsightsConfig::default().

use crate::calendar::ReportCalendar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "data/sample_data.csv";
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Header names of the source file. This is the only place the
/// column naming scheme is known; swap it to ingest a differently
/// labelled export without touching the parser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ColumnNames {
    pub account_uuid:         String,
    pub account_label:        String,
    pub subscription_status:  String,
    pub admin_seats:          String,
    pub user_seats:           String,
    pub read_only_seats:      String,
    pub total_records:        String,
    pub automation_count:     String,
    pub workflow_title:       String,
    pub messages_processed:   String,
    pub notifications_sent:   String,
    pub notifications_billed: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            account_uuid:         "Account UUID".into(),
            account_label:        "Account Label".into(),
            subscription_status:  "Subscription Status".into(),
            admin_seats:          "Admin Seats".into(),
            user_seats:           "User Seats".into(),
            read_only_seats:      "Read Only Seats".into(),
            total_records:        "Total Records".into(),
            automation_count:     "Automation Count".into(),
            workflow_title:       "Workflow Title".into(),
            messages_processed:   "Messages Processed".into(),
            notifications_sent:   "Notifications Sent".into(),
            notifications_billed: "Notifications Billed".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InsightsConfig {
    pub data_file:         PathBuf,
    pub columns:           ColumnNames,
    pub calendar:          ReportCalendar,
    pub default_page_size: u64,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            data_file:         PathBuf::from(DEFAULT_DATA_FILE),
            columns:           ColumnNames::default(),
            calendar:          ReportCalendar::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl InsightsConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: InsightsConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {}: {e}", path.display()))?;
        Ok(config)
    }
}
