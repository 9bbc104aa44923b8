//! Report calendar — synthetic report dates for time-series views.
//!
//! The source dataset carries no event timestamps. Each row is given a date
//! by its position in the file, cycling through a fixed window:
//!   day = (zero_based_row_index mod cycle_days) + 1
//! With the defaults this is January 1–10, 2025, and the 11th data row wraps
//! back to January 1. These dates do NOT reflect real event timing.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CYCLE_DAYS: u32 = 10;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportCalendar {
    #[serde(default = "default_start")]
    pub start:      NaiveDate,
    #[serde(default = "default_cycle_days")]
    pub cycle_days: u32,
}

impl Default for ReportCalendar {
    fn default() -> Self {
        Self {
            start:      default_start(),
            cycle_days: DEFAULT_CYCLE_DAYS,
        }
    }
}

impl ReportCalendar {
    /// Date for the data row at `row_index` (0 = first row after the header).
    /// Invalid rows still consume a position in the cycle.
    pub fn date_for_row(&self, row_index: usize) -> NaiveDate {
        let cycle = self.cycle_days.max(1) as usize;
        let offset = (row_index % cycle) as u64;
        self.start
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.start)
    }
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("2025-01-01 is a valid calendar date")
}

fn default_cycle_days() -> u32 {
    DEFAULT_CYCLE_DAYS
}
