//! Record queries — filtering and pagination over the insight snapshot.
//!
//! RULE: Queries borrow the snapshot; they never copy or mutate it.
//! Parameter ranges are checked once at the boundary (`PageRequest::new`,
//! `RecordFilter::validate`). The functions below assume checked input
//! and never fail.

use crate::{
    config::DEFAULT_PAGE_SIZE,
    error::QueryError,
    record::AccountInsight,
    types::{STATUS_ACTIVE, STATUS_INACTIVE},
};
use serde::{Deserialize, Serialize};

pub const MAX_PAGE_SIZE: u64 = 100;
pub const MAX_HEALTH: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page:      u64,
    pub page_size: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 1, page_size: DEFAULT_PAGE_SIZE }
    }
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Result<Self, QueryError> {
        if page < 1 {
            return Err(QueryError::PageOutOfRange(page));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(QueryError::PageSizeOutOfRange { got: page_size, max: MAX_PAGE_SIZE });
        }
        Ok(Self { page, page_size })
    }

    fn offset(&self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

/// Optional filters, AND-combined. `None` means "don't filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    /// Exact match on "active" / "inactive". Any other value is ignored.
    #[serde(default)]
    pub subscription_status: Option<String>,
    /// Inclusive lower bound on health_score.
    #[serde(default)]
    pub min_health: Option<i64>,
    /// Case-insensitive substring of account_label. Empty is ignored.
    #[serde(default)]
    pub search: Option<String>,
}

impl RecordFilter {
    pub fn validate(&self) -> Result<(), QueryError> {
        match self.min_health {
            Some(min) if !(0..=MAX_HEALTH).contains(&min) => {
                Err(QueryError::MinHealthOutOfRange(min))
            }
            _ => Ok(()),
        }
    }

    pub fn matches(&self, insight: &AccountInsight) -> bool {
        if let Some(status) = self.status_filter() {
            if insight.record.subscription_status != status {
                return false;
            }
        }
        if let Some(min) = self.min_health {
            if i64::from(insight.health_score) < min {
                return false;
            }
        }
        if let Some(needle) = self.search_needle() {
            if !insight.record.account_label.to_lowercase().contains(&needle) {
                return false;
            }
        }
        true
    }

    fn status_filter(&self) -> Option<&str> {
        self.subscription_status
            .as_deref()
            .filter(|s| *s == STATUS_ACTIVE || *s == STATUS_INACTIVE)
    }

    fn search_needle(&self) -> Option<String> {
        self.search
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// One page of filtered insights.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordPage<'a> {
    pub items:       Vec<&'a AccountInsight>,
    pub page:        u64,
    pub page_size:   u64,
    pub total_items: u64,
    pub total_pages: u64,
}

/// ceil(total_items / page_size), except an empty result still has one page.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if total_items == 0 {
        1
    } else {
        total_items.div_ceil(page_size.max(1))
    }
}

pub fn filter_insights<'a>(
    insights: &'a [AccountInsight],
    filter: &RecordFilter,
) -> Vec<&'a AccountInsight> {
    insights.iter().filter(|i| filter.matches(i)).collect()
}

/// Filter, then slice out the requested page in source order.
/// A page past the end yields no items.
pub fn query_records<'a>(
    insights: &'a [AccountInsight],
    filter: &RecordFilter,
    request: PageRequest,
) -> RecordPage<'a> {
    let filtered = filter_insights(insights, filter);
    let total_items = filtered.len() as u64;

    let items = filtered
        .into_iter()
        .skip(request.offset())
        .take(request.page_size as usize)
        .collect();

    RecordPage {
        items,
        page: request.page,
        page_size: request.page_size,
        total_items,
        total_pages: total_pages(total_items, request.page_size),
    }
}
