//! Customer insights core.
//!
//! Pipeline (run once at startup, or on reload):
//!   1. loader     — read the CSV source row by row
//!   2. validator  — typed AccountRecord or InvalidRow
//!   3. scoring    — AccountInsight with metrics, health score, churn risk
//!   4. store      — publish the Dataset snapshot
//!
//! Read side (pure functions over a snapshot):
//!   - query       — filters and pagination
//!   - analytics   — summary KPIs and breakdowns

pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod loader;
pub mod query;
pub mod record;
pub mod scoring;
pub mod store;
pub mod types;
pub mod validator;
