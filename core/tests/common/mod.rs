#![allow(dead_code)]

use insights_core::{
    calendar::ReportCalendar,
    loader::DatasetLoader,
    record::AccountRecord,
    store::Dataset,
    validator::RecordValidator,
};

pub const HEADER: &str = "Account UUID,Account Label,Subscription Status,Admin Seats,User Seats,\
Read Only Seats,Total Records,Automation Count,Workflow Title,Messages Processed,\
Notifications Sent,Notifications Billed";

/// Six data rows; row 6 (the fifth data row) bills more than it sent.
///
///   uuid  label          status      health  churn    billed  date
///   a-1   Acme Corp      active      85      healthy  95      01-01
///   a-2   Beta Labs      active      15      at_risk  0       01-02
///   a-3   Gamma Acme     inactive    0       churned  900     01-03
///   a-4   Delta          active      75      healthy  150     01-04
///   a-5   Broken         (invalid)                            01-05
///   a-6   Epsilon acme   active      45      healthy  10      01-06
pub const FIXTURE_ROWS: &[&str] = &[
    "a-1,Acme Corp,active,1,2,0,60000,4,Onboarding,500000,100,95",
    "a-2,Beta Labs, Active ,0,0,0,5000,0,,50000,0,0",
    "a-3,Gamma Acme,inactive,2,2,2,100000,10,Renewal,2000000,1000,900",
    "a-4,Delta,active,5,5,0,20000,2,Sync,1500000,200,150",
    "a-5,Broken,active,1,1,1,10,1,,10,100,150",
    "a-6,Epsilon acme,active,1,0,0,9999,3,,99999,10,10",
];

pub fn csv_text(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

pub fn loader_for(path: impl Into<std::path::PathBuf>) -> DatasetLoader {
    DatasetLoader::new(path, RecordValidator::default(), ReportCalendar::default())
}

pub fn load_rows(rows: &[&str]) -> Dataset {
    loader_for("unused.csv")
        .load_from_reader(csv_text(rows).as_bytes())
        .expect("fixture loads")
}

pub fn fixture() -> Dataset {
    load_rows(FIXTURE_ROWS)
}

/// An active record with the given scoring inputs and plenty of seats.
pub fn active_record(
    messages_processed: u64,
    automation_count: u64,
    total_records: u64,
    notifications_sent: u64,
    notifications_billed: u64,
) -> AccountRecord {
    AccountRecord {
        account_uuid:         "acc-test".into(),
        account_label:        "Test Account".into(),
        subscription_status:  "active".into(),
        admin_seats:          1,
        user_seats:           1,
        read_only_seats:      1,
        total_records,
        automation_count,
        workflow_title:       None,
        messages_processed,
        notifications_sent,
        notifications_billed,
    }
}
