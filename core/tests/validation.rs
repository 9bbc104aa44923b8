use insights_core::{
    config::ColumnNames,
    error::ValidationError,
    record::RawRow,
    validator::RecordValidator,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn valid_pairs() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Account UUID", "a-1"),
        ("Account Label", "Acme Corp"),
        ("Subscription Status", "  ACTIVE "),
        ("Admin Seats", "1"),
        ("User Seats", "2"),
        ("Read Only Seats", "0"),
        ("Total Records", "60000"),
        ("Automation Count", "4"),
        ("Workflow Title", "Onboarding"),
        ("Messages Processed", "500000"),
        ("Notifications Sent", "100"),
        ("Notifications Billed", "95"),
    ]
}

fn with(field: &'static str, value: &'static str) -> RawRow {
    let mut pairs = valid_pairs();
    for pair in pairs.iter_mut() {
        if pair.0 == field {
            pair.1 = value;
        }
    }
    raw_row(&pairs)
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[test]
fn valid_row_becomes_typed_record() {
    let record = RecordValidator::default()
        .validate(&raw_row(&valid_pairs()))
        .unwrap();

    assert_eq!(record.account_uuid, "a-1");
    assert_eq!(record.account_label, "Acme Corp");
    assert_eq!(record.subscription_status, "active", "status is trimmed and lower-cased");
    assert_eq!(record.total_seats(), 3);
    assert_eq!(record.workflow_title.as_deref(), Some("Onboarding"));
    assert_eq!(record.messages_processed, 500_000);
    assert_eq!(record.notifications_billed, 95);
}

#[test]
fn billed_above_sent_is_rejected_with_explanation() {
    let row = with("Notifications Billed", "150");
    let err = RecordValidator::default().validate(&row).unwrap_err();

    assert_eq!(err, ValidationError::BilledExceedsSent { billed: 150, sent: 100 });
    assert!(
        err.to_string().contains("Notifications billed cannot exceed notifications sent"),
        "unexpected message: {err}"
    );
}

#[test]
fn billed_equal_to_sent_is_accepted() {
    let row = with("Notifications Billed", "100");
    assert!(RecordValidator::default().validate(&row).is_ok());
}

#[test]
fn empty_or_absent_workflow_title_is_none() {
    let empty = with("Workflow Title", "");
    let record = RecordValidator::default().validate(&empty).unwrap();
    assert_eq!(record.workflow_title, None);

    let mut absent = raw_row(&valid_pairs());
    absent.remove("Workflow Title");
    let record = RecordValidator::default().validate(&absent).unwrap();
    assert_eq!(record.workflow_title, None);
}

#[test]
fn negative_and_non_numeric_counts_are_rejected() {
    let validator = RecordValidator::default();

    let err = validator.validate(&with("Admin Seats", "-1")).unwrap_err();
    assert_eq!(err, ValidationError::Negative { field: "admin_seats", value: -1 });

    let err = validator.validate(&with("Total Records", "lots")).unwrap_err();
    assert!(matches!(err, ValidationError::NotAnInteger { field: "total_records", .. }));

    let err = validator.validate(&with("Messages Processed", "")).unwrap_err();
    assert!(matches!(err, ValidationError::NotAnInteger { field: "messages_processed", .. }));
}

#[test]
fn missing_required_column_is_reported_by_header_name() {
    let mut row = raw_row(&valid_pairs());
    row.remove("Read Only Seats");
    let err = RecordValidator::default().validate(&row).unwrap_err();
    assert_eq!(err, ValidationError::MissingColumn { column: "Read Only Seats".into() });
}

#[test]
fn header_names_are_case_sensitive() {
    let mut row = raw_row(&valid_pairs());
    let value = row.remove("Admin Seats").unwrap();
    row.insert("admin seats".into(), value);
    assert!(matches!(
        RecordValidator::default().validate(&row),
        Err(ValidationError::MissingColumn { .. })
    ));
}

#[test]
fn parse_row_keeps_raw_content_and_row_number() {
    let row = with("User Seats", "two");
    let invalid = RecordValidator::default().parse_row(7, row.clone()).unwrap_err();

    assert_eq!(invalid.row_number, 7);
    assert_eq!(invalid.raw_row, row);
    assert!(invalid.error.contains("user_seats"), "error: {}", invalid.error);
}

#[test]
fn custom_column_names_are_honoured() {
    let columns = ColumnNames {
        account_label: "Name".into(),
        ..ColumnNames::default()
    };
    let mut row = raw_row(&valid_pairs());
    let label = row.remove("Account Label").unwrap();
    row.insert("Name".into(), label);

    let record = RecordValidator::new(columns).validate(&row).unwrap();
    assert_eq!(record.account_label, "Acme Corp");
}
