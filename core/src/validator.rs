//! Record validator — raw rows in, typed records or rejects out.
//!
//! RULE: The validator never aborts a batch. Every failure is returned as
//! a value for the loader to record, and the next row is processed.
//! Header names come from `ColumnNames`; nothing here hardcodes them.

use crate::{
    config::ColumnNames,
    error::ValidationError,
    record::{AccountRecord, InvalidRow, RawRow},
    types::RowNumber,
};

pub struct RecordValidator {
    columns: ColumnNames,
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(ColumnNames::default())
    }
}

impl RecordValidator {
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    /// Parse one row, tagging a failure with its row number and raw content.
    pub fn parse_row(&self, row_number: RowNumber, raw: RawRow) -> Result<AccountRecord, InvalidRow> {
        match self.validate(&raw) {
            Ok(record) => Ok(record),
            Err(e) => Err(InvalidRow {
                row_number,
                raw_row: raw,
                error: e.to_string(),
            }),
        }
    }

    /// Coerce and check a single row.
    pub fn validate(&self, raw: &RawRow) -> Result<AccountRecord, ValidationError> {
        let c = &self.columns;

        let account_uuid  = self.text(raw, &c.account_uuid)?.to_string();
        let account_label = self.text(raw, &c.account_label)?.to_string();
        let subscription_status = self
            .text(raw, &c.subscription_status)?
            .trim()
            .to_lowercase();

        let admin_seats        = self.count(raw, &c.admin_seats, "admin_seats")?;
        let user_seats         = self.count(raw, &c.user_seats, "user_seats")?;
        let read_only_seats    = self.count(raw, &c.read_only_seats, "read_only_seats")?;
        let total_records      = self.count(raw, &c.total_records, "total_records")?;
        let automation_count   = self.count(raw, &c.automation_count, "automation_count")?;
        let messages_processed = self.count(raw, &c.messages_processed, "messages_processed")?;
        let notifications_sent = self.count(raw, &c.notifications_sent, "notifications_sent")?;
        let notifications_billed =
            self.count(raw, &c.notifications_billed, "notifications_billed")?;

        // Optional column: absent and empty both mean "no workflow".
        let workflow_title = raw
            .get(&c.workflow_title)
            .filter(|t| !t.is_empty())
            .cloned();

        // total_seats is derived later; a sum that does not fit is a bad row.
        admin_seats
            .checked_add(user_seats)
            .and_then(|seats| seats.checked_add(read_only_seats))
            .ok_or(ValidationError::Overflow { field: "total_seats" })?;

        if notifications_billed > notifications_sent {
            return Err(ValidationError::BilledExceedsSent {
                billed: notifications_billed,
                sent:   notifications_sent,
            });
        }

        Ok(AccountRecord {
            account_uuid,
            account_label,
            subscription_status,
            admin_seats,
            user_seats,
            read_only_seats,
            total_records,
            automation_count,
            workflow_title,
            messages_processed,
            notifications_sent,
            notifications_billed,
        })
    }

    fn text<'r>(&self, raw: &'r RawRow, column: &str) -> Result<&'r str, ValidationError> {
        raw.get(column)
            .map(String::as_str)
            .ok_or_else(|| ValidationError::MissingColumn { column: column.to_string() })
    }

    fn count(
        &self,
        raw: &RawRow,
        column: &str,
        field: &'static str,
    ) -> Result<u64, ValidationError> {
        let value = self.text(raw, column)?;
        parse_non_negative(value, field)
    }
}

/// Integer coercion for count columns. Surrounding whitespace is ignored.
fn parse_non_negative(value: &str, field: &'static str) -> Result<u64, ValidationError> {
    let not_an_integer = || ValidationError::NotAnInteger {
        field,
        value: value.to_string(),
    };
    let parsed: i128 = value.trim().parse().map_err(|_| not_an_integer())?;
    if parsed < 0 {
        return Err(ValidationError::Negative {
            field,
            value: i64::try_from(parsed).unwrap_or(i64::MIN),
        });
    }
    u64::try_from(parsed).map_err(|_| not_an_integer())
}
