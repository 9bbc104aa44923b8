//! Dataset loader — source file → validated, enriched collections.
//!
//! Row numbering: the header is row 1, so the first data row is row 2.
//! Report dates are assigned by zero-based data-row index, counting
//! invalid rows too (see `calendar`).
//!
//! A missing source file is not an error: the loader logs a warning and
//! returns an empty dataset so the service can still answer queries.

use crate::{
    calendar::ReportCalendar,
    config::InsightsConfig,
    error::InsightResult,
    record::{InvalidRow, RawRow},
    scoring::compute_insight,
    store::Dataset,
    validator::RecordValidator,
};
use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

/// Row number of the first data row.
const FIRST_DATA_ROW: usize = 2;

pub struct DatasetLoader {
    source:    PathBuf,
    validator: RecordValidator,
    calendar:  ReportCalendar,
}

impl DatasetLoader {
    pub fn new(source: impl Into<PathBuf>, validator: RecordValidator, calendar: ReportCalendar) -> Self {
        Self {
            source: source.into(),
            validator,
            calendar,
        }
    }

    pub fn from_config(config: &InsightsConfig) -> Self {
        Self::new(
            config.data_file.clone(),
            RecordValidator::new(config.columns.clone()),
            config.calendar,
        )
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Load the configured source file. Each call builds a fresh Dataset.
    pub fn load(&self) -> InsightResult<Dataset> {
        if !self.source.exists() {
            log::warn!("CSV file not found at: {}", self.source.display());
            return Ok(Dataset::empty());
        }

        log::info!("Loading data from: {}", self.source.display());
        let file = File::open(&self.source)?;
        let dataset = self.load_from_reader(file)?;
        log::info!(
            "Loaded {} valid records, {} invalid rows",
            dataset.records_loaded(),
            dataset.invalid_count()
        );
        Ok(dataset)
    }

    /// Load CSV content from any reader. The first line must be the header.
    pub fn load_from_reader<R: Read>(&self, reader: R) -> InsightResult<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let headers = csv_reader.headers()?.clone();

        let mut dataset = Dataset::empty();

        for (row_index, result) in csv_reader.records().enumerate() {
            let row_number = row_index + FIRST_DATA_ROW;

            let raw: RawRow = match result {
                Ok(fields) => headers
                    .iter()
                    .zip(fields.iter())
                    .map(|(h, v)| (h.to_string(), v.to_string()))
                    .collect(),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    log::debug!("Row {row_number} unreadable: {e}");
                    dataset.invalid_rows.push(InvalidRow {
                        row_number,
                        raw_row: RawRow::new(),
                        error: e.to_string(),
                    });
                    continue;
                }
            };

            match self.validator.parse_row(row_number, raw) {
                Ok(record) => {
                    let report_date = self.calendar.date_for_row(row_index);
                    dataset.records.push(record.clone());
                    dataset.insights.push(compute_insight(record, report_date));
                }
                Err(invalid) => {
                    log::debug!("Row {row_number} rejected: {}", invalid.error);
                    dataset.invalid_rows.push(invalid);
                }
            }
        }

        Ok(dataset)
    }
}
