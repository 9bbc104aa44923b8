use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Dataset store lock poisoned")]
    StorePoisoned,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type InsightResult<T> = Result<T, InsightError>;

/// Why a single source row was rejected.
/// The `Display` text is what ends up in `InvalidRow::error`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing column '{column}'")]
    MissingColumn { column: String },

    #[error("{field}: value '{value}' is not a valid integer")]
    NotAnInteger { field: &'static str, value: String },

    #[error("{field}: value {value} must be greater than or equal to 0")]
    Negative { field: &'static str, value: i64 },

    #[error("Notifications billed cannot exceed notifications sent ({billed} > {sent})")]
    BilledExceedsSent { billed: u64, sent: u64 },

    #[error("{field}: total exceeds {max}", max = u64::MAX)]
    Overflow { field: &'static str },
}

/// Rejected query parameters. Raised at the boundary only;
/// paging and filtering assume validated input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("page must be >= 1, got {0}")]
    PageOutOfRange(u64),

    #[error("page_size must be between 1 and {max}, got {got}")]
    PageSizeOutOfRange { got: u64, max: u64 },

    #[error("min_health must be between 0 and 100, got {0}")]
    MinHealthOutOfRange(i64),
}
