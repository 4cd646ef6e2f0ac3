use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartzError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ChartzError>;

/// Why a staged cell edit was rejected.
///
/// Returned synchronously from staging; a rejected edit never mutates
/// session state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("{column} cannot be empty")]
    Empty { column: String },

    #[error("{column} does not allow line breaks")]
    Multiline { column: String },

    #[error("not a whole number: {raw}")]
    NotAWholeNumber { raw: String },

    #[error("not a number: {raw}")]
    NotANumber { raw: String },

    #[error("{column} cannot be negative: {raw}")]
    Negative { column: String, raw: String },

    #[error("{column} must be between {min} and {max}: {raw}")]
    OutOfRange {
        column: String,
        min: i64,
        max: i64,
        raw: String,
    },

    #[error("expected 3 numbers separated by spaces, got {count}")]
    ComponentCount { count: usize },

    #[error("color component must be between 0 and 1: {raw}")]
    ComponentRange { raw: String },
}

/// How bad a per-chart load problem is.
///
/// `Warning` means the chart directory had no data file and was skipped.
/// `Error` means the data file was present but unusable. Declaration order
/// is the report sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// A per-chart problem found while scanning the charts directory.
///
/// Load errors are collected, never thrown; only a failure to enumerate the
/// root directory itself aborts a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub severity: Severity,
    pub chart_id: String,
    pub message: String,
}

impl LoadError {
    pub fn warning(chart_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            chart_id: chart_id.into(),
            message: message.into(),
        }
    }

    pub fn error(chart_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            chart_id: chart_id.into(),
            message: message.into(),
        }
    }
}

/// A per-chart failure during a flush. The chart stays dirty for retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistError {
    pub chart_id: String,
    pub message: String,
}

impl PersistError {
    pub fn new(chart_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            chart_id: chart_id.into(),
            message: message.into(),
        }
    }
}
