//! Error types for the dashboard.

use thiserror::Error;

/// Column names every input header must carry (case-insensitive).
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "lider",
    "operacao",
    "faturamento",
    "maodeobra",
    "equipamentos",
    "ano",
    "mes",
];

pub type AppResult<T> = Result<T, AppError>;

/// Raised by the record parser. Nothing is applied when this is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("CSV is empty")]
    Empty,

    #[error("missing required columns {missing:?}; required headers: {}", REQUIRED_COLUMNS.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error("line {line}: column '{column}' must not be blank")]
    BlankValue { line: usize, column: &'static str },

    #[error("malformed CSV: {0}")]
    Malformed(String),
}

/// Remote retrieval failed. The caller's state is left untouched.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("a fetch is already in progress")]
    Busy,

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Schema(#[from] SchemaError),

    #[error("{0}")]
    Fetch(#[from] FetchError),

    #[error("preferences: {0}")]
    Prefs(#[from] PrefsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}
