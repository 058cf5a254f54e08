use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaporError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Stored reports are corrupt: {0}")]
    StorageCorrupt(String),

    #[error("Missing required fields: {}", .0.join(", "))]
    ValidationFailed(Vec<&'static str>),

    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Report number already exists: {0}")]
    DuplicateReportNumber(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[cfg(feature = "pdf")]
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LaporError>;
