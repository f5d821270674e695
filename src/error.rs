use std::fmt;

/// Custom error types for the collection pipeline
#[derive(Debug)]
pub enum CollectorError {
    /// I/O errors
    Io(std::io::Error),
    /// JSON serialization errors
    Json(serde_json::Error),
    /// CSV rendering errors
    Csv(csv::Error),
    /// Export destination errors with context
    Export(String),
    /// Invalid zone coordinates
    InvalidZone(String),
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectorError::Io(err) => write!(f, "I/O error: {}", err),
            CollectorError::Json(err) => write!(f, "JSON error: {}", err),
            CollectorError::Csv(err) => write!(f, "CSV error: {}", err),
            CollectorError::Export(msg) => write!(f, "Export error: {}", msg),
            CollectorError::InvalidZone(msg) => write!(f, "Invalid zone: {}", msg),
        }
    }
}

impl std::error::Error for CollectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CollectorError::Io(err) => Some(err),
            CollectorError::Json(err) => Some(err),
            CollectorError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        CollectorError::Io(err)
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(err: serde_json::Error) -> Self {
        CollectorError::Json(err)
    }
}

impl From<csv::Error> for CollectorError {
    fn from(err: csv::Error) -> Self {
        CollectorError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
