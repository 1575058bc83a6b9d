use thiserror::Error;

/// The upstream call succeeded but its payload is not a usable product list.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The body carried an `error` field; the message is shown as-is.
    #[error("Error: {0}")]
    Reported(String),

    #[error("Unexpected response format from API")]
    UnexpectedShape,

    #[error("Error processing specs: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export directory not found: {0}")]
    DirectoryNotFound(std::path::PathBuf),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
