use thiserror::Error;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate sheet name: '{0}'")]
    DuplicateSheetName(String),

    #[error("unknown column kind: '{0}'")]
    UnknownColumnKind(String),

    #[error("workbook serialization failed: {0}")]
    Serialization(String),

    #[error("download rejected: {0}")]
    DownloadRejected(String),

    #[error("validation error: {0}")]
    Validation(String),
}
