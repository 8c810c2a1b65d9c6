use mediaudit_import::{FormatError, PdfError, TableError};
use mediaudit_ocr::PipelineError;
use thiserror::Error;

/// Everything that can stop an audit request. Row-level noise is never an error.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    UnsupportedFormat(#[from] FormatError),
    #[error("No bill was provided to audit")]
    MissingInput,
    #[error("Tabular import failed: {0}")]
    Table(#[from] TableError),
    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] PdfError),
    #[error("Image extraction failed: {0}")]
    Image(#[from] PipelineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
