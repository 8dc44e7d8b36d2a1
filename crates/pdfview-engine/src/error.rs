use pdfview_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no HTML has been loaded")]
    NoDocument,

    #[error("document has not been rendered")]
    NotRendered,

    #[error("unsupported PDF backend: {0}")]
    UnsupportedBackend(String),

    #[error("unknown paper size: {0}")]
    UnknownPaperSize(String),

    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid engine settings: {0}")]
    Settings(#[from] CoreError),

    #[error("{0}")]
    Backend(String),
}
