use pdfview_core::CoreError;
use pdfview_engine::EngineError;
use pdfview_view::ViewError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    /// The engine configuration is sealed.
    #[error("{0}")]
    AlreadyInitialized(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error(transparent)]
    View(ViewError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid engine option: {0}")]
    Option(#[from] CoreError),

    /// Failures inside the rendering engine, passed through untouched.
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to write PDF: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ViewError> for Error {
    fn from(e: ViewError) -> Self {
        match e {
            ViewError::TemplateNotFound(name) => Error::TemplateNotFound(name),
            other => Error::View(other),
        }
    }
}
