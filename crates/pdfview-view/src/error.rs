use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("no template has been bound to this view")]
    NoTemplate,

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("view data must be a JSON object")]
    DataNotAnObject,

    #[error("failed to read template: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for ViewError {
    fn from(e: tera::Error) -> Self {
        // Tera's top-level message only names the template; the cause says why.
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ViewError::TemplateRender(message)
    }
}
