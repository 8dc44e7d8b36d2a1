use std::sync::Arc;

use pdfview_core::EngineSettings;

use crate::error::EngineError;

/// An HTML → PDF engine.
///
/// `activate` runs once per process-wide configuration, after the settings
/// have been published and before the first renderer exists. Renderers are
/// cheap per-document handles built from the same settings.
pub trait PdfBackend: Send + Sync {
    fn name(&self) -> &str;

    fn activate(&self, settings: &EngineSettings) -> Result<(), EngineError>;

    fn create_renderer(
        &self,
        settings: Arc<EngineSettings>,
    ) -> Result<Box<dyn PdfRenderer>, EngineError>;
}

/// A stateful, single-document renderer: load HTML, render, take the bytes.
pub trait PdfRenderer: Send {
    fn load_html(&mut self, html: &str) -> Result<(), EngineError>;

    fn render(&mut self) -> Result<(), EngineError>;

    fn output(&mut self) -> Result<Vec<u8>, EngineError>;
}
