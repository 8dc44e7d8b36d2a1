use std::path::Path;
use std::sync::Arc;

use pdfview_engine::PdfRenderer;
use pdfview_engine::diagnostics::{self, Severity};
use pdfview_view::View;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::environment::Environment;
use crate::error::Error;

/// A view whose output is a PDF document.
///
/// Each instance owns its own renderer, built on first use from the shared
/// [`Environment`].
pub struct PdfView {
    env: Arc<Environment>,
    view: View,
    renderer: Option<Box<dyn PdfRenderer>>,
}

impl PdfView {
    /// Bind `file` and `data` without touching the environment's options.
    pub fn new(
        env: &Arc<Environment>,
        file: Option<&str>,
        data: Option<Map<String, Value>>,
    ) -> Result<Self, Error> {
        let view = View::new(Arc::clone(env.views()), file, data)?;
        Ok(Self {
            env: Arc::clone(env),
            view,
            renderer: None,
        })
    }

    /// Load the environment's default options if that has not happened yet,
    /// then build a new view.
    pub fn factory(
        env: &Arc<Environment>,
        file: Option<&str>,
        data: Option<Map<String, Value>>,
    ) -> Result<Self, Error> {
        env.ensure_default_options()?;
        Self::new(env, file, data)
    }

    pub fn environment(&self) -> &Arc<Environment> {
        &self.env
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn set(&mut self, key: &str, value: impl Serialize) -> Result<&mut Self, Error> {
        self.view.set(key, value)?;
        Ok(self)
    }

    pub fn bind(&mut self, data: Value) -> Result<&mut Self, Error> {
        self.view.bind(data)?;
        Ok(self)
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }

    /// This view's renderer. The first call initialises the environment if
    /// needed, which seals its options.
    pub fn renderer(&mut self) -> Result<&mut dyn PdfRenderer, Error> {
        let renderer = match self.renderer.take() {
            Some(renderer) => renderer,
            None => self.env.create_renderer()?,
        };
        Ok(&mut **self.renderer.insert(renderer))
    }

    /// Render the view to HTML and convert it to PDF bytes.
    pub fn render(&mut self, file: Option<&str>) -> Result<Vec<u8>, Error> {
        let html = self.view.render(file)?;

        let renderer = {
            // The engine complains about markup it handles fine anyway.
            let _quiet = diagnostics::suppress(Severity::Strict);
            let renderer = self.renderer()?;
            renderer.load_html(&html)?;
            renderer.render()?;
            renderer
        };

        let pdf = renderer.output()?;
        tracing::debug!(
            view = self.view.filename().unwrap_or_default(),
            html_bytes = html.len(),
            pdf_bytes = pdf.len(),
            "rendered pdf view"
        );
        Ok(pdf)
    }

    /// Render and write the PDF to `path`.
    pub fn render_to_file(&mut self, path: impl AsRef<Path>, file: Option<&str>) -> Result<(), Error> {
        let pdf = self.render(file)?;
        std::fs::write(path.as_ref(), pdf)?;
        tracing::info!(path = %path.as_ref().display(), "pdf written");
        Ok(())
    }
}
