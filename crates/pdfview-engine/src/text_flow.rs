use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Arc;

use pdfview_core::EngineSettings;

use crate::backend::{PdfBackend, PdfRenderer};
use crate::error::EngineError;
use crate::fonts::FontSet;
use crate::html::{self, ParsePolicy};
use crate::layout::{Layout, Page};
use crate::paper::PaperSize;
use crate::writer::{self, TextEncoding};

/// Backend names this engine answers to, compared case-insensitively.
pub const BACKEND_NAMES: [&str; 3] = ["cpdf", "auto", "textflow"];

/// Flows the text content of an HTML document onto pages. No CSS is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFlowBackend;

impl PdfBackend for TextFlowBackend {
    fn name(&self) -> &str {
        "textflow"
    }

    fn activate(&self, settings: &EngineSettings) -> Result<(), EngineError> {
        let requested = settings.pdf_backend.to_ascii_lowercase();
        if !BACKEND_NAMES.contains(&requested.as_str()) {
            return Err(EngineError::UnsupportedBackend(settings.pdf_backend.clone()));
        }
        PaperSize::parse(&settings.default_paper_size)?;

        if settings.enable_php {
            tracing::warn!("embedded script execution was requested but is never performed");
        }
        if settings.pdflib_license.is_some() {
            tracing::warn!("a PDFLib license was configured but PDFLib is not used");
        }
        for (enabled, feature) in [
            (settings.enable_font_subsetting, "font subsetting"),
            (settings.enable_css_float, "CSS floats"),
            (settings.autoload_prepend, "autoload prepending"),
        ] {
            if enabled {
                tracing::warn!(feature, "option enabled but not supported by the text flow engine");
            }
        }

        tracing::info!(
            paper = %settings.default_paper_size,
            font = %settings.default_font,
            unicode = settings.unicode_enabled,
            "text flow engine activated"
        );
        Ok(())
    }

    fn create_renderer(
        &self,
        settings: Arc<EngineSettings>,
    ) -> Result<Box<dyn PdfRenderer>, EngineError> {
        Ok(Box::new(TextFlowRenderer::new(settings)?))
    }
}

struct Rendered {
    title: Option<String>,
    pages: Vec<Page>,
}

pub struct TextFlowRenderer {
    settings: Arc<EngineSettings>,
    paper: PaperSize,
    fonts: FontSet,
    encoding: TextEncoding,
    html: Option<String>,
    rendered: Option<Rendered>,
}

impl TextFlowRenderer {
    pub fn new(settings: Arc<EngineSettings>) -> Result<Self, EngineError> {
        let paper = PaperSize::parse(&settings.default_paper_size)?;
        let fonts = FontSet::for_family(&settings.default_font);
        let encoding = if settings.unicode_enabled {
            TextEncoding::WinAnsi
        } else {
            TextEncoding::Ascii
        };
        Ok(Self {
            settings,
            paper,
            fonts,
            encoding,
            html: None,
            rendered: None,
        })
    }

    /// Number of pages produced by the last `render`, if any.
    pub fn page_count(&self) -> Option<usize> {
        self.rendered.as_ref().map(|r| r.pages.len())
    }

    fn log_render(&self, html_len: usize, pages: usize) -> Result<(), EngineError> {
        let Some(path) = &self.settings.log_output_file else {
            return Ok(());
        };
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(
            file,
            "rendered {html_len} bytes of html into {pages} page(s) on {}",
            self.settings.default_paper_size
        )?;
        Ok(())
    }
}

impl PdfRenderer for TextFlowRenderer {
    fn load_html(&mut self, html: &str) -> Result<(), EngineError> {
        self.html = Some(html.to_string());
        self.rendered = None;
        Ok(())
    }

    fn render(&mut self) -> Result<(), EngineError> {
        let html = self.html.as_deref().ok_or(EngineError::NoDocument)?;
        let policy = ParsePolicy {
            enable_remote: self.settings.enable_remote,
            enable_javascript: self.settings.enable_javascript,
        };
        let document = html::parse(html, &policy);
        let pages = Layout::new(self.paper, &self.fonts, self.settings.font_height_ratio)
            .paginate(&document.blocks);

        tracing::debug!(
            blocks = document.blocks.len(),
            pages = pages.len(),
            "laid out document"
        );
        self.log_render(html.len(), pages.len())?;

        self.rendered = Some(Rendered {
            title: document.title,
            pages,
        });
        Ok(())
    }

    fn output(&mut self) -> Result<Vec<u8>, EngineError> {
        let rendered = self.rendered.as_ref().ok_or(EngineError::NotRendered)?;
        writer::write_pdf(
            &rendered.pages,
            self.paper,
            &self.fonts,
            self.encoding,
            rendered.title.as_deref(),
        )
    }
}
