#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};

use pdfview::{EngineSettings, Environment, JsonConfigSource};
use pdfview_engine::diagnostics::{self, Severity};
use pdfview_engine::{EngineError, PdfBackend, PdfRenderer, TextFlowBackend};
use pdfview_view::ViewFinder;

pub fn test_data(part: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test_data")
        .join(part)
}

pub fn builder() -> pdfview::EnvironmentBuilder {
    Environment::builder()
        .config_source(JsonConfigSource::new(test_data("config")))
        .views(ViewFinder::new(test_data("views")))
}

pub fn environment() -> Arc<Environment> {
    Arc::new(builder().build())
}

/// Text-flow backend that counts activations.
#[derive(Default)]
pub struct CountingBackend {
    pub activations: Arc<AtomicUsize>,
}

impl PdfBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn activate(&self, settings: &EngineSettings) -> Result<(), EngineError> {
        self.activations.fetch_add(1, Ordering::SeqCst);
        TextFlowBackend.activate(settings)
    }

    fn create_renderer(
        &self,
        settings: Arc<EngineSettings>,
    ) -> Result<Box<dyn PdfRenderer>, EngineError> {
        TextFlowBackend.create_renderer(settings)
    }
}

/// Backend whose renderer always fails to render, recording whether strict
/// diagnostics were enabled while it ran.
#[derive(Default)]
pub struct FailingBackend {
    pub strict_enabled: Arc<Mutex<Option<bool>>>,
}

struct FailingRenderer {
    strict_enabled: Arc<Mutex<Option<bool>>>,
}

impl PdfBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn activate(&self, _settings: &EngineSettings) -> Result<(), EngineError> {
        Ok(())
    }

    fn create_renderer(
        &self,
        _settings: Arc<EngineSettings>,
    ) -> Result<Box<dyn PdfRenderer>, EngineError> {
        Ok(Box::new(FailingRenderer {
            strict_enabled: Arc::clone(&self.strict_enabled),
        }))
    }
}

impl PdfRenderer for FailingRenderer {
    fn load_html(&mut self, _html: &str) -> Result<(), EngineError> {
        Ok(())
    }

    fn render(&mut self) -> Result<(), EngineError> {
        *self.strict_enabled.lock().unwrap() = Some(diagnostics::is_enabled(Severity::Strict));
        Err(EngineError::Backend("layout exploded".to_string()))
    }

    fn output(&mut self) -> Result<Vec<u8>, EngineError> {
        Err(EngineError::NotRendered)
    }
}

/// Text-flow backend whose renderers all wait for each other inside
/// `render`, so that every participating render is in flight at once.
pub struct BarrierBackend {
    barrier: Arc<Barrier>,
}

impl BarrierBackend {
    pub fn new(renders: usize) -> Self {
        Self {
            barrier: Arc::new(Barrier::new(renders)),
        }
    }
}

struct BarrierRenderer {
    barrier: Arc<Barrier>,
    inner: Box<dyn PdfRenderer>,
}

impl PdfBackend for BarrierBackend {
    fn name(&self) -> &str {
        "barrier"
    }

    fn activate(&self, settings: &EngineSettings) -> Result<(), EngineError> {
        TextFlowBackend.activate(settings)
    }

    fn create_renderer(
        &self,
        settings: Arc<EngineSettings>,
    ) -> Result<Box<dyn PdfRenderer>, EngineError> {
        Ok(Box::new(BarrierRenderer {
            barrier: Arc::clone(&self.barrier),
            inner: TextFlowBackend.create_renderer(settings)?,
        }))
    }
}

impl PdfRenderer for BarrierRenderer {
    fn load_html(&mut self, html: &str) -> Result<(), EngineError> {
        self.inner.load_html(html)
    }

    fn render(&mut self) -> Result<(), EngineError> {
        self.barrier.wait();
        self.inner.render()
    }

    fn output(&mut self) -> Result<Vec<u8>, EngineError> {
        self.inner.output()
    }
}
