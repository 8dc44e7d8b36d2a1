//! pdfview
//!
//! Render template views as PDF documents.
//!
//! An [`Environment`] owns the engine configuration: options can be read and
//! overridden until the engine is initialised, which happens once, on the
//! first [`PdfView`] that needs a renderer. From then on the configuration is
//! sealed and every attempt to change it fails with
//! [`Error::AlreadyInitialized`].
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pdfview::{Environment, JsonConfigSource, PdfView};
//! use pdfview_view::ViewFinder;
//!
//! # fn main() -> Result<(), pdfview::Error> {
//! let env = Arc::new(
//!     Environment::builder()
//!         .config_source(JsonConfigSource::new("config"))
//!         .views(ViewFinder::new("views"))
//!         .build(),
//! );
//! env.set_option("DOMPDF_DEFAULT_PAPER_SIZE", "a4")?;
//!
//! let mut view = PdfView::factory(&env, Some("invoice"), None)?;
//! view.set("number", 1042)?;
//! let pdf = view.render(None)?;
//! # let _ = pdf;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod pdf_view;

pub use config::{ConfigError, ConfigSource, JsonConfigSource, MemoryConfigSource};
pub use environment::{Environment, EnvironmentBuilder};
pub use error::Error;
pub use pdf_view::PdfView;

pub use pdfview_core::{EngineSettings, OptionValue, Options, keys};
