//! pdfview-engine
//!
//! The HTML → PDF engine contract, the process-wide diagnostic mask, and the
//! bundled text-flow backend that writes PDFs through `lopdf`.

pub mod backend;
pub mod diagnostics;
pub mod error;
pub mod fonts;
pub mod html;
pub mod layout;
pub mod paper;
pub mod text_flow;
pub mod writer;

pub use backend::{PdfBackend, PdfRenderer};
pub use error::EngineError;
pub use text_flow::{TextFlowBackend, TextFlowRenderer};
