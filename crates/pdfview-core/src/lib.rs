//! pdfview-core
//!
//! Engine option vocabulary and the typed settings published from it.
//! No engine or template dependency; every other pdfview crate builds on it.

pub mod error;
pub mod keys;
pub mod options;
pub mod settings;

pub use error::CoreError;
pub use options::{OptionValue, Options};
pub use settings::EngineSettings;
