//! pdfview-view
//!
//! Template lookup and rendering: resolves view names against view
//! directories and renders them with Tera.

pub mod error;
pub mod finder;
pub mod view;

pub use error::ViewError;
pub use finder::ViewFinder;
pub use view::View;
