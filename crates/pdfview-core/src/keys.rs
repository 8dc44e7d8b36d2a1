//! Names of the options understood by the rendering engine.
//!
//! Any other key may still be stored and published; these are the ones
//! [`EngineSettings`](crate::EngineSettings) gives typed access to.

pub const FONT_DIR: &str = "DOMPDF_FONT_DIR";
pub const FONT_CACHE: &str = "DOMPDF_FONT_CACHE";
pub const TEMP_DIR: &str = "DOMPDF_TEMP_DIR";
pub const UNICODE_ENABLED: &str = "DOMPDF_UNICODE_ENABLED";
pub const ENABLE_FONTSUBSETTING: &str = "DOMPDF_ENABLE_FONTSUBSETTING";
pub const PDF_BACKEND: &str = "DOMPDF_PDF_BACKEND";
pub const PDFLIB_LICENSE: &str = "DOMPDF_PDFLIB_LICENSE";
pub const DEFAULT_MEDIA_TYPE: &str = "DOMPDF_DEFAULT_MEDIA_TYPE";
pub const DEFAULT_PAPER_SIZE: &str = "DOMPDF_DEFAULT_PAPER_SIZE";
pub const DEFAULT_FONT: &str = "DOMPDF_DEFAULT_FONT";
pub const DPI: &str = "DOMPDF_DPI";
pub const ENABLE_PHP: &str = "DOMPDF_ENABLE_PHP";
pub const ENABLE_JAVASCRIPT: &str = "DOMPDF_ENABLE_JAVASCRIPT";
pub const ENABLE_REMOTE: &str = "DOMPDF_ENABLE_REMOTE";
pub const LOG_OUTPUT_FILE: &str = "DOMPDF_LOG_OUTPUT_FILE";
pub const FONT_HEIGHT_RATIO: &str = "DOMPDF_FONT_HEIGHT_RATIO";
pub const ENABLE_CSS_FLOAT: &str = "DOMPDF_ENABLE_CSS_FLOAT";
pub const AUTOLOAD_PREPEND: &str = "DOMPDF_AUTOLOAD_PREPEND";
pub const ENABLE_HTML5PARSER: &str = "DOMPDF_ENABLE_HTML5PARSER";

/// Every known option, in declaration order.
pub const ALL: [&str; 19] = [
    FONT_DIR,
    FONT_CACHE,
    TEMP_DIR,
    UNICODE_ENABLED,
    ENABLE_FONTSUBSETTING,
    PDF_BACKEND,
    PDFLIB_LICENSE,
    DEFAULT_MEDIA_TYPE,
    DEFAULT_PAPER_SIZE,
    DEFAULT_FONT,
    DPI,
    ENABLE_PHP,
    ENABLE_JAVASCRIPT,
    ENABLE_REMOTE,
    LOG_OUTPUT_FILE,
    FONT_HEIGHT_RATIO,
    ENABLE_CSS_FLOAT,
    AUTOLOAD_PREPEND,
    ENABLE_HTML5PARSER,
];

pub fn is_known(key: &str) -> bool {
    ALL.contains(&key)
}
