use std::path::PathBuf;

use crate::error::CoreError;
use crate::keys;
use crate::options::{OptionValue, Options};

pub const DEFAULT_FONT_DIR: &str = "fonts";
pub const DEFAULT_PDF_BACKEND: &str = "CPDF";
pub const DEFAULT_MEDIA_TYPE: &str = "screen";
pub const DEFAULT_PAPER_SIZE: &str = "letter";
pub const DEFAULT_FONT: &str = "serif";
pub const DEFAULT_DPI: u32 = 96;
pub const DEFAULT_FONT_HEIGHT_RATIO: f64 = 1.1;

/// The published, read-only engine configuration.
///
/// Built once from a snapshot of the Configuration Store. Every key of that
/// snapshot is kept as a named constant; known keys that were absent are
/// published with the engine default so [`constant`](Self::constant) sees
/// exactly what the engine runs with. Every known key is type checked, but
/// only the options the engine acts on get a typed field; the rest (font and
/// temp directories, DPI, media type, parser choice) are constants only.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    constants: Options,

    pub unicode_enabled: bool,
    pub enable_font_subsetting: bool,
    pub pdf_backend: String,
    pub pdflib_license: Option<String>,
    pub default_paper_size: String,
    pub default_font: String,
    pub enable_php: bool,
    pub enable_javascript: bool,
    pub enable_remote: bool,
    pub log_output_file: Option<PathBuf>,
    pub font_height_ratio: f64,
    pub enable_css_float: bool,
    pub autoload_prepend: bool,
}

impl EngineSettings {
    /// Publish a store snapshot. Fails on the first known option whose value
    /// cannot be coerced to the type the engine expects.
    pub fn publish(store: &Options) -> Result<Self, CoreError> {
        let mut constants = store.clone();

        let font_dir = path_or(&mut constants, keys::FONT_DIR, PathBuf::from(DEFAULT_FONT_DIR));
        path_or(&mut constants, keys::FONT_CACHE, font_dir);
        path_or(&mut constants, keys::TEMP_DIR, std::env::temp_dir());
        let unicode_enabled = flag_or(&mut constants, keys::UNICODE_ENABLED, true)?;
        let enable_font_subsetting = flag_or(&mut constants, keys::ENABLE_FONTSUBSETTING, false)?;
        let pdf_backend = text_or(&mut constants, keys::PDF_BACKEND, DEFAULT_PDF_BACKEND);
        let pdflib_license = optional_text(&constants, keys::PDFLIB_LICENSE);
        text_or(&mut constants, keys::DEFAULT_MEDIA_TYPE, DEFAULT_MEDIA_TYPE);
        let default_paper_size = text_or(&mut constants, keys::DEFAULT_PAPER_SIZE, DEFAULT_PAPER_SIZE);
        let default_font = text_or(&mut constants, keys::DEFAULT_FONT, DEFAULT_FONT);
        check_dpi(&mut constants)?;
        let enable_php = flag_or(&mut constants, keys::ENABLE_PHP, false)?;
        let enable_javascript = flag_or(&mut constants, keys::ENABLE_JAVASCRIPT, true)?;
        let enable_remote = flag_or(&mut constants, keys::ENABLE_REMOTE, false)?;
        let log_output_file = optional_text(&constants, keys::LOG_OUTPUT_FILE).map(PathBuf::from);
        let font_height_ratio = ratio_or(&mut constants)?;
        let enable_css_float = flag_or(&mut constants, keys::ENABLE_CSS_FLOAT, false)?;
        let autoload_prepend = flag_or(&mut constants, keys::AUTOLOAD_PREPEND, false)?;
        flag_or(&mut constants, keys::ENABLE_HTML5PARSER, false)?;

        for key in store.keys().filter(|k| !keys::is_known(k)) {
            tracing::debug!(key = %key, "publishing option the engine does not interpret");
        }

        Ok(Self {
            constants,
            unicode_enabled,
            enable_font_subsetting,
            pdf_backend,
            pdflib_license,
            default_paper_size,
            default_font,
            enable_php,
            enable_javascript,
            enable_remote,
            log_output_file,
            font_height_ratio,
            enable_css_float,
            autoload_prepend,
        })
    }

    /// Look up a published constant by name.
    pub fn constant(&self, name: &str) -> Option<&OptionValue> {
        self.constants.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.constants.contains_key(name)
    }

    pub fn constants(&self) -> &Options {
        &self.constants
    }
}

fn invalid(key: &str, expected: &'static str, value: &OptionValue) -> CoreError {
    CoreError::InvalidOption {
        key: key.to_string(),
        expected,
        value: value.to_string(),
    }
}

fn text_or(constants: &mut Options, key: &str, default: &str) -> String {
    constants
        .entry(key.to_string())
        .or_insert_with(|| OptionValue::Text(default.to_string()))
        .to_string()
}

fn path_or(constants: &mut Options, key: &str, default: PathBuf) -> PathBuf {
    match constants.get(key) {
        Some(value) => PathBuf::from(value.to_string()),
        None => {
            constants.insert(
                key.to_string(),
                OptionValue::Text(default.to_string_lossy().into_owned()),
            );
            default
        }
    }
}

/// Optional options are only published when set; an empty string means unset.
fn optional_text(constants: &Options, key: &str) -> Option<String> {
    constants
        .get(key)
        .map(|value| value.to_string())
        .filter(|s| !s.is_empty())
}

fn flag_or(constants: &mut Options, key: &str, default: bool) -> Result<bool, CoreError> {
    let value = constants
        .entry(key.to_string())
        .or_insert(OptionValue::Bool(default));
    value.as_bool().ok_or_else(|| invalid(key, "a boolean", value))
}

fn check_dpi(constants: &mut Options) -> Result<(), CoreError> {
    let value = constants
        .entry(keys::DPI.to_string())
        .or_insert(OptionValue::Integer(DEFAULT_DPI.into()));
    value
        .as_i64()
        .and_then(|dpi| u32::try_from(dpi).ok())
        .filter(|dpi| *dpi > 0)
        .map(|_| ())
        .ok_or_else(|| invalid(keys::DPI, "a positive integer", value))
}

fn ratio_or(constants: &mut Options) -> Result<f64, CoreError> {
    let value = constants
        .entry(keys::FONT_HEIGHT_RATIO.to_string())
        .or_insert(OptionValue::Float(DEFAULT_FONT_HEIGHT_RATIO));
    value
        .as_f64()
        .filter(|ratio| ratio.is_finite() && *ratio > 0.0)
        .ok_or_else(|| invalid(keys::FONT_HEIGHT_RATIO, "a positive number", value))
}
