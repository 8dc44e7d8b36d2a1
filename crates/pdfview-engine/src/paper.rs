use crate::error::EngineError;

/// Page dimensions in PDF points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaperSize {
    pub width: f64,
    pub height: f64,
}

impl PaperSize {
    pub const LETTER: Self = Self::new(612.0, 792.0);
    pub const LEGAL: Self = Self::new(612.0, 1008.0);
    pub const TABLOID: Self = Self::new(792.0, 1224.0);
    pub const A3: Self = Self::new(841.89, 1190.55);
    pub const A4: Self = Self::new(595.28, 841.89);
    pub const A5: Self = Self::new(419.53, 595.28);

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse a paper name such as `a4`, `Letter` or `a4 landscape`.
    pub fn parse(name: &str) -> Result<Self, EngineError> {
        let unknown = || EngineError::UnknownPaperSize(name.to_string());
        let mut words = name.split_whitespace();
        let base = words.next().ok_or_else(unknown)?;
        let size = match base.to_ascii_lowercase().as_str() {
            "letter" => Self::LETTER,
            "legal" => Self::LEGAL,
            "tabloid" => Self::TABLOID,
            "a3" => Self::A3,
            "a4" => Self::A4,
            "a5" => Self::A5,
            _ => return Err(unknown()),
        };
        let size = match words.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("portrait") => size,
            Some("landscape") => size.landscape(),
            Some(_) => return Err(unknown()),
        };
        if words.next().is_some() {
            return Err(unknown());
        }
        Ok(size)
    }

    pub fn landscape(self) -> Self {
        Self::new(self.width.max(self.height), self.width.min(self.height))
    }
}
