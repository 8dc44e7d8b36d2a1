/// Slot of a font in the page resource dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSlot {
    Regular,
    Bold,
    Mono,
}

impl FontSlot {
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
            Self::Mono => "F3",
        }
    }
}

/// The three base-14 fonts a document is written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSet {
    pub regular: &'static str,
    pub bold: &'static str,
    pub mono: &'static str,
}

impl FontSet {
    /// Map a CSS-ish family name onto base-14 fonts. Unknown families fall
    /// back to the serif face.
    pub fn for_family(family: &str) -> Self {
        let (regular, bold) = match family.trim().to_ascii_lowercase().as_str() {
            "sans-serif" | "sans" | "helvetica" | "arial" | "dejavu sans" => {
                ("Helvetica", "Helvetica-Bold")
            }
            "monospace" | "courier" | "fixed" => ("Courier", "Courier-Bold"),
            _ => ("Times-Roman", "Times-Bold"),
        };
        Self {
            regular,
            bold,
            mono: "Courier",
        }
    }

    pub fn base_font(&self, slot: FontSlot) -> &'static str {
        match slot {
            FontSlot::Regular => self.regular,
            FontSlot::Bold => self.bold,
            FontSlot::Mono => self.mono,
        }
    }

    /// Average advance of one glyph as a fraction of the font size. Good
    /// enough for greedy line breaking; no glyph metrics are consulted.
    pub fn average_width(&self, slot: FontSlot) -> f64 {
        let name = self.base_font(slot);
        let base = if name.starts_with("Courier") {
            0.6
        } else if name.starts_with("Helvetica") {
            0.52
        } else {
            0.47
        };
        if slot == FontSlot::Bold && !name.starts_with("Courier") {
            base + 0.04
        } else {
            base
        }
    }
}
