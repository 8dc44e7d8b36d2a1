use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, Stream, dictionary};

use crate::error::EngineError;
use crate::fonts::{FontSet, FontSlot};
use crate::layout::{Page, PageItem};
use crate::paper::PaperSize;

pub const PRODUCER: &str = "pdfview";

/// How text is turned into bytes for the base-14 fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Latin-1 plus the typographic punctuation of WinAnsi.
    WinAnsi,
    /// Seven-bit ASCII; used when unicode support is turned off.
    Ascii,
}

impl TextEncoding {
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Self::WinAnsi => win_ansi(text),
            Self::Ascii => text
                .chars()
                .map(|c| match c {
                    '\t' => b' ',
                    c if c.is_ascii_control() => b' ',
                    c if c.is_ascii() => c as u8,
                    _ => b'?',
                })
                .collect(),
        }
    }
}

/// Serialize laid-out pages into a complete PDF file.
pub fn write_pdf(
    pages: &[Page],
    paper: PaperSize,
    fonts: &FontSet,
    encoding: TextEncoding,
    title: Option<&str>,
) -> Result<Vec<u8>, EngineError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(fonts.base_font(FontSlot::Regular)));
    let bold_id = doc.add_object(font_dictionary(fonts.base_font(FontSlot::Bold)));
    let mono_id = doc.add_object(font_dictionary(fonts.base_font(FontSlot::Mono)));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontSlot::Regular.resource_name() => regular_id,
            FontSlot::Bold.resource_name() => bold_id,
            FontSlot::Mono.resource_name() => mono_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, encoding),
        };
        let encoded = content
            .encode()
            .map_err(|e| EngineError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(paper.width.round() as i64),
                Object::Integer(paper.height.round() as i64),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut info = dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
    };
    if let Some(title) = title {
        info.set("Title", Object::string_literal(encoding.encode(title)));
    }
    let info_id = doc.add_object(info);
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| EngineError::Encode(e.to_string()))?;
    Ok(out)
}

fn font_dictionary(base_font: &'static str) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn page_operations(page: &Page, encoding: TextEncoding) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in &page.items {
        match item {
            PageItem::Text(line) => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![line.font.resource_name().into(), Object::Integer(line.size)],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![Object::Integer(line.x), Object::Integer(line.y)],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encoding.encode(&line.text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            PageItem::Rule { x1, x2, y } => {
                ops.push(Operation::new("w", vec![Object::Integer(1)]));
                ops.push(Operation::new(
                    "m",
                    vec![Object::Integer(*x1), Object::Integer(*y)],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![Object::Integer(*x2), Object::Integer(*y)],
                ));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

/// Encode text for the base-14 fonts' WinAnsi encoding. Characters outside
/// it become `?`.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\t' => b' ',
            c if (c as u32) < 0x20 => b' ',
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}
