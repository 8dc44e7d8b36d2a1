use crate::fonts::{FontSet, FontSlot};
use crate::html::{Block, BlockKind};
use crate::paper::PaperSize;

pub const MARGIN: f64 = 54.0;
pub const BODY_SIZE: f64 = 11.0;

/// A positioned line of text, coordinates in points from the bottom left.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub font: FontSlot,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text(TextLine),
    Rule { x1: i64, x2: i64, y: i64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PageItem>,
}

pub struct Layout<'a> {
    paper: PaperSize,
    fonts: &'a FontSet,
    line_height_ratio: f64,
}

impl<'a> Layout<'a> {
    pub fn new(paper: PaperSize, fonts: &'a FontSet, line_height_ratio: f64) -> Self {
        Self {
            paper,
            fonts,
            line_height_ratio,
        }
    }

    /// Flow the blocks top to bottom, starting a new page whenever the next
    /// line would cross the bottom margin. Always yields at least one page.
    pub fn paginate(&self, blocks: &[Block]) -> Vec<Page> {
        let top = self.paper.height - MARGIN;
        let width = (self.paper.width - 2.0 * MARGIN).max(1.0);

        let mut pages = vec![Page::default()];
        let mut y = top;

        for block in blocks {
            let (font, size) = style(block.kind);
            let line_height = size * self.line_height_ratio;

            if block.kind == BlockKind::Rule {
                if y - line_height < MARGIN {
                    pages.push(Page::default());
                    y = top;
                }
                y -= line_height / 2.0;
                current(&mut pages).items.push(PageItem::Rule {
                    x1: MARGIN.round() as i64,
                    x2: (MARGIN + width).round() as i64,
                    y: y.round() as i64,
                });
                y -= line_height / 2.0;
                continue;
            }

            let advance = size * self.fonts.average_width(font);
            let columns = ((width / advance).floor() as usize).max(1);
            let lines = match block.kind {
                BlockKind::Preformatted => hard_wrap(&block.text, columns),
                _ => wrap(&block.text, columns),
            };

            for text in lines {
                if y - line_height < MARGIN {
                    pages.push(Page::default());
                    y = top;
                }
                y -= line_height;
                current(&mut pages).items.push(PageItem::Text(TextLine {
                    font,
                    size: size.round() as i64,
                    x: MARGIN.round() as i64,
                    y: y.round() as i64,
                    text,
                }));
            }
            y -= size * 0.5;
        }

        pages
    }
}

fn current(pages: &mut [Page]) -> &mut Page {
    let last = pages.len() - 1;
    &mut pages[last]
}

fn style(kind: BlockKind) -> (FontSlot, f64) {
    match kind {
        BlockKind::Heading(1) => (FontSlot::Bold, 22.0),
        BlockKind::Heading(2) => (FontSlot::Bold, 18.0),
        BlockKind::Heading(3) => (FontSlot::Bold, 15.0),
        BlockKind::Heading(4) => (FontSlot::Bold, 13.0),
        BlockKind::Heading(_) => (FontSlot::Bold, BODY_SIZE),
        BlockKind::Preformatted => (FontSlot::Mono, 10.0),
        BlockKind::Paragraph | BlockKind::ListItem | BlockKind::Rule => {
            (FontSlot::Regular, BODY_SIZE)
        }
    }
}

/// Greedy word wrap. Hard line breaks are kept; words longer than a line
/// are split.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut used = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > columns {
                if used > 0 {
                    lines.push(std::mem::take(&mut line));
                    used = 0;
                }
                let rest = word.split_off(columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let needed = if used == 0 { word.len() } else { used + 1 + word.len() };
            if needed > columns {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            if used > 0 {
                line.push(' ');
                used += 1;
            }
            line.extend(word.iter());
            used += word.len();
        }
        lines.push(line);
    }
    lines
}

/// Break preformatted text at `columns` without touching whitespace.
pub fn hard_wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for raw in text.split('\n') {
        let chars: Vec<char> = raw.trim_end().chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }
        for chunk in chars.chunks(columns) {
            lines.push(chunk.iter().collect());
        }
    }
    lines
}
