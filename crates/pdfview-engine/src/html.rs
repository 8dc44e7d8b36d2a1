//! Reduces HTML to a flat list of text blocks.
//!
//! The document is parsed into a DOM with kuchiki (html5ever underneath), so
//! implied end tags, entities and quoted attributes follow the HTML parsing
//! rules. The walk then only opens and closes blocks: no CSS is applied, and
//! elements it does not know are reported as [`Severity::Strict`] diagnostics
//! and treated as inline.

use kuchiki::traits::TendrilSink;
use kuchiki::{ElementData, NodeData, NodeRef};

use crate::diagnostics::{self, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading(u8),
    ListItem,
    Preformatted,
    Rule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    /// Collapsed text; `\n` marks a hard line break.
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub blocks: Vec<Block>,
}

/// What the document may reach for.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParsePolicy {
    pub enable_remote: bool,
    pub enable_javascript: bool,
}

const INLINE: &[&str] = &[
    "a", "abbr", "b", "base", "big", "body", "caption", "cite", "code", "col", "colgroup", "em",
    "figcaption", "figure", "font", "head", "html", "i", "kbd", "label", "link", "main", "mark",
    "meta", "nav", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup", "tbody",
    "tfoot", "thead", "time", "tt", "u", "var",
];

const BLOCK: &[&str] = &[
    "address", "article", "aside", "blockquote", "center", "dd", "div", "dl", "dt", "fieldset",
    "footer", "form", "header", "ol", "p", "section", "table", "tr", "ul",
];

/// Elements whose content is never shown.
const HIDDEN: &[&str] = &["script", "style", "title", "noscript", "template"];

pub fn parse(html: &str, policy: &ParsePolicy) -> ParsedDocument {
    let document = kuchiki::parse_html().one(html);
    let mut builder = Builder {
        policy: *policy,
        ..Builder::default()
    };
    builder.children(&document);
    builder.finish()
}

#[derive(Default)]
struct Builder {
    policy: ParsePolicy,
    title: Option<String>,
    blocks: Vec<Block>,
    /// Kinds of the enclosing blocks; text goes into the innermost one.
    kinds: Vec<BlockKind>,
    current: String,
    pending_space: bool,
    pre_depth: usize,
}

impl Builder {
    fn children(&mut self, node: &NodeRef) {
        for child in node.children() {
            self.node(&child);
        }
    }

    fn node(&mut self, node: &NodeRef) {
        match node.data() {
            NodeData::Text(text) => self.text(&text.borrow()),
            NodeData::Element(element) => self.element(node, element),
            NodeData::Document(_) | NodeData::DocumentFragment => self.children(node),
            _ => {}
        }
    }

    fn element(&mut self, node: &NodeRef, element: &ElementData) {
        let name: &str = &element.name.local;

        if HIDDEN.contains(&name) {
            self.hidden(node, name);
            return;
        }
        if let Some(level) = heading_level(name) {
            self.block(node, BlockKind::Heading(level));
            return;
        }
        match name {
            "br" => {
                self.current.push('\n');
                self.pending_space = false;
            }
            "hr" => {
                self.flush();
                self.blocks.push(Block {
                    kind: BlockKind::Rule,
                    text: String::new(),
                });
            }
            "li" => self.block(node, BlockKind::ListItem),
            "pre" => {
                self.pre_depth += 1;
                self.block(node, BlockKind::Preformatted);
                self.pre_depth -= 1;
            }
            "td" | "th" => {
                if !self.current.is_empty() {
                    self.pending_space = true;
                }
                self.children(node);
            }
            "img" => self.image(element),
            _ if BLOCK.contains(&name) => {
                self.flush();
                self.children(node);
                self.flush();
            }
            _ if INLINE.contains(&name) => self.children(node),
            _ => {
                diagnostics::report(
                    Severity::Strict,
                    format_args!("unsupported element <{name}> rendered inline"),
                );
                self.children(node);
            }
        }
    }

    fn block(&mut self, node: &NodeRef, kind: BlockKind) {
        self.flush();
        self.kinds.push(kind);
        self.children(node);
        self.flush();
        self.kinds.pop();
    }

    fn hidden(&mut self, node: &NodeRef, name: &str) {
        match name {
            "title" => {
                let title = node.text_contents().trim().to_string();
                if !title.is_empty() {
                    self.title = Some(title);
                }
            }
            "script" if self.policy.enable_javascript => {
                diagnostics::report(Severity::Notice, "script element ignored");
            }
            _ => {}
        }
    }

    fn image(&mut self, element: &ElementData) {
        let attributes = element.attributes.borrow();
        let src = attributes.get("src").unwrap_or_default();
        if is_remote(src) && !self.policy.enable_remote {
            diagnostics::report(
                Severity::Warning,
                format_args!("remote resource blocked: {src}"),
            );
        }
        if let Some(alt) = attributes.get("alt").filter(|a| !a.trim().is_empty()) {
            self.text(&format!(" [{alt}] "));
        }
    }

    fn text(&mut self, text: &str) {
        if self.pre_depth > 0 {
            self.current.push_str(text);
            return;
        }
        for c in text.chars() {
            if c.is_whitespace() {
                self.pending_space = true;
                continue;
            }
            if self.pending_space && !self.current.is_empty() && !self.current.ends_with('\n') {
                self.current.push(' ');
            }
            self.pending_space = false;
            self.current.push(c);
        }
    }

    fn flush(&mut self) {
        let kind = self.kinds.last().copied().unwrap_or(BlockKind::Paragraph);
        let text = if kind == BlockKind::Preformatted {
            self.current.trim_matches('\n').to_string()
        } else {
            self.current.trim().to_string()
        };
        self.current.clear();
        self.pending_space = false;
        if text.is_empty() {
            return;
        }
        let text = match kind {
            BlockKind::ListItem => format!("\u{2022} {text}"),
            _ => text,
        };
        self.blocks.push(Block { kind, text });
    }

    fn finish(mut self) -> ParsedDocument {
        self.flush();
        ParsedDocument {
            title: self.title,
            blocks: self.blocks,
        }
    }
}

fn heading_level(name: &str) -> Option<u8> {
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

fn is_remote(src: &str) -> bool {
    let lower = src.trim().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//")
}
