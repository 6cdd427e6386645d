/// Inline text spans produced by the tokenizer.
///
/// Only links and images carry a URL, so the "url iff link/image" rule is
/// part of the type rather than something checked later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { label: String, url: String },
    Image { alt: String, url: String },
}

/// The flat kind of a [`Span`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind {
    Text,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl Span {
    pub fn kind(&self) -> SpanKind {
        match self {
            Span::Text(_) => SpanKind::Text,
            Span::Bold(_) => SpanKind::Bold,
            Span::Italic(_) => SpanKind::Italic,
            Span::Code(_) => SpanKind::Code,
            Span::Link { .. } => SpanKind::Link,
            Span::Image { .. } => SpanKind::Image,
        }
    }

    /// Display text: the label for links, the alt text for images.
    pub fn text(&self) -> &str {
        match self {
            Span::Text(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => text,
            Span::Link { label, .. } => label,
            Span::Image { alt, .. } => alt,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Span::Link { url, .. } | Span::Image { url, .. } => Some(url),
            _ => None,
        }
    }
}

/// Structural kind of a block, decided from its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Heading,
    Quote,
    Code,
    UnorderedList,
    OrderedList,
    Paragraph,
}

/// A blank-line delimited chunk of the document.
///
/// `raw` is always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub raw: String,
}
