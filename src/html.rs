use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::block::{Block, BlockKind, Span};
use crate::error::Result;
use crate::inline::tokenize;
use crate::node::{Attributes, MarkupNode};
use crate::parser;

/// Outer tag and item/inner tag per block kind.
const BLOCK_TAGS: [(BlockKind, &str, Option<&str>); 6] = [
    (BlockKind::Heading, "h", None),
    (BlockKind::Quote, "blockquote", None),
    (BlockKind::Code, "pre", Some("code")),
    (BlockKind::UnorderedList, "ul", Some("li")),
    (BlockKind::OrderedList, "ol", Some("li")),
    (BlockKind::Paragraph, "p", None),
];

const ROOT_TAG: &str = "div";
const FENCE: &str = "```";

fn block_tags(kind: BlockKind) -> (&'static str, Option<&'static str>) {
    BLOCK_TAGS
        .iter()
        .find(|(k, _, _)| *k == kind)
        .map(|&(_, tag, sub_tag)| (tag, sub_tag))
        .unwrap_or(("p", None))
}

fn ordered_item() -> &'static Regex {
    static ORDERED_ITEM: OnceLock<Regex> = OnceLock::new();
    ORDERED_ITEM.get_or_init(|| Regex::new(r"^\d+\. (.+)$").expect("Invalid list item regex"))
}

/// Convert a whole document into a single `div` rooted tree.
pub fn convert(markdown: &str) -> Result<MarkupNode> {
    let blocks = parser::parse(markdown);
    debug!("converting document with {} blocks", blocks.len());

    let children = blocks.iter().map(compose).collect::<Result<Vec<_>>>()?;
    Ok(MarkupNode::container(ROOT_TAG, children))
}

/// Build the markup for one block.
pub fn compose(block: &Block) -> Result<MarkupNode> {
    let (tag, sub_tag) = block_tags(block.kind);
    let raw = block.raw.as_str();

    let node = match block.kind {
        BlockKind::Code => {
            let code = raw
                .strip_prefix(FENCE)
                .and_then(|rest| rest.strip_suffix(FENCE))
                .unwrap_or(raw);
            let inner = MarkupNode::leaf(sub_tag.unwrap_or("code"), code);
            MarkupNode::container(tag, vec![inner])
        }
        BlockKind::Heading => {
            let level = raw.chars().take_while(|&c| c == '#').count().clamp(1, 6);
            let content = raw.trim_start_matches('#').trim();
            MarkupNode::container(format!("{tag}{level}"), spans_to_nodes(content)?)
        }
        BlockKind::Quote => {
            let content = raw
                .lines()
                .filter_map(|line| non_empty(line.strip_prefix("> ")))
                .collect::<Vec<_>>()
                .join("\n");
            MarkupNode::container(tag, spans_to_nodes(&content)?)
        }
        BlockKind::UnorderedList => {
            let items = raw
                .lines()
                .filter_map(|line| non_empty(line.strip_prefix("- ")));
            list(tag, sub_tag, items)?
        }
        BlockKind::OrderedList => {
            let items = raw.lines().filter_map(|line| {
                ordered_item()
                    .captures(line)
                    .and_then(|caps| caps.get(1))
                    .map(|m| m.as_str())
            });
            list(tag, sub_tag, items)?
        }
        BlockKind::Paragraph => MarkupNode::container(tag, spans_to_nodes(raw)?),
    };
    Ok(node)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn list<'a>(
    tag: &str,
    sub_tag: Option<&str>,
    items: impl Iterator<Item = &'a str>,
) -> Result<MarkupNode> {
    let item_tag = sub_tag.unwrap_or("li");
    let children = items
        .map(|item| -> Result<MarkupNode> {
            Ok(MarkupNode::container(item_tag, spans_to_nodes(item)?))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(MarkupNode::container(tag, children))
}

fn spans_to_nodes(text: &str) -> Result<Vec<MarkupNode>> {
    Ok(tokenize(text)?.into_iter().map(span_to_node).collect())
}

/// Markup for a single inline span.
pub fn span_to_node(span: Span) -> MarkupNode {
    match span {
        Span::Text(text) => MarkupNode::text(text),
        Span::Bold(text) => MarkupNode::leaf("b", text),
        Span::Italic(text) => MarkupNode::leaf("i", text),
        Span::Code(text) => MarkupNode::leaf("code", text),
        Span::Link { label, url } => {
            MarkupNode::leaf("a", label).with_attributes(Attributes::new().with("href", url))
        }
        Span::Image { alt, url } => MarkupNode::leaf("img", "")
            .with_attributes(Attributes::new().with("src", url).with("alt", alt)),
    }
}
