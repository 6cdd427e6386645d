use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::block::{Block, BlockKind};
use crate::error::{Error, Result};

/// Block rules in priority order. Every pattern is anchored at the start of
/// the block, so only the first line decides (code fences also need the
/// closing fence at the very end).
const BLOCK_RULES: [(BlockKind, &str); 5] = [
    (BlockKind::Heading, r"^#{1,6} .+"),
    (BlockKind::Quote, r"^> .+"),
    (BlockKind::Code, r"^```[\s\S]+?```$"),
    (BlockKind::UnorderedList, r"^- .+"),
    (BlockKind::OrderedList, r"^\d+\. .+"),
];

fn block_matchers() -> &'static [(BlockKind, Regex)] {
    static MATCHERS: OnceLock<Vec<(BlockKind, Regex)>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        BLOCK_RULES
            .iter()
            .map(|&(kind, pattern)| (kind, Regex::new(pattern).expect("Invalid block regex")))
            .collect()
    })
}

/// Split a document into classified blocks.
pub fn parse(markdown: &str) -> Vec<Block> {
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            let kind = classify(raw);
            debug!("classified block as {kind:?}");
            Block {
                kind,
                raw: raw.to_string(),
            }
        })
        .collect()
}

/// Kind of a single trimmed block; anything unmatched is a paragraph.
pub fn classify(block: &str) -> BlockKind {
    block_matchers()
        .iter()
        .find(|(_, matcher)| matcher.is_match(block))
        .map(|&(kind, _)| kind)
        .unwrap_or(BlockKind::Paragraph)
}

/// Text of the first `# ` line in the document, trimmed.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::MissingTitle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn raws(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.raw.as_str()).collect()
    }

    #[test]
    fn test_splits_on_blank_lines() {
        assert_eq!(raws(&parse("A\n\nB\n\nC")), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_discards_whitespace_only_blocks() {
        let blocks = parse("\n\n  A  \n\n   \n\n\t\n\nB\n\n\n\n");
        assert_eq!(raws(&blocks), vec!["A", "B"]);
    }

    #[test]
    fn test_extra_newlines_collapse() {
        assert_eq!(raws(&parse("A\n\n\n\nB")), vec!["A", "B"]);
    }

    #[test]
    fn test_keeps_inner_line_breaks() {
        let blocks = parse("line one\nline two\n\nnext");
        assert_eq!(raws(&blocks), vec!["line one\nline two", "next"]);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }

    #[rstest]
    #[case("# Title", BlockKind::Heading)]
    #[case("###### Six", BlockKind::Heading)]
    #[case("####### Seven", BlockKind::Paragraph)]
    #[case("#NoSpace", BlockKind::Paragraph)]
    #[case("> quoted\n> more", BlockKind::Quote)]
    #[case(">no space", BlockKind::Paragraph)]
    #[case("```\nfn main() {}\n```", BlockKind::Code)]
    #[case("```\nunterminated", BlockKind::Paragraph)]
    #[case("- one\n- two", BlockKind::UnorderedList)]
    #[case("-no space", BlockKind::Paragraph)]
    #[case("1. one\n2. two", BlockKind::OrderedList)]
    #[case("10. ten", BlockKind::OrderedList)]
    #[case("1.no space", BlockKind::Paragraph)]
    #[case("Plain text", BlockKind::Paragraph)]
    fn test_classify(#[case] block: &str, #[case] expected: BlockKind) {
        assert_eq!(classify(block), expected);
    }

    #[test]
    fn test_classification_uses_first_line_only() {
        assert_eq!(classify("1. step\nnot a step\n3 also not"), BlockKind::OrderedList);
        assert_eq!(classify("intro\n- item"), BlockKind::Paragraph);
        assert_eq!(classify("# Heading\n- item"), BlockKind::Heading);
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Hello  ").unwrap(), "Hello");
        assert_eq!(
            extract_title("intro\n\n## Sub\n\n# Main Title\n\n# Second").unwrap(),
            "Main Title"
        );
    }

    #[test]
    fn test_missing_title() {
        assert!(matches!(
            extract_title("## Only a subheading\n\ntext"),
            Err(Error::MissingTitle)
        ));
        assert!(matches!(extract_title(""), Err(Error::MissingTitle)));
    }
}
