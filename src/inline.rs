//! Inline span tokenizer.
//!
//! Text is split around every match of the combined inline pattern, then each
//! fragment is classified on its own. Rules are tried in the order of
//! [`INLINE_RULES`], so bold wins over italic, italic over code, and so on.

use std::sync::OnceLock;

use regex::Regex;

use crate::block::{Span, SpanKind};
use crate::error::{Error, Result};

struct InlineRule {
    kind: SpanKind,
    pattern: &'static str,
}

static INLINE_RULES: [InlineRule; 5] = [
    InlineRule {
        kind: SpanKind::Bold,
        pattern: r"\*\*.*?\*\*",
    },
    InlineRule {
        kind: SpanKind::Italic,
        pattern: r"_.*?_",
    },
    InlineRule {
        kind: SpanKind::Code,
        pattern: r"`.*?`",
    },
    InlineRule {
        kind: SpanKind::Link,
        pattern: r"\[.*?\]\(.*?\)",
    },
    InlineRule {
        kind: SpanKind::Image,
        pattern: r"!\[.*?\]\(.*?\)",
    },
];

/// Capture group of the link alternative in the combined splitter.
const LINK_GROUP: usize = 4;

fn splitter() -> &'static Regex {
    static SPLITTER: OnceLock<Regex> = OnceLock::new();
    SPLITTER.get_or_init(|| {
        let alternation = INLINE_RULES
            .iter()
            .map(|rule| format!("({})", rule.pattern))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&alternation).expect("Invalid inline splitter regex")
    })
}

fn full_matchers() -> &'static [Regex] {
    static MATCHERS: OnceLock<Vec<Regex>> = OnceLock::new();
    MATCHERS.get_or_init(|| {
        INLINE_RULES
            .iter()
            .map(|rule| Regex::new(&format!("^(?:{})$", rule.pattern)).expect("Invalid inline regex"))
            .collect()
    })
}

/// Tokenize a run of text into inline spans.
pub fn tokenize(text: &str) -> Result<Vec<Span>> {
    split(text).into_iter().map(classify).collect()
}

/// Split text around inline matches, dropping empty fragments.
fn split(text: &str) -> Vec<&str> {
    let splitter = splitter();
    let mut fragments = Vec::new();
    let mut last = 0;
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = splitter.captures_at(text, pos) else {
            break;
        };
        let Some(m) = caps.get(0) else {
            break;
        };

        // `[` right after `!` never starts a link
        if caps.get(LINK_GROUP).is_some() && text[..m.start()].ends_with('!') {
            pos = m.start() + 1;
            continue;
        }

        if m.start() > last {
            fragments.push(&text[last..m.start()]);
        }
        fragments.push(m.as_str());
        last = m.end();
        pos = m.end();
    }

    if last < text.len() {
        fragments.push(&text[last..]);
    }
    fragments
}

fn classify(fragment: &str) -> Result<Span> {
    let rule = INLINE_RULES
        .iter()
        .zip(full_matchers())
        .find(|(_, matcher)| matcher.is_match(fragment))
        .map(|(rule, _)| rule);

    let Some(rule) = rule else {
        return Ok(Span::Text(fragment.to_string()));
    };

    let span = match rule.kind {
        SpanKind::Bold => Span::Bold(fragment.trim_matches('*').to_string()),
        SpanKind::Italic => Span::Italic(fragment.trim_matches('_').to_string()),
        SpanKind::Code => Span::Code(fragment.trim_matches('`').to_string()),
        SpanKind::Link => {
            let (label, url) = split_target(fragment, "[")?;
            Span::Link { label, url }
        }
        SpanKind::Image => {
            let (alt, url) = split_target(fragment, "![")?;
            Span::Image { alt, url }
        }
        SpanKind::Text => Span::Text(fragment.to_string()),
    };
    Ok(span)
}

/// Split `[label](url)` (after `prefix`) into its label and url.
fn split_target(fragment: &str, prefix: &str) -> Result<(String, String)> {
    let malformed = || Error::MalformedInline {
        fragment: fragment.to_string(),
    };

    let inner = fragment
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut parts = inner.split("](");
    match (parts.next(), parts.next(), parts.next()) {
        (Some(label), Some(url), None) => Ok((label.to_string(), url.to_string())),
        _ => Err(malformed()),
    }
}
