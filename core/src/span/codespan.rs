//! Inline code span extraction, grounded in `RawText::_processCodeSpans` in
//! `markdown-tokens.cpp`. Runs as two passes — double backtick-space
//! delimited first, then single backtick — so `` `` `code` `` `` can
//! contain a literal backtick.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::node::Node;

use super::{placeholder, restore_processed_items};

fn double_backtick_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|(?<=[^\\]))`` (.+?) ``").unwrap())
}

fn single_backtick_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|(?<=[^\\]))`(.+?)`").unwrap())
}

pub fn process_code_spans(src: &str, replacements: &mut Vec<Node>) -> String {
    let mut current = src.to_string();
    for pattern in [double_backtick_pattern(), single_backtick_pattern()] {
        current = run_pass(&current, pattern, replacements);
    }
    current
}

fn run_pass(src: &str, pattern: &Regex, replacements: &mut Vec<Node>) -> String {
    let mut out = String::new();
    let mut pos = 0usize;
    loop {
        let caps = match pattern.captures_from_pos(src, pos) {
            Ok(Some(c)) => c,
            _ => {
                out.push_str(&src[pos..]);
                break;
            }
        };
        let whole = caps.get(0).unwrap();
        let contents = caps.get(1).map(|g| g.as_str()).unwrap_or("");

        out.push_str(&src[pos..whole.start()]);
        out.push_str(&placeholder(&replacements.len().to_string(), "codeSpan"));
        replacements.push(Node::code_span(restore_processed_items(contents, replacements)));
        pos = whole.end();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_single_backtick_span() {
        let mut replacements = Vec::new();
        let out = process_code_spans("a `b` c", &mut replacements);
        assert_eq!(replacements.len(), 1);
        assert!(out.contains("codeSpan"));
    }

    #[test]
    fn smoke_test_double_backtick_allows_embedded_backtick() {
        let mut replacements = Vec::new();
        let out = process_code_spans("x `` a`b `` y", &mut replacements);
        assert_eq!(replacements.len(), 1);
        assert!(out.contains("codeSpan"));
    }

    #[test]
    fn smoke_test_escaped_backtick_not_matched_at_string_start() {
        let mut replacements = Vec::new();
        process_code_spans(r"\`not a span`", &mut replacements);
        // The first backtick is escaped, so the span starts at the second one.
        assert_eq!(replacements.len(), 1);
    }
}
