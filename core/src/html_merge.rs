//! Multiline HTML tag merger: joins a line that opens an HTML tag but
//! doesn't close it with the following line if that line closes it,
//! grounded in `Document::_mergeMultilineHtmlTags` in `markdown.cpp`.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::node::Node;

fn tag_start_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^<((/?)([a-zA-Z0-9]+)(?:( +[a-zA-Z0-9]+?(?: ?= ?("|').*?\5))*? */? *))$"#).unwrap()
    })
}

fn tag_end_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"^ *((?:( +[a-zA-Z0-9]+?(?: ?= ?("|').*?\3))*? */? *))>$"#).unwrap()
    })
}

/// Consumes a line ending mid-tag (`<div` with no closing `>`) followed by a
/// line that finishes it (`  class="x">`), replacing the pair with a single
/// joined line so later passes see one well-formed tag.
pub fn merge_multiline_html_tags(nodes: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    let mut iter = nodes.into_iter().peekable();
    while let Some(node) = iter.next() {
        if let Some(text) = node.text() {
            if tag_start_pattern().is_match(text).unwrap_or(false) {
                if let Some(next) = iter.peek() {
                    if let Some(next_text) = next.text() {
                        if tag_end_pattern().is_match(next_text).unwrap_or(false) {
                            let joined = format!("{} {}", text, next_text);
                            iter.next();
                            out.push(Node::raw_text(joined));
                            continue;
                        }
                    }
                }
            }
        }
        out.push(node);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_merges_tag_split_across_two_lines() {
        let nodes = vec![Node::raw_text("<div"), Node::raw_text(r#"class="x">"#)];
        let merged = merge_multiline_html_tags(nodes);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].text().unwrap(), r#"<div class="x">"#);
    }

    #[test]
    fn smoke_test_leaves_unrelated_lines_alone() {
        let nodes = vec![Node::raw_text("hello"), Node::raw_text("world")];
        let merged = merge_multiline_html_tags(nodes);
        assert_eq!(merged.len(), 2);
    }
}
