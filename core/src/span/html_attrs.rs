//! "Attribute content is not a code span": pulls quoted attribute values out
//! of recognized HTML tags before the code-span pass runs, so a backtick
//! inside `<a title="can't">` doesn't get mistaken for a code span.
//! Grounded in `RawText::_processHtmlTagAttributes` in `markdown-tokens.cpp`.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::inline_html::is_valid_tag;
use crate::node::{EncodingFlags, Node, NodeKind};

use super::placeholder;

fn html_tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<((/?)([a-zA-Z0-9]+)(?:( +[a-zA-Z0-9]+?(?: ?= ?("|').*?\5))+? */? *))>"#).unwrap()
    })
}

fn attribute_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"= ?("|').*?\1"#).unwrap())
}

pub fn process_html_tag_attributes(src: &str, replacements: &mut Vec<Node>) -> String {
    let mut out = String::new();
    let mut pos = 0usize;

    loop {
        let caps = match html_tag_pattern().captures_from_pos(src, pos) {
            Ok(Some(c)) => c,
            _ => {
                out.push_str(&src[pos..]);
                break;
            }
        };
        let whole = caps.get(0).unwrap();
        let tag_name = caps.get(3).map(|g| g.as_str()).unwrap_or("");

        // NOTE: this `is_valid_tag` check is a kludge inherited from the
        // original, present only to paper over a conflict between two
        // reference test suites.
        if is_valid_tag(tag_name, false) > 0 {
            out.push_str(&src[pos..whole.start()]);
            out.push_str(&extract_attributes(whole.as_str(), replacements));
        } else {
            out.push_str(&src[pos..whole.end()]);
        }
        pos = whole.end();
    }

    out
}

fn extract_attributes(full_tag: &str, replacements: &mut Vec<Node>) -> String {
    let mut out = String::new();
    let mut pos = 0usize;
    loop {
        let caps = match attribute_pattern().captures_from_pos(full_tag, pos) {
            Ok(Some(c)) => c,
            _ => {
                out.push_str(&full_tag[pos..]);
                break;
            }
        };
        let whole = caps.get(0).unwrap();
        out.push_str(&full_tag[pos..whole.start()]);
        out.push_str(&placeholder(&replacements.len().to_string(), "htmlTagAttr"));
        replacements.push(Node::leaf(NodeKind::RawText {
            text: whole.as_str().to_string(),
            can_contain_markup: false,
            encoding: EncodingFlags::HTML_TAG,
        }));
        pos = whole.end();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_replaces_attribute_with_placeholder() {
        let mut replacements = Vec::new();
        let out = process_html_tag_attributes(r#"<a title="it's a `test`">"#, &mut replacements);
        assert_eq!(replacements.len(), 1);
        assert!(out.starts_with("<a "));
        assert!(out.contains("htmlTagAttr"));
    }

    #[test]
    fn smoke_test_ignores_unrecognized_tag() {
        let mut replacements = Vec::new();
        let out = process_html_tag_attributes(r#"<bogus title="x">"#, &mut replacements);
        assert!(replacements.is_empty());
        assert_eq!(out, r#"<bogus title="x">"#);
    }
}
