//! Span processor: the fifth pass. Expands each span of `RawText` that
//! `can_contain_markup()` into its final mix of text, code spans, links,
//! images, raw HTML and emphasis markers. Grounded in
//! `RawText::processSpanElements` in `markdown-tokens.cpp`, which chains
//! five sub-passes, each one replacing a matched region of the working
//! string with a sentinel placeholder so later passes can't re-match
//! content that's already spoken for.

pub mod codespan;
pub mod emphasis;
pub mod escape;
pub mod html_attrs;
pub mod links;

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::encoding::encode_text;
use crate::linkids::LinkIds;
use crate::node::{EncodingFlags, Node, NodeKind};

/// Matches a placeholder of either shape: `\x01@N@label\x01` (an index into
/// a replacement table) or `\x01@#N@escaped\x01` (an index into the escaped
/// character table).
fn placeholder_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x01@(#?[0-9]*)@.+?\x01").unwrap())
}

pub(crate) fn placeholder(id: &str, label: &str) -> String {
    format!("\x01@{}@{}\x01", id, label)
}

/// Runs the full span pipeline over one block of raw text, returning the
/// nodes it expands into. Only called on text that `can_contain_markup()`;
/// callers that already know a node can't (autolink display text, code
/// span bodies, etc.) skip this entirely, matching
/// `RawText::processSpanElements`'s early-return on `!canContainMarkup()`.
pub fn process_span_elements(text: &str, id_table: &LinkIds) -> Vec<Node> {
    let mut replacements: Vec<Node> = Vec::new();
    let src = html_attrs::process_html_tag_attributes(text, &mut replacements);
    let src = codespan::process_code_spans(&src, &mut replacements);
    let src = escape::process_escaped_characters(&src);
    let src = links::process_links_images_and_tags(&src, &mut replacements, id_table);
    emphasis::process_bold_and_italic_spans(&src, &replacements)
}

/// Walks the whole token tree produced by the paragraph grouper and expands
/// every textual leaf that can still contain markup, in place. This is the
/// half of pass five that actually runs the span sub-passes (the other half,
/// folding lines into paragraphs, is `paragraph::group_paragraphs`); by the
/// time this runs every container shape (list, quote, inline HTML block) is
/// already final, so only `RawText` and `Header` leaves need expanding.
pub fn process_span_tree(node: Node, id_table: &LinkIds) -> Node {
    match node.kind {
        NodeKind::RawText { text, can_contain_markup: true, .. } => {
            let mut expanded = process_span_elements(&text, id_table);
            if expanded.len() == 1 {
                expanded.pop().expect("length checked above")
            } else {
                Node::container(crate::node::Container::Group, expanded)
            }
        }
        NodeKind::Header { level, text } => {
            let children = process_span_elements(&text, id_table);
            Node { kind: NodeKind::Header { level, text }, children }
        }
        NodeKind::Container { kind } => {
            let children = node.children.into_iter().map(|c| process_span_tree(c, id_table)).collect();
            Node::container(kind, children)
        }
        other => Node { kind: other, children: node.children },
    }
}

/// Splits `src` on placeholders, emitting a `RawText` node for the literal
/// text between them and, for each placeholder, either the escaped
/// character it names or the replacement node at the given index. Mirrors
/// `RawText::_encodeProcessedItems`.
pub(crate) fn encode_processed_items(src: &str, replacements: &[Node]) -> Vec<Node> {
    let mut out = Vec::new();
    let mut prev = 0usize;
    for m in placeholder_pattern().captures_iter(src) {
        let m = match m {
            Ok(m) => m,
            Err(_) => break,
        };
        let whole = m.get(0).unwrap();
        let pre = &src[prev..whole.start()];
        if !pre.is_empty() {
            out.push(Node::raw_text(pre));
        }
        prev = whole.end();

        let ref_str = m.get(1).map(|g| g.as_str()).unwrap_or("");
        if let Some(rest) = ref_str.strip_prefix('#') {
            if let Ok(n) = rest.parse::<usize>() {
                out.push(Node::leaf(NodeKind::EscapedCharacter(escape::escaped_character(n))));
            }
        } else if !ref_str.is_empty() {
            if let Ok(n) = ref_str.parse::<usize>() {
                if let Some(node) = replacements.get(n) {
                    out.push(node.clone());
                }
            }
        }
    }
    let tail = &src[prev..];
    if !tail.is_empty() {
        out.push(Node::raw_text(tail));
    }
    out
}

/// Reinserts the literal/renderable form of each placeholder directly into
/// a string, instead of producing separate nodes. Used when a later
/// sub-pass (code spans, HTML tag bodies) captures a substring that may
/// still contain placeholders from an earlier sub-pass and needs them
/// resolved back to text before it becomes a single opaque token. Mirrors
/// `RawText::_restoreProcessedItems`.
pub(crate) fn restore_processed_items(src: &str, replacements: &[Node]) -> String {
    let mut out = String::new();
    let mut prev = 0usize;
    for m in placeholder_pattern().captures_iter(src) {
        let m = match m {
            Ok(m) => m,
            Err(_) => break,
        };
        let whole = m.get(0).unwrap();
        out.push_str(&src[prev..whole.start()]);
        prev = whole.end();

        let ref_str = m.get(1).map(|g| g.as_str()).unwrap_or("");
        if let Some(rest) = ref_str.strip_prefix('#') {
            if let Ok(n) = rest.parse::<usize>() {
                out.push('\\');
                out.push(escape::escaped_character(n));
            }
        } else if !ref_str.is_empty() {
            if let Ok(n) = ref_str.parse::<usize>() {
                if let Some(node) = replacements.get(n) {
                    write_as_original(node, &mut out);
                }
            }
        }
    }
    out.push_str(&src[prev..]);
    out
}

/// The original's `Token::writeAsOriginal`, which most token kinds inherit
/// unchanged from `writeAsHtml` — only `CodeSpan` and `EscapedCharacter`
/// override it to reproduce literal Markdown syntax instead.
fn write_as_original(node: &Node, out: &mut String) {
    match &node.kind {
        NodeKind::CodeSpan(text) => {
            out.push('`');
            out.push_str(text);
            out.push('`');
        }
        NodeKind::EscapedCharacter(ch) => {
            out.push('\\');
            out.push(*ch);
        }
        NodeKind::RawText { text, encoding, .. } => out.push_str(&encode_text(text, *encoding)),
        NodeKind::HtmlTag(body) => {
            out.push('<');
            out.push_str(&encode_text(body, EncodingFlags::HTML_TAG));
            out.push('>');
        }
        NodeKind::HtmlAnchorTag(tag) => out.push_str(tag),
        NodeKind::Container { .. } => {
            for child in &node.children {
                write_as_original(child, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_encode_processed_items_splits_text_and_placeholder() {
        let mut replacements = Vec::new();
        replacements.push(Node::code_span("x"));
        let src = format!("a{}b", placeholder("0", "codeSpan"));
        let nodes = encode_processed_items(&src, &replacements);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].text().unwrap(), "a");
        assert_eq!(nodes[2].text().unwrap(), "b");
    }

    #[test]
    fn smoke_test_process_span_tree_expands_emphasis_in_place() {
        use crate::node::Container;
        let tree = Node::container(Container::Paragraph, vec![Node::raw_text("**bold**")]);
        let out = process_span_tree(tree, &LinkIds::new());
        assert!(out.children[0]
            .children
            .iter()
            .any(|n| matches!(&n.kind, NodeKind::BoldOrItalicMarker(m) if m.matched)));
    }

    #[test]
    fn smoke_test_process_span_tree_expands_header_text() {
        let header = Node::header(1, "**bold**");
        let out = process_span_tree(header, &LinkIds::new());
        assert!(out
            .children
            .iter()
            .any(|n| matches!(&n.kind, NodeKind::BoldOrItalicMarker(m) if m.matched)));
    }

    #[test]
    fn smoke_test_restore_processed_items_renders_code_span_with_backticks() {
        let replacements = vec![Node::code_span("x")];
        let src = format!("a{}b", placeholder("0", "codeSpan"));
        assert_eq!(restore_processed_items(&src, &replacements), "a`x`b");
    }
}
