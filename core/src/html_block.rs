//! Inline-HTML block detection and reference-definition extraction,
//! grounded in `Document::parseInlineHtml`/`parseReference`/
//! `_processInlineHtmlAndReferences` in `markdown.cpp`. Runs once, directly
//! over the flat line list the reader produced, before block classification
//! and list parsing ever see it.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::inline_html::{is_block_tag, is_valid_tag};
use crate::linkids::LinkIds;
use crate::node::{Container, Node, NodeKind};

fn reference_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^ {0,3}\[(.+)\]: +<?([^ >]+)>?(?: *(?:('|")(.*)\3)|(?:\((.*)\)))?$"#).unwrap())
}

fn reference_title_continuation_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^ *(?:('|")(.*)\1|\((.*)\)) *$"#).unwrap())
}

fn tag_open_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<(/?)([A-Za-z0-9]+)").unwrap())
}

fn lone_tag_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^<[^>]*>$").unwrap())
}

fn comment_end_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-- *>$").unwrap())
}

fn html_fragment_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Walks the flat line list once, dropping reference-definition lines into
/// `id_table` and collapsing runs of raw HTML into `InlineHtmlBlock`
/// containers. Returns the rewritten list and the populated table.
pub fn process_inline_html_and_references(nodes: Vec<Node>) -> (Vec<Node>, LinkIds) {
    let mut out = Vec::with_capacity(nodes.len());
    let mut id_table = LinkIds::new();
    let mut at_boundary = true;
    let mut i = 0;

    while i < nodes.len() {
        if nodes[i].is_blank_line() {
            at_boundary = true;
            out.push(nodes[i].clone());
            i += 1;
            continue;
        }

        if let Some(consumed) = try_reference(&nodes, i, &mut id_table) {
            i += consumed;
            continue;
        }
        if at_boundary {
            if let Some((block, consumed)) = try_html_block(&nodes, i) {
                out.push(block);
                i += consumed;
                at_boundary = true;
                continue;
            }
        }
        out.push(nodes[i].clone());
        at_boundary = false;
        i += 1;
    }

    (out, id_table)
}

fn try_reference(nodes: &[Node], i: usize, id_table: &mut LinkIds) -> Option<usize> {
    let text = nodes[i].text()?;
    let caps = reference_pattern().captures(text).ok().flatten()?;
    let id = caps.get(1)?.as_str();
    let url = caps.get(2)?.as_str();
    let mut title = caps.get(4).or_else(|| caps.get(5)).map(|m| m.as_str().to_string()).unwrap_or_default();
    let mut consumed = 1;

    if title.is_empty() {
        if let Some(next_text) = nodes.get(i + 1).and_then(|n| n.text()) {
            if let Some(tcaps) = reference_title_continuation_pattern().captures(next_text).ok().flatten() {
                title = tcaps.get(2).or_else(|| tcaps.get(3)).map(|m| m.as_str().to_string()).unwrap_or_default();
                consumed = 2;
            }
        }
    }

    id_table.add(id, url, &title);
    Some(consumed)
}

fn try_html_block(nodes: &[Node], start: usize) -> Option<(Node, usize)> {
    let first = nodes[start].text()?;

    if first.trim_start().starts_with("<!--") {
        return try_html_comment_block(nodes, start);
    }

    let open_tag = tag_open_pattern().captures(first).ok().flatten()?;
    let tag_name = open_tag.get(2)?.as_str().to_lowercase();
    if is_valid_tag(&tag_name, false) == 0 {
        return None;
    }

    let mut i = start;
    let mut absorbed = 0usize;
    loop {
        let Some(node) = nodes.get(i) else { break };
        if node.is_blank_line() {
            break;
        }
        let text = node.text().expect("non-blank leaf always carries text");
        absorbed += 1;
        i += 1;

        let is_lone_tag = lone_tag_pattern().is_match(text).unwrap_or(false);
        let next_is_blank = nodes.get(i).map(|n| n.is_blank_line()).unwrap_or(true);
        if next_is_blank && (absorbed == 1 || is_lone_tag) {
            break;
        }
    }

    // A single-line "block" whose tag is span-only isn't really a block.
    if absorbed == 1 && is_valid_tag(&tag_name, false) != 2 {
        return None;
    }

    let children: Vec<Node> = nodes[start..start + absorbed]
        .iter()
        .filter_map(|n| n.text())
        .map(parse_inline_html_line)
        .collect();
    let node = Node::container(Container::InlineHtmlBlock { is_block_tag: is_block_tag(&tag_name) }, children);
    Some((node, absorbed))
}

fn try_html_comment_block(nodes: &[Node], start: usize) -> Option<(Node, usize)> {
    let mut i = start;
    let mut absorbed = 0usize;
    loop {
        let Some(text) = nodes.get(i).and_then(|n| n.text()) else { break };
        absorbed += 1;
        i += 1;
        if comment_end_pattern().is_match(text).unwrap_or(false) {
            break;
        }
        if i >= nodes.len() {
            break;
        }
    }

    let children: Vec<Node> = nodes[start..start + absorbed]
        .iter()
        .filter_map(|n| n.text())
        .map(|t| Node::leaf(NodeKind::InlineHtmlComment(t.to_string())))
        .collect();
    Some((Node::container(Container::InlineHtmlBlock { is_block_tag: true }, children), absorbed))
}

fn parse_inline_html_line(line: &str) -> Node {
    let mut parts = Vec::new();
    let mut pos = 0usize;

    for m in html_fragment_pattern().find_iter(line) {
        let m = match m {
            Ok(m) => m,
            Err(_) => break,
        };
        if pos != m.start() {
            parts.push(Node::leaf(NodeKind::InlineHtmlContents(line[pos..m.start()].to_string())));
        }
        let inner = &line[m.start() + 1..m.end() - 1];
        parts.push(Node::html_tag(inner));
        pos = m.end();
    }
    if pos != line.len() {
        parts.push(Node::leaf(NodeKind::InlineHtmlContents(line[pos..].to_string())));
    }

    if parts.len() == 1 {
        parts.pop().expect("just checked length is 1")
    } else {
        Node::container(Container::Group, parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_reference_definition_dropped_from_stream() {
        let nodes = vec![Node::raw_text("[foo]: http://example.com \"Example\"")];
        let (out, table) = process_inline_html_and_references(nodes);
        assert!(out.is_empty());
        assert!(table.find("foo").is_some());
    }

    #[test]
    fn smoke_test_reference_title_on_continuation_line() {
        let nodes = vec![Node::raw_text("[foo]: http://example.com"), Node::raw_text("  \"Example\"")];
        let (out, table) = process_inline_html_and_references(nodes);
        assert!(out.is_empty());
        assert_eq!(table.find("foo").unwrap().title, "Example");
    }

    #[test]
    fn smoke_test_block_tag_absorbs_until_closing_blank() {
        let nodes = vec![
            Node::blank_line(""),
            Node::raw_text("<div>"),
            Node::raw_text("content"),
            Node::raw_text("</div>"),
            Node::blank_line(""),
        ];
        let (out, _) = process_inline_html_and_references(nodes);
        assert!(out.iter().any(|n| matches!(&n.kind, NodeKind::Container { kind: Container::InlineHtmlBlock { .. } })));
    }

    #[test]
    fn smoke_test_single_line_span_tag_not_treated_as_block() {
        let nodes = vec![Node::blank_line(""), Node::raw_text("<em>hi</em>"), Node::blank_line("")];
        let (out, _) = process_inline_html_and_references(nodes);
        assert!(!out.iter().any(|n| matches!(&n.kind, NodeKind::Container { kind: Container::InlineHtmlBlock { .. } })));
    }
}
