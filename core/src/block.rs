//! Block classification: headers, horizontal rules, code blocks and block
//! quotes. Grounded in `Document::parseHeader`/`parseHorizontalRule`/
//! `parseCodeBlock`/`parseBlockQuote` in `markdown.cpp`. List blocks get
//! their own module (`list.rs`) since `parseListBlock` is the largest single
//! function in the original and deserves to stand apart.
//!
//! All of these run over a flat `Vec<Node>` of already-read lines and are
//! tried in order at each position by `process_block_items`, which also
//! recurses into every container it just created.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::list;
use crate::node::{Container, Node, NodeKind};

fn atx_header_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(#{1,6}) +(.*?) *#*$").unwrap())
}

fn setext_underline_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([-=])\1*$").unwrap())
}

fn horizontal_rule_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ {0,3}([-*_] *){3,}$").unwrap())
}

fn block_quote_start_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^((?: {0,3}>)+) (.*)$").unwrap())
}

fn is_code_block_line(line: &str) -> bool {
    line.starts_with("    ")
}

/// Recursively classifies the children of `container` into headers,
/// horizontal rules, list blocks, block quotes and code blocks, then
/// recurses into every container it just produced. Mirrors
/// `Document::_processBlocksItems`.
pub fn process_block_items(container: Node) -> Node {
    let Node { kind, children } = container;
    if !matches!(kind, NodeKind::Container { .. }) {
        return Node { kind, children };
    }

    let mut out = Vec::with_capacity(children.len());
    let mut i = 0;
    while i < children.len() {
        if let Some((node, consumed)) = try_setext_header(&children, i) {
            out.push(node);
            i += consumed;
            continue;
        }
        if let Some(node) = children[i].text().filter(|t| atx_header_pattern().is_match(t).unwrap_or(false)) {
            let caps = atx_header_pattern().captures(node).unwrap().unwrap();
            let level = caps.get(1).unwrap().as_str().len() as u8;
            let text = caps.get(2).unwrap().as_str().to_string();
            out.push(Node::header(level, text));
            i += 1;
            continue;
        }
        if children[i].text().is_some_and(|t| horizontal_rule_pattern().is_match(t).unwrap_or(false)) {
            out.push(Node::html_tag("hr/"));
            i += 1;
            continue;
        }
        if let Some((node, consumed)) = list::try_parse_list(&children, i) {
            out.push(process_block_items(node));
            i += consumed;
            continue;
        }
        if let Some((node, consumed)) = try_block_quote(&children, i) {
            out.push(process_block_items(node));
            i += consumed;
            continue;
        }
        if let Some((node, consumed)) = try_code_block(&children, i) {
            out.push(node);
            i += consumed;
            continue;
        }

        out.push(children[i].clone());
        i += 1;
    }

    Node { kind, children: out }
}

fn try_setext_header(children: &[Node], i: usize) -> Option<(Node, usize)> {
    let current = children[i].text()?;
    if current.is_empty() || atx_header_pattern().is_match(current).unwrap_or(false) {
        return None;
    }
    let next = children.get(i + 1)?.text()?;
    let caps = setext_underline_pattern().captures(next).ok().flatten()?;
    let level = if caps.get(1).unwrap().as_str() == "=" { 1 } else { 2 };
    Some((Node::header(level, current), 2))
}

fn try_code_block(children: &[Node], start: usize) -> Option<(Node, usize)> {
    if !children[start].text().is_some_and(is_code_block_line) {
        return None;
    }

    let mut lines = Vec::new();
    let mut i = start;
    while i < children.len() {
        let Some(text) = children[i].text() else { break };
        if is_code_block_line(text) {
            lines.push(text[4..].to_string());
            i += 1;
            continue;
        }
        if children[i].is_blank_line() && children.get(i + 1).is_some_and(|n| n.text().is_some_and(is_code_block_line)) {
            lines.push(String::new());
            i += 1;
            continue;
        }
        break;
    }

    let mut body = lines.join("\n");
    body.push('\n');
    Some((Node::code_block(body), i - start))
}

fn try_block_quote(children: &[Node], start: usize) -> Option<(Node, usize)> {
    let first_text = children[start].text()?;
    let caps = block_quote_start_pattern().captures(first_text).ok().flatten()?;
    let prefix = caps.get(1).unwrap().as_str();
    let level = prefix.matches('>').count();
    let continuation = continuation_pattern(level);

    let mut body_lines = vec![caps.get(2).unwrap().as_str().to_string()];
    let mut i = start + 1;
    while i < children.len() {
        if let Some(text) = children[i].text() {
            if let Some(m) = continuation.captures(text).ok().flatten() {
                body_lines.push(m.get(1).unwrap().as_str().to_string());
                i += 1;
                continue;
            }
            break;
        }
        if children[i].is_blank_line() {
            if children.get(i + 1).and_then(|n| n.text()).is_some_and(|t| continuation.is_match(t).unwrap_or(false)) {
                body_lines.push(String::new());
                i += 1;
                continue;
            }
            break;
        }
        break;
    }

    let body: Vec<Node> = body_lines
        .into_iter()
        .map(|line| if line.is_empty() { Node::blank_line(line) } else { Node::raw_text(line) })
        .collect();
    Some((Node::container(Container::BlockQuote, body), i - start))
}

fn continuation_pattern(level: usize) -> Regex {
    let mut pattern = String::from("^");
    for _ in 0..level {
        pattern.push_str("(?: {0,3}>)");
    }
    pattern.push_str(" ?(.*)$");
    Regex::new(&pattern).expect("generated block quote continuation pattern is always valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(children: Vec<Node>) -> Node {
        Node::container(Container::Root, children)
    }

    #[test]
    fn smoke_test_atx_header() {
        let out = process_block_items(root(vec![Node::raw_text("## Title")]));
        assert!(matches!(out.children[0].kind, NodeKind::Header { level: 2, .. }));
    }

    #[test]
    fn smoke_test_setext_header_consumes_two_lines() {
        let out = process_block_items(root(vec![Node::raw_text("Title"), Node::raw_text("===")]));
        assert_eq!(out.children.len(), 1);
        assert!(matches!(out.children[0].kind, NodeKind::Header { level: 1, .. }));
    }

    #[test]
    fn smoke_test_horizontal_rule() {
        let out = process_block_items(root(vec![Node::raw_text("---")]));
        assert!(matches!(&out.children[0].kind, NodeKind::HtmlTag(s) if s == "hr/"));
    }

    #[test]
    fn smoke_test_code_block_strips_four_spaces() {
        let out = process_block_items(root(vec![Node::raw_text("    code here")]));
        assert!(matches!(&out.children[0].kind, NodeKind::CodeBlock(s) if s == "code here\n"));
    }

    #[test]
    fn smoke_test_block_quote_single_level() {
        let out = process_block_items(root(vec![Node::raw_text("> quoted"), Node::raw_text("> more")]));
        assert!(matches!(out.children[0].kind, NodeKind::Container { kind: Container::BlockQuote }));
        assert_eq!(out.children[0].children.len(), 2);
    }
}
