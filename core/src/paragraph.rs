//! Paragraph grouper: the first half of pass five. Walks every container
//! bottom-up, folding runs of consecutive raw-text children into a single
//! `Paragraph`, or — inside a container that inhibits paragraphs, such as a
//! tight `ListItem` or a `Header` — into the bare joined text with no
//! wrapping tag at all. Grounded in `Container::processParagraphLines` in
//! `markdown-tokens.cpp`.

use crate::node::{Container, Node, NodeKind};

/// Recursively groups paragraphs across the whole tree, depth-first: every
/// container's children are grouped only after any container *among* those
/// children has already been grouped itself, matching
/// `Container::processParagraphLines`'s recursion into child containers
/// before folding its own line list.
pub fn group_paragraphs(node: Node) -> Node {
    match node.kind {
        NodeKind::Container { kind } => {
            let inhibit = container_inhibits_paragraphs(&kind);
            let children: Vec<Node> = node.children.into_iter().map(group_paragraphs).collect();
            let grouped = fold_children(children, inhibit);
            Node { kind: NodeKind::Container { kind }, children: grouped }
        }
        other => Node { kind: other, children: node.children },
    }
}

fn container_inhibits_paragraphs(kind: &Container) -> bool {
    match kind {
        Container::ListItem { inhibit_paragraphs } => *inhibit_paragraphs,
        Container::InlineHtmlBlock { is_block_tag } => !is_block_tag,
        _ => false,
    }
}

/// Folds a container's already-recursed children into paragraphs (or bare
/// text, if `inhibit` is set). Consecutive `RawText` lines that can still
/// contain markup are joined with a single space; any other child — a
/// nested container, a header, a code block, a blank line — flushes the
/// buffer first. A line ending in exactly two trailing spaces is a hard
/// break: it flushes the buffer (with its own trimmed text folded in) and
/// additionally emits a literal `<br/>` before the next run starts.
fn fold_children(children: Vec<Node>, inhibit: bool) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    let mut buffer: Vec<String> = Vec::new();

    for child in children {
        match &child.kind {
            NodeKind::RawText { text, can_contain_markup: true, .. } => {
                if let Some(trimmed) = hard_break_text(text) {
                    buffer.push(trimmed.to_string());
                    flush(&mut buffer, &mut out, inhibit);
                    out.push(Node::html_tag("br/"));
                } else {
                    buffer.push(text.clone());
                }
            }
            NodeKind::BlankLine(_) => {
                flush(&mut buffer, &mut out, inhibit);
            }
            _ => {
                flush(&mut buffer, &mut out, inhibit);
                out.push(child);
            }
        }
    }
    flush(&mut buffer, &mut out, inhibit);

    out
}

/// Returns the line with its trailing two spaces stripped, iff it ends in
/// *exactly* two trailing spaces (three or more is plain trailing
/// whitespace, not a hard break).
fn hard_break_text(text: &str) -> Option<&str> {
    let trimmed = text.trim_end_matches(' ');
    if text.len() - trimmed.len() == 2 {
        Some(trimmed)
    } else {
        None
    }
}

fn flush(buffer: &mut Vec<String>, out: &mut Vec<Node>, inhibit: bool) {
    if buffer.is_empty() {
        return;
    }
    let joined = buffer.join(" ");
    buffer.clear();
    if inhibit {
        out.push(Node::raw_text(joined));
    } else {
        out.push(Node::container(Container::Paragraph, vec![Node::raw_text(joined)]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(children: Vec<Node>) -> Node {
        Node::container(Container::Root, children)
    }

    #[test]
    fn smoke_test_single_line_becomes_paragraph() {
        let out = group_paragraphs(root(vec![Node::raw_text("hello")]));
        assert!(matches!(&out.children[0].kind, NodeKind::Container { kind: Container::Paragraph }));
        assert_eq!(out.children[0].children[0].text().unwrap(), "hello");
    }

    #[test]
    fn smoke_test_consecutive_lines_join_with_space() {
        let out = group_paragraphs(root(vec![Node::raw_text("a"), Node::raw_text("b")]));
        assert_eq!(out.children.len(), 1);
        assert_eq!(out.children[0].children[0].text().unwrap(), "a b");
    }

    #[test]
    fn smoke_test_blank_line_splits_paragraphs() {
        let out = group_paragraphs(root(vec![Node::raw_text("a"), Node::blank_line(""), Node::raw_text("b")]));
        assert_eq!(out.children.len(), 2);
    }

    #[test]
    fn smoke_test_inhibited_container_emits_bare_text() {
        let item = Node::container(Container::ListItem { inhibit_paragraphs: true }, vec![Node::raw_text("a")]);
        let out = group_paragraphs(item);
        assert!(matches!(&out.children[0].kind, NodeKind::RawText { .. }));
    }

    #[test]
    fn smoke_test_hard_break_emits_br_between_paragraphs() {
        let out = group_paragraphs(root(vec![Node::raw_text("a  "), Node::raw_text("b")]));
        assert_eq!(out.children.len(), 3);
        assert!(matches!(&out.children[0].kind, NodeKind::Container { kind: Container::Paragraph }));
        assert!(matches!(&out.children[1].kind, NodeKind::HtmlTag(s) if s == "br/"));
        assert!(matches!(&out.children[2].kind, NodeKind::Container { kind: Container::Paragraph }));
    }

    #[test]
    fn smoke_test_three_trailing_spaces_is_not_a_hard_break() {
        let out = group_paragraphs(root(vec![Node::raw_text("a   "), Node::raw_text("b")]));
        assert_eq!(out.children.len(), 1);
    }
}
