//! List block parsing, grounded in `Document::parseListBlock` in
//! `markdown.cpp` — the largest single function in the original. Detects
//! unordered (`*`/`+`/`-`) and ordered (`N.`) list items, builds per-level
//! regexes from the detected indent, and recurses into deeper indentation to
//! parse sublists directly rather than waiting for a later generic pass.

use fancy_regex::Regex;

use crate::node::{Container, Node};

fn match_list_item(text: &str) -> Option<(bool, usize, char, String)> {
    let unordered = Regex::new(r"^( *)([*+-]) +([^*-].*)$").unwrap();
    if let Some(caps) = unordered.captures(text).ok().flatten() {
        let indent = caps.get(1).unwrap().as_str().len();
        let marker = caps.get(2).unwrap().as_str().chars().next().unwrap();
        let content = caps.get(3).unwrap().as_str().to_string();
        return Some((false, indent, marker, content));
    }
    let ordered = Regex::new(r"^( *)([0-9]+)\. +(.*)$").unwrap();
    if let Some(caps) = ordered.captures(text).ok().flatten() {
        let indent = caps.get(1).unwrap().as_str().len();
        let content = caps.get(3).unwrap().as_str().to_string();
        return Some((true, indent, '.', content));
    }
    None
}

fn is_any_list_item(text: &str) -> bool {
    match_list_item(text).is_some()
}

fn marker_literal(ch: char) -> String {
    if ch == '*' { r"\*".to_string() } else { ch.to_string() }
}

fn next_item_pattern(ordered: bool, indent: usize, marker: char) -> Regex {
    let marker_part = if ordered { "[0-9]+\\.".to_string() } else { marker_literal(marker) };
    let pattern = format!("^ {{{}}}{} +([^*-].*)$", indent, marker_part);
    Regex::new(&pattern).expect("generated list-item pattern is always valid")
}

fn start_sublist_pattern(indent: usize) -> Regex {
    let pattern = format!("^ {{{},}}(?:[*+-]|[0-9]+\\.) +.*$", indent + 1);
    Regex::new(&pattern).expect("generated sublist pattern is always valid")
}

fn continued_after_blank_pattern(indent: usize) -> Regex {
    let pattern = format!("^ {{{}}}([^ ].*)$", indent + 4);
    Regex::new(&pattern).expect("generated continuation pattern is always valid")
}

fn code_block_after_blank_pattern(indent: usize) -> Regex {
    let pattern = format!("^ {{{}}}(.*)$", indent + 8);
    Regex::new(&pattern).expect("generated code-block pattern is always valid")
}

fn continued_item_pattern() -> Regex {
    Regex::new(r"^ *([^ ].*)$").unwrap()
}

/// Attempts to parse a list starting at `children[start]`. Returns the built
/// `Container::UnorderedList`/`OrderedList` node and how many input nodes it
/// consumed. A single-item, zero-indent match is treated as a false alarm
/// (matches an isolated `- foo` line that isn't really a list) and rejected.
pub fn try_parse_list(children: &[Node], start: usize) -> Option<(Node, usize)> {
    try_parse_list_at(children, start, true)
}

fn try_parse_list_at(children: &[Node], start: usize, top_level: bool) -> Option<(Node, usize)> {
    let first_text = children.get(start)?.text()?;
    let (ordered, indent, marker, first_content) = match_list_item(first_text)?;
    if top_level && indent >= 4 {
        return None;
    }

    let next_item = next_item_pattern(ordered, indent, marker);
    let start_sublist = start_sublist_pattern(indent);
    let continued_after_blank = continued_after_blank_pattern(indent);
    let code_block_after_blank = code_block_after_blank_pattern(indent);
    let continued_item = continued_item_pattern();

    let mut items: Vec<Vec<Node>> = vec![vec![Node::raw_text(first_content)]];
    let mut paragraph_mode = false;
    let mut i = start + 1;

    while i < children.len() {
        if let Some(text) = children[i].text() {
            if start_sublist.is_match(text).unwrap_or(false) {
                if let Some((sub_node, consumed)) = try_parse_list_at(children, i, false) {
                    items.last_mut().expect("at least one item always exists").push(sub_node);
                    i += consumed;
                    continue;
                }
            }
            if let Some(caps) = next_item.captures(text).ok().flatten() {
                items.push(vec![Node::raw_text(caps.get(1).unwrap().as_str())]);
                i += 1;
                continue;
            }
            if is_any_list_item(text) {
                // Belongs to an enclosing list at a different indent.
                break;
            }
            if let Some(caps) = continued_item.captures(text).ok().flatten() {
                items.last_mut().expect("at least one item always exists").push(Node::raw_text(caps.get(1).unwrap().as_str()));
                i += 1;
                continue;
            }
            break;
        }

        if !children[i].is_blank_line() {
            break;
        }

        let Some(next_text) = children.get(i + 1).and_then(|n| n.text()) else { break };

        if continued_after_blank.is_match(next_text).unwrap_or(false)
            || next_item.is_match(next_text).unwrap_or(false)
            || start_sublist.is_match(next_text).unwrap_or(false)
        {
            paragraph_mode = true;
            i += 1;
            continue;
        }

        if code_block_after_blank.is_match(next_text).unwrap_or(false) {
            let mut code_lines = Vec::new();
            i += 1;
            loop {
                match children.get(i).and_then(|n| n.text()) {
                    Some(t) => match code_block_after_blank.captures(t).ok().flatten() {
                        Some(caps) => {
                            code_lines.push(caps.get(1).unwrap().as_str().to_string());
                            i += 1;
                        }
                        None => break,
                    },
                    None => {
                        if children[i].is_blank_line()
                            && children
                                .get(i + 1)
                                .and_then(|n| n.text())
                                .is_some_and(|t| code_block_after_blank.is_match(t).unwrap_or(false))
                        {
                            code_lines.push(String::new());
                            i += 1;
                        } else {
                            break;
                        }
                    }
                }
            }
            let mut body = code_lines.join("\n");
            body.push('\n');
            items.last_mut().expect("at least one item always exists").push(Node::code_block(body));
            continue;
        }

        break;
    }

    if items.len() == 1 && indent == 0 {
        return None;
    }

    let list_items: Vec<Node> = items
        .into_iter()
        .map(|contents| Node::container(Container::ListItem { inhibit_paragraphs: !paragraph_mode }, contents))
        .collect();

    let kind = if ordered { Container::OrderedList { paragraph_mode } } else { Container::UnorderedList { paragraph_mode } };
    Some((Node::container(kind, list_items), i - start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_simple_unordered_list() {
        let children = vec![Node::raw_text("- one"), Node::raw_text("- two")];
        let (node, consumed) = try_parse_list(&children, 0).unwrap();
        assert_eq!(consumed, 2);
        assert!(matches!(node.kind, crate::node::NodeKind::Container { kind: Container::UnorderedList { paragraph_mode: false } }));
        assert_eq!(node.children.len(), 2);
    }

    #[test]
    fn smoke_test_ordered_list() {
        let children = vec![Node::raw_text("1. one"), Node::raw_text("2. two")];
        let (node, _) = try_parse_list(&children, 0).unwrap();
        assert!(matches!(node.kind, crate::node::NodeKind::Container { kind: Container::OrderedList { .. } }));
    }

    #[test]
    fn smoke_test_single_zero_indent_item_is_rejected() {
        let children = vec![Node::raw_text("- lonely")];
        assert!(try_parse_list(&children, 0).is_none());
    }

    #[test]
    fn smoke_test_continuation_line_appends_to_item() {
        let children = vec![Node::raw_text("- one"), Node::raw_text("  still one"), Node::raw_text("- two")];
        let (node, consumed) = try_parse_list(&children, 0).unwrap();
        assert_eq!(consumed, 3);
        assert_eq!(node.children[0].children.len(), 2);
    }

    #[test]
    fn smoke_test_sublist_nests_under_parent_item() {
        let children = vec![Node::raw_text("- one"), Node::raw_text("  - nested"), Node::raw_text("- two")];
        let (node, consumed) = try_parse_list(&children, 0).unwrap();
        assert_eq!(consumed, 3);
        assert!(node.children[0].children.iter().any(|c| c.is_container()));
    }
}
