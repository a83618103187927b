//! Bold/italic emphasis matching, grounded in
//! `RawText::_processBoldAndItalicSpans` in `markdown-tokens.cpp` — the
//! hardest of the five sub-passes. A single regex recognizes three marker
//! shapes (a tight mid-word `*word*`, a free-standing opener, a
//! free-standing closer); markers are then paired up left-to-right, with a
//! 3-wide marker (which reads as both bold and italic) splitting to satisfy
//! a 1- or 2-wide partner, and finally a stack-based pass unmatches any
//! pair that turns out to nest invalidly against another pair.
//!
//! Rather than the original's intrusive `BoldOrItalicMarker*` peer pointer,
//! marker state lives in a flat, append-only arena indexed by position;
//! peer references are plain arena indices, stable across the inserts the
//! splitting step performs on the surrounding sequence.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::node::{Marker, Node, NodeKind};

use super::encode_processed_items;

fn emphasis_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?:(?<![*_])([*_]{1,3})([^*_ ]+?)\1(?![*_]))",
            r"|((?:(?<!\*)\*{1,3}(?!\*)|(?<!_)_{1,3}(?!_))(?=.)(?! )(?![.,:;] )(?![.,:;]$))",
            r"|((?<![* ])\*{1,3}(?!\*)|(?<![ _])_{1,3}(?!_))",
        ))
        .unwrap()
    })
}

#[derive(Debug, Clone, Copy)]
struct MarkerSlot {
    open: bool,
    ch: char,
    size: u8,
    matched: Option<usize>,
    disabled: bool,
    match_id: Option<usize>,
}

enum SeqItem {
    Text(String),
    Marker(usize),
}

fn push_marker(arena: &mut Vec<MarkerSlot>, open: bool, ch: char, size: u8) -> usize {
    let idx = arena.len();
    arena.push(MarkerSlot { open, ch, size, matched: None, disabled: false, match_id: None });
    idx
}

fn is_unmatched_open(arena: &[MarkerSlot], idx: usize) -> bool {
    let m = &arena[idx];
    m.open && m.matched.is_none() && !m.disabled
}

fn is_unmatched_close(arena: &[MarkerSlot], idx: usize) -> bool {
    let m = &arena[idx];
    !m.open && m.matched.is_none() && !m.disabled
}

fn token_char_and_size(token: &str) -> (char, u8) {
    (token.chars().next().expect("marker token is never empty"), token.chars().count() as u8)
}

pub fn process_bold_and_italic_spans(src: &str, replacements: &[Node]) -> Vec<Node> {
    let (mut sequence, mut arena) = tokenize(src);

    let mut match_id_counter = 0usize;
    let mut i = 0;
    while i < sequence.len() {
        let open_idx = match sequence[i] {
            SeqItem::Marker(idx) if is_unmatched_open(&arena, idx) => idx,
            _ => {
                i += 1;
                continue;
            }
        };

        let mut j = i + 1;
        while j < sequence.len() {
            let close_idx = match sequence[j] {
                SeqItem::Marker(idx) if is_unmatched_close(&arena, idx) => idx,
                _ => {
                    j += 1;
                    continue;
                }
            };

            let (open_ch, open_size) = (arena[open_idx].ch, arena[open_idx].size);
            let (close_ch, close_size) = (arena[close_idx].ch, arena[close_idx].size);

            if close_size == 3 && open_size != 3 {
                arena[close_idx].disabled = true;
                let leftover = push_marker(&mut arena, false, close_ch, close_size - open_size);
                let matching = push_marker(&mut arena, false, close_ch, open_size);
                sequence.insert(j + 1, SeqItem::Marker(leftover));
                sequence.insert(j + 2, SeqItem::Marker(matching));
                j += 1;
                continue;
            }

            if close_ch == open_ch && close_size == open_size {
                arena[open_idx].matched = Some(close_idx);
                arena[open_idx].match_id = Some(match_id_counter);
                arena[close_idx].matched = Some(open_idx);
                arena[close_idx].match_id = Some(match_id_counter);
                match_id_counter += 1;
                break;
            } else if open_size == 3 {
                arena[open_idx].disabled = true;
                let leftover = push_marker(&mut arena, true, open_ch, open_size - close_size);
                let matching = push_marker(&mut arena, true, open_ch, close_size);
                sequence.insert(i + 1, SeqItem::Marker(leftover));
                sequence.insert(i + 2, SeqItem::Marker(matching));
                break;
            } else {
                break;
            }
        }

        i += 1;
    }

    unmatch_invalidly_nested(&sequence, &mut arena);

    let mut result = Vec::new();
    for item in sequence {
        match item {
            SeqItem::Text(text) => result.extend(encode_processed_items(&text, replacements)),
            SeqItem::Marker(idx) => {
                let m = arena[idx];
                result.push(Node::leaf(NodeKind::BoldOrItalicMarker(Marker {
                    open: m.open,
                    ch: m.ch,
                    size: m.size,
                    matched: m.matched.is_some(),
                    disabled: m.disabled,
                })));
            }
        }
    }
    result
}

fn tokenize(src: &str) -> (Vec<SeqItem>, Vec<MarkerSlot>) {
    let mut sequence = Vec::new();
    let mut arena = Vec::new();
    let mut pos = 0usize;

    loop {
        let caps = match emphasis_pattern().captures_from_pos(src, pos) {
            Ok(Some(c)) => c,
            _ => {
                if pos != src.len() {
                    sequence.push(SeqItem::Text(src[pos..].to_string()));
                }
                break;
            }
        };
        let whole = caps.get(0).unwrap();
        if pos != whole.start() {
            sequence.push(SeqItem::Text(src[pos..whole.start()].to_string()));
        }

        if let Some(open_g) = caps.get(3) {
            let (ch, size) = token_char_and_size(open_g.as_str());
            sequence.push(SeqItem::Marker(push_marker(&mut arena, true, ch, size)));
        } else if let Some(close_g) = caps.get(4) {
            let (ch, size) = token_char_and_size(close_g.as_str());
            sequence.push(SeqItem::Marker(push_marker(&mut arena, false, ch, size)));
        } else {
            let token = caps.get(1).unwrap().as_str();
            let contents = caps.get(2).unwrap().as_str();
            let (ch, size) = token_char_and_size(token);
            sequence.push(SeqItem::Marker(push_marker(&mut arena, true, ch, size)));
            sequence.push(SeqItem::Text(contents.to_string()));
            sequence.push(SeqItem::Marker(push_marker(&mut arena, false, ch, size)));
        }

        pos = whole.end();
    }

    (sequence, arena)
}

fn unmatch_invalidly_nested(sequence: &[SeqItem], arena: &mut [MarkerSlot]) {
    let mut open_matches: Vec<usize> = Vec::new();
    for item in sequence {
        let idx = match item {
            SeqItem::Marker(idx) => *idx,
            SeqItem::Text(_) => continue,
        };
        if arena[idx].open && arena[idx].matched.is_some() {
            open_matches.push(idx);
        } else if !arena[idx].open && arena[idx].matched.is_some() {
            let Some(&top) = open_matches.last() else { continue };
            if arena[idx].match_id != arena[top].match_id {
                let partner = arena[idx].matched.unwrap();
                arena[partner].matched = None;
                arena[idx].matched = None;
            } else {
                open_matches.pop();
                while let Some(&t) = open_matches.last() {
                    if arena[t].matched.is_none() {
                        open_matches.pop();
                    } else {
                        break;
                    }
                }
            }
        }
    }
}
