//! HTML tag classification, grounded in the `cOtherTagInit`/`cBlockTagInit`
//! tables and `isValidTag` in `markdown-tokens.cpp`. The trailing `/` in the
//! original tables only records "this tag can take a closing tag" and is
//! stripped before the name goes into the lookup set, so it carries no
//! further meaning here either — tags are stored bare.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Header and inline-level tags — rank 1 when matched.
const OTHER_TAG_NAMES: &[&str] = &[
    "title", "base", "link", "basefont", "script", "style", "object", "meta",
    "em", "strong", "q", "cite", "dfn", "abbr", "acronym", "code", "samp",
    "kbd", "var", "sub", "sup", "del", "ins", "isindex", "a", "img", "br",
    "map", "area", "object", "param", "applet", "span",
];

/// Block-level tags — rank 2 when matched. `s` (strikethrough) stays
/// excluded, matching the commented-out entry in the original table.
const BLOCK_TAG_NAMES: &[&str] = &[
    "p", "blockquote", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "dl", "dt",
    "dd", "ol", "ul", "li", "dir", "menu", "table", "tr", "th", "td", "col",
    "colgroup", "caption", "thead", "tbody", "tfoot", "form", "select",
    "option", "input", "label", "textarea", "div", "pre", "address",
    "iframe", "frame", "frameset", "noframes", "center", "b", "i", "big",
    "small", "strike", "tt", "u", "font", "ins", "del",
];

fn other_tags() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| OTHER_TAG_NAMES.iter().copied().collect())
}

fn block_tags() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| BLOCK_TAG_NAMES.iter().copied().collect())
}

/// Returns 0 (unknown), 1 (span/other tag) or 2 (block tag). `non_block_first`
/// flips which set is consulted first; since the sets are disjoint in
/// practice this only matters if a future tag were added to both.
pub fn is_valid_tag(tag: &str, non_block_first: bool) -> usize {
    if non_block_first {
        if other_tags().contains(tag) {
            return 1;
        }
        if block_tags().contains(tag) {
            return 2;
        }
    } else {
        if block_tags().contains(tag) {
            return 2;
        }
        if other_tags().contains(tag) {
            return 1;
        }
    }
    0
}

pub fn is_block_tag(tag: &str) -> bool {
    block_tags().contains(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_block_tag_ranks_two() {
        assert_eq!(is_valid_tag("div", false), 2);
        assert!(is_block_tag("div"));
    }

    #[test]
    fn smoke_test_span_tag_ranks_one() {
        assert_eq!(is_valid_tag("em", false), 1);
        assert!(!is_block_tag("em"));
    }

    #[test]
    fn smoke_test_unknown_tag_ranks_zero() {
        assert_eq!(is_valid_tag("bogus", false), 0);
    }

    #[test]
    fn smoke_test_strikethrough_excluded() {
        assert_eq!(is_valid_tag("s", false), 0);
    }
}
