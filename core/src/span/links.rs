//! Links, images, raw HTML tags and autolinks, grounded in
//! `RawText::_processLinksImagesAndTags` in `markdown-tokens.cpp`. This is
//! the densest of the five sub-passes: one regex recognizes five distinct
//! shapes (inline link, inline image, reference link, reference image,
//! HTML-tag-or-autolink) and dispatches among them by which capture groups
//! matched.

use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::encoding::{email_encode, encode_text};
use crate::inline_html::is_valid_tag;
use crate::linkids::LinkIds;
use crate::node::{Container, EncodingFlags, Node, NodeKind};

use super::{placeholder, restore_processed_items};

fn link_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"(?:(!?)\[([^\]]+?)\] *\(([^\(]*(?:\(.*?\).*?)*?)\))",
            r"|(?:(!?)\[((?:[^]]*?\[.*?\].*?)|(?:.+?))\](?: *\[(.*?)\])?)",
            r"|(?:<(/?([a-zA-Z0-9]+).*?)>)",
        ))
        .unwrap()
    })
}

fn inline_url_title_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^<?([^ >]*)>?(?: *(?:('|")(.*)\2)|(?:\((.*)\)))? *$"#).unwrap())
}

pub fn looks_like_url(s: &str) -> bool {
    const SCHEMES: &[&str] = &["http://", "https://", "ftp://", "ftps://", "file://", "www.", "ftp."];
    SCHEMES.iter().any(|scheme| s.starts_with(scheme))
}

fn not_valid_name_character(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '%' || c == '-' || c == '+')
}

/// Preserved verbatim from the original's `notValidSiteCharacter`, "kludge"
/// comment and all: anything with the high bit set (any non-ASCII
/// character, here) is accepted too, to support international domain
/// names.
fn not_valid_site_character(c: char) -> bool {
    !(c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '%' || c == '-' || (c as u32) >= 0x80)
}

pub fn looks_like_email(s: &str) -> bool {
    let Some(at_pos) = s.find(not_valid_name_character) else { return false };
    if at_pos == 0 || s[at_pos..].chars().next() != Some('@') {
        return false;
    }
    let site = &s[at_pos + 1..];
    if site.chars().any(not_valid_site_character) {
        return false;
    }
    let trimmed = site.trim_end_matches(|c: char| c.is_alphabetic());
    if !trimmed.ends_with('.') {
        return false;
    }
    let tail_len = site.len() - trimmed.len();
    (2..=4).contains(&tail_len)
}

fn clean_text_link_ref(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c == ' ' {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

pub fn process_links_images_and_tags(src: &str, replacements: &mut Vec<Node>, id_table: &LinkIds) -> String {
    let mut out = String::new();
    let mut pos = 0usize;

    loop {
        let caps = match link_pattern().captures_from_pos(src, pos) {
            Ok(Some(c)) => c,
            _ => {
                out.push_str(&src[pos..]);
                break;
            }
        };
        let whole = caps.get(0).unwrap();
        out.push_str(&src[pos..whole.start()]);
        out.push_str(&placeholder(&replacements.len().to_string(), "links&Images1"));

        let g = |n: usize| caps.get(n).map(|m| m.as_str());
        let matched_nonempty = |n: usize| g(n).is_some_and(|s| !s.is_empty());

        let is_reference_image = matched_nonempty(4);
        let is_inline_image = !is_reference_image && matched_nonempty(1);
        let is_reference_link = !is_reference_image && !is_inline_image && caps.get(5).is_some();
        let is_inline_link = !is_reference_image && !is_inline_image && !is_reference_link && caps.get(2).is_some();
        let is_reference = is_reference_image || is_reference_link;

        if is_reference_image || is_inline_image || is_reference_link || is_inline_link {
            let (contents_or_alt, resolved_url_title) = if is_reference {
                let contents = g(5).unwrap_or("").to_string();
                let explicit_id = g(6).map(|s| s.to_string()).filter(|s| !s.is_empty());
                let link_id = explicit_id.unwrap_or_else(|| clean_text_link_ref(&contents));
                let resolved = id_table.find(&link_id).map(|t| (t.url.clone(), t.title.clone()));
                (contents, resolved)
            } else {
                let contents = g(2).unwrap_or("").to_string();
                let url_and_title = g(3).unwrap_or("");
                let resolved = inline_url_title_pattern().captures(url_and_title).ok().flatten().map(|m| {
                    let url = m.get(1).map(|g| g.as_str()).unwrap_or("").to_string();
                    let title = m.get(3).or_else(|| m.get(4)).map(|g| g.as_str().to_string()).unwrap_or_default();
                    (url, title)
                });
                (contents, resolved)
            };

            match resolved_url_title {
                None => {
                    // Unresolved: encode only the first character as literal
                    // text, and resume scanning right after it.
                    let first_char_len = whole.as_str().chars().next().map(|c| c.len_utf8()).unwrap_or(1);
                    let literal = &whole.as_str()[..first_char_len];
                    replacements.push(Node::raw_text(literal));
                    pos = whole.start() + first_char_len;
                    continue;
                }
                Some((url, title)) if is_reference_image || is_inline_image => {
                    replacements.push(Node::leaf(NodeKind::Image { alt_text: contents_or_alt, url, title }));
                }
                Some((url, title)) => {
                    replacements.push(html_anchor_tag(&url, &title));
                    out.push_str(&contents_or_alt);
                    out.push_str(&placeholder(&replacements.len().to_string(), "links&Images2"));
                    replacements.push(Node::html_tag("/a"));
                }
            }
        } else {
            // HTML tag or autolink.
            let contents = g(7).unwrap_or("");
            let tag_name = g(8).unwrap_or("");

            if looks_like_url(contents) {
                replacements.push(Node::container(
                    Container::Group,
                    vec![html_anchor_tag(contents, ""), Node::raw_text_literal(contents), Node::html_tag("/a")],
                ));
            } else if looks_like_email(contents) {
                replacements.push(Node::container(
                    Container::Group,
                    vec![
                        html_anchor_tag(&email_encode(&format!("mailto:{}", contents)), ""),
                        Node::raw_text_literal(email_encode(contents)),
                        Node::html_tag("/a"),
                    ],
                ));
            } else if is_valid_tag(tag_name, false) > 0 {
                replacements.push(Node::html_tag(restore_processed_items(contents, replacements)));
            } else {
                replacements.push(Node::raw_text(whole.as_str()));
            }
        }

        pos = whole.end();
    }

    out
}

fn html_anchor_tag(url: &str, title: &str) -> Node {
    let mut tag = format!("<a href=\"{}\"", encode_text(url, EncodingFlags { amps: true, quotes: true, ..EncodingFlags::NONE }));
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", encode_text(title, EncodingFlags { amps: true, quotes: true, ..EncodingFlags::NONE })));
    }
    tag.push('>');
    Node::leaf(NodeKind::HtmlAnchorTag(tag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_inline_link_resolves() {
        let mut replacements = Vec::new();
        let ids = LinkIds::new();
        let out = process_links_images_and_tags("[text](http://example.com)", &mut replacements, &ids);
        assert!(out.contains("links&Images1"));
        assert!(out.contains("text"));
        assert!(replacements.iter().any(|n| matches!(n.kind, NodeKind::HtmlAnchorTag(_))));
    }

    #[test]
    fn smoke_test_reference_link_resolves_case_insensitively() {
        let mut replacements = Vec::new();
        let mut ids = LinkIds::new();
        ids.add("Foo", "http://example.com", "");
        let out = process_links_images_and_tags("[text][foo]", &mut replacements, &ids);
        assert!(out.contains("links&Images1"));
        assert!(replacements.iter().any(|n| matches!(n.kind, NodeKind::HtmlAnchorTag(_))));
    }

    #[test]
    fn smoke_test_autolink_url() {
        let mut replacements = Vec::new();
        let ids = LinkIds::new();
        process_links_images_and_tags("<http://example.com>", &mut replacements, &ids);
        assert!(replacements.iter().any(|n| matches!(n.kind, NodeKind::Container { .. })));
    }

    #[test]
    fn smoke_test_looks_like_email() {
        assert!(looks_like_email("joe@example.com"));
        assert!(!looks_like_email("not-an-email"));
    }

    #[test]
    fn smoke_test_image_resolves() {
        let mut replacements = Vec::new();
        let ids = LinkIds::new();
        process_links_images_and_tags("![alt](http://example.com/x.png)", &mut replacements, &ids);
        assert!(replacements.iter().any(|n| matches!(n.kind, NodeKind::Image { .. })));
    }
}
