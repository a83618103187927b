//! HTML writer: pass five's final step. Walks the fully processed token
//! tree and streams HTML to an `io::Write`, grounded in
//! `Token::writeAsHtml`/`Container::writeAsHtml` in `markdown-tokens.cpp`.
//! Every container contributes a pre-hook, its children in order, then a
//! post-hook; leaves write themselves directly. Nothing here mutates the
//! tree, so `write` may be called any number of times.

use std::io::{self, Write};

use crate::encoding::encode_text;
use crate::node::{Container, EncodingFlags, Node, NodeKind};

pub fn write_html(node: &Node, out: &mut impl Write) -> io::Result<()> {
    match &node.kind {
        NodeKind::RawText { text, encoding, .. } => write!(out, "{}", encode_text(text, *encoding)),
        NodeKind::BlankLine(_) => Ok(()),
        NodeKind::HtmlTag(body) => write!(out, "<{}>", encode_text(body, EncodingFlags::HTML_TAG)),
        NodeKind::HtmlAnchorTag(tag) => write!(out, "{}", tag),
        NodeKind::InlineHtmlContents(text) => write!(out, "{}", encode_text(text, EncodingFlags { amps: true, ..EncodingFlags::NONE })),
        NodeKind::InlineHtmlComment(text) => write!(out, "{}", text),
        NodeKind::CodeBlock(text) => write!(out, "<pre><code>{}</code></pre>\n\n", encode_text(text, EncodingFlags::CODE)),
        NodeKind::CodeSpan(text) => write!(out, "<code>{}</code>", encode_text(text, EncodingFlags::CODE)),
        NodeKind::Header { level, .. } => {
            write!(out, "<h{}>", level)?;
            for child in &node.children {
                write_html(child, out)?;
            }
            write!(out, "</h{}>\n", level)
        }
        NodeKind::EscapedCharacter(ch) => write!(out, "{}", ch),
        NodeKind::BoldOrItalicMarker(marker) => write_marker(marker, out),
        NodeKind::Image { alt_text, url, title } => {
            write!(
                out,
                "<img src=\"{}\" alt=\"{}\"",
                encode_text(url, EncodingFlags { amps: true, quotes: true, ..EncodingFlags::NONE }),
                encode_text(alt_text, EncodingFlags { amps: true, quotes: true, ..EncodingFlags::NONE })
            )?;
            if !title.is_empty() {
                write!(out, " title=\"{}\"", encode_text(title, EncodingFlags { amps: true, quotes: true, ..EncodingFlags::NONE }))?;
            }
            write!(out, "/>")
        }
        NodeKind::Container { kind } => write_container(kind, &node.children, out),
    }
}

/// Matched markers pair up without needing a render-time stack: the
/// matcher (`span::emphasis::unmatch_invalidly_nested`) already guarantees
/// every surviving pair is validly nested, so each marker's own
/// `open`/`size` fully determines its tag — a width-3 marker is a bold+italic
/// combo (`<strong><em>` / `</em></strong>`), widths 1 and 2 are plain
/// `<em>`/`<strong>`. Unmatched or disabled markers were never resolved into
/// a pair, so they write their literal asterisks/underscores instead.
fn write_marker(marker: &crate::node::Marker, out: &mut impl Write) -> io::Result<()> {
    if !marker.matched || marker.disabled {
        for _ in 0..marker.size {
            write!(out, "{}", marker.ch)?;
        }
        return Ok(());
    }
    match (marker.open, marker.size) {
        (true, 1) => write!(out, "<em>"),
        (true, 2) => write!(out, "<strong>"),
        (true, 3) => write!(out, "<strong><em>"),
        (false, 1) => write!(out, "</em>"),
        (false, 2) => write!(out, "</strong>"),
        (false, 3) => write!(out, "</em></strong>"),
        _ => Ok(()),
    }
}

fn write_container(kind: &Container, children: &[Node], out: &mut impl Write) -> io::Result<()> {
    let (pre, post) = container_tags(kind);
    if !pre.is_empty() {
        out.write_all(pre.as_bytes())?;
    }
    match kind {
        Container::InlineHtmlBlock { .. } => {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.write_all(b"\n")?;
                }
                write_html(child, out)?;
            }
            if !children.is_empty() {
                out.write_all(b"\n")?;
            }
        }
        _ => {
            for child in children {
                write_html(child, out)?;
            }
        }
    }
    if !post.is_empty() {
        out.write_all(post.as_bytes())?;
    }
    Ok(())
}

fn container_tags(kind: &Container) -> (&'static str, &'static str) {
    match kind {
        Container::Root | Container::Group => ("", ""),
        Container::Paragraph => ("<p>", "</p>\n\n"),
        Container::BlockQuote => ("<blockquote>\n", "</blockquote>\n"),
        Container::UnorderedList { .. } => ("\n<ul>\n", "</ul>\n\n"),
        Container::OrderedList { .. } => ("\n<ol>\n", "</ol>\n\n"),
        Container::ListItem { .. } => ("<li>", "</li>\n"),
        Container::InlineHtmlBlock { .. } => ("", "\n"),
    }
}

/// Debug dump of the token tree, one node per line, indented by depth. Not
/// specified byte-exact (spec.md §6): a developer aid for inspecting how a
/// document was parsed, not a machine-readable format.
pub fn write_tokens(node: &Node, out: &mut impl Write) -> io::Result<()> {
    dump(node, 0, out)
}

fn dump(node: &Node, depth: usize, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}{}", "  ".repeat(depth), describe(node))?;
    for child in &node.children {
        dump(child, depth + 1, out)?;
    }
    Ok(())
}

fn describe(node: &Node) -> String {
    match &node.kind {
        NodeKind::RawText { text, can_contain_markup, .. } => format!("RawText({:?}, markup={})", text, can_contain_markup),
        NodeKind::BlankLine(text) => format!("BlankLine({:?})", text),
        NodeKind::HtmlTag(body) => format!("HtmlTag({:?})", body),
        NodeKind::HtmlAnchorTag(tag) => format!("HtmlAnchorTag({:?})", tag),
        NodeKind::InlineHtmlContents(text) => format!("InlineHtmlContents({:?})", text),
        NodeKind::InlineHtmlComment(text) => format!("InlineHtmlComment({:?})", text),
        NodeKind::CodeBlock(text) => format!("CodeBlock({:?})", text),
        NodeKind::CodeSpan(text) => format!("CodeSpan({:?})", text),
        NodeKind::Header { level, text } => format!("Header(level={}, {:?})", level, text),
        NodeKind::EscapedCharacter(ch) => format!("EscapedCharacter({:?})", ch),
        NodeKind::BoldOrItalicMarker(m) => format!(
            "BoldOrItalicMarker(open={}, ch={:?}, size={}, matched={}, disabled={})",
            m.open, m.ch, m.size, m.matched, m.disabled
        ),
        NodeKind::Image { alt_text, url, title } => format!("Image(alt={:?}, url={:?}, title={:?})", alt_text, url, title),
        NodeKind::Container { kind } => format!("Container({:?})", kind),
    }
}
