//! End-to-end scenarios and boundary cases straight out of the translator's
//! behavioral contract, exercised through the public `Document` API rather
//! than any single pass in isolation.

use core::{Document, TranslatorConfig};

fn render(input: &str) -> String {
    let mut doc = Document::new(TranslatorConfig::default());
    doc.read_str(input);
    doc.to_html()
}

#[test]
fn bold_paragraph() {
    assert_eq!(render("**bold**"), "<p><strong>bold</strong></p>\n\n");
}

#[test]
fn atx_header() {
    assert_eq!(render("# Title"), "<h1>Title</h1>\n");
}

#[test]
fn indented_code_block() {
    assert_eq!(render("    code\n    more"), "<pre><code>code\nmore\n</code></pre>\n\n");
}

#[test]
fn reference_link_resolves_across_blank_line() {
    assert_eq!(
        render("[x]: http://e.com \"T\"\n\n[x]"),
        "<p><a href=\"http://e.com\" title=\"T\">x</a></p>\n\n"
    );
}

#[test]
fn block_quote_joins_continuation_lines() {
    assert_eq!(render("> quoted\n> still"), "<blockquote>\n<p>quoted still</p>\n\n</blockquote>\n");
}

#[test]
fn tight_unordered_list() {
    assert_eq!(render("* a\n* b"), "\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n\n");
}

#[test]
fn only_blank_lines_yields_empty_output() {
    assert_eq!(render("   \n\n   \n"), "");
}

#[test]
fn unterminated_emphasis_is_literal() {
    assert_eq!(render("*abc"), "<p>*abc</p>\n\n");
}

#[test]
fn three_asterisks_nest_strong_inside_em() {
    assert_eq!(render("***foo***"), "<p><strong><em>foo</em></strong></p>\n\n");
}

#[test]
fn leading_tab_expands_to_four_columns_regardless_of_config() {
    let mut doc = Document::new(TranslatorConfig { spaces_per_tab: 8 });
    doc.read_str("\tcode");
    assert_eq!(doc.to_html(), "<pre><code>code\n</code></pre>\n\n");
}

#[test]
fn list_item_indented_four_or_more_at_top_level_is_a_code_block() {
    let html = render("    * not a list item\n");
    assert!(html.starts_with("<pre><code>"));
    assert!(!html.contains("<ul>"));
}

#[test]
fn plain_text_becomes_entity_escaped_paragraphs() {
    assert_eq!(render("a < b & c"), "<p>a &lt; b &amp; c</p>\n\n");
}

#[test]
fn unresolved_reference_leaves_leading_bracket_literal() {
    let html = render("[nope][missing]");
    assert!(html.contains('['));
    assert!(!html.contains("<a href"));
}

#[test]
fn process_is_idempotent_across_repeated_writes() {
    let mut doc = Document::new(TranslatorConfig::default());
    doc.read_str("# Title\n\nSome **text**.");
    let first = doc.to_html();
    let second = doc.to_html();
    assert_eq!(first, second);
}

#[test]
fn nested_list_renders_inner_ul_inside_outer_item() {
    let html = render("* a\n  * nested\n* b");
    assert!(html.contains("<ul>\n<li>a"));
    assert!(html.matches("<ul>").count() == 2);
}

#[test]
fn autolink_url_wraps_in_anchor() {
    assert_eq!(render("<http://example.com>"), "<p><a href=\"http://example.com\">http://example.com</a></p>\n\n");
}

#[test]
fn inline_html_block_passes_through() {
    let html = render("<div>\ncontent\n</div>\n");
    assert!(html.contains("<div>"));
    assert!(html.contains("content"));
    assert!(html.contains("</div>"));
}

#[test]
fn horizontal_rule() {
    assert_eq!(render("---"), "<hr/>");
}
