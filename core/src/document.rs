//! `Document`: the library's single entry point, grounded in
//! `Document` (the class, not the source file) in `markdown.cpp`/
//! `markdown.h`. Owns the accumulating line buffer before processing and
//! the finished token tree after, and enforces the one-shot `_process`
//! latch spec.md §5 describes: a document may be read from repeatedly, is
//! processed exactly once (on the first `write`/`write_tokens` call, or an
//! explicit `process()`), and may then be written any number of times.

use std::io::{self, Read, Write};

use log::{debug, info};

use crate::block;
use crate::config::TranslatorConfig;
use crate::html_block;
use crate::html_merge;
use crate::node::{Container, Node};
use crate::paragraph;
use crate::reader;
use crate::span;
use crate::writer;

pub struct Document {
    config: TranslatorConfig,
    pending: Vec<Node>,
    root: Option<Node>,
}

impl Document {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config, pending: Vec::new(), root: None }
    }

    /// Reads every line of `text` into the pending buffer. Infallible,
    /// matching `Document::read(const std::string&)`. Returns `false`
    /// without touching the buffer if the document has already processed —
    /// the tree is immutable from that point on.
    pub fn read_str(&mut self, text: &str) -> bool {
        if self.root.is_some() {
            return false;
        }
        let lines = reader::read_lines_str(text, &self.config);
        debug!("read_str: appended {} lines", lines.len());
        self.pending.extend(lines);
        true
    }

    /// Reads every line available from `input` into the pending buffer.
    /// The only failure mode is the reader itself failing (spec.md §7);
    /// lines already read before a failure remain in the buffer.
    pub fn read(&mut self, input: impl Read) -> io::Result<bool> {
        if self.root.is_some() {
            return Ok(false);
        }
        let lines = reader::read_lines(input, &self.config)?;
        debug!("read: appended {} lines", lines.len());
        self.pending.extend(lines);
        Ok(true)
    }

    /// Runs the five-pass pipeline over whatever has been read so far. A
    /// second call is a no-op, matching the original's idempotency latch.
    pub fn process(&mut self) {
        if self.root.is_some() {
            return;
        }
        info!("processing document: {} raw lines", self.pending.len());

        let lines = std::mem::take(&mut self.pending);
        let merged = html_merge::merge_multiline_html_tags(lines);
        debug!("merged multiline html tags");

        let (extracted, id_table) = html_block::process_inline_html_and_references(merged);
        debug!("extracted inline html blocks and reference definitions");

        let classified = block::process_block_items(Node::container(Container::Root, extracted));
        debug!("classified blocks");

        let grouped = paragraph::group_paragraphs(classified);
        debug!("grouped paragraphs");

        let final_tree = span::process_span_tree(grouped, &id_table);
        debug!("processed spans");

        self.root = Some(final_tree);
    }

    /// Streams the document's HTML to `out`, processing first if this is
    /// the first call that needs the finished tree.
    pub fn write(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.process();
        writer::write_html(self.root.as_ref().expect("process() always populates root"), out)
    }

    /// Streams an indented debug dump of the token tree to `out`. Not
    /// specified byte-exact; a development aid only.
    pub fn write_tokens(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.process();
        writer::write_tokens(self.root.as_ref().expect("process() always populates root"), out)
    }

    /// Renders the document to an owned `String`, for callers that don't
    /// want to manage a writer themselves.
    pub fn to_html(&mut self) -> String {
        let mut buf = Vec::new();
        self.write(&mut buf).expect("writing to an in-memory buffer cannot fail");
        String::from_utf8(buf).expect("the writer only ever emits UTF-8 text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_bold_paragraph_end_to_end() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("**bold**");
        assert_eq!(doc.to_html(), "<p><strong>bold</strong></p>\n\n");
    }

    #[test]
    fn smoke_test_header_end_to_end() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("# Title");
        assert_eq!(doc.to_html(), "<h1>Title</h1>\n");
    }

    #[test]
    fn smoke_test_code_block_end_to_end() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("    code\n    more");
        assert_eq!(doc.to_html(), "<pre><code>code\nmore\n</code></pre>\n\n");
    }

    #[test]
    fn smoke_test_reference_link_end_to_end() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("[x]: http://e.com \"T\"\n\n[x]");
        assert_eq!(doc.to_html(), "<p><a href=\"http://e.com\" title=\"T\">x</a></p>\n\n");
    }

    #[test]
    fn smoke_test_blockquote_end_to_end() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("> quoted\n> still");
        assert_eq!(doc.to_html(), "<blockquote>\n<p>quoted still</p>\n\n</blockquote>\n");
    }

    #[test]
    fn smoke_test_simple_list_end_to_end() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("* a\n* b");
        assert_eq!(doc.to_html(), "\n<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n\n");
    }

    #[test]
    fn smoke_test_process_is_idempotent() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("**bold**");
        let first = doc.to_html();
        doc.process();
        let second = doc.to_html();
        assert_eq!(first, second);
    }

    #[test]
    fn smoke_test_read_after_process_is_noop() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("a");
        doc.process();
        assert!(!doc.read_str("b"));
        assert_eq!(doc.to_html(), "<p>a</p>\n\n");
    }

    #[test]
    fn smoke_test_only_blank_lines_yields_empty_output() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("   \n\n   ");
        assert_eq!(doc.to_html(), "");
    }

    #[test]
    fn smoke_test_unterminated_emphasis_is_literal() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("*abc");
        assert_eq!(doc.to_html(), "<p>*abc</p>\n\n");
    }

    #[test]
    fn smoke_test_triple_asterisk_emphasis() {
        let mut doc = Document::new(TranslatorConfig::default());
        doc.read_str("***foo***");
        assert_eq!(doc.to_html(), "<p><strong><em>foo</em></strong></p>\n\n");
    }
}
