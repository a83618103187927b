//! Line reader: turns a byte/character stream into a flat list of
//! [`Node::RawText`]/[`Node::BlankLine`] leaves, one per logical line.
//! Grounded in `Document::_getline`/`Document::read` in `markdown.cpp`.

use std::io::{self, BufRead, Read};
use std::sync::OnceLock;

use fancy_regex::Regex;

use crate::config::{SPACES_PER_INITIAL_TAB, TranslatorConfig};
use crate::node::Node;

fn blank_line_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Preserved verbatim from the original, including its "<--" rather than
    // "<!--" comment-start spelling.
    RE.get_or_init(|| Regex::new(r"^ {0,3}(<--(.*)-- *> *)* *$").unwrap())
}

pub fn is_blank_line(line: &str) -> bool {
    blank_line_pattern().is_match(line).unwrap_or(false)
}

/// Reads one logical line from `reader`, handling `\n`, `\r`, `\r\n` and
/// `\n\r` line endings and expanding tabs as it goes: a tab within the
/// line's leading whitespace always expands to a 4-column stop, every tab
/// after that expands to `config.spaces_per_tab`. Returns `Ok(None)` only at
/// a true end-of-stream with nothing left to return, matching
/// `Document::_getline`'s `!line.empty()` return.
fn get_line(reader: &mut impl BufRead, config: &TranslatorConfig) -> io::Result<Option<String>> {
    let mut line: Vec<u8> = Vec::new();
    let mut initial_whitespace = true;

    loop {
        let mut byte = [0u8; 1];
        if reader.read(&mut byte)? == 0 {
            break;
        }
        match byte[0] {
            b'\r' => {
                if peek(reader)? == Some(b'\n') {
                    consume_one(reader)?;
                }
                return Ok(Some(finish(line)));
            }
            b'\n' => {
                if peek(reader)? == Some(b'\r') {
                    consume_one(reader)?;
                }
                return Ok(Some(finish(line)));
            }
            b'\t' => {
                let convert = if initial_whitespace { SPACES_PER_INITIAL_TAB } else { config.spaces_per_tab };
                let pad = convert - (line.len() % convert);
                line.extend(std::iter::repeat(b' ').take(pad));
            }
            b' ' => line.push(b' '),
            other => {
                line.push(other);
                initial_whitespace = false;
            }
        }
    }

    if line.is_empty() { Ok(None) } else { Ok(Some(finish(line))) }
}

fn peek(reader: &mut impl BufRead) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

fn consume_one(reader: &mut impl BufRead) {
    reader.consume(1);
}

fn finish(line: Vec<u8>) -> String {
    String::from_utf8(line).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Reads every line of `input` into leaf nodes. Mirrors `Document::read(std::istream&)`:
/// the only failure mode is the reader itself failing, and lines already
/// read before a failure are still returned.
pub fn read_lines(input: impl Read, config: &TranslatorConfig) -> io::Result<Vec<Node>> {
    let mut reader = io::BufReader::new(input);
    let mut nodes = Vec::new();
    while let Some(line) = get_line(&mut reader, config)? {
        nodes.push(classify_line(line));
    }
    Ok(nodes)
}

/// Reads every line of `text` into leaf nodes. Infallible, matching
/// `Document::read(const std::string&)`, which wraps the string in an
/// `istringstream` that cannot fail.
pub fn read_lines_str(text: &str, config: &TranslatorConfig) -> Vec<Node> {
    read_lines(text.as_bytes(), config).expect("reading from an in-memory buffer cannot fail")
}

fn classify_line(line: String) -> Node {
    if is_blank_line(&line) {
        Node::blank_line(line)
    } else {
        Node::raw_text(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> TranslatorConfig {
        TranslatorConfig::default()
    }

    #[test]
    fn smoke_test_splits_on_mixed_line_endings() {
        let nodes = read_lines_str("a\nb\r\nc\rd", &cfg());
        let texts: Vec<_> = nodes.iter().map(|n| n.text().unwrap()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn smoke_test_leading_tab_expands_to_four() {
        let nodes = read_lines_str("\tx", &cfg());
        assert_eq!(nodes[0].text().unwrap(), "    x");
    }

    #[test]
    fn smoke_test_later_tab_uses_configured_width() {
        let config = TranslatorConfig { spaces_per_tab: 2 };
        let nodes = read_lines_str("a\tb", &config);
        assert_eq!(nodes[0].text().unwrap(), "a b");
    }

    #[test]
    fn smoke_test_blank_line_detected() {
        let nodes = read_lines_str("   \ntext", &cfg());
        assert!(nodes[0].is_blank_line());
        assert!(!nodes[1].is_blank_line());
    }
}
