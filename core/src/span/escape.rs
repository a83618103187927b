//! Backslash-escaped character pass, grounded in
//! `isEscapedCharacter`/`escapedCharacter`/`RawText::_processEscapedCharacters`
//! in `markdown-tokens.cpp`.

use super::placeholder;

const ESCAPED_CHARACTERS: &str = "\\`*_{}[]()#+-.!>";

pub fn escaped_character_index(c: char) -> Option<usize> {
    ESCAPED_CHARACTERS.chars().position(|e| e == c)
}

pub fn escaped_character(index: usize) -> char {
    ESCAPED_CHARACTERS.chars().nth(index).expect("escaped character index out of range")
}

/// Replaces every `\X` where `X` is one of the Markdown punctuation
/// characters with a placeholder naming its index in the table. A
/// backslash followed by anything else, or a trailing backslash at the end
/// of the string, passes through untouched.
pub fn process_escaped_characters(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some((_, escaped)) => match escaped_character_index(escaped) {
                Some(idx) => out.push_str(&placeholder(&format!("#{}", idx), "escaped")),
                None => {
                    out.push('\\');
                    out.push(escaped);
                }
            },
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_escapes_known_punctuation() {
        let out = process_escaped_characters(r"\*hi\*");
        assert!(out.contains("#1@escaped") || out.contains("@#1@escaped"));
    }

    #[test]
    fn smoke_test_leaves_unknown_escape_alone() {
        assert_eq!(process_escaped_characters(r"\w"), r"\w");
    }

    #[test]
    fn smoke_test_trailing_backslash_preserved() {
        assert_eq!(process_escaped_characters("a\\"), "a\\");
    }

    #[test]
    fn smoke_test_round_trip_through_index() {
        for (i, c) in ESCAPED_CHARACTERS.chars().enumerate() {
            assert_eq!(escaped_character_index(c), Some(i));
            assert_eq!(escaped_character(i), c);
        }
    }
}
