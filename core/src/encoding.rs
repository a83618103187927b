//! Text-to-HTML character encoding, grounded in `encodeString`/`emailEncode`
//! in `markdown-tokens.cpp`.

use fancy_regex::Regex;
use std::sync::OnceLock;

use crate::node::EncodingFlags;

fn already_entity() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(&amp;)|(&#[0-9]{1,3};)|(&#[xX][0-9a-fA-F]{1,2};)").unwrap()
    })
}

/// Encode `src` per `flags`. `cAmps` only escapes a bare `&` — one that
/// isn't already the start of `&amp;` or a numeric character reference.
/// `cDoubleAmps` escapes every `&` unconditionally; the two flags are never
/// set together in practice (carried over from the original as two distinct
/// bits so the code block path and the plain-text path can share one
/// function).
pub fn encode_text(src: &str, flags: EncodingFlags) -> String {
    if flags.is_noop() {
        return src.to_string();
    }
    let mut out = String::with_capacity(src.len());
    for (byte_idx, ch) in src.char_indices() {
        match ch {
            '&' if flags.amps => {
                if already_entity().is_match(&src[byte_idx..]).unwrap_or(false) {
                    out.push('&');
                } else {
                    out.push_str("&amp;");
                }
            }
            '&' if flags.double_amps => out.push_str("&amp;"),
            '<' if flags.angles => out.push_str("&lt;"),
            '>' if flags.angles => out.push_str("&gt;"),
            '"' if flags.quotes => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Alternates decimal and hexadecimal numeric character references per
/// byte, starting with decimal. Bytes with the high bit set (UTF-8
/// continuation/lead bytes of non-ASCII site characters, see
/// `span::links::looks_like_email`) pass through unencoded, matching
/// `emailEncode` verbatim.
pub fn email_encode(src: &str) -> String {
    // Built as raw bytes rather than `String::push(char)`: a high-bit byte is
    // one half of a multi-byte UTF-8 sequence, and re-decoding it as its own
    // Latin-1 code point would re-encode it into a *different* two-byte
    // sequence, corrupting the original text. Copying the byte through
    // verbatim and only ever appending pure-ASCII entity text keeps the
    // result valid UTF-8 overall.
    let mut out = Vec::with_capacity(src.len() * 4);
    let mut in_hex = false;
    for byte in src.bytes() {
        if byte & 0x80 != 0 {
            out.push(byte);
        } else if in_hex {
            out.extend_from_slice(format!("&#x{:x};", byte).as_bytes());
        } else {
            out.extend_from_slice(format!("&#{};", byte).as_bytes());
        }
        in_hex = !in_hex;
    }
    String::from_utf8(out).expect("only ASCII bytes were replaced; non-ASCII runs were copied through intact")
}
