/*
 * quoted_printable.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Mailwire, a transfer-encoding library for mail transport.
 *
 * Mailwire is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mailwire is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mailwire.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Quoted-Printable encoder and decoder for Content-Transfer-Encoding (RFC 2045).
//!
//! Output lines are at most 76 characters (excluding the soft-break `=`) and never start
//! with `.`, so the text survives SMTP dot-stuffing untouched.

use crate::codec::charset;
use crate::config::EncoderConfig;

const HEX_DECODE: [i8; 256] = {
    let mut t = [-1i8; 256];
    let mut i = 0u8;
    while i < 10 {
        t[(b'0' + i) as usize] = i as i8;
        i = i.wrapping_add(1);
    }
    let mut i = 0u8;
    while i < 6 {
        t[(b'A' + i) as usize] = (10 + i) as i8;
        t[(b'a' + i) as usize] = (10 + i) as i8;
        i = i.wrapping_add(1);
    }
    t
};

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

const SOFT_BREAK: &str = "=\r\n";

/// Bytes written as `=XX`: everything outside 33..=126 except space, plus `=` itself.
#[inline]
pub fn needs_escape(b: u8) -> bool {
    b == b'=' || (b != b' ' && !(33..=126).contains(&b))
}

/// Encode `input` as quoted-printable, converting it to bytes with `from_charset`.
pub fn encode(input: &str, from_charset: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let bytes = charset::resolve(from_charset).encode(input);
    encode_bytes(&bytes)
}

/// Encode raw bytes with the default line layout.
pub fn encode_bytes(bytes: &[u8]) -> String {
    encode_bytes_with(bytes, &EncoderConfig::default())
}

/// Encode raw bytes. A soft break follows the byte that takes the line past the wrap
/// column, unless the input ends there. When the next line would start with `.`, the
/// periods are pulled onto the current line while it stays under the hard cap; a period
/// still left at the start of a line is escaped.
pub fn encode_bytes_with(bytes: &[u8], config: &EncoderConfig) -> String {
    let wrap_column = config.get_wrap_column();
    let max_line = config.get_max_line();
    let avoid_dot = config.avoids_leading_dot();

    let mut out = String::with_capacity(bytes.len() + bytes.len() / 2 + 8);
    let mut column = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        column += push_byte(&mut out, bytes[i], avoid_dot && column == 0);
        i += 1;
        if column <= wrap_column || i == bytes.len() {
            continue;
        }
        if avoid_dot {
            while i < bytes.len() && bytes[i] == b'.' && column < max_line {
                out.push('.');
                column += 1;
                i += 1;
            }
            if i == bytes.len() {
                break;
            }
        }
        out.push_str(SOFT_BREAK);
        column = 0;
    }
    out
}

/// Append one byte, literal or escaped. Returns the number of characters written.
fn push_byte(out: &mut String, b: u8, line_start: bool) -> usize {
    if needs_escape(b) || (line_start && b == b'.') {
        out.push('=');
        out.push(HEX_UPPER[(b >> 4) as usize] as char);
        out.push(HEX_UPPER[(b & 0x0F) as usize] as char);
        3
    } else {
        out.push(b as char);
        1
    }
}

/// Result of reading the character after a `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    /// `=XX` with two hex digits.
    Escaped(u8),
    /// Anything else: the `=` stands for itself.
    Literal,
}

fn read_escape(src: &[u8], pos: usize) -> Escape {
    match (src.get(pos + 1), src.get(pos + 2)) {
        (Some(&h1), Some(&h2)) if h1 != b'=' => {
            let v1 = HEX_DECODE[h1 as usize];
            let v2 = HEX_DECODE[h2 as usize];
            if v1 >= 0 && v2 >= 0 {
                Escape::Escaped(((v1 as u8) << 4) | v2 as u8)
            } else {
                Escape::Literal
            }
        }
        _ => Escape::Literal,
    }
}

/// Remove soft breaks (=CRLF, =LF).
fn strip_soft_breaks(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'=' {
            if raw[i + 1..].starts_with(b"\r\n") {
                i += 3;
                continue;
            }
            if raw[i + 1..].starts_with(b"\n") {
                i += 2;
                continue;
            }
        }
        out.push(raw[i]);
        i += 1;
    }
    out
}

/// Decode quoted-printable text to bytes. Never fails: malformed escapes are kept literally
/// and decoding carries on. Characters above U+00FF are not valid here and become `?`.
pub fn decode_to_bytes(input: &str) -> Vec<u8> {
    let raw: Vec<u8> = input
        .chars()
        .map(|c| u8::try_from(c).unwrap_or(b'?'))
        .collect();
    let mut src = strip_soft_breaks(&raw);
    // Dangling markers at end of input (a soft break with its line ending cut off).
    while src.last() == Some(&b'=') {
        src.pop();
    }

    let mut out = Vec::with_capacity(src.len());
    let mut pos = 0;
    while pos < src.len() {
        let b = src[pos];
        if b != b'=' {
            out.push(b);
            pos += 1;
            continue;
        }
        match read_escape(&src, pos) {
            Escape::Escaped(v) => {
                out.push(v);
                pos += 3;
            }
            Escape::Literal => {
                tracing::trace!(offset = pos, "malformed quoted-printable escape kept literally");
                out.push(b'=');
                pos += 1;
            }
        }
    }
    out
}

/// Decode quoted-printable text and convert the bytes to text with `to_charset`.
pub fn decode(input: &str, to_charset: &str) -> String {
    let bytes = decode_to_bytes(input);
    charset::resolve(to_charset).decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(encoded: &str) -> Vec<&str> {
        encoded.split("\r\n").collect()
    }

    #[test]
    fn encode_escapes_equals_and_high_bytes() {
        assert_eq!(encode("A=ç.", "ISO-8859-1"), "A=3D=E7.");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode("", "utf-8"), "");
        assert_eq!(encode_bytes(&[]), "");
    }

    #[test]
    fn space_literal_tab_and_line_endings_escaped() {
        assert_eq!(encode_bytes(b"a b\tc\r\n"), "a b=09c=0D=0A");
    }

    #[test]
    fn escape_rule_covers_every_byte() {
        for b in 0..=255u8 {
            let expected = b == b'=' || (b != b' ' && !(33..=126).contains(&b));
            assert_eq!(needs_escape(b), expected, "byte {b}");
        }
    }

    #[test]
    fn soft_break_at_wrap_column() {
        let out = encode_bytes(&[b'a'; 100]);
        assert_eq!(out, format!("{}=\r\n{}", "a".repeat(73), "a".repeat(27)));
        assert_eq!(lines(&out)[0].len() - 1, 73);
    }

    #[test]
    fn no_trailing_soft_break() {
        let out = encode_bytes(&[b'a'; 73]);
        assert_eq!(out, "a".repeat(73));
    }

    #[test]
    fn escape_straddling_wrap_column() {
        let mut input = vec![b'a'; 72];
        input.push(0xFF);
        input.push(b'b');
        let out = encode_bytes(&input);
        assert_eq!(out, format!("{}=FF=\r\nb", "a".repeat(72)));
        assert_eq!(lines(&out)[0].len() - 1, 75);
    }

    #[test]
    fn period_pulled_onto_current_line() {
        let mut input = vec![b'a'; 73];
        input.extend_from_slice(b".b");
        let out = encode_bytes(&input);
        assert_eq!(out, format!("{}.=\r\nb", "a".repeat(73)));
    }

    #[test]
    fn period_run_past_cap_is_escaped() {
        let mut input = vec![b'a'; 73];
        input.extend_from_slice(&[b'.'; 10]);
        let out = encode_bytes(&input);
        assert_eq!(out, format!("{}...=\r\n=2E......", "a".repeat(73)));
        for line in lines(&out) {
            assert!(!line.starts_with('.'));
            assert!(line.trim_end_matches('=').len() <= 76);
        }
    }

    #[test]
    fn leading_period_of_input_is_escaped() {
        assert_eq!(encode_bytes(b".x"), "=2Ex");
        assert_eq!(encode_bytes(b"x."), "x.");
    }

    #[test]
    fn leading_period_allowed_when_configured() {
        let config = EncoderConfig::new().allow_leading_dot();
        assert_eq!(encode_bytes_with(b".x", &config), ".x");
        let mut input = vec![b'a'; 73];
        input.extend_from_slice(b".b");
        assert_eq!(
            encode_bytes_with(&input, &config),
            format!("{}=\r\n.b", "a".repeat(73))
        );
    }

    #[test]
    fn narrow_wrap_column() {
        let config = EncoderConfig::new().wrap_column(4);
        assert_eq!(encode_bytes_with(b"abcdefgh", &config), "abcde=\r\nfgh");
    }

    #[test]
    fn c1_controls_round_trip_through_latin1_aliases() {
        let encoded = encode("\u{80}\u{9F}", "ISO8859-1");
        assert_eq!(encoded, "=80=9F");
        assert_eq!(decode(&encoded, "ISO_8859-1"), "\u{80}\u{9F}");
        assert_eq!(decode("=80", "latin1"), "\u{80}");
    }

    #[test]
    fn decode_escapes() {
        assert_eq!(decode("A=3D=E7.", "ISO-8859-1"), "A=ç.");
        assert_eq!(decode("=e7", "ISO-8859-1"), "ç");
    }

    #[test]
    fn decode_removes_soft_breaks() {
        assert_eq!(decode("abc=\r\ndef", "us-ascii"), "abcdef");
        assert_eq!(decode("abc=\ndef", "us-ascii"), "abcdef");
        assert_eq!(decode("ab=3=\r\nDcd", "us-ascii"), "ab=cd");
    }

    #[test]
    fn decode_keeps_hard_line_breaks() {
        assert_eq!(decode("line1\r\nline2", "utf-8"), "line1\r\nline2");
    }

    #[test]
    fn malformed_escape_is_literal() {
        assert_eq!(decode("=ZZabc", "ISO-8859-1"), "=ZZabc");
        assert_eq!(decode("100%=G1 sure", "ISO-8859-1"), "100%=G1 sure");
        assert_eq!(decode("a=+F", "ISO-8859-1"), "a=+F");
        assert_eq!(decode("a=4", "ISO-8859-1"), "a=4");
    }

    #[test]
    fn double_equals_is_literal_equals() {
        assert_eq!(decode_to_bytes("a==41"), b"a=A");
    }

    #[test]
    fn dangling_markers_dropped() {
        assert_eq!(decode_to_bytes("abc="), b"abc");
        assert_eq!(decode_to_bytes("abc=="), b"abc");
        assert_eq!(decode_to_bytes("="), b"");
    }

    #[test]
    fn encoded_trailing_equals_survives() {
        assert_eq!(decode_to_bytes(&encode_bytes(b"x==")), b"x==");
    }

    #[test]
    fn decode_non_latin1_input_does_not_fail() {
        assert_eq!(decode_to_bytes("a\u{20AC}b"), b"a?b");
    }

    #[test]
    fn utf8_round_trip() {
        let text = "Grüße aus Köln, naïve café. \u{1F600}";
        assert_eq!(decode(&encode(text, "utf-8"), "UTF8"), text);
    }

    #[test]
    fn all_bytes_round_trip() {
        let all: Vec<u8> = (0..=255).cycle().take(1000).collect();
        assert_eq!(decode_to_bytes(&encode_bytes(&all)), all);
    }
}
