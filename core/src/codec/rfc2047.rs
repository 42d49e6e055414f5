/*
 * rfc2047.rs
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

//! RFC 2047 encoded words (e.g. =?charset?q?text?=) for header values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::codec::{charset, quoted_printable, radix64};

/// Boundary between header text and its encoded-word form.
pub trait EncodedWordCodec {
    /// Encode `text` in `charset` as an encoded word.
    fn encode(&self, text: &str, charset: &str) -> String;
    /// Expand the encoded words embedded in `text`.
    fn decode(&self, text: &str) -> String;
}

/// Encodes a single `B` word; decodes `B` and `Q` words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rfc2047;

impl EncodedWordCodec for Rfc2047 {
    fn encode(&self, text: &str, charset: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let cs = charset::resolve(charset);
        format!("=?{}?B?{}?=", cs.name(), STANDARD.encode(cs.encode(text)))
    }

    fn decode(&self, text: &str) -> String {
        decode_encoded_words(text)
    }
}

/// Expand encoded words in `s`. Words that do not parse are copied through unchanged.
/// Whitespace between two adjacent encoded words is dropped (RFC 2047 section 6.2).
pub fn decode_encoded_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    let mut after_word = false;
    while pos < s.len() {
        let start = match s[pos..].find("=?") {
            Some(i) => pos + i,
            None => {
                out.push_str(&s[pos..]);
                break;
            }
        };
        let literal = &s[pos..start];
        match decode_one_encoded_word(s, start) {
            Some((decoded, end)) => {
                if !(after_word && literal.chars().all(char::is_whitespace)) {
                    out.push_str(literal);
                }
                out.push_str(&decoded);
                pos = end;
                after_word = true;
            }
            None => {
                out.push_str(literal);
                out.push_str("=?");
                pos = start + 2;
                after_word = false;
            }
        }
    }
    out
}

/// Decode the encoded word at `start`. Returns the text and the position after `?=`.
fn decode_one_encoded_word(s: &str, start: usize) -> Option<(String, usize)> {
    let rest = &s[start + 2..];
    let qmark1 = rest.find('?')?;
    let charset = &rest[..qmark1];
    if charset.is_empty() || charset.contains(char::is_whitespace) {
        return None;
    }
    let header = rest[qmark1 + 1..].as_bytes();
    if header.len() < 2 || header[1] != b'?' {
        return None;
    }
    let encoding = header[0].to_ascii_lowercase();
    let payload_start = qmark1 + 3;
    let end = rest[payload_start..].find("?=")?;
    let payload = &rest[payload_start..payload_start + end];

    let bytes = match encoding {
        b'b' => radix64::decode(payload),
        b'q' => decode_q(payload),
        _ => return None,
    };
    // RFC 2231 language suffix: charset*lang
    let name = charset.split('*').next().unwrap_or(charset);
    let decoded = charset::resolve(name).decode(&bytes);
    Some((decoded, start + 2 + payload_start + end + 2))
}

/// Q encoding: _ = space, rest is quoted-printable.
fn decode_q(payload: &str) -> Vec<u8> {
    quoted_printable::decode_to_bytes(&payload.replace('_', "=20"))
}
