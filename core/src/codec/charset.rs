/*
 * charset.rs
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

//! Charset name resolution. Resolution is total: names that cannot be resolved, even after
//! the tolerant rewrites below, fall back to ISO-8859-1, which maps every byte value.

use std::fmt;

use encoding::label::encoding_from_whatwg_label;
use encoding::types::EncodingRef;
use encoding::{DecoderTrap, EncoderTrap, Encoding};

/// A resolved text encoding (text <-> bytes).
#[derive(Clone, Copy)]
pub struct Charset {
    encoding: EncodingRef,
}

impl Charset {
    /// ISO-8859-1, the universal fallback.
    pub fn latin1() -> Self {
        Self {
            encoding: encoding::all::ISO_8859_1,
        }
    }

    pub fn utf8() -> Self {
        Self {
            encoding: encoding::all::UTF_8,
        }
    }

    /// Canonical (lowercase) name, e.g. "iso-8859-1".
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode text; characters the charset cannot represent become '?'.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self.encoding.encode(text, EncoderTrap::Replace) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(charset = self.name(), error = %e, "encode failed, using latin-1");
                latin1_encode(text)
            }
        }
    }

    /// Decode bytes; invalid sequences become U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self.encoding.decode(bytes, DecoderTrap::Replace) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(charset = self.name(), error = %e, "decode failed, using latin-1");
                bytes.iter().map(|&b| b as char).collect()
            }
        }
    }
}

impl fmt::Debug for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Charset").field(&self.name()).finish()
    }
}

impl PartialEq for Charset {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for Charset {}

fn latin1_encode(text: &str) -> Vec<u8> {
    text.chars().map(|c| u8::try_from(c).unwrap_or(b'?')).collect()
}

/// Rewrites tried in order, each on top of the previous one, when a name does not resolve.
#[derive(Debug, Clone, Copy)]
enum Normalization {
    /// "UTF8" -> "UTF-8"
    Utf8Hyphen,
    /// "ISO8859-1" -> "ISO-8859-1"
    IsoHyphen,
    /// "iso_8859_1" -> "ISO-8859-1"
    UnderscoreUpper,
}

const NORMALIZATIONS: [Normalization; 3] = [
    Normalization::Utf8Hyphen,
    Normalization::IsoHyphen,
    Normalization::UnderscoreUpper,
];

impl Normalization {
    fn apply(self, name: &str) -> String {
        match self {
            Normalization::Utf8Hyphen => {
                if name.to_ascii_uppercase() == "UTF8" {
                    "UTF-8".to_string()
                } else {
                    name.to_string()
                }
            }
            Normalization::IsoHyphen => {
                let b = name.as_bytes();
                if b.len() >= 4 && b[..3].eq_ignore_ascii_case(b"ISO") && b[3].is_ascii_digit() {
                    format!("{}-{}", &name[..3], &name[3..])
                } else {
                    name.to_string()
                }
            }
            Normalization::UnderscoreUpper => name.replace('_', "-").to_ascii_uppercase(),
        }
    }
}

/// Direct lookup: registered encoding names first, then WHATWG labels. Case-insensitive.
fn lookup(name: &str) -> Option<EncodingRef> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let found = encoding::all::encodings()
        .iter()
        .copied()
        .find(|e| e.name().eq_ignore_ascii_case(name))
        .or_else(|| whatwg_label(name));
    // "error" and "replacement" are sinks, not charsets.
    found.filter(|e| e.name() != "error" && e.whatwg_name() != Some("replacement"))
}

/// WHATWG folds the Latin-1 and ASCII labels into windows-1252; MIME keeps them apart.
fn whatwg_label(name: &str) -> Option<EncodingRef> {
    let encoding = encoding_from_whatwg_label(name)?;
    if encoding.name() != encoding::all::WINDOWS_1252.name() {
        return Some(encoding);
    }
    Some(match name.to_ascii_lowercase().as_str() {
        "windows-1252" | "cp1252" | "x-cp1252" => encoding,
        "us-ascii" | "ansi_x3.4-1968" => encoding::all::ASCII,
        _ => encoding::all::ISO_8859_1,
    })
}

/// Resolve a charset name. Never fails: see the module docs.
pub fn resolve(name: &str) -> Charset {
    if let Some(encoding) = lookup(name) {
        return Charset { encoding };
    }
    let mut candidate = name.trim().to_string();
    for step in NORMALIZATIONS {
        candidate = step.apply(&candidate);
        if let Some(encoding) = lookup(&candidate) {
            tracing::trace!(requested = name, resolved = encoding.name(), ?step, "charset name normalized");
            return Charset { encoding };
        }
    }
    tracing::debug!(requested = name, "unknown charset, falling back to ISO-8859-1");
    Charset::latin1()
}
