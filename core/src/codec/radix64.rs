/*
 * radix64.rs
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

//! Radix64 armor: base64 payload, CRLF, then `=` and the base64 of a CRC-24 over the
//! original bytes.

use std::sync::OnceLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{CodecError, Result};

const CRC24_INIT: u32 = 0xB7_04CE;
const CRC24_POLY: u32 = 0x186_4CFB;
const CRC24_TOP_BIT: u32 = 0x100_0000;

const INVALID: i8 = -1;
const PADDING: i8 = -2;

fn decode_table() -> &'static [i8; 256] {
    static TABLE: OnceLock<[i8; 256]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut t = [INVALID; 256];
        for i in 0..26u8 {
            t[(b'A' + i) as usize] = i as i8;
            t[(b'a' + i) as usize] = (26 + i) as i8;
        }
        for i in 0..10u8 {
            t[(b'0' + i) as usize] = (52 + i) as i8;
        }
        t[b'+' as usize] = 62;
        t[b'/' as usize] = 63;
        t[b'=' as usize] = PADDING;
        t
    })
}

/// CRC-24 of `data` as an integer (low 24 bits).
pub fn checksum_value(data: &[u8]) -> u32 {
    let mut crc = CRC24_INIT;
    for &b in data {
        crc ^= (b as u32) << 16;
        for _ in 0..8 {
            crc <<= 1;
            if crc & CRC24_TOP_BIT != 0 {
                crc ^= CRC24_POLY;
            }
        }
    }
    crc & 0xFF_FFFF
}

/// CRC-24 of `data`, big-endian.
pub fn checksum(data: &[u8]) -> [u8; 3] {
    let crc = checksum_value(data);
    [(crc >> 16) as u8, (crc >> 8) as u8, crc as u8]
}

/// Armor `data`: base64 payload, CRLF, `=` and the 4-character checksum.
pub fn encode(data: &[u8]) -> String {
    format!("{}\r\n={}", STANDARD.encode(data), STANDARD.encode(checksum(data)))
}

/// Split armored text into payload and checksum (without its `=`). The checksum line is
/// the last line when it starts with a single `=`; a line of bare padding is payload.
pub fn split_armor(text: &str) -> (&str, Option<&str>) {
    let trimmed = text.trim_end();
    if let Some(idx) = trimmed.rfind('\n') {
        let line = trimmed[idx + 1..].trim();
        if let Some(sum) = line.strip_prefix('=') {
            if !sum.is_empty() && !sum.starts_with('=') {
                return (&trimmed[..idx], Some(sum));
            }
        }
    }
    (text, None)
}

/// Decode armored (or bare base64) text. The checksum line, whitespace and characters
/// outside the alphabet are ignored; the payload ends at the first `=`. A truncated final
/// group of 2 or 3 characters yields 1 or 2 bytes. The checksum is not verified.
pub fn decode(text: &str) -> Vec<u8> {
    let (payload, _) = split_armor(text);
    let table = decode_table();
    let mut sextets = Vec::with_capacity(payload.len());
    let mut skipped = 0usize;
    for &b in payload.as_bytes() {
        match table[b as usize] {
            PADDING => break,
            INVALID => skipped += 1,
            v => sextets.push(v as u8),
        }
    }
    if skipped > 0 {
        tracing::trace!(skipped, "characters outside the base64 alphabet ignored");
    }

    let full = sextets.len() / 4 * 4;
    let mut out = Vec::with_capacity(sextets.len() / 4 * 3 + 2);
    for q in sextets[..full].chunks_exact(4) {
        let n = (q[0] as u32) << 18 | (q[1] as u32) << 12 | (q[2] as u32) << 6 | q[3] as u32;
        out.extend_from_slice(&[(n >> 16) as u8, (n >> 8) as u8, n as u8]);
    }
    let tail = &sextets[full..];
    match tail.len() {
        2 => out.push(tail[0] << 2 | tail[1] >> 4),
        3 => {
            out.push(tail[0] << 2 | tail[1] >> 4);
            out.push(tail[1] << 4 | tail[2] >> 2);
        }
        1 => tracing::trace!("single trailing base64 character carries no byte"),
        _ => {}
    }
    out
}

fn parse_checksum(sum: &str) -> Result<u32> {
    let bytes = STANDARD
        .decode(sum)
        .map_err(|_| CodecError::MalformedChecksum(sum.to_string()))?;
    match bytes.as_slice() {
        [a, b, c] => Ok(u32::from(*a) << 16 | u32::from(*b) << 8 | u32::from(*c)),
        _ => Err(CodecError::MalformedChecksum(sum.to_string())),
    }
}

/// Decode armored text and check its CRC-24 line against the decoded bytes.
pub fn decode_verified(text: &str) -> Result<Vec<u8>> {
    let (_, sum) = split_armor(text);
    let expected = parse_checksum(sum.ok_or(CodecError::MissingChecksum)?)?;
    let data = decode(text);
    let actual = checksum_value(&data);
    if actual != expected {
        tracing::debug!(expected, actual, "armor checksum mismatch");
        return Err(CodecError::ChecksumMismatch { expected, actual });
    }
    Ok(data)
}
