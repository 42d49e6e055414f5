/*
 * bits.rs
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

//! Binary digit strings (most significant bit first) for debug output.

use crate::error::{CodecError, Result};

/// One '0'/'1' character per bit, most significant first.
pub trait ToBitString {
    fn to_bit_string(&self) -> String;
}

impl ToBitString for u8 {
    fn to_bit_string(&self) -> String {
        format!("{:08b}", self)
    }
}

impl ToBitString for u16 {
    fn to_bit_string(&self) -> String {
        format!("{:016b}", self)
    }
}

impl ToBitString for i16 {
    fn to_bit_string(&self) -> String {
        (*self as u16).to_bit_string()
    }
}

/// Rebuild a byte from the first 8 characters of `s`; '1' sets a bit, anything else clears it.
///
/// # Panics
///
/// If `s` is shorter than 8 bytes. Use [`try_from_bit_string`] for untrusted input.
pub fn from_bit_string(s: &str) -> u8 {
    let b = s.as_bytes();
    (0..8).fold(0u8, |acc, i| (acc << 1) | u8::from(b[i] == b'1'))
}

fn parse_bits(s: &str, width: usize) -> Result<u16> {
    let len = s.chars().count();
    if len != width {
        return Err(CodecError::BitStringLength {
            expected: width,
            actual: len,
        });
    }
    s.chars().try_fold(0u16, |acc, c| match c {
        '0' => Ok(acc << 1),
        '1' => Ok((acc << 1) | 1),
        other => Err(CodecError::InvalidBitChar(other)),
    })
}

/// Checked form of [`from_bit_string`]: exactly 8 characters, each '0' or '1'.
pub fn try_from_bit_string(s: &str) -> Result<u8> {
    parse_bits(s, 8).map(|v| v as u8)
}

/// Parse a 16-character bit string into a word.
pub fn try_from_bit_string_16(s: &str) -> Result<u16> {
    parse_bits(s, 16)
}
