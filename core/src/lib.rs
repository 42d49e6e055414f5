/*
 * lib.rs
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

//! Byte-exact transcoders for the ASCII-only boundaries of legacy mail transport:
//! quoted-printable (RFC 2045), Radix64 armor with CRC-24 trailer, tolerant charset
//! resolution, fixed-width wrapping, bit strings and header field name normalization.
//!
//! All operations are pure and stateless; decoders degrade silently on malformed input.

pub mod codec;
pub mod config;
pub mod error;
pub mod unique;

pub use codec::{
    from_bit_string, normalize_field_name, resolve_charset, try_from_bit_string,
    try_from_bit_string_16, wrap, Charset, EncodedWordCodec, Rfc2047, ToBitString,
};
pub use config::EncoderConfig;
pub use error::{CodecError, Result};
pub use unique::{Clock, RandomSource, SystemClock, UniqueStringGenerator};
