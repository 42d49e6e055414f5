/*
 * mod.rs
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

//! Transfer-encoding transcoders.

pub mod bits;
pub mod charset;
pub mod field_name;
pub mod quoted_printable;
pub mod radix64;
pub mod rfc2047;
pub mod wrap;

pub use bits::{from_bit_string, try_from_bit_string, try_from_bit_string_16, ToBitString};
pub use charset::{resolve as resolve_charset, Charset};
pub use field_name::normalize as normalize_field_name;
pub use rfc2047::{EncodedWordCodec, Rfc2047};
pub use wrap::wrap;
