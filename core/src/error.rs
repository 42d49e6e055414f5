/*
 * error.rs
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

//! Codec errors. Only the checked operations return these; the plain encode/decode
//! paths never fail.

/// Errors from checked codec operations (armor verification, strict bit-string parsing).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Bit string does not have the required number of characters.
    #[error("bit string must be {expected} characters, got {actual}")]
    BitStringLength {
        /// Required length (8 or 16).
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Bit string contains something other than '0' or '1'.
    #[error("invalid character {0:?} in bit string")]
    InvalidBitChar(char),

    /// Armored block has no `=XXXX` checksum line.
    #[error("armor checksum line missing")]
    MissingChecksum,

    /// Checksum line is present but is not 4 base64 characters.
    #[error("malformed armor checksum line: {0:?}")]
    MalformedChecksum(String),

    /// Checksum line does not match the CRC-24 of the decoded payload.
    #[error("armor checksum mismatch: expected {expected:06X}, got {actual:06X}")]
    ChecksumMismatch {
        /// Checksum carried by the armor.
        expected: u32,
        /// Checksum computed over the decoded payload.
        actual: u32,
    },
}

/// Result alias for checked codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
