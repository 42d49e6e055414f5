/*
 * config.rs
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

//! Encoder options. In-memory only: nothing here reads files or the environment.

/// A quoted-printable line is soft-broken once its column passes this value (73 characters).
pub const QP_WRAP_COLUMN: usize = 72;

/// Hard cap on a quoted-printable line, excluding the soft-break `=` (RFC 2045).
pub const QP_MAX_LINE: usize = 76;

/// Charset used when a name cannot be resolved, and the default for callers without one.
pub const DEFAULT_CHARSET: &str = "ISO-8859-1";

/// Options for the quoted-printable encoder. `Default` gives the RFC 2045 layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    wrap_column: usize,
    max_line: usize,
    avoid_leading_dot: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            wrap_column: QP_WRAP_COLUMN,
            max_line: QP_MAX_LINE,
            avoid_leading_dot: true,
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soft-break column. The hard cap is raised so an escape (3 chars) still fits after it.
    pub fn wrap_column(mut self, column: usize) -> Self {
        self.wrap_column = column.max(1);
        if self.max_line < self.wrap_column + 3 {
            self.max_line = self.wrap_column + 3;
        }
        self
    }

    /// Disable extending/escaping lines that would start with a period.
    /// Only safe when the output never travels over a dot-stuffing transport.
    pub fn allow_leading_dot(mut self) -> Self {
        self.avoid_leading_dot = false;
        self
    }

    pub fn get_wrap_column(&self) -> usize {
        self.wrap_column
    }

    pub fn get_max_line(&self) -> usize {
        self.max_line
    }

    pub fn avoids_leading_dot(&self) -> bool {
        self.avoid_leading_dot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_rfc_2045() {
        let c = EncoderConfig::default();
        assert_eq!(c.get_wrap_column(), 72);
        assert_eq!(c.get_max_line(), 76);
        assert!(c.avoids_leading_dot());
    }

    #[test]
    fn narrow_wrap_keeps_room_for_escape() {
        let c = EncoderConfig::new().wrap_column(10);
        assert_eq!(c.get_wrap_column(), 10);
        assert_eq!(c.get_max_line(), 76);

        let c = EncoderConfig::new().wrap_column(100);
        assert_eq!(c.get_max_line(), 103);

        let c = EncoderConfig::new().wrap_column(0);
        assert_eq!(c.get_wrap_column(), 1);
    }
}
