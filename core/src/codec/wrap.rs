/*
 * wrap.rs
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

//! Fixed-width line wrapping.

/// Characters held back from each line for a trailing soft-break marker added by callers.
const MARKER_RESERVE: usize = 3;

/// Split `input` into lines of `max_line_length - 3` characters joined by CRLF.
/// Leading CR/LF characters are stripped from the result. Input that fits in one
/// segment is returned unchanged.
pub fn wrap(input: &str, max_line_length: usize) -> String {
    let width = max_line_length.saturating_sub(MARKER_RESERVE).max(1);
    let chars: Vec<char> = input.chars().collect();
    if chars.len() <= width {
        return input.to_string();
    }
    let mut out = String::with_capacity(input.len() + (chars.len() / width + 1) * 2);
    for segment in chars.chunks(width) {
        out.push_str("\r\n");
        out.extend(segment);
    }
    out.trim_start_matches(|c: char| c == '\r' || c == '\n').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_verbatim() {
        assert_eq!(wrap("hello", 76), "hello");
        assert_eq!(wrap("", 76), "");
        assert_eq!(wrap("\r\nab", 10), "\r\nab");
    }

    #[test]
    fn exact_segment_is_not_wrapped() {
        assert_eq!(wrap("abc", 6), "abc");
    }

    #[test]
    fn splits_into_segments_of_width_minus_three() {
        assert_eq!(wrap("abcdefgh", 6), "abc\r\ndef\r\ngh");
        assert_eq!(wrap("abcdef", 6), "abc\r\ndef");
    }

    #[test]
    fn leading_line_breaks_stripped() {
        assert_eq!(wrap("\r\n\r\nabcdef", 6), "ab\r\ncde\r\nf");
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(wrap("ééééé", 5), "éé\r\néé\r\né");
    }

    #[test]
    fn tiny_width_clamps_to_one() {
        assert_eq!(wrap("abc", 2), "a\r\nb\r\nc");
        assert_eq!(wrap("ab", 0), "a\r\nb");
    }

    #[test]
    fn rewrapping_is_not_a_round_trip() {
        let once = wrap("abcdefghijkl", 6);
        let twice = wrap(&once, 6);
        assert_ne!(once, twice);
        assert_eq!(once, "abc\r\ndef\r\nghi\r\njkl");
    }
}
