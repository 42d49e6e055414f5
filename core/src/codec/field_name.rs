/*
 * field_name.rs
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

//! Canonical casing for header field names (RFC 5322, RFC 2045).

/// Names whose conventional spelling is not plain per-token capitalization.
fn irregular(lower: &str) -> Option<&'static str> {
    Some(match lower {
        "message-id" => "Message-ID",
        "resent-message-id" => "Resent-Message-ID",
        "content-id" => "Content-ID",
        "content-md5" => "Content-MD5",
        "mime-version" => "MIME-Version",
        "list-id" => "List-ID",
        "dkim-signature" => "DKIM-Signature",
        "x-msmail-priority" => "X-MSMail-Priority",
        "x-mimeole" => "X-MimeOLE",
        _ => return None,
    })
}

fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Normalize a field name: "content-type" -> "Content-Type", "MESSAGE-ID" -> "Message-ID".
pub fn normalize(name: &str) -> String {
    let lower = name.to_lowercase();
    if let Some(canonical) = irregular(&lower) {
        return canonical.to_string();
    }
    name.split('-').map(capitalize).collect::<Vec<_>>().join("-")
}
