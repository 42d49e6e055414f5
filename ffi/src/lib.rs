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

//! C FFI for mailwire core.
//! Returned strings are newly allocated (free with mailwire_free_string); returned byte
//! buffers are freed with mailwire_free_bytes. All string parameters are UTF-8
//! NUL-terminated. On failure a function returns NULL (or -1) and sets the message read
//! by mailwire_last_error.

use libc::{c_char, c_int, size_t};
use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::fmt::Display;
use std::ptr;

use mailwire_core::codec::{quoted_printable, radix64, rfc2047};
use mailwire_core::config::DEFAULT_CHARSET;
use mailwire_core::{
    normalize_field_name, resolve_charset, try_from_bit_string, wrap, EncodedWordCodec, Rfc2047,
    ToBitString, UniqueStringGenerator,
};

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = RefCell::new(None);
    static UNIQUE: RefCell<UniqueStringGenerator> = RefCell::new(UniqueStringGenerator::system());
}

fn set_last_error(err: impl Display) {
    let msg = CString::new(err.to_string().replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|e| *e.borrow_mut() = Some(msg));
}

fn clear_last_error() {
    LAST_ERROR.with(|e| *e.borrow_mut() = None);
}

fn ptr_to_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string()) }
}

/// Borrow `len` bytes at `data`. NULL is accepted only with a zero length.
unsafe fn bytes_arg<'a>(data: *const u8, len: size_t) -> Option<&'a [u8]> {
    if data.is_null() {
        return if len == 0 { Some(&[][..]) } else { None };
    }
    Some(std::slice::from_raw_parts(data, len))
}

fn into_c_string(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c) => {
            clear_last_error();
            c.into_raw()
        }
        Err(_) => {
            set_last_error("result contains a NUL character; use the byte form");
            ptr::null_mut()
        }
    }
}

/// Hand a byte buffer to C. The length goes to `out_len`.
unsafe fn into_c_bytes(data: Vec<u8>, out_len: *mut size_t) -> *mut u8 {
    if out_len.is_null() {
        set_last_error("out_len is null");
        return ptr::null_mut();
    }
    let boxed = data.into_boxed_slice();
    *out_len = boxed.len();
    clear_last_error();
    Box::into_raw(boxed) as *mut u8
}

/// Version string (static, do not free).
#[no_mangle]
pub extern "C" fn mailwire_version() -> *const c_char {
    b"0.1.0\0".as_ptr() as *const c_char
}

/// Last error message from a failed call. Valid until next FFI call. Do not free.
#[no_mangle]
pub extern "C" fn mailwire_last_error() -> *const c_char {
    LAST_ERROR.with(|e| {
        e.borrow()
            .as_ref()
            .map(|s| s.as_ptr())
            .unwrap_or(ptr::null())
    })
}

/// Free a string returned by any mailwire_* function. No-op if ptr is NULL.
#[no_mangle]
pub unsafe extern "C" fn mailwire_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        let _ = CString::from_raw(ptr);
    }
}

/// Free a byte buffer returned by a mailwire_* function. len is the length reported with it.
#[no_mangle]
pub unsafe extern "C" fn mailwire_free_bytes(ptr: *mut u8, len: size_t) {
    if !ptr.is_null() {
        let _ = Vec::from_raw_parts(ptr, len, len);
    }
}

// ---------- Quoted-printable ----------

/// Encode text as quoted-printable after converting it to charset. Returns NULL on error.
#[no_mangle]
pub unsafe extern "C" fn mailwire_qp_encode(input: *const c_char, charset: *const c_char) -> *mut c_char {
    let input = match ptr_to_str(input) {
        Some(s) => s,
        None => {
            set_last_error("input is null or not valid UTF-8");
            return ptr::null_mut();
        }
    };
    let charset = ptr_to_str(charset).unwrap_or_else(|| DEFAULT_CHARSET.to_string());
    into_c_string(quoted_printable::encode(&input, &charset))
}

/// Encode raw bytes as quoted-printable.
#[no_mangle]
pub unsafe extern "C" fn mailwire_qp_encode_bytes(data: *const u8, len: size_t) -> *mut c_char {
    match bytes_arg(data, len) {
        Some(bytes) => into_c_string(quoted_printable::encode_bytes(bytes)),
        None => {
            set_last_error("data is null");
            ptr::null_mut()
        }
    }
}

/// Decode quoted-printable text to a string in charset. Returns NULL on error, including
/// when the decoded text contains NUL (use mailwire_qp_decode_bytes).
#[no_mangle]
pub unsafe extern "C" fn mailwire_qp_decode(input: *const c_char, charset: *const c_char) -> *mut c_char {
    let input = match ptr_to_str(input) {
        Some(s) => s,
        None => {
            set_last_error("input is null or not valid UTF-8");
            return ptr::null_mut();
        }
    };
    let charset = ptr_to_str(charset).unwrap_or_else(|| DEFAULT_CHARSET.to_string());
    into_c_string(quoted_printable::decode(&input, &charset))
}

/// Decode quoted-printable text to bytes. Length is written to out_len.
#[no_mangle]
pub unsafe extern "C" fn mailwire_qp_decode_bytes(input: *const c_char, out_len: *mut size_t) -> *mut u8 {
    match ptr_to_str(input) {
        Some(s) => into_c_bytes(quoted_printable::decode_to_bytes(&s), out_len),
        None => {
            set_last_error("input is null or not valid UTF-8");
            ptr::null_mut()
        }
    }
}

// ---------- Radix64 ----------

/// Armor bytes: base64, CRLF, then the CRC-24 checksum line.
#[no_mangle]
pub unsafe extern "C" fn mailwire_radix64_encode(data: *const u8, len: size_t) -> *mut c_char {
    match bytes_arg(data, len) {
        Some(bytes) => into_c_string(radix64::encode(bytes)),
        None => {
            set_last_error("data is null");
            ptr::null_mut()
        }
    }
}

/// Decode armored text without checking the checksum. Length is written to out_len.
#[no_mangle]
pub unsafe extern "C" fn mailwire_radix64_decode(text: *const c_char, out_len: *mut size_t) -> *mut u8 {
    match ptr_to_str(text) {
        Some(s) => into_c_bytes(radix64::decode(&s), out_len),
        None => {
            set_last_error("text is null or not valid UTF-8");
            ptr::null_mut()
        }
    }
}

/// Decode armored text and verify its checksum. Returns NULL when the checksum is missing,
/// malformed or does not match.
#[no_mangle]
pub unsafe extern "C" fn mailwire_radix64_decode_verified(text: *const c_char, out_len: *mut size_t) -> *mut u8 {
    let text = match ptr_to_str(text) {
        Some(s) => s,
        None => {
            set_last_error("text is null or not valid UTF-8");
            return ptr::null_mut();
        }
    };
    match radix64::decode_verified(&text) {
        Ok(data) => into_c_bytes(data, out_len),
        Err(e) => {
            set_last_error(e);
            ptr::null_mut()
        }
    }
}

/// CRC-24 of data (low 24 bits). Returns 0xFFFFFFFF if data is NULL with a non-zero length.
#[no_mangle]
pub unsafe extern "C" fn mailwire_radix64_checksum(data: *const u8, len: size_t) -> u32 {
    match bytes_arg(data, len) {
        Some(bytes) => {
            clear_last_error();
            radix64::checksum_value(bytes)
        }
        None => {
            set_last_error("data is null");
            u32::MAX
        }
    }
}

// ---------- Text utilities ----------

/// Wrap input into CRLF-separated lines of max_line_length - 3 characters.
#[no_mangle]
pub unsafe extern "C" fn mailwire_wrap(input: *const c_char, max_line_length: size_t) -> *mut c_char {
    match ptr_to_str(input) {
        Some(s) => into_c_string(wrap(&s, max_line_length)),
        None => {
            set_last_error("input is null or not valid UTF-8");
            ptr::null_mut()
        }
    }
}

/// Canonical casing of a header field name.
#[no_mangle]
pub unsafe extern "C" fn mailwire_field_name(name: *const c_char) -> *mut c_char {
    match ptr_to_str(name) {
        Some(s) => into_c_string(normalize_field_name(&s)),
        None => {
            set_last_error("name is null or not valid UTF-8");
            ptr::null_mut()
        }
    }
}

/// Canonical name of the charset name resolves to (ISO-8859-1 when unknown).
#[no_mangle]
pub unsafe extern "C" fn mailwire_charset_name(name: *const c_char) -> *mut c_char {
    let name = ptr_to_str(name).unwrap_or_default();
    into_c_string(resolve_charset(&name).name().to_string())
}

/// Encode text as one RFC 2047 B encoded word in charset.
#[no_mangle]
pub unsafe extern "C" fn mailwire_rfc2047_encode(text: *const c_char, charset: *const c_char) -> *mut c_char {
    let text = match ptr_to_str(text) {
        Some(s) => s,
        None => {
            set_last_error("text is null or not valid UTF-8");
            return ptr::null_mut();
        }
    };
    let charset = ptr_to_str(charset).unwrap_or_else(|| "UTF-8".to_string());
    into_c_string(Rfc2047.encode(&text, &charset))
}

/// Expand RFC 2047 encoded words in a header value.
#[no_mangle]
pub unsafe extern "C" fn mailwire_rfc2047_decode(text: *const c_char) -> *mut c_char {
    match ptr_to_str(text) {
        Some(s) => into_c_string(rfc2047::decode_encoded_words(&s)),
        None => {
            set_last_error("text is null or not valid UTF-8");
            ptr::null_mut()
        }
    }
}

/// Eight '0'/'1' characters, most significant bit first.
#[no_mangle]
pub extern "C" fn mailwire_to_bit_string(byte: u8) -> *mut c_char {
    into_c_string(byte.to_bit_string())
}

/// Parse an 8-character bit string. Returns the byte (0..255), or -1 on error.
#[no_mangle]
pub unsafe extern "C" fn mailwire_from_bit_string(bits: *const c_char) -> c_int {
    let bits = match ptr_to_str(bits) {
        Some(s) => s,
        None => {
            set_last_error("bits is null or not valid UTF-8");
            return -1;
        }
    };
    match try_from_bit_string(&bits) {
        Ok(b) => {
            clear_last_error();
            c_int::from(b)
        }
        Err(e) => {
            set_last_error(e);
            -1
        }
    }
}

// ---------- Unique strings ----------

/// New multipart boundary.
#[no_mangle]
pub extern "C" fn mailwire_boundary() -> *mut c_char {
    into_c_string(UNIQUE.with(|u| u.borrow_mut().boundary()))
}

/// New Message-ID value (with angle brackets) for domain.
#[no_mangle]
pub unsafe extern "C" fn mailwire_message_id(domain: *const c_char) -> *mut c_char {
    match ptr_to_str(domain) {
        Some(d) => into_c_string(UNIQUE.with(|u| u.borrow_mut().message_id(&d))),
        None => {
            set_last_error("domain is null or not valid UTF-8");
            ptr::null_mut()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(s: &str) -> CString {
        CString::new(s).unwrap()
    }

    unsafe fn take_string(p: *mut c_char) -> String {
        assert!(!p.is_null());
        let s = CStr::from_ptr(p).to_str().unwrap().to_string();
        mailwire_free_string(p);
        s
    }

    unsafe fn take_bytes(p: *mut u8, len: size_t) -> Vec<u8> {
        assert!(!p.is_null());
        let v = std::slice::from_raw_parts(p, len).to_vec();
        mailwire_free_bytes(p, len);
        v
    }

    unsafe fn last_error() -> String {
        let p = mailwire_last_error();
        assert!(!p.is_null());
        CStr::from_ptr(p).to_str().unwrap().to_string()
    }

    #[test]
    fn qp_encode_decode() {
        unsafe {
            let input = c("A=ç.");
            let cs = c("ISO-8859-1");
            let encoded = take_string(mailwire_qp_encode(input.as_ptr(), cs.as_ptr()));
            assert_eq!(encoded, "A=3D=E7.");
            let enc_c = c(&encoded);
            assert_eq!(take_string(mailwire_qp_decode(enc_c.as_ptr(), cs.as_ptr())), "A=ç.");
        }
    }

    #[test]
    fn qp_decode_with_nul_needs_byte_form() {
        unsafe {
            let input = c("a=00b");
            let cs = c("us-ascii");
            assert!(mailwire_qp_decode(input.as_ptr(), cs.as_ptr()).is_null());
            assert!(last_error().contains("NUL"));
            let mut len: size_t = 0;
            let p = mailwire_qp_decode_bytes(input.as_ptr(), &mut len);
            assert_eq!(take_bytes(p, len), b"a\0b");
        }
    }

    #[test]
    fn null_input_sets_error() {
        unsafe {
            assert!(mailwire_qp_encode(ptr::null(), ptr::null()).is_null());
            assert!(last_error().contains("input"));
            assert!(mailwire_radix64_encode(ptr::null(), 3).is_null());
        }
    }

    #[test]
    fn radix64_round_trip() {
        unsafe {
            let data = b"Hello";
            let armored = take_string(mailwire_radix64_encode(data.as_ptr(), data.len()));
            assert_eq!(armored, "SGVsbG8=\r\n=EHJM");
            let text = c(&armored);
            let mut len: size_t = 0;
            let p = mailwire_radix64_decode_verified(text.as_ptr(), &mut len);
            assert_eq!(take_bytes(p, len), data);
            assert_eq!(mailwire_radix64_checksum(data.as_ptr(), data.len()), 0x10724C);
        }
    }

    #[test]
    fn radix64_empty_buffer() {
        unsafe {
            let armored = take_string(mailwire_radix64_encode(ptr::null(), 0));
            assert_eq!(armored, "\r\n=twTO");
            let text = c(&armored);
            let mut len: size_t = 99;
            let p = mailwire_radix64_decode(text.as_ptr(), &mut len);
            assert_eq!(len, 0);
            assert!(take_bytes(p, len).is_empty());
        }
    }

    #[test]
    fn radix64_mismatch_reported() {
        unsafe {
            let text = c("SGFsbG8=\r\n=EHJM");
            let mut len: size_t = 0;
            assert!(mailwire_radix64_decode_verified(text.as_ptr(), &mut len).is_null());
            assert!(last_error().contains("checksum"));
        }
    }

    #[test]
    fn text_utilities() {
        unsafe {
            let input = c("abcdefgh");
            assert_eq!(take_string(mailwire_wrap(input.as_ptr(), 6)), "abc\r\ndef\r\ngh");
            let name = c("mime-version");
            assert_eq!(take_string(mailwire_field_name(name.as_ptr())), "MIME-Version");
            let cs = c("utf8");
            assert_eq!(take_string(mailwire_charset_name(cs.as_ptr())), "utf-8");
            let unknown = c("x-no-such-charset");
            assert_eq!(take_string(mailwire_charset_name(unknown.as_ptr())), "iso-8859-1");
        }
    }

    #[test]
    fn rfc2047_round_trip() {
        unsafe {
            let text = c("Grüße");
            let cs = c("utf-8");
            let word = take_string(mailwire_rfc2047_encode(text.as_ptr(), cs.as_ptr()));
            assert!(word.starts_with("=?utf-8?B?"));
            let word_c = c(&word);
            assert_eq!(take_string(mailwire_rfc2047_decode(word_c.as_ptr())), "Grüße");
        }
    }

    #[test]
    fn bit_strings() {
        unsafe {
            assert_eq!(take_string(mailwire_to_bit_string(0b1011_0001)), "10110001");
            let bits = c("10110001");
            assert_eq!(mailwire_from_bit_string(bits.as_ptr()), 0b1011_0001);
            let bad = c("1011");
            assert_eq!(mailwire_from_bit_string(bad.as_ptr()), -1);
            assert!(!last_error().is_empty());
        }
    }

    #[test]
    fn unique_strings() {
        unsafe {
            let a = take_string(mailwire_boundary());
            assert!(a.starts_with("----=_Part_"));
            let domain = c("example.org");
            let id = take_string(mailwire_message_id(domain.as_ptr()));
            assert!(id.starts_with('<') && id.ends_with("@example.org>"));
        }
    }
}
