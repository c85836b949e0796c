//! Quoting decisions for strings and keys.
//!
//! A string travels unquoted whenever the decoder would hand it back
//! verbatim; everything that could be confused with structure, a literal, or
//! a number gets double quotes and the escape codec. The active delimiter is
//! part of the decision: `a,b` needs quotes under the comma delimiter but not
//! under pipe.

use crate::{escape, number, Delimiter};

/// Whether `s` must be quoted in the given delimiter context.
pub(crate) fn string_needs_quotes(s: &str, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    let bytes = s.as_bytes();
    if matches!(bytes[0], b' ' | b'\t') || matches!(bytes[bytes.len() - 1], b' ' | b'\t') {
        return true;
    }
    if s == "true" || s == "false" || s == "null" {
        return true;
    }
    if number::looks_like_number(s) {
        return true;
    }
    if bytes[0] == b'-' {
        return true;
    }
    if s.contains([':', '"', '\\', '[', ']', '{', '}', '\n', '\r', '\t']) {
        return true;
    }
    s.contains(delimiter.as_char())
}

/// Whether `key` may be emitted without quotes: `[A-Za-z_][A-Za-z0-9_.]*`.
pub(crate) fn is_identifier_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '.')
}

/// Appends a value string, quoted and escaped only when the oracle demands.
pub(crate) fn write_string(out: &mut String, s: &str, delimiter: Delimiter) {
    if string_needs_quotes(s, delimiter) {
        out.push('"');
        escape::escape_into(out, s);
        out.push('"');
    } else {
        out.push_str(s);
    }
}

/// Appends an object key or tabular field name, quoted unless it is an
/// identifier.
pub(crate) fn write_key(out: &mut String, key: &str) {
    if is_identifier_key(key) {
        out.push_str(key);
    } else {
        out.push('"');
        escape::escape_into(out, key);
        out.push('"');
    }
}
