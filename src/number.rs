//! Canonical number formatting and numeric token parsing.
//!
//! The wire format carries numbers in exactly one spelling: sign, decimal
//! digits, optional fraction. There is never an exponent, no leading zeros,
//! no trailing fractional zeros, and no `-0`. Floats that are integral and within
//! the safe-integer magnitude `2^53` are written as integers, which is why a
//! JSON `1.0` and `1` encode identically and both decode to `Int(1)`.

use crate::Value;

/// Largest magnitude at which every integer is exactly representable in an
/// f64. Part of the wire contract: integral floats below this bound are
/// written (and re-read) as integers.
pub(crate) const SAFE_INTEGER: f64 = 9_007_199_254_740_992.0; // 2^53

/// Canonical rendering of an integer.
pub(crate) fn format_int(value: i64) -> String {
    value.to_string()
}

/// Canonical rendering of a float.
///
/// NaN and the infinities are not representable on the wire and collapse to
/// the token `null`. Signed zero collapses to `0`.
pub(crate) fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value == value.trunc() && value.abs() < SAFE_INTEGER {
        return format_int(value as i64);
    }
    let rendered = value.to_string();
    if rendered.contains('e') || rendered.contains('E') {
        expand_exponent(&rendered)
    } else {
        rendered
    }
}

/// Rewrites an exponent-form rendering (`1.5e3`, `2e-7`) as a plain decimal
/// by shifting the decimal point and inserting zeros.
///
/// `f64::Display` currently never emits exponent form, but the canonical
/// format must not depend on that; any formatter output is accepted.
pub(crate) fn expand_exponent(rendered: &str) -> String {
    let split = match rendered.find(['e', 'E']) {
        Some(index) => index,
        None => return rendered.to_string(),
    };
    let (mantissa, exponent) = rendered.split_at(split);
    let exponent: i64 = match exponent[1..].parse() {
        Ok(exp) => exp,
        Err(_) => return rendered.to_string(),
    };

    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };

    let digits: String = int_part.chars().chain(frac_part.chars()).collect();
    let point = int_part.len() as i64 + exponent;

    let mut out = String::with_capacity(digits.len() + exponent.unsigned_abs() as usize + 3);
    out.push_str(sign);
    if point <= 0 {
        let trimmed = digits.trim_end_matches('0');
        if trimmed.is_empty() {
            out.push('0');
        } else {
            out.push_str("0.");
            for _ in 0..(-point) {
                out.push('0');
            }
            out.push_str(trimmed);
        }
    } else if point as usize >= digits.len() {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            out.push('0');
        } else {
            out.push_str(trimmed);
            for _ in 0..(point as usize - digits.len()) {
                out.push('0');
            }
        }
    } else {
        let (head, tail) = digits.split_at(point as usize);
        out.push_str(head.trim_start_matches('0'));
        if out == sign {
            out.push('0');
        }
        let tail = tail.trim_end_matches('0');
        if !tail.is_empty() {
            out.push('.');
            out.push_str(tail);
        }
    }
    out
}

/// Parses a token as a number, or returns `None` when the token must be
/// treated as a string.
///
/// Rejected spellings: leading zeros (`05`), dangling dot (`1.`), leading dot
/// (`.5`), bare signs, anything with stray bytes. Integer overflow falls back
/// to float; `-0` and integral floats under 2^53 fold to integers. Tokens
/// whose value overflows f64 entirely are not numbers (the decoder never
/// produces an infinity).
pub(crate) fn parse_token(token: &str) -> Option<Value> {
    let lexeme = scan(token, false)?;
    if lexeme == Lexeme::Integer {
        if let Ok(int) = token.parse::<i64>() {
            // "-0" parses to plain 0, which is the canonical fold.
            return Some(Value::Int(int));
        }
    }
    let float: f64 = token.parse().ok()?;
    if !float.is_finite() {
        return None;
    }
    Some(canonical_float(float))
}

/// Folds a parsed float into its canonical variant.
pub(crate) fn canonical_float(float: f64) -> Value {
    if float == 0.0 {
        Value::Int(0)
    } else if float == float.trunc() && float.abs() < SAFE_INTEGER {
        Value::Int(float as i64)
    } else {
        Value::Float(float)
    }
}

/// Whether a string would be mistaken for a number on the wire.
///
/// True for everything [`parse_token`] accepts plus the forbidden
/// leading-zero shapes (`05`, `-07.2`), which must be quoted so they survive
/// as strings.
pub(crate) fn looks_like_number(s: &str) -> bool {
    scan(s, true).is_some()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Integer,
    Float,
}

/// Validates the numeric token grammar: optional `-`, integer digits (a
/// leading `0` only before `.`/`e`/`E` unless `allow_leading_zeros`),
/// optional `.digits`, optional exponent.
fn scan(s: &str, allow_leading_zeros: bool) -> Option<Lexeme> {
    let bytes = s.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_len = i - int_start;
    if int_len == 0 {
        return None;
    }
    if !allow_leading_zeros && int_len > 1 && bytes[int_start] == b'0' {
        return None;
    }

    let mut lexeme = Lexeme::Integer;
    if i < bytes.len() && bytes[i] == b'.' {
        lexeme = Lexeme::Float;
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return None;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        lexeme = Lexeme::Float;
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }

    if i == bytes.len() {
        Some(lexeme)
    } else {
        None
    }
}
