//! Octal grammars: `644`, `0644`, `0o644`.

use super::DecodeFailure;
use std::num::IntErrorKind;

const MIN_DIGITS: usize = 3;

fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

fn all_octal(digits: &str) -> bool {
    digits.len() >= MIN_DIGITS && digits.bytes().all(is_octal_digit)
}

/// `[1-7][0-7]{2,}`
pub(super) fn is_implicit(text: &str) -> bool {
    matches!(text.as_bytes().first(), Some(b'1'..=b'7')) && all_octal(text)
}

/// `0o?[0-7]{3,}`
pub(super) fn is_explicit(text: &str) -> bool {
    explicit_digits(text).is_some()
}

/// Strips the radix marker, preferring `0o` over a bare `0`.
fn explicit_digits(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('0')?;
    let digits = rest.strip_prefix('o').unwrap_or(rest);
    all_octal(digits).then_some(digits)
}

pub(super) fn decode_implicit(text: &str) -> Result<u32, DecodeFailure> {
    if !is_implicit(text) {
        return Err(DecodeFailure::Malformed);
    }
    parse_radix8(text)
}

pub(super) fn decode_explicit(text: &str) -> Result<u32, DecodeFailure> {
    let digits = explicit_digits(text).ok_or(DecodeFailure::Malformed)?;
    parse_radix8(digits)
}

fn parse_radix8(digits: &str) -> Result<u32, DecodeFailure> {
    u32::from_str_radix(digits, 8).map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => DecodeFailure::Overflow,
        _ => DecodeFailure::Malformed,
    })
}
