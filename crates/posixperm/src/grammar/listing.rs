//! `ls`-style grammars: `r-x`, `rwxr-x---` and `drwxr-x---`.
//!
//! Every column holds either its own letter or `-`. Columns are fixed:
//! `rxw` and `rWx` are rejected rather than reordered or case-folded.

use super::DecodeFailure;
use crate::bits::PERM_COLUMNS;
use crate::{ModeBits, PermBits};

const SINGLE_LEN: usize = 3;
const TRIPLE_LEN: usize = 9;

/// Column masks for the single form, broadcast across all actors.
const SINGLE_COLUMNS: [(PermBits, char); SINGLE_LEN] = [
    (PermBits::READ, 'r'),
    (PermBits::WRITE, 'w'),
    (PermBits::EXEC, 'x'),
];

/// Decodes fixed columns, or `None` if a column holds anything but its
/// letter or `-`.
fn decode_columns(bytes: &[u8], columns: &[(PermBits, char)]) -> Option<PermBits> {
    if bytes.len() != columns.len() {
        return None;
    }
    bytes
        .iter()
        .zip(columns)
        .try_fold(PermBits::empty(), |acc, (&b, &(bit, letter))| {
            match char::from(b) {
                '-' => Some(acc),
                c if c == letter => Some(acc | bit),
                _ => None,
            }
        })
}

/// Splits full-form text into its mode prefix and trailing triple.
fn split_full(bytes: &[u8]) -> Option<(ModeBits, PermBits)> {
    let split = bytes.len().checked_sub(TRIPLE_LEN)?;
    let (prefix, triple) = bytes.split_at(split);
    let mode = decode_prefix(prefix)?;
    let perms = decode_columns(triple, &PERM_COLUMNS)?;
    Some((mode, perms))
}

/// A lone `-`, or any run of mode abbreviations (possibly empty).
fn decode_prefix(prefix: &[u8]) -> Option<ModeBits> {
    if prefix == b"-" {
        return Some(ModeBits::empty());
    }
    prefix.iter().try_fold(ModeBits::empty(), |acc, &b| {
        ModeBits::from_abbreviation(char::from(b)).map(|flag| acc | flag)
    })
}

pub(super) fn is_single(text: &str) -> bool {
    decode_columns(text.as_bytes(), &SINGLE_COLUMNS).is_some()
}

pub(super) fn is_triple(text: &str) -> bool {
    decode_columns(text.as_bytes(), &PERM_COLUMNS).is_some()
}

pub(super) fn is_full(text: &str) -> bool {
    split_full(text.as_bytes()).is_some()
}

pub(super) fn decode_single(text: &str) -> Result<PermBits, DecodeFailure> {
    decode_columns(text.as_bytes(), &SINGLE_COLUMNS).ok_or(DecodeFailure::Malformed)
}

pub(super) fn decode_triple(text: &str) -> Result<PermBits, DecodeFailure> {
    decode_columns(text.as_bytes(), &PERM_COLUMNS).ok_or(DecodeFailure::Malformed)
}

pub(super) fn decode_full(text: &str) -> Result<u32, DecodeFailure> {
    split_full(text.as_bytes())
        .map(|(mode, perms)| mode.bits() | perms.bits())
        .ok_or(DecodeFailure::Malformed)
}
