//! Symbolic `chmod`-style grammar.
//!
//! ```text
//! symbolic := clause ( ws? clause )* ws?
//! clause   := actors op perms
//! actors   := "a" | [ugo]{1,3}
//! op       := "+" | "-" | "="
//! perms    := [rwx]{1,3}
//! ```
//!
//! `ws` is a single ASCII whitespace byte. Clauses are applied left to
//! right, so `u=r u+w u-r` ends with only owner write set.

use super::DecodeFailure;
use crate::PermBits;
use std::fmt;

const MAX_LETTERS: usize = 3;

/// Operator joining the actor and permission halves of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`: grant the permissions to the actors.
    Add,
    /// `-`: revoke the permissions from the actors.
    Remove,
    /// `=`: the actors get exactly these permissions.
    Assign,
}

impl Op {
    fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'+' => Some(Self::Add),
            b'-' => Some(Self::Remove),
            b'=' => Some(Self::Assign),
            _ => None,
        }
    }

    /// The operator character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Remove => '-',
            Self::Assign => '=',
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One `actors op perms` clause of a symbolic expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Clause {
    /// Union of the actor masks named by the clause.
    pub actors: PermBits,
    /// How the clause combines with the bits accumulated so far.
    pub op: Op,
    /// Union of the column masks named by the clause.
    pub perms: PermBits,
}

impl Clause {
    /// Applies this clause to `acc`, returning the new permission bits.
    ///
    /// Only bits inside [`actors`](Self::actors) can change.
    ///
    /// ```
    /// use posixperm::{Clause, Op, PermBits};
    ///
    /// let clause = Clause { actors: PermBits::OTHER, op: Op::Remove, perms: PermBits::WRITE };
    /// assert_eq!(clause.apply(PermBits::ALL).bits(), 0o775);
    /// ```
    #[must_use]
    pub fn apply(self, acc: PermBits) -> PermBits {
        let selected = self.actors & self.perms;
        match self.op {
            Op::Add => acc | selected,
            Op::Remove => acc & !selected,
            Op::Assign => (acc & !self.actors) | selected,
        }
    }
}

/// Splits `text` into clauses, or `None` if it is not symbolic.
pub(super) fn scan(text: &str) -> Option<Vec<Clause>> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return None;
    }

    let mut clauses = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        let (actors, next) = scan_actors(bytes, pos)?;
        let op = Op::from_byte(*bytes.get(next)?)?;
        let (perms, next) = scan_letters(bytes, next + 1, PermBits::from_letter)?;
        pos = next;
        if bytes.get(pos).is_some_and(u8::is_ascii_whitespace) {
            pos += 1;
        }
        clauses.push(Clause { actors, op, perms });
    }
    Some(clauses)
}

fn scan_actors(bytes: &[u8], start: usize) -> Option<(PermBits, usize)> {
    if bytes.get(start) == Some(&b'a') {
        return Some((PermBits::ALL, start + 1));
    }
    scan_letters(bytes, start, |c| match c {
        'u' | 'g' | 'o' => PermBits::from_actor(c),
        _ => None,
    })
}

/// Reads 1 to 3 letters accepted by `lookup`, OR-ing their masks.
fn scan_letters(
    bytes: &[u8],
    start: usize,
    lookup: impl Fn(char) -> Option<PermBits>,
) -> Option<(PermBits, usize)> {
    let mut mask = PermBits::empty();
    let mut pos = start;
    while pos < bytes.len() && pos - start < MAX_LETTERS {
        match lookup(char::from(bytes[pos])) {
            Some(bits) => mask |= bits,
            None => break,
        }
        pos += 1;
    }
    (pos > start).then_some((mask, pos))
}

/// Applies every clause of `text` to `base`.
pub(super) fn apply(base: PermBits, text: &str) -> Result<PermBits, DecodeFailure> {
    let clauses = scan(text).ok_or(DecodeFailure::Malformed)?;
    Ok(clauses.into_iter().fold(base, |acc, clause| clause.apply(acc)))
}

pub(super) fn decode(text: &str) -> Result<PermBits, DecodeFailure> {
    apply(PermBits::empty(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn octal(text: &str) -> u32 {
        decode(text)
            .unwrap_or_else(|e| panic!("{text:?} should decode, got {e:?}"))
            .bits()
    }

    // ── Scanning ─────────────────────────────────────────────

    #[test]
    fn scan_single_clause() {
        let clauses = scan("ug=rx").expect("ug=rx should scan");
        assert_eq!(
            clauses,
            vec![Clause {
                actors: PermBits::OWNER | PermBits::GROUP,
                op: Op::Assign,
                perms: PermBits::READ | PermBits::EXEC,
            }]
        );
    }

    #[test]
    fn scan_with_and_without_separators() {
        assert_eq!(scan("a=rwx o-w").map(|c| c.len()), Some(2));
        assert_eq!(scan("a=rwxo-w").map(|c| c.len()), Some(2));
        assert_eq!(scan("ug=rxu+w").map(|c| c.len()), Some(2));
        assert_eq!(scan("u=r\tg=w").map(|c| c.len()), Some(2));
        assert_eq!(scan("a=r ").map(|c| c.len()), Some(1));
    }

    #[test]
    fn scan_repeated_letters_are_idempotent() {
        let clauses = scan("uuu+rrr").expect("repeated letters should scan");
        assert_eq!(clauses[0].actors, PermBits::OWNER);
        assert_eq!(clauses[0].perms, PermBits::READ);
    }

    #[test]
    fn scan_rejects() {
        for text in [
            "",
            " ",
            "a=rwz",
            "u=rw o+x m+w",
            "a=rwx o!x",
            "a=rwx g~x",
            "=rw",
            "u=",
            "au=r",
            "ua=r",
            "ugou=r",
            "a=rwxr",
            "a=r  o=w",
            " a=r",
            "a = r",
            "U=r",
        ] {
            assert_eq!(scan(text), None, "{text:?}");
        }
    }

    // ── Semantics ────────────────────────────────────────────

    #[test]
    fn assign_all() {
        assert_eq!(octal("a=rwx"), 0o777);
        assert_eq!(octal("a=r"), 0o444);
    }

    #[test]
    fn remove_after_assign() {
        assert_eq!(octal("a=rwx o-w"), 0o775);
        assert_eq!(octal("a=rwxo-w"), 0o775);
    }

    #[test]
    fn per_actor_assign() {
        assert_eq!(octal("u=x g=w o=r"), 0o124);
    }

    #[test]
    fn add_is_cumulative() {
        assert_eq!(octal("u+w u+r u+w"), 0o600);
    }

    #[test]
    fn assign_resets_only_named_actors() {
        assert_eq!(octal("u+wu=ru+wu-r"), 0o200);
        assert_eq!(octal("u=r u+w u-r"), 0o200);
        assert_eq!(octal("u=ru+wu-r"), 0o200);
        assert_eq!(octal("a=rwx u=r"), 0o477);
    }

    #[test]
    fn strictly_left_to_right() {
        assert_eq!(octal("a=rwx o-r a-w o-x o+r"), 0o554);
    }

    #[test]
    fn grant_then_restrict_group() {
        assert_eq!(octal("ug=rx u+w"), 0o750);
        assert_eq!(octal("ug=rxu+w"), 0o750);
    }

    #[test]
    fn apply_to_existing_base() {
        let base = PermBits::from_bits_truncate(0o644);
        assert_eq!(apply(base, "g+w o-r").map(|b| b.bits()), Ok(0o660));
        assert_eq!(apply(base, "a+x").map(|b| b.bits()), Ok(0o755));
    }

    #[test]
    fn decode_rejects_non_symbolic() {
        assert_eq!(decode("rwx"), Err(DecodeFailure::Malformed));
    }

    #[test]
    fn op_display() {
        assert_eq!(Op::Add.to_string(), "+");
        assert_eq!(Op::Remove.to_string(), "-");
        assert_eq!(Op::Assign.to_string(), "=");
    }
}
