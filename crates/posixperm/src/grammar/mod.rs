//! Text grammars accepted by [`Perm::parse`](crate::Perm::parse).
//!
//! | Grammar | Example | Notes |
//! |---------|---------|-------|
//! | [`ImplicitOctal`](Grammar::ImplicitOctal) | `644` | 3+ octal digits, no leading zero |
//! | [`ExplicitOctal`](Grammar::ExplicitOctal) | `0644`, `0o644` | `0` or `0o` marker, then 3+ octal digits |
//! | [`Symbolic`](Grammar::Symbolic) | `a=rwx o-w` | `chmod`-style clauses applied left to right |
//! | [`BasicSingle`](Grammar::BasicSingle) | `r-x` | one `rwx` group broadcast to every actor |
//! | [`BasicTriple`](Grammar::BasicTriple) | `rwxr-x---` | `ls`-style owner/group/other |
//! | [`Full`](Grammar::Full) | `drwxr-xr-x` | mode prefix (or `-`) then a basic triple |
//!
//! Classification tries each grammar in [`Grammar::ORDERED`] and stops at
//! the first match. Every grammar pairs a matcher, which only looks at
//! the shape of the text, with a decoder that computes the bits.

mod listing;
mod octal;
mod symbolic;

use crate::{ParseError, Perm, PermBits};
use std::fmt;

pub use symbolic::{Clause, Op};

/// One of the accepted permission text grammars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// `644`
    ImplicitOctal,
    /// `0644` or `0o644`
    ExplicitOctal,
    /// `u=rw g+r o-x`
    Symbolic,
    /// `rw-`
    BasicSingle,
    /// `rw-r--r--`
    BasicTriple,
    /// `-rw-r--r--`, `drwxr-xr-x`, `ugrwxr-xr-x`
    Full,
}

impl Grammar {
    /// All grammars in classification priority order.
    pub const ORDERED: [Self; 6] = [
        Self::ImplicitOctal,
        Self::ExplicitOctal,
        Self::Symbolic,
        Self::BasicSingle,
        Self::BasicTriple,
        Self::Full,
    ];

    /// Returns the first grammar in [`ORDERED`](Self::ORDERED) that matches `text`.
    ///
    /// # Example
    ///
    /// ```
    /// use posixperm::Grammar;
    ///
    /// assert_eq!(Grammar::classify("755"), Some(Grammar::ImplicitOctal));
    /// assert_eq!(Grammar::classify("0o755"), Some(Grammar::ExplicitOctal));
    /// assert_eq!(Grammar::classify("ug=rx"), Some(Grammar::Symbolic));
    /// assert_eq!(Grammar::classify("drwxr-xr-x"), Some(Grammar::Full));
    /// assert_eq!(Grammar::classify("rwz"), None);
    /// ```
    #[must_use]
    pub fn classify(text: &str) -> Option<Self> {
        Self::ORDERED.into_iter().find(|grammar| grammar.matches(text))
    }

    /// Returns `true` if `text` has this grammar's shape.
    ///
    /// Shape only: an implicit octal string that overflows 32 bits still
    /// matches, and fails later in [`decode`](Self::decode).
    #[must_use]
    pub fn matches(self, text: &str) -> bool {
        match self {
            Self::ImplicitOctal => octal::is_implicit(text),
            Self::ExplicitOctal => octal::is_explicit(text),
            Self::Symbolic => symbolic::scan(text).is_some(),
            Self::BasicSingle => listing::is_single(text),
            Self::BasicTriple => listing::is_triple(text),
            Self::Full => listing::is_full(text),
        }
    }

    /// Decodes `text` under this grammar.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Overflow`] when octal digits exceed 32 bits.
    /// - [`ParseError::Malformed`] when `text` does not have this grammar's shape.
    pub fn decode(self, text: &str) -> Result<Perm, ParseError> {
        let bits = match self {
            Self::ImplicitOctal => octal::decode_implicit(text),
            Self::ExplicitOctal => octal::decode_explicit(text),
            Self::Symbolic => symbolic::decode(text).map(|bits| bits.bits()),
            Self::BasicSingle => listing::decode_single(text).map(|bits| bits.bits()),
            Self::BasicTriple => listing::decode_triple(text).map(|bits| bits.bits()),
            Self::Full => listing::decode_full(text),
        };
        bits.map(Perm::from_bits).map_err(|kind| kind.into_error(self, text))
    }

    /// Stable lowercase identifier, used in messages and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::ImplicitOctal => "implicit-octal",
            Self::ExplicitOctal => "explicit-octal",
            Self::Symbolic => "symbolic",
            Self::BasicSingle => "basic-single",
            Self::BasicTriple => "basic-triple",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Applies symbolic clauses to existing permission bits.
pub(crate) fn apply_symbolic(base: PermBits, expr: &str) -> Option<PermBits> {
    symbolic::apply(base, expr).ok()
}

/// Decoder failure, before the grammar and input are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeFailure {
    Overflow,
    Malformed,
}

impl DecodeFailure {
    fn into_error(self, grammar: Grammar, text: &str) -> ParseError {
        match self {
            Self::Overflow => ParseError::overflow(grammar, text),
            Self::Malformed => ParseError::malformed(grammar, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matching(text: &str) -> Vec<Grammar> {
        Grammar::ORDERED
            .into_iter()
            .filter(|g| g.matches(text))
            .collect()
    }

    // ── Classification ───────────────────────────────────────

    #[test]
    fn classify_examples() {
        let cases = [
            ("644", Grammar::ImplicitOctal),
            ("1777", Grammar::ImplicitOctal),
            ("0644", Grammar::ExplicitOctal),
            ("0o644", Grammar::ExplicitOctal),
            ("0000", Grammar::ExplicitOctal),
            ("a=rwx o-w", Grammar::Symbolic),
            ("ug=rxu+w", Grammar::Symbolic),
            ("rwx", Grammar::BasicSingle),
            ("---", Grammar::BasicSingle),
            ("rwxr-x---", Grammar::BasicTriple),
            ("-rwxr-x---", Grammar::Full),
            ("drwxr-xr-x", Grammar::Full),
            ("ugrwxr-xr-x", Grammar::Full),
        ];
        for (text, expected) in cases {
            assert_eq!(Grammar::classify(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn classify_rejects_unknown_shapes() {
        for text in [
            "", "000", "64", "0o64", "678", "0999", "rxw", "rWx", "a=rwz", "u=rw o+x m+w",
            "a=rwx o!x", "-drwxr-xr-x", "rwx,r-x", " 644", "644 ",
        ] {
            assert_eq!(Grammar::classify(text), None, "{text:?}");
        }
    }

    #[test]
    fn example_inputs_match_exactly_one_grammar() {
        for text in [
            "644", "0644", "0o644", "a=r", "u+w u+r u+w", "r-x", "rwxrwxrwx", "-rwxrwxrwx",
            "drwxrwxrwx", "Lrwxrwxrwx", "ugrwxr-xr-x", "dalTLDpSugct?rwxrwxrwx",
        ] {
            assert_eq!(matching(text).len(), 1, "{text} matched {:?}", matching(text));
        }
    }

    #[test]
    fn ordered_lists_every_grammar_once() {
        for (i, a) in Grammar::ORDERED.iter().enumerate() {
            for b in &Grammar::ORDERED[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    // ── Decoding ─────────────────────────────────────────────

    #[test]
    fn decode_mismatched_text_is_malformed_not_panic() {
        for grammar in Grammar::ORDERED {
            let err = grammar
                .decode("?!")
                .expect_err("garbage should not decode under any grammar");
            assert_eq!(err, ParseError::malformed(grammar, "?!"));
        }
    }

    #[test]
    fn decode_overflow_carries_grammar() {
        let err = Grammar::ImplicitOctal
            .decode("47777777777")
            .expect_err("value above u32::MAX should overflow");
        assert_eq!(err.grammar(), Some(Grammar::ImplicitOctal));
        assert!(matches!(err, ParseError::Overflow { .. }));
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(Grammar::BasicTriple.to_string(), "basic-triple");
        assert_eq!(format!("{}", Grammar::ExplicitOctal), "explicit-octal");
    }
}
