//! The [`Perm`] value type.

use crate::grammar::{self, Grammar};
use crate::{ModeBits, ParseError, PermBits, MODE_ABBREVIATIONS, PERM_COLUMNS};
use serde::de::{self, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt::{self, Write as _};
use std::str::FromStr;

/// A 32-bit file mode: nine permission bits plus type and special flags.
///
/// `Perm` parses from any of the notations in [`Grammar`] and always
/// formats to the full `ls -l` form, so a value read from `644` writes
/// back as `-rw-r--r--`.
///
/// # Example
///
/// ```
/// use posixperm::Perm;
///
/// let p: Perm = "a=rx u+w".parse().unwrap();
/// assert_eq!(p.bits(), 0o755);
/// assert_eq!(p.to_string(), "-rwxr-xr-x");
///
/// let dir = Perm::parse("drwxr-x---").unwrap();
/// assert!(dir.is_dir());
/// assert_eq!(dir.to_string(), "drwxr-x---");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Perm(u32);

impl Perm {
    /// Wraps a raw 32-bit mode value without interpretation.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw 32-bit mode value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Builds a value from its two halves.
    #[must_use]
    pub const fn new(mode: ModeBits, perms: PermBits) -> Self {
        Self(mode.bits() | perms.bits())
    }

    /// Parses permission text in any accepted grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Unrecognized`] if no grammar matches, or the
    /// matched grammar's decode error (for example octal overflow).
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let Some(grammar) = Grammar::classify(text) else {
            tracing::debug!(input = text, "unrecognized permission syntax");
            return Err(ParseError::unrecognized(text));
        };
        tracing::trace!(input = text, %grammar, "classified permission text");
        grammar.decode(text).inspect_err(|e| {
            tracing::debug!(input = text, %grammar, error = %e, "permission decode failed");
        })
    }

    /// Parses permission text from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUtf8`] for non-UTF-8 input, otherwise
    /// the same errors as [`parse`](Self::parse).
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ParseError::invalid_utf8(bytes))?;
        Self::parse(text)
    }

    /// Applies a symbolic expression on top of this value, like `chmod`.
    ///
    /// Mode flags are kept; only the permission bits named by the clauses
    /// change. [`parse`](Self::parse) on symbolic text is the same as
    /// applying it to an empty `Perm`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Malformed`] if `expr` is not symbolic.
    ///
    /// # Example
    ///
    /// ```
    /// use posixperm::Perm;
    ///
    /// let p = Perm::parse("drw-r--r--").unwrap();
    /// assert_eq!(p.chmod("go-r u+x").unwrap().to_string(), "drwx------");
    /// ```
    pub fn chmod(self, expr: &str) -> Result<Self, ParseError> {
        let perms = grammar::apply_symbolic(self.permissions(), expr)
            .ok_or_else(|| ParseError::malformed(Grammar::Symbolic, expr))?;
        Ok(self.with_permissions(perms))
    }

    /// The nine read/write/execute bits.
    #[must_use]
    pub const fn permissions(self) -> PermBits {
        PermBits::from_bits_truncate(self.0)
    }

    /// The type and special flags.
    #[must_use]
    pub const fn mode(self) -> ModeBits {
        ModeBits::from_bits_truncate(self.0)
    }

    /// Returns a copy with the permission bits replaced.
    #[must_use]
    pub const fn with_permissions(self, perms: PermBits) -> Self {
        Self((self.0 & !PermBits::all().bits()) | perms.bits())
    }

    /// Returns a copy with the mode flags replaced.
    #[must_use]
    pub const fn with_mode(self, mode: ModeBits) -> Self {
        Self((self.0 & !ModeBits::all().bits()) | mode.bits())
    }

    /// Returns `true` if the directory flag is set.
    #[must_use]
    pub const fn is_dir(self) -> bool {
        self.mode().contains(ModeBits::DIR)
    }

    /// Returns `true` if no type flag is set.
    #[must_use]
    pub const fn is_regular(self) -> bool {
        !self.mode().intersects(ModeBits::TYPE)
    }

    /// Renders the canonical full form (same as `to_string()`).
    #[must_use]
    pub fn to_canonical(self) -> String {
        self.to_string()
    }
}

/// Canonical full form: set mode abbreviations (or `-`), then nine `rwx` columns.
impl fmt::Display for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = self.mode();
        let mut wrote_mode = false;
        for (flag, abbrev) in MODE_ABBREVIATIONS {
            if mode.contains(flag) {
                f.write_char(abbrev)?;
                wrote_mode = true;
            }
        }
        if !wrote_mode {
            f.write_char('-')?;
        }

        let perms = self.permissions();
        for (bit, letter) in PERM_COLUMNS {
            f.write_char(if perms.contains(bit) { letter } else { '-' })?;
        }
        Ok(())
    }
}

impl fmt::Octal for Perm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Octal::fmt(&self.0, f)
    }
}

impl FromStr for Perm {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Perm {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<u32> for Perm {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<Perm> for u32 {
    fn from(perm: Perm) -> Self {
        perm.0
    }
}

impl From<PermBits> for Perm {
    fn from(perms: PermBits) -> Self {
        Self(perms.bits())
    }
}

// ── serde ────────────────────────────────────────────────────

impl Serialize for Perm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Perm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(PermVisitor)
    }
}

struct PermVisitor;

impl Visitor<'_> for PermVisitor {
    type Value = Perm;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a permission string such as \"0644\", \"u=rw go=r\" or \"-rw-r--r--\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Perm, E> {
        Perm::parse(v).map_err(E::custom)
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Perm, E> {
        Perm::parse_bytes(v).map_err(E::custom)
    }
}
