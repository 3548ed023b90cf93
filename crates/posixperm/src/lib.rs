//! POSIX file permissions that read and write as text.
//!
//! [`Perm`] holds a 32-bit file mode and converts to and from the
//! permission notations people actually write in configuration files.
//!
//! # Accepted Notations
//!
//! ```text
//! 644            implicit octal
//! 0644, 0o644    explicit octal (0o is the YAML 1.2 spelling)
//! a=rwx o-w      symbolic, chmod-style, applied left to right
//! ug=rxu+w       symbolic without separators
//! r-x            one rwx group applied to owner, group and other
//! rwxr-x---      ls-style owner/group/other
//! drwxr-x---     full form: mode flags (or '-') then ls-style triple
//! ```
//!
//! Parsing is flexible; formatting is not. Every value renders in the
//! full form, regardless of how it was written:
//!
//! ```
//! use posixperm::Perm;
//!
//! let p: Perm = "644".parse().unwrap();
//! assert_eq!(p.to_string(), "-rw-r--r--");
//!
//! // Full-form text survives a round trip unchanged.
//! let d: Perm = "drwxr-x---".parse().unwrap();
//! assert_eq!(d.to_string(), "drwxr-x---");
//! ```
//!
//! # Serde
//!
//! `Perm` serializes as its full-form string and deserializes from any
//! accepted notation, so it can sit directly in config structs:
//!
//! ```
//! use posixperm::Perm;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Target {
//!     path: String,
//!     mode: Perm,
//! }
//!
//! let t: Target = serde_json::from_str(r#"{"path": "/srv/app", "mode": "u=rwx go=rx"}"#).unwrap();
//! assert_eq!(t.mode.bits(), 0o755);
//! ```
//!
//! # Bit Layout
//!
//! The low nine bits are [`PermBits`]; the type and special flags are
//! [`ModeBits`], counting down from bit 31. Both share their text
//! characters through [`MODE_ABBREVIATIONS`] and [`PERM_COLUMNS`].
//! [`Perm::from_unix_mode`] and [`Perm::to_unix_mode`] translate to the
//! `st_mode` layout used by `stat(2)` and `chmod(2)`.

mod bits;
mod error;
mod grammar;
mod perm;
pub mod unix;

pub use bits::{ModeBits, PermBits, MODE_ABBREVIATIONS, PERM_COLUMNS};
pub use error::{ErrorCode, ParseError};
pub use grammar::{Clause, Grammar, Op};
pub use perm::Perm;
