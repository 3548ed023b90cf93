//! Rendering of parsed values.

use clap::ValueEnum;
use posixperm::{Grammar, Perm};
use std::fmt;

/// How each parsed value is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Full `ls -l` form: `-rw-r--r--`
    #[default]
    Canonical,
    /// Zero-padded octal with `0o` prefix: `0o0644`
    Octal,
    /// JSON string of the full form: `"-rw-r--r--"`
    Json,
}

impl OutputMode {
    /// Renders `perm` in this mode.
    pub fn render(self, perm: Perm) -> anyhow::Result<String> {
        Ok(match self {
            Self::Canonical => perm.to_canonical(),
            Self::Octal => format!("{perm:#06o}"),
            Self::Json => serde_json::to_string(&perm)?,
        })
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Canonical => "canonical",
            Self::Octal => "octal",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

/// One output line: the rendered value, plus the grammar when explaining.
pub fn line(mode: OutputMode, perm: Perm, grammar: Option<Grammar>) -> anyhow::Result<String> {
    let rendered = mode.render(perm)?;
    Ok(match grammar {
        Some(grammar) => format!("{rendered}\t{grammar}"),
        None => rendered,
    })
}
