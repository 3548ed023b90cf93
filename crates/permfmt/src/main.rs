//! permfmt - normalize POSIX permission text
//!
//! Reads permission strings in any supported notation (`644`, `0o755`,
//! `u=rw go=r`, `rwxr-x---`, `drwxr-xr-x`) and prints each one in a
//! single canonical form.
//!
//! # Configuration
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PERMFMT_*`)
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `PERMFMT_OUTPUT`: Output mode (`canonical`, `octal`, `json`)

mod output;

use anyhow::{Context, Result};
use clap::Parser;
use output::OutputMode;
use posixperm::{ErrorCode, Grammar, Perm};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// permfmt - normalize POSIX permission text
#[derive(Parser, Debug)]
#[command(name = "permfmt")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Output mode (also: PERMFMT_OUTPUT)
    #[arg(short, long, value_enum, env = "PERMFMT_OUTPUT", default_value_t = OutputMode::Canonical)]
    output: OutputMode,

    /// Print the grammar each input matched after the value
    #[arg(long)]
    explain: bool,

    /// Permission strings (reads one per line from stdin if omitted)
    perms: Vec<String>,
}

fn init_tracing(args: &Args) {
    // Terminal filter: --debug > --verbose > RUST_LOG env > default "warn"
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let layer = fmt::layer().with_target(false).with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .init();
}

/// Formats every input, returning how many failed to parse.
fn run(args: &Args, inputs: impl IntoIterator<Item = String>) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;

    for input in inputs {
        match Perm::parse(&input) {
            Ok(perm) => {
                let grammar = args.explain.then(|| Grammar::classify(&input)).flatten();
                let line = output::line(args.output, perm, grammar)?;
                writeln!(out, "{line}").context("failed to write output")?;
            }
            Err(e) => {
                failed += 1;
                eprintln!("error[{}]: {e}", e.code());
            }
        }
    }

    Ok(failed)
}

fn stdin_lines() -> Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .map(|line| line.map(|l| l.trim_end_matches('\r').to_string()))
        .filter(|line| line.as_ref().map_or(true, |l| !l.is_empty()))
        .collect::<io::Result<_>>()
        .context("failed to read stdin")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);

    tracing::info!(output = %args.output, explain = args.explain, "starting");

    let inputs = if args.perms.is_empty() {
        tracing::debug!("no arguments, reading stdin");
        stdin_lines()?
    } else {
        args.perms.clone()
    };

    let total = inputs.len();
    let failed = run(&args, inputs)?;
    tracing::info!(total, failed, "done");

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
