//! Shared E2E test helpers for `permfmt` binary tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::time::Duration;

/// Default timeout for CLI tests.
pub const TIMEOUT_BASIC: Duration = Duration::from_secs(10);

/// Build a Command for the `permfmt` binary with a clean environment.
///
/// `PERMFMT_OUTPUT` and `RUST_LOG` are removed so the caller's shell
/// cannot change the expected output.
pub fn permfmt_cmd() -> assert_cmd::Command {
    let mut cmd: assert_cmd::Command = cargo_bin_cmd!("permfmt");
    cmd.timeout(TIMEOUT_BASIC);
    cmd.env_remove("PERMFMT_OUTPUT");
    cmd.env_remove("RUST_LOG");
    cmd
}
