#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use tempfile::{TempDir, tempdir};

/// Returns a configured Command for `viewddl`, run from an empty directory
/// so no stray config file is picked up.
pub fn viewddl_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("viewddl").expect("Binary not found");
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

pub fn empty_dir() -> TempDir {
    tempdir().expect("Failed to create temp directory")
}

/// Temp dir with a config.toml selecting `dialect` and enabling dry runs
pub fn setup_dry_run_config(dialect: &str, extra: &str) -> TempDir {
    let temp_dir = empty_dir();
    fs::write(
        temp_dir.path().join("config.toml"),
        format!(
            "[dialect]\nname = \"{}\"\n{}\n\n[behavior]\ndefault_dry_run = true\n",
            dialect, extra
        ),
    )
    .expect("Failed to write config file");
    temp_dir
}
