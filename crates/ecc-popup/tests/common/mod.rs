#![allow(dead_code)]

use std::path::PathBuf;

use ecc_popup::SourceLocation;

pub fn has_clang() -> bool {
    std::process::Command::new("clang++").arg("--version").output().is_ok_and(|output| output.status.success())
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(relative_path)
}

pub fn fixture_location(
    relative_path: &str,
    line: u32,
    column: u32,
) -> SourceLocation {
    SourceLocation::new(fixture_path(relative_path).display().to_string(), line, column)
}
