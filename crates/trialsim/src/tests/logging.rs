//! Log filter and rotation tests

use std::fs;
use std::path::Path;

use crate::logging::{LogRotation, ROTATION_MARKER, default_filter};

fn rotation(max_size: u64, keep_size: u64) -> LogRotation {
    LogRotation {
        max_size,
        keep_size,
    }
}

/// 100 lines of exactly 10 bytes each
fn write_entries(path: &Path) {
    let content: String = (0..100).map(|i| format!("entry {i:03}\n")).collect();
    fs::write(path, content).unwrap();
}

fn kept_lines(path: &Path) -> Vec<String> {
    let rotated = fs::read(path).unwrap();
    assert!(rotated.starts_with(ROTATION_MARKER));
    String::from_utf8(rotated[ROTATION_MARKER.len()..].to_vec())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_default_filter_covers_both_crates() {
    assert_eq!(default_filter("debug"), "trialsim=debug,trialsim_core=debug");
}

#[test]
fn test_default_rotation_limits() {
    let default = LogRotation::default();
    assert_eq!(default.max_size, 5 * 1024 * 1024);
    assert_eq!(default.keep_size, 1024 * 1024);
}

#[test]
fn test_missing_log_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trialsim.log");
    assert!(!rotation(100, 50).apply(&path).unwrap());
    assert!(!path.exists());
}

#[test]
fn test_small_log_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trialsim.log");
    fs::write(&path, "line 1\nline 2\n").unwrap();

    assert!(!rotation(100, 50).apply(&path).unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "line 1\nline 2\n");
}

#[test]
fn test_log_at_limit_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trialsim.log");
    write_entries(&path);

    assert!(!rotation(1000, 50).apply(&path).unwrap());
    assert_eq!(fs::metadata(&path).unwrap().len(), 1000);
}

#[test]
fn test_large_log_keeps_recent_whole_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trialsim.log");
    write_entries(&path);

    // The cut lands inside "entry 094", which is dropped
    assert!(rotation(500, 55).apply(&path).unwrap());
    assert_eq!(
        kept_lines(&path),
        ["entry 095", "entry 096", "entry 097", "entry 098", "entry 099"]
    );
    assert!(!path.with_extension("rotating").exists());
}

#[test]
fn test_cut_on_line_start_keeps_that_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trialsim.log");
    write_entries(&path);

    assert!(rotation(500, 30).apply(&path).unwrap());
    assert_eq!(kept_lines(&path), ["entry 097", "entry 098", "entry 099"]);
}
