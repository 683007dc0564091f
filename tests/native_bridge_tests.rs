//! Native bridge tests against a shared object compiled from tests/fixtures/bridge.c

#![cfg(unix)]

use std::path::{Path, PathBuf};
use std::process::Command;

use astrolab::native::{NativeLibrary, run_bridge};
use tempfile::TempDir;

fn build_fixture(dir: &TempDir) -> PathBuf {
    let source = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/bridge.c");
    let output = dir.path().join("lib.so");
    let compiler = std::env::var("CC").unwrap_or_else(|_| "cc".to_string());

    let status = Command::new(&compiler)
        .args(["-shared", "-fPIC", "-o"])
        .arg(&output)
        .arg(&source)
        .status()
        .expect("Failed to run the C compiler");
    assert!(status.success(), "{} failed to build the fixture", compiler);
    output
}

#[test]
fn test_bridge_calls_all_three_exports() {
    let dir = TempDir::new().unwrap();
    let lib = build_fixture(&dir);

    let report = run_bridge(&lib, "dQw4w9WgXcQ").unwrap();
    assert_eq!(report.add, 3);
    assert_eq!(report.version, "go1.22.0");
    assert_eq!(report.watch_time, "watched dQw4w9WgXcQ: 3m33s");
    assert_eq!(
        report.to_string(),
        "Add: 3\nVersion: go1.22.0\nWatchTime: watched dQw4w9WgXcQ: 3m33s"
    );
}

#[test]
fn test_fixture_exports_pass_verification() {
    let dir = TempDir::new().unwrap();
    let lib = NativeLibrary::open(build_fixture(&dir)).unwrap();

    lib.verify_exports().unwrap();
    assert_eq!(lib.add(-4, 10).unwrap(), 6);
    assert_eq!(lib.path().file_name().unwrap(), "lib.so");
}

#[test]
fn test_video_id_with_nul_is_rejected() {
    let dir = TempDir::new().unwrap();
    let lib = NativeLibrary::open(build_fixture(&dir)).unwrap();

    let err = lib.watch_time("a\0b").unwrap_err();
    assert_eq!(err.code(), "E004");
}
