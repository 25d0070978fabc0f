#![cfg(any(target_os = "linux", target_os = "macos"))]

mod common;

use assert_cmd::Command;
use common::{Fixture, archive_entries};
use predicates::prelude::*;

fn release() -> Command {
    Command::cargo_bin("imfit_release").unwrap()
}

#[test]
fn source_only_writes_the_source_archive() {
    let fixture = Fixture::new();
    let config = fixture.write_config("1.1", "");

    release()
        .arg("--source-only")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("imfit-1.1-source.tar.gz"));

    let entries = archive_entries(&fixture.path("imfit-1.1-source.tar.gz"));
    assert!(entries.contains(&"SConstruct".to_string()));
    assert!(!entries.contains(&"imfit".to_string()));
}

#[test]
fn quiet_run_prints_nothing() {
    let fixture = Fixture::new();
    let config = fixture.write_config("1.1", "");

    release()
        .args(["--source-only", "--quiet", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn both_only_flags_do_nothing_and_succeed() {
    let fixture = Fixture::new();
    let config = fixture.write_config("1.1", "");

    release()
        .args(["--source-only", "--binary-only", "-c"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning:"));

    assert!(!fixture.path("imfit-1.1").exists());
    assert!(!fixture.path("imfit-1.1-source.tar.gz").exists());
}

#[test]
fn missing_config_fails() {
    let fixture = Fixture::new();

    release()
        .current_dir(fixture.root())
        .arg("--source-only")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("release.toml"));
}

#[test]
fn missing_source_file_fails_with_its_path() {
    let fixture = Fixture::new();
    let config = fixture.write_config("1.1", "");
    std::fs::remove_file(fixture.path("docs/imfit_howto.pdf")).unwrap();

    release()
        .arg("--source-only")
        .arg("-c")
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("docs/imfit_howto.pdf"));

    assert!(!fixture.path("imfit-1.1-source.tar.gz").exists());
}
