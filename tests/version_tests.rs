use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn buildstamp_version_reports_build_metadata() {
    let mut cmd = Command::cargo_bin("buildstamp").unwrap();
    cmd.arg("--version");
    // Clap prints the long_version when --version is used; ensure key fields exist
    cmd.assert().success().stdout(
        predicate::str::contains("version:")
            .and(predicate::str::contains("git sha:"))
            .and(predicate::str::contains("build time (UTC):"))
            .and(predicate::str::contains("target:"))
            .and(predicate::str::contains("profile:")),
    );
}

#[test]
fn buildstamp_version_reports_cargo_profile() {
    let mut cmd = Command::cargo_bin("buildstamp").unwrap();
    cmd.arg("--version");
    let expected = if cfg!(debug_assertions) { "profile: debug" } else { "profile: release" };
    cmd.assert().success().stdout(predicate::str::contains(expected));
}
