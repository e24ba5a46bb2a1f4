use assert_cmd::Command;
use predicates::prelude::*;

fn glassmarker_cmd() -> Command {
    Command::cargo_bin("glassmarker").expect("binary exists")
}

#[test]
fn help_prints_usage() {
    glassmarker_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Transparent screen annotation overlay for Wayland compositors",
        ));
}

#[test]
fn version_prints_package_version() {
    glassmarker_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn running_requires_wayland_env() {
    glassmarker_cmd()
        .env_remove("WAYLAND_DISPLAY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("WAYLAND_DISPLAY not set"));
}

#[test]
fn unknown_width_flag_value_is_rejected() {
    glassmarker_cmd()
        .args(["--width", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
