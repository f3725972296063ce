use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn list_settings_does_not_create_the_settings_directory() {
    let temp = tempdir().unwrap();
    let home = temp.path().join("chorus-home");

    cargo_bin_cmd!("chorus")
        .env("CHORUS_HOME", &home)
        .arg("--list-settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("mixer: software"))
        .stdout(predicate::str::contains("port: 6680"));

    assert!(!home.exists());
}

#[test]
fn list_settings_reflects_the_file_and_leaves_it_unchanged() {
    let temp = tempdir().unwrap();
    let file = temp.path().join("settings.yaml");
    let content = "mixer: dummy\nbackends: [dummy]\nhttp:\n  port: 7000\n";
    fs::write(&file, content).unwrap();

    cargo_bin_cmd!("chorus")
        .env("CHORUS_HOME", temp.path())
        .arg("--list-settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("mixer: dummy"))
        .stdout(predicate::str::contains("port: 7000"));

    assert_eq!(fs::read_to_string(&file).unwrap(), content);
}

#[test]
fn quiet_and_verbose_conflict() {
    cargo_bin_cmd!("chorus")
        .args(["-q", "-v", "--list-settings"])
        .assert()
        .failure();
}

#[test]
fn empty_backend_list_exits_with_configuration_error() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("settings.yaml"), "backends: []\n").unwrap();

    cargo_bin_cmd!("chorus")
        .env("CHORUS_HOME", temp.path())
        .env_remove("RUST_LOG")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("backends must list at least one backend"));
}

#[test]
fn invalid_settings_exit_with_configuration_error() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("settings.yaml"), "mixer: [unclosed\n").unwrap();

    cargo_bin_cmd!("chorus")
        .env("CHORUS_HOME", temp.path())
        .assert()
        .code(2);
}

#[test]
fn unknown_mixer_exits_with_configuration_error() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("settings.yaml"), "mixer: hardware\n").unwrap();

    cargo_bin_cmd!("chorus")
        .env("CHORUS_HOME", temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown mixer 'hardware'"));
}
