use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("suvidha")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("kiosk")
                .and(predicate::str::contains("track"))
                .and(predicate::str::contains("admin")),
        );
}

#[test]
fn config_show_prints_effective_settings() {
    Command::cargo_bin("suvidha")
        .unwrap()
        .env_remove("SUVIDHA_API_URL")
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("api_base_url").and(predicate::str::contains("default_location")),
        );
}

#[test]
fn track_rejects_malformed_token_before_any_network_call() {
    Command::cargo_bin("suvidha")
        .unwrap()
        .args(["track", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid numeric token"));
}

#[test]
fn admin_login_rejects_unknown_department() {
    Command::cargo_bin("suvidha")
        .unwrap()
        .args([
            "admin",
            "login",
            "--employee-id",
            "EMP001",
            "--password",
            "admin123",
            "--department",
            "Sanitation",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown department"));
}
