// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CREDENTIAL_VARS: [&str; 5] = [
    "SNYK_API_TOKEN",
    "WIZ_CLIENT_ID",
    "WIZ_CLIENT_SECRET",
    "WIZ_API_TOKEN",
    "WIZ_API_DC",
];

/// Binary with no credentials and an empty config directory.
fn secapi(config_home: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("secapi");
    for var in CREDENTIAL_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("RUST_LOG")
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("SECAPI_SNYK__API_URL", "http://127.0.0.1:9")
        .env("SECAPI_WIZ__AUTH_URL", "http://127.0.0.1:9/oauth/token");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("secapi");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("secapi"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("secapi");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("snyk"))
        .stdout(predicate::str::contains("wiz"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_snyk_help_lists_operations() {
    let mut cmd = cargo_bin_cmd!("secapi");
    cmd.args(["snyk", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("get-sbom"))
        .stdout(predicate::str::contains("search-audit"))
        .stdout(predicate::str::contains("remove-member"));
}

#[test]
fn test_snake_case_alias() {
    let mut cmd = cargo_bin_cmd!("secapi");
    cmd.args(["snyk", "get_sbom", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PROJECT_ID"));
}

#[test]
fn test_completion_bash() {
    let mut cmd = cargo_bin_cmd!("secapi");
    cmd.args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_secapi"));
}

#[test]
fn test_snyk_without_token_fails_at_auth() {
    let home = TempDir::new().unwrap();
    secapi(&home)
        .args(["snyk", "list-groups"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[auth]"))
        .stderr(predicate::str::contains("SNYK_API_TOKEN"));
}

#[test]
fn test_wiz_without_credentials_fails_at_auth() {
    let home = TempDir::new().unwrap();
    secapi(&home)
        .args(["wiz", "issues-table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[auth]"))
        .stderr(predicate::str::contains("WIZ_CLIENT_ID"));
}

#[test]
fn test_wiz_token_never_prints_token() {
    let home = TempDir::new().unwrap();
    secapi(&home)
        .env("WIZ_API_TOKEN", "super-secret-token")
        .env("WIZ_API_DC", "eu1")
        .args(["--output", "json", "wiz", "token"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data_center\": \"eu1\""))
        .stdout(predicate::str::contains("\"source\": \"environment\""))
        .stdout(predicate::str::contains("https://api.eu1.app.wiz.io/graphql"))
        .stdout(predicate::str::contains("super-secret-token").not());
}

#[test]
fn test_invalid_param_is_rejected() {
    let mut cmd = cargo_bin_cmd!("secapi");
    cmd.args(["snyk", "search-audit", "o1", "--param", "sort"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key=value"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_sbom_prints_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/orgs/o1/projects/p1/sbom"))
        .and(query_param("version", "2025-01-01"))
        .and(header("authorization", "token snyk-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bomFormat": "CycloneDX"})))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = secapi(&home)
        .env("SNYK_API_TOKEN", "snyk-token")
        .env("SECAPI_SNYK__API_URL", server.uri())
        .args(["--output", "json", "snyk", "get-sbom", "o1", "p1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["bomFormat"], "CycloneDX");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_error_status_fails_at_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such org"})))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    secapi(&home)
        .env("SNYK_API_TOKEN", "snyk-token")
        .env("SECAPI_SNYK__API_URL", server.uri())
        .args(["snyk", "list-projects", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[call] Snyk API returned HTTP 404"))
        .stderr(predicate::str::contains("no such org"));
}
