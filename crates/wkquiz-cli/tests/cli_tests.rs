//! CLI integration tests using assert_cmd.

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wkquiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("wkquiz").unwrap();
    cmd.env_remove("WKQUIZ_API_TOKEN");
    cmd
}

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("wkquiz.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_output() {
    wkquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terminal vocabulary quiz for WaniKani"));
}

#[test]
fn version_output() {
    wkquiz()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wkquiz"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    wkquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created wkquiz.toml"));

    let written = std::fs::read_to_string(dir.path().join("wkquiz.toml")).unwrap();
    assert!(written.contains("stop_word = \"!stop\""));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    wkquiz().current_dir(dir.path()).arg("init").assert().success();

    wkquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn missing_token_is_reported_without_failing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "stop_word = \"!stop\"\n");

    wkquiz()
        .arg("--config")
        .arg(&config)
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: no API token configured"));
}

#[test]
fn missing_config_file_is_reported() {
    wkquiz()
        .arg("--config")
        .arg("no_such_config.toml")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("config file not found"));
}

fn collection(data: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "object": "collection",
        "pages": {"per_page": 500, "next_url": null, "previous_url": null},
        "data": data
    })
}

async fn mock_wanikani() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "object": "user",
            "data": {"username": "koichi", "level": 2}
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/subjects"))
        .and(query_param("levels", "1,2"))
        .and(query_param("types", "radical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(serde_json::json!([
            {
                "id": 1,
                "object": "radical",
                "data": {
                    "characters": "火",
                    "meanings": [{"meaning": "Fire", "primary": true, "accepted_answer": true}],
                    "auxiliary_meanings": []
                }
            },
            {
                "id": 2,
                "object": "radical",
                "data": {
                    "characters": "水",
                    "meanings": [{"meaning": "Water", "primary": true, "accepted_answer": true}],
                    "auxiliary_meanings": []
                }
            }
        ]))))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/review_statistics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(collection(serde_json::json!([
            {"id": 10, "object": "review_statistic", "data": {"subject_id": 1}}
        ]))))
        .mount(&server)
        .await;

    server
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_quiz(config: std::path::PathBuf, stdin: &'static str) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        wkquiz()
            .arg("--config")
            .arg(&config)
            .write_stdin(stdin)
            .output()
            .unwrap()
    })
    .await
    .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn quiz_against_mock_api() {
    let server = mock_wanikani().await;
    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        &format!("api_token = \"test-token\"\nbase_url = \"{}\"\n", server.uri()),
    );

    run_quiz(config, "\nradical\nearth\nFIRE\n!stop\n")
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Hello, koichi!"))
        .stdout(predicate::str::contains(
            "2 results found.\nComparing with available reviews...\n1 testable reviews found.",
        ))
        .stdout(predicate::str::contains("What is the meaning of the radical: 火?"))
        .stdout(predicate::str::contains("The correct meaning for 火 is: Fire."))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("水").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn api_error_ends_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "Unauthorized. Nice try.",
            "code": 401
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = write_config(
        &dir,
        &format!("api_token = \"bad\"\nbase_url = \"{}\"\n", server.uri()),
    );

    run_quiz(config, "\n\n")
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Error 401: Unauthorized. Nice try."))
        .stdout(predicate::str::contains("What level").not());
}
