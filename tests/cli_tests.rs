//! CLI integration tests
//!
//! These run the built `serpapi` binary with various flags and options.

use std::process::Command;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

/// Run the CLI without any key in its environment
fn run_cli_command(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_serpapi"))
        .args(args)
        .env_remove("SERPAPI_API_KEY")
        .env_remove("SERPAPI_BASE_URL")
        .env_remove("API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[test]
fn test_cli_help() {
    let (stdout, _stderr, success) = run_cli_command(&["--help"]);

    assert!(success, "Help command should succeed");
    assert!(stdout.contains("Search engine results from the SerpApi service"));
    assert!(stdout.contains("search"));
    assert!(stdout.contains("location"));
    assert!(stdout.contains("account"));
    assert!(stdout.contains("archive"));
}

#[test]
fn test_cli_version() {
    let (stdout, _stderr, success) = run_cli_command(&["--version"]);

    assert!(success, "Version command should succeed");
    assert!(stdout.contains("serpapi"));
}

#[test]
fn test_search_help() {
    let (stdout, _stderr, success) = run_cli_command(&["search", "--help"]);

    assert!(success, "Search help should succeed");
    assert!(stdout.contains("--engine"));
    assert!(stdout.contains("--location"));
    assert!(stdout.contains("--param"));
    assert!(stdout.contains("--html"));
    assert!(stdout.contains("--format"));
}

#[test]
fn test_invalid_param_syntax() {
    let (stdout, stderr, success) =
        run_cli_command(&["search", "Coffee", "--param", "no-equals-sign"]);

    assert!(!success, "Malformed --param should fail");
    assert!(format!("{stdout}{stderr}").contains("key=value"));
}

#[test]
fn test_missing_api_key_error() {
    let (stdout, stderr, success) = run_cli_command(&[
        "search",
        "Coffee",
        "--base-url",
        "http://127.0.0.1:9",
    ]);

    assert!(!success, "Search without an API key should fail");
    let error_output = format!("{stdout}{stderr}");
    assert!(error_output.contains("SerpApi key is required"));
    assert!(error_output.contains("SERPAPI_API_KEY"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_location_json_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/locations.json"))
        .and(query_param("q", "Austin"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("data/location_austin.json")),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let (stdout, stderr, success) = tokio::task::spawn_blocking(move || {
        run_cli_command(&[
            "location",
            "Austin",
            "--limit",
            "2",
            "--format",
            "json",
            "--base-url",
            &uri,
        ])
    })
    .await
    .unwrap();

    assert!(success, "Location lookup should succeed: {stderr}");
    let locations: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(locations.as_array().map(|a| a.len()), Some(2));
    assert_eq!(locations[0]["google_id"], 200635);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_table_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("api_key", "cli-key"))
        .and(query_param("location", "Portland"))
        .and(query_param("num", "3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(include_str!("data/search_coffee_sample.json")),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let (stdout, stderr, success) = tokio::task::spawn_blocking(move || {
        run_cli_command(&[
            "search",
            "Coffee",
            "--location",
            "Portland",
            "--param",
            "num=3",
            "--api-key",
            "cli-key",
            "--base-url",
            &uri,
        ])
    })
    .await
    .unwrap();

    assert!(success, "Search should succeed: {stderr}");
    assert!(stdout.contains("Portland Roasting Coffee"));
    assert!(stdout.contains("Total results:"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_reported_with_hint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(ResponseTemplate::new(200).set_body_string(include_str!("data/error_sample.json")))
        .mount(&server)
        .await;

    let uri = server.uri();
    let (_stdout, stderr, success) = tokio::task::spawn_blocking(move || {
        run_cli_command(&["account", "--api-key", "k", "--base-url", &uri])
    })
    .await
    .unwrap();

    assert!(!success);
    assert!(stderr.contains("Your account credit is too low"));
    assert!(stderr.contains("searches remaining"));
}
