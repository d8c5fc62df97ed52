use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::{contains, is_empty};
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "test-key";

const CATALOG: &str = r#"[
  {"name": "Novel", "category": "Books", "price": 12.0, "rating": 4.1, "in_stock": true},
  {"name": "Science Novel", "category": "Books", "price": 18.5, "rating": 4.3, "in_stock": false},
  {"name": "Wireless Headphones", "category": "Electronics", "price": 89.99, "rating": 4.3, "in_stock": true}
]"#;

/// Strips inherited configuration and runs inside `dir` so no stray `.env` is read.
fn isolate(mut cmd: Command, dir: &Path) -> Command {
    cmd.current_dir(dir)
        .env_remove("OPENAI_API_KEY")
        .env_remove("LT_MODEL")
        .env_remove("LT_TRANSCRIPTION_MODEL")
        .env_remove("LT_BASE_URL")
        .env_remove("LT_TIMEOUT")
        .env_remove("LT_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

macro_rules! tool_cmd {
    ($bin:literal, $dir:expr) => {
        isolate(Command::new(assert_cmd::cargo::cargo_bin!($bin)), $dir)
    };
}

fn parse_stdout_json(output: &[u8]) -> Value {
    let text = String::from_utf8(output.to_vec()).expect("stdout should be utf-8");
    serde_json::from_str(text.trim()).expect("stdout should contain valid JSON")
}

fn chat_reply(content: &str) -> Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

fn scratch_dir() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn product_search_missing_catalog_fails_before_credentials() {
    let dir = scratch_dir();

    tool_cmd!("product-search", dir.path())
        .env("LT_BASE_URL", "http://127.0.0.1:9")
        .write_stdin("cheap books\nquit\n")
        .assert()
        .failure()
        .code(1)
        .stderr(
            contains("Catalog file 'products.json' not found")
                .and(contains("OPENAI_API_KEY").not()),
        );
}

#[test]
fn product_search_rejects_malformed_catalog() {
    let dir = scratch_dir();
    fs::write(dir.path().join("products.json"), "{\"name\": ").expect("catalog");

    tool_cmd!("product-search", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .assert()
        .failure()
        .stderr(contains("Invalid JSON in catalog file"));
}

#[test]
fn product_search_requires_api_key_after_catalog_loads() {
    let dir = scratch_dir();
    fs::write(dir.path().join("products.json"), CATALOG).expect("catalog");

    tool_cmd!("product-search", dir.path())
        .assert()
        .failure()
        .stderr(contains("OPENAI_API_KEY not found").and(contains("Create a .env file")));
}

#[test]
fn product_search_reads_key_from_dotfile() {
    let dir = scratch_dir();
    fs::write(dir.path().join("products.json"), CATALOG).expect("catalog");
    fs::write(dir.path().join(".env"), format!("OPENAI_API_KEY={TEST_KEY}\n")).expect("dotfile");

    tool_cmd!("product-search", dir.path())
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(contains("Thanks for using the Product Search System!"));
}

#[test]
fn product_search_exits_on_end_of_input() {
    let dir = scratch_dir();
    let catalog = dir.path().join("shop.json");
    fs::write(&catalog, CATALOG).expect("catalog");

    tool_cmd!("product-search", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .arg("--catalog")
        .arg(&catalog)
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(contains("Please enter a search query.").and(contains("Thanks for using")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn product_search_applies_model_filters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {
                            "name": "filter_products",
                            "arguments": "{\"category\": \"Books\", \"in_stock\": true}"
                        }
                    }]
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = scratch_dir();
    fs::write(dir.path().join("products.json"), CATALOG).expect("catalog");

    tool_cmd!("product-search", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .env("LT_BASE_URL", server.uri())
        .write_stdin("books I can buy today\nexit\n")
        .assert()
        .success()
        .stdout(
            contains("Found 1 matching product(s):")
                .and(contains("1. Novel"))
                .and(contains("Science Novel").not()),
        );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn product_search_degrades_to_no_results_on_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let dir = scratch_dir();
    fs::write(dir.path().join("products.json"), CATALOG).expect("catalog");

    tool_cmd!("product-search", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .env("LT_BASE_URL", server.uri())
        .write_stdin("anything\nq\n")
        .assert()
        .success()
        .stdout(contains("No products found matching your criteria."))
        .stderr(contains("503"));
}

#[test]
fn audio_analyzer_missing_file_is_fatal() {
    let dir = scratch_dir();

    tool_cmd!("audio-analyzer", dir.path())
        .args(["missing.mp3", "--api-key", TEST_KEY])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("Audio file not found: missing.mp3"));
}

#[test]
fn audio_analyzer_requires_a_file_argument() {
    let dir = scratch_dir();

    tool_cmd!("audio-analyzer", dir.path())
        .assert()
        .failure()
        .stderr(contains("AUDIO_FILE"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn audio_analyzer_writes_results_with_fallbacks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "budget review and hiring plans for the next quarter were discussed at length today\n",
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("estimate how long the audio recording was"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("roughly a minute")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("most frequently mentioned topics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply(
            "```json\n[{\"topic\": \"Budget\", \"mentions\": 2}]\n```",
        )))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("concise summary of the following transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("Quarter planning.")))
        .mount(&server)
        .await;

    let dir = scratch_dir();
    fs::write(dir.path().join("meeting.mp3"), b"not really audio").expect("audio");

    tool_cmd!("audio-analyzer", dir.path())
        .env("LT_BASE_URL", server.uri())
        .args(["meeting.mp3", "--api-key", TEST_KEY, "--output-dir", "out"])
        .assert()
        .success()
        .stdout(contains("Quarter planning.").and(contains("\"speaking_speed_wpm\": 150")));

    let mut names: Vec<String> = fs::read_dir(dir.path().join("out"))
        .expect("output dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names.len(), 3);
    assert!(names[0].starts_with("analysis_meeting_") && names[0].ends_with(".json"));
    assert!(names[1].starts_with("summary_meeting_") && names[1].ends_with(".md"));
    assert!(names[2].starts_with("transcription_meeting_") && names[2].ends_with(".md"));

    let analytics: Value = serde_json::from_str(
        &fs::read_to_string(dir.path().join("out").join(&names[0])).expect("analytics file"),
    )
    .expect("analytics JSON");
    assert_eq!(analytics["word_count"], 14);
    assert_eq!(analytics["estimated_duration_minutes"], json!(0.1));
    assert_eq!(analytics["frequently_mentioned_topics"][0]["topic"], "Budget");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn audio_analyzer_aborts_on_transcription_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let dir = scratch_dir();
    fs::write(dir.path().join("call.wav"), b"RIFF").expect("audio");

    tool_cmd!("audio-analyzer", dir.path())
        .env("LT_BASE_URL", server.uri())
        .args(["call.wav", "--api-key", TEST_KEY, "--output-dir", "out"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("API error 401"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn service_analyzer_requires_exactly_one_input() {
    let dir = scratch_dir();

    tool_cmd!("service-analyzer", dir.path())
        .assert()
        .failure()
        .stderr(contains("required"));

    tool_cmd!("service-analyzer", dir.path())
        .args(["--service", "Notion", "--text", "an app"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn service_dry_run_needs_no_api_key() {
    let dir = scratch_dir();

    let assert = tool_cmd!("service-analyzer", dir.path())
        .args(["--service", "Notion", "--dry-run"])
        .assert()
        .success();

    let body = parse_stdout_json(&assert.get_output().stdout);
    assert_eq!(body["dry_run"], Value::Bool(true));
    assert_eq!(body["mode"], "service");
    assert_eq!(body["model"], "gpt-4.1-mini");
    assert_eq!(body["request"]["max_tokens"], 2000);
    let messages = body["request"]["messages"]
        .as_array()
        .expect("messages should be an array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert!(
        messages[1]["content"]
            .as_str()
            .expect("content")
            .contains("Input: \"Notion\"")
    );
}

#[test]
fn service_dry_run_respects_model_precedence() {
    let dir = scratch_dir();

    let from_env = tool_cmd!("service-analyzer", dir.path())
        .env("LT_MODEL", "env-model")
        .args(["--text", "Our app helps students", "--dry-run"])
        .assert()
        .success();
    let body = parse_stdout_json(&from_env.get_output().stdout);
    assert_eq!(body["model"], "env-model");
    assert_eq!(body["mode"], "description");

    let from_cli = tool_cmd!("service-analyzer", dir.path())
        .env("LT_MODEL", "env-model")
        .args(["--text", "Our app helps students", "--model", "cli-model", "--dry-run"])
        .assert()
        .success();
    let body = parse_stdout_json(&from_cli.get_output().stdout);
    assert_eq!(body["model"], "cli-model");
    assert_eq!(body["request"]["model"], "cli-model");
}

#[test]
fn service_dry_run_reads_profile() {
    let dir = scratch_dir();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[profiles.cheap]\nmodel = \"profile-model\"\n").expect("config");

    let assert = tool_cmd!("service-analyzer", dir.path())
        .env("LT_CONFIG", &config)
        .args(["--service", "Slack", "--profile", "cheap", "--dry-run"])
        .assert()
        .success();
    let body = parse_stdout_json(&assert.get_output().stdout);
    assert_eq!(body["model"], "profile-model");
}

#[test]
fn service_missing_profile_is_reported() {
    let dir = scratch_dir();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[profiles.cheap]\nmodel = \"m\"\n").expect("config");

    tool_cmd!("service-analyzer", dir.path())
        .env("LT_CONFIG", &config)
        .args(["--service", "Slack", "--profile", "missing", "--dry-run"])
        .assert()
        .failure()
        .stderr(contains("Profile 'missing' not found"));
}

#[test]
fn service_without_key_is_fatal() {
    let dir = scratch_dir();

    tool_cmd!("service-analyzer", dir.path())
        .args(["--service", "Notion"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("OPENAI_API_KEY not found"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn service_report_is_printed_and_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_reply("# Service Analysis Report: Notion\n\n## Brief History")),
        )
        .mount(&server)
        .await;

    let dir = scratch_dir();

    tool_cmd!("service-analyzer", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .env("LT_BASE_URL", server.uri())
        .args(["-s", "Notion"])
        .assert()
        .success()
        .stdout(
            contains("SERVICE ANALYSIS REPORT")
                .and(contains("# Service Analysis Report: Notion")),
        );

    tool_cmd!("service-analyzer", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .env("LT_BASE_URL", server.uri())
        .args(["-s", "Notion", "-o", "reports/notion.md"])
        .assert()
        .success()
        .stdout(contains("Report saved to: reports/notion.md"));

    let saved = fs::read_to_string(dir.path().join("reports").join("notion.md")).expect("report");
    assert!(saved.starts_with("# Service Analysis Report: Notion"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn service_api_error_becomes_inline_report() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let dir = scratch_dir();

    tool_cmd!("service-analyzer", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .env("LT_BASE_URL", server.uri())
        .args(["--text", "A marketplace for used bikes"])
        .assert()
        .success()
        .stdout(contains("Error analyzing service: API error 500"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn verbose_does_not_leak_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("report")))
        .mount(&server)
        .await;

    let secret = "sk-secret-value";
    let dir = scratch_dir();

    tool_cmd!("service-analyzer", dir.path())
        .env("OPENAI_API_KEY", secret)
        .env("LT_BASE_URL", server.uri())
        .args(["--service", "Notion", "--verbose"])
        .assert()
        .success()
        .stderr(contains("api_key_present: true").and(contains(secret).not()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn quiet_suppresses_progress_logs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_reply("report")))
        .mount(&server)
        .await;

    let dir = scratch_dir();

    tool_cmd!("service-analyzer", dir.path())
        .env("OPENAI_API_KEY", TEST_KEY)
        .env("LT_BASE_URL", server.uri())
        .args(["--service", "Notion", "--quiet"])
        .assert()
        .success()
        .stderr(is_empty());
}

#[test]
fn version_prints_build_metadata() {
    let dir = scratch_dir();
    let checks = [
        tool_cmd!("product-search", dir.path()),
        tool_cmd!("audio-analyzer", dir.path()),
        tool_cmd!("service-analyzer", dir.path()),
        tool_cmd!("lltools", dir.path()),
    ];
    for mut cmd in checks {
        cmd.arg("--version")
            .assert()
            .success()
            .stdout(contains("commit:").and(contains("built:")));
    }
}

#[test]
fn lltools_service_matches_standalone_dry_run() {
    let dir = scratch_dir();

    let assert = tool_cmd!("lltools", dir.path())
        .args(["service", "--service", "Notion", "--dry-run"])
        .assert()
        .success();
    let body = parse_stdout_json(&assert.get_output().stdout);
    assert_eq!(body["mode"], "service");
}

#[test]
fn lltools_completion_bash_outputs_script() {
    let dir = scratch_dir();

    tool_cmd!("lltools", dir.path())
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(contains("_lltools").and(contains("complete")));
}

#[test]
fn lltools_config_check_validates_file() {
    let dir = scratch_dir();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[profiles.fast]\nmodel = \"gpt-4.1-nano\"\n").expect("config");

    tool_cmd!("lltools", dir.path())
        .env("LT_CONFIG", &config)
        .args(["config", "check", "--profile", "fast"])
        .assert()
        .success()
        .stdout(contains("config OK"));

    fs::write(&config, "[profiles.fast\nmodel = ").expect("config");
    tool_cmd!("lltools", dir.path())
        .env("LT_CONFIG", &config)
        .args(["config", "check"])
        .assert()
        .failure()
        .stderr(contains("Failed to parse config file"));
}
