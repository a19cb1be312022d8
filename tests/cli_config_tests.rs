//! End-to-end tests for `fridgify config` commands.

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_default() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["config", "show"], 0);

    let text = stdout(&output);
    assert!(text.contains("Fridgify Configuration"));
    assert!(text.contains("Theme Mode: auto"));
    assert!(text.contains("API Key: (not configured)"));
}

#[test]
fn test_config_show_json_schema() {
    let env = TestEnv::new();
    let json = env.run_json(&["config", "show", "--json"]);

    assert_eq!(json["ui"]["theme"], "auto");
    assert_eq!(json["pixabay"]["api_key_set"], false);
    assert_eq!(json["pixabay"]["base_url"], "https://pixabay.com/api/");
    assert!(json["storage"]["data_dir"].is_string());
    assert!(json["config_file"]
        .as_str()
        .unwrap()
        .ends_with("config.toml"));
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_theme_and_key() {
    let env = TestEnv::new();
    env.run_expecting(
        &["config", "set", "--theme", "Dark", "--api-key", "abc123", "--timeout", "5"],
        0,
    );

    assert!(env.config.path().join("config.toml").exists());

    let json = env.run_json(&["config", "show", "--json"]);
    assert_eq!(json["ui"]["theme"], "dark");
    assert_eq!(json["pixabay"]["api_key_set"], true);
    assert_eq!(json["pixabay"]["timeout_secs"], 5);

    let output = env.run_expecting(&["config", "show"], 0);
    assert!(!stdout(&output).contains("abc123"), "API key must not be printed");
}

#[test]
fn test_config_set_data_dir_is_used() {
    let env = TestEnv::new();
    let data_dir = tempfile::TempDir::new().unwrap();
    env.run_expecting(
        &["config", "set", "--storage-dir", data_dir.path().to_str().unwrap()],
        0,
    );

    // Without --data-dir the configured directory is used
    let output = std::process::Command::new(fridgify_bin())
        .env("FRIDGIFY_CONFIG_DIR", env.config.path())
        .env_remove("FRIDGIFY_DATA_DIR")
        .args(["category", "add", "Dairy"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(data_dir.path().join("categories.json").exists());
}

#[test]
fn test_config_set_invalid_theme() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["config", "set", "--theme", "sepia"], 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid theme mode"));
}

#[test]
fn test_config_set_invalid_base_url() {
    let env = TestEnv::new();
    env.run_expecting(&["config", "set", "--base-url", "ftp://example.com"], 1);
    assert!(!env.config.path().join("config.toml").exists());
}

#[test]
fn test_config_set_zero_timeout() {
    let env = TestEnv::new();
    env.run_expecting(&["config", "set", "--timeout", "0"], 1);
}

#[test]
fn test_config_set_no_values_specified() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["config", "set"], 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("At least one configuration option"));
}
