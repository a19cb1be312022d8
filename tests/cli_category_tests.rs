//! End-to-end tests for `fridgify category` commands.

mod fixtures;
use fixtures::*;

// ============================================================================
// List Command Tests
// ============================================================================

#[test]
fn test_category_list_empty() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["category", "list"], 0);

    assert!(
        stdout(&output).contains("No categories defined"),
        "Output should indicate no categories"
    );
}

#[test]
fn test_category_list_json_counts() {
    let env = TestEnv::new();
    env.run_expecting(&["category", "add", "Dairy"], 0);
    env.run_expecting(&["category", "add", "Produce"], 0);
    env.run_expecting(
        &[
            "item", "add", "--category", "Dairy", "--name", "Milk", "--quantity", "2",
            "--expires", "2024-01-01", "--no-image",
        ],
        0,
    );

    let json = env.run_json(&["category", "list", "--json"]);

    assert_eq!(json["count"], 2);
    assert_eq!(json["categories"][0]["label"], "Dairy");
    assert_eq!(json["categories"][0]["item_count"], 1);
    assert_eq!(json["categories"][0]["expired_count"], 1);
    assert_eq!(json["categories"][1]["label"], "Produce");
    assert_eq!(json["categories"][1]["item_count"], 0);
}

// ============================================================================
// Add Command Tests
// ============================================================================

#[test]
fn test_category_add_persists() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["category", "add", "Dairy"], 0);
    assert!(stdout(&output).contains("Category 'Dairy' added"));

    assert!(env.data_dir().join("categories.json").exists());
    assert!(env.data_dir().join("items.json").exists());

    let json = env.run_json(&["category", "list", "--json"]);
    assert_eq!(json["count"], 1);
}

#[test]
fn test_category_add_duplicate_is_noop() {
    let env = TestEnv::new();
    env.run_expecting(&["category", "add", "Dairy"], 0);
    let output = env.run_expecting(&["category", "add", "Dairy"], 0);

    assert!(stdout(&output).contains("already exists"));
    let json = env.run_json(&["category", "list", "--json"]);
    assert_eq!(json["count"], 1);
}

#[test]
fn test_category_add_empty_is_noop() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["category", "add", ""], 0);

    assert!(stdout(&output).contains("nothing changed"));
    let json = env.run_json(&["category", "list", "--json"]);
    assert_eq!(json["count"], 0);
}

// ============================================================================
// Remove Command Tests
// ============================================================================

#[test]
fn test_category_remove_deletes_items() {
    let env = TestEnv::new();
    env.run_expecting(&["category", "add", "Dairy"], 0);
    env.run_expecting(
        &[
            "item", "add", "-c", "Dairy", "-n", "Milk", "-e", "2030-01-01", "--no-image",
        ],
        0,
    );

    let output = env.run_expecting(&["category", "remove", "Dairy"], 0);
    assert!(stdout(&output).contains("1 item deleted"));

    let json = env.run_json(&["item", "list", "--json"]);
    assert_eq!(json["count"], 0);
    let json = env.run_json(&["category", "list", "--json"]);
    assert_eq!(json["count"], 0);
}

#[test]
fn test_category_remove_missing_is_noop() {
    let env = TestEnv::new();
    let output = env.run_expecting(&["category", "remove", "Frozen"], 0);

    assert!(stdout(&output).contains("not found"));
}

#[test]
fn test_corrupt_storage_is_io_error() {
    let env = TestEnv::new();
    std::fs::write(env.data_dir().join("categories.json"), "{not json").unwrap();

    let output = env.run_expecting(&["category", "list"], 2);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("categories"), "stderr: {stderr}");
}
