// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::super::*;
use std::fs;
use tempfile::TempDir;

/// Helper to write a config file into a fresh temp dir
fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ui.json");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_keeps_key_order() {
    let (_temp_dir, path) = write_config(
        r#"{"title": "Demo", "items": [{"type": "Button"}], "width": "100px"}"#,
    );

    let config = load_widget_config(path.to_str().unwrap()).unwrap();

    let keys: Vec<_> = config.properties().keys().cloned().collect();
    assert_eq!(keys, vec!["title", "items", "width"]);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let result = load_widget_config(path.to_str().unwrap());

    assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
}

#[test]
fn test_load_invalid_json_reports_path() {
    let (_temp_dir, path) = write_config("{\"items\": [");

    match load_widget_config(path.to_str().unwrap()) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_load_rejects_non_object_root() {
    let (_temp_dir, path) = write_config(r#"[{"type": "Button"}]"#);

    let result = load_widget_config(path.to_str().unwrap());

    assert!(matches!(result, Err(ConfigError::NotAnObject("array"))));
}

#[test]
fn test_load_expands_environment_variables() {
    let (temp_dir, path) = write_config(r#"{"title": "Env"}"#);
    std::env::set_var("UIBOT_TEST_CONFIG_DIR", temp_dir.path());

    let config = load_widget_config("$UIBOT_TEST_CONFIG_DIR/ui.json").unwrap();

    assert!(path.exists());
    assert_eq!(config.get("title"), Some(&serde_json::json!("Env")));
}

#[test]
fn test_undefined_variable_is_invalid_path() {
    let result = expand_path("$UIBOT_TEST_UNDEFINED_VARIABLE/ui.json");
    assert!(matches!(result, Err(ConfigError::InvalidPath { .. })));
}

#[test]
fn test_parse_widget_config() {
    let config = parse_widget_config(r#"{"type": "Label", "text": "hi"}"#).unwrap();
    assert_eq!(config.widget_type(DEFAULT_TYPE_KEY), Some("Label"));

    assert!(matches!(parse_widget_config("42"), Err(ConfigError::NotAnObject("number"))));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_write_output_creates_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("snapshot.json");

    write_output(&path, "{\"type\": \"Application\"}\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"type\": \"Application\"}\n");
}

#[test]
fn test_write_output_replaces_existing_content() {
    let (_temp_dir, path) = write_config("old content that is longer than the new one");

    write_output(&path, "new").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
}

#[test]
fn test_write_output_into_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("no/such/dir/out.json");

    let result = write_output(&path, "{}");

    assert!(matches!(result, Err(ConfigError::WriteFailed(_))));
    assert!(!path.exists());
}
