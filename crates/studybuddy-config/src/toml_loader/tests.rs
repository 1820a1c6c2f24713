//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_studybuddy_config.toml"));
    assert!(matches!(
        result.unwrap_err(),
        studybuddy_common::ConfigError::FileNotFound(_)
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[model]
name = "gemini-1.5-pro"

[generation]
temperature = 0.2
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.model.name, "gemini-1.5-pro");
    assert_eq!(config.generation.temperature, 0.2);
    // Defaults preserved
    assert_eq!(config.generation.top_k, 40);
    assert_eq!(config.generation.max_output_tokens, 8192);
    assert!(config.persona.welcome_message.starts_with("Hi there!"));
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, studybuddy_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_is_returned_as_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[generation]
temperature = 9.0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.generation.temperature, 9.0);
}

#[test]
fn load_or_create_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("studybuddy").join("config.toml");

    let config = load_or_create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(config.model.name, "gemini-2.0-flash");

    let reloaded = load_from_path(&path).unwrap();
    assert_eq!(reloaded.generation.top_p, 0.95);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::StudyBuddyConfig;

    let config: StudyBuddyConfig = toml::from_str(&default_config_toml()).unwrap();
    assert_eq!(config.model.name, "gemini-2.0-flash");
    assert_eq!(config.generation.response_mime_type, "text/plain");
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("studybuddy"));
        assert!(path_str.ends_with("config.toml"));
    }
}
