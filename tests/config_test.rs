// tests/config_test.rs
use gitversion::config::{load_config, Config};
use gitversion::GitVersionError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.version_prefix, "v");
    assert!(config.fallback_to_branch_name_env);
    assert_eq!(config.fallback_version, "unknown");
    assert_eq!(config.fallback_branch_name_env_name, "BRANCH_NAME");
    assert_eq!(config.version_from_branch_name_postfix, "-SNAPSHOT");
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
version_prefix = "ver"
fallback_to_branch_name_env = false
fallback_branch_name_env_name = "GIT_BRANCH"
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.version_prefix, "ver");
    assert!(!config.fallback_to_branch_name_env);
    assert_eq!(config.fallback_branch_name_env_name, "GIT_BRANCH");
    // Keys not in the file keep their defaults
    assert_eq!(config.fallback_version, "unknown");
    assert_eq!(config.version_from_branch_name_postfix, "-SNAPSHOT");
}

#[test]
fn test_load_fixture() {
    let config = load_config(Some("tests/fixtures/gitversion.toml"))
        .expect("Failed to load test config");
    assert_eq!(config.version_prefix, "release-");
    assert_eq!(config.fallback_version, "0.0.0-local");
    assert_eq!(config.version_from_branch_name_postfix, ".dev");
    assert!(config.fallback_to_branch_name_env);
}

#[test]
fn test_missing_explicit_path_is_an_error() {
    let err = load_config(Some("tests/fixtures/does-not-exist.toml")).unwrap_err();
    assert!(matches!(err, GitVersionError::Config(_)));
}

#[test]
fn test_malformed_file_is_an_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"version_prefix = [").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path().to_str().unwrap())).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
