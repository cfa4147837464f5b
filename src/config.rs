use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GitVersionError, Result};

/// Settings that control how a version string is derived from git metadata.
///
/// Every field is optional in a config file; missing keys fall back to the defaults below.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Tags must start with this to count as version tags. Removed from the tag to form the version.
    #[serde(default = "default_version_prefix")]
    pub version_prefix: String,

    /// On a detached HEAD, consult an environment variable before searching branches.
    #[serde(default = "default_fallback_to_branch_name_env")]
    pub fallback_to_branch_name_env: bool,

    /// Returned when neither a version tag nor a branch name can be found.
    #[serde(default = "default_fallback_version")]
    pub fallback_version: String,

    /// Name of the environment variable holding the branch name (Jenkins sets `BRANCH_NAME`).
    #[serde(default = "default_fallback_branch_name_env_name")]
    pub fallback_branch_name_env_name: String,

    /// Appended to versions derived from a branch name.
    #[serde(default = "default_version_from_branch_name_postfix")]
    pub version_from_branch_name_postfix: String,
}

fn default_version_prefix() -> String {
    "v".to_string()
}

fn default_fallback_to_branch_name_env() -> bool {
    true
}

fn default_fallback_version() -> String {
    "unknown".to_string()
}

fn default_fallback_branch_name_env_name() -> String {
    "BRANCH_NAME".to_string()
}

fn default_version_from_branch_name_postfix() -> String {
    "-SNAPSHOT".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_prefix: default_version_prefix(),
            fallback_to_branch_name_env: default_fallback_to_branch_name_env(),
            fallback_version: default_fallback_version(),
            fallback_branch_name_env_name: default_fallback_branch_name_env_name(),
            version_from_branch_name_postfix: default_version_from_branch_name_postfix(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitversion.toml` in current directory
/// 3. `.gitversion.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a custom path is missing, or a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path).map_err(|e| {
            GitVersionError::config(format!("Cannot read config file '{}': {}", path, e))
        })?
    } else if Path::new("./gitversion.toml").exists() {
        fs::read_to_string("./gitversion.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitversion.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML document into a [Config], filling in defaults for absent keys.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| GitVersionError::config(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.version_prefix, "v");
        assert!(config.fallback_to_branch_name_env);
        assert_eq!(config.fallback_version, "unknown");
        assert_eq!(config.fallback_branch_name_env_name, "BRANCH_NAME");
        assert_eq!(config.version_from_branch_name_postfix, "-SNAPSHOT");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        assert_eq!(parse_config("").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_document() {
        let config = parse_config(
            r#"
version_prefix = "release-"
fallback_to_branch_name_env = false
"#,
        )
        .unwrap();
        assert_eq!(config.version_prefix, "release-");
        assert!(!config.fallback_to_branch_name_env);
        assert_eq!(config.fallback_version, "unknown");
    }

    #[test]
    fn test_invalid_document() {
        let err = parse_config("version_prefix = 3").unwrap_err();
        assert!(matches!(err, GitVersionError::Config(_)));
    }
}
