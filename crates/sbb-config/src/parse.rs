//! Configuration file parsing.
//!
//! Parses individual `.sbb.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Index service section.
    pub index: Option<RawIndexSettings>,
    /// Search section.
    pub search: Option<RawSearchSettings>,
    /// Write retry section.
    pub retry: Option<RawRetrySettings>,
}

/// Raw index service settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawIndexSettings {
    /// Base URL of the service.
    pub host: Option<String>,
    /// API key file, relative to the config file.
    pub api_key_file: Option<String>,
    /// Index name.
    pub name: Option<String>,
    /// Analyzer used for search input.
    pub analyzer: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Raw search settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawSearchSettings {
    /// Results per page.
    pub page_size: Option<usize>,
    /// Page number ceiling.
    pub max_page_num: Option<u32>,
    /// Span slop.
    pub slop: Option<u32>,
}

/// Raw retry settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawRetrySettings {
    /// Attempts per write.
    pub count: Option<u32>,
    /// Delay between attempts in seconds.
    pub delay_secs: Option<u64>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
///
/// Useful for validating template content (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.index.is_none());
        assert!(config.search.is_none());
        assert!(config.retry.is_none());
    }

    #[test]
    fn test_parse_index_section() {
        let toml = r#"
[index]
host = "https://search.example.com:9243"
api_key_file = "secrets/key.txt"
name = "sbb2"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let index = config.index.unwrap();
        assert_eq!(index.host.as_deref(), Some("https://search.example.com:9243"));
        assert_eq!(index.api_key_file.as_deref(), Some("secrets/key.txt"));
        assert_eq!(index.name.as_deref(), Some("sbb2"));
        assert!(index.analyzer.is_none());
        assert!(index.timeout_secs.is_none());
    }

    #[test]
    fn test_parse_search_and_retry() {
        let toml = r#"
[search]
page_size = 2
max_page_num = 3

[retry]
count = 6
delay_secs = 0
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        let search = config.search.unwrap();
        assert_eq!(search.page_size, Some(2));
        assert_eq!(search.max_page_num, Some(3));
        assert!(search.slop.is_none());
        let retry = config.retry.unwrap();
        assert_eq!(retry.count, Some(6));
        assert_eq!(retry.delay_secs, Some(0));
    }

    #[test]
    fn test_parse_root() {
        let config = parse_config_str("root = true", Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
    }

    #[test]
    fn test_unknown_key_is_an_error() {
        let result = parse_config_str("[search]\npage = 3\n", Path::new("bad.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let result = parse_config_str("[search]\npage_size = \"ten\"\n", Path::new("bad.toml"));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }
}
