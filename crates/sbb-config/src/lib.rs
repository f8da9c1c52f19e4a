//! Configuration system for sbb.
//!
//! sbb uses TOML configuration files named `.sbb.toml`. Configuration is resolved by walking up
//! the directory tree from the current working directory, collecting any `.sbb.toml` files found,
//! then loading `~/.sbb.toml` as the global config with lowest precedence. `SBB_*` environment
//! variables override all files.

#![warn(missing_docs)]

mod discovery;
mod env;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path};
pub use env::{
    ENV_INDEX_ANALYZER, ENV_INDEX_API_KEY_FILE, ENV_INDEX_HOST, ENV_INDEX_NAME,
    ENV_INDEX_TIMEOUT_SECS, ENV_MAX_PAGE_NUM, ENV_PAGE_SIZE, ENV_RETRY_COUNT,
    ENV_RETRY_DELAY_SECS,
};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawRetrySettings, RawSearchSettings, parse_config_file,
    parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::local_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sbb.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Index service connection settings.
    pub index: IndexSettings,
    /// Search and pagination settings.
    pub search: SearchSettings,
    /// Write retry settings.
    pub retry: RetrySettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sbb.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.sbb.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.sbb.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Environment overrides are not applied; see [`Config::with_env_overrides`].
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Applies `SBB_*` overrides read through `lookup`.
    ///
    /// Pass `|var| std::env::var(var).ok()` to read the process environment. A relative
    /// `SBB_INDEX_API_KEY_FILE` resolves against `cwd`.
    pub fn with_env_overrides<F>(mut self, cwd: &Path, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        env::apply_env_overrides(&mut self, cwd, lookup)?;
        Ok(self)
    }

    /// Reads the API key from the configured key file.
    ///
    /// Returns `Ok(None)` when no key file is configured. Surrounding whitespace is trimmed;
    /// an empty file counts as no key.
    pub fn api_key(&self) -> Result<Option<String>, ConfigError> {
        let Some(path) = &self.index.api_key_file else {
            return Ok(None);
        };
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadApiKey {
            path: path.clone(),
            source,
        })?;
        let key = contents.trim();
        Ok((!key.is_empty()).then(|| key.to_string()))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.sbb.toml` file. The key file path is shown
    /// resolved; the key itself is never read.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableSettings {
            index: &self.index,
            search: &self.search,
            retry: &self.retry,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Index service connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct IndexSettings {
    /// Base URL of the service, e.g. `https://host:9243`.
    pub host: String,
    /// Resolved path of the file holding the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_file: Option<PathBuf>,
    /// Index holding puzzle and clue documents.
    pub name: String,
    /// Analyzer applied to search input.
    pub analyzer: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl IndexSettings {
    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            host: String::from("http://127.0.0.1:9200"),
            api_key_file: None,
            name: String::from("sbb"),
            analyzer: String::from("search_analyser"),
            timeout_secs: 10,
        }
    }
}

/// Search and pagination settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Results per page.
    pub page_size: usize,
    /// Highest page number that offers a next page.
    pub max_page_num: u32,
    /// Positional slop for unquoted-word span matching.
    pub slop: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            page_size: 20,
            max_page_num: 50,
            slop: 5,
        }
    }
}

/// Write retry settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Attempts per document write.
    pub count: u32,
    /// Pause between attempts in seconds.
    pub delay_secs: u64,
}

impl RetrySettings {
    /// Delay as a `Duration`.
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            count: 5,
            delay_secs: 10,
        }
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Index section.
    index: &'a IndexSettings,
    /// Search section.
    search: &'a SearchSettings,
    /// Retry section.
    retry: &'a RetrySettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.index.host, "http://127.0.0.1:9200");
        assert_eq!(config.index.name, "sbb");
        assert_eq!(config.index.analyzer, "search_analyser");
        assert_eq!(config.index.timeout(), Duration::from_secs(10));
        assert_eq!(config.search.page_size, 20);
        assert_eq!(config.search.max_page_num, 50);
        assert_eq!(config.search.slop, 5);
        assert_eq!(config.retry.count, 5);
        assert_eq!(config.retry.delay(), Duration::from_secs(10));
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_api_key_unset() {
        assert_eq!(Config::default().api_key().unwrap(), None);
    }

    #[test]
    fn test_api_key_trimmed() {
        let dir = TestDir::new();
        let key = dir.key_file("key.txt", "  c2VjcmV0");
        let mut config = Config::default();
        config.index.api_key_file = Some(key);
        assert_eq!(config.api_key().unwrap().as_deref(), Some("c2VjcmV0"));
    }

    #[test]
    fn test_api_key_missing_file_is_error() {
        let dir = TestDir::new();
        let mut config = Config::default();
        config.index.api_key_file = Some(dir.path().join("missing"));
        assert!(matches!(
            config.api_key(),
            Err(ConfigError::ReadApiKey { .. })
        ));
    }

    #[test]
    fn test_with_env_overrides() {
        let config = Config::default()
            .with_env_overrides(Path::new("/"), |var| {
                (var == ENV_PAGE_SIZE).then(|| "3".to_string())
            })
            .unwrap();
        assert_eq!(config.search.page_size, 3);
    }

    #[test]
    fn test_settings_to_toml() {
        let toml = Config::default().settings_to_toml();

        assert!(toml.contains("[index]"));
        assert!(toml.contains("[search]"));
        assert!(toml.contains("[retry]"));
        assert!(toml.contains("page_size = 20"));
        assert!(toml.contains("name = \"sbb\""));
        assert!(!toml.contains("api_key_file"));

        let parsed: RawConfig =
            toml::from_str(&toml).expect("settings_to_toml should produce a valid config");
        assert_eq!(parsed.search.unwrap().max_page_num, Some(50));
    }
}
