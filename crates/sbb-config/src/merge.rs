//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules and resolving paths.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, RetrySettings, SearchSettings,
    parse::{RawConfig, RawIndexSettings, RawRetrySettings, RawSearchSettings},
    resolve::resolve_file_path,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config). For every scalar the first file that defines it
/// wins. `api_key_file` resolves relative to the file that sets it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut index = IndexSettings::default();
    let mut search = SearchSettings::default();
    let mut retry = RetrySettings::default();

    // Lowest precedence first so closer files overwrite
    for parsed in configs.iter().rev() {
        if let Some(ref raw) = parsed.config.index {
            apply_raw_index(&mut index, raw, parsed.dir())?;
        }
        if let Some(ref raw) = parsed.config.search {
            apply_raw_search(&mut search, raw);
        }
        if let Some(ref raw) = parsed.config.retry {
            apply_raw_retry(&mut retry, raw);
        }
    }

    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        index,
        search,
        retry,
        config_root,
    })
}

/// Applies raw index settings to result, overwriting any present values.
fn apply_raw_index(
    result: &mut IndexSettings,
    raw: &RawIndexSettings,
    config_dir: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.host {
        result.host = v.clone();
    }
    if let Some(ref v) = raw.api_key_file {
        result.api_key_file = Some(resolve_file_path(v, config_dir)?);
    }
    if let Some(ref v) = raw.name {
        result.name = v.clone();
    }
    if let Some(ref v) = raw.analyzer {
        result.analyzer = v.clone();
    }
    if let Some(v) = raw.timeout_secs {
        result.timeout_secs = v;
    }
    Ok(())
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.page_size {
        result.page_size = v;
    }
    if let Some(v) = raw.max_page_num {
        result.max_page_num = v;
    }
    if let Some(v) = raw.slop {
        result.slop = v;
    }
}

/// Applies raw retry settings to result.
fn apply_raw_retry(result: &mut RetrySettings, raw: &RawRetrySettings) {
    if let Some(v) = raw.count {
        result.count = v;
    }
    if let Some(v) = raw.delay_secs {
        result.delay_secs = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_config;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config(toml).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        let config = merge_configs(&[]).unwrap();
        assert_eq!(config.index.name, "sbb");
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_closest_scalar_wins() {
        let configs = vec![
            parsed("/work/project/.sbb.toml", "[search]\npage_size = 5\n"),
            parsed(
                "/home/user/.sbb.toml",
                "[search]\npage_size = 30\nmax_page_num = 7\n",
            ),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.search.page_size, 5);
        assert_eq!(config.search.max_page_num, 7);
        assert_eq!(config.search.slop, 5);
    }

    #[test]
    fn test_sections_merge_independently() {
        let configs = vec![
            parsed("/a/.sbb.toml", "[index]\nname = \"sbb-test\"\n"),
            parsed("/.sbb.toml", "[index]\nhost = \"https://es:9243\"\n[retry]\ncount = 2\n"),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(config.index.name, "sbb-test");
        assert_eq!(config.index.host, "https://es:9243");
        assert_eq!(config.retry.count, 2);
        assert_eq!(config.retry.delay_secs, 10);
    }

    #[test]
    fn test_api_key_file_relative_to_defining_config() {
        let configs = vec![
            parsed("/a/b/.sbb.toml", "[search]\nslop = 3\n"),
            parsed("/a/.sbb.toml", "[index]\napi_key_file = \"secrets/key.txt\"\n"),
        ];
        let config = merge_configs(&configs).unwrap();
        assert_eq!(
            config.index.api_key_file,
            Some(PathBuf::from("/a/secrets/key.txt"))
        );
        assert_eq!(config.config_root, Some(PathBuf::from("/a/b")));
    }
}
