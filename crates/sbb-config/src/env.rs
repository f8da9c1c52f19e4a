//! Environment variable overrides.
//!
//! `SBB_*` variables take precedence over every config file. Overrides are read through a
//! lookup function so tests never touch the process environment.

use std::{path::Path, str::FromStr};

use crate::{Config, ConfigError, resolve::resolve_file_path};

/// Index service base URL.
pub const ENV_INDEX_HOST: &str = "SBB_INDEX_HOST";
/// API key file path.
pub const ENV_INDEX_API_KEY_FILE: &str = "SBB_INDEX_API_KEY_FILE";
/// Index name.
pub const ENV_INDEX_NAME: &str = "SBB_INDEX_NAME";
/// Search analyzer name.
pub const ENV_INDEX_ANALYZER: &str = "SBB_INDEX_ANALYZER";
/// Request timeout in seconds.
pub const ENV_INDEX_TIMEOUT_SECS: &str = "SBB_INDEX_TIMEOUT_SECS";
/// Results per page.
pub const ENV_PAGE_SIZE: &str = "SBB_PAGE_SIZE";
/// Page number ceiling.
pub const ENV_MAX_PAGE_NUM: &str = "SBB_MAX_PAGE_NUM";
/// Attempts per write.
pub const ENV_RETRY_COUNT: &str = "SBB_RETRY_COUNT";
/// Delay between write attempts in seconds.
pub const ENV_RETRY_DELAY_SECS: &str = "SBB_RETRY_DELAY_SECS";

/// Applies overrides from `lookup` to `config`.
///
/// Relative key file paths resolve against `cwd`. Empty values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, cwd: &Path, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_INDEX_HOST) {
        config.index.host = v;
    }
    if let Some(v) = get(ENV_INDEX_API_KEY_FILE) {
        config.index.api_key_file = Some(resolve_file_path(v.trim(), cwd)?);
    }
    if let Some(v) = get(ENV_INDEX_NAME) {
        config.index.name = v;
    }
    if let Some(v) = get(ENV_INDEX_ANALYZER) {
        config.index.analyzer = v;
    }
    if let Some(v) = get(ENV_INDEX_TIMEOUT_SECS) {
        config.index.timeout_secs = parse_number(ENV_INDEX_TIMEOUT_SECS, &v)?;
    }
    if let Some(v) = get(ENV_PAGE_SIZE) {
        config.search.page_size = parse_number(ENV_PAGE_SIZE, &v)?;
    }
    if let Some(v) = get(ENV_MAX_PAGE_NUM) {
        config.search.max_page_num = parse_number(ENV_MAX_PAGE_NUM, &v)?;
    }
    if let Some(v) = get(ENV_RETRY_COUNT) {
        config.retry.count = parse_number(ENV_RETRY_COUNT, &v)?;
    }
    if let Some(v) = get(ENV_RETRY_DELAY_SECS) {
        config.retry.delay_secs = parse_number(ENV_RETRY_DELAY_SECS, &v)?;
    }
    Ok(())
}

/// Parses a numeric override.
fn parse_number<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::PathBuf};

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn no_overrides_leaves_config_alone() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, Path::new("/"), lookup(&[])).unwrap();
        assert_eq!(config.search.page_size, 20);
        assert_eq!(config.index.host, "http://127.0.0.1:9200");
    }

    #[test]
    fn overrides_every_section() {
        let mut config = Config::default();
        apply_env_overrides(
            &mut config,
            Path::new("/work"),
            lookup(&[
                (ENV_INDEX_HOST, "https://es.example.com:9243"),
                (ENV_INDEX_API_KEY_FILE, "key.txt"),
                (ENV_INDEX_NAME, "sbb-staging"),
                (ENV_INDEX_TIMEOUT_SECS, "3"),
                (ENV_PAGE_SIZE, " 2 "),
                (ENV_MAX_PAGE_NUM, "4"),
                (ENV_RETRY_COUNT, "1"),
                (ENV_RETRY_DELAY_SECS, "0"),
            ]),
        )
        .unwrap();
        assert_eq!(config.index.host, "https://es.example.com:9243");
        assert_eq!(config.index.api_key_file, Some(PathBuf::from("/work/key.txt")));
        assert_eq!(config.index.name, "sbb-staging");
        assert_eq!(config.index.analyzer, "search_analyser");
        assert_eq!(config.index.timeout_secs, 3);
        assert_eq!(config.search.page_size, 2);
        assert_eq!(config.search.max_page_num, 4);
        assert_eq!(config.retry.count, 1);
        assert_eq!(config.retry.delay_secs, 0);
    }

    #[test]
    fn empty_value_is_ignored() {
        let mut config = Config::default();
        apply_env_overrides(&mut config, Path::new("/"), lookup(&[(ENV_PAGE_SIZE, "")])).unwrap();
        assert_eq!(config.search.page_size, 20);
    }

    #[test]
    fn bad_number_is_an_error() {
        let mut config = Config::default();
        let err = apply_env_overrides(
            &mut config,
            Path::new("/"),
            lookup(&[(ENV_RETRY_COUNT, "many")]),
        )
        .unwrap_err();
        match err {
            ConfigError::InvalidEnv { var, value } => {
                assert_eq!(var, ENV_RETRY_COUNT);
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
