//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The index host is not an http(s) URL.
    HostNotHttp {
        /// Configured host.
        host: String,
    },
    /// The configured API key file does not exist.
    ApiKeyFileMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// No API key file is configured.
    NoApiKey,
    /// `page_size` is zero, so every search returns an empty page.
    ZeroPageSize,
    /// `max_page_num` is zero, so no page offers a next link.
    ZeroMaxPageNum,
    /// `retry.count` is zero, so failed writes are never retried.
    ZeroRetryCount,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostNotHttp { host } => {
                write!(f, "index host is not an http(s) URL: {host}")
            }
            Self::ApiKeyFileMissing { path } => {
                write!(f, "API key file does not exist: {path}")
            }
            Self::NoApiKey => write!(f, "no API key file configured, requests are unauthenticated"),
            Self::ZeroPageSize => write!(f, "search.page_size is 0"),
            Self::ZeroMaxPageNum => write!(f, "search.max_page_num is 0"),
            Self::ZeroRetryCount => {
                write!(f, "retry.count is 0, writes are sent once and never retried")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let host = config.index.host.trim();
    if !(host.starts_with("http://") || host.starts_with("https://")) {
        warnings.push(ConfigWarning::HostNotHttp {
            host: config.index.host.clone(),
        });
    }

    match &config.index.api_key_file {
        Some(path) if !path.is_file() => warnings.push(ConfigWarning::ApiKeyFileMissing {
            path: path.display().to_string(),
        }),
        Some(_) => {}
        None => warnings.push(ConfigWarning::NoApiKey),
    }

    if config.search.page_size == 0 {
        warnings.push(ConfigWarning::ZeroPageSize);
    }
    if config.search.max_page_num == 0 {
        warnings.push(ConfigWarning::ZeroMaxPageNum);
    }
    if config.retry.count == 0 {
        warnings.push(ConfigWarning::ZeroRetryCount);
    }

    warnings
}
