//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sbb_config::Config;
use sbb_index::{HttpTransport, IndexClient, RetryPolicy, SearchOptions};
use sbb_query::QueryParams;
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration with environment overrides applied (default if no config
    /// files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Connects a client to the configured index service.
    ///
    /// No request is made; a bad host or unreadable key file fails here.
    pub fn client(&self) -> Result<IndexClient<HttpTransport>, ExitCode> {
        let index = &self.config.index;
        let api_key = self.config.api_key().map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        let transport = HttpTransport::new(&index.host, api_key, index.timeout()).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        debug!(host = %index.host, index = %index.name, "index client ready");
        Ok(IndexClient::new(transport, &index.name, &index.analyzer))
    }

    /// Retry policy for writes.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.config.retry.count, self.config.retry.delay())
    }

    /// Paging limits for searches.
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            page_size: self.config.search.page_size,
            max_page_num: self.config.search.max_page_num,
            ..SearchOptions::default()
        }
    }

    /// Query construction parameters.
    pub fn query_params(&self) -> QueryParams {
        QueryParams {
            slop: self.config.search.slop,
            ..QueryParams::default()
        }
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory, then applies `SBB_*` overrides.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd)
        .and_then(|config| config.with_env_overrides(cwd, |var| env::var(var).ok()))
        .map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })
}
