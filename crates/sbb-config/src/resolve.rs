//! Path resolution for file references in configuration.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves a path from a config file or override to an absolute-ish path.
///
/// - Tilde paths (`~/keys/es.txt`) expand to the home directory
/// - Relative paths resolve against `base_dir`
/// - Absolute paths are returned unchanged
///
/// The file is not required to exist; `Config::validate` reports missing files.
pub fn resolve_file_path(path: &str, base_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(base_dir.join(expanded))
    }
}

/// Expands a leading `~` to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_joins_base_dir() {
        let resolved = resolve_file_path("secrets/key.txt", Path::new("/srv/sbb")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/sbb/secrets/key.txt"));
    }

    #[test]
    fn absolute_path_is_unchanged() {
        let resolved = resolve_file_path("/etc/sbb/key", Path::new("/srv/sbb")).unwrap();
        assert_eq!(resolved, PathBuf::from("/etc/sbb/key"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = home_dir().unwrap();
        let resolved = resolve_file_path("~/key.txt", Path::new("/srv/sbb")).unwrap();
        assert_eq!(resolved, home.join("key.txt"));
        assert_eq!(resolve_file_path("~", Path::new("/srv")).unwrap(), home);
    }

    #[test]
    fn tilde_inside_name_is_literal() {
        let resolved = resolve_file_path("a~/b", Path::new("/srv")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/a~/b"));
    }
}
