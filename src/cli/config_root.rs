//! config_root resolution
//!
//! Resolution priority:
//! 1. --config-root <path> flag (highest priority)
//! 2. $ALTHEA_HOME environment variable
//! 3. Current directory "." (default)

use std::ffi::OsString;
use std::path::PathBuf;

use crate::cli::{Error, Result};

pub const HOME_ENV: &str = "ALTHEA_HOME";

/// Resolve the directory holding `config.toml`
///
/// An explicit path must exist; `$ALTHEA_HOME` is taken as given.
pub fn resolve_config_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    resolve_from(explicit, std::env::var_os(HOME_ENV))
}

fn resolve_from(explicit: Option<PathBuf>, home: Option<OsString>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(Error::InvalidArgs(format!(
                "config root '{}' does not exist",
                path.display()
            )));
        }
        return Ok(path);
    }

    if let Some(home) = home.filter(|home| !home.is_empty()) {
        return Ok(PathBuf::from(home));
    }

    Ok(PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_wins() {
        let temp_dir = TempDir::new().unwrap();
        let explicit = temp_dir.path().to_path_buf();

        let resolved =
            resolve_from(Some(explicit.clone()), Some(OsString::from("/elsewhere"))).unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn test_explicit_nonexistent_fails() {
        let result = resolve_from(Some(PathBuf::from("/nonexistent/althea/12345")), None);
        assert!(matches!(result, Err(Error::InvalidArgs(_))));
    }

    #[test]
    fn test_home_env() {
        let resolved = resolve_from(None, Some(OsString::from("/srv/althea"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/althea"));
    }

    #[test]
    fn test_defaults_to_current() {
        assert_eq!(resolve_from(None, None).unwrap(), PathBuf::from("."));
        assert_eq!(
            resolve_from(None, Some(OsString::new())).unwrap(),
            PathBuf::from(".")
        );
    }
}
