//! Configuration file location.
//!
//! The config file is looked up in this order:
//!
//! 1. `GADGET_CATALOG_CONFIG`, if set and non-empty
//! 2. `<config dir>/gadget-catalog/config.toml`, where the config dir is the
//!    platform's (`~/.config` on Linux), falling back to `~/.config`
//!
//! A missing file is not an error; callers fall back to defaults.

use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GADGET_CATALOG_CONFIG";

/// Directory name under the platform config dir.
const APP_DIR: &str = "gadget-catalog";

/// Returns the per-user config directory for the catalog.
///
/// `None` if neither a platform config dir nor a home dir can be determined.
#[must_use]
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .map(|dir| dir.join(APP_DIR))
}

/// Resolves the config file path from an explicit override or the default
/// location.
///
/// Split out from [`config_file_path`] so the lookup order can be tested
/// without touching the process environment.
#[must_use]
pub fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
    match explicit.map(str::trim) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => get_config_dir().map(|dir| dir.join("config.toml")),
    }
}

/// Config file path for this process, honoring `GADGET_CATALOG_CONFIG`.
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    let explicit = std::env::var(CONFIG_ENV).ok();
    resolve_config_path(explicit.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_wins() {
        assert_eq!(
            resolve_config_path(Some("/tmp/catalog.toml")),
            Some(PathBuf::from("/tmp/catalog.toml"))
        );
    }

    #[test]
    fn blank_override_uses_default_location() {
        let resolved = resolve_config_path(Some("  "));
        assert_eq!(resolved, resolve_config_path(None));
        if let Some(path) = resolved {
            assert!(path.ends_with("gadget-catalog/config.toml"));
        }
    }
}
