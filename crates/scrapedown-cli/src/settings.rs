//! Persisted conversion settings, stored as JSON in the user config directory.

use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result, WrapErr};
use scrapedown::ConversionOptions;
use tracing::debug;

const APP_DIR: &str = "scrapedown";
const SETTINGS_FILE: &str = "settings.json";

/// `<config dir>/scrapedown/settings.json`, when the platform has a config dir
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE))
}

/// Load saved settings; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<ConversionOptions> {
    if !path.exists() {
        debug!(path = %path.display(), "no saved settings, using defaults");
        return Ok(ConversionOptions::default());
    }

    let raw = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read settings from {}", path.display()))?;
    serde_json::from_str(&raw)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid settings file {}", path.display()))
}

/// Save the toggles. The per-run filename is not persisted.
pub fn save(path: &Path, options: &ConversionOptions) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
    }

    let options = ConversionOptions {
        filename: None,
        ..options.clone()
    };
    let json = serde_json::to_string_pretty(&options).into_diagnostic()?;
    fs::write(path, json)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write settings to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let options = load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(options, ConversionOptions::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let options = ConversionOptions {
            include_links: false,
            include_meta: true,
            filename: Some("today".to_string()),
            ..ConversionOptions::default()
        };

        save(&path, &options).unwrap();
        let loaded = load(&path).unwrap();

        assert!(!loaded.include_links);
        assert!(loaded.include_meta);
        assert_eq!(loaded.filename, None);
        assert!(fs::read_to_string(&path).unwrap().contains("\"includeLinks\": false"));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{not json").unwrap();
        assert!(load(&path).is_err());
    }
}
