//! Display settings resolution: optional JSON file, then command-line
//! overrides on top.

use std::path::Path;

use anyhow::{Context, Result};
use calc_core::FormatSettings;
use tracing::info;

/// Build the effective settings from `--settings` and `--precision`.
pub fn load_settings(path: Option<&Path>, precision: Option<u32>) -> Result<FormatSettings> {
    let mut settings = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings file `{}`", path.display()))?;
            let settings = FormatSettings::from_json(&json)?;
            info!(path = %path.display(), "loaded display settings");
            settings
        }
        None => FormatSettings::default(),
    };

    if let Some(digits) = precision {
        settings = settings.with_significant_digits(digits);
        settings.validate()?;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calc_core::CalcError;

    #[test]
    fn test_defaults_without_file() {
        let settings = load_settings(None, None).unwrap();
        assert_eq!(settings, FormatSettings::default());
    }

    #[test]
    fn test_file_then_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"significant_digits": 4, "thousands_separator": true}"#).unwrap();

        let settings = load_settings(Some(&path), None).unwrap();
        assert_eq!(settings.significant_digits, 4);
        assert!(settings.thousands_separator);

        let settings = load_settings(Some(&path), Some(10)).unwrap();
        assert_eq!(settings.significant_digits, 10);
        assert!(settings.thousands_separator);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings(Some(&dir.path().join("nope.json")), None).unwrap_err();
        assert!(err.to_string().contains("failed to read settings file"));
    }

    #[test]
    fn test_bad_precision() {
        let err = load_settings(None, Some(0)).unwrap_err();
        let calc = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ significant_digits: ").unwrap();

        let err = load_settings(Some(&path), None).unwrap_err();
        let calc = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc.error_code(), "SERIALIZATION_ERROR");
    }
}
