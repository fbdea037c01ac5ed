//! INI settings parser.
//!
//! Reads the `key = value` form with unquoted values:
//!
//! ```ini
//! [settings]
//! destination_path = /srv/pacs/import
//! include_modality = no
//! ```
//!
//! Keys are matched without regard to case. Booleans accept
//! `1`/`yes`/`true`/`on` and `0`/`no`/`false`/`off`.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption, Properties};

use crate::error::ConfigError;
use crate::types::Settings;

const SETTINGS_SECTION: &str = "settings";

/// Parse INI `content` read from `path`.
///
/// A missing `[settings]` section or missing keys keep the defaults.
///
/// # Errors
///
/// * If the content is not valid INI
/// * If a boolean or number cannot be parsed
pub fn parse_ini_settings(path: &Path, content: &str) -> Result<Settings, ConfigError> {
    let options = ParseOption {
        enabled_escape: false,
        ..ParseOption::default()
    };
    let ini = Ini::load_from_str_opt(content, options).map_err(|e| ConfigError::IniParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut settings = Settings::default();
    let Some(section) = ini.section(Some(SETTINGS_SECTION)) else {
        log::debug!("No [{SETTINGS_SECTION}] section in {}", path.display());
        return Ok(settings);
    };

    if let Some(value) = get(section, "destination_path").filter(|v| !v.is_empty()) {
        settings.destination_path = PathBuf::from(value);
    }

    if let Some(value) = get(section, "include_modality") {
        settings.include_modality =
            parse_bool(value).ok_or_else(|| invalid(path, "include_modality", value))?;
    }

    if let Some(value) = get(section, "pacing_ms") {
        settings.pacing_ms = value
            .parse()
            .map_err(|_| invalid(path, "pacing_ms", value))?;
    }

    Ok(settings)
}

fn get<'a>(section: &'a Properties, key: &str) -> Option<&'a str> {
    section
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v.trim())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(path: &Path, key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        path: path.to_path_buf(),
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_unquoted_values() {
        let settings = parse_ini_settings(
            Path::new(".dicom-importer"),
            "[settings]\ndestination_path = /srv/dicom\ninclude_modality = no\npacing_ms = 15\n",
        )
        .unwrap();

        assert_eq!(settings.destination_path, PathBuf::from("/srv/dicom"));
        assert!(!settings.include_modality);
        assert_eq!(settings.pace(), Some(Duration::from_millis(15)));
    }

    #[test]
    fn test_keys_ignore_case_and_comments() {
        let settings = parse_ini_settings(
            Path::new(".dicom-importer"),
            "; archive share\n[settings]\nDestination_Path = /mnt/archive dir\n# done\n",
        )
        .unwrap();

        assert_eq!(settings.destination_path, PathBuf::from("/mnt/archive dir"));
        assert!(settings.include_modality);
    }

    #[test]
    fn test_backslashes_are_kept() {
        let settings = parse_ini_settings(
            Path::new(".dicom-importer"),
            "[settings]\ndestination_path = D:\\Archiv\\DICOM\n",
        )
        .unwrap();

        assert_eq!(settings.destination_path, PathBuf::from("D:\\Archiv\\DICOM"));
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let settings =
            parse_ini_settings(Path::new(".dicom-importer"), "[other]\nkey = value\n").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_invalid_boolean() {
        let err = parse_ini_settings(
            Path::new(".dicom-importer"),
            "[settings]\ninclude_modality = maybe\n",
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref key, .. } if key == "include_modality"
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("OFF"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
