//! Settings file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::ini_loader::parse_ini_settings;
use crate::types::{ConfigFile, Settings};

/// Load a settings file.
///
/// The file is read as TOML first. Content that is not valid TOML is read as
/// INI, so unquoted values such as `destination_path = /srv/dicom` work.
/// Keys missing from the file keep their default values.
///
/// # Arguments
///
/// * `path` - Path to the settings file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file is neither valid TOML nor valid INI
/// * If an INI value has the wrong kind
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    log::debug!("Loading settings from {}", path.display());

    if path.is_dir() {
        return Err(ConfigError::InvalidPath(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let settings = match toml::from_str::<ConfigFile>(&content) {
        Ok(config) => config.settings,
        Err(e) => {
            log::debug!("{} is not TOML ({e}), reading as INI", path.display());
            parse_ini_settings(path, &content)?
        }
    };

    log::debug!("Loaded settings: {settings:?}");

    Ok(settings)
}
