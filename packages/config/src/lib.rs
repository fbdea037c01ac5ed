//! Configuration loading for dicom-importer.
//!
//! Settings live in a file named `.dicom-importer`, looked up next to the
//! executable first and in the home directory second. The file is TOML or
//! INI with unquoted values:
//!
//! ```toml
//! [settings]
//! destination_path = "/srv/pacs/import"
//! include_modality = true
//! pacing_ms = 0
//! ```
//!
//! ```ini
//! [settings]
//! destination_path = /srv/pacs/import
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use dicom_importer_config::resolve_settings;
//!
//! let loaded = resolve_settings(None)?;
//! println!("Destination: {}", loaded.settings.destination_path.display());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod ini_loader;
mod toml_loader;
mod types;

pub use discovery::{candidate_config_paths, discover_config, discover_default_config, program_dir};
pub use error::ConfigError;
pub use toml_loader::load_settings;
pub use types::{
    CONFIG_FILE_NAME, ConfigFile, DEFAULT_DESTINATION_PATH, LoadedSettings, Settings,
};

use std::path::Path;

/// Resolve the effective settings.
///
/// An explicit path must load. A discovered file that fails to load is
/// logged and replaced by defaults.
///
/// # Arguments
///
/// * `explicit` - Settings file given on the command line, if any
///
/// # Errors
///
/// * If `explicit` is given and cannot be loaded
pub fn resolve_settings(explicit: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    if let Some(path) = explicit {
        let settings = load_settings(path)?;
        log::info!("Using config file {}", path.display());
        return Ok(LoadedSettings {
            settings,
            config_path: Some(path.to_path_buf()),
        });
    }

    Ok(resolve_discovered(discover_default_config().as_deref()))
}

/// Load `discovered` if present, falling back to defaults on any failure.
#[must_use]
pub fn resolve_discovered(discovered: Option<&Path>) -> LoadedSettings {
    let Some(path) = discovered else {
        log::info!(
            "No config file found, destination path: {}",
            DEFAULT_DESTINATION_PATH
        );
        return LoadedSettings {
            settings: Settings::default(),
            config_path: None,
        };
    };

    match load_settings(path) {
        Ok(settings) => {
            log::info!(
                "Using config file {}, destination path: {}",
                path.display(),
                settings.destination_path.display()
            );
            LoadedSettings {
                settings,
                config_path: Some(path.to_path_buf()),
            }
        }
        Err(e) => {
            log::error!(
                "Could not read destination path from {}, using {}: {e}",
                path.display(),
                DEFAULT_DESTINATION_PATH
            );
            LoadedSettings {
                settings: Settings::default(),
                config_path: None,
            }
        }
    }
}
