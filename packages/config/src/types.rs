//! Configuration types for dicom-importer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Name of the settings file in the program and home directories.
pub const CONFIG_FILE_NAME: &str = ".dicom-importer";

/// Destination base used when no settings file provides one.
pub const DEFAULT_DESTINATION_PATH: &str = "/tmp";

/// Contents of a settings file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// The `[settings]` table.
    #[serde(default)]
    pub settings: Settings,
}

/// Import settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory that receives one folder per imported study.
    pub destination_path: PathBuf,

    /// Whether the destination folder name ends with the modality.
    pub include_modality: bool,

    /// Pause between copied files, in milliseconds.
    pub pacing_ms: u64,
}

impl Settings {
    /// Pause between copied files, if any.
    #[must_use]
    pub const fn pace(&self) -> Option<Duration> {
        if self.pacing_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.pacing_ms))
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            destination_path: PathBuf::from(DEFAULT_DESTINATION_PATH),
            include_modality: true,
            pacing_ms: 0,
        }
    }
}

/// Settings together with the file they came from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    /// The effective settings.
    pub settings: Settings,
    /// The file that was read, `None` when defaults are in use.
    pub config_path: Option<PathBuf>,
}
