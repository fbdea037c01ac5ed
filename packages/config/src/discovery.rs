//! Settings file discovery.
//!
//! The program directory is checked before the home directory; the first
//! existing file wins.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;
use std::path::{Path, PathBuf};

use crate::types::CONFIG_FILE_NAME;

/// Candidate settings files, in priority order.
#[must_use]
pub fn candidate_config_paths(program_dir: Option<&Path>, home_dir: Option<&Path>) -> Vec<PathBuf> {
    [program_dir, home_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .collect()
}

/// Return the first candidate that exists as a file.
#[must_use]
pub fn discover_config(program_dir: Option<&Path>, home_dir: Option<&Path>) -> Option<PathBuf> {
    let found = candidate_config_paths(program_dir, home_dir)
        .into_iter()
        .find(|path| path.is_file());

    match &found {
        Some(path) => log::debug!("Found settings file {}", path.display()),
        None => log::debug!("No {CONFIG_FILE_NAME} file found"),
    }

    found
}

/// Directory containing the running executable.
#[must_use]
pub fn program_dir() -> Option<PathBuf> {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Discover a settings file in the program and home directories.
#[must_use]
pub fn discover_default_config() -> Option<PathBuf> {
    discover_config(program_dir().as_deref(), dirs::home_dir().as_deref())
}
