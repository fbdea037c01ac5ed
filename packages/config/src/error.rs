//! Error types for configuration loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to parse INI configuration.
    #[error("Failed to parse INI config {}: {source}", path.display())]
    IniParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying INI error.
        #[source]
        source: ini::ParseError,
    },

    /// A setting has a value of the wrong kind.
    #[error("Invalid value '{value}' for {key} in {}", path.display())]
    InvalidValue {
        /// Path to the file holding the value.
        path: PathBuf,
        /// Setting name.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// Invalid configuration path.
    #[error("Invalid config path: {}", .0.display())]
    InvalidPath(PathBuf),
}
