//! Error types for import operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing an import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Scanning the source failed.
    #[error("Scan error: {0}")]
    ScanError(#[from] dicom_importer_scan::ScanError),

    /// Copy preconditions failed.
    #[error("Copy error: {0}")]
    CopyError(#[from] dicom_importer_copy::CopyError),

    /// Free space of the destination volume could not be read.
    #[error("Failed to read disk usage of {}: {source}", path.display())]
    DiskUsageError {
        /// The queried path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
