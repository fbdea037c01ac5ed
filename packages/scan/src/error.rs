//! Error types for metadata scanning.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning a folder for patient metadata.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The selected folder does not exist or is not a directory.
    #[error("Not a directory: {}", path.display())]
    InvalidRoot {
        /// The selected path.
        path: PathBuf,
    },

    /// No directory named `DICOM` was found.
    #[error("No 'DICOM' directory found in {}", root.display())]
    DicomFolderNotFound {
        /// The folder that was searched.
        root: PathBuf,
    },

    /// No file in the folder could be read as a DICOM record.
    #[error("No usable DICOM data found in {}", folder.display())]
    NoRecordFound {
        /// The folder that was scanned.
        folder: PathBuf,
    },

    /// A single file could not be read as a DICOM record.
    #[error("Error reading {}: {message}", path.display())]
    ReadRecord {
        /// The file that failed.
        path: PathBuf,
        /// Error message from the parser.
        message: String,
    },
}

impl ScanError {
    /// Whether this is a "nothing usable here" result rather than a fault.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DicomFolderNotFound { .. } | Self::NoRecordFound { .. }
        )
    }
}
