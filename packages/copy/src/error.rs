//! Error types for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

/// Errors that can occur during copy operations.
#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    /// Source does not exist or is not a directory.
    #[error("Source is not a directory: {}", path.display())]
    SourceNotDirectory {
        /// The source path.
        path: PathBuf,
    },

    /// Destination folder already exists.
    #[error("Destination already exists: {}", path.display())]
    DestinationExists {
        /// The destination path.
        path: PathBuf,
    },

    /// Destination parent is missing or not writable.
    #[error("Destination is not writable: {}", path.display())]
    DestinationNotWritable {
        /// The directory that would receive the destination folder.
        path: PathBuf,
    },

    /// Failed to create target directory.
    #[error("Failed to create directory {}: {io_error}", path.display())]
    CreateDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to copy a file.
    #[error("Failed to copy {} to {}: {io_error}", source_path.display(), target_path.display())]
    FileCopyError {
        /// Source file path.
        source_path: PathBuf,
        /// Target file path.
        target_path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Failed to get file metadata.
    #[error("Failed to get metadata for {}: {io_error}", path.display())]
    MetadataError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("Failed to enumerate directory {}: {message}", path.display())]
    EnumerationError {
        /// The directory path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Entry is neither a regular file, a symlink nor a directory.
    #[error("Unsupported file type: {}", path.display())]
    UnsupportedFileType {
        /// The entry path.
        path: PathBuf,
    },

    /// Folder size could not be determined.
    #[error("Failed to estimate size of {}: {message}", path.display())]
    SizeEstimationError {
        /// The measured directory.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Failed to remove a partially written destination.
    #[error("Failed to remove {}: {io_error}", path.display())]
    RemoveError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        io_error: std::io::Error,
    },
}

impl CopyError {
    /// Whether this error was raised before any copy work started.
    #[must_use]
    pub const fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::SourceNotDirectory { .. }
                | Self::DestinationExists { .. }
                | Self::DestinationNotWritable { .. }
        )
    }
}
