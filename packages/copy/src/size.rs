//! Folder size estimation used as the progress total.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;
use std::process::Command;

use crate::error::CopyError;

const KILOBYTES_PER_MEGABYTE: u64 = 1024;
const BYTES_PER_MEGABYTE: u64 = 1024 * 1024;

/// Something that can measure a directory tree up front.
pub trait SizeEstimator: Send + Sync {
    /// Size of `path` in bytes, rounded down to whole megabytes.
    ///
    /// # Errors
    ///
    /// * If the size cannot be determined
    fn estimate_bytes(&self, path: &Path) -> Result<u64, CopyError>;
}

/// Estimates sizes with `du -sk`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuSizeEstimator;

impl SizeEstimator for DuSizeEstimator {
    fn estimate_bytes(&self, path: &Path) -> Result<u64, CopyError> {
        log::debug!("Running du -sk {}", path.display());

        let output = Command::new("du")
            .arg("-sk")
            .arg(path)
            .output()
            .map_err(|e| CopyError::SizeEstimationError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(CopyError::SizeEstimationError {
                path: path.to_path_buf(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let kilobytes = parse_du_output(&String::from_utf8_lossy(&output.stdout)).ok_or_else(
            || CopyError::SizeEstimationError {
                path: path.to_path_buf(),
                message: "Unexpected du output".to_string(),
            },
        )?;

        Ok(kilobytes_to_bytes(kilobytes))
    }
}

/// Estimates sizes by summing file lengths with `jwalk`.
///
/// Works where no `du` binary is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkSizeEstimator;

impl SizeEstimator for WalkSizeEstimator {
    fn estimate_bytes(&self, path: &Path) -> Result<u64, CopyError> {
        if !path.is_dir() {
            return Err(CopyError::SizeEstimationError {
                path: path.to_path_buf(),
                message: "Not a directory".to_string(),
            });
        }

        let bytes: u64 = jwalk::WalkDir::new(path)
            .skip_hidden(false)
            .sort(false)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| e.metadata().ok())
            .map(|m| m.len())
            .sum();

        Ok(kilobytes_to_bytes(bytes / 1024))
    }
}

/// Measure `path`, falling back to zero if the estimator fails.
///
/// A zero total means progress is shown as indeterminate.
#[must_use]
pub fn estimate_total_bytes(estimator: &dyn SizeEstimator, path: &Path) -> u64 {
    match estimator.estimate_bytes(path) {
        Ok(bytes) => {
            log::debug!("Estimated {} bytes in {}", bytes, path.display());
            bytes
        }
        Err(e) => {
            log::error!("Error determining folder size: {e}");
            0
        }
    }
}

/// Round a kilobyte count down to whole megabytes, expressed in bytes.
#[must_use]
pub const fn kilobytes_to_bytes(kilobytes: u64) -> u64 {
    (kilobytes / KILOBYTES_PER_MEGABYTE) * BYTES_PER_MEGABYTE
}

/// Extract the kilobyte total from the first line of `du -sk` output.
fn parse_du_output(stdout: &str) -> Option<u64> {
    stdout.split_whitespace().next()?.parse().ok()
}
