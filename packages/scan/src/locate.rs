//! Locating the `DICOM` directory on a disc or in a folder.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::ScanError;

const DICOM_DIR_NAME: &str = "dicom";

/// Find the directory to scan below `root`.
///
/// `root` itself is used when it is named `DICOM` (any case). Otherwise the
/// shallowest descendant directory with that name wins; siblings are taken
/// in name order.
///
/// # Errors
///
/// * If `root` is not a directory
/// * If no `DICOM` directory exists
pub fn find_dicom_folder(root: &Path) -> Result<PathBuf, ScanError> {
    if !root.is_dir() {
        return Err(ScanError::InvalidRoot {
            path: root.to_path_buf(),
        });
    }

    if root.file_name().is_some_and(is_dicom_dir_name) {
        log::debug!("Selected folder is the DICOM folder: {}", root.display());
        return Ok(root.to_path_buf());
    }

    let found = jwalk::WalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.depth > 0 && entry.file_type().is_dir())
        .filter(|entry| is_dicom_dir_name(entry.file_name()))
        .min_by_key(|entry| entry.depth)
        .map(|entry| entry.path());

    match found {
        Some(folder) => {
            log::info!("DICOM folder found: {}", folder.display());
            Ok(folder)
        }
        None => Err(ScanError::DicomFolderNotFound {
            root: root.to_path_buf(),
        }),
    }
}

/// Whether a directory name is `DICOM`, ignoring case.
#[must_use]
pub fn is_dicom_dir_name(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|n| n.eq_ignore_ascii_case(DICOM_DIR_NAME))
}
