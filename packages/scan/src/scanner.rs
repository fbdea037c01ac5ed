//! Reading the patient record of a study.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use crate::error::ScanError;
use crate::locate::find_dicom_folder;
use crate::reader::RecordReader;
use crate::record::PatientRecord;

/// A patient record and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// The scanned `DICOM` directory.
    pub dicom_folder: PathBuf,
    /// The file the record was read from.
    pub source_file: PathBuf,
    /// The extracted record.
    pub record: PatientRecord,
}

/// Locate the `DICOM` directory under `root` and read its patient record.
///
/// # Errors
///
/// * If [`find_dicom_folder`] fails
/// * If [`scan_folder`] fails
pub fn scan(root: &Path, reader: &dyn RecordReader) -> Result<ScanResult, ScanError> {
    let folder = find_dicom_folder(root)?;
    scan_folder(&folder, reader)
}

/// Read the record of the first parseable file under `folder`.
///
/// Files are visited depth-first in name order. All files of a study share
/// the same patient data, so the first readable one is used and the rest are
/// never opened. Unreadable files are logged and skipped.
///
/// # Errors
///
/// * If no file under `folder` is a readable record
pub fn scan_folder(folder: &Path, reader: &dyn RecordReader) -> Result<ScanResult, ScanError> {
    log::debug!("Scanning {} for DICOM records", folder.display());

    let files = jwalk::WalkDir::new(folder)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {e}", folder.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() || entry.file_type().is_symlink())
        .map(|entry| entry.path());

    for path in files {
        match reader.read_record(&path) {
            Ok(fields) => {
                let record = PatientRecord::from_fields(fields);
                log::info!(
                    "Read patient record from {}: {}, {} ({}) study {} modality {}",
                    path.display(),
                    record.last_name,
                    record.first_name,
                    record.birth_date,
                    record.study_date,
                    record.modality
                );
                return Ok(ScanResult {
                    dicom_folder: folder.to_path_buf(),
                    source_file: path,
                    record,
                });
            }
            Err(e) => log::debug!("{e}"),
        }
    }

    log::warn!("No usable DICOM data found in {}", folder.display());
    Err(ScanError::NoRecordFound {
        folder: folder.to_path_buf(),
    })
}
