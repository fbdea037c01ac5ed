//! State carried from the scan to the copy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use dicom_importer_copy::{CopyJob, CopyOptions, SizeEstimator, estimate_total_bytes};
use dicom_importer_scan::{PatientRecord, RecordReader, scan};

use crate::error::ImportError;
use crate::naming::{FolderNameStyle, destination_path};

/// One scanned study awaiting import.
///
/// Owned by the caller; the record may be edited before the copy starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSession {
    dicom_folder: PathBuf,
    record: PatientRecord,
    folder_size_bytes: u64,
}

impl ImportSession {
    /// Create a session from already known values.
    #[must_use]
    pub const fn new(dicom_folder: PathBuf, record: PatientRecord, folder_size_bytes: u64) -> Self {
        Self {
            dicom_folder,
            record,
            folder_size_bytes,
        }
    }

    /// Scan `root` and measure the `DICOM` folder that was found.
    ///
    /// # Errors
    ///
    /// * If no `DICOM` folder or no readable record is found
    pub fn scan(
        root: &Path,
        reader: &dyn RecordReader,
        estimator: &dyn SizeEstimator,
    ) -> Result<Self, ImportError> {
        let result = scan(root, reader)?;
        let folder_size_bytes = estimate_total_bytes(estimator, &result.dicom_folder);

        Ok(Self::new(result.dicom_folder, result.record, folder_size_bytes))
    }

    /// The folder that will be copied.
    #[must_use]
    pub fn dicom_folder(&self) -> &Path {
        &self.dicom_folder
    }

    /// The record used for naming.
    #[must_use]
    pub const fn record(&self) -> &PatientRecord {
        &self.record
    }

    /// Replace the record with an edited one.
    pub fn set_record(&mut self, record: PatientRecord) {
        self.record = record;
    }

    /// Size measured at scan time, rounded down to whole megabytes.
    #[must_use]
    pub const fn folder_size_bytes(&self) -> u64 {
        self.folder_size_bytes
    }

    /// Size measured at scan time, in whole megabytes.
    #[must_use]
    pub const fn folder_size_megabytes(&self) -> u64 {
        self.folder_size_bytes / (1024 * 1024)
    }

    /// Destination folder for the current record.
    #[must_use]
    pub fn destination(&self, base: &Path, style: FolderNameStyle) -> PathBuf {
        destination_path(base, &self.record, style)
    }

    /// Check preconditions and build the copy job.
    ///
    /// The source is measured again, since the copy may start long after the
    /// scan.
    ///
    /// # Errors
    ///
    /// * If the destination already exists or is not writable
    /// * If the `DICOM` folder has disappeared
    pub fn prepare_copy(
        &self,
        base: &Path,
        style: FolderNameStyle,
        estimator: &dyn SizeEstimator,
        options: CopyOptions,
    ) -> Result<CopyJob, ImportError> {
        let destination = self.destination(base, style);

        let job = CopyJob::new(&self.dicom_folder, &destination).inspect_err(|e| {
            log::warn!("Cannot copy to {}: {e}", destination.display());
        })?;

        Ok(job.estimate_total(estimator).with_options(options))
    }
}
