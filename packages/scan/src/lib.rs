//! DICOM folder discovery and patient metadata extraction.
//!
//! Imaging discs carry a `DICOM` directory whose files all share the same
//! patient and study data. This crate finds that directory and reads the
//! header of the first file that parses:
//!
//! * `find_dicom_folder` locates the directory (case-insensitive)
//! * `scan_folder` reads the first parseable record
//! * `PatientRecord` applies placeholder values for missing fields
//!
//! # Example
//!
//! ```rust,ignore
//! use dicom_importer_scan::{DicomRecordReader, scan};
//!
//! let result = scan(Path::new("/media/cdrom"), &DicomRecordReader)?;
//! println!("{}, {}", result.record.last_name, result.record.first_name);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod locate;
mod reader;
mod record;
mod scanner;

#[cfg(test)]
mod test_fixtures;

pub use error::ScanError;
pub use locate::{find_dicom_folder, is_dicom_dir_name};
pub use reader::{DicomRecordReader, RecordReader};
pub use record::{
    DEFAULT_BIRTH_DATE, DEFAULT_FIRST_NAME, DEFAULT_LAST_NAME, DEFAULT_MODALITY,
    DEFAULT_PATIENT_NAME, DEFAULT_STUDY_DATE, PatientRecord, RecordFields, split_person_name,
};
pub use scanner::{ScanResult, scan, scan_folder};
