//! Import orchestration for dicom-importer.
//!
//! This crate ties the scanner and the copier together:
//!
//! * `ImportSession` carries the scanned folder and (editable) record
//! * Destination folder naming from the record
//! * Free space of the destination volume
//!
//! # Example
//!
//! ```rust,ignore
//! use dicom_importer_import::{FolderNameStyle, ImportSession};
//!
//! let session = ImportSession::scan(root, &DicomRecordReader, &DuSizeEstimator)?;
//! let job = session.prepare_copy(base, FolderNameStyle::WithModality, &DuSizeEstimator, options)?;
//! let outcome = job.run(|progress| println!("{:.0}%", progress.percentage()));
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod disk;
mod error;
mod naming;
mod session;

pub use disk::{DiskUsage, disk_usage, format_gigabytes};
pub use error::ImportError;
pub use naming::{FolderNameStyle, destination_folder_name, destination_path, is_dicom_date};
pub use session::ImportSession;
