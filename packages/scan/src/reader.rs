//! Reading DICOM headers.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use dicom::core::Tag;
use dicom::dictionary_std::tags;
use dicom::object::{DefaultDicomObject, OpenFileOptions};

use crate::error::ScanError;
use crate::record::RecordFields;

/// Parses one file into [`RecordFields`].
pub trait RecordReader {
    /// Read the metadata fields of `path`.
    ///
    /// # Errors
    ///
    /// * If the file is not a readable DICOM record
    fn read_record(&self, path: &Path) -> Result<RecordFields, ScanError>;
}

/// [`RecordReader`] backed by `dicom-object`.
///
/// Stops parsing at the pixel data, so only the header is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct DicomRecordReader;

impl RecordReader for DicomRecordReader {
    fn read_record(&self, path: &Path) -> Result<RecordFields, ScanError> {
        log::trace!("Reading DICOM header from {}", path.display());

        let obj = OpenFileOptions::new()
            .read_until(tags::PIXEL_DATA)
            .open_file(path)
            .map_err(|e| ScanError::ReadRecord {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(RecordFields {
            patient_name: string_element(&obj, tags::PATIENT_NAME),
            birth_date: string_element(&obj, tags::PATIENT_BIRTH_DATE),
            study_date: string_element(&obj, tags::STUDY_DATE),
            modality: string_element(&obj, tags::MODALITY),
        })
    }
}

/// String value of `tag`, without DICOM padding. Blank values are `None`.
fn string_element(obj: &DefaultDicomObject, tag: Tag) -> Option<String> {
    let element = obj.element(tag).ok()?;
    let value = element.to_str().ok()?;
    let trimmed = value.trim_end_matches([' ', '\0']).trim_start();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{StudyFields, write_dicom};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reads_header_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.dat");
        write_dicom(&path, &StudyFields::mueller());

        let fields = DicomRecordReader.read_record(&path).unwrap();

        assert_eq!(fields.patient_name.as_deref(), Some("Mueller^Hans"));
        assert_eq!(fields.birth_date.as_deref(), Some("19800101"));
        assert_eq!(fields.study_date.as_deref(), Some("20230101"));
        assert_eq!(fields.modality.as_deref(), Some("CT"));
    }

    #[test]
    fn test_missing_elements_are_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("b.dat");
        write_dicom(
            &path,
            &StudyFields {
                patient_name: None,
                birth_date: None,
                ..StudyFields::mueller()
            },
        );

        let fields = DicomRecordReader.read_record(&path).unwrap();

        assert_eq!(fields.patient_name, None);
        assert_eq!(fields.birth_date, None);
        assert_eq!(fields.modality.as_deref(), Some("CT"));
    }

    #[test]
    fn test_rejects_non_dicom_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("README.TXT");
        fs::write(&path, "This disc contains images.").unwrap();

        let err = DicomRecordReader.read_record(&path).unwrap_err();

        assert!(matches!(err, ScanError::ReadRecord { .. }));
        assert!(!err.is_not_found());
    }
}
