//! Destination folder naming.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use dicom_importer_scan::PatientRecord;

/// Shape of the destination folder name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FolderNameStyle {
    /// `{study}-{birth}-{last}, {first}-{modality}`
    #[default]
    WithModality,
    /// `{study}-{birth}-{last}, {first}`
    WithoutModality,
}

impl FolderNameStyle {
    /// Style for the `include_modality` setting.
    #[must_use]
    pub const fn from_include_modality(include_modality: bool) -> Self {
        if include_modality {
            Self::WithModality
        } else {
            Self::WithoutModality
        }
    }
}

/// Folder name for `record`.
///
/// Path separators inside field values are replaced with `-`, so the result
/// is always a single path component.
#[must_use]
pub fn destination_folder_name(record: &PatientRecord, style: FolderNameStyle) -> String {
    let base = format!(
        "{}-{}-{}, {}",
        sanitize(&record.study_date),
        sanitize(&record.birth_date),
        sanitize(&record.last_name),
        sanitize(&record.first_name)
    );

    match style {
        FolderNameStyle::WithModality => format!("{base}-{}", sanitize(&record.modality)),
        FolderNameStyle::WithoutModality => base,
    }
}

/// Full destination path for `record` under `base`.
#[must_use]
pub fn destination_path(base: &Path, record: &PatientRecord, style: FolderNameStyle) -> PathBuf {
    base.join(destination_folder_name(record, style))
}

/// Whether `value` looks like a DICOM date (`YYYYMMDD`).
#[must_use]
pub fn is_dicom_date(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

fn sanitize(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mueller() -> PatientRecord {
        PatientRecord {
            first_name: "Hans".to_string(),
            last_name: "Mueller".to_string(),
            birth_date: "19800101".to_string(),
            study_date: "20230101".to_string(),
            modality: "CT".to_string(),
        }
    }

    #[test]
    fn test_destination_path() {
        assert_eq!(
            destination_path(Path::new("/dest"), &mueller(), FolderNameStyle::WithModality),
            PathBuf::from("/dest/20230101-19800101-Mueller, Hans-CT")
        );
    }

    #[test]
    fn test_without_modality() {
        assert_eq!(
            destination_folder_name(&mueller(), FolderNameStyle::WithoutModality),
            "20230101-19800101-Mueller, Hans"
        );
    }

    #[test]
    fn test_placeholder_record() {
        assert_eq!(
            destination_folder_name(&PatientRecord::default(), FolderNameStyle::default()),
            "20000101-19000101-Doe, John-NA"
        );
    }

    #[test]
    fn test_separators_are_replaced() {
        let record = PatientRecord {
            last_name: "Smith/Jones".to_string(),
            modality: "CT\\PT".to_string(),
            ..mueller()
        };

        let name = destination_folder_name(&record, FolderNameStyle::WithModality);

        assert_eq!(name, "20230101-19800101-Smith-Jones, Hans-CT-PT");
        assert_eq!(
            destination_path(Path::new("/dest"), &record, FolderNameStyle::WithModality)
                .parent(),
            Some(Path::new("/dest"))
        );
    }

    #[test]
    fn test_style_from_setting() {
        assert_eq!(
            FolderNameStyle::from_include_modality(true),
            FolderNameStyle::WithModality
        );
        assert_eq!(
            FolderNameStyle::from_include_modality(false),
            FolderNameStyle::WithoutModality
        );
    }

    #[test]
    fn test_is_dicom_date() {
        assert!(is_dicom_date("19800101"));
        assert!(!is_dicom_date("1980-01-01"));
        assert!(!is_dicom_date("1980010"));
        assert!(!is_dicom_date(""));
    }
}
