//! Patient record extracted from a DICOM header.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

/// Name used when the record carries no patient name.
pub const DEFAULT_PATIENT_NAME: &str = "Doe^John";
/// Last name used when the name has no family component.
pub const DEFAULT_LAST_NAME: &str = "Doe";
/// First name used when the name has no given component.
pub const DEFAULT_FIRST_NAME: &str = "John";
/// Birth date used when the record has none.
pub const DEFAULT_BIRTH_DATE: &str = "19000101";
/// Study date used when the record has none.
pub const DEFAULT_STUDY_DATE: &str = "20000101";
/// Modality used when the record has none.
pub const DEFAULT_MODALITY: &str = "NA";

/// Raw values read from one DICOM file. Blank values are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    /// `PatientName` (0010,0010), `^`-delimited.
    pub patient_name: Option<String>,
    /// `PatientBirthDate` (0010,0030).
    pub birth_date: Option<String>,
    /// `StudyDate` (0008,0020).
    pub study_date: Option<String>,
    /// `Modality` (0008,0060).
    pub modality: Option<String>,
}

/// Patient and study fields used to name the destination folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Birth date, `YYYYMMDD`.
    pub birth_date: String,
    /// Study date, `YYYYMMDD`.
    pub study_date: String,
    /// Modality code, e.g. `CT`.
    pub modality: String,
}

impl PatientRecord {
    /// Build a record, filling every missing field with its placeholder.
    #[must_use]
    pub fn from_fields(fields: RecordFields) -> Self {
        let name = non_blank(fields.patient_name);
        let (last_name, first_name) =
            split_person_name(name.as_deref().unwrap_or(DEFAULT_PATIENT_NAME));

        Self {
            first_name,
            last_name,
            birth_date: non_blank(fields.birth_date)
                .unwrap_or_else(|| DEFAULT_BIRTH_DATE.to_string()),
            study_date: non_blank(fields.study_date)
                .unwrap_or_else(|| DEFAULT_STUDY_DATE.to_string()),
            modality: non_blank(fields.modality).unwrap_or_else(|| DEFAULT_MODALITY.to_string()),
        }
    }
}

impl Default for PatientRecord {
    fn default() -> Self {
        Self::from_fields(RecordFields::default())
    }
}

/// Split a DICOM person name into `(last, first)`.
///
/// Only the first value of a multi-valued name is used. Missing or empty
/// components fall back to [`DEFAULT_LAST_NAME`] / [`DEFAULT_FIRST_NAME`].
#[must_use]
pub fn split_person_name(name: &str) -> (String, String) {
    let first_value = name.split('\\').next().unwrap_or_default();
    let mut parts = first_value.split('^').map(str::trim);

    let last = parts
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LAST_NAME);
    let first = parts
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_FIRST_NAME);

    (last.to_string(), first.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
