//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;
use std::path::{Path, PathBuf};

use dialoguer::{Confirm, Input};
use dicom_importer_scan::PatientRecord;

/// Prompt for the disc or folder to import from.
///
/// # Errors
///
/// * If the user cancels the input
pub fn prompt_source_folder() -> io::Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Folder or disc to import")
        .validate_with(|input: &String| -> Result<(), &str> {
            if Path::new(input.trim()).is_dir() {
                Ok(())
            } else {
                Err("Not a directory")
            }
        })
        .interact_text()?;

    Ok(PathBuf::from(path.trim()))
}

/// Let the user correct the scanned record, one field at a time.
///
/// Each prompt starts with the current value filled in.
///
/// # Errors
///
/// * If the user cancels a prompt
pub fn edit_record(record: &PatientRecord) -> io::Result<PatientRecord> {
    Ok(PatientRecord {
        first_name: edit_field("First name", &record.first_name)?,
        last_name: edit_field("Last name", &record.last_name)?,
        birth_date: edit_field("Birth date (YYYYMMDD)", &record.birth_date)?,
        study_date: edit_field("Study date (YYYYMMDD)", &record.study_date)?,
        modality: edit_field("Modality", &record.modality)?,
    })
}

fn edit_field(prompt: &str, current: &str) -> io::Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    let value = value.trim();
    Ok(if value.is_empty() {
        current.to_string()
    } else {
        value.to_string()
    })
}

/// Ask before copying into `destination`.
///
/// # Errors
///
/// * If the user cancels the prompt
pub fn confirm_copy(destination: &Path) -> io::Result<bool> {
    Ok(Confirm::new()
        .with_prompt(format!("Copy to {}?", destination.display()))
        .default(true)
        .interact()?)
}
