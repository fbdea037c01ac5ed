//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use dicom_importer_copy::{DuSizeEstimator, SizeEstimator, WalkSizeEstimator};
use dicom_importer_import::FolderNameStyle;
use dicom_importer_scan::PatientRecord;

/// How the source folder is measured for the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SizeMethod {
    /// Run `du -sk`.
    Du,
    /// Sum file sizes in-process.
    Walk,
}

/// CLI arguments for dicom-importer.
#[derive(Debug, Parser)]
#[command(
    name = "dicom-importer",
    about = "Copy DICOM studies from a disc into a patient-named folder",
    version
)]
pub struct Args {
    /// Disc or folder containing a DICOM directory.
    #[arg(index = 1)]
    pub source: Option<PathBuf>,

    /// Base directory for imported studies (overrides the config file).
    #[arg(long, short = 'd')]
    pub destination: Option<PathBuf>,

    /// Settings file to use instead of the discovered one.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Override the patient's first name.
    #[arg(long)]
    pub first_name: Option<String>,

    /// Override the patient's last name.
    #[arg(long)]
    pub last_name: Option<String>,

    /// Override the birth date (YYYYMMDD).
    #[arg(long)]
    pub birth_date: Option<String>,

    /// Override the study date (YYYYMMDD).
    #[arg(long)]
    pub study_date: Option<String>,

    /// Override the modality.
    #[arg(long)]
    pub modality: Option<String>,

    /// Leave the modality out of the folder name.
    #[arg(long = "no-modality")]
    pub no_modality: bool,

    /// How to measure the source folder.
    #[arg(long, value_enum, default_value_t = SizeMethod::Du)]
    pub size_method: SizeMethod,

    /// Run without prompts (requires source).
    #[arg(long)]
    pub non_interactive: bool,

    /// Skip the confirmation before copying.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Apply the field overrides given on the command line.
    #[must_use]
    pub fn apply_overrides(&self, mut record: PatientRecord) -> PatientRecord {
        let overrides = [
            (&self.first_name, &mut record.first_name),
            (&self.last_name, &mut record.last_name),
            (&self.birth_date, &mut record.birth_date),
            (&self.study_date, &mut record.study_date),
            (&self.modality, &mut record.modality),
        ];
        for (value, field) in overrides {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
        record
    }

    /// Folder name style, with `--no-modality` taking precedence.
    #[must_use]
    pub const fn folder_name_style(&self, include_modality: bool) -> FolderNameStyle {
        if self.no_modality {
            FolderNameStyle::WithoutModality
        } else {
            FolderNameStyle::from_include_modality(include_modality)
        }
    }

    /// The selected size estimator.
    #[must_use]
    pub fn size_estimator(&self) -> Box<dyn SizeEstimator> {
        match self.size_method {
            SizeMethod::Du => Box::new(DuSizeEstimator),
            SizeMethod::Walk => Box::new(WalkSizeEstimator),
        }
    }

    /// Determine if we should prompt.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.non_interactive && console::user_attended()
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}
