//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::Path;

use colored::Colorize;
use dicom_importer_copy::CopySummary;
use dicom_importer_import::{DiskUsage, format_gigabytes};
use dicom_importer_scan::PatientRecord;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{} {}\n", "💿", message.bold());
}

/// Print the destination base directory and where it came from.
pub fn print_destination_base(base: &Path, config_path: Option<&Path>) {
    println!("Destination: {}", base.display().to_string().cyan());
    match config_path {
        Some(path) => println!("Settings:    {}", path.display().to_string().dimmed()),
        None => println!("Settings:    {}", "defaults".dimmed()),
    }
}

/// Print free space on the destination volume.
pub fn print_disk_usage(usage: &DiskUsage) {
    println!(
        "Disk:        {} of {} free ({}%)",
        format_gigabytes(usage.free).green(),
        format_gigabytes(usage.total),
        usage.percent_free()
    );
}

/// Print the scanned folder and its size.
pub fn print_scan_result(dicom_folder: &Path, megabytes: u64) {
    println!();
    println!("Found {}", dicom_folder.display().to_string().yellow());
    println!("  {} {} MB", "•".dimmed(), megabytes);
}

/// Print the record that will name the destination folder.
pub fn print_record(record: &PatientRecord) {
    let fields = [
        ("First name", &record.first_name),
        ("Last name", &record.last_name),
        ("Birth date", &record.birth_date),
        ("Study date", &record.study_date),
        ("Modality", &record.modality),
    ];
    for (label, value) in fields {
        println!("  {} {:<12} {}", "•".dimmed(), label, value);
    }
    println!();
}

/// Print the destination folder.
pub fn print_target(destination: &Path) {
    println!("Copying to {}", destination.display().to_string().cyan());
}

/// Print the result of a finished copy.
pub fn print_success(destination: &Path, summary: &CopySummary) {
    println!(
        "{} Copied {} files to {}",
        "✓".green(),
        summary.files_copied,
        destination.display()
    );
    if summary.files_failed > 0 {
        print_warning(&format!(
            "{} files could not be copied, see the log for details",
            summary.files_failed
        ));
    }
}

/// Print the result of a cancelled copy.
pub fn print_cancelled(destination: &Path) {
    println!(
        "{} Copy cancelled, removed {}",
        "•".dimmed(),
        destination.display()
    );
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}
