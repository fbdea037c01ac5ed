//! dicom-importer CLI entry point.
//!
//! Finds the DICOM folder on a disc, names the destination after the patient
//! and study, and copies the folder with progress and Ctrl-C cancellation.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod interactive;
mod output;
mod progress;
mod signal;

use std::env;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread::JoinHandle;
use std::time::Duration;

use clap::Parser;

use args::Args;
use dicom_importer_config::resolve_settings;
use dicom_importer_copy::{CopyJob, CopyOptions, CopyOutcome, CopyProgress};
use dicom_importer_import::{ImportError, ImportSession, disk_usage, is_dicom_date};
use dicom_importer_scan::{DicomRecordReader, PatientRecord};
use progress::ProgressManager;

/// How often the main thread checks for Ctrl-C while no progress arrives.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = resolve_settings(args.config.as_deref())?;
    let settings = loaded.settings;

    let base = args
        .destination
        .clone()
        .unwrap_or_else(|| settings.destination_path.clone());
    let style = args.folder_name_style(settings.include_modality);
    let interactive = args.is_interactive();
    let estimator = args.size_estimator();

    output::print_header("DICOM Importer");
    output::print_destination_base(&base, loaded.config_path.as_deref());
    show_disk_usage(&base);

    let source = make_absolute(&source_folder(args, interactive)?)?;

    let mut session = match ImportSession::scan(&source, &DicomRecordReader, estimator.as_ref())
    {
        Ok(session) => session,
        Err(ImportError::ScanError(e)) if e.is_not_found() => {
            output::print_warning(&e.to_string());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    output::print_scan_result(session.dicom_folder(), session.folder_size_megabytes());

    let mut record = args.apply_overrides(session.record().clone());
    output::print_record(&record);
    if interactive {
        record = interactive::edit_record(&record)?;
    }
    warn_on_unusual_dates(&record);
    session.set_record(record);

    let destination = session.destination(&base, style);
    output::print_target(&destination);

    if interactive && !args.yes && !interactive::confirm_copy(&destination)? {
        println!("Nothing copied.");
        return Ok(());
    }

    let options = CopyOptions {
        pace: settings.pace(),
    };
    let job = session.prepare_copy(&base, style, estimator.as_ref(), options)?;

    match copy_with_progress(job, args.should_show_progress())? {
        CopyOutcome::Completed(summary) => output::print_success(&destination, &summary),
        CopyOutcome::Cancelled(_) => output::print_cancelled(&destination),
    }

    println!();
    show_disk_usage(&base);

    Ok(())
}

/// Run the copy on a worker thread and drive the progress bar from here.
///
/// Progress snapshots arrive over a channel; the channel closes when the
/// worker finishes. Ctrl-C is polled between snapshots and turned into a
/// cancellation request.
fn copy_with_progress(
    job: CopyJob,
    show_progress: bool,
) -> Result<CopyOutcome, Box<dyn std::error::Error>> {
    let progress_mgr = ProgressManager::new(show_progress);
    let bar = progress_mgr.create_copy_bar(job.total_bytes());
    let cancel = job.cancel_token();

    let (tx, rx) = mpsc::channel::<CopyProgress>();

    signal::install_interrupt_handler();
    let handle = job.spawn(move |progress| {
        let _ = tx.send(progress.clone());
    })?;

    let mut cancel_requested = false;
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(progress) => progress_mgr.update(&bar, &progress),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if !cancel_requested && signal::interrupted() {
            log::info!("Interrupt received, cancelling copy");
            cancel.cancel();
            bar.set_message("Cancelling...");
            cancel_requested = true;
        }
    }

    let outcome = join_worker(handle);

    bar.finish_and_clear();
    progress_mgr.clear();

    outcome
}

/// Wait for the worker and give Ctrl-C back, even if the worker panicked.
fn join_worker<T>(handle: JoinHandle<T>) -> Result<T, Box<dyn std::error::Error>> {
    let joined = handle.join();
    signal::restore_default_handler();

    joined.map_err(|_| "copy worker panicked".into())
}

/// Source folder from the arguments, or from a prompt when interactive.
fn source_folder(args: &Args, interactive: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.source {
        Ok(path.clone())
    } else if interactive {
        Ok(interactive::prompt_source_folder()?)
    } else {
        Err("Source folder is required in non-interactive mode.".into())
    }
}

fn show_disk_usage(base: &Path) {
    match disk_usage(base) {
        Ok(usage) => output::print_disk_usage(&usage),
        Err(e) => log::warn!("{e}"),
    }
}

fn warn_on_unusual_dates(record: &PatientRecord) {
    for (label, value) in [
        ("Birth date", &record.birth_date),
        ("Study date", &record.study_date),
    ] {
        if !is_dicom_date(value) {
            output::print_warning(&format!("{label} '{value}' is not in YYYYMMDD form"));
        }
    }
}

fn make_absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path_clean::clean(path))
    } else {
        Ok(path_clean::clean(env::current_dir()?.join(path)))
    }
}
