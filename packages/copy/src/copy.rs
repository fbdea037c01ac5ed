//! Sequential folder copying with cancellation and byte-level progress.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::cancel::CancelToken;
use crate::error::CopyError;
use crate::progress::{CopyProgress, JobState, ProgressTracker};
use crate::size::{SizeEstimator, estimate_total_bytes};

/// Tuning knobs for a copy job.
#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    /// Sleep between files, to leave room for a slow renderer.
    pub pace: Option<Duration>,
}

/// Totals reported when a copy job ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopySummary {
    /// Up-front size estimate.
    pub bytes_total: u64,
    /// Sum of the sizes of all files that were copied.
    pub bytes_copied: u64,
    /// Number of files copied.
    pub files_copied: u64,
    /// Number of entries skipped because of an error.
    pub files_failed: u64,
}

/// Terminal report of a copy job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// The whole source tree was walked.
    Completed(CopySummary),
    /// The walk was stopped and the destination removed.
    Cancelled(CopySummary),
}

impl CopyOutcome {
    /// Totals at the time the job ended.
    #[must_use]
    pub const fn summary(&self) -> &CopySummary {
        match self {
            Self::Completed(summary) | Self::Cancelled(summary) => summary,
        }
    }

    /// Whether the job was cancelled.
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Verify that `source` can be copied to `destination`.
///
/// Creates nothing on disk.
///
/// # Errors
///
/// * If `source` is not a directory
/// * If `destination` already exists
/// * If the parent of `destination` is missing or not writable
pub fn check_preconditions(source: &Path, destination: &Path) -> Result<(), CopyError> {
    if !source.is_dir() {
        return Err(CopyError::SourceNotDirectory {
            path: source.to_path_buf(),
        });
    }

    if fs::symlink_metadata(destination).is_ok() {
        return Err(CopyError::DestinationExists {
            path: destination.to_path_buf(),
        });
    }

    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    if !parent.is_dir() || !is_writable(parent) {
        return Err(CopyError::DestinationNotWritable {
            path: parent.to_path_buf(),
        });
    }

    Ok(())
}

/// One copy of a source tree into a fresh destination.
///
/// Jobs are single-use: [`CopyJob::run`] consumes the job.
#[derive(Debug)]
pub struct CopyJob {
    source: PathBuf,
    destination: PathBuf,
    options: CopyOptions,
    tracker: Arc<ProgressTracker>,
    cancel: CancelToken,
}

impl CopyJob {
    /// Prepare a job after checking its preconditions.
    ///
    /// # Errors
    ///
    /// * If [`check_preconditions`] fails
    pub fn new(
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
    ) -> Result<Self, CopyError> {
        let source = source.into();
        let destination = destination.into();

        check_preconditions(&source, &destination)?;

        Ok(Self {
            source,
            destination,
            options: CopyOptions::default(),
            tracker: ProgressTracker::new(),
            cancel: CancelToken::new(),
        })
    }

    /// Use a known total instead of measuring.
    #[must_use]
    pub fn with_total_bytes(self, total: u64) -> Self {
        self.tracker.set_total(total);
        self
    }

    /// Measure the source once; failures leave the total at zero.
    #[must_use]
    pub fn estimate_total(self, estimator: &dyn SizeEstimator) -> Self {
        let total = estimate_total_bytes(estimator, &self.source);
        self.with_total_bytes(total)
    }

    /// Replace the job options.
    #[must_use]
    pub fn with_options(mut self, options: CopyOptions) -> Self {
        self.options = options;
        self
    }

    /// Source directory.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination directory.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Estimated total in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.tracker.total()
    }

    /// Handle that stops the job when cancelled.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Shared counters and state for observers on other threads.
    #[must_use]
    pub fn tracker(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.tracker)
    }

    /// Copy the tree on the current thread.
    ///
    /// `on_progress` runs after every copied file, on this thread. Per-file
    /// errors are logged and skipped; nothing escapes as an error.
    pub fn run<F>(self, mut on_progress: F) -> CopyOutcome
    where
        F: FnMut(&CopyProgress),
    {
        log::info!(
            "Copying {} -> {}",
            self.source.display(),
            self.destination.display()
        );

        self.tracker.transition(JobState::Idle, JobState::Running);

        let cancelled = self.copy_tree(&mut on_progress);
        let summary = self.summary();

        if cancelled {
            remove_partial_destination(&self.destination);
            self.tracker.transition(JobState::Running, JobState::Cancelled);
            log::info!(
                "Copy cancelled after {} files ({} bytes)",
                summary.files_copied,
                summary.bytes_copied
            );
            CopyOutcome::Cancelled(summary)
        } else {
            self.tracker.transition(JobState::Running, JobState::Completed);
            log::info!(
                "Copy complete: {} files, {} bytes, {} failed",
                summary.files_copied,
                summary.bytes_copied,
                summary.files_failed
            );
            CopyOutcome::Completed(summary)
        }
    }

    /// Run the job on a dedicated worker thread.
    ///
    /// # Errors
    ///
    /// * If the thread cannot be spawned
    pub fn spawn<F>(self, on_progress: F) -> std::io::Result<JoinHandle<CopyOutcome>>
    where
        F: FnMut(&CopyProgress) + Send + 'static,
    {
        thread::Builder::new()
            .name("copy-worker".to_string())
            .spawn(move || self.run(on_progress))
    }

    /// Walk the source; returns `true` if the walk stopped on cancellation.
    fn copy_tree<F>(&self, on_progress: &mut F) -> bool
    where
        F: FnMut(&CopyProgress),
    {
        let walker = jwalk::WalkDir::new(&self.source)
            .skip_hidden(false)
            .follow_links(false)
            .sort(true);

        for entry in walker {
            if self.cancel.is_cancelled() {
                log::debug!("Cancellation observed, stopping walk");
                return true;
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::error!(
                        "{}",
                        CopyError::EnumerationError {
                            path: self.source.clone(),
                            message: e.to_string(),
                        }
                    );
                    self.tracker.add_failed();
                    continue;
                }
            };

            let source_path = entry.path();
            let Ok(rel_path) = source_path.strip_prefix(&self.source) else {
                log::error!("Entry outside source tree: {}", source_path.display());
                self.tracker.add_failed();
                continue;
            };
            let target_path = self.destination.join(rel_path);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                if let Err(e) = fs::create_dir_all(&target_path) {
                    log::error!(
                        "{}",
                        CopyError::CreateDirError {
                            path: target_path,
                            io_error: e,
                        }
                    );
                }
                continue;
            }

            if !file_type.is_file() && !file_type.is_symlink() {
                log::error!("{}", CopyError::UnsupportedFileType { path: source_path });
                self.tracker.add_failed();
                continue;
            }

            match copy_file_preserving(&source_path, &target_path) {
                Ok(bytes) => {
                    self.tracker.add_copied(bytes);
                    on_progress(
                        &self
                            .tracker
                            .snapshot(Some(source_path.to_string_lossy().to_string())),
                    );
                    if let Some(pace) = self.options.pace {
                        thread::sleep(pace);
                    }
                }
                Err(e) => {
                    log::error!("{e}");
                    self.tracker.add_failed();
                }
            }
        }

        false
    }

    fn summary(&self) -> CopySummary {
        CopySummary {
            bytes_total: self.tracker.total(),
            bytes_copied: self.tracker.copied(),
            files_copied: self.tracker.files_copied(),
            files_failed: self.tracker.files_failed(),
        }
    }
}

/// Delete whatever a cancelled job wrote. Failures are only logged.
fn remove_partial_destination(destination: &Path) {
    if fs::symlink_metadata(destination).is_err() {
        return;
    }

    match fs::remove_dir_all(destination) {
        Ok(()) => log::info!("Removed destination folder {}", destination.display()),
        Err(e) => log::error!(
            "{}",
            CopyError::RemoveError {
                path: destination.to_path_buf(),
                io_error: e,
            }
        ),
    }
}

/// Copy one file and carry over its timestamps and permissions.
///
/// Symlinks are followed. Returns the number of bytes in the source.
fn copy_file_preserving(source: &Path, target: &Path) -> Result<u64, CopyError> {
    let metadata = fs::metadata(source).map_err(|e| CopyError::MetadataError {
        path: source.to_path_buf(),
        io_error: e,
    })?;

    copy_file_with_reflink(source, target)?;
    preserve_metadata(&metadata, target);

    Ok(metadata.len())
}

/// Copy a single file, trying reflink first then falling back to regular copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), CopyError> {
    // Copy-on-write where the filesystem supports it (APFS/Btrfs/ReFS)
    match reflink_copy::reflink(source, target) {
        Ok(()) => {
            log::trace!("Reflinked {} -> {}", source.display(), target.display());
            Ok(())
        }
        Err(_) => {
            fs::copy(source, target).map_err(|e| CopyError::FileCopyError {
                source_path: source.to_path_buf(),
                target_path: target.to_path_buf(),
                io_error: e,
            })?;
            log::trace!("Copied {} -> {}", source.display(), target.display());
            Ok(())
        }
    }
}

fn preserve_metadata(metadata: &fs::Metadata, target: &Path) {
    let mut times = fs::FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    // Times first: the copied permissions may be read-only
    let result = fs::File::options()
        .write(true)
        .open(target)
        .or_else(|_| fs::File::open(target))
        .and_then(|file| file.set_times(times));
    if let Err(e) = result {
        log::warn!("Could not preserve times on {}: {e}", target.display());
    }

    if let Err(e) = fs::set_permissions(target, metadata.permissions()) {
        log::warn!("Could not preserve permissions on {}: {e}", target.display());
    }
}

#[cfg(unix)]
fn is_writable(dir: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(dir.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: `c_path` is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(unix))]
fn is_writable(dir: &Path) -> bool {
    fs::metadata(dir).is_ok_and(|m| !m.permissions().readonly())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::SystemTime;
    use tempfile::TempDir;

    fn write_study(root: &Path) {
        fs::create_dir_all(root.join("SERIES1")).unwrap();
        fs::create_dir_all(root.join("SERIES2/EMPTY")).unwrap();
        fs::write(root.join("DICOMDIR"), vec![1_u8; 300]).unwrap();
        fs::write(root.join("SERIES1/IM0001"), vec![2_u8; 1000]).unwrap();
        fs::write(root.join("SERIES1/IM0002"), vec![3_u8; 2000]).unwrap();
        fs::write(root.join("SERIES2/IM0001"), vec![4_u8; 500]).unwrap();
    }

    fn many_files(root: &Path, count: usize) {
        fs::create_dir_all(root).unwrap();
        for i in 0..count {
            fs::write(root.join(format!("IM{i:04}")), vec![0_u8; 100]).unwrap();
        }
    }

    #[test]
    fn test_copy_mirrors_tree() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        write_study(&source);

        let outcome = CopyJob::new(&source, &target).unwrap().run(|_| {});

        assert_eq!(
            outcome,
            CopyOutcome::Completed(CopySummary {
                bytes_total: 0,
                bytes_copied: 3800,
                files_copied: 4,
                files_failed: 0,
            })
        );
        assert_eq!(fs::read(target.join("DICOMDIR")).unwrap(), vec![1_u8; 300]);
        assert_eq!(
            fs::read(target.join("SERIES1/IM0002")).unwrap(),
            vec![3_u8; 2000]
        );
        assert!(target.join("SERIES2/IM0001").is_file());
        assert!(target.join("SERIES2/EMPTY").is_dir());
    }

    #[test]
    fn test_progress_is_monotonic() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        write_study(&source);

        let mut seen = Vec::new();
        let job = CopyJob::new(&source, &target)
            .unwrap()
            .with_total_bytes(1024 * 1024);
        let outcome = job.run(|progress| {
            assert_eq!(progress.bytes_total, 1024 * 1024);
            seen.push(progress.bytes_copied);
        });

        assert_eq!(seen.len(), 4);
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(seen.last().copied(), Some(outcome.summary().bytes_copied));
    }

    #[test]
    fn test_existing_destination_is_rejected() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        write_study(&source);
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("keep.txt"), "existing").unwrap();

        let err = CopyJob::new(&source, &target).unwrap_err();

        assert!(matches!(err, CopyError::DestinationExists { .. }));
        assert!(err.is_precondition());
        assert_eq!(
            fs::read_to_string(target.join("keep.txt")).unwrap(),
            "existing"
        );
        assert_eq!(fs::read_dir(&target).unwrap().count(), 1);
        assert!(source.join("SERIES1/IM0001").is_file());
    }

    #[test]
    fn test_missing_source_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = CopyJob::new(dir.path().join("missing"), dir.path().join("out")).unwrap_err();

        assert!(matches!(err, CopyError::SourceNotDirectory { .. }));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_missing_parent_is_rejected() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        write_study(&source);

        let err = CopyJob::new(&source, dir.path().join("no/such/parent/out")).unwrap_err();

        assert!(matches!(err, CopyError::DestinationNotWritable { .. }));
        assert!(err.is_precondition());
    }

    #[test]
    fn test_cancel_before_start() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        write_study(&source);

        let job = CopyJob::new(&source, &target).unwrap();
        let tracker = job.tracker();
        job.cancel_token().cancel();

        let outcome = job.run(|_| panic!("no progress expected"));

        assert!(outcome.is_cancelled());
        assert_eq!(outcome.summary().files_copied, 0);
        assert!(!target.exists());
        assert_eq!(tracker.state(), JobState::Cancelled);
    }

    #[test]
    fn test_cancel_after_some_files() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        many_files(&source, 6);

        let job = CopyJob::new(&source, &target).unwrap();
        let token = job.cancel_token();
        let outcome = job.run(|progress| {
            if progress.files_copied == 2 {
                token.cancel();
            }
        });

        assert!(outcome.is_cancelled());
        assert_eq!(outcome.summary().files_copied, 2);
        assert_eq!(outcome.summary().bytes_copied, 200);
        assert!(!target.exists());
        assert!(source.join("IM0005").is_file());
    }

    #[test]
    fn test_last_instant_cancel_accepts_either_outcome() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        many_files(&source, 3);

        let job = CopyJob::new(&source, &target).unwrap();
        let token = job.cancel_token();
        let outcome = job.run(|progress| {
            if progress.files_copied == 3 {
                token.cancel();
            }
        });

        match outcome {
            CopyOutcome::Completed(summary) => {
                assert_eq!(summary.files_copied, 3);
                assert!(target.join("IM0002").is_file());
            }
            CopyOutcome::Cancelled(_) => assert!(!target.exists()),
        }
    }

    #[test]
    fn test_empty_source() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        fs::create_dir_all(&source).unwrap();

        let calls = AtomicU64::new(0);
        let job = CopyJob::new(&source, &target)
            .unwrap()
            .estimate_total(&crate::WalkSizeEstimator);
        assert_eq!(job.total_bytes(), 0);

        let outcome = job.run(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
        });

        assert!(matches!(outcome, CopyOutcome::Completed(s) if s.bytes_copied == 0));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }

    #[test]
    fn test_preserves_modification_time() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        fs::create_dir_all(&source).unwrap();
        let file = source.join("IM0001");
        fs::write(&file, "pixels").unwrap();

        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        fs::File::options()
            .write(true)
            .open(&file)
            .unwrap()
            .set_modified(stamp)
            .unwrap();

        CopyJob::new(&source, &target).unwrap().run(|_| {});

        let copied = fs::metadata(target.join("IM0001")).unwrap();
        assert_eq!(copied.modified().unwrap(), stamp);
    }

    #[test]
    fn test_spawn_runs_on_worker_thread() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        write_study(&source);

        let main_thread = thread::current().id();
        let job = CopyJob::new(&source, &target).unwrap();
        let tracker = job.tracker();
        let handle = job
            .spawn(move |_| assert_ne!(thread::current().id(), main_thread))
            .unwrap();

        let outcome = handle.join().unwrap();

        assert_eq!(outcome.summary().files_copied, 4);
        assert_eq!(tracker.state(), JobState::Completed);
    }

    #[test]
    fn test_cancel_spawned_job_from_other_thread() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        many_files(&source, 200);

        let job = CopyJob::new(&source, &target)
            .unwrap()
            .with_options(CopyOptions {
                pace: Some(Duration::from_millis(20)),
            });
        let token = job.cancel_token();
        let tracker = job.tracker();
        let handle = job.spawn(|_| {}).unwrap();

        while tracker.files_copied() < 3 {
            thread::sleep(Duration::from_millis(5));
        }
        token.cancel();

        let outcome = handle.join().unwrap();

        assert!(outcome.is_cancelled());
        assert!(outcome.summary().files_copied >= 3);
        assert!(outcome.summary().files_copied < 200);
        assert_eq!(tracker.state(), JobState::Cancelled);
        assert!(!target.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_skipped() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        many_files(&source, 1);
        std::os::unix::fs::symlink(dir.path().join("gone"), source.join("broken")).unwrap();

        let outcome = CopyJob::new(&source, &target).unwrap().run(|_| {});

        assert!(!outcome.is_cancelled());
        assert_eq!(outcome.summary().files_copied, 1);
        assert_eq!(outcome.summary().files_failed, 1);
        assert!(target.join("IM0000").is_file());
        assert!(!target.join("broken").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_is_copied_as_file() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        fs::create_dir_all(&source).unwrap();
        fs::write(dir.path().join("outside.dcm"), "linked").unwrap();
        std::os::unix::fs::symlink(dir.path().join("outside.dcm"), source.join("link")).unwrap();

        let outcome = CopyJob::new(&source, &target).unwrap().run(|_| {});

        assert_eq!(outcome.summary().bytes_copied, 6);
        let copied = target.join("link");
        assert!(!copied.is_symlink());
        assert_eq!(fs::read_to_string(copied).unwrap(), "linked");
    }

    #[cfg(unix)]
    #[test]
    fn test_fifo_is_skipped() {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let source = dir.path().join("DICOM");
        let target = dir.path().join("out");
        many_files(&source, 2);
        let fifo = CString::new(source.join("pipe").as_os_str().as_bytes()).unwrap();
        assert_eq!(unsafe { libc::mkfifo(fifo.as_ptr(), 0o644) }, 0);

        let outcome = CopyJob::new(&source, &target).unwrap().run(|_| {});

        assert_eq!(outcome.summary().files_copied, 2);
        assert_eq!(outcome.summary().files_failed, 1);
        assert!(!target.join("pipe").exists());
    }
}
