//! Progress bar utilities for the CLI.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::time::Duration;

use dicom_importer_copy::CopyProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Progress bar manager for the copy.
pub struct ProgressManager {
    multi: Arc<MultiProgress>,
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            multi: Arc::new(MultiProgress::new()),
            enabled,
        }
    }

    /// Create a byte progress bar for a copy of `total_bytes`.
    ///
    /// An unknown total (zero) gets a spinner instead of a bar.
    /// If progress is disabled, returns a hidden progress bar.
    #[must_use]
    pub fn create_copy_bar(&self, total_bytes: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        if total_bytes == 0 {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("  {spinner:.green} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.enable_steady_tick(Duration::from_millis(120));
            return pb;
        }

        let pb = self.multi.add(ProgressBar::new(total_bytes));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:30.green/dim}] {percent:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("━━─"),
        );
        pb
    }

    /// Reflect a progress snapshot on `pb`.
    pub fn update(&self, pb: &ProgressBar, progress: &CopyProgress) {
        if !self.enabled {
            return;
        }

        if progress.bytes_total == 0 {
            pb.set_message(format!(
                "{:.1} MB copied ({} files)",
                progress.megabytes_copied(),
                progress.files_copied
            ));
            return;
        }

        pb.set_position(progress.bytes_copied.min(progress.bytes_total));
        pb.set_message(progress_message(progress));
    }

    /// Clear any active progress bars (for clean output after completion).
    pub fn clear(&self) {
        self.multi.clear().ok();
    }
}

/// `"{copied} MB of {total} MB"`, as shown next to the bar.
#[must_use]
pub fn progress_message(progress: &CopyProgress) -> String {
    format!(
        "{:.1} MB of {:.1} MB",
        progress.megabytes_copied(),
        progress.megabytes_total()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_message() {
        let progress = CopyProgress {
            bytes_total: 10 * 1024 * 1024,
            bytes_copied: 3 * 1024 * 1024 + 17,
            files_copied: 3,
            current_file: None,
        };

        assert_eq!(progress_message(&progress), "3.0 MB of 10.0 MB");
    }

    #[test]
    fn test_disabled_bar_is_hidden() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_copy_bar(100);
        assert!(pb.is_hidden());
    }
}
