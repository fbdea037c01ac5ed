//! Progress tracking for copy operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Lifecycle of a copy job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Created, not started.
    Idle,
    /// Worker is walking the source tree.
    Running,
    /// Walk finished without cancellation.
    Completed,
    /// Walk stopped on request and the destination was removed.
    Cancelled,
}

impl JobState {
    const fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Completed => 2,
            Self::Cancelled => 3,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Completed,
            3 => Self::Cancelled,
            _ => Self::Idle,
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Progress information for a copy operation.
#[derive(Debug, Clone)]
pub struct CopyProgress {
    /// Estimated total number of bytes to copy.
    pub bytes_total: u64,
    /// Number of bytes copied so far.
    pub bytes_copied: u64,
    /// Number of files copied so far.
    pub files_copied: u64,
    /// Last file copied (if any).
    pub current_file: Option<String>,
}

impl CopyProgress {
    /// Create a new progress report.
    #[must_use]
    pub const fn new(
        bytes_total: u64,
        bytes_copied: u64,
        files_copied: u64,
        current_file: Option<String>,
    ) -> Self {
        Self {
            bytes_total,
            bytes_copied,
            files_copied,
            current_file,
        }
    }

    /// Progress as a fraction between 0.0 and 1.0.
    ///
    /// A zero total counts as complete. The total is an up-front estimate, so
    /// the copied count may overshoot it; the result is clamped.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.bytes_total == 0 {
            1.0
        } else {
            (self.bytes_copied as f64 / self.bytes_total as f64).min(1.0)
        }
    }

    /// Calculate progress as a percentage (0.0 to 100.0).
    #[must_use]
    pub fn percentage(&self) -> f64 {
        self.fraction() * 100.0
    }

    /// Bytes copied, in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn megabytes_copied(&self) -> f64 {
        self.bytes_copied as f64 / BYTES_PER_MEGABYTE
    }

    /// Estimated total, in megabytes.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn megabytes_total(&self) -> f64 {
        self.bytes_total as f64 / BYTES_PER_MEGABYTE
    }
}

/// Thread-safe progress tracker using atomics.
///
/// Counters are only written by the copy worker; any thread may read them.
#[derive(Debug)]
pub struct ProgressTracker {
    bytes_total: AtomicU64,
    bytes_copied: AtomicU64,
    files_copied: AtomicU64,
    files_failed: AtomicU64,
    state: AtomicU8,
}

impl ProgressTracker {
    /// Create a new progress tracker.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Set the estimated total number of bytes.
    pub fn set_total(&self, total: u64) {
        self.bytes_total.store(total, Ordering::SeqCst);
    }

    /// Record a successfully copied file of `bytes` bytes.
    pub fn add_copied(&self, bytes: u64) {
        self.bytes_copied.fetch_add(bytes, Ordering::SeqCst);
        self.files_copied.fetch_add(1, Ordering::SeqCst);
    }

    /// Record an entry that could not be copied.
    pub fn add_failed(&self) {
        self.files_failed.fetch_add(1, Ordering::SeqCst);
    }

    /// Get the estimated total.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bytes_total.load(Ordering::SeqCst)
    }

    /// Get the number of bytes copied.
    #[must_use]
    pub fn copied(&self) -> u64 {
        self.bytes_copied.load(Ordering::SeqCst)
    }

    /// Get the number of files copied.
    #[must_use]
    pub fn files_copied(&self) -> u64 {
        self.files_copied.load(Ordering::SeqCst)
    }

    /// Get the number of entries that failed.
    #[must_use]
    pub fn files_failed(&self) -> u64 {
        self.files_failed.load(Ordering::SeqCst)
    }

    /// Current job state.
    #[must_use]
    pub fn state(&self) -> JobState {
        JobState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Move from `from` to `to`.
    ///
    /// Returns `false` and leaves the state alone if the current state is not
    /// `from`.
    pub fn transition(&self, from: JobState, to: JobState) -> bool {
        let moved = self
            .state
            .compare_exchange(
                from.as_u8(),
                to.as_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if moved {
            log::trace!("Copy job {from:?} -> {to:?}");
        } else {
            log::warn!("Ignoring copy job transition {from:?} -> {to:?}");
        }
        moved
    }

    /// Get a progress snapshot.
    #[must_use]
    pub fn snapshot(&self, current_file: Option<String>) -> CopyProgress {
        CopyProgress::new(self.total(), self.copied(), self.files_copied(), current_file)
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self {
            bytes_total: AtomicU64::new(0),
            bytes_copied: AtomicU64::new(0),
            files_copied: AtomicU64::new(0),
            files_failed: AtomicU64::new(0),
            state: AtomicU8::new(JobState::Idle.as_u8()),
        }
    }
}
