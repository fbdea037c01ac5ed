//! Cancellable folder copying with progress tracking.
//!
//! This crate copies a source directory tree into a destination that must not
//! exist yet:
//!
//! * Sequential, depth-first walk using `jwalk`
//! * Copy-on-write support via `reflink-copy` (APFS, Btrfs, `ReFS`)
//! * Byte-level progress callbacks for UI integration
//! * Cooperative cancellation that removes the partial destination
//! * Up-front size estimation (`du` or an in-process walk)
//!
//! # Example
//!
//! ```rust,ignore
//! use dicom_importer_copy::{CopyJob, DuSizeEstimator};
//!
//! let job = CopyJob::new(source, target)?.estimate_total(&DuSizeEstimator);
//! let cancel = job.cancel_token();
//!
//! let outcome = job.run(|progress| {
//!     println!("{:.1} MB of {:.1} MB", progress.megabytes_copied(), progress.megabytes_total());
//! });
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod cancel;
mod copy;
mod error;
mod progress;
mod size;

pub use cancel::CancelToken;
pub use copy::{CopyJob, CopyOptions, CopyOutcome, CopySummary, check_preconditions};
pub use error::CopyError;
pub use progress::{CopyProgress, JobState, ProgressTracker};
pub use size::{
    DuSizeEstimator, SizeEstimator, WalkSizeEstimator, estimate_total_bytes, kilobytes_to_bytes,
};
