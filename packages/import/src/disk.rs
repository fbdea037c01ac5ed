//! Free space on the destination volume.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use sysinfo::Disks;

use crate::error::ImportError;

const BYTES_PER_GIGABYTE: f64 = 1024.0 * 1024.0 * 1024.0;

/// Space on the volume holding a path, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    /// Volume size.
    pub total: u64,
    /// Space in use.
    pub used: u64,
    /// Space available to unprivileged users.
    pub free: u64,
}

impl DiskUsage {
    /// Used space as a whole percentage of the total.
    #[must_use]
    pub const fn percent_used(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            self.used.saturating_mul(100) / self.total
        }
    }

    /// Remaining percentage, as shown next to the free space.
    #[must_use]
    pub const fn percent_free(&self) -> u64 {
        100_u64.saturating_sub(self.percent_used())
    }
}

/// Format bytes as gigabytes with one decimal.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_gigabytes(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / BYTES_PER_GIGABYTE)
}

/// Query the volume that holds `path`.
///
/// The volume is the mounted disk whose mount point is the longest prefix of
/// the absolute `path`.
///
/// # Errors
///
/// * If `path` does not exist
/// * If no mounted disk contains `path`
pub fn disk_usage(path: &Path) -> Result<DiskUsage, ImportError> {
    let to_error = |source: std::io::Error| ImportError::DiskUsageError {
        path: path.to_path_buf(),
        source,
    };

    fs::metadata(path).map_err(to_error)?;
    let resolved = std::path::absolute(path).map_err(to_error)?;
    let disks = Disks::new_with_refreshed_list();

    let usage = usage_for(
        &resolved,
        disks
            .list()
            .iter()
            .map(|d| (d.mount_point(), d.total_space(), d.available_space())),
    )
    .ok_or_else(|| {
        to_error(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no mounted disk contains this path",
        ))
    })?;
    log::debug!("Disk usage of {}: {usage:?}", path.display());

    Ok(usage)
}

/// Pick the mount with the longest mount point containing `path`.
///
/// `mounts` yields `(mount point, total bytes, available bytes)`.
fn usage_for<'a>(
    path: &Path,
    mounts: impl IntoIterator<Item = (&'a Path, u64, u64)>,
) -> Option<DiskUsage> {
    mounts
        .into_iter()
        .filter(|(mount, _, _)| path.starts_with(mount))
        .max_by_key(|(mount, _, _)| mount.components().count())
        .map(|(_, total, available)| DiskUsage {
            total,
            used: total.saturating_sub(available),
            free: available,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_percentages() {
        let usage = DiskUsage {
            total: 200,
            used: 50,
            free: 150,
        };
        assert_eq!(usage.percent_used(), 25);
        assert_eq!(usage.percent_free(), 75);

        let empty = DiskUsage {
            total: 0,
            used: 0,
            free: 0,
        };
        assert_eq!(empty.percent_used(), 0);
        assert_eq!(empty.percent_free(), 100);
    }

    #[test]
    fn test_format_gigabytes() {
        assert_eq!(format_gigabytes(0), "0.0 GB");
        assert_eq!(format_gigabytes(3 * 1024 * 1024 * 1024 / 2), "1.5 GB");
    }

    #[test]
    fn test_longest_mount_point_wins() {
        let mounts = [
            (Path::new("/"), 1000, 400),
            (Path::new("/srv"), 500, 100),
            (Path::new("/srv/dicom-archive"), 200, 150),
        ];

        let usage = usage_for(Path::new("/srv/dicom/2023"), mounts).unwrap();

        assert_eq!(usage.total, 500);
        assert_eq!(usage.used, 400);
        assert_eq!(usage.free, 100);
    }

    #[test]
    fn test_no_mount_contains_path() {
        let mounts = [(Path::new("/mnt/cdrom"), 700, 0)];
        assert_eq!(usage_for(Path::new("/srv"), mounts), None);
    }

    #[test]
    fn test_disk_usage_of_temp_dir() {
        let dir = TempDir::new().unwrap();
        let usage = disk_usage(dir.path()).unwrap();

        assert!(usage.total > 0);
        assert!(usage.used <= usage.total);
        assert!(usage.free <= usage.total);
    }

    #[test]
    fn test_disk_usage_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = disk_usage(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ImportError::DiskUsageError { .. }));
    }
}
