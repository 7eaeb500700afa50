use crate::core::system_info::types::{DiskCounters, DiskUsage};
use crate::core::system_info::units::{bytes_to_gb, percent_of, round_to};
use crate::error::{ProcIntelError, Result};
use std::path::Path;

/// Counters of the filesystem that holds `path`, straight from `statvfs(3)`.
#[cfg(unix)]
pub fn read_counters(path: &Path) -> Result<DiskCounters> {
    use std::ffi::CString;
    use std::io;
    use std::os::unix::ffi::OsStrExt;

    let c_path = CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        ProcIntelError::metric_collection(format!("Path {:?} contains a NUL byte", path))
    })?;

    // SAFETY: statvfs is plain old data, fully written by a successful call.
    let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
    // SAFETY: c_path is NUL-terminated and outlives the call.
    if unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) } != 0 {
        let err = io::Error::last_os_error();
        return Err(ProcIntelError::metric_collection(format!(
            "statvfs {:?} failed: {}",
            path, err
        )));
    }

    let fragment = u64::from(stat.f_frsize);
    log::trace!("statvfs {:?}: fragment size {}", path, fragment);

    Ok(DiskCounters {
        total: u64::from(stat.f_blocks).saturating_mul(fragment),
        free: u64::from(stat.f_bfree).saturating_mul(fragment),
        available: u64::from(stat.f_bavail).saturating_mul(fragment),
    })
}

/// Counters of the mounted filesystem that holds `path`.
///
/// The disk with the longest mount point that prefixes `path` wins, so
/// `/home/me` resolves to `/home` when it is a separate mount and to `/` otherwise.
#[cfg(not(unix))]
pub fn read_counters(path: &Path) -> Result<DiskCounters> {
    use sysinfo::Disks;

    let disks = Disks::new_with_refreshed_list();

    let disk = disks
        .list()
        .iter()
        .filter(|disk| path.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())
        .ok_or_else(|| {
            ProcIntelError::metric_collection(format!("No mounted filesystem holds {:?}", path))
        })?;

    log::trace!(
        "Disk usage for {:?} read from mount {:?}",
        path,
        disk.mount_point()
    );

    // No reserved-block figure here: free and available coincide.
    Ok(DiskCounters {
        total: disk.total_space(),
        free: disk.available_space(),
        available: disk.available_space(),
    })
}

/// Used space is everything not free, reserved blocks included; `free_gb`
/// is what an unprivileged user can still write.
pub fn usage_from_counters(counters: &DiskCounters) -> DiskUsage {
    let used = counters.total.saturating_sub(counters.free);

    DiskUsage {
        total_gb: bytes_to_gb(counters.total),
        used_gb: bytes_to_gb(used),
        free_gb: bytes_to_gb(counters.available),
        percent_used: round_to(percent_of(used, counters.total), 1),
    }
}

pub fn collect(path: &Path) -> Result<DiskUsage> {
    Ok(usage_from_counters(&read_counters(path)?))
}
