use crate::core::system_info::types::SystemSummary;
use crate::core::system_info::units::bytes_to_gb;
use crate::core::system_info::{cpu, memory, os, storage};
use log::warn;
use std::path::Path;

/// Collect the high-level host summary.
///
/// Disk capacity is best-effort: a host without a filesystem mounted under
/// `disk_path` reports 0 rather than failing the whole summary.
pub fn collect_system_summary(disk_path: &Path) -> SystemSummary {
    let (cpu_label, cpu_count) = cpu::collect_label();
    let memory = memory::read_counters();

    let disk_total = storage::read_counters(disk_path)
        .map(|counters| counters.total)
        .unwrap_or_else(|e| {
            warn!("Failed to collect disk info: {}", e);
            0
        });

    SystemSummary {
        os: os::platform_label(),
        cpu: cpu_label,
        cpu_count,
        ram_total_gb: bytes_to_gb(memory.total),
        disk_total_gb: bytes_to_gb(disk_total),
        boot_time: os::boot_time(),
    }
}
