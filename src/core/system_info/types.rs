use serde::{Deserialize, Serialize};

/// High-level summary of the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSummary {
    pub os: String,
    pub cpu: String,
    pub cpu_count: usize,
    pub ram_total_gb: f64,
    pub disk_total_gb: f64,
    pub boot_time: u64, // Unix timestamp
}

/// CPU usage over a fixed sampling window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuUsage {
    pub cpu_percent: f32,
}

/// RAM and swap usage, in decimal gigabytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    #[serde(rename = "RAM")]
    pub ram: RamUsage,
    #[serde(rename = "SWAP")]
    pub swap: SwapUsage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RamUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64, // available memory
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub percent: f64,
}

/// Capacity of one filesystem, in decimal gigabytes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
    pub percent_used: f64,
}

/// Raw memory counters in bytes, as read from the OS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryCounters {
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub swap_total: u64,
    pub swap_used: u64,
}

/// Raw filesystem counters in bytes.
///
/// `free` counts every unused block; `available` leaves out the blocks
/// reserved for the superuser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskCounters {
    pub total: u64,
    pub free: u64,
    pub available: u64,
}
