use crate::core::system_info::types::CpuUsage;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, RefreshKind, System};

/// Window over which global CPU usage is measured
pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// CPU brand string and logical core count
pub fn collect_label() -> (String, usize) {
    let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing());
    let sys = System::new_with_specifics(refresh);

    let cpus = sys.cpus();
    let brand = cpus
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(System::cpu_arch);

    (brand, cpus.len())
}

/// Measure global CPU usage across `window`.
///
/// Usage is differential, so the counters are read once, the calling task
/// sleeps, and the counters are read again.
pub async fn sample_global_usage(window: Duration) -> f32 {
    let refresh = RefreshKind::nothing().with_cpu(CpuRefreshKind::nothing().with_cpu_usage());
    let mut sys = System::new_with_specifics(refresh);
    sys.refresh_cpu_usage();

    tokio::time::sleep(window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL)).await;

    sys.refresh_cpu_usage();
    sys.global_cpu_usage().clamp(0.0, 100.0)
}

pub async fn collect_usage() -> CpuUsage {
    CpuUsage {
        cpu_percent: sample_global_usage(CPU_SAMPLE_WINDOW).await,
    }
}
