use crate::core::system_info::types::{MemoryCounters, MemoryUsage, RamUsage, SwapUsage};
use crate::core::system_info::units::{bytes_to_gb, percent_of, round_to};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// Read the raw RAM and swap counters
pub fn read_counters() -> MemoryCounters {
    let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::everything());
    let sys = System::new_with_specifics(refresh);

    MemoryCounters {
        total: sys.total_memory(),
        used: sys.used_memory(),
        available: sys.available_memory(),
        swap_total: sys.total_swap(),
        swap_used: sys.used_swap(),
    }
}

/// Share of RAM not available to new allocations, in percent
pub fn used_percent(counters: &MemoryCounters) -> f64 {
    percent_of(
        counters.total.saturating_sub(counters.available),
        counters.total,
    )
}

pub fn usage_from_counters(counters: &MemoryCounters) -> MemoryUsage {
    MemoryUsage {
        ram: RamUsage {
            total_gb: bytes_to_gb(counters.total),
            used_gb: bytes_to_gb(counters.used),
            free_gb: bytes_to_gb(counters.available),
            percent: round_to(used_percent(counters), 1),
        },
        swap: SwapUsage {
            total_gb: bytes_to_gb(counters.swap_total),
            used_gb: bytes_to_gb(counters.swap_used),
            percent: round_to(percent_of(counters.swap_used, counters.swap_total), 1),
        },
    }
}

pub fn collect() -> MemoryUsage {
    usage_from_counters(&read_counters())
}
