use sysinfo::{
    MemoryRefreshKind, Process, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System,
};

use super::metrics::{Baseline, ProcessSample};

/// Reads live processes.
///
/// CPU usage is differential, so readers expose it as an explicit two-call
/// protocol: [`prime`](ProcessCollector::prime) establishes the baseline and
/// [`measure`](ProcessCollector::measure), called after the caller has waited,
/// yields meaningful readings for every process the baseline covers.
pub trait ProcessCollector: Send {
    /// Take the CPU baseline for every live process
    fn prime(&mut self) -> Baseline;

    /// Read all live processes; `cpu_percent` is set only where `baseline` applies
    fn measure(&mut self, baseline: &Baseline) -> Vec<ProcessSample>;

    /// Read all live processes without CPU readings
    fn snapshot(&mut self) -> Vec<ProcessSample>;
}

/// [`ProcessCollector`] backed by `sysinfo`. Build one per call.
pub struct SysinfoCollector {
    system: System,
}

impl SysinfoCollector {
    pub fn new() -> Self {
        let refresh = RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram());
        Self {
            system: System::new_with_specifics(refresh),
        }
    }

    fn refresh(&mut self, with_cpu: bool) {
        let mut kind = ProcessRefreshKind::nothing().with_memory();
        if with_cpu {
            kind = kind.with_cpu();
        }
        // Processes that exited since the last pass are dropped here
        let refreshed = self
            .system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, kind);
        log::trace!("Refreshed {} processes", refreshed);
    }

    /// Userland processes only; threads listed by the OS are skipped
    fn processes(&self) -> impl Iterator<Item = &Process> {
        self.system
            .processes()
            .values()
            .filter(|process| process.thread_kind().is_none())
    }

    fn sample(&self, process: &Process, cpu_percent: Option<f32>) -> ProcessSample {
        let total_memory = self.system.total_memory();
        let resident = process.memory();

        ProcessSample {
            pid: process.pid().as_u32(),
            parent_pid: process.parent().map(|pid| pid.as_u32()),
            name: process.name().to_string_lossy().to_string(),
            cpu_percent,
            memory_percent: if total_memory > 0 {
                Some((resident as f64 / total_memory as f64 * 100.0) as f32)
            } else {
                None
            },
            resident_memory_bytes: Some(resident),
            status: process.status().into(),
            start_time: process.start_time(),
        }
    }
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessCollector for SysinfoCollector {
    fn prime(&mut self) -> Baseline {
        self.refresh(true);
        self.processes()
            .map(|process| (process.pid().as_u32(), process.start_time()))
            .collect()
    }

    fn measure(&mut self, baseline: &Baseline) -> Vec<ProcessSample> {
        self.refresh(true);
        self.processes()
            .map(|process| {
                let pid = process.pid().as_u32();
                let cpu = process.cpu_usage();
                let cpu_percent = (baseline.covers(pid, process.start_time()) && cpu.is_finite())
                    .then_some(cpu);
                self.sample(process, cpu_percent)
            })
            .collect()
    }

    fn snapshot(&mut self) -> Vec<ProcessSample> {
        self.refresh(false);
        self.processes()
            .map(|process| self.sample(process, None))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_contains_current_process() {
        let mut collector = SysinfoCollector::new();
        let own_pid = std::process::id();

        let samples = collector.snapshot();
        let own = samples.iter().find(|s| s.pid == own_pid);

        assert!(own.is_some());
        assert!(samples.iter().all(|s| s.cpu_percent.is_none()));
    }

    #[test]
    fn test_measure_after_prime_reports_cpu() {
        let mut collector = SysinfoCollector::new();
        let baseline = collector.prime();
        assert!(!baseline.is_empty());

        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        let samples = collector.measure(&baseline);

        let own = samples
            .iter()
            .find(|s| s.pid == std::process::id())
            .unwrap();
        assert!(own.cpu_percent.is_some());
        assert!(own.resident_memory_bytes.unwrap_or(0) > 0);
    }

    #[test]
    fn test_measure_without_baseline_has_no_cpu() {
        let mut collector = SysinfoCollector::new();
        let samples = collector.measure(&Baseline::default());
        assert!(samples.iter().all(|s| s.cpu_percent.is_none()));
    }
}
