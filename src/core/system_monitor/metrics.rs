use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One live process, read from the OS for a single call and never cached
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub parent_pid: Option<u32>,
    pub name: String,
    /// Absent when no baseline was taken for this process
    pub cpu_percent: Option<f32>,
    pub memory_percent: Option<f32>,
    pub resident_memory_bytes: Option<u64>,
    pub status: ProcessState,
    /// Start time (seconds since epoch), used to tell reused pids apart
    pub start_time: u64,
}

/// OS process state, named the way `ps`-style tools report it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessState {
    Running,
    Sleeping,
    DiskSleep,
    Idle,
    Stopped,
    TracingStop,
    Zombie,
    Dead,
    WakeKill,
    Waking,
    Parked,
    Locked,
    #[default]
    Unknown,
}

impl ProcessState {
    /// Zombie or defunct: the process has exited but was never reaped
    pub fn is_defunct(&self) -> bool {
        matches!(self, ProcessState::Zombie | ProcessState::Dead)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessState::Running => "running",
            ProcessState::Sleeping => "sleeping",
            ProcessState::DiskSleep => "disk-sleep",
            ProcessState::Idle => "idle",
            ProcessState::Stopped => "stopped",
            ProcessState::TracingStop => "tracing-stop",
            ProcessState::Zombie => "zombie",
            ProcessState::Dead => "dead",
            ProcessState::WakeKill => "wake-kill",
            ProcessState::Waking => "waking",
            ProcessState::Parked => "parked",
            ProcessState::Locked => "locked",
            ProcessState::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<sysinfo::ProcessStatus> for ProcessState {
    fn from(status: sysinfo::ProcessStatus) -> Self {
        use sysinfo::ProcessStatus;

        match status {
            ProcessStatus::Run => ProcessState::Running,
            ProcessStatus::Sleep => ProcessState::Sleeping,
            ProcessStatus::UninterruptibleDiskSleep => ProcessState::DiskSleep,
            ProcessStatus::Idle => ProcessState::Idle,
            ProcessStatus::Stop => ProcessState::Stopped,
            ProcessStatus::Tracing => ProcessState::TracingStop,
            ProcessStatus::Zombie => ProcessState::Zombie,
            ProcessStatus::Dead => ProcessState::Dead,
            ProcessStatus::Wakekill => ProcessState::WakeKill,
            ProcessStatus::Waking => ProcessState::Waking,
            ProcessStatus::Parked => ProcessState::Parked,
            ProcessStatus::LockBlocked => ProcessState::Locked,
            _ => ProcessState::Unknown,
        }
    }
}

/// Processes seen by the priming pass of the CPU protocol.
///
/// A CPU reading is only meaningful for a process that was already alive,
/// under the same pid and start time, when the baseline was taken.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    started: HashMap<u32, u64>,
}

impl Baseline {
    pub fn record(&mut self, pid: u32, start_time: u64) {
        self.started.insert(pid, start_time);
    }

    pub fn covers(&self, pid: u32, start_time: u64) -> bool {
        self.started.get(&pid) == Some(&start_time)
    }

    pub fn len(&self) -> usize {
        self.started.len()
    }

    pub fn is_empty(&self) -> bool {
        self.started.is_empty()
    }
}

impl FromIterator<(u32, u64)> for Baseline {
    fn from_iter<I: IntoIterator<Item = (u32, u64)>>(iter: I) -> Self {
        Self {
            started: iter.into_iter().collect(),
        }
    }
}
