//! CPU and memory spike detection against a single percentage threshold.

use serde::{Serialize, Serializer};

use crate::core::system_info::units::round_to;
use crate::core::system_info::{cpu, memory};
use crate::core::blocking;
use crate::error::{ProcIntelError, Result};

/// Reported in place of an empty warning list
pub const USAGE_NORMAL: &str = "System usage normal.";

/// Instantaneous usage, both values in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageSnapshot {
    pub cpu_percent: f32,
    pub memory_percent: f32,
}

/// Warnings raised by a spike check.
///
/// Serializes `Normal` as the one-element list `["System usage normal."]`,
/// so callers distinguish "no warnings" by that sentinel, not by length.
#[derive(Debug, Clone, PartialEq)]
pub enum SpikeWarnings {
    Raised(Vec<String>),
    Normal,
}

impl Serialize for SpikeWarnings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SpikeWarnings::Raised(warnings) => warnings.serialize(serializer),
            SpikeWarnings::Normal => [USAGE_NORMAL].serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpikeReport {
    pub cpu_percent: f32,
    pub memory_percent: f32,
    pub threshold: u8,
    pub warnings: SpikeWarnings,
}

/// Accept thresholds in 0..=100 only
pub fn validate_threshold(threshold: i64) -> Result<u8> {
    u8::try_from(threshold)
        .ok()
        .filter(|t| *t <= 100)
        .ok_or_else(|| {
            ProcIntelError::invalid_arguments(format!(
                "threshold must be between 0 and 100, got {}",
                threshold
            ))
        })
}

/// Compare each metric against `threshold`; only values strictly above it warn
pub fn evaluate_spikes(usage: &UsageSnapshot, threshold: u8) -> SpikeReport {
    let limit = f32::from(threshold);
    let mut warnings = Vec::new();

    if usage.cpu_percent > limit {
        warnings.push(format!(
            "High CPU usage detected: {:.1}%",
            usage.cpu_percent
        ));
    }
    if usage.memory_percent > limit {
        warnings.push(format!(
            "High Memory usage detected: {:.1}%",
            usage.memory_percent
        ));
    }

    SpikeReport {
        cpu_percent: usage.cpu_percent,
        memory_percent: usage.memory_percent,
        threshold,
        warnings: if warnings.is_empty() {
            SpikeWarnings::Normal
        } else {
            SpikeWarnings::Raised(warnings)
        },
    }
}

/// Sample CPU over the fixed window and memory instantly, then evaluate
pub async fn detect_spikes(threshold: u8) -> Result<SpikeReport> {
    let cpu_percent = cpu::sample_global_usage(cpu::CPU_SAMPLE_WINDOW).await;
    let counters = blocking::run(memory::read_counters).await?;

    let usage = UsageSnapshot {
        cpu_percent,
        memory_percent: round_to(memory::used_percent(&counters), 1) as f32,
    };

    Ok(evaluate_spikes(&usage, threshold))
}
