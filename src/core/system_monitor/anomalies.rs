//! Heuristic classification of suspicious processes.
//!
//! Two independent checks run on every process: a large resident set with
//! almost no CPU (stalled or leaking), and zombie/defunct state. A process may
//! produce both findings.

use serde::{Deserialize, Serialize, Serializer};
use std::time::Duration;

use super::collector::ProcessCollector;
use super::metrics::ProcessSample;
use crate::core::blocking;
use crate::core::config::AnomalyConfig;
use crate::core::system_info::units::bytes_to_mb;
use crate::error::Result;

/// Reported in place of an empty finding list
pub const NO_ANOMALIES: &str = "No anomalies detected.";
pub const ZOMBIE_ISSUE: &str = "Zombie/defunct process";

/// Limits of the stalled/leaking heuristic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyRules {
    /// Resident memory above this many decimal MB...
    pub memory_mb: f64,
    /// ...with CPU below this percentage is flagged
    pub cpu_percent: f32,
}

impl Default for AnomalyRules {
    fn default() -> Self {
        Self {
            memory_mb: 1000.0,
            cpu_percent: 1.0,
        }
    }
}

impl From<&AnomalyConfig> for AnomalyRules {
    fn from(config: &AnomalyConfig) -> Self {
        Self {
            memory_mb: config.memory_mb,
            cpu_percent: config.cpu_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFinding {
    pub pid: u32,
    pub name: String,
    pub issue: String,
}

/// Outcome of a scan. `Clean` serializes as `["No anomalies detected."]`.
#[derive(Debug, Clone, PartialEq)]
pub enum AnomalyReport {
    Findings(Vec<AnomalyFinding>),
    Clean,
}

impl AnomalyReport {
    pub fn findings(&self) -> &[AnomalyFinding] {
        match self {
            AnomalyReport::Findings(findings) => findings,
            AnomalyReport::Clean => &[],
        }
    }
}

impl Serialize for AnomalyReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            AnomalyReport::Findings(findings) => findings.serialize(serializer),
            AnomalyReport::Clean => [NO_ANOMALIES].serialize(serializer),
        }
    }
}

fn check_stalled(sample: &ProcessSample, rules: &AnomalyRules) -> Option<AnomalyFinding> {
    let memory_mb = bytes_to_mb(sample.resident_memory_bytes?);
    let cpu = sample.cpu_percent?;

    (memory_mb > rules.memory_mb && cpu < rules.cpu_percent).then(|| AnomalyFinding {
        pid: sample.pid,
        name: sample.name.clone(),
        issue: format!("High memory ({:.1}MB), low CPU ({:.1}%)", memory_mb, cpu),
    })
}

fn check_zombie(sample: &ProcessSample) -> Option<AnomalyFinding> {
    sample.status.is_defunct().then(|| AnomalyFinding {
        pid: sample.pid,
        name: sample.name.clone(),
        issue: ZOMBIE_ISSUE.to_string(),
    })
}

/// Apply both heuristics to every sample, in pid order
pub fn classify(samples: &[ProcessSample], rules: &AnomalyRules) -> AnomalyReport {
    let mut ordered: Vec<&ProcessSample> = samples.iter().collect();
    ordered.sort_by_key(|sample| sample.pid);

    let findings: Vec<AnomalyFinding> = ordered
        .into_iter()
        .flat_map(|sample| [check_stalled(sample, rules), check_zombie(sample)])
        .flatten()
        .collect();

    if findings.is_empty() {
        AnomalyReport::Clean
    } else {
        AnomalyReport::Findings(findings)
    }
}

/// Scan live processes once and classify them.
///
/// A non-zero `window` takes a CPU baseline first so the stalled check has
/// readings to work with; with a zero window CPU is absent and only the
/// zombie check can fire.
pub async fn analyze_process_anomalies<C>(
    collector: C,
    rules: AnomalyRules,
    window: Duration,
) -> Result<AnomalyReport>
where
    C: ProcessCollector + 'static,
{
    let samples = if window.is_zero() {
        let mut collector = collector;
        blocking::run(move || collector.snapshot()).await?
    } else {
        let (mut collector, baseline) = blocking::run(move || {
            let mut collector = collector;
            let baseline = collector.prime();
            (collector, baseline)
        })
        .await?;
        tokio::time::sleep(window).await;
        blocking::run(move || collector.measure(&baseline)).await?
    };

    log::debug!("Classifying {} processes", samples.len());
    Ok(classify(&samples, &rules))
}
