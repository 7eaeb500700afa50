//! Top-N processes by CPU usage.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

use super::collector::ProcessCollector;
use super::metrics::ProcessSample;
use crate::core::blocking;
use crate::error::{ProcIntelError, Result};

/// Validated input of a ranking call
#[derive(Debug, Clone, PartialEq)]
pub struct TopRequest {
    pub n: usize,
    pub delay: Duration,
    pub include_self: bool,
}

impl TopRequest {
    /// `delay_secs` must be finite, non-negative and at most `max_delay_secs`
    pub fn new(n: usize, delay_secs: f64, include_self: bool, max_delay_secs: f64) -> Result<Self> {
        if !delay_secs.is_finite() || delay_secs < 0.0 {
            return Err(ProcIntelError::invalid_arguments(format!(
                "delay must be a non-negative number of seconds, got {}",
                delay_secs
            )));
        }
        if delay_secs > max_delay_secs {
            return Err(ProcIntelError::invalid_arguments(format!(
                "delay {}s exceeds the maximum of {}s",
                delay_secs, max_delay_secs
            )));
        }

        Ok(Self {
            n,
            delay: Duration::from_secs_f64(delay_secs),
            include_self,
        })
    }
}

/// One ranked entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProcess {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f32,
    pub memory_percent: Option<f32>,
}

/// Rank samples by CPU usage, highest first, ties by pid.
///
/// Samples without a CPU reading are dropped, as is `exclude_pid`.
pub fn rank(samples: Vec<ProcessSample>, n: usize, exclude_pid: Option<u32>) -> Vec<TopProcess> {
    let mut ranked: Vec<TopProcess> = samples
        .into_iter()
        .filter(|sample| Some(sample.pid) != exclude_pid)
        .filter_map(|sample| {
            sample.cpu_percent.map(|cpu_percent| TopProcess {
                pid: sample.pid,
                name: sample.name,
                cpu_percent,
                memory_percent: sample.memory_percent,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal)
            .then(a.pid.cmp(&b.pid))
    });

    ranked.truncate(n);
    ranked
}

/// Prime, wait `request.delay`, measure, rank.
///
/// With a zero delay most readings come back as 0; that is expected.
/// Dropping the returned future during the wait cancels the call.
pub async fn top_processes<C>(collector: C, request: &TopRequest) -> Result<Vec<TopProcess>>
where
    C: ProcessCollector + 'static,
{
    let (mut collector, baseline) = blocking::run(move || {
        let mut collector = collector;
        let baseline = collector.prime();
        (collector, baseline)
    })
    .await?;

    log::debug!(
        "Primed {} processes, sampling for {:?}",
        baseline.len(),
        request.delay
    );
    tokio::time::sleep(request.delay).await;

    let samples = blocking::run(move || collector.measure(&baseline)).await?;

    let exclude_pid = (!request.include_self).then(std::process::id);
    Ok(rank(samples, request.n, exclude_pid))
}
