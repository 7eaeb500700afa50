//! Tool operations: typed arguments in, JSON payload out.
//!
//! Argument structs double as the published input schemas; field docs become
//! the schema descriptions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::core::blocking;
use crate::core::config::Config;
use crate::core::system_info::{collect_system_summary, cpu, memory, storage};
use crate::core::system_monitor::{
    self, alerts, AnomalyRules, ProcessCollector, SysinfoCollector, TopRequest, TreeLookup,
};
use crate::error::Result;

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct TopArgs {
    /// Number of processes to return (default 10)
    pub n: Option<usize>,
    /// Seconds between CPU baseline and measurement (default 1.0)
    pub delay: Option<f64>,
    /// Include this server's own process (default false)
    pub include_self: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct FindArgs {
    /// Name or partial name to match
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TreeArgs {
    /// Process ID of the parent process
    pub pid: u32,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SpikeArgs {
    /// Usage percentage above which a warning is raised (default 80)
    #[schemars(range(min = 0, max = 100))]
    pub threshold: Option<i64>,
}

pub async fn system_summary(config: &Config) -> Result<Value> {
    let path = PathBuf::from(&config.disk_path);
    let summary = blocking::run(move || collect_system_summary(&path)).await?;
    Ok(serde_json::to_value(summary)?)
}

pub async fn cpu_usage() -> Result<Value> {
    Ok(serde_json::to_value(cpu::collect_usage().await)?)
}

pub async fn memory_usage() -> Result<Value> {
    let usage = blocking::run(memory::collect).await?;
    Ok(serde_json::to_value(usage)?)
}

pub async fn disk_usage(config: &Config) -> Result<Value> {
    let path = PathBuf::from(&config.disk_path);
    let usage = blocking::run(move || storage::collect(&path)).await??;
    Ok(serde_json::to_value(usage)?)
}

pub async fn top_processes(args: TopArgs, config: &Config) -> Result<Value> {
    let request = TopRequest::new(
        args.n.unwrap_or(config.top_n),
        args.delay.unwrap_or(config.top_delay_secs),
        args.include_self.unwrap_or(false),
        config.max_delay_secs,
    )?;

    let top = system_monitor::top_processes(SysinfoCollector::new(), &request).await?;
    Ok(serde_json::to_value(top)?)
}

pub async fn find_process_by_name(args: FindArgs) -> Result<Value> {
    let matches = blocking::run(move || {
        let samples = SysinfoCollector::new().snapshot();
        system_monitor::find_by_name(&samples, &args.name)
    })
    .await?;
    Ok(serde_json::to_value(matches)?)
}

pub async fn process_tree(args: TreeArgs) -> Result<Value> {
    let result = blocking::run(move || {
        let samples = SysinfoCollector::new().snapshot();
        system_monitor::resolve_tree(&samples, args.pid)
    })
    .await?;

    if let Err(ref e) = result {
        log::debug!("Process tree lookup failed: {}", e);
    }
    Ok(serde_json::to_value(TreeLookup::from(result))?)
}

pub async fn detect_spikes(args: SpikeArgs, config: &Config) -> Result<Value> {
    let threshold = match args.threshold {
        Some(threshold) => alerts::validate_threshold(threshold)?,
        None => config.spike_threshold,
    };
    let report = system_monitor::detect_spikes(threshold).await?;
    Ok(serde_json::to_value(report)?)
}

pub async fn analyze_process_anomalies(config: &Config) -> Result<Value> {
    let report = system_monitor::analyze_process_anomalies(
        SysinfoCollector::new(),
        AnomalyRules::from(&config.anomaly),
        Duration::from_millis(config.anomaly.sample_window_ms),
    )
    .await?;
    Ok(serde_json::to_value(report)?)
}
