use anyhow::{Context, Result};
use clap::ArgMatches;
use std::time::Duration;

use crate::core::config::Config;
use crate::core::system_monitor::{analyze_process_anomalies, AnomalyRules, SysinfoCollector};
use crate::ui::{print_json, process_formatters};

/// Scan processes for stalled memory hogs and zombies
pub async fn execute(matches: &ArgMatches, config: &Config) -> Result<()> {
    let report = analyze_process_anomalies(
        SysinfoCollector::new(),
        AnomalyRules::from(&config.anomaly),
        Duration::from_millis(config.anomaly.sample_window_ms),
    )
    .await
    .context("Failed to scan processes")?;

    if matches.get_flag("json") {
        print_json(&report)?;
    } else {
        process_formatters::print_anomalies(&report);
    }
    Ok(())
}
