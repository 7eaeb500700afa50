//! Host commands: `summary`, `cpu`, `memory`, `disk` and `spikes`.

use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use crate::core::blocking;
use crate::core::config::Config;
use crate::core::system_info::{collect_system_summary, cpu, memory, storage};
use crate::core::system_monitor::{alerts, detect_spikes};
use crate::ui::{print_json, system_formatters};

pub async fn execute_summary(matches: &ArgMatches, config: &Config) -> Result<()> {
    let path = PathBuf::from(&config.disk_path);
    let summary = blocking::run(move || collect_system_summary(&path)).await?;

    if matches.get_flag("json") {
        print_json(&summary)?;
    } else {
        system_formatters::print_summary(&summary);
    }
    Ok(())
}

pub async fn execute_cpu(matches: &ArgMatches) -> Result<()> {
    let usage = cpu::collect_usage().await;

    if matches.get_flag("json") {
        print_json(&usage)?;
    } else {
        system_formatters::print_cpu_usage(&usage);
    }
    Ok(())
}

pub async fn execute_memory(matches: &ArgMatches) -> Result<()> {
    let usage = blocking::run(memory::collect).await?;

    if matches.get_flag("json") {
        print_json(&usage)?;
    } else {
        system_formatters::print_memory_usage(&usage);
    }
    Ok(())
}

pub async fn execute_disk(matches: &ArgMatches, config: &Config) -> Result<()> {
    let path = PathBuf::from(&config.disk_path);
    let usage = blocking::run(move || storage::collect(&path))
        .await?
        .with_context(|| format!("Failed to read disk usage for {}", config.disk_path))?;

    if matches.get_flag("json") {
        print_json(&usage)?;
    } else {
        system_formatters::print_disk_usage(&config.disk_path, &usage);
    }
    Ok(())
}

pub async fn execute_spikes(matches: &ArgMatches, config: &Config) -> Result<()> {
    let threshold = match matches.get_one::<i64>("threshold") {
        Some(&threshold) => alerts::validate_threshold(threshold)?,
        None => config.spike_threshold,
    };

    let report = detect_spikes(threshold).await?;

    if matches.get_flag("json") {
        print_json(&report)?;
    } else {
        system_formatters::print_spike_report(&report);
    }
    Ok(())
}
