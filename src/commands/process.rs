//! Process commands: `top`, `find` and `tree`.

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::core::blocking;
use crate::core::config::Config;
use crate::core::system_monitor::{
    find_by_name, resolve_tree, top_processes, ProcessCollector, SysinfoCollector, TopRequest,
    TreeLookup,
};
use crate::ui::{print_json, process_formatters};

pub async fn execute_top(matches: &ArgMatches, config: &Config) -> Result<()> {
    let n = matches.get_one::<usize>("n").copied().unwrap_or(config.top_n);
    let delay = matches
        .get_one::<f64>("delay")
        .copied()
        .unwrap_or(config.top_delay_secs);
    let include_self = matches.get_flag("include-self");

    let request = TopRequest::new(n, delay, include_self, config.max_delay_secs)?;
    let processes = top_processes(SysinfoCollector::new(), &request)
        .await
        .context("Failed to sample processes")?;

    if matches.get_flag("json") {
        print_json(&processes)?;
    } else {
        process_formatters::print_top_processes(&processes);
    }
    Ok(())
}

pub async fn execute_find(matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .cloned()
        .unwrap_or_default();

    let needle = name.clone();
    let found = blocking::run(move || {
        let samples = SysinfoCollector::new().snapshot();
        find_by_name(&samples, &needle)
    })
    .await?;

    if matches.get_flag("json") {
        print_json(&found)?;
    } else {
        process_formatters::print_matches(&name, &found);
    }
    Ok(())
}

pub async fn execute_tree(matches: &ArgMatches) -> Result<()> {
    let pid = matches
        .get_one::<u32>("pid")
        .copied()
        .context("A PID is required")?;

    let lookup = blocking::run(move || {
        let samples = SysinfoCollector::new().snapshot();
        TreeLookup::from(resolve_tree(&samples, pid))
    })
    .await?;

    if matches.get_flag("json") {
        print_json(&lookup)?;
    } else {
        process_formatters::print_tree(&lookup);
    }
    Ok(())
}
