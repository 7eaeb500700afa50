use anyhow::Result;
use clap::ArgMatches;

use crate::core::config::Config;
use crate::server::Server;
use crate::ui::{print_json, process_formatters};

/// List the tools the server exposes
pub fn execute(matches: &ArgMatches, config: Config) -> Result<()> {
    let tools = Server::new(config).tools();

    if matches.get_flag("json") {
        print_json(&tools)?;
    } else {
        process_formatters::print_tools(&tools);
    }
    Ok(())
}
