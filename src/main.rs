use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::PathBuf;

use procintel::commands;
use procintel::core::config::Config;

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Print the raw JSON payload instead of a table")
        .action(clap::ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("procintel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local process and host telemetry, as a CLI or a tool server for agents")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Configuration file (default: $PROCINTEL_CONFIG, then the user config dir)")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(Command::new("serve").about("Serve the tools over MCP on stdin/stdout"))
        .subcommand(
            Command::new("summary")
                .about("Show OS, CPU, RAM, disk and boot time")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("cpu")
                .about("Measure CPU usage over one second")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("memory")
                .about("Show RAM and swap usage")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("disk")
                .about("Show usage of the configured filesystem")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("top")
                .about("List the busiest processes by CPU")
                .arg(
                    Arg::new("n")
                        .short('n')
                        .long("count")
                        .value_name("N")
                        .help("Number of processes to show")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("delay")
                        .short('d')
                        .long("delay")
                        .value_name("SECONDS")
                        .help("Sampling delay between CPU readings")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("include-self")
                        .long("include-self")
                        .help("Include this process in the ranking")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("find")
                .about("Find processes whose name contains the given text")
                .arg(
                    Arg::new("name")
                        .help("Name or partial name (case-insensitive)")
                        .required(true)
                        .index(1),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("tree")
                .about("Show a process and all of its descendants")
                .arg(
                    Arg::new("pid")
                        .help("Process ID of the root process")
                        .required(true)
                        .value_parser(clap::value_parser!(u32))
                        .index(1),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("spikes")
                .about("Warn when CPU or memory usage exceeds a threshold")
                .arg(
                    Arg::new("threshold")
                        .short('t')
                        .long("threshold")
                        .value_name("PERCENT")
                        .help("Usage percentage above which to warn (0-100)")
                        .value_parser(clap::value_parser!(i64)),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("anomalies")
                .about("Flag stalled memory-heavy processes and zombies")
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("tools")
                .about("List the tools exposed by 'procintel serve'")
                .arg(json_flag()),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let explicit = matches.get_one::<PathBuf>("config");
    Config::load(explicit.map(PathBuf::as_path))
}

#[tokio::main]
async fn main() -> Result<()> {
    procintel::init_logging();

    let matches = build_cli().get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    let config = load_config(&matches)?;

    match matches.subcommand() {
        Some(("serve", _)) => commands::serve(config).await,
        Some(("summary", sub_matches)) => {
            commands::sys::execute_summary(sub_matches, &config).await
        }
        Some(("cpu", sub_matches)) => commands::sys::execute_cpu(sub_matches).await,
        Some(("memory", sub_matches)) => commands::sys::execute_memory(sub_matches).await,
        Some(("disk", sub_matches)) => commands::sys::execute_disk(sub_matches, &config).await,
        Some(("top", sub_matches)) => commands::process::execute_top(sub_matches, &config).await,
        Some(("find", sub_matches)) => commands::process::execute_find(sub_matches).await,
        Some(("tree", sub_matches)) => commands::process::execute_tree(sub_matches).await,
        Some(("spikes", sub_matches)) => commands::sys::execute_spikes(sub_matches, &config).await,
        Some(("anomalies", sub_matches)) => commands::anomalies(sub_matches, &config).await,
        Some(("tools", sub_matches)) => commands::tools(sub_matches, config),
        Some(("version", _)) => commands::version(),
        _ => {
            println!("Welcome to procintel!");
            println!("Use 'procintel --help' for more information.");
            Ok(())
        }
    }
}
