use colored::*;
use rmcp::model::Tool;

use crate::core::system_monitor::anomalies::NO_ANOMALIES;
use crate::core::system_monitor::{AnomalyReport, ProcessMatch, ProcessTree, TopProcess, TreeLookup};

use super::formatters::print_section_header;

/// Truncate a process name to fit a table column
fn fit(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let cut: String = name.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn print_top_processes(processes: &[TopProcess]) {
    print_section_header("Top processes by CPU");

    if processes.is_empty() {
        println!("  {}", "No processes sampled.".yellow());
        return;
    }

    let header = format!("  {:>8}  {:<28} {:>8} {:>8}", "PID", "NAME", "CPU%", "MEM%");
    println!("{}", header.bold());
    for process in processes {
        let memory = match process.memory_percent {
            Some(percent) => format!("{:.1}", percent),
            None => "-".to_string(),
        };
        println!(
            "  {:>8}  {} {:>8.1} {:>8}",
            process.pid,
            format!("{:<28}", fit(&process.name, 28)).cyan(),
            process.cpu_percent,
            memory
        );
    }
    println!();
}

pub fn print_matches(needle: &str, matches: &[ProcessMatch]) {
    print_section_header(&format!("Processes matching '{}'", needle));

    if matches.is_empty() {
        println!("  {}", "No matching processes.".yellow());
        return;
    }

    for process in matches {
        println!(
            "  {:>8}  {} {}",
            process.pid,
            format!("{:<32}", fit(&process.name, 32)).cyan(),
            process.status.to_string().dimmed()
        );
    }
    println!("\n  {}", format!("{} process(es)", matches.len()).dimmed());
}

pub fn print_tree(lookup: &TreeLookup) {
    match lookup {
        TreeLookup::Found(ProcessTree { parent, children }) => {
            println!("{}", parent.bold().cyan());
            for (i, child) in children.iter().enumerate() {
                let branch = if i + 1 == children.len() { "└─" } else { "├─" };
                println!("  {} {}", branch.dimmed(), child);
            }
            if children.is_empty() {
                println!("  {}", "(no descendants)".dimmed());
            }
        }
        TreeLookup::NotFound { error } => {
            println!("{}", error.red());
        }
    }
}

pub fn print_anomalies(report: &AnomalyReport) {
    print_section_header("Process anomalies");

    match report {
        AnomalyReport::Clean => {
            println!("  {} {}", "✓".green(), NO_ANOMALIES);
        }
        AnomalyReport::Findings(findings) => {
            for finding in findings {
                println!(
                    "  {:>8}  {} {}",
                    finding.pid,
                    format!("{:<24}", fit(&finding.name, 24)).cyan(),
                    finding.issue.yellow()
                );
            }
        }
    }
    println!();
}

pub fn print_tools(tools: &[Tool]) {
    print_section_header("Available tools");
    for tool in tools {
        println!("  {}", tool.name.as_ref().bold().cyan());
        if let Some(description) = tool.description.as_deref() {
            println!("      {}", description.dimmed());
        }
    }
    println!();
}
