use crate::core::system_info::types::*;
use crate::core::system_monitor::alerts::USAGE_NORMAL;
use crate::core::system_monitor::{SpikeReport, SpikeWarnings};
use colored::*;

use super::formatters::{
    format_gb, format_percent, format_timestamp, print_section_header, usage_bar,
};

const BAR_WIDTH: usize = 30;

pub fn print_summary(summary: &SystemSummary) {
    println!("\n{}", "SYSTEM SUMMARY".bold().bright_cyan());
    println!("{}", "=".repeat(60));

    println!("  OS:         {}", summary.os);
    println!("  CPU:        {}", summary.cpu);
    println!("  Cores:      {} logical", summary.cpu_count);
    println!("  RAM:        {}", format_gb(summary.ram_total_gb));
    println!("  Disk:       {}", format_gb(summary.disk_total_gb));
    println!(
        "  Boot time:  {} {}",
        format_timestamp(summary.boot_time),
        format!("({})", summary.boot_time).dimmed()
    );
    println!();
}

pub fn print_cpu_usage(usage: &CpuUsage) {
    print_section_header("CPU");
    let percent = f64::from(usage.cpu_percent);
    println!("  {} {}", usage_bar(percent, BAR_WIDTH), format_percent(percent));
    println!();
}

pub fn print_memory_usage(usage: &MemoryUsage) {
    print_section_header("Memory");
    println!(
        "  RAM   {} {}",
        usage_bar(usage.ram.percent, BAR_WIDTH),
        format_percent(usage.ram.percent)
    );
    println!(
        "        {} used / {} total, {} available",
        format_gb(usage.ram.used_gb),
        format_gb(usage.ram.total_gb),
        format_gb(usage.ram.free_gb)
    );

    if usage.swap.total_gb > 0.0 {
        println!(
            "  Swap  {} {}",
            usage_bar(usage.swap.percent, BAR_WIDTH),
            format_percent(usage.swap.percent)
        );
        println!(
            "        {} used / {} total",
            format_gb(usage.swap.used_gb),
            format_gb(usage.swap.total_gb)
        );
    } else {
        println!("  Swap  {}", "not configured".dimmed());
    }
    println!();
}

pub fn print_disk_usage(path: &str, usage: &DiskUsage) {
    print_section_header(&format!("Disk ({})", path));
    println!(
        "  {} {}",
        usage_bar(usage.percent_used, BAR_WIDTH),
        format_percent(usage.percent_used)
    );
    println!(
        "  {} used / {} total, {} free",
        format_gb(usage.used_gb),
        format_gb(usage.total_gb),
        format_gb(usage.free_gb)
    );
    println!();
}

pub fn print_spike_report(report: &SpikeReport) {
    print_section_header(&format!("Spike check (threshold {}%)", report.threshold));
    println!("  CPU:    {}", format_percent(f64::from(report.cpu_percent)));
    println!("  Memory: {}", format_percent(f64::from(report.memory_percent)));
    println!();

    match &report.warnings {
        SpikeWarnings::Raised(warnings) => {
            for warning in warnings {
                println!("  {} {}", "⚠".yellow().bold(), warning.yellow());
            }
        }
        SpikeWarnings::Normal => {
            println!("  {} {}", "✓".green(), USAGE_NORMAL);
        }
    }
    println!();
}
