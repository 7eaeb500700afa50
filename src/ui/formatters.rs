use chrono::{DateTime, Local};
use colored::*;
use serde::Serialize;

/// Print any payload as pretty JSON (the `--json` output mode)
pub fn print_json<T: Serialize>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a decimal-gigabyte quantity
pub fn format_gb(gb: f64) -> String {
    format!("{:.2} GB", gb)
}

/// Format a percentage, colored by how loaded it is
pub fn format_percent(percent: f64) -> ColoredString {
    let text = format!("{:.1}%", percent);
    if percent >= 90.0 {
        text.red().bold()
    } else if percent >= 70.0 {
        text.yellow()
    } else {
        text.green()
    }
}

/// Format a Unix timestamp as local time (YYYY-MM-DD HH:MM)
pub fn format_timestamp(secs: u64) -> String {
    match DateTime::from_timestamp(secs as i64, 0) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => secs.to_string(),
    }
}

/// Text bar of `width` cells filled proportionally to `percent`
pub fn usage_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn print_section_header(title: &str) {
    println!("\n{}", title.bold().green());
    println!("{}", "-".repeat(title.len()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_gb() {
        assert_eq!(format_gb(15.5), "15.50 GB");
        assert_eq!(format_gb(0.0), "0.00 GB");
    }

    #[test]
    fn test_usage_bar() {
        assert_eq!(usage_bar(0.0, 4), "[----]");
        assert_eq!(usage_bar(50.0, 4), "[##--]");
        assert_eq!(usage_bar(150.0, 4), "[####]");
    }

    #[test]
    fn test_format_timestamp_epoch() {
        // Local offset varies, only the shape is stable
        assert_eq!(format_timestamp(0).len(), "1970-01-01 00:00".len());
    }
}
