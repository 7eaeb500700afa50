// UI and formatting module

pub mod formatters;
pub mod process_formatters;
pub mod system_formatters;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_gb, format_percent, format_timestamp, print_json};
