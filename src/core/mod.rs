// Core business logic module

pub mod blocking;
pub mod config;
pub mod system_info;
pub mod system_monitor;

// Re-export commonly used items
pub use config::Config;
