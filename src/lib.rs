// procintel library - public API

// Re-export error types
pub mod error;
pub use error::{ProcIntelError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod server;
pub mod ui;

// Re-export commonly used types
pub use core::config::Config;
pub use server::Server;

// Initialize logging. Always writes to stderr: stdout carries the tool protocol.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();
}
