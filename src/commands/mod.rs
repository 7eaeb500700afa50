// Command handlers module
pub mod anomalies;
pub mod process;
pub mod serve;
pub mod sys;
pub mod tools;
pub mod version;

// Re-exports for cleaner imports
pub use anomalies::execute as anomalies;
pub use serve::execute as serve;
pub use tools::execute as tools;
pub use version::execute as version;
