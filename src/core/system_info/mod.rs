//! Host metrics readers: thin passthroughs over `sysinfo`.

pub mod collector;
pub mod cpu;
pub mod memory;
pub mod os;
pub mod storage;
pub mod types;
pub mod units;

pub use collector::collect_system_summary;
pub use types::*;
