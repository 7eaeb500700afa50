//! Process monitoring core functionality.
//!
//! This module provides the process snapshot reader and the logic built on
//! top of it: CPU ranking, name search, descendant resolution, spike
//! detection and anomaly classification. Every call reads the OS afresh.

pub mod alerts;
pub mod anomalies;
mod collector;
pub mod finder;
mod metrics;
pub mod process_tree;
pub mod ranker;

pub use alerts::{detect_spikes, evaluate_spikes, SpikeReport, SpikeWarnings, UsageSnapshot};
pub use anomalies::{
    analyze_process_anomalies, classify, AnomalyFinding, AnomalyReport, AnomalyRules,
};
pub use collector::{ProcessCollector, SysinfoCollector};
pub use finder::{find_by_name, ProcessMatch};
pub use metrics::{Baseline, ProcessSample, ProcessState};
pub use process_tree::{resolve_tree, ProcessTree, TreeLookup};
pub use ranker::{rank, top_processes, TopProcess, TopRequest};
