use procintel::core::system_info::{collect_system_summary, memory, storage};
use procintel::core::system_monitor::{
    analyze_process_anomalies, find_by_name, resolve_tree, top_processes, AnomalyRules,
    ProcessCollector, SysinfoCollector, TopRequest,
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_summary_is_populated() {
    let summary = collect_system_summary(Path::new("/"));
    assert!(summary.cpu_count >= 1);
    assert!(summary.ram_total_gb > 0.0);
    assert!(summary.boot_time > 0);
    assert!(!summary.os.is_empty());
}

#[test]
fn test_memory_is_consistent() {
    let usage = memory::collect();
    assert!(usage.ram.total_gb > 0.0);
    assert!((0.0..=100.0).contains(&usage.ram.percent));
    assert!(usage.ram.free_gb <= usage.ram.total_gb);
}

#[test]
fn test_repeated_memory_reads_agree() {
    let first = memory::collect();
    let second = memory::collect();

    assert_eq!(first.ram.total_gb, second.ram.total_gb);
    assert_eq!(first.swap.total_gb, second.swap.total_gb);
    assert!((first.ram.percent - second.ram.percent).abs() < 5.0);
}

#[test]
fn test_root_disk() {
    let usage = storage::collect(Path::new("/")).unwrap();
    assert!(usage.total_gb > 0.0);
    assert!(usage.used_gb <= usage.total_gb);
}

#[tokio::test]
async fn test_top_excludes_self_by_default() {
    let request = TopRequest::new(1000, 0.2, false, 60.0).unwrap();
    let top = top_processes(SysinfoCollector::new(), &request).await.unwrap();

    assert!(top.len() <= 1000);
    assert!(top.iter().all(|p| p.pid != std::process::id()));
    assert!(top
        .windows(2)
        .all(|pair| pair[0].cpu_percent >= pair[1].cpu_percent));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_top_includes_busy_self_when_asked() {
    let stop = Arc::new(AtomicBool::new(false));
    let spinner = {
        let stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let mut counter = 0u64;
            while !stop.load(Ordering::Relaxed) {
                counter = std::hint::black_box(counter.wrapping_add(1));
            }
        })
    };

    let request = TopRequest::new(1000, 0.5, true, 60.0).unwrap();
    let top = top_processes(SysinfoCollector::new(), &request).await;
    stop.store(true, Ordering::Relaxed);
    spinner.join().unwrap();

    let top = top.unwrap();
    let me = top
        .iter()
        .find(|p| p.pid == std::process::id())
        .expect("own process is ranked");
    assert!(me.cpu_percent > 10.0, "busy process measured at {}%", me.cpu_percent);
}

#[tokio::test]
async fn test_top_respects_n() {
    let request = TopRequest::new(3, 0.1, true, 60.0).unwrap();
    let top = top_processes(SysinfoCollector::new(), &request).await.unwrap();
    assert!(top.len() <= 3);
}

#[test]
fn test_find_is_case_insensitive() {
    let samples = SysinfoCollector::new().snapshot();
    let me = samples
        .iter()
        .find(|s| s.pid == std::process::id())
        .expect("own process is visible");

    let lower = find_by_name(&samples, &me.name.to_lowercase());
    let upper = find_by_name(&samples, &me.name.to_uppercase());
    assert_eq!(lower, upper);
    assert!(lower.iter().any(|m| m.pid == me.pid));

    assert_eq!(find_by_name(&samples, "").len(), samples.len());
}

#[test]
fn test_tree_of_own_process() {
    let samples = SysinfoCollector::new().snapshot();
    let tree = resolve_tree(&samples, std::process::id()).unwrap();
    assert!(tree
        .parent
        .ends_with(&format!("({})", std::process::id())));
}

#[tokio::test]
async fn test_anomaly_scan_runs() {
    let report = analyze_process_anomalies(
        SysinfoCollector::new(),
        AnomalyRules::default(),
        Duration::from_millis(100),
    )
    .await
    .unwrap();

    let findings = report.findings();
    assert!(findings.windows(2).all(|pair| pair[0].pid <= pair[1].pid));
}
