use crate::error::{ProcIntelError, Result};

/// Run a blocking OS read on the blocking pool so only the calling task waits
pub async fn run<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ProcIntelError::other(format!("Collector task failed: {}", e)))
}
