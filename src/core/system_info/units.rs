//! Unit conversions shared by the host readers.
//!
//! Every byte count reported to callers uses decimal units (1 GB = 1e9 bytes).

pub const BYTES_PER_GB: f64 = 1e9;
pub const BYTES_PER_MB: f64 = 1e6;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Bytes to decimal gigabytes, rounded to 2 decimals
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round_to(bytes as f64 / BYTES_PER_GB, 2)
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// `part / total` as a percentage; 0 when `total` is 0
pub fn percent_of(part: u64, total: u64) -> f64 {
    if total > 0 {
        (part as f64 / total as f64) * 100.0
    } else {
        0.0
    }
}
