use sysinfo::System;

/// Human-readable platform identifier, e.g. `Linux-6.8.0-x86_64`
pub fn platform_label() -> String {
    let name = System::name().unwrap_or_else(|| "Unknown".to_string());
    let version = System::kernel_version()
        .or_else(System::os_version)
        .unwrap_or_else(|| "Unknown".to_string());

    format!("{}-{}-{}", name, version, std::env::consts::ARCH)
}

/// Boot time as a Unix timestamp (seconds)
pub fn boot_time() -> u64 {
    System::boot_time()
}
