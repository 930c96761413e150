#[cfg(feature = "cli")]
use sysinfo::System;

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct HostSnapshot {
    pub hostname: Option<String>,
    pub total_memory_mb: u64,
    pub used_memory_mb: u64,
    pub memory_usage_percent: f32,
    pub cpu_count: usize,
}

/// One-shot host state reporter used by the entrypoint diagnostics dump.
#[cfg(feature = "cli")]
pub struct HostMonitor {
    system: System,
}

#[cfg(feature = "cli")]
impl HostMonitor {
    pub fn new() -> Self {
        let mut system = System::new_all();
        system.refresh_all();

        Self { system }
    }

    pub fn snapshot(&mut self) -> HostSnapshot {
        self.system.refresh_memory();

        let total_mb = self.system.total_memory() / 1024 / 1024;
        let used_mb = self.system.used_memory() / 1024 / 1024;
        let percent = if total_mb > 0 {
            (used_mb as f32 / total_mb as f32) * 100.0
        } else {
            0.0
        };

        HostSnapshot {
            hostname: System::host_name(),
            total_memory_mb: total_mb,
            used_memory_mb: used_mb,
            memory_usage_percent: percent,
            cpu_count: self.system.cpus().len(),
        }
    }

    pub fn log_snapshot(&mut self) {
        let snap = self.snapshot();
        tracing::info!(
            "📊 Host: {} - Memory: {}MB/{}MB ({:.1}%), CPUs: {}",
            snap.hostname.as_deref().unwrap_or("unknown"),
            snap.used_memory_mb,
            snap.total_memory_mb,
            snap.memory_usage_percent,
            snap.cpu_count
        );
    }
}

#[cfg(feature = "cli")]
impl Default for HostMonitor {
    fn default() -> Self {
        Self::new()
    }
}

// Empty implementation when built without the CLI feature.
#[cfg(not(feature = "cli"))]
pub struct HostMonitor;

#[cfg(not(feature = "cli"))]
impl HostMonitor {
    pub fn new() -> Self {
        Self
    }

    pub fn log_snapshot(&mut self) {}
}
