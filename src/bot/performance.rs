//! Process performance figures reported by `/info bot`.

use std::num::NonZeroUsize;
use std::sync::{Mutex, PoisonError};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};
use tracing::warn;

const BYTES_PER_HUNDREDTH_MB: u64 = 10_000;

/// A point-in-time reading of resource usage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceSnapshot {
    /// Memory in use, in bytes.
    pub used_memory: u64,
    /// Memory available to the host, in bytes.
    pub total_memory: u64,
    /// CPU load of this process in percent.
    pub cpu_usage: f32,
    /// Number of processors available to the process.
    pub processors: usize,
}

impl PerformanceSnapshot {
    /// Used memory in megabytes with two decimals.
    #[must_use]
    pub fn used_megabytes(&self) -> String {
        megabytes(self.used_memory)
    }

    /// Total memory in megabytes with two decimals.
    #[must_use]
    pub fn total_megabytes(&self) -> String {
        megabytes(self.total_memory)
    }

    /// CPU load with two decimals.
    #[must_use]
    pub fn cpu_percent(&self) -> String {
        format!("{:.2}", self.cpu_usage)
    }
}

/// Source of performance figures.
#[cfg_attr(test, mockall::automock)]
pub trait PerformanceMonitor: Send + Sync {
    /// Samples current resource usage.
    fn snapshot(&self) -> PerformanceSnapshot;
}

/// Monitor reading the host and the current process through `sysinfo`.
///
/// Process CPU load is the delta since the previous sample, so the first
/// reading after start-up is zero.
#[derive(Debug)]
pub struct SystemMonitor {
    system: Mutex<System>,
    pid: Option<Pid>,
}

impl SystemMonitor {
    /// Creates a monitor for the running process.
    #[must_use]
    pub fn new() -> Self {
        let pid = sysinfo::get_current_pid()
            .inspect_err(|err| warn!(error = %err, "cannot resolve own pid, CPU load will read 0"))
            .ok();
        Self {
            system: Mutex::new(System::new_with_specifics(RefreshKind::nothing())),
            pid,
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor for SystemMonitor {
    fn snapshot(&self) -> PerformanceSnapshot {
        let mut system = self.system.lock().unwrap_or_else(PoisonError::into_inner);
        system.refresh_memory();
        let cpu_usage = self.pid.map_or(0.0, |pid| {
            system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[pid]),
                true,
                ProcessRefreshKind::nothing().with_cpu(),
            );
            system.process(pid).map_or_else(
                || {
                    warn!(%pid, "own process missing from process table");
                    0.0
                },
                sysinfo::Process::cpu_usage,
            )
        });
        PerformanceSnapshot {
            used_memory: system.used_memory(),
            total_memory: system.total_memory(),
            cpu_usage,
            processors: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }
}

/// Formats a byte count as decimal megabytes rounded to two places.
fn megabytes(bytes: u64) -> String {
    let hundredths = bytes
        .saturating_add(BYTES_PER_HUNDREDTH_MB.div_euclid(2))
        .div_euclid(BYTES_PER_HUNDREDTH_MB);
    format!(
        "{}.{:02}",
        hundredths.div_euclid(100),
        hundredths.rem_euclid(100)
    )
}
