// Host memory readings for RAM headroom samples

use sysinfo::System;

/// Physical memory of the host, in bytes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MemorySnapshot {
    pub total: u64,
    pub used: u64,
    /// Share of memory not available to new allocations, 0..=100
    pub percent_used: f64,
}

impl MemorySnapshot {
    /// Read the current memory state of this machine.
    pub fn capture() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();

        let total = sys.total_memory();
        let available = sys.available_memory();
        Self { total, used: sys.used_memory(), percent_used: percent_unavailable(total, available) }
    }

    /// Total memory minus the index footprint. Negative when indexes alone
    /// exceed RAM.
    pub fn ram_headroom(&self, total_index_size: u64) -> i64 {
        clamp_i64(self.total as i128 - total_index_size as i128)
    }

    /// Headroom scaled by the share of memory that is still available.
    pub fn available_headroom(&self, ram_headroom: i64) -> i64 {
        let available_percent = 100.0 - self.percent_used.clamp(0.0, 100.0);
        (ram_headroom as f64 * available_percent / 100.0) as i64
    }
}

fn percent_unavailable(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    total.saturating_sub(available) as f64 / total as f64 * 100.0
}

pub(crate) fn clamp_i64(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}
