//! Free-heap sampling with a low-water mark

use crate::traits::HeapStats;

/// One free-memory reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FreeMemorySample {
    /// Free heap in bytes
    pub free_bytes: usize,
    /// Lowest free heap seen since the monitor started
    pub low_water_bytes: usize,
}

impl FreeMemorySample {
    /// Free heap in whole kilobytes (rounded down)
    pub fn free_kb(&self) -> usize {
        self.free_bytes / 1024
    }

    /// Low-water mark in whole kilobytes (rounded down)
    pub fn low_water_kb(&self) -> usize {
        self.low_water_bytes / 1024
    }
}

/// Tracks samples and failures across diagnostics periods
#[derive(Debug, Clone, Default)]
pub struct HeapMonitor {
    low_water_bytes: Option<usize>,
    samples: u32,
    failures: u32,
}

impl HeapMonitor {
    /// Create an empty monitor
    pub const fn new() -> Self {
        Self {
            low_water_bytes: None,
            samples: 0,
            failures: 0,
        }
    }

    /// Take one sample
    ///
    /// A failed query returns `None` and leaves the low-water mark alone;
    /// the caller is expected to simply try again next period.
    pub fn sample<H: HeapStats>(&mut self, heap: &H) -> Option<FreeMemorySample> {
        let Some(free_bytes) = heap.free_bytes() else {
            self.failures = self.failures.saturating_add(1);
            return None;
        };

        let low_water_bytes = match self.low_water_bytes {
            Some(low) => low.min(free_bytes),
            None => free_bytes,
        };
        self.low_water_bytes = Some(low_water_bytes);
        self.samples = self.samples.saturating_add(1);

        Some(FreeMemorySample {
            free_bytes,
            low_water_bytes,
        })
    }

    /// Successful samples taken
    pub fn samples(&self) -> u32 {
        self.samples
    }

    /// Failed queries
    pub fn failures(&self) -> u32 {
        self.failures
    }
}
