//! Tick counter and its render-side consumer

use portable_atomic::{AtomicU32, Ordering};

/// Elapsed time since engine start, advanced from the timer context
///
/// `advance` is a `Release` add so that anything the tick source wrote
/// before firing is visible to the render task once it observes the new
/// value with `Acquire`. The millisecond counter is 32-bit and wraps after
/// ~49 days; consumers compute deltas with wrapping arithmetic.
#[derive(Debug)]
pub struct TickCounter {
    /// Elapsed milliseconds (wrapping)
    elapsed_ms: AtomicU32,
    /// Number of tick firings (wrapping)
    fires: AtomicU32,
}

impl TickCounter {
    /// Create a counter at zero
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a counter at an arbitrary elapsed value
    pub const fn starting_at(elapsed_ms: u32) -> Self {
        Self {
            elapsed_ms: AtomicU32::new(elapsed_ms),
            fires: AtomicU32::new(0),
        }
    }

    /// Advance the clock by one tick of `period_ms`
    ///
    /// Safe to call from an interrupt context: it never blocks and never
    /// touches anything but the two atomics.
    #[inline]
    pub fn advance(&self, period_ms: u32) {
        self.elapsed_ms.fetch_add(period_ms, Ordering::Release);
        self.fires.fetch_add(1, Ordering::Relaxed);
    }

    /// Current elapsed milliseconds
    #[inline]
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms.load(Ordering::Acquire)
    }

    /// Number of times `advance` has been called
    pub fn fires(&self) -> u32 {
        self.fires.load(Ordering::Relaxed)
    }
}

impl Default for TickCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render-side view of the counter
///
/// Remembers the last value it observed so every call to [`take_delta`]
/// returns the time accumulated since the previous call. Several firings
/// between two calls coalesce into one delta.
///
/// [`take_delta`]: TickConsumer::take_delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickConsumer {
    last_ms: u32,
}

impl TickConsumer {
    /// Create a consumer that starts counting from the counter's current value
    pub fn attach(counter: &TickCounter) -> Self {
        Self {
            last_ms: counter.elapsed_ms(),
        }
    }

    /// Milliseconds elapsed since the previous call
    pub fn take_delta(&mut self, counter: &TickCounter) -> u32 {
        let now = counter.elapsed_ms();
        let delta = now.wrapping_sub(self.last_ms);
        self.last_ms = now;
        delta
    }

    /// Milliseconds accumulated but not yet taken
    pub fn pending(&self, counter: &TickCounter) -> u32 {
        counter.elapsed_ms().wrapping_sub(self.last_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PERIOD_MS: u32 = 10;

    #[test]
    fn test_delta_counts_every_fire() {
        let counter = TickCounter::new();
        let mut consumer = TickConsumer::attach(&counter);

        for _ in 0..7 {
            counter.advance(PERIOD_MS);
        }

        assert_eq!(consumer.take_delta(&counter), 70);
        assert_eq!(consumer.take_delta(&counter), 0);
        assert_eq!(counter.fires(), 7);
    }

    #[test]
    fn test_attach_ignores_earlier_time() {
        let counter = TickCounter::new();
        counter.advance(PERIOD_MS);
        counter.advance(PERIOD_MS);

        let mut consumer = TickConsumer::attach(&counter);
        counter.advance(PERIOD_MS);

        assert_eq!(consumer.take_delta(&counter), PERIOD_MS);
    }

    #[test]
    fn test_wraparound_keeps_delta() {
        let counter = TickCounter::starting_at(u32::MAX - 15);
        let mut consumer = TickConsumer::attach(&counter);

        counter.advance(PERIOD_MS);
        counter.advance(PERIOD_MS);

        assert!(counter.elapsed_ms() < PERIOD_MS);
        assert_eq!(consumer.take_delta(&counter), 20);
    }

    #[test]
    fn test_pending_does_not_consume() {
        let counter = TickCounter::new();
        let mut consumer = TickConsumer::attach(&counter);
        counter.advance(PERIOD_MS);

        assert_eq!(consumer.pending(&counter), PERIOD_MS);
        assert_eq!(consumer.pending(&counter), PERIOD_MS);
        assert_eq!(consumer.take_delta(&counter), PERIOD_MS);
        assert_eq!(consumer.pending(&counter), 0);
    }

    proptest! {
        #[test]
        fn prop_batches_are_exact(
            start in any::<u32>(),
            batches in proptest::collection::vec(0u32..50, 1..40),
        ) {
            let counter = TickCounter::starting_at(start);
            let mut consumer = TickConsumer::attach(&counter);
            let mut total: u64 = 0;

            for fires in &batches {
                for _ in 0..*fires {
                    counter.advance(PERIOD_MS);
                }
                let delta = consumer.take_delta(&counter);
                prop_assert_eq!(delta, fires * PERIOD_MS);
                total += delta as u64;
            }

            let expected: u64 = batches.iter().map(|&n| n as u64 * PERIOD_MS as u64).sum();
            prop_assert_eq!(total, expected);
        }
    }
}
