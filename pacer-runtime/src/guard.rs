//! Mutual-exclusion guard over engine state
//!
//! Release is tied to dropping the [`Held`] token, so every path out of a
//! critical section releases, including early returns and errors. The
//! guard is not recursive: acquiring it again while holding it never
//! completes (or times out).

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_time::{with_timeout, Duration};

/// Proof of exclusive access; releases on drop
pub type Held<'a, M, T> = MutexGuard<'a, M, T>;

/// Guard acquisition errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuardError {
    /// Not acquired before the timeout
    Timeout,
    /// Held by someone else (non-blocking attempt)
    Busy,
}

/// Binary lock owning the protected value
pub struct Guard<M: RawMutex, T> {
    inner: Mutex<M, T>,
}

impl<M: RawMutex, T> Guard<M, T> {
    /// Create a free guard around `value`
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Wait until the guard is free
    pub async fn acquire(&self) -> Held<'_, M, T> {
        self.inner.lock().await
    }

    /// Wait at most `timeout`; `None` waits forever
    pub async fn acquire_within(
        &self,
        timeout: Option<Duration>,
    ) -> Result<Held<'_, M, T>, GuardError> {
        match timeout {
            None => Ok(self.inner.lock().await),
            Some(timeout) => with_timeout(timeout, self.inner.lock())
                .await
                .map_err(|_| GuardError::Timeout),
        }
    }

    /// Acquire only if free right now
    pub fn try_acquire(&self) -> Result<Held<'_, M, T>, GuardError> {
        self.inner.try_lock().map_err(|_| GuardError::Busy)
    }

    /// Run `f` with exclusive access, releasing afterwards
    pub async fn with<R>(
        &self,
        timeout: Option<Duration>,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, GuardError> {
        let mut held = self.acquire_within(timeout).await?;
        Ok(f(&mut held))
    }
}
