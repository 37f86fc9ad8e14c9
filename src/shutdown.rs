//! Cooperative cancellation for the mover loop.
//! A `CancelToken` is shared between whoever wants to stop the mover (signal
//! handler, tests, embedding code) and the scheduler that waits on it between ticks.
//!
//! Notes:
//! - Cancellation is one-way; the first recorded cause wins.
//! - `cancel()` only takes a mutex and notifies, so it is fine to call from the
//!   ctrlc handler thread.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Why a token was cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    /// Cancelled programmatically by the embedding code.
    Requested,
    /// Cancelled by SIGINT/SIGTERM (or Ctrl-C on Windows).
    Signal,
}

impl fmt::Display for CancelCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelCause::Requested => f.write_str("cancellation requested"),
            CancelCause::Signal => f.write_str("interrupted by signal"),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    cause: Mutex<Option<CancelCause>>,
    cond: Condvar,
}

/// Cloneable cancellation signal with a wait-with-timeout primitive.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel with `cause` (idempotent; later causes are ignored).
    pub fn cancel(&self, cause: CancelCause) {
        let mut slot = self.lock();
        if slot.is_none() {
            *slot = Some(cause);
        }
        drop(slot);
        self.inner.cond.notify_all();
    }

    /// Check whether the token has been cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.lock().is_some()
    }

    /// Cause recorded by the first `cancel()` call, if any.
    pub fn cause(&self) -> Option<CancelCause> {
        *self.lock()
    }

    /// Block for up to `timeout`.
    /// Returns `Some(cause)` as soon as the token is cancelled, `None` once the
    /// full timeout elapsed without cancellation.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<CancelCause> {
        let deadline = Instant::now() + timeout;
        let mut slot = self.lock();
        loop {
            if let Some(cause) = *slot {
                return Some(cause);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            // Spurious wakeups re-check the slot and the remaining time.
            slot = match self.inner.cond.wait_timeout(slot, deadline - now) {
                Ok((guard, _)) => guard,
                Err(poisoned) => poisoned.into_inner().0,
            };
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<CancelCause>> {
        self.inner
            .cause
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn wait_times_out_without_cancel() {
        let token = CancelToken::new();
        let started = Instant::now();
        assert_eq!(token.wait_timeout(Duration::from_millis(30)), None);
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(!token.is_cancelled());
    }

    #[test]
    fn cancel_wakes_waiter_early() {
        let token = CancelToken::new();
        let remote = token.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            remote.cancel(CancelCause::Requested);
        });
        let started = Instant::now();
        let got = token.wait_timeout(Duration::from_secs(10));
        handle.join().unwrap();
        assert_eq!(got, Some(CancelCause::Requested));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn first_cause_wins() {
        let token = CancelToken::new();
        token.cancel(CancelCause::Signal);
        token.cancel(CancelCause::Requested);
        assert_eq!(token.cause(), Some(CancelCause::Signal));
        assert_eq!(token.wait_timeout(Duration::ZERO), Some(CancelCause::Signal));
    }
}
