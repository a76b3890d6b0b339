//! Cooperative cancellation for window threads.
//!
//! A [`CancellationToken`] is the caller-supplied "stop" signal for a window's
//! tick loop. The window thread polls it once per tick and sleeps on it while
//! pacing frames, so a cancel wakes a sleeping window immediately instead of
//! waiting out the rest of the frame.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

/// A cancellation token for cooperative shutdown.
///
/// Clones share state: cancelling any clone cancels all of them.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    inner: Arc<CancellationState>,
}

#[derive(Debug)]
struct CancellationState {
    cancelled: AtomicBool,
    condvar: Condvar,
    mutex: Mutex<()>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CancellationState {
                cancelled: AtomicBool::new(false),
                condvar: Condvar::new(),
                mutex: Mutex::new(()),
            }),
        }
    }

    /// Check if cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Request cancellation and wake every thread blocked in a wait.
    pub fn cancel(&self) {
        // Hold the lock while setting the flag to avoid a lost wakeup.
        let _guard = self.inner.mutex.lock();
        if !self.inner.cancelled.swap(true, Ordering::Release) {
            self.inner.condvar.notify_all();
        }
    }

    /// Block until cancelled or until `timeout` elapses.
    ///
    /// Returns `true` if the token was cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut guard = self.inner.mutex.lock();
        while !self.is_cancelled() {
            if self
                .inner
                .condvar
                .wait_until(&mut guard, deadline)
                .timed_out()
            {
                break;
            }
        }
        self.is_cancelled()
    }

    /// Block until cancelled.
    pub fn wait(&self) {
        let mut guard = self.inner.mutex.lock();
        while !self.is_cancelled() {
            self.inner.condvar.wait(&mut guard);
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());

        token.cancel();
        assert!(clone.is_cancelled());

        // Cancelling twice is harmless.
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_wait_timeout_expires() {
        let token = CancellationToken::new();
        let start = Instant::now();
        assert!(!token.wait_timeout(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_cancel_wakes_waiter() {
        let token = CancellationToken::new();
        let waiter = token.clone();

        let handle = thread::spawn(move || waiter.wait_timeout(Duration::from_secs(10)));

        thread::sleep(Duration::from_millis(10));
        token.cancel();

        assert!(handle.join().unwrap());
    }
}
