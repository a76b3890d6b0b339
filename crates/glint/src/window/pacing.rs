//! Frame pacing for the tick loop.

use std::time::{Duration, Instant};

use glint_core::CancellationToken;

/// Sleeps out the remainder of each frame interval.
#[derive(Debug)]
pub(crate) struct FramePacer {
    interval: Duration,
    last: Instant,
}

impl FramePacer {
    pub(crate) fn new(framerate: u32) -> Self {
        Self {
            interval: Self::interval_for(framerate),
            last: Instant::now(),
        }
    }

    fn interval_for(framerate: u32) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(framerate.max(1)))
    }

    pub(crate) fn set_framerate(&mut self, framerate: u32) {
        self.interval = Self::interval_for(framerate);
    }

    /// Wait until a full interval has passed since the previous frame and
    /// return the elapsed time in seconds. Cancellation cuts the wait short.
    pub(crate) fn wait(&mut self, cancel: &CancellationToken) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.interval {
            cancel.wait_timeout(self.interval - elapsed);
        }
        let now = Instant::now();
        let delta = now.duration_since(self.last);
        self.last = now;
        delta.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_paces_to_interval() {
        let cancel = CancellationToken::new();
        let mut pacer = FramePacer::new(50);
        let delta = pacer.wait(&cancel);
        assert!(delta >= 0.019, "delta was {delta}");
    }

    #[test]
    fn test_cancel_cuts_wait_short() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut pacer = FramePacer::new(1);
        let start = Instant::now();
        pacer.wait(&cancel);
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
