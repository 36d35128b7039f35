use std::time::Duration;

use tamer_shared::Timer;

/// Detects a server that has stopped pushing events.
///
/// Checks run on a fixed heartbeat interval rather than every frame, so a
/// silent server is probed at most once per interval.
pub struct SilenceMonitor {
    check_timer: Timer,
    silence_threshold_ms: i64,
    last_heard_ms: i64,
}

impl SilenceMonitor {
    pub fn new(heartbeat_interval: Duration, silence_threshold: Duration, now_ms: i64) -> Self {
        Self {
            check_timer: Timer::new(heartbeat_interval, now_ms),
            silence_threshold_ms: i64::try_from(silence_threshold.as_millis()).unwrap_or(i64::MAX),
            last_heard_ms: now_ms,
        }
    }

    /// Record that the server was heard from, which also restarts the
    /// silence countdown
    pub fn mark_heard(&mut self, now_ms: i64) {
        self.last_heard_ms = now_ms;
    }

    /// Returns whether a heartbeat check is due, restarting the interval if so
    pub fn check_due(&mut self, now_ms: i64) -> bool {
        if self.check_timer.ringing(now_ms) {
            self.check_timer.reset(now_ms);
            return true;
        }
        false
    }

    /// Returns whether the server has been quiet for at least the threshold
    pub fn is_silent(&self, now_ms: i64) -> bool {
        now_ms.saturating_sub(self.last_heard_ms) >= self.silence_threshold_ms
    }

    pub fn last_heard_ms(&self) -> i64 {
        self.last_heard_ms
    }
}
