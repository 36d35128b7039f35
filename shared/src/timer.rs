use std::time::Duration;

/// A repeating timer driven by explicit millisecond readings.
///
/// The timer never reads the clock itself; callers pass `now_ms` on every
/// call, which keeps session logic deterministic under test.
#[derive(Clone, Debug)]
pub struct Timer {
    duration_ms: i64,
    last_ms: Option<i64>,
}

impl Timer {
    /// Create a timer that first rings `duration` after `now_ms`
    pub fn new(duration: Duration, now_ms: i64) -> Self {
        Self {
            duration_ms: duration_to_millis(duration),
            last_ms: Some(now_ms),
        }
    }

    /// Create a timer that rings on the first check
    pub fn new_ringing(duration: Duration) -> Self {
        Self {
            duration_ms: duration_to_millis(duration),
            last_ms: None,
        }
    }

    /// Restart the countdown from `now_ms`
    pub fn reset(&mut self, now_ms: i64) {
        self.last_ms = Some(now_ms);
    }

    /// Make the next call to `ringing` return true regardless of elapsed time
    pub fn ring_now(&mut self) {
        self.last_ms = None;
    }

    /// Returns whether the full duration has elapsed since the last reset
    pub fn ringing(&self, now_ms: i64) -> bool {
        match self.last_ms {
            None => true,
            Some(last_ms) => now_ms.saturating_sub(last_ms) >= self.duration_ms,
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.duration_ms
    }
}

fn duration_to_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}
