use std::time::Duration;

use log::warn;

/// Tracks the offset between the local clock and the server's, learned from
/// the `serverNowMs` reading carried by snapshots.
///
/// Before the first accepted sample the offset is zero, so `now` falls back
/// to plain local time.
#[derive(Clone, Debug)]
pub struct ClockReconciler {
    offset_ms: i64,
    max_skew_ms: i64,
    accepted_samples: u64,
}

impl ClockReconciler {
    pub fn new(max_skew: Duration) -> Self {
        Self {
            offset_ms: 0,
            max_skew_ms: i64::try_from(max_skew.as_millis()).unwrap_or(i64::MAX),
            accepted_samples: 0,
        }
    }

    /// Record a server clock reading taken at `local_now_ms`. Returns false,
    /// leaving the offset untouched, when the reading is further from local
    /// time than the allowed skew.
    pub fn observe(&mut self, server_now_ms: i64, local_now_ms: i64) -> bool {
        let offset_ms = server_now_ms.saturating_sub(local_now_ms);
        if offset_ms.unsigned_abs() > self.max_skew_ms.unsigned_abs() {
            warn!(
                "Ignoring server clock sample {} ms away from local time",
                offset_ms
            );
            return false;
        }
        self.offset_ms = offset_ms;
        self.accepted_samples += 1;
        true
    }

    /// Best estimate of the server's clock at `local_now_ms`
    pub fn now(&self, local_now_ms: i64) -> i64 {
        local_now_ms.saturating_add(self.offset_ms)
    }

    pub fn offset_ms(&self) -> i64 {
        self.offset_ms
    }

    pub fn is_synced(&self) -> bool {
        self.accepted_samples > 0
    }
}
