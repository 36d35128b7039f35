use std::{default::Default, time::Duration};

use tamer_shared::{
    DEFAULT_HEARTBEAT_INTERVAL_MS, DEFAULT_SILENCE_THRESHOLD_MS, DEFAULT_TURN_POLL_INTERVAL_MS,
    MAX_CLOCK_SKEW_MS,
};

/// Contains Config properties which will be used by a BattleSession
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// How often the session checks whether the server has gone silent
    pub heartbeat_interval: Duration,
    /// How long without any push event before a status probe is sent.
    /// Should be larger than `heartbeat_interval`.
    pub silence_threshold: Duration,
    /// How often the turn deadline is checked while it is our turn
    pub turn_poll_interval: Duration,
    /// Server clock samples further than this from local time are ignored
    pub max_clock_skew: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_millis(DEFAULT_HEARTBEAT_INTERVAL_MS),
            silence_threshold: Duration::from_millis(DEFAULT_SILENCE_THRESHOLD_MS),
            turn_poll_interval: Duration::from_millis(DEFAULT_TURN_POLL_INTERVAL_MS),
            max_clock_skew: Duration::from_millis(MAX_CLOCK_SKEW_MS.unsigned_abs()),
        }
    }
}
