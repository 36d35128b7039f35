// Session timing defaults

/// How often the session checks whether the server has gone quiet.
pub const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 10_000;

/// Gap since the last push event after which a status probe is sent.
/// Kept larger than the heartbeat interval so a single late event does not
/// trigger a probe.
pub const DEFAULT_SILENCE_THRESHOLD_MS: u64 = 18_000;

/// Poll period of the turn deadline watcher. A deadline crossing is detected
/// at most one interval late.
pub const DEFAULT_TURN_POLL_INTERVAL_MS: u64 = 250;

/// Server clock samples further than this from local time are discarded.
pub const MAX_CLOCK_SKEW_MS: i64 = 10 * 60 * 1000;
