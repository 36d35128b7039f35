use std::time::SystemTime;

use log::warn;
use thiserror::Error;

/// Error type for timestamp operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// System time is before UNIX epoch
    #[error("System time is before UNIX epoch")]
    SystemTimeBeforeEpoch,
}

/// Wall-clock readings in the unit the battle protocol uses: milliseconds
/// since UNIX epoch.
pub struct Timestamp;

impl Timestamp {
    /// Returns the current local time in milliseconds since UNIX epoch.
    ///
    /// # Errors
    /// Returns `TimeError::SystemTimeBeforeEpoch` if system time is before UNIX epoch.
    pub fn try_now_millis() -> Result<i64, TimeError> {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .map_err(|_| TimeError::SystemTimeBeforeEpoch)
    }

    /// Returns the current local time in milliseconds since UNIX epoch, or 0
    /// if the system clock is set before the epoch.
    pub fn now_millis() -> i64 {
        Self::try_now_millis().unwrap_or_else(|err| {
            warn!("{}", err);
            0
        })
    }
}
