use std::time::Duration;

use tamer_shared::Timer;

/// Remembers the last turn deadline that was already auto-passed, so the same
/// deadline never produces a second pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AutoPassGuard {
    last_passed_ms: Option<i64>,
}

impl AutoPassGuard {
    pub fn has_passed(&self, deadline_ms: i64) -> bool {
        self.last_passed_ms == Some(deadline_ms)
    }

    pub fn last_passed_ms(&self) -> Option<i64> {
        self.last_passed_ms
    }

    fn record(&mut self, deadline_ms: i64) {
        self.last_passed_ms = Some(deadline_ms);
    }

    fn clear(&mut self) {
        self.last_passed_ms = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatcherState {
    /// Not our turn, or no deadline known
    Idle,
    /// Our turn, deadline known and not yet passed
    Armed { deadline_ms: i64 },
    /// The pass for this deadline has been issued
    Fired { deadline_ms: i64 },
}

/// Issues an automatic PASS when our turn deadline elapses.
///
/// The deadline is checked by polling on a fixed interval, so a crossing is
/// noticed within one interval. Polling tolerates the clock offset changing
/// mid-turn: every check compares the deadline against the reconciled server
/// time of that moment.
pub struct TurnDeadlineWatcher {
    state: WatcherState,
    guard: AutoPassGuard,
    poll_timer: Timer,
}

impl TurnDeadlineWatcher {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            state: WatcherState::Idle,
            guard: AutoPassGuard::default(),
            poll_timer: Timer::new_ringing(poll_interval),
        }
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    pub fn guard(&self) -> &AutoPassGuard {
        &self.guard
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, WatcherState::Armed { .. })
    }

    /// Align the watcher with the latest projected turn. Called after every
    /// applied snapshot.
    pub fn sync(&mut self, is_my_turn: bool, turn_ends_at_ms: Option<i64>) {
        let deadline_ms = match (is_my_turn, turn_ends_at_ms) {
            (true, Some(deadline_ms)) => deadline_ms,
            _ => {
                self.state = WatcherState::Idle;
                return;
            }
        };

        match self.state {
            WatcherState::Armed { deadline_ms: current }
            | WatcherState::Fired { deadline_ms: current }
                if current == deadline_ms =>
            {
                // same turn, nothing to do
            }
            _ => {
                if self.guard.has_passed(deadline_ms) {
                    self.state = WatcherState::Fired { deadline_ms };
                } else {
                    // a new deadline is a new turn
                    self.guard.clear();
                    self.state = WatcherState::Armed { deadline_ms };
                    // a deadline already in the past must fire on the very
                    // next poll
                    self.poll_timer.ring_now();
                }
            }
        }
    }

    /// Check the deadline if a poll is due. Returns the deadline to auto-pass
    /// when it has been reached while still armed; each deadline is returned
    /// at most once.
    pub fn poll(&mut self, local_now_ms: i64, server_now_ms: i64) -> Option<i64> {
        let WatcherState::Armed { deadline_ms } = self.state else {
            return None;
        };
        if !self.poll_timer.ringing(local_now_ms) {
            return None;
        }
        self.poll_timer.reset(local_now_ms);

        if server_now_ms < deadline_ms || self.guard.has_passed(deadline_ms) {
            return None;
        }
        self.guard.record(deadline_ms);
        self.state = WatcherState::Fired { deadline_ms };
        Some(deadline_ms)
    }

    /// Stop watching. Used when the session ends.
    pub fn cancel(&mut self) {
        self.state = WatcherState::Idle;
    }
}
