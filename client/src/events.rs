use std::{mem, vec::IntoIter};

use tamer_shared::MonsterId;

use crate::{battle::state::BattleResult, error::TamerClientError};

/// A change of turn owner. `None` means nobody may act.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnChange {
    pub current_turn: Option<MonsterId>,
    pub is_my_turn: bool,
}

/// What happened during the last [`crate::BattleSession::update`] calls
pub struct BattleEvents {
    rejections: Vec<TamerClientError>,
    finishes: Vec<BattleResult>,
    turn_changes: Vec<TurnChange>,
    auto_passes: Vec<i64>,
    applied_snapshots: Vec<Option<u64>>,
    errors: Vec<TamerClientError>,
    empty: bool,
}

impl Default for BattleEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleEvents {
    pub(crate) fn new() -> Self {
        Self {
            rejections: Vec::new(),
            finishes: Vec::new(),
            turn_changes: Vec::new(),
            auto_passes: Vec::new(),
            applied_snapshots: Vec::new(),
            errors: Vec::new(),
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn read<V: BattleEvent>(&mut self) -> V::Iter {
        V::iter(self)
    }

    pub fn has<V: BattleEvent>(&self) -> bool {
        V::has(self)
    }

    // Crate-public

    pub(crate) fn push_rejection(&mut self, error: TamerClientError) {
        self.rejections.push(error);
        self.empty = false;
    }

    pub(crate) fn push_finish(&mut self, result: BattleResult) {
        self.finishes.push(result);
        self.empty = false;
    }

    pub(crate) fn push_turn_change(&mut self, change: TurnChange) {
        self.turn_changes.push(change);
        self.empty = false;
    }

    pub(crate) fn push_auto_pass(&mut self, deadline_ms: i64) {
        self.auto_passes.push(deadline_ms);
        self.empty = false;
    }

    pub(crate) fn push_applied_snapshot(&mut self, sequence: Option<u64>) {
        self.applied_snapshots.push(sequence);
        self.empty = false;
    }

    pub(crate) fn push_error(&mut self, error: TamerClientError) {
        self.errors.push(error);
        self.empty = false;
    }

    pub(crate) fn take(&mut self) -> Self {
        mem::take(self)
    }
}

// Event Trait
pub trait BattleEvent {
    type Iter;

    fn iter(events: &mut BattleEvents) -> Self::Iter;

    fn has(events: &BattleEvents) -> bool;
}

// Session Rejected Event
pub struct SessionRejectedEvent;
impl BattleEvent for SessionRejectedEvent {
    type Iter = IntoIter<TamerClientError>;

    fn iter(events: &mut BattleEvents) -> Self::Iter {
        let list = mem::take(&mut events.rejections);
        IntoIterator::into_iter(list)
    }

    fn has(events: &BattleEvents) -> bool {
        !events.rejections.is_empty()
    }
}

// Battle Finished Event
pub struct BattleFinishedEvent;
impl BattleEvent for BattleFinishedEvent {
    type Iter = IntoIter<BattleResult>;

    fn iter(events: &mut BattleEvents) -> Self::Iter {
        let list = mem::take(&mut events.finishes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &BattleEvents) -> bool {
        !events.finishes.is_empty()
    }
}

// Turn Changed Event
pub struct TurnChangedEvent;
impl BattleEvent for TurnChangedEvent {
    type Iter = IntoIter<TurnChange>;

    fn iter(events: &mut BattleEvents) -> Self::Iter {
        let list = mem::take(&mut events.turn_changes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &BattleEvents) -> bool {
        !events.turn_changes.is_empty()
    }
}

// Auto Pass Event, yields the deadline whose PASS was handed to the transport
pub struct AutoPassEvent;
impl BattleEvent for AutoPassEvent {
    type Iter = IntoIter<i64>;

    fn iter(events: &mut BattleEvents) -> Self::Iter {
        let list = mem::take(&mut events.auto_passes);
        IntoIterator::into_iter(list)
    }

    fn has(events: &BattleEvents) -> bool {
        !events.auto_passes.is_empty()
    }
}

// Snapshot Applied Event, yields the snapshot's sequence number if it had one
pub struct SnapshotAppliedEvent;
impl BattleEvent for SnapshotAppliedEvent {
    type Iter = IntoIter<Option<u64>>;

    fn iter(events: &mut BattleEvents) -> Self::Iter {
        let list = mem::take(&mut events.applied_snapshots);
        IntoIterator::into_iter(list)
    }

    fn has(events: &BattleEvents) -> bool {
        !events.applied_snapshots.is_empty()
    }
}

// Error Event
pub struct ErrorEvent;
impl BattleEvent for ErrorEvent {
    type Iter = IntoIter<TamerClientError>;

    fn iter(events: &mut BattleEvents) -> Self::Iter {
        let list = mem::take(&mut events.errors);
        IntoIterator::into_iter(list)
    }

    fn has(events: &BattleEvents) -> bool {
        !events.errors.is_empty()
    }
}
