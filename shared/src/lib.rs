//! # Tamer Shared
//! Common functionality shared between the tamer battle client and its test
//! harness: the battle snapshot data model, the wire protocol spoken over the
//! push channel, and small time utilities.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod actions;
mod backends;
mod constants;
mod protocol;
mod snapshot;
mod timer;
mod types;
mod wire;

pub use actions::{ActionKind, ActionOption};
pub use backends::{TimeError, Timestamp};
pub use constants::{
    DEFAULT_HEARTBEAT_INTERVAL_MS, DEFAULT_SILENCE_THRESHOLD_MS, DEFAULT_TURN_POLL_INTERVAL_MS,
    MAX_CLOCK_SKEW_MS,
};
pub use protocol::{
    events, ActionType, BattleAction, ClientMessage, JoinBattle, ServerMessage, StatusProbe,
    SubmitAction,
};
pub use snapshot::{ActionLog, BattleSnapshot, Reward, Role, SnapshotKind};
pub use timer::Timer;
pub use types::{ActionId, BattleId, MonsterId};
pub use wire::{error::WireError, frame::Frame};
