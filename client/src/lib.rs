//! # Tamer Client
//! Keeps a turn-based monster battle in sync with the server over a push
//! channel: joins the battle, reconciles the local clock with the server's,
//! passes the turn automatically when its deadline runs out, probes a silent
//! server, and projects every authoritative snapshot into a local view.
//!
//! Everything runs on the caller's thread. The host drives a
//! [`BattleSession`] by calling [`BattleSession::update`] from its frame or
//! timer loop and reads what happened through [`BattleEvents`].

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

#[macro_use]
extern crate cfg_if;

pub mod transport;
pub mod shared {
    pub use tamer_shared::{
        events, ActionId, ActionKind, ActionLog, ActionOption, ActionType, BattleAction, BattleId,
        BattleSnapshot, ClientMessage, Frame, JoinBattle, MonsterId, Reward, Role, ServerMessage,
        SnapshotKind, StatusProbe, SubmitAction, Timestamp, WireError,
    };
}

mod battle;
mod client_config;
mod connection;
mod error;
mod events;
mod session;
mod view;

pub use battle::{
    deadline_watcher::{AutoPassGuard, TurnDeadlineWatcher, WatcherState},
    projector::{project, HitTarget, Projection, ProjectionSignals},
    state::{BattleResult, BattleStatus, LocalBattleState},
    submitter::{validate_submission, SubmitError},
};
pub use client_config::ClientConfig;
pub use connection::{clock_reconciler::ClockReconciler, silence_monitor::SilenceMonitor};
pub use error::TamerClientError;
pub use events::{
    AutoPassEvent, BattleEvent, BattleEvents, BattleFinishedEvent, ErrorEvent,
    SessionRejectedEvent, SnapshotAppliedEvent, TurnChange, TurnChangedEvent,
};
pub use session::{BattleSession, SessionIdentity, SessionPhase};
pub use transport::{Channel, ListenerKey};
pub use view::{BattleView, NoopView};
