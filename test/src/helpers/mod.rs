pub mod snapshot_builder;

pub use manual_clock::ManualClock;
pub use recording_view::{RecordingView, ViewCall, ViewLog};
pub use snapshot_builder::SnapshotBuilder;
pub use test_battle::{TestBattle, BATTLE, CHALLENGER, OPPONENT, START_MS, TOKEN};
