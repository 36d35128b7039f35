/// INTEGRATION TESTS: Tearing a session down
///
/// Closing stops listening for pushes and stops every timer; nothing fires
/// after teardown.

use tamer_client::{shared::events, SessionPhase};
use tamer_test::{TestBattle, CHALLENGER};

#[test]
fn close_stops_auto_pass_and_probes() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    let deadline = battle.clock.now() + 2_000;
    let snapshot = battle.snapshot().turn(CHALLENGER, deadline).build();
    battle.deliver(&snapshot);
    battle.server.clear_emitted();

    battle.session.close();
    battle.run_for(60_000, 100);

    assert_eq!(battle.session.phase(), SessionPhase::Closed);
    assert_eq!(battle.server.emitted_count(), 0);
}

#[test]
fn close_ignores_later_snapshots() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    let first = battle.snapshot().hp(90, 90).build();
    battle.deliver(&first);

    battle.session.close();
    let late = battle.snapshot().hp(10, 10).build();
    battle.deliver(&late);

    assert_eq!(battle.session.state().self_hp, 90);
}

#[test]
fn close_is_idempotent() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    battle.session.close();
    battle.session.close();

    assert_eq!(battle.session.phase(), SessionPhase::Closed);
}

#[test]
fn into_channel_unregisters_listener() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();

    let channel = battle.session.into_channel();
    assert!(!channel.is_listening(events::BATTLE_STATE));
    assert!(channel.is_connected());
}
