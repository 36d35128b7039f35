/// SCENARIO TESTS: Session rejection
///
/// A rejected snapshot abandons the session for good: exactly one rejection
/// is reported, and afterwards nothing is emitted, not even heartbeats or
/// timeout passes.

use tamer_client::{
    shared::ActionId, BattleStatus, SessionPhase, SessionRejectedEvent, SubmitError,
    TamerClientError,
};
use serde_json::json;
use tamer_client::shared::{events, Frame};
use tamer_test::{SnapshotBuilder, TestBattle, BATTLE, CHALLENGER};

#[test]
fn rejection_stops_all_emits() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    assert_eq!(battle.join_count(), 1);
    battle.server.clear_emitted();

    battle.deliver(&SnapshotBuilder::rejected());
    battle.run_for(120_000, 100);

    assert_eq!(battle.server.emitted_count(), 0);
    assert_eq!(battle.session.phase(), SessionPhase::Rejected);
    assert_eq!(battle.session.state().status, BattleStatus::Rejected);
}

#[test]
fn rejection_is_reported_once() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();

    battle.deliver(&SnapshotBuilder::rejected());
    battle.deliver(&SnapshotBuilder::rejected());
    battle.run_for(1_000, 100);

    let mut events = battle.session.take_events();
    let rejections: Vec<_> = events.read::<SessionRejectedEvent>().collect();
    assert_eq!(
        rejections,
        vec![TamerClientError::SessionRejected {
            battle_id: BATTLE.into()
        }]
    );
}

#[test]
fn rejection_cancels_armed_deadline() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    let start = battle.clock.now();
    let turn = battle.snapshot().turn(CHALLENGER, start + 3_000).build();
    battle.deliver(&turn);

    battle.deliver(&SnapshotBuilder::rejected());
    battle.run_for(10_000, 100);

    assert_eq!(battle.pass_count(), 0);
}

#[test]
fn snapshots_after_rejection_are_ignored() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    battle.deliver(&SnapshotBuilder::rejected());

    let late = battle.snapshot().hp(10, 10).build();
    battle.deliver(&late);

    assert_eq!(battle.session.state().status, BattleStatus::Rejected);
    assert_eq!(battle.session.state().self_hp, 0);
}

#[test]
fn submit_after_rejection_is_refused() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    battle.deliver(&SnapshotBuilder::rejected());

    assert_eq!(
        battle.session.submit(Some(ActionId::from("bite")), None),
        Err(SubmitError::BattleOver)
    );
}

#[test]
fn rejection_mid_battle() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    let active = battle.snapshot().standard_actions().build();
    battle.deliver(&active);
    assert_eq!(battle.session.state().status, BattleStatus::Active);
    battle.server.clear_emitted();

    battle.deliver(&SnapshotBuilder::rejected());
    battle.run_for(60_000, 250);

    assert_eq!(battle.session.phase(), SessionPhase::Rejected);
    assert_eq!(battle.server.emitted_count(), 0);
}

#[test]
fn rejection_with_null_battle_data() {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    battle.server.clear_emitted();

    battle.server.push_frame(Frame::new(
        events::BATTLE_STATE,
        json!({
            "rejected": true,
            "battleId": null,
            "challengerMonsterId": null,
            "opponentMonsterId": null,
            "challengerHp": null,
            "opponentHp": null,
            "challengerActions": null,
            "currentTurnMonsterId": null
        }),
    ));
    battle.step();
    battle.run_for(60_000, 250);

    assert_eq!(battle.session.phase(), SessionPhase::Rejected);
    assert_eq!(battle.server.emitted_count(), 0);
    let mut collected = battle.session.take_events();
    assert_eq!(collected.read::<SessionRejectedEvent>().count(), 1);
    assert!(!collected.has::<tamer_client::ErrorEvent>());
}
