/// SCENARIO TESTS: Clock reconciliation
///
/// Turn deadlines are absolute instants on the server's clock. The session
/// learns the offset between local and server time from each snapshot and
/// evaluates deadlines against the reconciled server time.

use tamer_test::{TestBattle, CHALLENGER, START_MS};

fn joined() -> TestBattle {
    let mut battle = TestBattle::new(CHALLENGER);
    battle.step();
    battle
}

#[test]
fn server_ahead_passes_at_server_deadline() {
    let mut battle = joined();
    let server_now = START_MS + 5_000;
    let deadline = server_now + 15_000;
    let snapshot = battle
        .snapshot()
        .server_now(server_now)
        .turn(CHALLENGER, deadline)
        .build();
    battle.deliver(&snapshot);
    assert_eq!(battle.session.clock().offset_ms(), 5_000);

    // local deadline is START_MS + 15_000
    battle.run_for(14_800, 100);
    assert_eq!(battle.pass_count(), 0);
    battle.run_for(500, 100);
    assert_eq!(battle.pass_count(), 1);
}

#[test]
fn server_behind_waits_for_server_deadline() {
    let mut battle = joined();
    let server_now = START_MS - 4_000;
    let deadline = server_now + 15_000;
    let snapshot = battle
        .snapshot()
        .server_now(server_now)
        .turn(CHALLENGER, deadline)
        .build();
    battle.deliver(&snapshot);

    // a client trusting its own clock would pass at START_MS + 11_000
    battle.run_for(14_800, 100);
    assert_eq!(battle.pass_count(), 0);
    battle.run_for(500, 100);
    assert_eq!(battle.pass_count(), 1);
}

#[test]
fn offset_follows_latest_snapshot() {
    let mut battle = joined();
    let first = battle.snapshot().server_now(START_MS + 1_000).build();
    battle.deliver(&first);
    assert_eq!(battle.session.clock().offset_ms(), 1_000);

    battle.run_for(2_000, 100);
    let second = battle
        .snapshot()
        .server_now(battle.clock.now() + 3_000)
        .build();
    battle.deliver(&second);
    assert_eq!(battle.session.clock().offset_ms(), 3_000);
    assert_eq!(
        battle.session.server_now(battle.clock.now()),
        battle.clock.now() + 3_000
    );
}

#[test]
fn implausible_server_clock_is_ignored() {
    let mut battle = joined();
    let good = battle.snapshot().server_now(START_MS + 2_000).build();
    battle.deliver(&good);

    let eleven_minutes = 11 * 60 * 1_000;
    let bad = battle
        .snapshot()
        .server_now(battle.clock.now() + eleven_minutes)
        .build();
    battle.deliver(&bad);

    assert_eq!(battle.session.clock().offset_ms(), 2_000);
}

#[test]
fn missing_server_clock_keeps_offset() {
    let mut battle = joined();
    let first = battle.snapshot().server_now(START_MS + 700).build();
    battle.deliver(&first);

    let mut unstamped = battle.snapshot().build();
    unstamped.server_now_ms = None;
    battle.deliver(&unstamped);

    assert_eq!(battle.session.clock().offset_ms(), 700);
}

#[test]
fn offset_change_mid_turn_moves_the_deadline() {
    let mut battle = joined();
    let deadline = START_MS + 15_000;
    let snapshot = battle.snapshot().turn(CHALLENGER, deadline).build();
    battle.deliver(&snapshot);
    battle.run_for(5_000, 100);

    // the server turns out to be 8s ahead; the same deadline is now 2s away
    let resync = battle
        .snapshot()
        .server_now(battle.clock.now() + 8_000)
        .turn(CHALLENGER, deadline)
        .build();
    battle.deliver(&resync);
    battle.run_for(1_500, 100);
    assert_eq!(battle.pass_count(), 0);
    battle.run_for(1_000, 100);
    assert_eq!(battle.pass_count(), 1);
}
