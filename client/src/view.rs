use tamer_shared::ActionId;

use crate::battle::state::BattleResult;

/// One-way cosmetic hooks into the rendering layer. The session never reads
/// anything back, and every hook defaults to doing nothing.
pub trait BattleView {
    /// The local monster was hit
    fn play_self_hit(&mut self, _damage: u32) {}

    /// The enemy monster was hit
    fn play_opponent_hit(&mut self, _damage: u32) {}

    /// Show the win/lose banner
    fn show_result(&mut self, _result: &BattleResult) {}

    /// Optimistic attack animation, played before the server confirms
    fn play_attack(&mut self, _attack_id: &ActionId) {}
}

/// A view that renders nothing
pub struct NoopView;

impl BattleView for NoopView {}
