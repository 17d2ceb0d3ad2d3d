//! Per-player chess clock.
//!
//! Only one side runs at a time. The clock itself only tracks who is running
//! and the last anchor instant; remaining budgets live on `PlayerState` and are
//! debited by `GameState::settle_clock`.

use crate::game_state::game_types::Player;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    running_for: Option<Player>,
    anchor_ms: u64,
}

impl Clock {
    /// Start (or restart) the clock for `player`, anchoring at `now_ms`.
    pub fn start(&mut self, player: Player, now_ms: u64) {
        self.running_for = Some(player);
        self.anchor_ms = now_ms;
    }

    pub fn stop(&mut self) {
        self.running_for = None;
    }

    #[inline]
    pub fn running_for(&self) -> Option<Player> {
        self.running_for
    }

    /// Time attributable to the running player since the last anchor.
    ///
    /// Re-anchors at `now_ms`. A `now_ms` earlier than the anchor counts as
    /// zero elapsed time.
    pub fn take_elapsed(&mut self, now_ms: u64) -> Option<(Player, u64)> {
        let player = self.running_for?;
        let elapsed = now_ms.saturating_sub(self.anchor_ms);
        self.anchor_ms = self.anchor_ms.max(now_ms);
        Some((player, elapsed))
    }
}
