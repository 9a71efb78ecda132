//! Tether data model — tracks the lifecycle of a hook link between two players.
//!
//! Stored in `ArenaEngine`'s tether map keyed by shooter slot, NOT as ECS
//! entities. The keying makes "at most one tether per shooter" structural:
//! firing again replaces the old entry.

/// A live tether pulling the target toward the shooter.
#[derive(Debug, Clone, Copy)]
pub struct Tether {
    /// Slot of the player that fired the hook.
    pub shooter: u8,
    /// Slot of the player being pulled.
    pub target: u8,
    /// Tick at which the hook latched.
    pub started_tick: u64,
    /// Tick at which the tether expires on its own.
    pub expires_tick: u64,
}

impl Tether {
    /// Remaining lifetime fraction: 1.0 when fresh, 0.0 at expiry.
    pub fn remaining_frac(&self, tick: u64) -> f32 {
        let total = self.expires_tick.saturating_sub(self.started_tick);
        if total == 0 {
            return 0.0;
        }
        let left = self.expires_tick.saturating_sub(tick);
        (left as f32 / total as f32).clamp(0.0, 1.0)
    }
}
