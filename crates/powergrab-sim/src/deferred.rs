//! Deferred one-shot actions — the single queue for everything that fires
//! "later": pickup respawns, glue field expiry, the round-over intermission.
//!
//! Round reset clears the whole queue atomically, which is what cancels
//! pending respawns and expiries from the previous round.

/// An action scheduled to fire at a future tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeferredAction {
    /// Respawn a consumed pickup of a fixed kind at a fresh clear position.
    RespawnPickup(powergrab_core::enums::PickupKind),
    /// Respawn a consumed special pickup, rerolling its concrete kind.
    RespawnSpecial,
    /// Remove a deployed surface zone.
    ExpireZone(hecs::Entity),
    /// Open the intermission after the round-over freeze.
    BeginIntermission,
}

/// FIFO of scheduled actions keyed by due tick.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    entries: Vec<(u64, DeferredAction)>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action to fire once `due_tick` is reached.
    pub fn schedule(&mut self, due_tick: u64, action: DeferredAction) {
        self.entries.push((due_tick, action));
    }

    /// Remove and return every action due at or before `tick`,
    /// in scheduling order.
    pub fn drain_due(&mut self, tick: u64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.entries.retain(|&(due_tick, action)| {
            if due_tick <= tick {
                due.push(action);
                false
            } else {
                true
            }
        });
        due
    }

    /// Drop every pending action.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
