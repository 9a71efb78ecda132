//! State shared between the stdio bridge and the game loop thread.

use std::sync::{Arc, Mutex};

use powergrab_core::commands::PlayerCommand;
use powergrab_core::state::ArenaSnapshot;

/// Commands sent from the input side to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the arena engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest-snapshot slot, shared with the game loop thread.
///
/// The loop overwrites it after every tick; readers poll at their own pace
/// without applying backpressure to the simulation.
pub type SharedSnapshot = Arc<Mutex<Option<ArenaSnapshot>>>;

/// Fresh, empty snapshot slot.
pub fn shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_snapshot_starts_empty() {
        let shared = shared_snapshot();
        assert!(shared.lock().unwrap().is_none());
    }
}
