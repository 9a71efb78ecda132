//! Timed effect lifecycle.
//!
//! A player holds at most one effect. Applying a new one overwrites the
//! slot outright, so the old effect never gets a separate revert step;
//! speed multipliers are always derived from the current slot.

use hecs::World;

use powergrab_core::components::{Effect, Player};
use powergrab_core::constants::*;
use powergrab_core::enums::EffectKind;
use powergrab_core::types::secs_to_ticks;

/// Clear effects whose lifetime has elapsed.
pub fn run(world: &mut World, tick: u64) {
    for (_entity, player) in world.query_mut::<&mut Player>() {
        if let Some(effect) = player.effect {
            if tick >= effect.expires_tick {
                player.effect = None;
            }
        }
    }
}

/// Stamp an effect into the exclusive slot, replacing whatever was there.
pub fn apply(player: &mut Player, kind: EffectKind, tick: u64) {
    let (duration_secs, magnitude) = match kind {
        EffectKind::Boost => (BOOST_DURATION_SECS, BOOST_MULT),
        EffectKind::Slow => (SLOW_DURATION_SECS, SLOW_MULT),
        EffectKind::Cloak => (CLOAK_DURATION_SECS, 1.0),
    };
    player.effect = Some(Effect {
        kind,
        magnitude,
        started_tick: tick,
        expires_tick: tick + secs_to_ticks(duration_secs),
    });
}

/// Whether the player is currently cloaked.
pub fn is_cloaked(player: &Player) -> bool {
    matches!(player.effect, Some(e) if e.kind == EffectKind::Cloak)
}
