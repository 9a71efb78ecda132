//! Duel mode — strip the opponent's shield pool with projectiles.
//!
//! No score orbs spawn; hazards chip the shield instead of the score.

use powergrab_core::components::Player;
use powergrab_core::constants::HAZARD_DUEL_DAMAGE;
use powergrab_core::enums::WinReason;

use super::{opponent_of, RoundOutcome, Standing};

/// Hazard contact costs shield, never score.
pub fn on_hazard(toucher: &mut Player) -> bool {
    toucher.health = toucher.health.saturating_sub(HAZARD_DUEL_DAMAGE);
    true
}

/// Projectile impact drains the target's shield pool.
pub fn on_projectile_hit(target: &mut Player, damage: u32) -> bool {
    target.health = target.health.saturating_sub(damage);
    true
}

/// Zero shield ends the round for the opponent.
pub fn evaluate_win(standings: &[Standing], outcome: &mut RoundOutcome) {
    for s in standings {
        if s.health == 0 {
            let winner = opponent_of(standings, s.slot).unwrap_or(s.slot);
            outcome.declare(winner, WinReason::Knockout);
        }
    }
}
