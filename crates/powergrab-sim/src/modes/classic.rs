//! Classic mode — first to the winning score, lose at the debt floor.
//!
//! Minefield shares these rules; its extra hazards come from setup.

use powergrab_core::components::Player;
use powergrab_core::constants::HAZARD_PENALTY;
use powergrab_core::enums::WinReason;
use powergrab_core::settings::Settings;

use super::{opponent_of, RoundOutcome, Standing};

/// Every score orb counts in classic.
pub fn on_score_pickup(player: &mut Player, value: i32) -> bool {
    player.score += value;
    true
}

/// Hazards cost score. The debt check happens at end-of-tick evaluation.
pub fn on_hazard(
    toucher: &mut Player,
    _opponent_slot: Option<u8>,
    _settings: &Settings,
    _outcome: &mut RoundOutcome,
) -> bool {
    toucher.score -= HAZARD_PENALTY;
    true
}

/// Winning score first, then the debt floor. A player driven to the floor
/// hands the win to the opponent; with no opponent standing, the same
/// player is awarded the win (self-forfeit fallback).
pub fn evaluate_win(standings: &[Standing], settings: &Settings, outcome: &mut RoundOutcome) {
    let winning_score = settings.winning_score.max(1);
    for s in standings {
        if s.score >= winning_score {
            outcome.declare(s.slot, WinReason::Score);
        }
    }
    for s in standings {
        if s.score <= -settings.debt_threshold {
            let winner = opponent_of(standings, s.slot).unwrap_or(s.slot);
            outcome.declare(winner, WinReason::Debt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use powergrab_core::enums::Role;

    fn standing(slot: u8, score: i32) -> Standing {
        Standing {
            slot,
            score,
            health: 0,
            role: Role::None,
        }
    }

    #[test]
    fn score_target_wins() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        evaluate_win(&[standing(0, 10), standing(1, 4)], &settings, &mut outcome);
        assert_eq!(outcome.winner(), Some((0, WinReason::Score)));
    }

    #[test]
    fn debt_awards_the_opponent() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        evaluate_win(&[standing(0, -5), standing(1, 2)], &settings, &mut outcome);
        assert_eq!(outcome.winner(), Some((1, WinReason::Debt)));
    }

    #[test]
    fn debt_with_no_opponent_self_forfeits() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        evaluate_win(&[standing(0, -5)], &settings, &mut outcome);
        assert_eq!(outcome.winner(), Some((0, WinReason::Debt)));
    }

    #[test]
    fn score_beats_debt_on_the_same_tick() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        // Slot 0 hits the target on the same tick slot 1 bottoms out:
        // only the first declaration is honored.
        evaluate_win(&[standing(0, 10), standing(1, -5)], &settings, &mut outcome);
        assert_eq!(outcome.winner(), Some((0, WinReason::Score)));
    }
}
