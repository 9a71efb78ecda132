//! Pursuit mode — one chaser tags, one collector scores and survives.

use powergrab_core::components::Player;
use powergrab_core::constants::HAZARD_PENALTY;
use powergrab_core::enums::{Role, WinReason};
use powergrab_core::settings::Settings;

use super::{opponent_of, RoundOutcome, Standing};

/// Only the collector scores energy. A chaser touching an orb leaves it.
pub fn on_score_pickup(player: &mut Player, value: i32) -> bool {
    if player.role != Role::Collector {
        return false;
    }
    player.score += value;
    true
}

/// Hazards penalize the collector only; the chaser plows through them.
pub fn on_hazard(
    toucher: &mut Player,
    _opponent_slot: Option<u8>,
    _settings: &Settings,
    _outcome: &mut RoundOutcome,
) -> bool {
    if toucher.role != Role::Collector {
        return false;
    }
    toucher.score -= HAZARD_PENALTY;
    true
}

/// A legal tag scored. The caller has already gated on the tag cooldown
/// and the collector's cloak.
pub fn on_tag(chaser: &mut Player) -> bool {
    chaser.score += 1;
    true
}

/// Tag goal and collector debt first, timer expiry last, so a tag landed
/// on the expiry tick still wins the round for the chaser.
pub fn evaluate_win(
    standings: &[Standing],
    settings: &Settings,
    timer_expired: bool,
    outcome: &mut RoundOutcome,
) {
    let goal = settings.chaser_tag_goal.max(1) as i32;
    for s in standings {
        match s.role {
            Role::Chaser if s.score >= goal => {
                outcome.declare(s.slot, WinReason::Tag);
            }
            Role::Collector if s.score <= -settings.debt_threshold => {
                let winner = opponent_of(standings, s.slot).unwrap_or(s.slot);
                outcome.declare(winner, WinReason::Debt);
            }
            _ => {}
        }
    }

    if timer_expired {
        if let Some(collector) = standings.iter().find(|s| s.role == Role::Collector) {
            outcome.declare(collector.slot, WinReason::Timer);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(slot: u8, score: i32, role: Role) -> Standing {
        Standing {
            slot,
            score,
            health: 0,
            role,
        }
    }

    #[test]
    fn tag_goal_wins_for_the_chaser() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        let standings = [
            standing(0, 2, Role::Collector),
            standing(1, 3, Role::Chaser),
        ];
        evaluate_win(&standings, &settings, false, &mut outcome);
        assert_eq!(outcome.winner(), Some((1, WinReason::Tag)));
    }

    #[test]
    fn timer_expiry_awards_the_collector() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        let standings = [
            standing(0, 1, Role::Collector),
            standing(1, 2, Role::Chaser),
        ];
        evaluate_win(&standings, &settings, true, &mut outcome);
        assert_eq!(outcome.winner(), Some((0, WinReason::Timer)));
    }

    #[test]
    fn tag_on_the_expiry_tick_beats_the_timer() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        let standings = [
            standing(0, 0, Role::Collector),
            standing(1, 3, Role::Chaser),
        ];
        evaluate_win(&standings, &settings, true, &mut outcome);
        assert_eq!(outcome.winner(), Some((1, WinReason::Tag)));
    }

    #[test]
    fn collector_debt_hands_the_chaser_the_win() {
        let mut outcome = RoundOutcome::default();
        let settings = Settings::default();
        let standings = [
            standing(0, -5, Role::Collector),
            standing(1, 0, Role::Chaser),
        ];
        evaluate_win(&standings, &settings, false, &mut outcome);
        assert_eq!(outcome.winner(), Some((1, WinReason::Debt)));
    }
}
