//! Mode rule engine — a closed tagged union dispatching to one module per mode.
//!
//! All modes share the tick pipeline; these hooks are the only points where
//! behavior forks. Minefield is classic with different setup parameters, so
//! it rides the Classic variant rather than getting its own.

pub mod classic;
pub mod duel;
pub mod pursuit;

use powergrab_core::components::Player;
use powergrab_core::constants::{HAZARD_DRIFT_SPEED, MINEFIELD_DRIFT_SPEED, MINEFIELD_HAZARD_FACTOR};
use powergrab_core::enums::{GameMode, Role, WinReason};
use powergrab_core::settings::Settings;

/// Rules in force for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeRules {
    Classic { minefield: bool },
    Pursuit,
    Duel,
}

/// Compact per-player numbers for end-of-tick win evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Standing {
    pub slot: u8,
    pub score: i32,
    pub health: u32,
    pub role: Role,
}

/// The round's outcome slot. First declaration sticks; later ones that
/// tick are short-circuited, so at most one round-over per round.
#[derive(Debug, Default)]
pub struct RoundOutcome {
    winner: Option<(u8, WinReason)>,
}

impl RoundOutcome {
    /// Declare a winner. Returns false if the round already has one.
    pub fn declare(&mut self, slot: u8, reason: WinReason) -> bool {
        if self.winner.is_some() {
            return false;
        }
        self.winner = Some((slot, reason));
        true
    }

    pub fn winner(&self) -> Option<(u8, WinReason)> {
        self.winner
    }

    pub fn reset(&mut self) {
        self.winner = None;
    }
}

impl ModeRules {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Classic => ModeRules::Classic { minefield: false },
            GameMode::Minefield => ModeRules::Classic { minefield: true },
            GameMode::Pursuit => ModeRules::Pursuit,
            GameMode::Duel => ModeRules::Duel,
        }
    }

    /// Whether score orbs (energy, rare energy) spawn at all.
    pub fn scoring_pickups(&self) -> bool {
        !matches!(self, ModeRules::Duel)
    }

    /// Whether this mode assigns chaser/collector roles.
    pub fn assigns_roles(&self) -> bool {
        matches!(self, ModeRules::Pursuit)
    }

    /// Whether the Shoot command is legal.
    pub fn uses_projectiles(&self) -> bool {
        matches!(self, ModeRules::Duel)
    }

    /// Hazard count multiplier applied at setup.
    pub fn hazard_factor(&self) -> u32 {
        match self {
            ModeRules::Classic { minefield: true } => MINEFIELD_HAZARD_FACTOR,
            _ => 1,
        }
    }

    /// Hazard drift speed for this mode.
    pub fn hazard_drift_speed(&self) -> f32 {
        match self {
            ModeRules::Classic { minefield: true } => MINEFIELD_DRIFT_SPEED,
            _ => HAZARD_DRIFT_SPEED,
        }
    }

    /// A player touched a score orb worth `value`.
    /// Returns true when the orb is consumed (scored).
    pub fn on_score_pickup(&self, player: &mut Player, value: i32) -> bool {
        match self {
            ModeRules::Classic { .. } => classic::on_score_pickup(player, value),
            ModeRules::Pursuit => pursuit::on_score_pickup(player, value),
            ModeRules::Duel => false,
        }
    }

    /// A player touched a hazard. Returns true when the contact registered
    /// (the caller stamps the grace window and emits feedback).
    pub fn on_hazard(
        &self,
        toucher: &mut Player,
        opponent_slot: Option<u8>,
        settings: &Settings,
        outcome: &mut RoundOutcome,
    ) -> bool {
        match self {
            ModeRules::Classic { .. } => classic::on_hazard(toucher, opponent_slot, settings, outcome),
            ModeRules::Pursuit => pursuit::on_hazard(toucher, opponent_slot, settings, outcome),
            ModeRules::Duel => duel::on_hazard(toucher),
        }
    }

    /// The chaser overlapped the collector with tagging legal.
    /// Returns true when the tag scored.
    pub fn on_tag(&self, chaser: &mut Player) -> bool {
        match self {
            ModeRules::Pursuit => pursuit::on_tag(chaser),
            _ => false,
        }
    }

    /// A projectile struck a non-owner player. Returns true when the hit
    /// registered (the caller emits feedback).
    pub fn on_projectile_hit(&self, target: &mut Player, damage: u32) -> bool {
        match self {
            ModeRules::Duel => duel::on_projectile_hit(target, damage),
            _ => false,
        }
    }

    /// End-of-tick win evaluation. At most one declaration is honored
    /// per round via the outcome slot.
    pub fn evaluate_win(
        &self,
        standings: &[Standing],
        settings: &Settings,
        timer_expired: bool,
        outcome: &mut RoundOutcome,
    ) {
        match self {
            ModeRules::Classic { .. } => classic::evaluate_win(standings, settings, outcome),
            ModeRules::Pursuit => pursuit::evaluate_win(standings, settings, timer_expired, outcome),
            ModeRules::Duel => duel::evaluate_win(standings, outcome),
        }
    }
}

/// The other slot in a two-player standing list, when present.
pub(crate) fn opponent_of(standings: &[Standing], slot: u8) -> Option<u8> {
    standings.iter().find(|s| s.slot != slot).map(|s| s.slot)
}
