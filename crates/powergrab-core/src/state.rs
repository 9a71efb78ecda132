//! Arena snapshot — the complete visible state sent to the frontend each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::ArenaEvent;
use crate::types::{Position, Rect, SimTime, Velocity};

/// Complete arena state broadcast to the frontend after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: RoundPhase,
    pub mode: GameMode,
    /// Round number, starting at 1 for the first round.
    pub round: u32,
    pub players: Vec<PlayerView>,
    pub pickups: Vec<PickupView>,
    pub projectiles: Vec<ProjectileView>,
    pub tethers: Vec<TetherView>,
    pub zones: Vec<ZoneView>,
    pub walls: Vec<Rect>,
    /// Remaining mode timer in seconds, if one is running.
    pub timer_remaining_secs: Option<f32>,
    pub events: Vec<ArenaEvent>,
    /// Set from the round-over declaration until the next round starts.
    pub winner: Option<WinnerView>,
}

/// One player's visible state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub slot: u8,
    pub label: String,
    pub color: String,
    pub position: Position,
    pub velocity: Velocity,
    pub score: i32,
    /// Score target for this player (winning score, or tag goal for chasers).
    pub goal: i32,
    pub health: u32,
    pub max_health: u32,
    pub role: Role,
    /// Dash readiness fraction in 0..=1 (1 = ready now).
    pub dash_ready: f32,
    pub hook_charges: u8,
    pub max_hook_charges: u8,
    pub effect: Option<EffectView>,
    pub power: Option<PowerKind>,
    pub cloaked: bool,
    /// One-line mode/role instruction for the overlay.
    pub objective: String,
    /// Currency balance from the ledger.
    pub currency: u32,
    /// Rounds won across the match.
    pub wins: u32,
}

/// Active effect summary for the overlay meter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: EffectKind,
    /// Remaining lifetime fraction in 0..=1.
    pub remaining: f32,
}

/// A pickup on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u32,
    pub kind: PickupKind,
    pub position: Position,
    pub radius: f32,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub owner: u8,
    pub position: Position,
    pub velocity: Velocity,
    pub radius: f32,
}

/// An active tether for rendering the rope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TetherView {
    pub shooter: u8,
    pub target: u8,
    /// Remaining lifetime fraction in 0..=1.
    pub remaining: f32,
}

/// A surface zone on the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneView {
    pub label: String,
    pub rect: Rect,
    pub speed_mult: f32,
    /// Remaining lifetime in seconds for deployed zones.
    pub remaining_secs: Option<f32>,
}

/// The round outcome, visible from round-over through intermission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WinnerView {
    pub slot: u8,
    pub reason: WinReason,
}
