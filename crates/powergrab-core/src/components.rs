//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::Rect;

/// A player pawn. One per slot, recreated at every round start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player slot (0 or 1 in a two-player match).
    pub slot: u8,
    /// Display label shown by the overlay.
    pub label: String,
    /// Display color (hex string, passed through to the overlay).
    pub color: String,
    /// Round score. Negative scores are allowed down to the debt threshold.
    pub score: i32,
    /// Shield pool (duel mode; unused elsewhere).
    pub health: u32,
    /// Shield capacity.
    pub max_health: u32,
    /// Role for asymmetric modes.
    pub role: Role,
    /// Active timed effect, if any. A new effect replaces the old one.
    pub effect: Option<Effect>,
    /// Held power, if any. At most one; picking up another is a no-op.
    pub power: Option<PowerKind>,
    /// Remaining hook charges (0..=max_hook_charges).
    pub hook_charges: u8,
    /// Maximum hook charges this round.
    pub max_hook_charges: u8,
    /// Tick at which the next hook shot becomes legal.
    pub hook_ready_tick: u64,
    /// Tick at which the next dash becomes legal.
    pub dash_ready_tick: u64,
    /// Dash cooldown in ticks (upgrades can shorten it).
    pub dash_cooldown_ticks: u64,
    /// Tick at which the next tag becomes legal (chaser only).
    pub tag_ready_tick: u64,
    /// Tick until which hazard contact is ignored after a hit.
    pub hazard_grace_until: u64,
    /// Tick at which the next projectile shot becomes legal (duel).
    pub shoot_ready_tick: u64,
    /// Surface speed multiplier from the zone the player is standing in.
    pub surface_mult: f32,
    /// Last nonzero movement direction (aim fallback for dash/blink/shoot).
    pub facing: MoveDir,
    /// Surface zones currently containing this player, in entry order.
    /// Entries are entity bits; the newest still-overlapping zone governs.
    pub zone_stack: Vec<u64>,
}

/// A timed effect occupying a player's exclusive effect slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    /// Speed multiplier (1.0 for effects that do not change speed).
    pub magnitude: f32,
    pub started_tick: u64,
    pub expires_tick: u64,
}

/// Held-key movement state, updated by Move commands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A pickup on the field. Despawned when consumed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PickupItem {
    /// Stable id for the overlay (entity ids are not exposed).
    pub id: u32,
    pub kind: PickupKind,
    /// Concrete power granted when `kind` is Power.
    pub power: Option<PowerKind>,
    pub radius: f32,
}

/// A solid level wall. Blocks players and projectiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

/// A traversable region that scales traversal speed while inside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceZone {
    pub rect: Rect,
    pub speed_mult: f32,
    pub label: String,
    /// Expiry tick for deployed zones; None for permanent map zones.
    pub expires_tick: Option<u64>,
}

/// A projectile in flight (duel mode).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    /// Stable id for the overlay.
    pub id: u32,
    /// Slot of the player that fired it.
    pub owner: u8,
    pub damage: u32,
    pub radius: f32,
    pub expires_tick: u64,
}
