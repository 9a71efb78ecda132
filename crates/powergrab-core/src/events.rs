//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// One-shot feedback events, drained into each snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ArenaEvent {
    /// A pickup was consumed.
    PickupTaken { slot: u8, kind: PickupKind },
    /// A timed effect landed on a player.
    EffectApplied { slot: u8, kind: EffectKind },
    /// A hook latched onto a target.
    HookLatched { shooter: u8, target: u8 },
    /// A tether released (expiry, breakaway, or round end).
    HookReleased { shooter: u8, target: u8 },
    /// A dash fired.
    Dash { slot: u8 },
    /// The chaser tagged the collector.
    Tagged { chaser: u8, collector: u8 },
    /// A projectile left the muzzle.
    ProjectileFired { slot: u8 },
    /// A projectile struck a player.
    ProjectileHit { shooter: u8, target: u8 },
    /// A held power was activated.
    PowerUsed { slot: u8, power: PowerKind },
    /// Hazard contact penalized a player.
    HazardHit { slot: u8 },
    /// The round ended.
    RoundOver { winner: u8, reason: WinReason },
    /// An ineligible action was refused (cooldown, no charges, wrong phase).
    Denied { slot: u8 },
}
