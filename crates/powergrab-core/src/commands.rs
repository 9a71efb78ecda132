//! Player commands sent from the frontend to the simulation.
//!
//! Commands are validated and queued for processing at the next tick boundary.
//! Ineligible commands are silent no-ops; most emit a `Denied` feedback event.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::settings::Settings;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement ---
    /// A movement key transition. `pressed` tracks held-key state.
    Move { slot: u8, dir: MoveDir, pressed: bool },
    /// Burst of speed along the facing direction.
    Dash { slot: u8 },

    // --- Abilities ---
    /// Fire the hook at the nearest player in range.
    FireHook { slot: u8 },
    /// Activate the held power.
    UsePower { slot: u8 },
    /// Fire a projectile (duel mode only). An explicit aim direction
    /// overrides auto-targeting.
    Shoot {
        slot: u8,
        #[serde(default)]
        aim: Option<Vec2>,
    },

    // --- Meta ---
    /// Spend currency to queue an upgrade for the next round.
    BuyUpgrade { slot: u8, upgrade: UpgradeId },
    /// Replace the pending round settings (ignored while a round runs).
    Configure { settings: Settings },

    // --- Round control ---
    /// Begin a round from the lobby or intermission.
    StartRound,
    /// Freeze the simulation.
    Pause,
    /// Unfreeze the simulation.
    Resume,
}
