//! Round settings — immutable for the duration of a round.
//!
//! The engine clones the pending settings at round start; `Configure`
//! commands replace the pending copy and take effect next round.
//! Every field has a serde default so partial TOML files load cleanly.

use serde::{Deserialize, Serialize};

use crate::enums::{BoundaryBehavior, GameMode};

/// Everything configurable about a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Score that ends a classic/minefield round.
    #[serde(default = "default_winning_score")]
    pub winning_score: i32,
    /// Positive magnitude of the losing score floor (lose at -threshold).
    #[serde(default = "default_debt_threshold")]
    pub debt_threshold: i32,
    /// Standard energy orbs on the field.
    #[serde(default = "default_energy_count")]
    pub energy_count: u32,
    /// Rare energy orbs on the field.
    #[serde(default = "default_rare_energy_count")]
    pub rare_energy_count: u32,
    /// Drifting hazards on the field (tripled by minefield mode).
    #[serde(default = "default_hazard_count")]
    pub hazard_count: u32,
    /// Special pickups on the field (effects, rope, power, teleport, skull).
    #[serde(default = "default_behavior_count")]
    pub behavior_count: u32,
    /// Game mode for the round.
    #[serde(default)]
    pub mode: GameMode,
    /// Tags the chaser needs to win pursuit mode.
    #[serde(default = "default_chaser_tag_goal")]
    pub chaser_tag_goal: u32,
    /// Pursuit countdown in seconds; None disables the timer.
    #[serde(default)]
    pub mode_timer_secs: Option<f32>,
    /// Arena edge behavior.
    #[serde(default)]
    pub boundary: BoundaryBehavior,
    /// Starting shield pool in duel mode.
    #[serde(default = "default_shooting_health")]
    pub shooting_health: u32,
    /// Projectile speed in pixels per second.
    #[serde(default = "default_projectile_speed")]
    pub projectile_speed: f32,
    /// Shield damage per projectile hit.
    #[serde(default = "default_projectile_damage")]
    pub projectile_damage: u32,
    /// Minimum milliseconds between shots.
    #[serde(default = "default_projectile_cooldown_ms")]
    pub projectile_cooldown_ms: u64,
    /// Projectile lifetime in milliseconds.
    #[serde(default = "default_projectile_lifetime_ms")]
    pub projectile_lifetime_ms: u64,
    /// Builtin level id (unknown ids fall back to the default level).
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_winning_score() -> i32 {
    10
}

fn default_debt_threshold() -> i32 {
    5
}

fn default_energy_count() -> u32 {
    6
}

fn default_rare_energy_count() -> u32 {
    1
}

fn default_hazard_count() -> u32 {
    3
}

fn default_behavior_count() -> u32 {
    2
}

fn default_chaser_tag_goal() -> u32 {
    3
}

fn default_shooting_health() -> u32 {
    5
}

fn default_projectile_speed() -> f32 {
    520.0
}

fn default_projectile_damage() -> u32 {
    1
}

fn default_projectile_cooldown_ms() -> u64 {
    400
}

fn default_projectile_lifetime_ms() -> u64 {
    900
}

fn default_level() -> String {
    "proving-grounds".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            winning_score: default_winning_score(),
            debt_threshold: default_debt_threshold(),
            energy_count: default_energy_count(),
            rare_energy_count: default_rare_energy_count(),
            hazard_count: default_hazard_count(),
            behavior_count: default_behavior_count(),
            mode: GameMode::default(),
            chaser_tag_goal: default_chaser_tag_goal(),
            mode_timer_secs: None,
            boundary: BoundaryBehavior::default(),
            shooting_health: default_shooting_health(),
            projectile_speed: default_projectile_speed(),
            projectile_damage: default_projectile_damage(),
            projectile_cooldown_ms: default_projectile_cooldown_ms(),
            projectile_lifetime_ms: default_projectile_lifetime_ms(),
            level: default_level(),
        }
    }
}

/// Display identity for one player slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBinding {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub color: String,
}

impl PlayerBinding {
    /// Default identities for the two local slots.
    pub fn defaults() -> [PlayerBinding; 2] {
        [
            PlayerBinding {
                label: "P1".to_string(),
                color: "#4fc3f7".to_string(),
            },
            PlayerBinding {
                label: "P2".to_string(),
                color: "#ff8a65".to_string(),
            },
        ]
    }
}
