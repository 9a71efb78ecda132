//! Level schema — spawn points, solid walls, and named surface zones.
//!
//! Levels are data, not code: builtin arenas live in the sim crate and
//! custom arenas load from JSON files with the same shape.

use serde::{Deserialize, Serialize};

use crate::types::{Position, Rect};

/// A complete arena description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelSchema {
    pub id: String,
    pub name: String,
    /// Player spawn points by slot. An empty list falls back to defaults.
    #[serde(default)]
    pub spawn_points: Vec<Position>,
    /// Solid rectangles blocking movement and projectiles.
    #[serde(default)]
    pub walls: Vec<Rect>,
    /// Permanent speed-scaling regions.
    #[serde(default)]
    pub zones: Vec<ZoneSpec>,
}

/// A named permanent surface zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSpec {
    pub label: String,
    pub rect: Rect,
    pub speed_mult: f32,
}
