//! Builtin arena library.
//!
//! Three levels ship with the game. Unknown ids fall back to the default
//! arena, and a level without spawn points gets the default pair.

use powergrab_core::constants::{ARENA_HEIGHT, ARENA_WIDTH};
use powergrab_core::level::{LevelSchema, ZoneSpec};
use powergrab_core::types::{Position, Rect};

/// Spawn points used when a level does not define its own:
/// mid-height, mirrored left/right.
pub fn default_spawn_points() -> Vec<Position> {
    vec![
        Position::new(160.0, ARENA_HEIGHT / 2.0),
        Position::new(ARENA_WIDTH - 160.0, ARENA_HEIGHT / 2.0),
    ]
}

/// Look up a builtin level by id. Unknown ids get the default arena.
pub fn level_by_id(id: &str) -> LevelSchema {
    let mut level = builtin_levels()
        .into_iter()
        .find(|l| l.id == id)
        .unwrap_or_else(proving_grounds);

    if level.spawn_points.is_empty() {
        level.spawn_points = default_spawn_points();
    }
    level
}

/// Pick the arena for a round: a custom schema when one was supplied
/// (file-loaded levels), otherwise the builtin matching the id. Custom
/// levels get the same empty-spawn-list fallback as builtins.
pub fn resolve_level(custom: Option<&LevelSchema>, id: &str) -> LevelSchema {
    match custom {
        Some(schema) => {
            let mut level = schema.clone();
            if level.spawn_points.is_empty() {
                level.spawn_points = default_spawn_points();
            }
            level
        }
        None => level_by_id(id),
    }
}

/// All builtin levels.
pub fn builtin_levels() -> Vec<LevelSchema> {
    vec![proving_grounds(), crossfire(), glacier()]
}

/// Open arena with two mud patches. The default level.
fn proving_grounds() -> LevelSchema {
    LevelSchema {
        id: "proving-grounds".to_string(),
        name: "Proving Grounds".to_string(),
        spawn_points: default_spawn_points(),
        walls: vec![],
        zones: vec![
            ZoneSpec {
                label: "mud".to_string(),
                rect: Rect::new(520.0, 120.0, 240.0, 130.0),
                speed_mult: 0.6,
            },
            ZoneSpec {
                label: "mud".to_string(),
                rect: Rect::new(520.0, 470.0, 240.0, 130.0),
                speed_mult: 0.6,
            },
        ],
    }
}

/// Central cross of walls forcing lane fights.
fn crossfire() -> LevelSchema {
    LevelSchema {
        id: "crossfire".to_string(),
        name: "Crossfire".to_string(),
        spawn_points: vec![
            Position::new(120.0, 120.0),
            Position::new(ARENA_WIDTH - 120.0, ARENA_HEIGHT - 120.0),
        ],
        walls: vec![
            Rect::new(600.0, 180.0, 80.0, 360.0),
            Rect::new(420.0, 320.0, 440.0, 80.0),
            Rect::new(140.0, 500.0, 180.0, 40.0),
            Rect::new(960.0, 180.0, 180.0, 40.0),
        ],
        zones: vec![],
    }
}

/// Slick ice sheet down the middle, mud pockets in the corners.
fn glacier() -> LevelSchema {
    LevelSchema {
        id: "glacier".to_string(),
        name: "Glacier".to_string(),
        spawn_points: default_spawn_points(),
        walls: vec![
            Rect::new(300.0, 0.0, 60.0, 200.0),
            Rect::new(920.0, ARENA_HEIGHT - 200.0, 60.0, 200.0),
        ],
        zones: vec![
            ZoneSpec {
                label: "ice".to_string(),
                rect: Rect::new(440.0, 160.0, 400.0, 400.0),
                speed_mult: 1.35,
            },
            ZoneSpec {
                label: "mud".to_string(),
                rect: Rect::new(40.0, 40.0, 160.0, 160.0),
                speed_mult: 0.6,
            },
            ZoneSpec {
                label: "mud".to_string(),
                rect: Rect::new(ARENA_WIDTH - 200.0, ARENA_HEIGHT - 200.0, 160.0, 160.0),
                speed_mult: 0.6,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_are_unique() {
        let levels = builtin_levels();
        for (i, a) in levels.iter().enumerate() {
            for b in &levels[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn every_builtin_has_two_spawn_points() {
        for level in builtin_levels() {
            let resolved = level_by_id(&level.id);
            assert!(
                resolved.spawn_points.len() >= 2,
                "level {} needs two spawn points",
                level.id
            );
        }
    }

    #[test]
    fn unknown_id_falls_back_to_default() {
        let level = level_by_id("no-such-arena");
        assert_eq!(level.id, "proving-grounds");
        assert_eq!(level.spawn_points.len(), 2);
    }

    #[test]
    fn custom_level_wins_over_id_and_gets_default_spawns() {
        let custom = LevelSchema {
            id: "workshop".to_string(),
            name: "Workshop".to_string(),
            ..LevelSchema::default()
        };

        let resolved = resolve_level(Some(&custom), "crossfire");
        assert_eq!(resolved.id, "workshop");
        assert_eq!(resolved.spawn_points, default_spawn_points());

        let resolved = resolve_level(None, "crossfire");
        assert_eq!(resolved.id, "crossfire");
    }

    #[test]
    fn spawn_points_clear_of_walls() {
        for level in builtin_levels() {
            let resolved = level_by_id(&level.id);
            for spawn in &resolved.spawn_points {
                for wall in &resolved.walls {
                    assert!(
                        !wall.contains(spawn),
                        "spawn {spawn:?} inside wall {wall:?} in {}",
                        level.id
                    );
                }
            }
        }
    }
}
