//! App configuration — a TOML settings file plus optional JSON level files.
//!
//! Every field has a default, so a missing or partial file always yields a
//! playable setup. The first run writes the default file out for players
//! to edit.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use powergrab_core::level::LevelSchema;
use powergrab_core::settings::{PlayerBinding, Settings};

use crate::bindings::KeyBindings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("could not encode default config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("invalid level file: {0}")]
    Level(#[from] serde_json::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// RNG seed; identical seeds replay identical matches.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Path to a custom level JSON file. Builtin levels when absent.
    #[serde(default)]
    pub level_file: Option<String>,
    /// Display identities for the two local slots.
    #[serde(default = "PlayerBinding::defaults")]
    pub players: [PlayerBinding; 2],
    /// Round settings handed to the engine.
    #[serde(default)]
    pub settings: Settings,
    /// Key maps for both slots.
    #[serde(default)]
    pub bindings: KeyBindings,
}

fn default_seed() -> u64 {
    42
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            level_file: None,
            players: PlayerBinding::defaults(),
            settings: Settings::default(),
            bindings: KeyBindings::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or write the default file and use it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            info!(path = %path.display(), "no config file found, writing defaults");
            let config = Self::default();
            std::fs::write(path, toml::to_string_pretty(&config)?)?;
            Ok(config)
        }
    }
}

/// Load an arena schema from a JSON file.
pub fn load_level(path: &Path) -> Result<LevelSchema, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use powergrab_core::enums::GameMode;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.settings.winning_score, 10);
        assert_eq!(config.settings.mode, GameMode::Classic);
        assert_eq!(config.players[0].label, "P1");
        assert!(config.level_file.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            seed = 7

            [settings]
            mode = "Pursuit"
            chaser_tag_goal = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.settings.mode, GameMode::Pursuit);
        assert_eq!(config.settings.chaser_tag_goal, 5);
        assert_eq!(config.settings.winning_score, 10, "untouched default");
        assert_eq!(config.bindings.p1.up, "KeyW");
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let encoded = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let decoded: AppConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.seed, AppConfig::default().seed);
        assert_eq!(decoded.players[1].color, "#ff8a65");
    }

    #[test]
    fn test_load_writes_default_file_once() {
        let path = std::env::temp_dir().join("powergrab-config-load-test.toml");
        let _ = std::fs::remove_file(&path);

        let first = AppConfig::load(&path).unwrap();
        assert!(path.exists(), "first load should write the default file");
        let second = AppConfig::load(&path).unwrap();
        assert_eq!(first.seed, second.seed);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_level_json_parses_with_partial_fields() {
        let level: LevelSchema = serde_json::from_str(
            r#"{
                "id": "workshop",
                "name": "Workshop",
                "walls": [{ "x": 600.0, "y": 300.0, "w": 80.0, "h": 120.0 }]
            }"#,
        )
        .unwrap();

        assert_eq!(level.id, "workshop");
        assert_eq!(level.walls.len(), 1);
        assert!(level.spawn_points.is_empty(), "engine fills default spawns");
        assert!(level.zones.is_empty());
    }
}
