//! Key bindings — physical key codes to player commands.
//!
//! The bridge receives raw key transitions; this layer turns them into
//! `PlayerCommand`s. Move keys map on both press and release (the sim
//! tracks held state), ability keys fire on press only.

use serde::{Deserialize, Serialize};

use powergrab_core::commands::PlayerCommand;
use powergrab_core::enums::MoveDir;

/// One slot's key map. Key names follow the W3C `KeyboardEvent.code`
/// values ("KeyW", "ArrowUp", "ShiftLeft") so an overlay can forward
/// browser events unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerKeys {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub dash: String,
    pub hook: String,
    pub power: String,
    pub shoot: String,
}

impl PlayerKeys {
    fn move_dir(&self, key: &str) -> Option<MoveDir> {
        if key == self.up {
            Some(MoveDir::Up)
        } else if key == self.down {
            Some(MoveDir::Down)
        } else if key == self.left {
            Some(MoveDir::Left)
        } else if key == self.right {
            Some(MoveDir::Right)
        } else {
            None
        }
    }
}

/// Key maps for both local slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_p1_keys")]
    pub p1: PlayerKeys,
    #[serde(default = "default_p2_keys")]
    pub p2: PlayerKeys,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            p1: default_p1_keys(),
            p2: default_p2_keys(),
        }
    }
}

fn default_p1_keys() -> PlayerKeys {
    PlayerKeys {
        up: "KeyW".to_string(),
        down: "KeyS".to_string(),
        left: "KeyA".to_string(),
        right: "KeyD".to_string(),
        dash: "ShiftLeft".to_string(),
        hook: "KeyE".to_string(),
        power: "KeyQ".to_string(),
        shoot: "Space".to_string(),
    }
}

fn default_p2_keys() -> PlayerKeys {
    PlayerKeys {
        up: "ArrowUp".to_string(),
        down: "ArrowDown".to_string(),
        left: "ArrowLeft".to_string(),
        right: "ArrowRight".to_string(),
        dash: "ShiftRight".to_string(),
        hook: "Slash".to_string(),
        power: "Period".to_string(),
        shoot: "Enter".to_string(),
    }
}

impl KeyBindings {
    /// Translate one key transition into a player command.
    ///
    /// Unbound keys and ability-key releases map to nothing.
    pub fn command_for_key(&self, key: &str, pressed: bool) -> Option<PlayerCommand> {
        for (slot, keys) in [(0u8, &self.p1), (1u8, &self.p2)] {
            if let Some(dir) = keys.move_dir(key) {
                return Some(PlayerCommand::Move { slot, dir, pressed });
            }
            if !pressed {
                continue;
            }
            if key == keys.dash {
                return Some(PlayerCommand::Dash { slot });
            }
            if key == keys.hook {
                return Some(PlayerCommand::FireHook { slot });
            }
            if key == keys.power {
                return Some(PlayerCommand::UsePower { slot });
            }
            if key == keys.shoot {
                return Some(PlayerCommand::Shoot { slot, aim: None });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_keys_map_press_and_release() {
        let bindings = KeyBindings::default();

        let press = bindings.command_for_key("KeyW", true);
        assert!(matches!(
            press,
            Some(PlayerCommand::Move {
                slot: 0,
                dir: MoveDir::Up,
                pressed: true
            })
        ));

        let release = bindings.command_for_key("ArrowLeft", false);
        assert!(matches!(
            release,
            Some(PlayerCommand::Move {
                slot: 1,
                dir: MoveDir::Left,
                pressed: false
            })
        ));
    }

    #[test]
    fn test_ability_keys_fire_on_press_only() {
        let bindings = KeyBindings::default();

        assert!(matches!(
            bindings.command_for_key("ShiftLeft", true),
            Some(PlayerCommand::Dash { slot: 0 })
        ));
        assert!(bindings.command_for_key("ShiftLeft", false).is_none());

        assert!(matches!(
            bindings.command_for_key("Slash", true),
            Some(PlayerCommand::FireHook { slot: 1 })
        ));
        assert!(matches!(
            bindings.command_for_key("KeyQ", true),
            Some(PlayerCommand::UsePower { slot: 0 })
        ));
        assert!(matches!(
            bindings.command_for_key("Enter", true),
            Some(PlayerCommand::Shoot { slot: 1, aim: None })
        ));
    }

    #[test]
    fn test_unbound_key_maps_to_nothing() {
        let bindings = KeyBindings::default();
        assert!(bindings.command_for_key("KeyZ", true).is_none());
        assert!(bindings.command_for_key("Escape", true).is_none());
    }

    #[test]
    fn test_default_maps_do_not_collide() {
        let bindings = KeyBindings::default();
        let mut keys: Vec<&str> = Vec::new();
        for side in [&bindings.p1, &bindings.p2] {
            keys.extend([
                side.up.as_str(),
                side.down.as_str(),
                side.left.as_str(),
                side.right.as_str(),
                side.dash.as_str(),
                side.hook.as_str(),
                side.power.as_str(),
                side.shoot.as_str(),
            ]);
        }
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total, "every default key must be unique");
    }

    #[test]
    fn test_rebinding_survives_toml_round_trip() {
        let mut bindings = KeyBindings::default();
        bindings.p1.dash = "KeyF".to_string();

        let encoded = toml::to_string(&bindings).unwrap();
        let decoded: KeyBindings = toml::from_str(&encoded).unwrap();
        assert!(matches!(
            decoded.command_for_key("KeyF", true),
            Some(PlayerCommand::Dash { slot: 0 })
        ));
    }
}
