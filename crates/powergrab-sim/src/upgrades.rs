//! Upgrade catalog — costs and per-round application.
//!
//! Upgrades are consumables: bought between rounds, queued in the ledger,
//! and applied to the freshly spawned player at the next round start.

use powergrab_core::components::Player;
use powergrab_core::enums::UpgradeId;

/// Dash cooldown factor granted by SwiftDash.
pub const SWIFT_DASH_FACTOR: f32 = 0.75;

/// Starting score granted by HeadStart.
pub const HEAD_START_SCORE: i32 = 1;

/// Cost in currency for one application of an upgrade.
pub fn upgrade_cost(upgrade: UpgradeId) -> u32 {
    match upgrade {
        UpgradeId::ExtraHookCharge => 20,
        UpgradeId::SwiftDash => 15,
        UpgradeId::HeadStart => 10,
        UpgradeId::PlatedShield => 15,
    }
}

/// Apply one queued upgrade to a freshly spawned player.
/// Duplicate purchases stack.
pub fn apply_upgrade(player: &mut Player, upgrade: UpgradeId) {
    match upgrade {
        UpgradeId::ExtraHookCharge => {
            player.max_hook_charges += 1;
            player.hook_charges = player.max_hook_charges;
        }
        UpgradeId::SwiftDash => {
            let shortened = player.dash_cooldown_ticks as f32 * SWIFT_DASH_FACTOR;
            player.dash_cooldown_ticks = (shortened.round() as u64).max(1);
        }
        UpgradeId::HeadStart => {
            player.score += HEAD_START_SCORE;
        }
        UpgradeId::PlatedShield => {
            player.max_health += 1;
            player.health += 1;
        }
    }
}
