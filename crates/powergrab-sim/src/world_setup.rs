//! Entity spawn factories for setting up the arena world.
//!
//! Creates walls, zones, players, and pickups with appropriate component
//! bundles. Random placement goes through the bounded sampler; a failed
//! placement skips the spawn rather than retrying forever.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use powergrab_core::components::*;
use powergrab_core::constants::*;
use powergrab_core::enums::*;
use powergrab_core::level::LevelSchema;
use powergrab_core::settings::{PlayerBinding, Settings};
use powergrab_core::types::{secs_to_ticks, Position, Rect, Velocity};

use crate::modes::ModeRules;
use crate::placement;
use crate::upgrades;

/// Spawn the level's solid walls.
pub fn spawn_walls(world: &mut World, level: &LevelSchema) {
    for rect in &level.walls {
        world.spawn((Wall { rect: *rect },));
    }
}

/// Spawn the level's permanent surface zones.
pub fn spawn_zones(world: &mut World, level: &LevelSchema) {
    for zone in &level.zones {
        world.spawn((SurfaceZone {
            rect: zone.rect,
            speed_mult: zone.speed_mult,
            label: zone.label.clone(),
            expires_tick: None,
        },));
    }
}

/// Spawn a player pawn at a fixed spawn point, applying queued upgrades.
pub fn spawn_player(
    world: &mut World,
    slot: u8,
    binding: &PlayerBinding,
    role: Role,
    spawn_point: Position,
    settings: &Settings,
    queued: &[UpgradeId],
) -> hecs::Entity {
    // Slots face each other across the arena.
    let facing = if slot == 0 { MoveDir::Right } else { MoveDir::Left };

    let mut player = Player {
        slot,
        label: binding.label.clone(),
        color: binding.color.clone(),
        score: 0,
        health: settings.shooting_health,
        max_health: settings.shooting_health,
        role,
        effect: None,
        power: None,
        hook_charges: HOOK_MAX_CHARGES,
        max_hook_charges: HOOK_MAX_CHARGES,
        hook_ready_tick: 0,
        dash_ready_tick: 0,
        dash_cooldown_ticks: secs_to_ticks(DASH_COOLDOWN_SECS),
        tag_ready_tick: 0,
        hazard_grace_until: 0,
        shoot_ready_tick: 0,
        surface_mult: 1.0,
        facing,
        zone_stack: Vec::new(),
    };

    for upgrade in queued {
        upgrades::apply_upgrade(&mut player, *upgrade);
    }

    world.spawn((
        player,
        InputState::default(),
        spawn_point,
        Velocity::default(),
    ))
}

/// Spawn a stationary pickup at a known position.
pub fn spawn_pickup(
    world: &mut World,
    id: u32,
    kind: PickupKind,
    power: Option<PowerKind>,
    pos: Position,
) -> hecs::Entity {
    world.spawn((
        PickupItem {
            id,
            kind,
            power,
            radius: PICKUP_RADIUS,
        },
        pos,
    ))
}

/// Spawn a drifting hazard with a random heading.
pub fn spawn_hazard(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    id: u32,
    pos: Position,
    drift_speed: f32,
) -> hecs::Entity {
    let heading: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let velocity = Velocity::new(heading.cos() * drift_speed, heading.sin() * drift_speed);

    world.spawn((
        PickupItem {
            id,
            kind: PickupKind::Hazard,
            power: None,
            radius: HAZARD_RADIUS,
        },
        pos,
        velocity,
    ))
}

/// Place and spawn one pickup of a fixed kind. Returns None (and skips)
/// when no clear position can be found.
pub fn spawn_placed_pickup(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    kind: PickupKind,
    power: Option<PowerKind>,
    next_id: &mut u32,
) -> Option<hecs::Entity> {
    let radius = match kind {
        PickupKind::Hazard => HAZARD_RADIUS,
        _ => PICKUP_RADIUS,
    };
    let occupied = occupied_rects(world);
    let Some(pos) = placement::place_clear(rng, radius * 2.0, &occupied) else {
        debug!(?kind, "no clear position, skipping pickup spawn");
        return None;
    };

    let id = *next_id;
    *next_id += 1;
    Some(match kind {
        PickupKind::Hazard => spawn_hazard(world, rng, id, pos, HAZARD_DRIFT_SPEED),
        _ => spawn_pickup(world, id, kind, power, pos),
    })
}

/// Fill the field per the settings and mode: score orbs, hazards, specials.
pub fn populate_pickups(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    settings: &Settings,
    rules: &ModeRules,
    next_id: &mut u32,
) {
    if rules.scoring_pickups() {
        for _ in 0..settings.energy_count {
            spawn_placed_pickup(world, rng, PickupKind::Energy, None, next_id);
        }
        for _ in 0..settings.rare_energy_count {
            spawn_placed_pickup(world, rng, PickupKind::RareEnergy, None, next_id);
        }
    }

    let hazard_total = settings.hazard_count * rules.hazard_factor();
    let drift = rules.hazard_drift_speed();
    for _ in 0..hazard_total {
        let occupied = occupied_rects(world);
        if let Some(pos) = placement::place_clear(rng, HAZARD_RADIUS * 2.0, &occupied) {
            let id = *next_id;
            *next_id += 1;
            spawn_hazard(world, rng, id, pos, drift);
        } else {
            debug!("no clear position, skipping hazard spawn");
        }
    }

    for _ in 0..settings.behavior_count {
        let (kind, power) = roll_special(rng);
        spawn_placed_pickup(world, rng, kind, power, next_id);
    }
}

/// Roll the concrete kind of a special pickup.
/// Effects dominate; rope, power, teleport, and skull stay uncommon.
pub fn roll_special(rng: &mut ChaCha8Rng) -> (PickupKind, Option<PowerKind>) {
    let roll: f32 = rng.gen_range(0.0..1.0);
    if roll < 0.50 {
        (PickupKind::Behavior, None)
    } else if roll < 0.65 {
        (PickupKind::Rope, None)
    } else if roll < 0.80 {
        let power = if rng.gen_bool(0.5) {
            PowerKind::GlueField
        } else {
            PowerKind::Blink
        };
        (PickupKind::Power, Some(power))
    } else if roll < 0.90 {
        (PickupKind::Teleport, None)
    } else {
        (PickupKind::Skull, None)
    }
}

/// Bare player component for unit tests.
#[cfg(test)]
pub fn test_player(slot: u8) -> Player {
    Player {
        slot,
        label: format!("P{}", slot + 1),
        color: "#ffffff".into(),
        score: 0,
        health: 5,
        max_health: 5,
        role: Role::None,
        effect: None,
        power: None,
        hook_charges: HOOK_MAX_CHARGES,
        max_hook_charges: HOOK_MAX_CHARGES,
        hook_ready_tick: 0,
        dash_ready_tick: 0,
        dash_cooldown_ticks: secs_to_ticks(DASH_COOLDOWN_SECS),
        tag_ready_tick: 0,
        hazard_grace_until: 0,
        shoot_ready_tick: 0,
        surface_mult: 1.0,
        facing: MoveDir::Right,
        zone_stack: Vec::new(),
    }
}

/// Everything a fresh spawn must keep clear of: walls plus the bounding
/// boxes of players and existing pickups.
pub fn occupied_rects(world: &World) -> Vec<Rect> {
    let mut occupied = Vec::new();

    for (_entity, wall) in &mut world.query::<&Wall>() {
        occupied.push(wall.rect);
    }
    for (_entity, (_player, pos)) in &mut world.query::<(&Player, &Position)>() {
        occupied.push(Rect::from_center(*pos, PLAYER_RADIUS, PLAYER_RADIUS));
    }
    for (_entity, (item, pos)) in &mut world.query::<(&PickupItem, &Position)>() {
        occupied.push(Rect::from_center(*pos, item.radius, item.radius));
    }

    occupied
}
