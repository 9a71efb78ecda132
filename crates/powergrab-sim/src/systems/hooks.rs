//! Tether forces.
//!
//! Every active tether pulls its target toward the shooter and damps the
//! shooter's own velocity. Pull strength decays over the tether's life, so
//! a fresh latch yanks hard and an old one barely tugs. A tether releases
//! when it expires or the pair closes inside the break distance.
//!
//! Tethers are processed in ascending shooter order; with both players
//! tethered to each other the forces compose the same way every tick.

use std::collections::HashMap;

use glam::Vec2;
use hecs::World;

use powergrab_core::components::Player;
use powergrab_core::constants::*;
use powergrab_core::events::ArenaEvent;
use powergrab_core::types::{Position, Velocity};

use crate::tether::Tether;

pub fn run(
    world: &mut World,
    tethers: &mut HashMap<u8, Tether>,
    tick: u64,
    events: &mut Vec<ArenaEvent>,
) {
    if tethers.is_empty() {
        return;
    }

    let mut bodies: HashMap<u8, (hecs::Entity, Vec2, Vec2)> = HashMap::new();
    for (entity, (player, pos, vel)) in
        world.query_mut::<(&Player, &Position, &Velocity)>()
    {
        bodies.insert(player.slot, (entity, pos.vec(), vel.vec()));
    }

    let mut shooters: Vec<u8> = tethers.keys().copied().collect();
    shooters.sort_unstable();

    let mut released: Vec<u8> = Vec::new();
    for slot in shooters {
        let Some(&tether) = tethers.get(&slot) else {
            continue;
        };
        let (shooter_pos, target_pos) = match (
            bodies.get(&tether.shooter),
            bodies.get(&tether.target),
        ) {
            (Some(s), Some(t)) => (s.1, t.1),
            _ => {
                released.push(slot);
                continue;
            }
        };

        let delta = shooter_pos - target_pos;
        let dist = delta.length();
        if tick >= tether.expires_tick || dist <= HOOK_BREAK_DISTANCE {
            released.push(slot);
            events.push(ArenaEvent::HookReleased {
                shooter: tether.shooter,
                target: tether.target,
            });
            continue;
        }

        let pull_dir = delta / dist;
        let life = tether.remaining_frac(tick);
        let strength = HOOK_PULL_MIN + (HOOK_PULL_MAX - HOOK_PULL_MIN) * life;
        let blend = 1.0 - (-HOOK_VELOCITY_BLEND * DT).exp();
        let damp = (-HOOK_RECOIL_DAMP * DT).exp();

        if let Some(target) = bodies.get_mut(&tether.target) {
            target.2 += (pull_dir * strength - target.2) * blend;
        }
        if let Some(shooter) = bodies.get_mut(&tether.shooter) {
            shooter.2 *= damp;
        }
    }

    for slot in released {
        tethers.remove(&slot);
    }

    for (_slot, (entity, _pos, vel)) in bodies {
        if let Ok(mut velocity) = world.get::<&mut Velocity>(entity) {
            velocity.set(vel);
        }
    }
}
