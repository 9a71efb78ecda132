//! Projectile flight and impact (duel mode).
//!
//! Projectiles fly in straight lines. They die on wall contact, on expiry,
//! or on striking a player other than their owner. Impacts route through
//! the mode rules (duel drains the target's shield pool); the knockout
//! itself is declared by win evaluation.

use hecs::{Entity, World};

use powergrab_core::components::{Player, Projectile, Wall};
use powergrab_core::constants::*;
use powergrab_core::events::ArenaEvent;
use powergrab_core::types::{Position, Rect, Velocity};

use crate::modes::ModeRules;

pub fn run(
    world: &mut World,
    rules: &ModeRules,
    tick: u64,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<ArenaEvent>,
) {
    let walls: Vec<Rect> = world
        .query_mut::<&Wall>()
        .into_iter()
        .map(|(_entity, wall)| wall.rect)
        .collect();

    // Advance, then collect flight state for the impact pass.
    let mut flights: Vec<(Entity, Projectile, Position)> = Vec::new();
    for (entity, (proj, pos, vel)) in
        world.query_mut::<(&Projectile, &mut Position, &Velocity)>()
    {
        let next = pos.vec() + vel.vec() * DT;
        pos.set(next);
        flights.push((entity, *proj, *pos));
    }
    flights.sort_by_key(|&(_, proj, _)| proj.id);

    let players: Vec<(u8, Entity, Position)> = {
        let mut list: Vec<_> = world
            .query_mut::<(&Player, &Position)>()
            .into_iter()
            .map(|(entity, (player, pos))| (player.slot, entity, *pos))
            .collect();
        list.sort_by_key(|&(slot, ..)| slot);
        list
    };

    let mut hits: Vec<(Entity, u8, u8, u32)> = Vec::new();
    for (entity, proj, pos) in flights {
        let in_wall = walls
            .iter()
            .any(|wall| wall.closest_point(&pos).vec().distance(pos.vec()) < proj.radius);
        let out_of_bounds = pos.x < -proj.radius
            || pos.x > ARENA_WIDTH + proj.radius
            || pos.y < -proj.radius
            || pos.y > ARENA_HEIGHT + proj.radius;
        if in_wall || out_of_bounds || tick >= proj.expires_tick {
            despawn_buffer.push(entity);
            continue;
        }

        for &(slot, player_entity, player_pos) in &players {
            if slot == proj.owner {
                continue;
            }
            if pos.vec().distance(player_pos.vec()) <= proj.radius + PLAYER_RADIUS {
                hits.push((player_entity, proj.owner, slot, proj.damage));
                despawn_buffer.push(entity);
                break;
            }
        }
    }

    for (player_entity, shooter, target, damage) in hits {
        if let Ok(mut player) = world.get::<&mut Player>(player_entity) {
            if rules.on_projectile_hit(&mut player, damage) {
                events.push(ArenaEvent::ProjectileHit { shooter, target });
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::test_player;
    use powergrab_core::components::InputState;

    fn spawn_projectile(world: &mut World, x: f32, vx: f32, owner: u8) -> Entity {
        world.spawn((
            Projectile {
                id: 1,
                owner,
                damage: 1,
                radius: PROJECTILE_RADIUS,
                expires_tick: 1000,
            },
            Position::new(x, 360.0),
            Velocity::new(vx, 0.0),
        ))
    }

    #[test]
    fn projectile_hit_drains_shield_and_despawns() {
        let mut world = World::new();
        let target = world.spawn((
            test_player(1),
            InputState::default(),
            Position::new(400.0, 360.0),
            Velocity::default(),
        ));
        let proj = spawn_projectile(&mut world, 380.0, 520.0, 0);

        let mut despawn = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &ModeRules::Duel, 0, &mut despawn, &mut events);

        assert_eq!(world.get::<&Player>(target).unwrap().health, 4);
        assert!(!world.contains(proj));
        assert!(matches!(
            events.as_slice(),
            [ArenaEvent::ProjectileHit { shooter: 0, target: 1 }]
        ));
    }

    #[test]
    fn projectile_ignores_its_owner() {
        let mut world = World::new();
        let owner = world.spawn((
            test_player(0),
            InputState::default(),
            Position::new(400.0, 360.0),
            Velocity::default(),
        ));
        let proj = spawn_projectile(&mut world, 395.0, 520.0, 0);

        let mut despawn = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &ModeRules::Duel, 0, &mut despawn, &mut events);

        assert_eq!(world.get::<&Player>(owner).unwrap().health, 5);
        assert!(world.contains(proj));
        assert!(events.is_empty());
    }

    #[test]
    fn projectile_dies_on_walls_and_expiry() {
        let mut world = World::new();
        world.spawn((Wall {
            rect: Rect::new(500.0, 0.0, 40.0, 720.0),
        },));
        let hits_wall = spawn_projectile(&mut world, 498.0, 520.0, 0);

        let mut despawn = Vec::new();
        let mut events = Vec::new();
        run(&mut world, &ModeRules::Duel, 0, &mut despawn, &mut events);
        assert!(!world.contains(hits_wall));

        let expires = spawn_projectile(&mut world, 100.0, 520.0, 0);
        run(&mut world, &ModeRules::Duel, 5000, &mut despawn, &mut events);
        assert!(!world.contains(expires));
        assert!(events.is_empty());
    }
}
