//! Surface zone tracking.
//!
//! Each player keeps a stack of the zones they are standing in, ordered by
//! entry. The most recently entered zone that still overlaps wins; leaving
//! every zone restores the neutral multiplier.

use hecs::World;

use powergrab_core::components::{Player, SurfaceZone};
use powergrab_core::types::{Position, Rect};

pub fn run(world: &mut World) {
    let zones: Vec<(u64, Rect, f32)> = world
        .query_mut::<&SurfaceZone>()
        .into_iter()
        .map(|(entity, zone)| (entity.to_bits().get(), zone.rect, zone.speed_mult))
        .collect();

    for (_entity, (player, pos)) in world.query_mut::<(&mut Player, &Position)>() {
        player
            .zone_stack
            .retain(|bits| zones.iter().any(|(zb, rect, _)| zb == bits && rect.contains(pos)));

        for (bits, rect, _) in &zones {
            if rect.contains(pos) && !player.zone_stack.contains(bits) {
                player.zone_stack.push(*bits);
            }
        }

        player.surface_mult = player
            .zone_stack
            .last()
            .and_then(|bits| zones.iter().find(|(zb, _, _)| zb == bits))
            .map_or(1.0, |(_, _, mult)| *mult);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::test_player;
    use powergrab_core::components::InputState;
    use powergrab_core::types::Velocity;

    fn zone(rect: Rect, mult: f32) -> SurfaceZone {
        SurfaceZone {
            rect,
            speed_mult: mult,
            label: "test".into(),
            expires_tick: None,
        }
    }

    #[test]
    fn newest_overlapping_zone_governs() {
        let mut world = World::new();
        world.spawn((zone(Rect::new(0.0, 0.0, 200.0, 200.0), 0.5),));
        let fast = world.spawn((zone(Rect::new(100.0, 0.0, 200.0, 200.0), 1.5),));

        let entity = world.spawn((
            test_player(0),
            InputState::default(),
            Position::new(50.0, 50.0),
            Velocity::default(),
        ));

        run(&mut world);
        assert_eq!(world.get::<&Player>(entity).unwrap().surface_mult, 0.5);

        // Step into the overlap region; the later entry governs.
        world.get::<&mut Position>(entity).unwrap().x = 150.0;
        run(&mut world);
        assert_eq!(world.get::<&Player>(entity).unwrap().surface_mult, 1.5);

        // The newer zone disappears; fall back to the older one.
        world.despawn(fast).unwrap();
        run(&mut world);
        assert_eq!(world.get::<&Player>(entity).unwrap().surface_mult, 0.5);
    }

    #[test]
    fn leaving_all_zones_restores_neutral_speed() {
        let mut world = World::new();
        world.spawn((zone(Rect::new(0.0, 0.0, 100.0, 100.0), 0.45),));
        let entity = world.spawn((
            test_player(0),
            InputState::default(),
            Position::new(50.0, 50.0),
            Velocity::default(),
        ));

        run(&mut world);
        assert_eq!(world.get::<&Player>(entity).unwrap().surface_mult, 0.45);

        world.get::<&mut Position>(entity).unwrap().x = 500.0;
        run(&mut world);
        let player = world.get::<&Player>(entity).unwrap();
        assert_eq!(player.surface_mult, 1.0);
        assert!(player.zone_stack.is_empty());
    }
}
