//! Movement integration for players and drifting hazards.
//!
//! Players steer toward a desired velocity with an exponential response,
//! so dash impulses and hook pulls decay back to steered movement instead
//! of snapping. Hazards drift in straight lines and bounce off walls and
//! the arena edge regardless of the boundary setting.

use glam::Vec2;
use hecs::World;

use powergrab_core::components::{InputState, PickupItem, Player, Wall};
use powergrab_core::constants::*;
use powergrab_core::enums::{BoundaryBehavior, MoveDir, Role};
use powergrab_core::settings::Settings;
use powergrab_core::types::{Position, Rect, Velocity};

/// Unit vector for a facing direction.
pub fn dir_vec(dir: MoveDir) -> Vec2 {
    match dir {
        MoveDir::Up => Vec2::new(0.0, -1.0),
        MoveDir::Down => Vec2::new(0.0, 1.0),
        MoveDir::Left => Vec2::new(-1.0, 0.0),
        MoveDir::Right => Vec2::new(1.0, 0.0),
    }
}

/// Normalized direction of the currently held movement keys, if any.
pub fn held_dir(input: &InputState) -> Option<Vec2> {
    let mut v = Vec2::ZERO;
    if input.up {
        v.y -= 1.0;
    }
    if input.down {
        v.y += 1.0;
    }
    if input.left {
        v.x -= 1.0;
    }
    if input.right {
        v.x += 1.0;
    }
    (v != Vec2::ZERO).then(|| v.normalize())
}

/// Combined speed multiplier: active effect, surface, and role.
pub fn speed_multiplier(player: &Player) -> f32 {
    let effect = player.effect.map_or(1.0, |e| e.magnitude);
    let role = if player.role == Role::Chaser {
        CHASER_SPEED_MULT
    } else {
        1.0
    };
    effect * player.surface_mult * role
}

pub fn run(world: &mut World, settings: &Settings) {
    let walls: Vec<Rect> = world
        .query_mut::<&Wall>()
        .into_iter()
        .map(|(_entity, wall)| wall.rect)
        .collect();

    for (_entity, (player, input, pos, vel)) in
        world.query_mut::<(&Player, &InputState, &mut Position, &mut Velocity)>()
    {
        let steer = held_dir(input).unwrap_or(Vec2::ZERO);
        let desired = steer * PLAYER_BASE_SPEED * speed_multiplier(player);
        let blend = 1.0 - (-MOVE_RESPONSE * DT).exp();
        let mut v = vel.vec() + (desired - vel.vec()) * blend;
        let mut p = pos.vec() + v * DT;

        for wall in &walls {
            push_circle_out(wall, &mut p, &mut v, PLAYER_RADIUS);
        }
        apply_boundary(settings.boundary, &mut p, &mut v);

        pos.set(p);
        vel.set(v);
    }
}

/// Advance drifting hazards. Only hazards carry a velocity component.
pub fn run_hazards(world: &mut World) {
    let walls: Vec<Rect> = world
        .query_mut::<&Wall>()
        .into_iter()
        .map(|(_entity, wall)| wall.rect)
        .collect();

    for (_entity, (item, pos, vel)) in
        world.query_mut::<(&PickupItem, &mut Position, &mut Velocity)>()
    {
        let mut v = vel.vec();
        let mut p = pos.vec() + v * DT;

        if p.x < item.radius {
            p.x = item.radius;
            v.x = v.x.abs();
        }
        if p.x > ARENA_WIDTH - item.radius {
            p.x = ARENA_WIDTH - item.radius;
            v.x = -v.x.abs();
        }
        if p.y < item.radius {
            p.y = item.radius;
            v.y = v.y.abs();
        }
        if p.y > ARENA_HEIGHT - item.radius {
            p.y = ARENA_HEIGHT - item.radius;
            v.y = -v.y.abs();
        }

        for wall in &walls {
            bounce_circle_off(wall, &mut p, &mut v, item.radius);
        }

        pos.set(p);
        vel.set(v);
    }
}

fn apply_boundary(behavior: BoundaryBehavior, p: &mut Vec2, v: &mut Vec2) {
    match behavior {
        BoundaryBehavior::Collide => {
            if p.x < PLAYER_RADIUS {
                p.x = PLAYER_RADIUS;
                v.x = v.x.max(0.0);
            }
            if p.x > ARENA_WIDTH - PLAYER_RADIUS {
                p.x = ARENA_WIDTH - PLAYER_RADIUS;
                v.x = v.x.min(0.0);
            }
            if p.y < PLAYER_RADIUS {
                p.y = PLAYER_RADIUS;
                v.y = v.y.max(0.0);
            }
            if p.y > ARENA_HEIGHT - PLAYER_RADIUS {
                p.y = ARENA_HEIGHT - PLAYER_RADIUS;
                v.y = v.y.min(0.0);
            }
        }
        BoundaryBehavior::Wrap => {
            p.x = p.x.rem_euclid(ARENA_WIDTH);
            p.y = p.y.rem_euclid(ARENA_HEIGHT);
        }
    }
}

/// Push a circle out of a rect and cancel the velocity component pointing in.
fn push_circle_out(wall: &Rect, p: &mut Vec2, v: &mut Vec2, radius: f32) {
    let center = Position::new(p.x, p.y);
    if wall.contains(&center) {
        eject_from_interior(wall, p, v, radius);
        return;
    }
    let closest = wall.closest_point(&center).vec();
    let delta = *p - closest;
    let dist = delta.length();
    if dist >= radius || dist == 0.0 {
        return;
    }
    let normal = delta / dist;
    *p += normal * (radius - dist);
    let into = v.dot(normal);
    if into < 0.0 {
        *v -= normal * into;
    }
}

/// Push a circle out of a rect and reflect its velocity.
fn bounce_circle_off(wall: &Rect, p: &mut Vec2, v: &mut Vec2, radius: f32) {
    let center = Position::new(p.x, p.y);
    if wall.contains(&center) {
        eject_from_interior(wall, p, v, radius);
        return;
    }
    let closest = wall.closest_point(&center).vec();
    let delta = *p - closest;
    let dist = delta.length();
    if dist >= radius || dist == 0.0 {
        return;
    }
    let normal = delta / dist;
    *p += normal * (radius - dist);
    let into = v.dot(normal);
    if into < 0.0 {
        *v -= normal * (2.0 * into);
    }
}

/// Center ended up inside the rect: eject along the shortest axis.
fn eject_from_interior(wall: &Rect, p: &mut Vec2, v: &mut Vec2, radius: f32) {
    let left = p.x - wall.x;
    let right = wall.x + wall.w - p.x;
    let top = p.y - wall.y;
    let bottom = wall.y + wall.h - p.y;
    let min = left.min(right).min(top).min(bottom);

    if min == left {
        p.x = wall.x - radius;
        v.x = v.x.min(0.0);
    } else if min == right {
        p.x = wall.x + wall.w + radius;
        v.x = v.x.max(0.0);
    } else if min == top {
        p.y = wall.y - radius;
        v.y = v.y.min(0.0);
    } else {
        p.y = wall.y + wall.h + radius;
        v.y = v.y.max(0.0);
    }
}
