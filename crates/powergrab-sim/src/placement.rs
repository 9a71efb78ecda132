//! Spawn placement — bounded rejection sampling for clear field positions.
//!
//! Greedy, not globally optimal: each call draws independently and gives up
//! after a fixed attempt budget. Callers treat `None` as "skip this spawn".

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use powergrab_core::constants::{ARENA_HEIGHT, ARENA_WIDTH, SPAWN_ATTEMPTS};
use powergrab_core::types::{Position, Rect};

/// Sample a position whose clearance box (side 2*radius) overlaps no
/// occupied rect. Draws uniformly from the arena inset by `radius`.
/// Returns None after `SPAWN_ATTEMPTS` failed draws.
pub fn place_clear(rng: &mut ChaCha8Rng, radius: f32, occupied: &[Rect]) -> Option<Position> {
    for _ in 0..SPAWN_ATTEMPTS {
        let x = rng.gen_range(radius..ARENA_WIDTH - radius);
        let y = rng.gen_range(radius..ARENA_HEIGHT - radius);
        let candidate = Position::new(x, y);
        let clearance = Rect::from_center(candidate, radius, radius);

        if !occupied.iter().any(|r| r.overlaps(&clearance)) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn placements_stay_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let pos = place_clear(&mut rng, 20.0, &[]).unwrap();
            assert!(pos.x >= 20.0 && pos.x <= ARENA_WIDTH - 20.0);
            assert!(pos.y >= 20.0 && pos.y <= ARENA_HEIGHT - 20.0);
        }
    }

    #[test]
    fn placements_avoid_occupied_rects() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let occupied = vec![
            Rect::new(0.0, 0.0, 640.0, 720.0),
            Rect::new(900.0, 100.0, 200.0, 200.0),
        ];
        for _ in 0..100 {
            if let Some(pos) = place_clear(&mut rng, 15.0, &occupied) {
                let clearance = Rect::from_center(pos, 15.0, 15.0);
                for r in &occupied {
                    assert!(
                        !r.overlaps(&clearance),
                        "placement {pos:?} overlaps occupied {r:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn full_arena_exhausts_attempts() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let everything = vec![Rect::new(-100.0, -100.0, ARENA_WIDTH + 200.0, ARENA_HEIGHT + 200.0)];
        assert!(place_clear(&mut rng, 10.0, &everything).is_none());
    }

    #[test]
    fn same_seed_places_identically() {
        let mut a = ChaCha8Rng::seed_from_u64(1234);
        let mut b = ChaCha8Rng::seed_from_u64(1234);
        let occupied = vec![Rect::new(500.0, 300.0, 300.0, 120.0)];
        for _ in 0..50 {
            assert_eq!(
                place_clear(&mut a, 12.0, &occupied),
                place_clear(&mut b, 12.0, &occupied)
            );
        }
    }
}
