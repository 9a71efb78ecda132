//! Pickup and contact resolution.
//!
//! Runs after movement so overlaps are judged against settled positions.
//! Pickups resolve in ascending id order and players in slot order, so
//! simultaneous touches resolve the same way on every run. A consumable
//! goes to the first eligible toucher; hazards are not consumed and hit
//! every eligible toucher.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use powergrab_core::components::{PickupItem, Player};
use powergrab_core::constants::*;
use powergrab_core::enums::{EffectKind, PickupKind, PowerKind, Role, WinReason};
use powergrab_core::events::ArenaEvent;
use powergrab_core::settings::Settings;
use powergrab_core::types::{secs_to_ticks, Position};

use crate::deferred::{DeferredAction, DeferredQueue};
use crate::modes::{ModeRules, RoundOutcome};
use crate::systems::effects;
use crate::{placement, world_setup};

/// Per-player contact state cached for one resolution pass.
#[derive(Clone, Copy)]
struct Toucher {
    slot: u8,
    entity: Entity,
    pos: Position,
    cloaked: bool,
    grace_until: u64,
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    rules: &ModeRules,
    settings: &Settings,
    tick: u64,
    outcome: &mut RoundOutcome,
    events: &mut Vec<ArenaEvent>,
    deferred: &mut DeferredQueue,
    despawn_buffer: &mut Vec<Entity>,
    next_pickup_id: &mut u32,
) {
    let mut players: Vec<Toucher> = world
        .query_mut::<(&Player, &Position)>()
        .into_iter()
        .map(|(entity, (player, pos))| Toucher {
            slot: player.slot,
            entity,
            pos: *pos,
            cloaked: effects::is_cloaked(player),
            grace_until: player.hazard_grace_until,
        })
        .collect();
    players.sort_by_key(|t| t.slot);

    let mut pickups: Vec<(Entity, PickupItem, Position)> = world
        .query_mut::<(&PickupItem, &Position)>()
        .into_iter()
        .map(|(entity, (item, pos))| (entity, *item, *pos))
        .collect();
    pickups.sort_by_key(|&(_, item, _)| item.id);

    let mut respawn_now: Vec<PickupKind> = Vec::new();

    for (pickup_entity, item, pickup_pos) in pickups {
        let mut consumed = false;
        for idx in 0..players.len() {
            if consumed {
                break;
            }
            let toucher = players[idx];
            let reach = item.radius + PLAYER_RADIUS;
            if toucher.pos.vec().distance(pickup_pos.vec()) > reach {
                continue;
            }

            if item.kind == PickupKind::Hazard {
                let opponent = players
                    .iter()
                    .find(|p| p.slot != toucher.slot)
                    .map(|p| p.slot);
                if resolve_hazard(world, &toucher, opponent, rules, settings, tick, outcome, events)
                {
                    players[idx].grace_until = tick + secs_to_ticks(HAZARD_GRACE_SECS);
                }
            } else {
                consumed = resolve_consumable(
                    world,
                    rng,
                    &toucher,
                    &players,
                    &item,
                    rules,
                    tick,
                    outcome,
                    events,
                    deferred,
                    &mut respawn_now,
                );
            }
        }
        if consumed {
            despawn_buffer.push(pickup_entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    for kind in respawn_now {
        world_setup::spawn_placed_pickup(world, rng, kind, None, next_pickup_id);
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_hazard(
    world: &mut World,
    toucher: &Toucher,
    opponent: Option<u8>,
    rules: &ModeRules,
    settings: &Settings,
    tick: u64,
    outcome: &mut RoundOutcome,
    events: &mut Vec<ArenaEvent>,
) -> bool {
    if toucher.cloaked || tick < toucher.grace_until {
        return false;
    }
    let Ok(mut player) = world.get::<&mut Player>(toucher.entity) else {
        return false;
    };
    if !rules.on_hazard(&mut player, opponent, settings, outcome) {
        return false;
    }
    player.hazard_grace_until = tick + secs_to_ticks(HAZARD_GRACE_SECS);
    drop(player);
    events.push(ArenaEvent::HazardHit { slot: toucher.slot });
    true
}

#[allow(clippy::too_many_arguments)]
fn resolve_consumable(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    toucher: &Toucher,
    players: &[Toucher],
    item: &PickupItem,
    rules: &ModeRules,
    tick: u64,
    outcome: &mut RoundOutcome,
    events: &mut Vec<ArenaEvent>,
    deferred: &mut DeferredQueue,
    respawn_now: &mut Vec<PickupKind>,
) -> bool {
    let slot = toucher.slot;
    match item.kind {
        PickupKind::Energy | PickupKind::RareEnergy => {
            let value = if item.kind == PickupKind::Energy {
                ENERGY_VALUE
            } else {
                RARE_ENERGY_VALUE
            };
            let Ok(mut player) = world.get::<&mut Player>(toucher.entity) else {
                return false;
            };
            if !rules.on_score_pickup(&mut player, value) {
                return false;
            }
            drop(player);
            events.push(ArenaEvent::PickupTaken { slot, kind: item.kind });
            match item.kind {
                PickupKind::Energy => respawn_now.push(PickupKind::Energy),
                _ => deferred.schedule(
                    tick + secs_to_ticks(RARE_RESPAWN_DELAY_SECS),
                    DeferredAction::RespawnPickup(PickupKind::RareEnergy),
                ),
            }
            true
        }
        PickupKind::Behavior => {
            let effect = match rng.gen_range(0..3u8) {
                0 => EffectKind::Boost,
                1 => EffectKind::Slow,
                _ => EffectKind::Cloak,
            };
            let Ok(mut player) = world.get::<&mut Player>(toucher.entity) else {
                return false;
            };
            effects::apply(&mut player, effect, tick);
            drop(player);
            events.push(ArenaEvent::PickupTaken { slot, kind: item.kind });
            events.push(ArenaEvent::EffectApplied { slot, kind: effect });
            schedule_special_respawn(deferred, tick);
            true
        }
        PickupKind::Rope => {
            let Ok(mut player) = world.get::<&mut Player>(toucher.entity) else {
                return false;
            };
            player.hook_charges = (player.hook_charges + 1).min(player.max_hook_charges);
            drop(player);
            events.push(ArenaEvent::PickupTaken { slot, kind: item.kind });
            schedule_special_respawn(deferred, tick);
            true
        }
        PickupKind::Power => {
            let Ok(mut player) = world.get::<&mut Player>(toucher.entity) else {
                return false;
            };
            if player.power.is_some() {
                // Already holding one; leave the pickup for the opponent.
                return false;
            }
            player.power = Some(item.power.unwrap_or(PowerKind::GlueField));
            drop(player);
            events.push(ArenaEvent::PickupTaken { slot, kind: item.kind });
            schedule_special_respawn(deferred, tick);
            true
        }
        PickupKind::Teleport => {
            events.push(ArenaEvent::PickupTaken { slot, kind: item.kind });
            let occupied = world_setup::occupied_rects(world);
            match placement::place_clear(rng, PLAYER_RADIUS * 2.0, &occupied) {
                Some(dest) => {
                    if let Ok(mut pos) = world.get::<&mut Position>(toucher.entity) {
                        *pos = dest;
                    }
                }
                None => debug!(slot, "teleport found no clear destination"),
            }
            schedule_special_respawn(deferred, tick);
            true
        }
        PickupKind::Skull => {
            if toucher.cloaked {
                return false;
            }
            events.push(ArenaEvent::PickupTaken { slot, kind: item.kind });
            if let Some(opponent) = players.iter().find(|p| p.slot != slot).map(|p| p.slot) {
                outcome.declare(opponent, WinReason::Knockout);
            }
            true
        }
        PickupKind::Hazard => false,
    }
}

fn schedule_special_respawn(deferred: &mut DeferredQueue, tick: u64) {
    deferred.schedule(
        tick + secs_to_ticks(SPECIAL_RESPAWN_DELAY_SECS),
        DeferredAction::RespawnSpecial,
    );
}

/// Chaser-on-collector tag resolution (pursuit mode).
pub fn run_tags(world: &mut World, rules: &ModeRules, tick: u64, events: &mut Vec<ArenaEvent>) {
    if !rules.assigns_roles() {
        return;
    }

    let mut chaser: Option<(Entity, u8, Position, u64)> = None;
    let mut collector: Option<(u8, Position, bool)> = None;
    for (entity, (player, pos)) in world.query_mut::<(&Player, &Position)>() {
        match player.role {
            Role::Chaser => chaser = Some((entity, player.slot, *pos, player.tag_ready_tick)),
            Role::Collector => {
                collector = Some((player.slot, *pos, effects::is_cloaked(player)))
            }
            Role::None => {}
        }
    }
    let (Some((chaser_entity, chaser_slot, chaser_pos, tag_ready)), Some(collector)) =
        (chaser, collector)
    else {
        return;
    };
    let (collector_slot, collector_pos, collector_cloaked) = collector;

    if collector_cloaked || tick < tag_ready {
        return;
    }
    if chaser_pos.vec().distance(collector_pos.vec()) > PLAYER_RADIUS * 2.0 {
        return;
    }

    let Ok(mut player) = world.get::<&mut Player>(chaser_entity) else {
        return;
    };
    if rules.on_tag(&mut player) {
        player.tag_ready_tick = tick + secs_to_ticks(TAG_COOLDOWN_SECS);
        drop(player);
        events.push(ArenaEvent::Tagged {
            chaser: chaser_slot,
            collector: collector_slot,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::test_player;
    use powergrab_core::components::InputState;
    use powergrab_core::enums::GameMode;
    use powergrab_core::types::Velocity;
    use rand::SeedableRng;

    struct Fixture {
        world: World,
        rng: ChaCha8Rng,
        rules: ModeRules,
        settings: Settings,
        outcome: RoundOutcome,
        events: Vec<ArenaEvent>,
        deferred: DeferredQueue,
        despawn: Vec<Entity>,
        next_id: u32,
    }

    impl Fixture {
        fn new(mode: GameMode) -> Self {
            Self {
                world: World::new(),
                rng: ChaCha8Rng::seed_from_u64(7),
                rules: ModeRules::for_mode(mode),
                settings: Settings::default(),
                outcome: RoundOutcome::default(),
                events: Vec::new(),
                deferred: DeferredQueue::new(),
                despawn: Vec::new(),
                next_id: 100,
            }
        }

        fn spawn_player(&mut self, slot: u8, x: f32, y: f32) -> Entity {
            self.world.spawn((
                test_player(slot),
                InputState::default(),
                Position::new(x, y),
                Velocity::default(),
            ))
        }

        fn spawn_pickup(&mut self, kind: PickupKind, x: f32, y: f32) -> Entity {
            let id = self.next_id;
            self.next_id += 1;
            world_setup::spawn_pickup(&mut self.world, id, kind, None, Position::new(x, y))
        }

        fn resolve(&mut self, tick: u64) {
            run(
                &mut self.world,
                &mut self.rng,
                &self.rules,
                &self.settings,
                tick,
                &mut self.outcome,
                &mut self.events,
                &mut self.deferred,
                &mut self.despawn,
                &mut self.next_id,
            );
        }
    }

    #[test]
    fn energy_scores_and_respawns_immediately() {
        let mut fx = Fixture::new(GameMode::Classic);
        let player = fx.spawn_player(0, 400.0, 360.0);
        fx.spawn_pickup(PickupKind::Energy, 410.0, 360.0);

        fx.resolve(0);

        assert_eq!(fx.world.get::<&Player>(player).unwrap().score, ENERGY_VALUE);
        let energy_on_field = fx
            .world
            .query_mut::<&PickupItem>()
            .into_iter()
            .filter(|(_, item)| item.kind == PickupKind::Energy)
            .count();
        assert_eq!(energy_on_field, 1, "consumed orb must respawn at once");
        assert!(matches!(
            fx.events[0],
            ArenaEvent::PickupTaken { slot: 0, kind: PickupKind::Energy }
        ));
    }

    #[test]
    fn rare_energy_respawn_is_deferred() {
        let mut fx = Fixture::new(GameMode::Classic);
        fx.spawn_player(0, 400.0, 360.0);
        fx.spawn_pickup(PickupKind::RareEnergy, 410.0, 360.0);

        fx.resolve(0);

        let on_field = fx.world.query_mut::<&PickupItem>().into_iter().count();
        assert_eq!(on_field, 0);
        assert_eq!(fx.deferred.len(), 1);
    }

    #[test]
    fn hazard_grace_blocks_the_second_contact() {
        let mut fx = Fixture::new(GameMode::Classic);
        let player = fx.spawn_player(0, 400.0, 360.0);
        // Two overlapping hazards; only the first registers this tick.
        fx.spawn_pickup(PickupKind::Hazard, 405.0, 360.0);
        fx.spawn_pickup(PickupKind::Hazard, 395.0, 360.0);

        fx.resolve(0);

        assert_eq!(
            fx.world.get::<&Player>(player).unwrap().score,
            -HAZARD_PENALTY
        );
        assert_eq!(fx.events.len(), 1);

        // Still inside the grace window: nothing new registers.
        fx.resolve(10);
        assert_eq!(
            fx.world.get::<&Player>(player).unwrap().score,
            -HAZARD_PENALTY
        );

        // After grace elapses the hazards bite again.
        fx.resolve(secs_to_ticks(HAZARD_GRACE_SECS) + 1);
        assert_eq!(
            fx.world.get::<&Player>(player).unwrap().score,
            -2 * HAZARD_PENALTY
        );
    }

    #[test]
    fn cloak_suppresses_hazard_and_skull() {
        let mut fx = Fixture::new(GameMode::Classic);
        let player = fx.spawn_player(0, 400.0, 360.0);
        fx.spawn_player(1, 900.0, 360.0);
        {
            let mut p = fx.world.get::<&mut Player>(player).unwrap();
            effects::apply(&mut p, EffectKind::Cloak, 0);
        }
        fx.spawn_pickup(PickupKind::Hazard, 405.0, 360.0);
        let skull = fx.spawn_pickup(PickupKind::Skull, 395.0, 360.0);

        fx.resolve(1);

        assert_eq!(fx.world.get::<&Player>(player).unwrap().score, 0);
        assert!(fx.world.contains(skull), "cloaked touch must not consume the skull");
        assert!(fx.outcome.winner().is_none());
    }

    #[test]
    fn skull_hands_the_round_to_the_opponent() {
        let mut fx = Fixture::new(GameMode::Classic);
        fx.spawn_player(0, 400.0, 360.0);
        fx.spawn_player(1, 900.0, 360.0);
        fx.spawn_pickup(PickupKind::Skull, 410.0, 360.0);

        fx.resolve(0);

        assert_eq!(fx.outcome.winner(), Some((1, WinReason::Knockout)));
    }

    #[test]
    fn power_pickup_refused_while_holding_one() {
        let mut fx = Fixture::new(GameMode::Classic);
        let player = fx.spawn_player(0, 400.0, 360.0);
        fx.world.get::<&mut Player>(player).unwrap().power = Some(PowerKind::Blink);
        let pickup = fx.spawn_pickup(PickupKind::Power, 410.0, 360.0);

        fx.resolve(0);

        assert!(fx.world.contains(pickup));
        assert_eq!(
            fx.world.get::<&Player>(player).unwrap().power,
            Some(PowerKind::Blink)
        );
    }

    #[test]
    fn rope_restores_a_charge_up_to_the_cap() {
        let mut fx = Fixture::new(GameMode::Classic);
        let player = fx.spawn_player(0, 400.0, 360.0);
        fx.world.get::<&mut Player>(player).unwrap().hook_charges = 0;
        fx.spawn_pickup(PickupKind::Rope, 410.0, 360.0);

        fx.resolve(0);
        assert_eq!(fx.world.get::<&Player>(player).unwrap().hook_charges, 1);

        // At the cap a rope is still consumed but cannot overfill.
        fx.world.get::<&mut Player>(player).unwrap().hook_charges = HOOK_MAX_CHARGES;
        fx.spawn_pickup(PickupKind::Rope, 410.0, 360.0);
        fx.resolve(1);
        assert_eq!(
            fx.world.get::<&Player>(player).unwrap().hook_charges,
            HOOK_MAX_CHARGES
        );
    }

    #[test]
    fn teleport_moves_the_toucher_somewhere_clear() {
        let mut fx = Fixture::new(GameMode::Classic);
        let player = fx.spawn_player(0, 400.0, 360.0);
        fx.spawn_pickup(PickupKind::Teleport, 410.0, 360.0);

        fx.resolve(0);

        let pos = *fx.world.get::<&Position>(player).unwrap();
        assert!(
            pos.vec().distance(Position::new(400.0, 360.0).vec()) > 1.0,
            "teleport should relocate the player"
        );
        let teleports_left = fx
            .world
            .query_mut::<&PickupItem>()
            .into_iter()
            .filter(|(_, item)| item.kind == PickupKind::Teleport)
            .count();
        assert_eq!(teleports_left, 0);
    }

    #[test]
    fn tag_scores_once_per_cooldown() {
        let mut fx = Fixture::new(GameMode::Pursuit);
        let chaser = fx.spawn_player(0, 400.0, 360.0);
        let collector = fx.spawn_player(1, 410.0, 360.0);
        fx.world.get::<&mut Player>(chaser).unwrap().role = Role::Chaser;
        fx.world.get::<&mut Player>(collector).unwrap().role = Role::Collector;

        let mut events = Vec::new();
        run_tags(&mut fx.world, &fx.rules, 0, &mut events);
        assert_eq!(fx.world.get::<&Player>(chaser).unwrap().score, 1);
        assert_eq!(events.len(), 1);

        // Cooldown holds even while still overlapping.
        run_tags(&mut fx.world, &fx.rules, 1, &mut events);
        assert_eq!(fx.world.get::<&Player>(chaser).unwrap().score, 1);

        run_tags(
            &mut fx.world,
            &fx.rules,
            secs_to_ticks(TAG_COOLDOWN_SECS) + 1,
            &mut events,
        );
        assert_eq!(fx.world.get::<&Player>(chaser).unwrap().score, 2);
    }

    #[test]
    fn cloaked_collector_cannot_be_tagged() {
        let mut fx = Fixture::new(GameMode::Pursuit);
        let chaser = fx.spawn_player(0, 400.0, 360.0);
        let collector = fx.spawn_player(1, 410.0, 360.0);
        fx.world.get::<&mut Player>(chaser).unwrap().role = Role::Chaser;
        {
            let mut p = fx.world.get::<&mut Player>(collector).unwrap();
            p.role = Role::Collector;
            effects::apply(&mut p, EffectKind::Cloak, 0);
        }

        let mut events = Vec::new();
        run_tags(&mut fx.world, &fx.rules, 1, &mut events);
        assert_eq!(fx.world.get::<&Player>(chaser).unwrap().score, 0);
        assert!(events.is_empty());
    }
}
