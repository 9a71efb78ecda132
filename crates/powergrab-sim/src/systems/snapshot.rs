//! Snapshot assembly — flattens the ECS world into the serializable
//! `ArenaSnapshot` sent to the frontend after every tick.
//!
//! Views are sorted by stable ids (slot for players, pickup/projectile id,
//! shooter for tethers) so the same world always serializes identically.

use std::collections::HashMap;

use hecs::World;

use powergrab_core::components::{PickupItem, Player, Projectile, SurfaceZone, Wall};
use powergrab_core::constants::DT;
use powergrab_core::enums::{GameMode, Role, RoundPhase, WinReason};
use powergrab_core::events::ArenaEvent;
use powergrab_core::settings::Settings;
use powergrab_core::state::*;
use powergrab_core::types::{Position, SimTime, Velocity};

use crate::ledger::CurrencyLedger;
use crate::systems::effects;
use crate::tether::Tether;

#[allow(clippy::too_many_arguments)]
pub fn build(
    world: &World,
    time: SimTime,
    phase: RoundPhase,
    round: u32,
    settings: &Settings,
    tethers: &HashMap<u8, Tether>,
    timer_deadline: Option<u64>,
    events: Vec<ArenaEvent>,
    winner: Option<(u8, WinReason)>,
    ledger: &CurrencyLedger,
    wins: &[u32; 2],
) -> ArenaSnapshot {
    let tick = time.tick;

    let mut players: Vec<PlayerView> = Vec::new();
    for (_entity, (player, pos, vel)) in
        &mut world.query::<(&Player, &Position, &Velocity)>()
    {
        players.push(PlayerView {
            slot: player.slot,
            label: player.label.clone(),
            color: player.color.clone(),
            position: *pos,
            velocity: *vel,
            score: player.score,
            goal: goal_for(player.role, settings),
            health: player.health,
            max_health: player.max_health,
            role: player.role,
            dash_ready: dash_ready_frac(player, tick),
            hook_charges: player.hook_charges,
            max_hook_charges: player.max_hook_charges,
            effect: player.effect.map(|e| EffectView {
                kind: e.kind,
                remaining: remaining_frac(e.started_tick, e.expires_tick, tick),
            }),
            power: player.power,
            cloaked: effects::is_cloaked(player),
            objective: objective_text(settings.mode, player.role, settings),
            currency: ledger.currency(player.slot),
            wins: wins.get(player.slot as usize).copied().unwrap_or(0),
        });
    }
    players.sort_by_key(|p| p.slot);

    let mut pickups: Vec<PickupView> = Vec::new();
    for (_entity, (item, pos)) in &mut world.query::<(&PickupItem, &Position)>() {
        pickups.push(PickupView {
            id: item.id,
            kind: item.kind,
            position: *pos,
            radius: item.radius,
        });
    }
    pickups.sort_by_key(|p| p.id);

    let mut projectiles: Vec<ProjectileView> = Vec::new();
    for (_entity, (proj, pos, vel)) in
        &mut world.query::<(&Projectile, &Position, &Velocity)>()
    {
        projectiles.push(ProjectileView {
            id: proj.id,
            owner: proj.owner,
            position: *pos,
            velocity: *vel,
            radius: proj.radius,
        });
    }
    projectiles.sort_by_key(|p| p.id);

    let mut tether_views: Vec<TetherView> = tethers
        .values()
        .map(|t| TetherView {
            shooter: t.shooter,
            target: t.target,
            remaining: t.remaining_frac(tick),
        })
        .collect();
    tether_views.sort_by_key(|t| t.shooter);

    let mut zones: Vec<ZoneView> = Vec::new();
    for (_entity, zone) in &mut world.query::<&SurfaceZone>() {
        zones.push(ZoneView {
            label: zone.label.clone(),
            rect: zone.rect,
            speed_mult: zone.speed_mult,
            remaining_secs: zone
                .expires_tick
                .map(|e| e.saturating_sub(tick) as f32 * DT),
        });
    }
    zones.sort_by(|a, b| {
        a.rect
            .x
            .total_cmp(&b.rect.x)
            .then(a.rect.y.total_cmp(&b.rect.y))
    });

    let mut walls: Vec<_> = Vec::new();
    for (_entity, wall) in &mut world.query::<&Wall>() {
        walls.push(wall.rect);
    }
    walls.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    ArenaSnapshot {
        time,
        phase,
        mode: settings.mode,
        round,
        players,
        pickups,
        projectiles,
        tethers: tether_views,
        zones,
        walls,
        timer_remaining_secs: timer_deadline.map(|d| d.saturating_sub(tick) as f32 * DT),
        events,
        winner: winner.map(|(slot, reason)| WinnerView { slot, reason }),
    }
}

/// Score target shown next to the player's score readout.
fn goal_for(role: Role, settings: &Settings) -> i32 {
    match (settings.mode, role) {
        (GameMode::Pursuit, Role::Chaser) => settings.chaser_tag_goal as i32,
        (GameMode::Pursuit, _) | (GameMode::Duel, _) => 0,
        _ => settings.winning_score,
    }
}

/// Dash readiness fraction: 1.0 when ready, ramping up from 0 after use.
fn dash_ready_frac(player: &Player, tick: u64) -> f32 {
    if tick >= player.dash_ready_tick {
        return 1.0;
    }
    let remaining = (player.dash_ready_tick - tick) as f32;
    let cooldown = player.dash_cooldown_ticks.max(1) as f32;
    (1.0 - remaining / cooldown).clamp(0.0, 1.0)
}

fn remaining_frac(start: u64, end: u64, tick: u64) -> f32 {
    let total = end.saturating_sub(start);
    if total == 0 {
        return 0.0;
    }
    (end.saturating_sub(tick) as f32 / total as f32).clamp(0.0, 1.0)
}

/// One-line instruction shown on each player's HUD.
pub fn objective_text(mode: GameMode, role: Role, settings: &Settings) -> String {
    match mode {
        GameMode::Classic => format!("First to {} points", settings.winning_score),
        GameMode::Minefield => {
            format!("First to {} points. Mind the mines", settings.winning_score)
        }
        GameMode::Pursuit => match role {
            Role::Chaser => format!("Land {} tags", settings.chaser_tag_goal),
            _ => {
                if settings.mode_timer_secs.is_some() {
                    "Outlast the chaser".to_string()
                } else {
                    "Collect energy, stay clear of the chaser".to_string()
                }
            }
        },
        GameMode::Duel => "Break the enemy shield".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world_setup::test_player;
    use powergrab_core::components::InputState;

    #[test]
    fn player_views_sort_by_slot() {
        let mut world = World::new();
        for slot in [1u8, 0u8] {
            world.spawn((
                test_player(slot),
                InputState::default(),
                Position::new(100.0 + slot as f32, 100.0),
                Velocity::default(),
            ));
        }

        let snapshot = build(
            &world,
            SimTime::default(),
            RoundPhase::Active,
            1,
            &Settings::default(),
            &HashMap::new(),
            None,
            Vec::new(),
            None,
            &CurrencyLedger::new(),
            &[0, 0],
        );

        let slots: Vec<u8> = snapshot.players.iter().map(|p| p.slot).collect();
        assert_eq!(slots, vec![0, 1]);
        assert_eq!(snapshot.players[0].objective, "First to 10 points");
        assert_eq!(snapshot.players[0].goal, 10);
    }

    #[test]
    fn dash_readiness_ramps_back_to_one() {
        let mut player = test_player(0);
        player.dash_cooldown_ticks = 100;
        player.dash_ready_tick = 200;

        assert_eq!(dash_ready_frac(&player, 100), 0.0);
        assert!((dash_ready_frac(&player, 150) - 0.5).abs() < f32::EPSILON);
        assert_eq!(dash_ready_frac(&player, 200), 1.0);
        assert_eq!(dash_ready_frac(&player, 500), 1.0);
    }

    #[test]
    fn winner_and_timer_pass_through() {
        let world = World::new();
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance();
        }

        let snapshot = build(
            &world,
            time,
            RoundPhase::RoundOver,
            3,
            &Settings::default(),
            &HashMap::new(),
            Some(120),
            Vec::new(),
            Some((1, WinReason::Score)),
            &CurrencyLedger::new(),
            &[2, 1],
        );

        let winner = snapshot.winner.unwrap();
        assert_eq!(winner.slot, 1);
        assert_eq!(winner.reason, WinReason::Score);
        let timer = snapshot.timer_remaining_secs.unwrap();
        assert!((timer - 1.0).abs() < 0.001, "timer = {timer}");
        assert_eq!(snapshot.round, 3);
    }

    #[test]
    fn objective_tracks_mode_and_role() {
        let mut settings = Settings::default();
        assert_eq!(
            objective_text(GameMode::Pursuit, Role::Chaser, &settings),
            "Land 3 tags"
        );
        settings.mode_timer_secs = Some(60.0);
        assert_eq!(
            objective_text(GameMode::Pursuit, Role::Collector, &settings),
            "Outlast the chaser"
        );
        assert_eq!(
            objective_text(GameMode::Duel, Role::None, &settings),
            "Break the enemy shield"
        );
    }
}
