//! Simulation engine — the core of the game.
//!
//! `ArenaEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `ArenaSnapshot`s. Completely headless,
//! enabling deterministic testing: the same seed and command sequence
//! replays the same match.

use std::collections::{HashMap, VecDeque};

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use powergrab_core::commands::PlayerCommand;
use powergrab_core::components::{InputState, Player, Projectile, SurfaceZone};
use powergrab_core::constants::*;
use powergrab_core::enums::{GameMode, MoveDir, PowerKind, Role, RoundPhase};
use powergrab_core::events::ArenaEvent;
use powergrab_core::level::LevelSchema;
use powergrab_core::settings::{PlayerBinding, Settings};
use powergrab_core::state::ArenaSnapshot;
use powergrab_core::types::{millis_to_ticks, secs_to_ticks, Position, Rect, SimTime, Velocity};

use crate::deferred::{DeferredAction, DeferredQueue};
use crate::ledger::{self, CurrencyLedger};
use crate::levels;
use crate::modes::{ModeRules, RoundOutcome, Standing};
use crate::systems;
use crate::systems::movement;
use crate::tether::Tether;
use crate::upgrades;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same match.
    pub seed: u64,
    /// Initial pending settings (replaceable via Configure).
    pub settings: Settings,
    /// Display identities for the two local slots.
    pub players: [PlayerBinding; 2],
    /// File-loaded arena; overrides the builtin named by `settings.level`.
    pub level_override: Option<LevelSchema>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            settings: Settings::default(),
            players: PlayerBinding::defaults(),
            level_override: None,
        }
    }
}

/// Cross-round match bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchState {
    /// Rounds started so far (1 during the first round).
    pub round: u32,
    /// Rounds won per slot.
    pub wins: [u32; 2],
    /// Slot that chased last, for alternating pursuit roles.
    pub last_chaser: Option<u8>,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct ArenaEngine {
    world: World,
    time: SimTime,
    phase: RoundPhase,
    /// Pending settings; Configure replaces these, round start copies them.
    config: Settings,
    /// Settings frozen for the running round.
    settings: Settings,
    rules: ModeRules,
    bindings: [PlayerBinding; 2],
    level_override: Option<LevelSchema>,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<ArenaEvent>,
    /// Active tethers keyed by shooter slot.
    tethers: HashMap<u8, Tether>,
    deferred: DeferredQueue,
    outcome: RoundOutcome,
    ledger: CurrencyLedger,
    match_state: MatchState,
    /// Absolute tick at which the pursuit timer expires.
    timer_deadline: Option<u64>,
    next_pickup_id: u32,
    next_projectile_id: u32,
}

impl ArenaEngine {
    /// Create a new engine with a fresh ledger.
    pub fn new(config: SimConfig) -> Self {
        Self::with_ledger(config, CurrencyLedger::new())
    }

    /// Create a new engine around an existing ledger, preserving balances
    /// and queued upgrades across engine restarts.
    pub fn with_ledger(config: SimConfig, ledger: CurrencyLedger) -> Self {
        let rules = ModeRules::for_mode(config.settings.mode);
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: RoundPhase::default(),
            settings: config.settings.clone(),
            config: config.settings,
            rules,
            bindings: config.players,
            level_override: config.level_override,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            tethers: HashMap::new(),
            deferred: DeferredQueue::new(),
            outcome: RoundOutcome::default(),
            ledger,
            match_state: MatchState::default(),
            timer_deadline: None,
            next_pickup_id: 0,
            next_projectile_id: 0,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> ArenaSnapshot {
        self.process_commands();
        self.process_deferred();

        if self.phase == RoundPhase::Active {
            self.run_systems();
            self.finalize_round();
        }
        if self.phase != RoundPhase::Paused {
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            self.time,
            self.phase,
            self.match_state.round,
            &self.settings,
            &self.tethers,
            self.timer_deadline,
            events,
            self.outcome.winner(),
            &self.ledger,
            &self.match_state.wins,
        )
    }

    /// Get the current round phase.
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the cross-round match state.
    pub fn match_state(&self) -> MatchState {
        self.match_state
    }

    /// Get a read-only reference to the currency ledger.
    pub fn ledger(&self) -> &CurrencyLedger {
        &self.ledger
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a pickup at a known position (for testing).
    #[cfg(test)]
    pub fn spawn_test_pickup(
        &mut self,
        kind: powergrab_core::enums::PickupKind,
        power: Option<PowerKind>,
        x: f32,
        y: f32,
    ) -> hecs::Entity {
        let id = self.next_pickup_id;
        self.next_pickup_id += 1;
        if kind == powergrab_core::enums::PickupKind::Hazard {
            // Stationary hazard so tests can pin contact geometry.
            world_setup::spawn_hazard(&mut self.world, &mut self.rng, id, Position::new(x, y), 0.0)
        } else {
            world_setup::spawn_pickup(&mut self.world, id, kind, power, Position::new(x, y))
        }
    }

    /// Pin a player's position and stop their drift (for testing).
    #[cfg(test)]
    pub fn set_player_position(&mut self, slot: u8, x: f32, y: f32) {
        for (_entity, (player, pos, vel)) in
            self.world
                .query_mut::<(&Player, &mut Position, &mut Velocity)>()
        {
            if player.slot == slot {
                *pos = Position::new(x, y);
                *vel = Velocity::default();
            }
        }
    }

    /// Stamp an effect straight onto a player (for testing).
    #[cfg(test)]
    pub fn apply_test_effect(&mut self, slot: u8, kind: powergrab_core::enums::EffectKind) {
        let tick = self.time.tick;
        for (_entity, player) in self.world.query_mut::<&mut Player>() {
            if player.slot == slot {
                systems::effects::apply(player, kind, tick);
            }
        }
    }

    /// Get a read-only reference to the tether map.
    #[cfg(test)]
    pub fn tethers(&self) -> &HashMap<u8, Tether> {
        &self.tethers
    }

    /// Get a mutable reference to the ledger (for pre-funding accounts).
    #[cfg(test)]
    pub fn ledger_mut(&mut self) -> &mut CurrencyLedger {
        &mut self.ledger
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Move { slot, dir, pressed } => {
                for (_entity, (player, input)) in
                    self.world.query_mut::<(&mut Player, &mut InputState)>()
                {
                    if player.slot != slot {
                        continue;
                    }
                    match dir {
                        MoveDir::Up => input.up = pressed,
                        MoveDir::Down => input.down = pressed,
                        MoveDir::Left => input.left = pressed,
                        MoveDir::Right => input.right = pressed,
                    }
                    if pressed {
                        player.facing = dir;
                    }
                }
            }
            PlayerCommand::Dash { slot } => self.attempt_dash(slot),
            PlayerCommand::FireHook { slot } => self.attempt_hook(slot),
            PlayerCommand::UsePower { slot } => self.attempt_power(slot),
            PlayerCommand::Shoot { slot, aim } => self.attempt_shoot(slot, aim),
            PlayerCommand::BuyUpgrade { slot, upgrade } => {
                if !matches!(self.phase, RoundPhase::Lobby | RoundPhase::Intermission) {
                    self.events.push(ArenaEvent::Denied { slot });
                } else if self.ledger.spend(slot, upgrades::upgrade_cost(upgrade)) {
                    self.ledger.queue_upgrade(slot, upgrade);
                    debug!(slot, ?upgrade, "upgrade queued");
                } else {
                    self.events.push(ArenaEvent::Denied { slot });
                }
            }
            PlayerCommand::Configure { settings } => {
                if matches!(
                    self.phase,
                    RoundPhase::Lobby | RoundPhase::Intermission | RoundPhase::RoundOver
                ) {
                    self.config = settings;
                }
            }
            PlayerCommand::StartRound => {
                if matches!(self.phase, RoundPhase::Lobby | RoundPhase::Intermission) {
                    self.start_round();
                }
            }
            PlayerCommand::Pause => {
                if self.phase == RoundPhase::Active {
                    self.phase = RoundPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == RoundPhase::Paused {
                    self.phase = RoundPhase::Active;
                }
            }
        }
    }

    fn attempt_dash(&mut self, slot: u8) {
        if self.phase != RoundPhase::Active {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        }
        let tick = self.time.tick;
        let mut fired = false;
        for (_entity, (player, input, vel)) in
            self.world
                .query_mut::<(&mut Player, &InputState, &mut Velocity)>()
        {
            if player.slot != slot || tick < player.dash_ready_tick {
                continue;
            }
            let dir = movement::held_dir(input).unwrap_or_else(|| movement::dir_vec(player.facing));
            vel.set(dir * DASH_SPEED);
            player.dash_ready_tick = tick + player.dash_cooldown_ticks;
            fired = true;
        }
        if fired {
            self.events.push(ArenaEvent::Dash { slot });
        } else {
            self.events.push(ArenaEvent::Denied { slot });
        }
    }

    fn attempt_hook(&mut self, slot: u8) {
        if self.phase != RoundPhase::Active {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        }
        let tick = self.time.tick;

        let mut shooter: Option<(hecs::Entity, Vec2)> = None;
        let mut others: Vec<(u8, Vec2)> = Vec::new();
        for (entity, (player, pos)) in self.world.query_mut::<(&Player, &Position)>() {
            if player.slot == slot {
                shooter = Some((entity, pos.vec()));
            } else {
                others.push((player.slot, pos.vec()));
            }
        }
        let Some((shooter_entity, shooter_pos)) = shooter else {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        };
        others.sort_by_key(|&(s, _)| s);
        let target = others
            .iter()
            .map(|&(s, p)| (s, shooter_pos.distance(p)))
            .filter(|&(_, d)| d <= HOOK_RANGE)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(s, _)| s);

        let mut latched: Option<u8> = None;
        if let Ok(mut player) = self.world.get::<&mut Player>(shooter_entity) {
            if player.hook_charges > 0 && tick >= player.hook_ready_tick {
                if let Some(target_slot) = target {
                    player.hook_charges -= 1;
                    player.hook_ready_tick = tick + secs_to_ticks(HOOK_COOLDOWN_SECS);
                    latched = Some(target_slot);
                }
            }
        }

        match latched {
            Some(target_slot) => {
                let tether = Tether {
                    shooter: slot,
                    target: target_slot,
                    started_tick: tick,
                    expires_tick: tick + secs_to_ticks(HOOK_DURATION_SECS),
                };
                if let Some(old) = self.tethers.insert(slot, tether) {
                    self.events.push(ArenaEvent::HookReleased {
                        shooter: old.shooter,
                        target: old.target,
                    });
                }
                self.events.push(ArenaEvent::HookLatched {
                    shooter: slot,
                    target: target_slot,
                });
            }
            None => self.events.push(ArenaEvent::Denied { slot }),
        }
    }

    fn attempt_power(&mut self, slot: u8) {
        if self.phase != RoundPhase::Active {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        }
        let tick = self.time.tick;

        let mut action: Option<(hecs::Entity, PowerKind, Position, MoveDir)> = None;
        for (entity, (player, pos)) in self.world.query_mut::<(&Player, &Position)>() {
            if player.slot == slot {
                if let Some(power) = player.power {
                    action = Some((entity, power, *pos, player.facing));
                }
            }
        }
        let Some((entity, power, pos, facing)) = action else {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        };

        match power {
            PowerKind::GlueField => {
                if let Ok(mut player) = self.world.get::<&mut Player>(entity) {
                    player.power = None;
                }
                let half = GLUE_FIELD_SIZE / 2.0;
                let expires = tick + secs_to_ticks(GLUE_FIELD_DURATION_SECS);
                let zone = self.world.spawn((SurfaceZone {
                    rect: Rect::from_center(pos, half, half),
                    speed_mult: GLUE_FIELD_MULT,
                    label: "glue".to_string(),
                    expires_tick: Some(expires),
                },));
                self.deferred
                    .schedule(expires, DeferredAction::ExpireZone(zone));
                self.events.push(ArenaEvent::PowerUsed { slot, power });
            }
            PowerKind::Blink => {
                let dest = pos.vec() + movement::dir_vec(facing) * BLINK_DISTANCE;
                let dest = Vec2::new(
                    dest.x.clamp(PLAYER_RADIUS, ARENA_WIDTH - PLAYER_RADIUS),
                    dest.y.clamp(PLAYER_RADIUS, ARENA_HEIGHT - PLAYER_RADIUS),
                );
                let landing = Position::new(dest.x, dest.y);
                let blocked = self.wall_rects().iter().any(|wall| {
                    wall.closest_point(&landing).vec().distance(dest) < PLAYER_RADIUS
                });
                if blocked {
                    // Keep the power; the player can try another direction.
                    self.events.push(ArenaEvent::Denied { slot });
                    return;
                }
                if let Ok(mut player) = self.world.get::<&mut Player>(entity) {
                    player.power = None;
                }
                if let Ok(mut position) = self.world.get::<&mut Position>(entity) {
                    position.set(dest);
                }
                self.events.push(ArenaEvent::PowerUsed { slot, power });
            }
        }
    }

    fn attempt_shoot(&mut self, slot: u8, aim: Option<Vec2>) {
        if self.phase != RoundPhase::Active || !self.rules.uses_projectiles() {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        }
        let tick = self.time.tick;
        let lifetime = millis_to_ticks(self.settings.projectile_lifetime_ms);
        let range = self.settings.projectile_speed * lifetime as f32 * DT;

        let mut shooter: Option<(hecs::Entity, Vec2, MoveDir)> = None;
        let mut targets: Vec<(u8, Vec2)> = Vec::new();
        for (entity, (player, pos)) in self.world.query_mut::<(&Player, &Position)>() {
            if player.slot == slot {
                shooter = Some((entity, pos.vec(), player.facing));
            } else if !systems::effects::is_cloaked(player) {
                targets.push((player.slot, pos.vec()));
            }
        }
        let Some((entity, origin, facing)) = shooter else {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        };

        let mut ready = false;
        if let Ok(mut player) = self.world.get::<&mut Player>(entity) {
            if tick >= player.shoot_ready_tick {
                player.shoot_ready_tick =
                    tick + millis_to_ticks(self.settings.projectile_cooldown_ms);
                ready = true;
            }
        }
        if !ready {
            self.events.push(ArenaEvent::Denied { slot });
            return;
        }

        // An explicit aim wins; otherwise auto-aim at the nearest visible
        // opponent in range, falling back to facing.
        targets.sort_by_key(|&(s, _)| s);
        let dir = match aim.filter(|v| v.length_squared() > f32::EPSILON) {
            Some(v) => v.normalize(),
            None => targets
                .iter()
                .map(|&(_, p)| (p, origin.distance(p)))
                .filter(|&(_, d)| d <= range && d > f32::EPSILON)
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(p, _)| (p - origin).normalize())
                .unwrap_or_else(|| movement::dir_vec(facing)),
        };

        let id = self.next_projectile_id;
        self.next_projectile_id += 1;
        let muzzle = origin + dir * PROJECTILE_MUZZLE_OFFSET;
        let speed = self.settings.projectile_speed;
        self.world.spawn((
            Projectile {
                id,
                owner: slot,
                damage: self.settings.projectile_damage,
                radius: PROJECTILE_RADIUS,
                expires_tick: tick + lifetime,
            },
            Position::new(muzzle.x, muzzle.y),
            Velocity::new(dir.x * speed, dir.y * speed),
        ));
        self.events.push(ArenaEvent::ProjectileFired { slot });
    }

    /// Reset transient state and build the next round's world.
    fn start_round(&mut self) {
        self.settings = self.config.clone();
        self.rules = ModeRules::for_mode(self.settings.mode);
        self.world.clear();
        self.tethers.clear();
        self.deferred.clear();
        self.despawn_buffer.clear();
        self.outcome.reset();
        self.match_state.round += 1;

        let level = levels::resolve_level(self.level_override.as_ref(), &self.settings.level);
        world_setup::spawn_walls(&mut self.world, &level);
        world_setup::spawn_zones(&mut self.world, &level);

        let roles = self.assign_roles();
        for slot in 0..2u8 {
            let spawn = level.spawn_points[slot as usize % level.spawn_points.len()];
            let queued = self.ledger.pull_queued(slot);
            world_setup::spawn_player(
                &mut self.world,
                slot,
                &self.bindings[slot as usize],
                roles[slot as usize],
                spawn,
                &self.settings,
                &queued,
            );
        }
        world_setup::populate_pickups(
            &mut self.world,
            &mut self.rng,
            &self.settings,
            &self.rules,
            &mut self.next_pickup_id,
        );

        self.timer_deadline = match self.settings.mode {
            GameMode::Pursuit => self
                .settings
                .mode_timer_secs
                .map(|secs| self.time.tick + secs_to_ticks(secs)),
            _ => None,
        };
        self.phase = RoundPhase::Active;
        info!(
            round = self.match_state.round,
            mode = ?self.settings.mode,
            level = %level.id,
            "round started"
        );
    }

    /// Pursuit roles alternate between rounds; everyone else plays unroled.
    fn assign_roles(&mut self) -> [Role; 2] {
        if !self.rules.assigns_roles() {
            return [Role::None, Role::None];
        }
        let chaser: u8 = match self.match_state.last_chaser {
            Some(0) => 1,
            Some(_) => 0,
            None => 0,
        };
        self.match_state.last_chaser = Some(chaser);
        let mut roles = [Role::Collector, Role::Collector];
        roles[chaser as usize] = Role::Chaser;
        roles
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Surface zones (speed multiplier stack)
        systems::zones::run(&mut self.world);
        // 2. Player movement (input response, integration, collision)
        systems::movement::run(&mut self.world, &self.settings);
        // 3. Hazard drift
        systems::movement::run_hazards(&mut self.world);
        // 4. Tether forces (pull, breakaway, expiry)
        systems::hooks::run(
            &mut self.world,
            &mut self.tethers,
            self.time.tick,
            &mut self.events,
        );
        // 5. Projectile flight and impact (mode rules)
        systems::projectiles::run(
            &mut self.world,
            &self.rules,
            self.time.tick,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 6. Pickup and hazard contact (mode rules)
        systems::pickups::run(
            &mut self.world,
            &mut self.rng,
            &self.rules,
            &self.settings,
            self.time.tick,
            &mut self.outcome,
            &mut self.events,
            &mut self.deferred,
            &mut self.despawn_buffer,
            &mut self.next_pickup_id,
        );
        // 7. Tags (pursuit)
        systems::pickups::run_tags(&mut self.world, &self.rules, self.time.tick, &mut self.events);
        // 8. Effect expiry
        systems::effects::run(&mut self.world, self.time.tick);
        // 9. Win evaluation
        self.evaluate_win();
    }

    fn evaluate_win(&mut self) {
        let mut standings: Vec<Standing> = self
            .world
            .query_mut::<&Player>()
            .into_iter()
            .map(|(_entity, p)| Standing {
                slot: p.slot,
                score: p.score,
                health: p.health,
                role: p.role,
            })
            .collect();
        standings.sort_by_key(|s| s.slot);

        let timer_expired = self
            .timer_deadline
            .is_some_and(|deadline| self.time.tick >= deadline);
        self.rules
            .evaluate_win(&standings, &self.settings, timer_expired, &mut self.outcome);
    }

    /// Close the round once a winner is declared. Releases tethers and pays
    /// out the ledger, then schedules the intermission.
    fn finalize_round(&mut self) {
        let Some((winner, reason)) = self.outcome.winner() else {
            return;
        };
        self.phase = RoundPhase::RoundOver;

        let mut shooters: Vec<u8> = self.tethers.keys().copied().collect();
        shooters.sort_unstable();
        for slot in shooters {
            if let Some(tether) = self.tethers.remove(&slot) {
                self.events.push(ArenaEvent::HookReleased {
                    shooter: tether.shooter,
                    target: tether.target,
                });
            }
        }

        let mut standings: Vec<(u8, i32)> = self
            .world
            .query_mut::<&Player>()
            .into_iter()
            .map(|(_entity, p)| (p.slot, p.score))
            .collect();
        standings.sort_by_key(|&(slot, _)| slot);
        for (slot, score) in standings {
            let won = (slot == winner).then_some(reason);
            let payout = ledger::round_payout(score, won);
            self.ledger.award(slot, payout);
        }

        if let Some(wins) = self.match_state.wins.get_mut(winner as usize) {
            *wins += 1;
        }
        self.events.push(ArenaEvent::RoundOver { winner, reason });
        self.deferred.schedule(
            self.time.tick + secs_to_ticks(INTERMISSION_DELAY_SECS),
            DeferredAction::BeginIntermission,
        );
        info!(winner, ?reason, "round over");
    }

    /// Fire deferred actions that have come due.
    fn process_deferred(&mut self) {
        for action in self.deferred.drain_due(self.time.tick) {
            match action {
                DeferredAction::RespawnPickup(kind) => {
                    if self.phase == RoundPhase::Active {
                        world_setup::spawn_placed_pickup(
                            &mut self.world,
                            &mut self.rng,
                            kind,
                            None,
                            &mut self.next_pickup_id,
                        );
                    }
                }
                DeferredAction::RespawnSpecial => {
                    if self.phase == RoundPhase::Active {
                        let (kind, power) = world_setup::roll_special(&mut self.rng);
                        world_setup::spawn_placed_pickup(
                            &mut self.world,
                            &mut self.rng,
                            kind,
                            power,
                            &mut self.next_pickup_id,
                        );
                    }
                }
                DeferredAction::ExpireZone(entity) => {
                    let _ = self.world.despawn(entity);
                }
                DeferredAction::BeginIntermission => {
                    if self.phase == RoundPhase::RoundOver {
                        self.phase = RoundPhase::Intermission;
                        info!(round = self.match_state.round, "intermission open");
                    }
                }
            }
        }
    }

    fn wall_rects(&mut self) -> Vec<Rect> {
        self.world
            .query_mut::<&powergrab_core::components::Wall>()
            .into_iter()
            .map(|(_entity, wall)| wall.rect)
            .collect()
    }
}
