//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Arena ---

/// Arena width in pixels.
pub const ARENA_WIDTH: f32 = 1280.0;

/// Arena height in pixels.
pub const ARENA_HEIGHT: f32 = 720.0;

// --- Players ---

/// Player body radius in pixels (collision and overlap checks).
pub const PLAYER_RADIUS: f32 = 18.0;

/// Base traversal speed (pixels per second) before multipliers.
pub const PLAYER_BASE_SPEED: f32 = 260.0;

/// Exponential rate at which velocity converges on the input direction (1/s).
pub const MOVE_RESPONSE: f32 = 12.0;

/// Speed multiplier for the chaser role in pursuit mode.
pub const CHASER_SPEED_MULT: f32 = 1.1;

// --- Dash ---

/// Instantaneous speed applied when a dash fires (pixels per second).
pub const DASH_SPEED: f32 = 640.0;

/// Dash cooldown in seconds.
pub const DASH_COOLDOWN_SECS: f32 = 1.2;

// --- Hook ---

/// Maximum distance at which a hook can latch (pixels).
pub const HOOK_RANGE: f32 = 280.0;

/// Tether lifetime in seconds.
pub const HOOK_DURATION_SECS: f32 = 1.2;

/// Minimum time between hook shots (seconds).
pub const HOOK_COOLDOWN_SECS: f32 = 0.8;

/// Hook charges a player starts a round with (also the default maximum).
pub const HOOK_MAX_CHARGES: u8 = 3;

/// Tether releases early once the pair closes inside this distance (pixels).
pub const HOOK_BREAK_DISTANCE: f32 = 40.0;

/// Pull speed toward the shooter when the tether is fresh (pixels per second).
pub const HOOK_PULL_MAX: f32 = 900.0;

/// Pull speed just before the tether expires (pixels per second).
pub const HOOK_PULL_MIN: f32 = 220.0;

/// Exponential rate at which the target's own velocity yields to the pull (1/s).
pub const HOOK_VELOCITY_BLEND: f32 = 6.0;

/// Exponential damping applied to the shooter's velocity while pulling (1/s).
pub const HOOK_RECOIL_DAMP: f32 = 4.0;

// --- Effects ---

/// Boost speed multiplier.
pub const BOOST_MULT: f32 = 1.6;

/// Boost duration in seconds.
pub const BOOST_DURATION_SECS: f32 = 6.0;

/// Slow speed multiplier.
pub const SLOW_MULT: f32 = 0.55;

/// Slow duration in seconds.
pub const SLOW_DURATION_SECS: f32 = 4.0;

/// Cloak duration in seconds.
pub const CLOAK_DURATION_SECS: f32 = 5.0;

// --- Powers ---

/// Glue field speed multiplier while inside.
pub const GLUE_FIELD_MULT: f32 = 0.45;

/// Glue field lifetime in seconds.
pub const GLUE_FIELD_DURATION_SECS: f32 = 6.0;

/// Glue field side length in pixels (square, centered on the deployer).
pub const GLUE_FIELD_SIZE: f32 = 140.0;

/// Blink reposition distance along the facing direction (pixels).
pub const BLINK_DISTANCE: f32 = 180.0;

// --- Pickups ---

/// Pickup body radius in pixels.
pub const PICKUP_RADIUS: f32 = 12.0;

/// Hazard body radius in pixels.
pub const HAZARD_RADIUS: f32 = 14.0;

/// Score granted by a standard energy orb.
pub const ENERGY_VALUE: i32 = 1;

/// Score granted by a rare energy orb.
pub const RARE_ENERGY_VALUE: i32 = 3;

/// Score removed by hazard contact.
pub const HAZARD_PENALTY: i32 = 2;

/// Shield damage from hazard contact in duel mode.
pub const HAZARD_DUEL_DAMAGE: u32 = 1;

/// Immunity window after a hazard contact (seconds).
pub const HAZARD_GRACE_SECS: f32 = 1.0;

/// Hazard drift speed (pixels per second).
pub const HAZARD_DRIFT_SPEED: f32 = 60.0;

/// Hazard drift speed in minefield mode (pixels per second).
pub const MINEFIELD_DRIFT_SPEED: f32 = 140.0;

/// Hazard count multiplier in minefield mode.
pub const MINEFIELD_HAZARD_FACTOR: u32 = 3;

/// Delay before a consumed rare energy orb respawns (seconds).
pub const RARE_RESPAWN_DELAY_SECS: f32 = 8.0;

/// Delay before a consumed special pickup respawns (seconds).
pub const SPECIAL_RESPAWN_DELAY_SECS: f32 = 10.0;

// --- Spawn placement ---

/// Bounded attempts when sampling a clear spawn position.
pub const SPAWN_ATTEMPTS: u32 = 30;

// --- Pursuit ---

/// Minimum time between tags by the same chaser (seconds).
pub const TAG_COOLDOWN_SECS: f32 = 1.5;

// --- Projectiles ---

/// Projectile body radius in pixels.
pub const PROJECTILE_RADIUS: f32 = 6.0;

/// Muzzle offset from the shooter's center (pixels).
pub const PROJECTILE_MUZZLE_OFFSET: f32 = PLAYER_RADIUS + PROJECTILE_RADIUS + 2.0;

// --- Round lifecycle ---

/// Delay between a round ending and the intermission opening (seconds).
pub const INTERMISSION_DELAY_SECS: f32 = 3.0;

// --- Payouts ---

/// Currency bonus for winning by tag goal.
pub const WIN_BONUS_TAG: u32 = 3;

/// Currency bonus for winning by score.
pub const WIN_BONUS_SCORE: u32 = 2;

/// Currency bonus for winning by knockout or skull.
pub const WIN_BONUS_KNOCKOUT: u32 = 2;

/// Currency bonus for winning by timer expiry.
pub const WIN_BONUS_TIMER: u32 = 1;

/// Currency bonus for winning by the opponent's debt.
pub const WIN_BONUS_DEBT: u32 = 1;
