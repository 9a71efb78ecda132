//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Game mode selected for a round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Score race: first to the winning score.
    #[default]
    Classic,
    /// Classic rules with tripled, faster-drifting hazards.
    Minefield,
    /// Asymmetric chase: one chaser tags, one collector scores.
    Pursuit,
    /// Projectile duel: strip the opponent's shield pool.
    Duel,
}

/// Round lifecycle phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// No round started yet. Settings and upgrades may change.
    #[default]
    Lobby,
    /// Round in progress.
    Active,
    /// Round in progress but frozen.
    Paused,
    /// A winner has been declared; transient state is frozen.
    RoundOver,
    /// Between rounds: payouts visible, upgrade spending open.
    Intermission,
}

/// Asymmetric role in pursuit mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Scores energy, flees the chaser.
    Collector,
    /// Tags the collector, scores per tag.
    Chaser,
    /// Symmetric modes.
    #[default]
    None,
}

/// Pickup category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Standard score orb. Respawns immediately when taken.
    Energy,
    /// High-value score orb. Respawns after a delay.
    RareEnergy,
    /// Drifting damage source. Persists; contact penalizes.
    Hazard,
    /// Rolls a random timed effect on the toucher.
    Behavior,
    /// Restores one hook charge.
    Rope,
    /// Grants a holdable power (at most one held).
    Power,
    /// Relocates the toucher to a random clear position.
    Teleport,
    /// Instant round loss for the toucher.
    Skull,
}

/// Timed effect kind. A player holds at most one effect at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Speed multiplier above 1.
    Boost,
    /// Speed multiplier below 1.
    Slow,
    /// Suppresses hazard, skull, and tag interactions; hidden from auto-aim.
    Cloak,
}

/// Holdable power granted by a Power pickup, activated on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerKind {
    /// Deploy a temporary slow zone at the player's position.
    GlueField,
    /// Short instant reposition along the facing direction.
    Blink,
}

/// Why a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    /// Reached the winning score.
    Score,
    /// Opponent fell to or below the debt threshold.
    Debt,
    /// Chaser reached the tag goal.
    Tag,
    /// Mode timer elapsed with the collector alive.
    Timer,
    /// Opponent's shield pool reached zero, or skull contact.
    Knockout,
}

/// What happens at the arena edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryBehavior {
    /// Clamp position, kill the velocity component into the wall.
    #[default]
    Collide,
    /// Exit one side, enter the opposite side.
    Wrap,
}

/// Purchasable upgrades. Queued between rounds, applied at the next spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeId {
    /// +1 maximum hook charge for the next round.
    ExtraHookCharge,
    /// 25% shorter dash cooldown for the next round.
    SwiftDash,
    /// Start the next round with +1 score.
    HeadStart,
    /// +1 shield capacity for the next round (duel).
    PlatedShield,
}

/// Movement axis direction for held-key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDir {
    Up,
    Down,
    Left,
    Right,
}
