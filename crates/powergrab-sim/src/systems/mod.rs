//! Simulation systems, run in a fixed order every tick.

pub mod effects;
pub mod hooks;
pub mod movement;
pub mod pickups;
pub mod projectiles;
pub mod snapshot;
pub mod zones;
