//! Simulation engine for POWERGRAB.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces ArenaSnapshots for the frontend.

pub mod deferred;
pub mod engine;
pub mod ledger;
pub mod levels;
pub mod modes;
pub mod placement;
pub mod systems;
pub mod tether;
pub mod upgrades;
pub mod world_setup;

pub use engine::ArenaEngine;
pub use powergrab_core as core;
