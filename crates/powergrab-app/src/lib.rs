//! Powergrab host process.
//!
//! Wires the arena engine to a newline-delimited JSON stdio bridge:
//! key events and commands in, one snapshot per tick out. The overlay
//! process renders from that stream.

pub mod bindings;
pub mod config;
pub mod game_loop;
pub mod state;

pub use powergrab_core as core;
