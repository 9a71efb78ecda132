//! Powergrab — local two-player arena, headless host.
//!
//! Commands arrive as newline-delimited JSON on stdin, either raw
//! `PlayerCommand`s or `{"key": "...", "pressed": true}` key transitions.
//! One snapshot per tick goes out as NDJSON on stdout; logs go to stderr.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use powergrab_app::config::{self, AppConfig};
use powergrab_app::game_loop;
use powergrab_app::state::{shared_snapshot, LoopCommand};
use powergrab_core::commands::PlayerCommand;
use powergrab_sim::engine::SimConfig;

/// A raw key transition from the terminal host or overlay.
#[derive(Debug, Deserialize)]
struct KeyEvent {
    key: String,
    pressed: bool,
}

/// One line of stdin: a full command, or a key transition to translate.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InputLine {
    Command(PlayerCommand),
    Key(KeyEvent),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for the snapshot stream
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("powergrab v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(Path::new("powergrab.toml")).context("loading configuration")?;
    let level_override = match &config.level_file {
        Some(path) => Some(
            config::load_level(Path::new(path))
                .with_context(|| format!("loading level file {path}"))?,
        ),
        None => None,
    };

    let sim_config = SimConfig {
        seed: config.seed,
        settings: config.settings.clone(),
        players: config.players.clone(),
        level_override,
    };

    let latest = shared_snapshot();
    let cmd_tx = game_loop::spawn_game_loop(sim_config, latest.clone(), |snapshot| {
        if let Ok(json) = serde_json::to_string(snapshot) {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{json}");
        }
    });

    let bindings = config.bindings;
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let command = match serde_json::from_str::<InputLine>(trimmed) {
            Ok(InputLine::Command(command)) => Some(command),
            Ok(InputLine::Key(event)) => {
                let command = bindings.command_for_key(&event.key, event.pressed);
                if command.is_none() {
                    warn!(key = %event.key, "unbound key");
                }
                command
            }
            Err(error) => {
                warn!(%error, line = %trimmed, "unparseable input line");
                None
            }
        };
        if let Some(command) = command {
            if cmd_tx.send(LoopCommand::Player(command)).is_err() {
                break;
            }
        }
    }

    let _ = cmd_tx.send(LoopCommand::Shutdown);
    info!("input stream closed, shutting down");
    Ok(())
}
