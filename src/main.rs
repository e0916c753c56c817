mod config;
mod field;
mod game;
mod input;
mod layout;
mod level;
mod render;
mod snake;
mod state;
mod storage;
mod term;

use std::{fs::File, sync::Mutex};

use anyhow::Result;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::config::GameConfig;

pub type TermInt = u16;
pub type Coords = (u16, u16);

/// Logs go to a file, and only when RUST_LOG asks for them; the terminal
/// belongs to the game.
fn init_tracing(config: &GameConfig) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => return,
    };

    if let Ok(file) = File::create(&config.log_path) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
}

fn main() -> Result<()> {
    let config = GameConfig::default();
    init_tracing(&config);

    let mut game = game::SnakeGame::new(config)?;

    // The terminal is restored even when the game loop fails
    let result = game.initialize().and_then(|_| game.run());
    if let Err(err) = game.restore() {
        warn!("terminal not restored: {:#}", err);
    }

    result
}
