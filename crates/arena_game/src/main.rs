//! Arena Skirmish - Game Client

use std::io::Write;

use arena_core::config::GameMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mode = prompt_mode();
    tracing::info!(mode = mode.label(), "Starting Arena Skirmish");

    if let Err(e) = arena_game::run(mode) {
        tracing::error!("Game error: {e}");
        std::process::exit(1);
    }
}

/// Ask for the game mode on the console before the window opens.
/// Anything unparseable falls back to Gun Combat.
fn prompt_mode() -> GameMode {
    println!("Select mode: '1' Gun Combat, '2' Battle Drive, '3' Survival.");
    print!("Enter mode number (1/2/3): ");
    let _ = std::io::stdout().flush();

    let mut line = String::new();
    if std::io::stdin().read_line(&mut line).is_err() {
        return GameMode::GunCombat;
    }
    line.trim()
        .parse::<u8>()
        .ok()
        .and_then(|selector| GameMode::from_selector(selector).ok())
        .unwrap_or(GameMode::GunCombat)
}
