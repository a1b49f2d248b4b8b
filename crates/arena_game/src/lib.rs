//! # Arena Game
//!
//! Game client for Arena Skirmish.
//!
//! This crate drives the simulation core with Bevy: it maps input to
//! core control commands, advances the world once per frame, and
//! renders the top-down battlefield and HUD from world state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use bevy::log::LogPlugin;
use bevy::prelude::*;

use arena_core::config::GameMode;

pub mod camera;
pub mod hud;
pub mod input;
pub mod plugins;
pub mod render;
pub mod simulation;

use plugins::GamePlugins;
use simulation::SimWorld;

/// Run the game in the given mode.
///
/// # Errors
///
/// Returns an error if the game fails to initialize.
pub fn run(mode: GameMode) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Arena Skirmish".into(),
                    resolution: (1000.0, 800.0).into(),
                    ..default()
                }),
                ..default()
            })
            .disable::<LogPlugin>(), // Logging already initialized in main.rs
    );

    app.insert_resource(SimWorld::new(mode));
    app.add_plugins(GamePlugins);

    // Muddy parade-ground backdrop behind the arena floor
    app.insert_resource(ClearColor(Color::srgb(0.10, 0.12, 0.08)));

    app.run();

    Ok(())
}
