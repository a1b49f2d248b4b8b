//! Game plugins for Bevy.
//!
//! This module provides the main plugin group for the game client,
//! aggregating all gameplay plugins into a single registration point.

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::hud::HudPlugin;
use crate::input::InputPlugin;
use crate::render::RenderPlugin;
use crate::simulation::SimulationPlugin;

/// Main plugin group containing all game client plugins.
///
/// # Example
/// ```ignore
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .insert_resource(SimWorld::new(GameMode::GunCombat))
///     .add_plugins(GamePlugins)
///     .run();
/// ```
pub struct GamePlugins;

impl PluginGroup for GamePlugins {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(SimulationPlugin)
            .add(CameraPlugin)
            .add(InputPlugin)
            .add(RenderPlugin)
            .add(HudPlugin)
    }
}
