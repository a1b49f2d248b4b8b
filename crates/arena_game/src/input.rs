//! Input plugin: maps keyboard and mouse to core control commands.
//!
//! - Arrow keys: move the controlled side's combatants
//! - Left mouse / Space: fire all controlled combatants
//! - U: unlimited ammo, T: auto-target, F: freeze AI, R: restart
//! - J / K: rotate every combatant's facing left / right

use bevy::prelude::*;

use arena_core::config::BULK_ROTATE_STEP;
use arena_core::math::Vec2 as CoreVec2;
use arena_core::world::PlayerCommand;

use crate::simulation::{SimSet, SimWorld};

/// Plugin for game input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (movement_commands, fire_commands, toggle_commands).in_set(SimSet::Input),
        );
    }
}

/// Queues a movement intent from the arrow keys.
fn movement_commands(keyboard: Res<ButtonInput<KeyCode>>, mut sim: ResMut<SimWorld>) {
    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowLeft) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowRight) {
        direction.x += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        direction.y -= 1.0;
    }

    if direction != Vec2::ZERO {
        direction = direction.normalize();
        sim.0
            .queue_command(PlayerCommand::Move(CoreVec2::new(direction.x, direction.y)));
    }
}

/// Queues a fire command on left click or space.
fn fire_commands(
    mouse: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<SimWorld>,
) {
    if mouse.just_pressed(MouseButton::Left) || keyboard.just_pressed(KeyCode::Space) {
        sim.0.queue_command(PlayerCommand::Fire);
    }
}

/// Queues modifier toggles, bulk rotation, and restart.
fn toggle_commands(keyboard: Res<ButtonInput<KeyCode>>, mut sim: ResMut<SimWorld>) {
    if keyboard.just_pressed(KeyCode::KeyU) {
        sim.0.queue_command(PlayerCommand::ToggleUnlimitedAmmo);
    }
    if keyboard.just_pressed(KeyCode::KeyT) {
        sim.0.queue_command(PlayerCommand::ToggleAutoTarget);
    }
    if keyboard.just_pressed(KeyCode::KeyF) {
        sim.0.queue_command(PlayerCommand::Freeze);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        sim.0.queue_command(PlayerCommand::Reset);
    }
    if keyboard.pressed(KeyCode::KeyJ) {
        sim.0
            .queue_command(PlayerCommand::RotateAll(-BULK_ROTATE_STEP));
    }
    if keyboard.pressed(KeyCode::KeyK) {
        sim.0.queue_command(PlayerCommand::RotateAll(BULK_ROTATE_STEP));
    }
}
