//! Simulation plugin: owns the core world and advances it each frame.
//!
//! Input systems queue control commands ahead of the tick; the tick
//! applies them atomically, and every later system this frame reads
//! the freshly updated world state.

use bevy::prelude::*;

use arena_core::config::{ArenaConfig, GameMode};
use arena_core::simulation;
use arena_core::world::World as CoreWorld;

/// Resource wrapping the simulation core's world state.
#[derive(Resource)]
pub struct SimWorld(pub CoreWorld);

impl SimWorld {
    /// Create a world for the selected mode with a time-derived seed,
    /// so every session fights a different arena.
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos() as u64 ^ d.as_secs());
        Self(CoreWorld::new(mode, ArenaConfig::default().with_seed(seed)))
    }
}

/// An ordnance detonation effect being rendered.
pub struct ExplosionEffect {
    /// Blast center in world coordinates.
    pub position: Vec2,
    /// Full blast radius.
    pub radius: f32,
    /// Seconds of effect remaining.
    pub remaining: f32,
}

/// Seconds an explosion effect stays on screen.
pub const EXPLOSION_EFFECT_SECS: f32 = 0.35;

/// Active detonation effects, fed by tick events and drained by the
/// renderer as they expire.
#[derive(Resource, Default)]
pub struct ExplosionEffects(pub Vec<ExplosionEffect>);

/// System sets ordering input ahead of the tick and rendering after.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Systems that queue control commands.
    Input,
    /// The tick itself.
    Tick,
    /// Systems that read the updated world.
    Render,
}

/// Plugin that advances the core simulation once per frame.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ExplosionEffects>()
            .configure_sets(
                Update,
                (SimSet::Input, SimSet::Tick, SimSet::Render).chain(),
            )
            .add_systems(Update, drive_simulation.in_set(SimSet::Tick));
    }
}

/// Advance the core world by one tick and translate events into
/// renderable effects.
fn drive_simulation(
    time: Res<Time>,
    mut sim: ResMut<SimWorld>,
    mut effects: ResMut<ExplosionEffects>,
) {
    let events = simulation::tick(&mut sim.0, time.delta_seconds());

    for explosion in &events.explosions {
        effects.0.push(ExplosionEffect {
            position: Vec2::new(explosion.position.x, explosion.position.y),
            radius: explosion.radius,
            remaining: EXPLOSION_EFFECT_SECS,
        });
    }

    if let Some(winner) = events.winner_declared {
        tracing::info!(winner = winner.label(), "Game over");
    }
}
