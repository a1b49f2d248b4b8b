//! # Arena Core
//!
//! Simulation core for Arena Skirmish, a top-down two-sided arena
//! combat game.
//!
//! This crate contains **only** simulation logic:
//! - No rendering
//! - No IO
//! - No wall-clock reads (the host passes elapsed time into each tick)
//!
//! The host drives the world with a single-threaded
//! update-then-render loop: queue control commands, call
//! [`simulation::tick`] once per frame, then read world state for
//! rendering.
//!
//! ## Crate Structure
//!
//! - [`arena`] - Procedural obstacle and ground-cover generation
//! - [`combatant`] - Sides, classes, and the entity data model
//! - [`world`] - The world aggregate and entity registry
//! - [`movement`] - Player movement and push-apart collision
//! - [`combat`] - Projectile/ordnance lifecycle and damage
//! - [`ai`] - Pursuit AI targeting, steering, and firing
//! - [`pickups`] - Timed pickup spawning and collection
//! - [`match_state`] - Scoring and the win condition
//! - [`simulation`] - The per-tick update pass

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod ai;
pub mod arena;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod error;
pub mod match_state;
pub mod math;
pub mod movement;
pub mod pickups;
pub mod simulation;
pub mod world;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::arena::{Arena, Obstacle, ObstacleDetail, ObstacleShape};
    pub use crate::combat::{Bullet, Ordnance};
    pub use crate::combatant::{Combatant, CombatantClass, EntityId, Side};
    pub use crate::config::{ArenaConfig, GameMode};
    pub use crate::error::{GameError, Result};
    pub use crate::match_state::MatchState;
    pub use crate::math::Vec2;
    pub use crate::pickups::{Pickup, PickupKind};
    pub use crate::simulation::{tick, TickEvents};
    pub use crate::world::{HudState, PlayerCommand, World};
}
