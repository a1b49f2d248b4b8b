//! The per-tick update pass.
//!
//! One tick applies queued control commands atomically, then runs the
//! systems in a fixed order: AI steering/firing, projectile and
//! ordnance resolution, pickups, and the win-condition check. Nothing
//! inside a tick suspends; time-based state is driven by the
//! wall-clock delta the host passes in.
//!
//! Once the match is over the whole update pass is skipped - dead or
//! alive, no combatant mutates after the game-over tick. Reset
//! commands still drain, so the host can restart at any time.

use crate::combatant::{EntityId, Side};
use crate::config::FREEZE_DURATION;
use crate::math::Vec2;
use crate::pickups::PickupKind;
use crate::world::{PlayerCommand, World};
use crate::{ai, combat, movement, pickups};

/// An ordnance detonation, reported for the renderer's expiring
/// effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explosion {
    /// Blast center.
    pub position: Vec2,
    /// Blast radius.
    pub radius: f32,
    /// Side that fired the shell.
    pub side: Side,
}

/// A pickup collection, reported for HUD/audio feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectedPickup {
    /// Id of the removed pickup.
    pub pickup: EntityId,
    /// Combatant that collected it.
    pub collector: EntityId,
    /// Effect that was applied.
    pub kind: PickupKind,
}

/// Events generated during one tick, for the game layer to render
/// effects and react to outcomes.
#[derive(Debug, Clone, Default)]
pub struct TickEvents {
    /// Combatants that died this tick.
    pub deaths: Vec<EntityId>,
    /// Ordnance detonations this tick.
    pub explosions: Vec<Explosion>,
    /// Pickups collected this tick.
    pub collected: Vec<CollectedPickup>,
    /// Winner, on the exact tick the match ends.
    pub winner_declared: Option<Side>,
}

/// Advance the world by one tick.
///
/// `dt` is the wall-clock delta since the previous tick in seconds;
/// it drives cooldowns, the freeze window, and pickup cadence.
/// Projectile advancement uses its own fixed per-frame steps.
pub fn tick(world: &mut World, dt: f32) -> TickEvents {
    let mut events = TickEvents::default();

    // Control input is sampled asynchronously by the host but applied
    // atomically here, at the start of the tick.
    let commands = std::mem::take(&mut world.commands);
    for command in commands {
        match command {
            PlayerCommand::Reset => world.reset(),
            _ if world.match_state.game_over => {}
            PlayerCommand::Move(direction) => {
                movement::apply_player_movement(world, direction);
            }
            PlayerCommand::Fire => combat::fire_player_weapons(world),
            PlayerCommand::RotateAll(degrees) => movement::rotate_all(world, degrees),
            PlayerCommand::ToggleUnlimitedAmmo => {
                world.modifiers.unlimited_ammo = !world.modifiers.unlimited_ammo;
            }
            PlayerCommand::ToggleAutoTarget => {
                world.modifiers.auto_target = !world.modifiers.auto_target;
            }
            PlayerCommand::Freeze => {
                world.modifiers.freeze_until = world.elapsed + FREEZE_DURATION;
            }
        }
    }

    if world.match_state.game_over {
        return events;
    }

    world.elapsed += f64::from(dt);

    ai::update(world);

    combat::update_bullets(world);
    combat::update_ordnance(world, &mut events);
    combat::resolve_bullet_hits(world, &mut events);

    pickups::spawn(world);
    pickups::collect(world, &mut events);

    let alive_a = world.living_count(Side::A);
    let alive_b = world.living_count(Side::B);
    events.winner_declared = world.match_state.evaluate(alive_a, alive_b);

    events
}
