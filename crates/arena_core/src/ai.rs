//! Pursuit AI for every living combatant not on the player's side.
//!
//! Each AI entity selects its nearest living enemy across both
//! classes, steers straight toward it at a fixed per-frame step, and
//! fires on its class cooldown. Steering shares the movement
//! resolver's obstacle test but never displaces other entities. The
//! freeze modifier suspends the whole controller.

use crate::combat::{Bullet, Ordnance};
use crate::combatant::CombatantClass;
use crate::config::{AI_SPEED, MUZZLE_OFFSET, ORDNANCE_SPEED};
use crate::math::Vec2;
use crate::world::World;

/// Run AI steering and firing for one tick.
pub(crate) fn update(world: &mut World) {
    let now = world.elapsed;
    if world.modifiers.is_frozen(now) {
        return;
    }

    let player_side = world.player_side;

    for i in 0..world.combatants.len() {
        let (alive, side, class, position) = {
            let c = &world.combatants[i];
            (c.alive, c.side, c.class, c.position)
        };
        if !alive || side == player_side {
            continue;
        }

        // Steer toward the nearest living enemy
        if let Some((_, target)) = world.nearest_living_enemy(side, position) {
            let delta = target - position;
            let direction = delta.normalize();
            if direction != Vec2::ZERO {
                let candidate = position + direction * AI_SPEED;
                if !world.arena.blocks(
                    candidate,
                    class.movement_altitude(),
                    class.collision_radius(),
                ) {
                    world.combatants[i].position = candidate;
                }
            }
            world.combatants[i].facing = delta.to_degrees();
        }

        // Fire on the class cooldown, along the (possibly updated)
        // facing. AI ammunition is not tracked.
        let (facing, ready, muzzle_base) = {
            let c = &world.combatants[i];
            (c.facing, c.can_fire(now), c.position)
        };
        if ready {
            let direction = Vec2::from_degrees(facing);
            let muzzle = muzzle_base + direction * MUZZLE_OFFSET;
            match class {
                CombatantClass::Troop => {
                    world
                        .bullets
                        .push(Bullet::ai_fired(class, side, muzzle, direction));
                }
                CombatantClass::Vehicle => {
                    if world.mode.vehicles_fire_ordnance() {
                        world.ordnance.push(Ordnance::launch(
                            muzzle,
                            direction * ORDNANCE_SPEED,
                            side,
                        ));
                    }
                }
            }
            world.combatants[i].last_fire = Some(now);
        }
    }
}
