//! Movement and collision resolution.
//!
//! Player movement intents move every living player-side combatant by
//! a fixed step, clamped to arena bounds and rejected outright when
//! the destination is blocked by an obstacle. A committed move shoves
//! any too-close living same-class entity radially away; the mover
//! always wins and the shoved entity is re-clamped. AI steering (in
//! the AI controller) shares the blocking test but never pushes.

use rand::Rng;

use crate::combatant::CombatantClass;
use crate::config::{ArenaConfig, PLAYER_SPEED};
use crate::math::{wrap_degrees, Vec2};
use crate::world::World;

/// Clamp a position to the arena square minus the class margin.
#[must_use]
pub fn clamp_position(config: &ArenaConfig, class: CombatantClass, position: Vec2) -> Vec2 {
    position.clamp_to_square(config.grid_length - class.bounds_margin())
}

/// A uniformly random unit direction, used when a push-apart pair is
/// exactly coincident.
pub(crate) fn random_direction<R: Rng>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// Apply a player movement intent to every living player-side
/// combatant.
pub(crate) fn apply_player_movement(world: &mut World, direction: Vec2) {
    let mover_indices: Vec<usize> = world
        .combatants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.alive && c.side == world.player_side)
        .map(|(i, _)| i)
        .collect();

    for i in mover_indices {
        let (class, current) = {
            let c = &world.combatants[i];
            (c.class, c.position)
        };

        let candidate = clamp_position(
            &world.config,
            class,
            current + direction * PLAYER_SPEED,
        );

        // The move is rejected entirely when blocked; no sliding
        if world.arena.blocks(
            candidate,
            class.movement_altitude(),
            class.collision_radius(),
        ) {
            continue;
        }

        push_apart_neighbors(world, i, class, candidate);

        // Mover wins: committed whether or not anything was shoved
        world.combatants[i].position = candidate;
    }
}

/// Shove every living same-class entity within the class separation
/// distance of `candidate` radially away from it.
fn push_apart_neighbors(world: &mut World, mover: usize, class: CombatantClass, candidate: Vec2) {
    let separation = class.min_separation();
    let push_amount = class.push_amount();

    for j in 0..world.combatants.len() {
        if j == mover {
            continue;
        }
        let (other_alive, other_class, other_pos) = {
            let o = &world.combatants[j];
            (o.alive, o.class, o.position)
        };
        if !other_alive || other_class != class {
            continue;
        }
        if candidate.distance(other_pos) >= separation {
            continue;
        }

        let delta = other_pos - candidate;
        let push_dir = if delta.length() == 0.0 {
            random_direction(&mut world.rng)
        } else {
            delta.normalize()
        };

        let pushed = clamp_position(&world.config, class, other_pos + push_dir * push_amount);
        world.combatants[j].position = pushed;
    }
}

/// Rotate the facing of every living combatant on both sides.
pub(crate) fn rotate_all(world: &mut World, degrees: f32) {
    for c in world.combatants.iter_mut().filter(|c| c.alive) {
        c.facing = wrap_degrees(c.facing + degrees);
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{Obstacle, ObstacleDetail, ObstacleShape};
    use crate::combatant::Side;
    use crate::config::GameMode;
    use crate::world::World;

    use super::*;

    fn open_world() -> World {
        World::new(
            GameMode::GunCombat,
            ArenaConfig::default().with_seed(9).open(),
        )
    }

    fn park_everyone(world: &mut World, corner: Vec2) {
        for c in &mut world.combatants {
            c.position = corner;
        }
    }

    #[test]
    fn test_move_applies_fixed_step() {
        let mut w = open_world();
        park_everyone(&mut w, Vec2::ZERO);
        let id = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        let mover = w.combatant_mut(id).unwrap();
        mover.position = Vec2::new(100.0, 100.0);
        apply_player_movement(&mut w, Vec2::new(1.0, 0.0));
        assert_eq!(
            w.combatant(id).unwrap().position,
            Vec2::new(106.0, 100.0)
        );
    }

    #[test]
    fn test_move_clamps_to_bounds() {
        let mut w = open_world();
        park_everyone(&mut w, Vec2::ZERO);
        let id = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        w.combatant_mut(id).unwrap().position = Vec2::new(588.0, 0.0);
        apply_player_movement(&mut w, Vec2::new(1.0, 0.0));
        // Troop margin is 10: clamped to 590
        assert_eq!(w.combatant(id).unwrap().position.x, 590.0);
    }

    #[test]
    fn test_move_rejected_by_obstacle() {
        let mut w = open_world();
        park_everyone(&mut w, Vec2::new(-400.0, -400.0));
        w.arena.obstacles.push(Obstacle {
            min: Vec2::new(100.0, -10.0),
            max: Vec2::new(140.0, 10.0),
            height: 50.0,
            shape: ObstacleShape::Block,
            detail: ObstacleDetail::Plain,
        });
        let id = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        // Candidate lands at x=98, within the radius-expanded box (92..148)
        w.combatant_mut(id).unwrap().position = Vec2::new(92.0, 0.0);
        apply_player_movement(&mut w, Vec2::new(1.0, 0.0));
        assert_eq!(w.combatant(id).unwrap().position, Vec2::new(92.0, 0.0));
    }

    #[test]
    fn test_push_apart_mover_wins() {
        let mut w = open_world();
        park_everyone(&mut w, Vec2::new(-400.0, -400.0));
        let mover = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        // Same class, opposing side: gets shoved but never self-moves
        let victim = w.combatants.iter().find(|c| c.side == Side::B).unwrap().id;
        w.combatant_mut(mover).unwrap().position = Vec2::new(0.0, 0.0);
        w.combatant_mut(victim).unwrap().position = Vec2::new(16.0, 0.0);

        apply_player_movement(&mut w, Vec2::new(1.0, 0.0));

        // Mover committed the unclamped candidate
        assert_eq!(w.combatant(mover).unwrap().position, Vec2::new(6.0, 0.0));
        // Victim shoved radially away by exactly the troop push amount
        assert_eq!(w.combatant(victim).unwrap().position, Vec2::new(24.0, 0.0));
    }

    #[test]
    fn test_push_apart_coincident_randomizes() {
        let mut w = open_world();
        park_everyone(&mut w, Vec2::new(-400.0, -400.0));
        let mover = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        let victim = w.combatants.iter().find(|c| c.side == Side::B).unwrap().id;
        w.combatant_mut(mover).unwrap().position = Vec2::new(6.0, 0.0);
        // Victim sits exactly on the mover's candidate position
        w.combatant_mut(victim).unwrap().position = Vec2::new(12.0, 0.0);

        apply_player_movement(&mut w, Vec2::new(1.0, 0.0));

        let victim_pos = w.combatant(victim).unwrap().position;
        let mover_pos = w.combatant(mover).unwrap().position;
        assert_eq!(mover_pos, Vec2::new(12.0, 0.0));
        // Shoved in *some* direction by the troop push amount
        let moved = victim_pos.distance(Vec2::new(12.0, 0.0));
        assert!((moved - 8.0).abs() < 1e-3, "push distance was {moved}");
    }

    #[test]
    fn test_dead_entities_do_not_move_or_get_pushed() {
        let mut w = open_world();
        park_everyone(&mut w, Vec2::new(-400.0, -400.0));
        let ids: Vec<_> = w
            .combatants
            .iter()
            .filter(|c| c.side == Side::A)
            .map(|c| c.id)
            .collect();
        let mover = ids[0];
        let corpse = ids[1];
        w.combatant_mut(mover).unwrap().position = Vec2::new(0.0, 0.0);
        let dead = w.combatant_mut(corpse).unwrap();
        dead.position = Vec2::new(10.0, 0.0);
        dead.destroy();

        apply_player_movement(&mut w, Vec2::new(1.0, 0.0));

        assert_eq!(w.combatant(corpse).unwrap().position, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_rotate_all_wraps() {
        let mut w = open_world();
        for c in &mut w.combatants {
            c.facing = 358.0;
        }
        rotate_all(&mut w, 5.0);
        for c in w.iter_living() {
            assert!((c.facing - 3.0).abs() < 1e-3);
        }
    }
}
