//! Timed pickup spawning and proximity collection.
//!
//! A spawn attempt fires at most once per configured interval and
//! succeeds with a fixed probability; the pickup lands at a uniformly
//! random in-bounds position with no obstacle avoidance. Collection is
//! first-in-registry-order: exactly one effect per pickup, and
//! removing an already-removed pickup is a silent no-op.

use serde::{Deserialize, Serialize};

use rand::Rng;

use crate::math::Vec2;
use crate::movement::clamp_position;
use crate::simulation::{CollectedPickup, TickEvents};
use crate::world::World;

/// Fraction of the arena half-extent pickups spawn within.
const SPAWN_SPAN_FACTOR: f32 = 0.8;

/// Score credited by a score pickup.
const SCORE_BONUS: u32 = 2;

/// Effect a pickup applies on collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Restore health toward the collector's class ceiling.
    Health,
    /// Credit the collector's side with bonus score.
    Score,
    /// Restore ammunition.
    Ammo,
    /// Jitter the collector to a nearby random position.
    Displacement,
}

impl PickupKind {
    const ALL: [Self; 4] = [Self::Health, Self::Score, Self::Ammo, Self::Displacement];
}

/// A spawned, uncollected pickup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// Unique id, shared with the combatant id sequence.
    pub id: u64,
    /// Ground position.
    pub position: Vec2,
    /// Effect on collection.
    pub kind: PickupKind,
    /// Simulation timestamp of the spawn.
    pub spawned_at: f64,
}

/// Attempt a timed pickup spawn.
pub(crate) fn spawn(world: &mut World) {
    if world.elapsed - world.last_pickup_spawn <= world.config.pickup_interval {
        return;
    }
    world.last_pickup_spawn = world.elapsed;

    let chance = world.config.pickup_chance;
    if !world.rng.gen_bool(chance) {
        return;
    }

    let span = world.config.grid_length * SPAWN_SPAN_FACTOR;
    let position = Vec2::new(
        world.rng.gen_range(-span..=span),
        world.rng.gen_range(-span..=span),
    );
    let kind = PickupKind::ALL[world.rng.gen_range(0..PickupKind::ALL.len())];
    let id = world.allocate_id();
    world.pickups.push(Pickup {
        id,
        position,
        kind,
        spawned_at: world.elapsed,
    });
    tracing::debug!(?kind, x = position.x, y = position.y, "Pickup spawned");
}

/// Resolve pickup collection for one tick.
pub(crate) fn collect(world: &mut World, events: &mut TickEvents) {
    let snapshot: Vec<Pickup> = world.pickups.clone();

    for pickup in snapshot {
        let collector = world.combatants.iter().position(|c| {
            c.alive && c.position.distance(pickup.position) < c.class.pickup_radius()
        });
        let Some(i) = collector else {
            continue;
        };
        let (id, class, side) = {
            let c = &world.combatants[i];
            (c.id, c.class, c.side)
        };

        match pickup.kind {
            PickupKind::Health => {
                world.combatants[i].health.heal(class.heal_amount());
            }
            PickupKind::Score => {
                world.match_state.add_score(side, SCORE_BONUS);
            }
            PickupKind::Ammo => {
                let c = &mut world.combatants[i];
                c.ammo = c.ammo.saturating_add(class.ammo_pickup());
            }
            PickupKind::Displacement => {
                let range = class.jitter_range();
                let jitter = Vec2::new(
                    world.rng.gen_range(-range..range),
                    world.rng.gen_range(-range..range),
                );
                let current = world.combatants[i].position;
                world.combatants[i].position =
                    clamp_position(&world.config, class, current + jitter);
            }
        }

        if world.remove_pickup(pickup.id) {
            events.collected.push(CollectedPickup {
                pickup: pickup.id,
                collector: id,
                kind: pickup.kind,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::combatant::{CombatantClass, Side};
    use crate::config::{ArenaConfig, GameMode};

    use super::*;

    fn open_world() -> World {
        let mut w = World::new(
            GameMode::Survival,
            ArenaConfig::default().with_seed(21).open(),
        );
        for c in &mut w.combatants {
            c.position = if c.side == Side::A {
                Vec2::new(-500.0, -500.0)
            } else {
                Vec2::new(500.0, 500.0)
            };
        }
        w
    }

    fn plant(world: &mut World, kind: PickupKind, position: Vec2) -> u64 {
        let id = world.allocate_id();
        world.pickups.push(Pickup {
            id,
            position,
            kind,
            spawned_at: world.elapsed,
        });
        id
    }

    #[test]
    fn test_spawn_respects_interval_and_bounds() {
        let mut w = open_world();
        // Drive many intervals; every spawn must land in the inner span
        for step in 1..200 {
            w.elapsed = step as f64 * 5.0;
            spawn(&mut w);
        }
        assert!(!w.pickups.is_empty());
        let span = w.config.grid_length * 0.8;
        for p in &w.pickups {
            assert!(p.position.x.abs() <= span);
            assert!(p.position.y.abs() <= span);
        }
    }

    #[test]
    fn test_spawn_skips_within_interval() {
        let mut w = open_world();
        w.elapsed = 1.0;
        spawn(&mut w);
        assert!(w.pickups.is_empty());
        assert_eq!(w.last_pickup_spawn, 0.0);
    }

    #[test]
    fn test_health_pickup_heals() {
        let mut w = open_world();
        let id = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        w.combatant_mut(id).unwrap().position = Vec2::ZERO;
        plant(&mut w, PickupKind::Health, Vec2::new(5.0, 0.0));

        let mut events = TickEvents::default();
        collect(&mut w, &mut events);

        assert_eq!(w.combatant(id).unwrap().health.current, 35);
        assert!(w.pickups.is_empty());
        assert_eq!(events.collected.len(), 1);
    }

    #[test]
    fn test_score_pickup_credits_side() {
        let mut w = open_world();
        let id = w.combatants.iter().find(|c| c.side == Side::B).unwrap().id;
        w.combatant_mut(id).unwrap().position = Vec2::ZERO;
        plant(&mut w, PickupKind::Score, Vec2::new(5.0, 0.0));

        let mut events = TickEvents::default();
        collect(&mut w, &mut events);

        assert_eq!(w.match_state.score_b, 2);
        assert_eq!(w.match_state.score_a, 0);
    }

    #[test]
    fn test_ammo_pickup_by_class() {
        let mut w = open_world();
        let vehicle = w
            .combatants
            .iter()
            .find(|c| c.side == Side::A && c.class == CombatantClass::Vehicle)
            .unwrap()
            .id;
        w.combatant_mut(vehicle).unwrap().position = Vec2::ZERO;
        plant(&mut w, PickupKind::Ammo, Vec2::new(5.0, 0.0));

        let mut events = TickEvents::default();
        collect(&mut w, &mut events);

        // Survival vehicles start with 6; +4 from the pickup
        assert_eq!(w.combatant(vehicle).unwrap().ammo, 10);
    }

    #[test]
    fn test_displacement_pickup_stays_in_bounds() {
        let mut w = open_world();
        let id = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        // Park the collector in a corner so the jitter presses outward
        w.combatant_mut(id).unwrap().position = Vec2::new(589.0, 589.0);
        plant(&mut w, PickupKind::Displacement, Vec2::new(588.0, 588.0));

        let mut events = TickEvents::default();
        collect(&mut w, &mut events);

        let pos = w.combatant(id).unwrap().position;
        assert!(pos.x.abs() <= 590.0);
        assert!(pos.y.abs() <= 590.0);
        assert_eq!(events.collected.len(), 1);
    }

    #[test]
    fn test_first_in_registry_order_collects() {
        let mut w = open_world();
        let ids: Vec<_> = w
            .combatants
            .iter()
            .filter(|c| c.side == Side::A)
            .map(|c| c.id)
            .collect();
        w.combatant_mut(ids[0]).unwrap().position = Vec2::new(4.0, 0.0);
        w.combatant_mut(ids[1]).unwrap().position = Vec2::new(-4.0, 0.0);
        plant(&mut w, PickupKind::Score, Vec2::ZERO);

        let mut events = TickEvents::default();
        collect(&mut w, &mut events);

        assert_eq!(events.collected.len(), 1);
        assert_eq!(events.collected[0].collector, ids[0]);
        // Exactly one effect: a single score bonus
        assert_eq!(w.match_state.score_a, 2);
    }

    #[test]
    fn test_double_removal_is_noop() {
        let mut w = open_world();
        let id = plant(&mut w, PickupKind::Score, Vec2::ZERO);
        assert!(w.remove_pickup(id));
        assert!(!w.remove_pickup(id));
    }

    #[test]
    fn test_dead_combatants_never_collect() {
        let mut w = open_world();
        let id = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        {
            let c = w.combatant_mut(id).unwrap();
            c.position = Vec2::ZERO;
            c.destroy();
        }
        plant(&mut w, PickupKind::Score, Vec2::new(5.0, 0.0));

        let mut events = TickEvents::default();
        collect(&mut w, &mut events);

        assert_eq!(w.pickups.len(), 1);
        assert!(events.collected.is_empty());
        assert_eq!(w.match_state.score_a, 0);
    }
}
