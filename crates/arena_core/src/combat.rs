//! Combat resolution: bullet and ordnance lifecycle, hit detection,
//! and damage application.
//!
//! Bullets advance by a fixed per-frame step that differs by owner
//! (the player-controlled side's projectiles step 0.05, all others
//! 0.02 - a deliberate balance asymmetry carried over intact). A
//! bullet hits at most one combatant per tick; the first living enemy
//! in registry order wins ties. Ordnance detonates on obstacle impact
//! or fuse expiry and applies blast damage exactly once.

use serde::{Deserialize, Serialize};

use crate::combatant::{CombatantClass, Side};
use crate::config::{
    BULLET_SPEED, BULLET_TTL, MUZZLE_OFFSET, ORDNANCE_ALTITUDE, ORDNANCE_BLAST_RADIUS,
    ORDNANCE_FUSE, ORDNANCE_OBSTACLE_PAD, ORDNANCE_SPEED,
};
use crate::math::Vec2;
use crate::simulation::{Explosion, TickEvents};
use crate::world::World;

/// Per-frame time step for bullets owned by the player-controlled
/// side.
const PLAYER_PROJECTILE_STEP: f32 = 0.05;

/// Per-frame time step for all other bullets.
const ENEMY_PROJECTILE_STEP: f32 = 0.02;

/// Muzzle-velocity multiplier for player-fired bullets.
const PLAYER_BULLET_FACTOR: f32 = 1.5;

/// Muzzle-velocity multiplier for AI-fired bullets.
const AI_BULLET_FACTOR: f32 = 5.0;

/// Altitude of AI-fired bullets.
const AI_BULLET_ALTITUDE: f32 = 8.0;

/// Fraction of its velocity an ordnance shell advances per frame.
const ORDNANCE_ADVANCE: f32 = 0.2;

/// Fuse decrement per frame.
const ORDNANCE_FUSE_STEP: f32 = 0.02;

/// A bullet in flight. Transient: owned solely by the combat
/// resolver's list and removed on expiry, exit, or impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    /// Current position.
    pub position: Vec2,
    /// Unit flight direction.
    pub direction: Vec2,
    /// Scalar speed.
    pub speed: f32,
    /// Flight altitude for obstacle interception.
    pub altitude: f32,
    /// Owning side.
    pub side: Side,
    /// Damage on impact.
    pub damage: u32,
    /// Remaining time-to-live in projectile-time seconds.
    pub ttl: f32,
}

impl Bullet {
    /// Create a bullet with explicit parameters.
    #[must_use]
    pub const fn new(
        position: Vec2,
        direction: Vec2,
        speed: f32,
        altitude: f32,
        side: Side,
        damage: u32,
    ) -> Self {
        Self {
            position,
            direction,
            speed,
            altitude,
            side,
            damage,
            ttl: BULLET_TTL,
        }
    }

    /// Bullet emitted by a player-side fire command.
    #[must_use]
    pub(crate) fn player_fired(
        class: CombatantClass,
        side: Side,
        position: Vec2,
        direction: Vec2,
    ) -> Self {
        Self::new(
            position,
            direction,
            BULLET_SPEED * PLAYER_BULLET_FACTOR,
            class.muzzle_altitude(),
            side,
            class.bullet_damage(),
        )
    }

    /// Bullet emitted by an AI shooter.
    #[must_use]
    pub(crate) fn ai_fired(
        class: CombatantClass,
        side: Side,
        position: Vec2,
        direction: Vec2,
    ) -> Self {
        Self::new(
            position,
            direction,
            BULLET_SPEED * AI_BULLET_FACTOR,
            AI_BULLET_ALTITUDE,
            side,
            class.bullet_damage(),
        )
    }
}

/// An area-ordnance shell. Travels until obstacle impact or fuse
/// expiry, detonates once, lingers one tick as an expiring effect,
/// then is removed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ordnance {
    /// Current position.
    pub position: Vec2,
    /// Velocity vector.
    pub velocity: Vec2,
    /// Owning side.
    pub side: Side,
    /// Blast radius on detonation.
    pub blast_radius: f32,
    /// Remaining fuse.
    pub fuse: f32,
    /// Set on detonation; guarantees at most one damage application.
    pub exploded: bool,
}

impl Ordnance {
    /// Launch a shell with the standard blast radius and fuse.
    #[must_use]
    pub fn launch(position: Vec2, velocity: Vec2, side: Side) -> Self {
        Self {
            position,
            velocity,
            side,
            blast_radius: ORDNANCE_BLAST_RADIUS,
            fuse: ORDNANCE_FUSE,
            exploded: false,
        }
    }
}

/// Fire every living player-side combatant that can pay the ammo
/// cost. Aim follows current facing, or the nearest living enemy when
/// auto-target is active.
pub(crate) fn fire_player_weapons(world: &mut World) {
    let unlimited = world.modifiers.unlimited_ammo;
    let auto_target = world.modifiers.auto_target;
    let shooter_indices: Vec<usize> = world
        .combatants
        .iter()
        .enumerate()
        .filter(|(_, c)| c.alive && c.side == world.player_side)
        .map(|(i, _)| i)
        .collect();

    for i in shooter_indices {
        if !world.combatants[i].try_expend_ammo(unlimited) {
            continue;
        }
        let (class, side, position, facing) = {
            let c = &world.combatants[i];
            (c.class, c.side, c.position, c.facing)
        };

        let aim = if auto_target {
            world
                .nearest_living_enemy(side, position)
                .map_or(facing, |(_, target)| (target - position).to_degrees())
        } else {
            facing
        };

        let direction = Vec2::from_degrees(aim);
        let muzzle = position + direction * MUZZLE_OFFSET;

        if class == CombatantClass::Vehicle && world.mode.vehicles_fire_ordnance() {
            world
                .ordnance
                .push(Ordnance::launch(muzzle, direction * ORDNANCE_SPEED, side));
        } else {
            world
                .bullets
                .push(Bullet::player_fired(class, side, muzzle, direction));
        }
    }
}

/// Advance every bullet and cull on TTL expiry, bounds exit, or
/// obstacle impact.
pub(crate) fn update_bullets(world: &mut World) {
    let player_side = world.player_side;
    let grid = world.config.grid_length;
    let World { bullets, arena, .. } = world;

    bullets.retain_mut(|b| {
        let step = if b.side == player_side {
            PLAYER_PROJECTILE_STEP
        } else {
            ENEMY_PROJECTILE_STEP
        };
        b.position += b.direction * (b.speed * step);
        b.ttl -= step;

        if b.ttl <= 0.0 {
            return false;
        }
        if b.position.x.abs() > grid || b.position.y.abs() > grid {
            return false;
        }
        !arena
            .obstacles
            .iter()
            .any(|ob| ob.intercepts_bullet(b.position, b.altitude))
    });
}

/// Test every surviving bullet against living enemy combatants,
/// consuming the bullet on its first hit.
pub(crate) fn resolve_bullet_hits(world: &mut World, events: &mut TickEvents) {
    let bullets = std::mem::take(&mut world.bullets);
    let mut surviving = Vec::with_capacity(bullets.len());

    'bullets: for bullet in bullets {
        for idx in 0..world.combatants.len() {
            let (alive, class, side, position, id) = {
                let c = &world.combatants[idx];
                (c.alive, c.class, c.side, c.position, c.id)
            };
            if !alive || side == bullet.side {
                continue;
            }
            if world.arena.segment_obstructed(bullet.position, position) {
                continue;
            }
            if bullet.position.distance(position) < class.hit_radius() {
                let killed = world.combatants[idx].take_damage(bullet.damage);
                if killed {
                    world
                        .match_state
                        .add_score(bullet.side, class.kill_points());
                    events.deaths.push(id);
                    tracing::debug!(victim = id, by = bullet.side.label(), "Combatant shot down");
                }
                // Consumed: no further targets this tick
                continue 'bullets;
            }
        }
        surviving.push(bullet);
    }

    world.bullets = surviving;
}

/// Advance ordnance, detonating on obstacle impact or fuse expiry.
/// Shells that detonated last tick are removed here.
pub(crate) fn update_ordnance(world: &mut World, events: &mut TickEvents) {
    let shells = std::mem::take(&mut world.ordnance);
    let mut surviving = Vec::with_capacity(shells.len());

    for mut shell in shells {
        if shell.exploded {
            // Lingered one tick as the expiring effect; gone now
            continue;
        }

        shell.position += shell.velocity * ORDNANCE_ADVANCE;

        let impact = world.arena.obstacles.iter().any(|ob| {
            ob.intercepts_ordnance(shell.position, ORDNANCE_ALTITUDE, ORDNANCE_OBSTACLE_PAD)
        });

        if impact {
            detonate(world, &mut shell, events);
        } else {
            shell.fuse -= ORDNANCE_FUSE_STEP;
            if shell.fuse <= 0.0 {
                detonate(world, &mut shell, events);
            }
        }

        surviving.push(shell);
    }

    world.ordnance = surviving;
}

/// Apply one-shot blast damage: every living enemy within the blast
/// radius is destroyed outright.
fn detonate(world: &mut World, shell: &mut Ordnance, events: &mut TickEvents) {
    shell.exploded = true;

    for idx in 0..world.combatants.len() {
        let (alive, class, side, position, id) = {
            let c = &world.combatants[idx];
            (c.alive, c.class, c.side, c.position, c.id)
        };
        if !alive || side == shell.side {
            continue;
        }
        if position.distance(shell.position) <= shell.blast_radius {
            world.combatants[idx].destroy();
            world.match_state.add_score(shell.side, class.kill_points());
            events.deaths.push(id);
        }
    }

    events.explosions.push(Explosion {
        position: shell.position,
        radius: shell.blast_radius,
        side: shell.side,
    });
    tracing::debug!(
        x = shell.position.x,
        y = shell.position.y,
        by = shell.side.label(),
        "Ordnance detonated"
    );
}

#[cfg(test)]
mod tests {
    use crate::config::{ArenaConfig, GameMode};

    use super::*;

    fn open_world(mode: GameMode) -> World {
        let mut w = World::new(mode, ArenaConfig::default().with_seed(3).open());
        // Keep formations out of each other's way
        for c in &mut w.combatants {
            c.position = if c.side == Side::A {
                Vec2::new(-500.0, -500.0)
            } else {
                Vec2::new(500.0, 500.0)
            };
        }
        w
    }

    #[test]
    fn test_bullet_step_asymmetry() {
        let mut w = open_world(GameMode::GunCombat);
        w.bullets.push(Bullet::new(
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            100.0,
            8.0,
            Side::A,
            10,
        ));
        w.bullets.push(Bullet::new(
            Vec2::ZERO,
            Vec2::new(1.0, 0.0),
            100.0,
            8.0,
            Side::B,
            10,
        ));
        update_bullets(&mut w);
        // Player side steps 0.05, the other side 0.02
        assert_eq!(w.bullets[0].position.x, 5.0);
        assert_eq!(w.bullets[1].position.x, 2.0);
    }

    #[test]
    fn test_bullet_ttl_expiry() {
        let mut w = open_world(GameMode::GunCombat);
        let mut b = Bullet::new(Vec2::ZERO, Vec2::new(0.0, 1.0), 0.0, 8.0, Side::A, 10);
        b.ttl = 0.08;
        w.bullets.push(b);
        update_bullets(&mut w);
        assert_eq!(w.bullets.len(), 1);
        assert!(w.bullets[0].ttl < b.ttl);
        update_bullets(&mut w);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_bullet_exits_bounds() {
        let mut w = open_world(GameMode::GunCombat);
        w.bullets.push(Bullet::new(
            Vec2::new(599.0, 0.0),
            Vec2::new(1.0, 0.0),
            100.0,
            8.0,
            Side::A,
            10,
        ));
        update_bullets(&mut w);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_bullet_consumed_on_first_hit_only() {
        let mut w = open_world(GameMode::GunCombat);
        let ids: Vec<_> = w
            .combatants
            .iter()
            .filter(|c| c.side == Side::B)
            .map(|c| c.id)
            .collect();
        // Two enemies stacked inside the same hit radius
        w.combatant_mut(ids[0]).unwrap().position = Vec2::new(5.0, 0.0);
        w.combatant_mut(ids[1]).unwrap().position = Vec2::new(7.0, 0.0);
        w.bullets
            .push(Bullet::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 75.0, 8.0, Side::A, 10));

        let mut events = TickEvents::default();
        resolve_bullet_hits(&mut w, &mut events);

        assert!(w.bullets.is_empty());
        // First in registry order took the damage; the second is untouched
        assert_eq!(w.combatant(ids[0]).unwrap().health.current, 20);
        assert_eq!(w.combatant(ids[1]).unwrap().health.current, 30);
    }

    #[test]
    fn test_bullet_ignores_same_side_and_dead() {
        let mut w = open_world(GameMode::GunCombat);
        let friendly = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        w.combatant_mut(friendly).unwrap().position = Vec2::new(5.0, 0.0);
        let enemy = w.combatants.iter().find(|c| c.side == Side::B).unwrap().id;
        {
            let e = w.combatant_mut(enemy).unwrap();
            e.position = Vec2::new(7.0, 0.0);
            e.destroy();
        }
        w.bullets
            .push(Bullet::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 75.0, 8.0, Side::A, 10));

        let mut events = TickEvents::default();
        resolve_bullet_hits(&mut w, &mut events);

        // Nothing hit: the bullet survives
        assert_eq!(w.bullets.len(), 1);
        assert_eq!(w.combatant(friendly).unwrap().health.current, 30);
    }

    #[test]
    fn test_kill_credits_score() {
        let mut w = open_world(GameMode::Survival);
        let troop = w
            .combatants
            .iter()
            .find(|c| c.side == Side::B && c.class == CombatantClass::Troop)
            .unwrap()
            .id;
        w.combatant_mut(troop).unwrap().position = Vec2::new(5.0, 0.0);
        w.combatant_mut(troop).unwrap().health.current = 10;
        w.bullets
            .push(Bullet::new(Vec2::ZERO, Vec2::new(1.0, 0.0), 75.0, 8.0, Side::A, 10));

        let mut events = TickEvents::default();
        resolve_bullet_hits(&mut w, &mut events);

        assert_eq!(w.match_state.score_a, 1);
        assert_eq!(events.deaths, vec![troop]);
        assert!(!w.combatant(troop).unwrap().alive);
    }

    #[test]
    fn test_ordnance_detonates_once_then_expires() {
        let mut w = open_world(GameMode::BattleDrive);
        let victim = w.combatants.iter().find(|c| c.side == Side::B).unwrap().id;
        w.combatant_mut(victim).unwrap().position = Vec2::new(30.0, 0.0);

        let mut shell = Ordnance::launch(Vec2::ZERO, Vec2::ZERO, Side::A);
        shell.fuse = 0.01;
        w.ordnance.push(shell);

        let mut events = TickEvents::default();
        update_ordnance(&mut w, &mut events);

        assert_eq!(events.explosions.len(), 1);
        assert!(!w.combatant(victim).unwrap().alive);
        assert_eq!(w.match_state.score_a, 2);
        // Shell lingers one tick as the effect
        assert_eq!(w.ordnance.len(), 1);
        assert!(w.ordnance[0].exploded);

        // Second pass: no further damage, shell removed
        let score_before = w.match_state.score_a;
        let mut events = TickEvents::default();
        update_ordnance(&mut w, &mut events);
        assert!(w.ordnance.is_empty());
        assert!(events.explosions.is_empty());
        assert_eq!(w.match_state.score_a, score_before);
    }

    #[test]
    fn test_ordnance_blast_spares_out_of_radius() {
        let mut w = open_world(GameMode::BattleDrive);
        let ids: Vec<_> = w
            .combatants
            .iter()
            .filter(|c| c.side == Side::B)
            .map(|c| c.id)
            .collect();
        w.combatant_mut(ids[0]).unwrap().position = Vec2::new(59.0, 0.0);
        w.combatant_mut(ids[1]).unwrap().position = Vec2::new(61.0, 0.0);

        let mut shell = Ordnance::launch(Vec2::ZERO, Vec2::ZERO, Side::A);
        shell.fuse = 0.01;
        w.ordnance.push(shell);

        let mut events = TickEvents::default();
        update_ordnance(&mut w, &mut events);

        assert!(!w.combatant(ids[0]).unwrap().alive);
        assert!(w.combatant(ids[1]).unwrap().alive);
    }

    #[test]
    fn test_player_fire_spends_ammo() {
        let mut w = open_world(GameMode::GunCombat);
        fire_player_weapons(&mut w);
        assert_eq!(w.bullets.len(), 6);
        assert!(w
            .combatants
            .iter()
            .filter(|c| c.side == Side::A)
            .all(|c| c.ammo == 29));

        w.modifiers.unlimited_ammo = true;
        fire_player_weapons(&mut w);
        assert_eq!(w.bullets.len(), 12);
        assert!(w
            .combatants
            .iter()
            .filter(|c| c.side == Side::A)
            .all(|c| c.ammo == 29));
    }

    #[test]
    fn test_player_fire_empty_ammo_is_silent() {
        let mut w = open_world(GameMode::GunCombat);
        for c in w.combatants.iter_mut().filter(|c| c.side == Side::A) {
            c.ammo = 0;
        }
        fire_player_weapons(&mut w);
        assert!(w.bullets.is_empty());
    }

    #[test]
    fn test_vehicles_fire_ordnance_in_armored_modes() {
        let mut w = open_world(GameMode::BattleDrive);
        fire_player_weapons(&mut w);
        assert!(w.bullets.is_empty());
        assert_eq!(w.ordnance.len(), 6);
    }

    #[test]
    fn test_auto_target_aims_at_nearest_enemy() {
        let mut w = open_world(GameMode::GunCombat);
        // One shooter due south of one enemy, facing east
        let shooter = w.combatants.iter().find(|c| c.side == Side::A).unwrap().id;
        {
            let s = w.combatant_mut(shooter).unwrap();
            s.position = Vec2::new(0.0, 0.0);
            s.facing = 0.0;
        }
        let enemy = w.combatants.iter().find(|c| c.side == Side::B).unwrap().id;
        w.combatant_mut(enemy).unwrap().position = Vec2::new(0.0, 100.0);
        // Everyone else far away and out of ammo
        for c in &mut w.combatants {
            if c.id != shooter && c.id != enemy {
                c.ammo = 0;
                c.position = Vec2::new(-590.0, -590.0);
            }
        }

        w.modifiers.auto_target = true;
        fire_player_weapons(&mut w);

        assert_eq!(w.bullets.len(), 1);
        let b = &w.bullets[0];
        // Aimed straight up at the enemy, not along facing
        assert!(b.direction.y > 0.99, "direction was {:?}", b.direction);
    }
}
