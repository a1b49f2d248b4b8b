//! Render plugin: draws the battlefield from world state every frame.
//!
//! Everything dynamic is drawn with immediate-mode gizmos straight
//! from the simulation world, so match resets need no entity
//! bookkeeping. Only the static ground plane is a sprite.

use bevy::prelude::*;

use arena_core::arena::{ObstacleDetail, ObstacleShape};
use arena_core::combatant::{CombatantClass, Side};
use arena_core::math::Vec2 as CoreVec2;
use arena_core::pickups::PickupKind;

use crate::simulation::{ExplosionEffects, SimSet, SimWorld, EXPLOSION_EFFECT_SECS};

/// Plugin for battlefield rendering.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ground)
            .add_systems(
                Update,
                (
                    draw_arena,
                    draw_pickups,
                    draw_combatants,
                    draw_projectiles,
                )
                    .in_set(SimSet::Render),
            );
    }
}

fn v(p: CoreVec2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

fn side_color(side: Side, class: CombatantClass) -> Color {
    match (side, class) {
        (Side::A, CombatantClass::Troop) => Color::srgb(0.2, 0.6, 1.0),
        (Side::B, CombatantClass::Troop) => Color::srgb(1.0, 0.2, 0.2),
        (Side::A, CombatantClass::Vehicle) => Color::srgb(0.1, 0.5, 0.1),
        (Side::B, CombatantClass::Vehicle) => Color::srgb(0.4, 0.1, 0.4),
    }
}

/// Spawns the arena floor and boundary frame.
fn spawn_ground(mut commands: Commands, sim: Res<SimWorld>) {
    let extent = sim.0.config.grid_length * 2.0;

    commands.spawn(SpriteBundle {
        sprite: Sprite {
            color: Color::srgb(0.12, 0.25, 0.08),
            custom_size: Some(Vec2::splat(extent)),
            ..default()
        },
        transform: Transform::from_translation(Vec3::new(0.0, 0.0, -1.0)),
        ..default()
    });

    tracing::info!("Spawned arena floor");
}

/// Draws obstacles, decorative detail, and ground cover.
fn draw_arena(sim: Res<SimWorld>, mut gizmos: Gizmos) {
    let world = &sim.0;
    let grid = world.config.grid_length;

    // Boundary logs
    gizmos.rect_2d(
        Vec2::ZERO,
        0.0,
        Vec2::splat(grid * 2.0),
        Color::srgb(0.55, 0.27, 0.07),
    );

    for tuft in &world.arena.cover {
        let base = v(tuft.position);
        for blade in &tuft.blades {
            let yaw = blade.yaw.to_radians();
            let length = (tuft.height + blade.height_offset) * 0.5;
            let tip = base + Vec2::new(yaw.cos(), yaw.sin()) * length;
            gizmos.line_2d(base, tip, Color::srgb(0.1, 0.6, 0.1));
        }
    }

    for ob in &world.arena.obstacles {
        let center = v(ob.center());
        let size = Vec2::new(ob.width(), ob.depth());
        match ob.shape {
            ObstacleShape::Block => {
                gizmos.rect_2d(center, 0.0, size, Color::srgb(0.7, 0.7, 0.7));
            }
            ObstacleShape::Pillar => {
                gizmos.circle_2d(center, size.x.min(size.y) / 2.0, Color::srgb(0.8, 0.5, 0.2));
                if let ObstacleDetail::Bark(rings) = &ob.detail {
                    for ring in rings {
                        let [r, g, b] = ring.color;
                        gizmos.circle_2d(center, ring.radius, Color::srgb(r, g, b));
                    }
                }
            }
            ObstacleShape::Boulder => {
                if let ObstacleDetail::Boulder { tint, gravel } = &ob.detail {
                    let [r, g, b] = *tint;
                    gizmos.circle_2d(center, ob.organic_radius(), Color::srgb(r, g, b));
                    for chip in gravel {
                        let [r, g, b] = chip.color;
                        gizmos.circle_2d(center + v(chip.offset), chip.size, Color::srgb(r, g, b));
                    }
                } else {
                    gizmos.circle_2d(center, ob.organic_radius(), Color::srgb(0.5, 0.5, 0.5));
                }
            }
            ObstacleShape::Tree => {
                // Trunk with a foliage crown
                gizmos.circle_2d(center, ob.organic_radius() * 0.3, Color::srgb(0.4, 0.2, 0.1));
                gizmos.circle_2d(center, ob.organic_radius(), Color::srgb(0.0, 0.6, 0.0));
            }
        }
    }
}

/// Draws living combatants with facing markers and health bars.
fn draw_combatants(sim: Res<SimWorld>, mut gizmos: Gizmos) {
    let world = &sim.0;
    let spawn_health = |class: CombatantClass| match class {
        CombatantClass::Troop => world.mode.troop_health(),
        CombatantClass::Vehicle => world.mode.vehicle_health(),
    };

    for c in world.iter_living() {
        let position = v(c.position);
        let color = side_color(c.side, c.class);
        let facing = c.facing.to_radians();
        let heading = Vec2::new(facing.cos(), facing.sin());

        match c.class {
            CombatantClass::Troop => {
                gizmos.circle_2d(position, c.class.collision_radius(), color);
                gizmos.line_2d(position, position + heading * 14.0, color);
            }
            CombatantClass::Vehicle => {
                gizmos.rect_2d(position, facing, Vec2::new(40.0, 28.0), color);
                // Barrel
                gizmos.line_2d(
                    position,
                    position + heading * 34.0,
                    Color::srgb(0.2, 0.2, 0.2),
                );
            }
        }

        draw_health_bar(&mut gizmos, position, c.health.current, spawn_health(c.class));
    }
}

/// Renders a health bar above a combatant.
fn draw_health_bar(gizmos: &mut Gizmos, position: Vec2, current: u32, spawn: u32) {
    const BAR_WIDTH: f32 = 30.0;
    const BAR_HEIGHT: f32 = 4.0;
    const BAR_PADDING: f32 = 24.0;

    let ratio = if spawn == 0 {
        0.0
    } else {
        (current as f32 / spawn as f32).min(1.0)
    };
    if ratio >= 1.0 {
        return;
    }

    let bar_center = position + Vec2::new(0.0, BAR_PADDING);

    // Background (dark)
    gizmos.rect_2d(
        bar_center,
        0.0,
        Vec2::new(BAR_WIDTH, BAR_HEIGHT),
        Color::srgba(0.2, 0.2, 0.2, 0.9),
    );

    let fill_color = if ratio > 0.5 {
        Color::srgba(0.0, 0.8, 0.0, 0.9)
    } else if ratio > 0.25 {
        Color::srgba(0.8, 0.6, 0.0, 0.9)
    } else {
        Color::srgba(0.8, 0.0, 0.0, 0.9)
    };

    let fill_width = BAR_WIDTH * ratio;
    if fill_width > 0.0 {
        let fill_center = Vec2::new(
            bar_center.x - BAR_WIDTH / 2.0 + fill_width / 2.0,
            bar_center.y,
        );
        gizmos.rect_2d(fill_center, 0.0, Vec2::new(fill_width, BAR_HEIGHT), fill_color);
    }
}

/// Draws bullets, ordnance, and detonation effects.
fn draw_projectiles(
    sim: Res<SimWorld>,
    time: Res<Time>,
    mut effects: ResMut<ExplosionEffects>,
    mut gizmos: Gizmos,
) {
    let world = &sim.0;

    for b in &world.bullets {
        gizmos.circle_2d(v(b.position), 2.2, Color::srgb(1.0, 1.0, 0.0));
    }

    for shell in &world.ordnance {
        if !shell.exploded {
            gizmos.circle_2d(v(shell.position), 3.0, Color::srgb(0.2, 0.2, 0.8));
        }
    }

    let dt = time.delta_seconds();
    effects.0.retain_mut(|e| {
        e.remaining -= dt;
        e.remaining > 0.0
    });
    for e in &effects.0 {
        let progress = 1.0 - e.remaining / EXPLOSION_EFFECT_SECS;
        let radius = e.radius * progress.max(0.2);
        let alpha = e.remaining / EXPLOSION_EFFECT_SECS;
        gizmos.circle_2d(e.position, radius, Color::srgba(1.0, 0.4, 0.0, alpha));
    }
}

/// Draws pickups colored by effect.
fn draw_pickups(sim: Res<SimWorld>, mut gizmos: Gizmos) {
    for p in &sim.0.pickups {
        let color = match p.kind {
            PickupKind::Health => Color::srgb(1.0, 0.0, 0.0),
            PickupKind::Score => Color::srgb(0.0, 1.0, 0.0),
            PickupKind::Ammo => Color::srgb(0.0, 0.0, 1.0),
            PickupKind::Displacement => Color::srgb(1.0, 1.0, 0.0),
        };
        gizmos.circle_2d(v(p.position), 6.0, color);
    }
}
