//! Procedural arena generation and obstacle geometry.
//!
//! Generates a bounded square battlefield with:
//! - Non-overlapping blocking obstacles placed under a
//!   retry-with-rejection scheme
//! - Decorative ground cover rejected only against blocking obstacles
//! - Per-shape decorative detail carried for the renderer
//!
//! Obstacles are immutable for the duration of a match; the whole
//! arena is regenerated on every match reset.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ArenaConfig;
use crate::math::Vec2;

/// Shape category of a blocking obstacle.
///
/// Built shapes block across their full rectangular footprint; organic
/// shapes are treated as a circumscribed circle for collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleShape {
    /// Rectangular building block.
    Block,
    /// Tall cylindrical pillar.
    Pillar,
    /// Low rounded boulder.
    Boulder,
    /// Tree with a trunk-scaled footprint.
    Tree,
}

impl ObstacleShape {
    const ALL: [Self; 4] = [Self::Block, Self::Pillar, Self::Boulder, Self::Tree];

    /// Organic shapes collide as circles instead of boxes.
    #[must_use]
    pub const fn is_organic(self) -> bool {
        matches!(self, Self::Boulder | Self::Tree)
    }
}

/// A decorative ring drawn around a pillar's trunk.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarkRing {
    /// Height of the ring above the ground.
    pub height: f32,
    /// Ring radius, wobbled around the trunk radius.
    pub radius: f32,
    /// RGB tint.
    pub color: [f32; 3],
}

/// A small stone scattered around a boulder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravelChip {
    /// Offset from the boulder center.
    pub offset: Vec2,
    /// Chip radius.
    pub size: f32,
    /// RGB tint.
    pub color: [f32; 3],
}

/// Shape-specific decorative data consumed only by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum ObstacleDetail {
    /// No extra detail.
    #[default]
    Plain,
    /// Bark rings along a pillar.
    Bark(Vec<BarkRing>),
    /// Boulder tint and surrounding gravel.
    Boulder {
        /// RGB tint of the boulder body.
        tint: [f32; 3],
        /// Scattered gravel chips.
        gravel: Vec<GravelChip>,
    },
}

/// A blocking obstacle with an axis-aligned footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Footprint minimum corner.
    pub min: Vec2,
    /// Footprint maximum corner.
    pub max: Vec2,
    /// Height above the ground plane.
    pub height: f32,
    /// Shape category.
    pub shape: ObstacleShape,
    /// Decorative detail for the renderer.
    pub detail: ObstacleDetail,
}

impl Obstacle {
    /// Footprint center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Footprint width along x.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Footprint depth along y.
    #[must_use]
    pub fn depth(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Radius of the circumscribed circle used for organic shapes.
    #[must_use]
    pub fn organic_radius(&self) -> f32 {
        self.width().max(self.depth()) / 2.0
    }

    /// Whether a body at `point` with the given radius and altitude is
    /// blocked by this obstacle. Built shapes expand the footprint box
    /// by the radius; organic shapes use the circumscribed circle plus
    /// the radius. The vertical window is [-radius, height + radius].
    #[must_use]
    pub fn blocks(&self, point: Vec2, altitude: f32, radius: f32) -> bool {
        if altitude < -radius || altitude > self.height + radius {
            return false;
        }
        if self.shape.is_organic() {
            point.distance(self.center()) <= self.organic_radius() + radius
        } else {
            point.x >= self.min.x - radius
                && point.x <= self.max.x + radius
                && point.y >= self.min.y - radius
                && point.y <= self.max.y + radius
        }
    }

    /// Whether a bullet at `point` flying at `altitude` strikes this
    /// obstacle. No radius expansion; the vertical window is
    /// [0, height].
    #[must_use]
    pub fn intercepts_bullet(&self, point: Vec2, altitude: f32) -> bool {
        if altitude < 0.0 || altitude > self.height {
            return false;
        }
        if self.shape.is_organic() {
            point.distance(self.center()) <= self.organic_radius()
        } else {
            self.footprint_contains(point)
        }
    }

    /// Whether ordnance at `point` strikes this obstacle. The
    /// footprint is padded; obstacles shorter than the ordnance's
    /// flight altitude are overflown.
    #[must_use]
    pub fn intercepts_ordnance(&self, point: Vec2, flight_altitude: f32, pad: f32) -> bool {
        if self.height < flight_altitude {
            return false;
        }
        if self.shape.is_organic() {
            point.distance(self.center()) <= self.organic_radius() + pad
        } else {
            point.x >= self.min.x - pad
                && point.x <= self.max.x + pad
                && point.y >= self.min.y - pad
                && point.y <= self.max.y + pad
        }
    }

    /// Exact rectangular footprint test, independent of shape. Used by
    /// the line-of-obstruction sampler.
    #[must_use]
    pub fn footprint_contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// AABB overlap test with both footprints expanded by `gap` on all
    /// sides.
    #[must_use]
    pub fn overlaps_with_gap(&self, other: &Self, gap: f32) -> bool {
        self.min.x - gap < other.max.x + gap
            && self.max.x + gap > other.min.x - gap
            && self.min.y - gap < other.max.y + gap
            && self.max.y + gap > other.min.y - gap
    }
}

/// A single blade in a ground-cover tuft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blade {
    /// Yaw of the blade in degrees.
    pub yaw: f32,
    /// Height offset from the tuft's base height.
    pub height_offset: f32,
}

/// A decorative, non-blocking tuft of ground cover.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTuft {
    /// Position on the ground plane.
    pub position: Vec2,
    /// Base blade height.
    pub height: f32,
    /// Individual blades.
    pub blades: Vec<Blade>,
}

/// Radius used when rejection-testing ground cover against obstacles.
const TUFT_RADIUS: f32 = 3.0;

/// The generated battlefield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Arena {
    /// Blocking obstacles.
    pub obstacles: Vec<Obstacle>,
    /// Decorative ground cover.
    pub cover: Vec<GroundTuft>,
}

impl Arena {
    /// Generate a fresh arena. Placement attempts that exhaust their
    /// budget skip that feature, so the final counts may fall short of
    /// the configured targets.
    pub fn generate<R: Rng>(config: &ArenaConfig, rng: &mut R) -> Self {
        let mut obstacles: Vec<Obstacle> = Vec::with_capacity(config.obstacle_target as usize);

        for _ in 0..config.obstacle_target {
            for _ in 0..config.obstacle_attempts {
                let candidate = random_obstacle(config, rng);
                let overlaps = obstacles
                    .iter()
                    .any(|ob| candidate.overlaps_with_gap(ob, config.obstacle_gap));
                if !overlaps {
                    obstacles.push(candidate);
                    break;
                }
            }
        }

        let mut cover: Vec<GroundTuft> = Vec::with_capacity(config.cover_target as usize);
        let span = config.grid_length - config.placement_margin;

        for _ in 0..config.cover_target {
            for _ in 0..config.cover_attempts {
                let position = Vec2::new(rng.gen_range(-span..=span), rng.gen_range(-span..=span));
                let blocked = obstacles
                    .iter()
                    .any(|ob| ob.blocks(position, 0.0, TUFT_RADIUS));
                if !blocked {
                    let blade_count = rng.gen_range(2..=3);
                    let blades = (0..blade_count)
                        .map(|_| Blade {
                            yaw: rng.gen_range(0.0..360.0),
                            height_offset: rng.gen_range(-2.0..2.0),
                        })
                        .collect();
                    cover.push(GroundTuft {
                        position,
                        height: rng.gen_range(8.0..16.0),
                        blades,
                    });
                    break;
                }
            }
        }

        tracing::info!(
            obstacles = obstacles.len(),
            cover = cover.len(),
            "Arena generated"
        );

        Self { obstacles, cover }
    }

    /// Whether a body at `point` is blocked by any obstacle.
    #[must_use]
    pub fn blocks(&self, point: Vec2, altitude: f32, radius: f32) -> bool {
        self.obstacles
            .iter()
            .any(|ob| ob.blocks(point, altitude, radius))
    }

    /// Line-of-obstruction test between two points: samples six equal
    /// segments and checks each sample against every rectangular
    /// footprint. An approximation, not true ray casting; organic
    /// shapes obstruct with their full bounding box here.
    #[must_use]
    pub fn segment_obstructed(&self, from: Vec2, to: Vec2) -> bool {
        const SEGMENTS: u32 = 6;
        for i in 0..=SEGMENTS {
            let t = i as f32 / SEGMENTS as f32;
            let sample = from.lerp(to, t);
            if self
                .obstacles
                .iter()
                .any(|ob| ob.footprint_contains(sample))
            {
                return true;
            }
        }
        false
    }
}

fn random_obstacle<R: Rng>(config: &ArenaConfig, rng: &mut R) -> Obstacle {
    let span = config.grid_length - config.placement_margin;
    let cx = rng.gen_range(-span..=span);
    let cy = rng.gen_range(-span..=span);
    let shape = ObstacleShape::ALL[rng.gen_range(0..ObstacleShape::ALL.len())];

    let (w, d, height) = match shape {
        ObstacleShape::Block => (
            rng.gen_range(40.0..70.0),
            rng.gen_range(40.0..70.0),
            rng.gen_range(30.0..80.0),
        ),
        ObstacleShape::Pillar => (
            rng.gen_range(30.0..50.0),
            rng.gen_range(30.0..50.0),
            rng.gen_range(60.0..120.0),
        ),
        ObstacleShape::Boulder => (
            rng.gen_range(50.0..100.0),
            rng.gen_range(50.0..100.0),
            rng.gen_range(20.0..40.0),
        ),
        ObstacleShape::Tree => (
            rng.gen_range(20.0..40.0),
            rng.gen_range(20.0..40.0),
            rng.gen_range(80.0..160.0),
        ),
    };

    let detail = match shape {
        ObstacleShape::Pillar => ObstacleDetail::Bark(bark_rings(w, d, height, rng)),
        ObstacleShape::Boulder => ObstacleDetail::Boulder {
            tint: [
                rng.gen_range(0.3..0.7),
                rng.gen_range(0.3..0.7),
                rng.gen_range(0.3..0.7),
            ],
            gravel: gravel_chips(w, d, rng),
        },
        _ => ObstacleDetail::Plain,
    };

    Obstacle {
        min: Vec2::new(cx - w / 2.0, cy - d / 2.0),
        max: Vec2::new(cx + w / 2.0, cy + d / 2.0),
        height,
        shape,
        detail,
    }
}

fn bark_rings<R: Rng>(w: f32, d: f32, height: f32, rng: &mut R) -> Vec<BarkRing> {
    let count = rng.gen_range(8..=12);
    (0..count)
        .map(|j| BarkRing {
            height: (j as f32 / (count - 1) as f32) * height,
            radius: w.min(d) / 2.0 + rng.gen_range(-0.5..0.5),
            color: [
                rng.gen_range(0.6..0.9),
                rng.gen_range(0.3..0.5),
                rng.gen_range(0.1..0.3),
            ],
        })
        .collect()
}

fn gravel_chips<R: Rng>(w: f32, d: f32, rng: &mut R) -> Vec<GravelChip> {
    let count = rng.gen_range(5..=10);
    (0..count)
        .map(|_| {
            let ring = w.max(d) / 2.0 + rng.gen_range(5.0..15.0);
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            GravelChip {
                offset: Vec2::new(angle.cos() * ring, angle.sin() * ring),
                size: rng.gen_range(2.0..5.0),
                color: [
                    rng.gen_range(0.3..0.5),
                    rng.gen_range(0.3..0.5),
                    rng.gen_range(0.3..0.5),
                ],
            }
        })
        .collect()
}
