//! Match configuration: game modes and arena tuning.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// Movement applied per player movement intent, in world units.
pub const PLAYER_SPEED: f32 = 6.0;

/// AI steering step per frame, in world units.
pub const AI_SPEED: f32 = 0.2;

/// Base bullet speed; per-shooter multipliers apply on top.
pub const BULLET_SPEED: f32 = 50.0;

/// Bullet time-to-live in projectile-time seconds.
pub const BULLET_TTL: f32 = 10.5;

/// Distance from the shooter at which projectiles materialize.
pub const MUZZLE_OFFSET: f32 = 20.0;

/// Launch speed of area ordnance along the firing direction.
pub const ORDNANCE_SPEED: f32 = 80.0;

/// Blast radius of area ordnance.
pub const ORDNANCE_BLAST_RADIUS: f32 = 60.0;

/// Ordnance fuse in frame-time units (decremented a fixed amount per
/// frame).
pub const ORDNANCE_FUSE: f32 = 0.7;

/// Flight altitude of ordnance; only obstacles at least this tall can
/// intercept it.
pub const ORDNANCE_ALTITUDE: f32 = 10.0;

/// Footprint pad applied to obstacles when testing ordnance impact.
pub const ORDNANCE_OBSTACLE_PAD: f32 = 3.0;

/// Duration of the freeze modifier in seconds.
pub const FREEZE_DURATION: f64 = 5.0;

/// Degrees applied per bulk-rotation intent.
pub const BULK_ROTATE_STEP: f32 = 5.0;

/// The three match configurations selectable at startup.
///
/// The mode fixes which combatant classes spawn and what vehicles fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Troops only, bullets only.
    #[default]
    GunCombat,
    /// Vehicles only, firing area ordnance.
    BattleDrive,
    /// Mixed roster per side; vehicles fire area ordnance.
    Survival,
}

impl GameMode {
    /// Resolve the startup prompt selector (1/2/3).
    pub fn from_selector(selector: u8) -> Result<Self> {
        match selector {
            1 => Ok(Self::GunCombat),
            2 => Ok(Self::BattleDrive),
            3 => Ok(Self::Survival),
            other => Err(GameError::InvalidMode(other)),
        }
    }

    /// Human-readable mode label for the HUD.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GunCombat => "Gun Combat",
            Self::BattleDrive => "Battle Drive",
            Self::Survival => "Survival",
        }
    }

    /// Whether this mode fields troops.
    #[must_use]
    pub const fn spawns_troops(self) -> bool {
        matches!(self, Self::GunCombat | Self::Survival)
    }

    /// Whether this mode fields vehicles.
    #[must_use]
    pub const fn spawns_vehicles(self) -> bool {
        matches!(self, Self::BattleDrive | Self::Survival)
    }

    /// Whether vehicles fire area ordnance in this mode. In modes
    /// without vehicle combat they fall back to bullets when
    /// player-fired and stay silent under AI control.
    #[must_use]
    pub const fn vehicles_fire_ordnance(self) -> bool {
        matches!(self, Self::BattleDrive | Self::Survival)
    }

    /// Starting health for a troop in this mode.
    #[must_use]
    pub const fn troop_health(self) -> u32 {
        30
    }

    /// Starting ammunition for a troop in this mode.
    #[must_use]
    pub const fn troop_ammo(self) -> u32 {
        match self {
            Self::Survival => 25,
            _ => 30,
        }
    }

    /// Starting health for a vehicle in this mode.
    #[must_use]
    pub const fn vehicle_health(self) -> u32 {
        match self {
            Self::Survival => 75,
            _ => 80,
        }
    }

    /// Starting ammunition for a vehicle in this mode.
    #[must_use]
    pub const fn vehicle_ammo(self) -> u32 {
        match self {
            Self::Survival => 6,
            _ => 8,
        }
    }
}

/// Arena tuning knobs for procedural generation and pickup cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Half-extent of the square arena, centered at the origin.
    pub grid_length: f32,
    /// Minimum distance of generated features from the arena edge.
    pub placement_margin: f32,
    /// Target number of blocking obstacles.
    pub obstacle_target: u32,
    /// Placement attempts budgeted per obstacle before skipping it.
    pub obstacle_attempts: u32,
    /// Minimum clearance gap between obstacle footprints.
    pub obstacle_gap: f32,
    /// Target number of decorative ground-cover tufts.
    pub cover_target: u32,
    /// Placement attempts budgeted per tuft.
    pub cover_attempts: u32,
    /// Seconds between pickup spawn attempts.
    pub pickup_interval: f64,
    /// Probability that a spawn attempt produces a pickup.
    pub pickup_chance: f64,
    /// Seed for the world RNG.
    pub seed: u64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            grid_length: 600.0,
            placement_margin: 120.0,
            obstacle_target: 10,
            obstacle_attempts: 50,
            obstacle_gap: 8.0,
            cover_target: 150,
            cover_attempts: 50,
            pickup_interval: 4.0,
            pickup_chance: 0.7,
            seed: 12345,
        }
    }
}

impl ArenaConfig {
    /// Set the RNG seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the target obstacle count.
    #[must_use]
    pub const fn with_obstacle_target(mut self, target: u32) -> Self {
        self.obstacle_target = target;
        self
    }

    /// Set the target ground-cover count.
    #[must_use]
    pub const fn with_cover_target(mut self, target: u32) -> Self {
        self.cover_target = target;
        self
    }

    /// An empty arena: no obstacles, no cover. Useful in tests that
    /// need unobstructed sight lines.
    #[must_use]
    pub fn open(self) -> Self {
        self.with_obstacle_target(0).with_cover_target(0)
    }
}
