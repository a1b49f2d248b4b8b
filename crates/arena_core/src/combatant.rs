//! Combatant data model: sides, classes, health, and the entity record.
//!
//! Class-specific constants are resolved through the [`CombatantClass`]
//! discriminant stored on every combatant, never inferred from which
//! collection an entity happens to live in.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Unique identifier for combatants. Monotonically assigned, never
/// reused, stable for the lifetime of a match.
pub type EntityId = u64;

/// One of the two opposing factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The left-spawning side; player-controlled by default.
    A,
    /// The right-spawning side.
    B,
}

impl Side {
    /// The opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Single-letter label for the HUD.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

/// Combatant class. Determines every per-class constant: geometry,
/// separation, weapon timing, and pickup behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantClass {
    /// Infantry: small, quick cooldown, bullets.
    Troop,
    /// Armored vehicle: large, slow cooldown, area ordnance in
    /// applicable modes.
    Vehicle,
}

impl CombatantClass {
    /// Body radius used for obstacle-blocking tests.
    #[must_use]
    pub const fn collision_radius(self) -> f32 {
        match self {
            Self::Troop => 8.0,
            Self::Vehicle => 20.0,
        }
    }

    /// Altitude at which the body is tested against obstacle height
    /// windows.
    #[must_use]
    pub const fn movement_altitude(self) -> f32 {
        match self {
            Self::Troop => 0.0,
            Self::Vehicle => 8.0,
        }
    }

    /// Margin kept from the arena edge when clamping positions.
    #[must_use]
    pub const fn bounds_margin(self) -> f32 {
        match self {
            Self::Troop => 10.0,
            Self::Vehicle => 20.0,
        }
    }

    /// Radius within which a bullet registers a hit on this class.
    #[must_use]
    pub const fn hit_radius(self) -> f32 {
        match self {
            Self::Troop => 10.0,
            Self::Vehicle => 18.0,
        }
    }

    /// Minimum separation between two living entities of this class.
    #[must_use]
    pub const fn min_separation(self) -> f32 {
        match self {
            Self::Troop => 18.0,
            Self::Vehicle => 40.0,
        }
    }

    /// Displacement applied to an entity shoved aside by a mover.
    #[must_use]
    pub const fn push_amount(self) -> f32 {
        match self {
            Self::Troop => 8.0,
            Self::Vehicle => 12.0,
        }
    }

    /// Seconds between AI shots for this class.
    #[must_use]
    pub const fn fire_cooldown(self) -> f64 {
        match self {
            Self::Troop => 1.2,
            Self::Vehicle => 2.2,
        }
    }

    /// Bullet damage dealt by this class.
    #[must_use]
    pub const fn bullet_damage(self) -> u32 {
        match self {
            Self::Troop => 10,
            Self::Vehicle => 18,
        }
    }

    /// Altitude at which this class's bullets fly when player-fired.
    #[must_use]
    pub const fn muzzle_altitude(self) -> f32 {
        match self {
            Self::Troop => 8.0,
            Self::Vehicle => 12.0,
        }
    }

    /// Score credited to the killer's side for destroying this class.
    #[must_use]
    pub const fn kill_points(self) -> u32 {
        match self {
            Self::Troop => 1,
            Self::Vehicle => 2,
        }
    }

    /// Radius within which this class collects a pickup.
    #[must_use]
    pub const fn pickup_radius(self) -> f32 {
        match self {
            Self::Troop => 12.0,
            Self::Vehicle => 18.0,
        }
    }

    /// Health ceiling when collecting a health pickup.
    #[must_use]
    pub const fn heal_cap(self) -> u32 {
        match self {
            Self::Troop => 100,
            Self::Vehicle => 200,
        }
    }

    /// Health restored per health pickup.
    #[must_use]
    pub const fn heal_amount(self) -> u32 {
        match self {
            Self::Troop => 5,
            Self::Vehicle => 15,
        }
    }

    /// Ammunition restored per ammo pickup.
    #[must_use]
    pub const fn ammo_pickup(self) -> u32 {
        match self {
            Self::Troop => 12,
            Self::Vehicle => 4,
        }
    }

    /// Half-range of the random displacement pickup jitter.
    #[must_use]
    pub const fn jitter_range(self) -> f32 {
        match self {
            Self::Troop => 10.0,
            Self::Vehicle => 20.0,
        }
    }
}

/// Health points for a combatant.
///
/// `max` is the healing ceiling, not the spawn value: combatants spawn
/// below it and health pickups can raise them toward it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Current health points.
    pub current: u32,
    /// Healing ceiling.
    pub max: u32,
}

impl Health {
    /// Create health at a given starting value with a healing ceiling.
    #[must_use]
    pub const fn new(current: u32, max: u32) -> Self {
        Self { current, max }
    }

    /// Check if depleted.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.current == 0
    }

    /// Apply damage, saturating at zero. Returns the actual amount
    /// removed.
    pub fn apply_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.current);
        self.current = self.current.saturating_sub(actual);
        actual
    }

    /// Heal toward the ceiling. Returns the actual amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let headroom = self.max.saturating_sub(self.current);
        let actual = amount.min(headroom);
        self.current = self.current.saturating_add(actual);
        actual
    }

    /// Health as a fraction of the ceiling, for HUD bars.
    #[must_use]
    pub fn ratio(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// A troop or vehicle. Dead combatants stay in the registry with
/// `alive == false` and are skipped by every system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    /// Stable identity.
    pub id: EntityId,
    /// Class discriminant; read directly, never derived from storage.
    pub class: CombatantClass,
    /// Owning side.
    pub side: Side,
    /// Ground-plane position.
    pub position: Vec2,
    /// Facing angle in degrees, wrapped to [0, 360).
    pub facing: f32,
    /// Health points.
    pub health: Health,
    /// Remaining ammunition. Never decremented under unlimited ammo.
    pub ammo: u32,
    /// Liveness flag. Once false, permanently false.
    pub alive: bool,
    /// Simulation timestamp of the last AI shot, if any.
    pub last_fire: Option<f64>,
}

impl Combatant {
    /// Create a living combatant at a spawn position.
    #[must_use]
    pub fn new(
        id: EntityId,
        class: CombatantClass,
        side: Side,
        position: Vec2,
        health: u32,
        ammo: u32,
    ) -> Self {
        Self {
            id,
            class,
            side,
            position,
            facing: 0.0,
            health: Health::new(health, class.heal_cap()),
            ammo,
            alive: true,
            last_fire: None,
        }
    }

    /// Apply damage; marks the combatant dead when health reaches
    /// zero. Returns true if this call killed it.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.alive {
            return false;
        }
        self.health.apply_damage(amount);
        if self.health.is_depleted() {
            self.alive = false;
            return true;
        }
        false
    }

    /// Instantly destroy the combatant (blast damage). Returns true if
    /// it was alive.
    pub fn destroy(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.health.current = 0;
        self.alive = false;
        true
    }

    /// Spend one round of ammunition. Under unlimited ammo the count
    /// is untouched. Returns false when there is nothing to fire.
    pub fn try_expend_ammo(&mut self, unlimited: bool) -> bool {
        if unlimited {
            return true;
        }
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    /// Whether this entity's AI cooldown has elapsed.
    #[must_use]
    pub fn can_fire(&self, now: f64) -> bool {
        match self.last_fire {
            None => true,
            Some(t) => now - t > self.class.fire_cooldown(),
        }
    }
}
