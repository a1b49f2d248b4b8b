//! The world aggregate: entity registry, arena, match state, and the
//! control-input surface.
//!
//! All shared mutable state lives here and is passed by reference into
//! each system function every tick; there are no ambient statics. The
//! registry keeps dead combatants in storage with stable ids - they are
//! skipped by every system but remain visible to the renderer.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::combat::{Bullet, Ordnance};
use crate::combatant::{Combatant, CombatantClass, EntityId, Side};
use crate::config::{ArenaConfig, GameMode};
use crate::error::{GameError, Result};
use crate::match_state::MatchState;
use crate::math::Vec2;
use crate::pickups::Pickup;

/// Number of combatants of each spawned class per side.
const FORMATION_SIZE: u32 = 6;

/// Distance of each side's formation column from its arena edge.
const FORMATION_EDGE_OFFSET: f32 = 80.0;

/// Half-range of the per-entity formation x jitter.
const FORMATION_JITTER: f32 = 60.0;

/// Global modifiers toggled by external control input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Modifiers {
    /// Ammo expenditure never decrements while set.
    pub unlimited_ammo: bool,
    /// Player fire aims at the nearest enemy instead of current facing.
    pub auto_target: bool,
    /// AI is suspended until this simulation timestamp.
    pub freeze_until: f64,
}

impl Modifiers {
    /// Whether the freeze modifier is currently active.
    #[must_use]
    pub fn is_frozen(&self, now: f64) -> bool {
        now < self.freeze_until
    }
}

/// Discrete control commands from the host environment.
///
/// Commands are sampled asynchronously by the host and applied
/// atomically at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerCommand {
    /// Move every living player-side combatant along a unit vector.
    Move(Vec2),
    /// Fire all living player-side combatants simultaneously.
    Fire,
    /// Rotate the facing of every living combatant on both sides.
    RotateAll(f32),
    /// Toggle the unlimited-ammo modifier.
    ToggleUnlimitedAmmo,
    /// Toggle the auto-target modifier.
    ToggleAutoTarget,
    /// Suspend AI for the configured freeze duration.
    Freeze,
    /// Full match reset.
    Reset,
}

/// HUD snapshot consumed read-only by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HudState {
    /// Mode label.
    pub mode_label: &'static str,
    /// Side A score.
    pub score_a: u32,
    /// Side B score.
    pub score_b: u32,
    /// Side A living count.
    pub alive_a: usize,
    /// Side B living count.
    pub alive_b: usize,
    /// Unlimited-ammo toggle state.
    pub unlimited_ammo: bool,
    /// Auto-target toggle state.
    pub auto_target: bool,
    /// Whether the freeze modifier is active right now.
    pub frozen: bool,
    /// Whether the match has ended.
    pub game_over: bool,
    /// Winner, once decided.
    pub winner: Option<Side>,
}

/// All world state for one match.
#[derive(Debug, Clone)]
pub struct World {
    /// Arena tuning used for (re)generation.
    pub config: ArenaConfig,
    /// Match mode chosen at startup; fixed for the session.
    pub mode: GameMode,
    /// The locally controlled side.
    pub player_side: Side,
    /// Generated battlefield.
    pub arena: Arena,
    /// Combatant registry. Spawning pushes all troops before all
    /// vehicles so that index order doubles as the class-priority
    /// iteration order used for tie-breaks.
    pub combatants: Vec<Combatant>,
    /// Active bullets.
    pub bullets: Vec<Bullet>,
    /// Active area ordnance.
    pub ordnance: Vec<Ordnance>,
    /// Uncollected pickups.
    pub pickups: Vec<Pickup>,
    /// Scores and terminal state.
    pub match_state: MatchState,
    /// Global modifiers.
    pub modifiers: Modifiers,
    /// Simulation clock in seconds, advanced by the host each tick.
    pub elapsed: f64,
    pub(crate) rng: SmallRng,
    pub(crate) last_pickup_spawn: f64,
    pub(crate) commands: Vec<PlayerCommand>,
    next_id: EntityId,
}

impl World {
    /// Create a world for the given mode and generate its first arena.
    #[must_use]
    pub fn new(mode: GameMode, config: ArenaConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let arena = Arena::generate(&config, &mut rng);
        let mut world = Self {
            config,
            mode,
            player_side: Side::A,
            arena,
            combatants: Vec::new(),
            bullets: Vec::new(),
            ordnance: Vec::new(),
            pickups: Vec::new(),
            match_state: MatchState::new(),
            modifiers: Modifiers::default(),
            elapsed: 0.0,
            rng,
            last_pickup_spawn: 0.0,
            commands: Vec::new(),
            next_id: 1,
        };
        world.spawn_formations();
        world
    }

    /// Queue a control command for the next tick.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.commands.push(command);
    }

    /// Full match reset: new arena, fresh formations, cleared scores
    /// and modifiers. Entity ids keep counting up; ids are never
    /// reused, even across resets.
    pub fn reset(&mut self) {
        tracing::info!(mode = self.mode.label(), "Match reset");
        self.arena = Arena::generate(&self.config, &mut self.rng);
        self.combatants.clear();
        self.bullets.clear();
        self.ordnance.clear();
        self.pickups.clear();
        self.match_state = MatchState::new();
        self.modifiers = Modifiers::default();
        self.elapsed = 0.0;
        self.last_pickup_spawn = 0.0;
        self.spawn_formations();
    }

    /// Look up a combatant by id.
    #[must_use]
    pub fn combatant(&self, id: EntityId) -> Option<&Combatant> {
        self.combatants.iter().find(|c| c.id == id)
    }

    /// Look up a combatant by id, mutably.
    pub fn combatant_mut(&mut self, id: EntityId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Look up a combatant by id, failing on ids that were never
    /// issued or belong to another world.
    pub fn require_combatant(&self, id: EntityId) -> Result<&Combatant> {
        self.combatant(id).ok_or(GameError::CombatantNotFound(id))
    }

    /// Living combatants of one side, across both classes.
    #[must_use]
    pub fn living_count(&self, side: Side) -> usize {
        self.combatants
            .iter()
            .filter(|c| c.alive && c.side == side)
            .count()
    }

    /// Iterate living combatants in registry order.
    pub fn iter_living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.alive)
    }

    /// Nearest living enemy of `side` to a point, across both classes.
    /// Distance ties keep the first candidate in registry order.
    #[must_use]
    pub fn nearest_living_enemy(&self, side: Side, from: Vec2) -> Option<(EntityId, Vec2)> {
        let enemy_side = side.opponent();
        let mut best: Option<(EntityId, Vec2)> = None;
        let mut best_dist = f32::INFINITY;
        for c in &self.combatants {
            if !c.alive || c.side != enemy_side {
                continue;
            }
            let dist = c.position.distance(from);
            if dist < best_dist {
                best_dist = dist;
                best = Some((c.id, c.position));
            }
        }
        best
    }

    /// Remove a pickup by id. Removing one that is already gone is a
    /// silent no-op; returns whether anything was removed.
    pub fn remove_pickup(&mut self, id: EntityId) -> bool {
        match self.pickups.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.pickups.remove(idx);
                true
            }
            None => false,
        }
    }

    /// HUD snapshot for the renderer.
    #[must_use]
    pub fn hud(&self) -> HudState {
        HudState {
            mode_label: self.mode.label(),
            score_a: self.match_state.score_a,
            score_b: self.match_state.score_b,
            alive_a: self.living_count(Side::A),
            alive_b: self.living_count(Side::B),
            unlimited_ammo: self.modifiers.unlimited_ammo,
            auto_target: self.modifiers.auto_target,
            frozen: self.modifiers.is_frozen(self.elapsed),
            game_over: self.match_state.game_over,
            winner: self.match_state.winner,
        }
    }

    /// Allocate the next entity id.
    pub(crate) fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn spawn_combatant(
        &mut self,
        class: CombatantClass,
        side: Side,
        position: Vec2,
        health: u32,
        ammo: u32,
    ) -> EntityId {
        let id = self.allocate_id();
        self.combatants
            .push(Combatant::new(id, class, side, position, health, ammo));
        id
    }

    /// Spawn the fixed symmetric formations for the current mode.
    /// Troops are pushed before vehicles to preserve class-priority
    /// registry order.
    fn spawn_formations(&mut self) {
        let left_x = -self.config.grid_length + FORMATION_EDGE_OFFSET;
        let right_x = self.config.grid_length - FORMATION_EDGE_OFFSET;

        if self.mode.spawns_troops() {
            let hp = self.mode.troop_health();
            let ammo = self.mode.troop_ammo();
            for i in 0..FORMATION_SIZE {
                let row = i as f32;
                let ax = left_x + self.rng.gen_range(-FORMATION_JITTER..FORMATION_JITTER);
                self.spawn_combatant(
                    CombatantClass::Troop,
                    Side::A,
                    Vec2::new(ax, -200.0 + row * 40.0),
                    hp,
                    ammo,
                );
                let bx = right_x + self.rng.gen_range(-FORMATION_JITTER..FORMATION_JITTER);
                self.spawn_combatant(
                    CombatantClass::Troop,
                    Side::B,
                    Vec2::new(bx, 200.0 - row * 40.0),
                    hp,
                    ammo,
                );
            }
        }

        if self.mode.spawns_vehicles() {
            let hp = self.mode.vehicle_health();
            let ammo = self.mode.vehicle_ammo();
            // Survival packs vehicles into tighter rows behind the troops
            let (base, step) = if self.mode.spawns_troops() {
                (240.0, 20.0)
            } else {
                (200.0, 40.0)
            };
            for i in 0..FORMATION_SIZE {
                let row = i as f32;
                let ax = left_x + self.rng.gen_range(-FORMATION_JITTER..FORMATION_JITTER);
                self.spawn_combatant(
                    CombatantClass::Vehicle,
                    Side::A,
                    Vec2::new(ax, -base + row * step),
                    hp,
                    ammo,
                );
                let bx = right_x + self.rng.gen_range(-FORMATION_JITTER..FORMATION_JITTER);
                self.spawn_combatant(
                    CombatantClass::Vehicle,
                    Side::B,
                    Vec2::new(bx, base - row * step),
                    hp,
                    ammo,
                );
            }
        }

        tracing::debug!(
            combatants = self.combatants.len(),
            mode = self.mode.label(),
            "Formations spawned"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(mode: GameMode) -> World {
        World::new(mode, ArenaConfig::default().with_seed(42))
    }

    #[test]
    fn test_gun_combat_roster() {
        let w = world(GameMode::GunCombat);
        assert_eq!(w.combatants.len(), 12);
        assert!(w
            .combatants
            .iter()
            .all(|c| c.class == CombatantClass::Troop));
        assert_eq!(w.living_count(Side::A), 6);
        assert_eq!(w.living_count(Side::B), 6);
        assert!(w
            .combatants
            .iter()
            .all(|c| c.health.current == 30 && c.ammo == 30));
    }

    #[test]
    fn test_battle_drive_roster() {
        let w = world(GameMode::BattleDrive);
        assert_eq!(w.combatants.len(), 12);
        assert!(w
            .combatants
            .iter()
            .all(|c| c.class == CombatantClass::Vehicle));
        assert!(w
            .combatants
            .iter()
            .all(|c| c.health.current == 80 && c.ammo == 8));
    }

    #[test]
    fn test_survival_roster_orders_troops_first() {
        let w = world(GameMode::Survival);
        assert_eq!(w.combatants.len(), 24);
        let first_vehicle = w
            .combatants
            .iter()
            .position(|c| c.class == CombatantClass::Vehicle)
            .unwrap();
        assert!(w.combatants[..first_vehicle]
            .iter()
            .all(|c| c.class == CombatantClass::Troop));
        assert!(w.combatants[first_vehicle..]
            .iter()
            .all(|c| c.class == CombatantClass::Vehicle));
    }

    #[test]
    fn test_ids_unique_and_stable_across_reset() {
        let mut w = world(GameMode::GunCombat);
        let first_ids: Vec<_> = w.combatants.iter().map(|c| c.id).collect();
        w.reset();
        let second_ids: Vec<_> = w.combatants.iter().map(|c| c.id).collect();
        for id in &second_ids {
            assert!(!first_ids.contains(id), "id {id} was reused after reset");
        }
    }

    #[test]
    fn test_reset_clears_state() {
        let mut w = world(GameMode::GunCombat);
        w.match_state.add_score(Side::A, 5);
        w.match_state.evaluate(0, 6);
        w.modifiers.unlimited_ammo = true;
        w.elapsed = 30.0;
        w.reset();
        assert_eq!(w.match_state.score_a, 0);
        assert!(!w.match_state.game_over);
        assert!(!w.modifiers.unlimited_ammo);
        assert_eq!(w.elapsed, 0.0);
        assert_eq!(w.living_count(Side::A), 6);
    }

    #[test]
    fn test_nearest_enemy_prefers_registry_order_on_ties() {
        let mut w = world(GameMode::GunCombat);
        // Park two side-B troops equidistant from the origin
        let b_ids: Vec<_> = w
            .combatants
            .iter()
            .filter(|c| c.side == Side::B)
            .map(|c| c.id)
            .collect();
        w.combatant_mut(b_ids[0]).unwrap().position = Vec2::new(50.0, 0.0);
        w.combatant_mut(b_ids[1]).unwrap().position = Vec2::new(-50.0, 0.0);
        for &id in &b_ids[2..] {
            w.combatant_mut(id).unwrap().position = Vec2::new(500.0, 500.0);
        }
        let (id, _) = w.nearest_living_enemy(Side::A, Vec2::ZERO).unwrap();
        assert_eq!(id, b_ids[0]);
    }

    #[test]
    fn test_nearest_enemy_skips_dead() {
        let mut w = world(GameMode::GunCombat);
        for c in w.combatants.iter_mut().filter(|c| c.side == Side::B) {
            c.destroy();
        }
        assert!(w.nearest_living_enemy(Side::A, Vec2::ZERO).is_none());
    }

    #[test]
    fn test_require_combatant() {
        let w = world(GameMode::GunCombat);
        let id = w.combatants[0].id;
        assert!(w.require_combatant(id).is_ok());
        assert!(w.require_combatant(9_999_999).is_err());
    }

    #[test]
    fn test_modifiers_freeze_window() {
        let m = Modifiers {
            freeze_until: 5.0,
            ..Modifiers::default()
        };
        assert!(m.is_frozen(4.9));
        assert!(!m.is_frozen(5.0));
    }
}
