//! Consumable engine — binds the pure track rules to stored actors.
//!
//! Every operation loads the actor's tracks through the injected
//! [`TrackStore`], applies a pure operation from `banelands-logic`, and
//! saves the result back. The engine keeps no track state of its own, so a
//! stale snapshot handed in by a racing caller is simply re-saved over —
//! reconciliation is the store's concern, not ours.

use std::fmt;

use banelands_logic::consumables::{
    self, ConsumableKind, ResourceTrack, TrackCollection, TrackError, TrackRules, TrackView,
    UseOutcome,
};
use banelands_logic::dice::DieRank;
use hecs::Entity;
use log::{info, warn};

use crate::components::{Actor, ActorKind};
use crate::roller::{DieRoller, RollError};
use crate::store::{StoreError, TrackStore, WorldStore};

/// Starting die ranks, one per consumable kind. World settings may override
/// the shipped defaults (food d8, water d8, arrows d8, torches d6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultRanks {
    pub food: DieRank,
    pub water: DieRank,
    pub arrows: DieRank,
    pub torches: DieRank,
}

impl Default for DefaultRanks {
    fn default() -> Self {
        Self {
            food: ConsumableKind::Food.default_rank(),
            water: ConsumableKind::Water.default_rank(),
            arrows: ConsumableKind::Arrows.default_rank(),
            torches: ConsumableKind::Torches.default_rank(),
        }
    }
}

impl DefaultRanks {
    pub fn get(&self, kind: ConsumableKind) -> DieRank {
        match kind {
            ConsumableKind::Food => self.food,
            ConsumableKind::Water => self.water,
            ConsumableKind::Arrows => self.arrows,
            ConsumableKind::Torches => self.torches,
        }
    }

    /// A fresh track collection at these ranks.
    pub fn collection(&self) -> TrackCollection {
        TrackCollection {
            food: ResourceTrack::new(self.food),
            water: ResourceTrack::new(self.water),
            arrows: ResourceTrack::new(self.arrows),
            torches: ResourceTrack::new(self.torches),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Write starting tracks to actors seen without any before mutating
    /// operations.
    pub auto_initialize: bool,
    /// Starting ranks for fresh actors.
    pub defaults: DefaultRanks,
    /// Tunable track behavior (depletion threshold).
    pub rules: TrackRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            auto_initialize: true,
            defaults: DefaultRanks::default(),
            rules: TrackRules::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Errors from engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    Track(TrackError),
    Roll(RollError),
    Store(StoreError),
}

impl From<TrackError> for EngineError {
    fn from(e: TrackError) -> Self {
        EngineError::Track(e)
    }
}

impl From<RollError> for EngineError {
    fn from(e: RollError) -> Self {
        EngineError::Roll(e)
    }
}

impl From<StoreError> for EngineError {
    fn from(e: StoreError) -> Self {
        EngineError::Store(e)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Track(e) => write!(f, "{}", e),
            EngineError::Roll(e) => write!(f, "roll failed: {}", e),
            EngineError::Store(e) => write!(f, "store failed: {}", e),
        }
    }
}

impl std::error::Error for EngineError {}

/// The consumable engine. Store and roller are injected once at
/// construction and owned for the engine's lifetime.
pub struct ConsumableEngine<S: TrackStore, R: DieRoller> {
    store: S,
    roller: R,
    config: EngineConfig,
}

impl<S: TrackStore, R: DieRoller> ConsumableEngine<S, R> {
    pub fn new(store: S, roller: R, config: EngineConfig) -> Self {
        Self {
            store,
            roller,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roller(&self) -> &R {
        &self.roller
    }

    /// Write starting tracks iff the actor has none. Idempotent.
    pub fn initialize_actor(&mut self, actor: Entity) -> Result<(), EngineError> {
        if self.store.has_tracks(actor) {
            return Ok(());
        }
        self.store
            .save_tracks(actor, self.config.defaults.collection())?;
        Ok(())
    }

    /// Use one unit of a consumable: roll its current die and apply the
    /// depletion rule.
    ///
    /// Fails with [`TrackError::Depleted`] — leaving the track untouched —
    /// when there is nothing left to consume. Rendering the roll is the
    /// caller's business; the engine only logs the depletion transitions.
    pub fn use_consumable(
        &mut self,
        actor: Entity,
        kind: ConsumableKind,
    ) -> Result<UseOutcome, EngineError> {
        let mut tracks = self.load(actor)?;
        let track = tracks.get_mut(kind);
        if track.depleted {
            return Err(TrackError::Depleted(kind).into());
        }

        let rolled = self.roller.roll(track.rank.sides())?;
        let outcome = consumables::apply_roll(track, kind, rolled, &self.config.rules)?;

        if outcome.depletion {
            self.store.save_tracks(actor, tracks)?;
            if outcome.exhausted {
                warn!("{} is completely depleted", kind);
            } else if let Some(rank) = outcome.new_rank {
                info!("{} reduced to {}", kind, rank);
            }
        }

        Ok(outcome)
    }

    /// Restore `units` of a consumable (foraging, hunting, purchase),
    /// stepping the die up once per unit.
    ///
    /// A depleted track revives at the d6 floor — even for zero units.
    /// Negative units are a caller bug and fail fast.
    pub fn restore_consumable(
        &mut self,
        actor: Entity,
        kind: ConsumableKind,
        units: i64,
    ) -> Result<ResourceTrack, EngineError> {
        if units < 0 {
            return Err(TrackError::InvalidUnits(units).into());
        }
        // Steps beyond the ladder height are absorbed by the d12 clamp.
        let units = units.min(DieRank::ALL.len() as i64) as u32;

        let mut tracks = self.load(actor)?;
        let track = tracks.get_mut(kind);
        consumables::restore(track, units);
        let result = *track;
        self.store.save_tracks(actor, tracks)?;

        info!("restored {} unit(s) of {} (now {})", units, kind, result.rank);
        Ok(result)
    }

    /// Directly assign a consumable's die rank, clearing any depletion.
    pub fn set_resource_die(
        &mut self,
        actor: Entity,
        kind: ConsumableKind,
        rank: DieRank,
    ) -> Result<(), EngineError> {
        let mut tracks = self.load(actor)?;
        consumables::set_rank(tracks.get_mut(kind), rank);
        self.store.save_tracks(actor, tracks)?;
        Ok(())
    }

    /// Current die rank, `None` once depleted.
    pub fn resource_die(
        &self,
        actor: Entity,
        kind: ConsumableKind,
    ) -> Result<Option<DieRank>, EngineError> {
        let tracks = self.store.load_tracks(actor)?;
        let track = tracks.get(kind);
        Ok(if track.depleted {
            None
        } else {
            Some(track.rank)
        })
    }

    /// Whether the actor has any of the consumable left.
    pub fn has_consumable(
        &self,
        actor: Entity,
        kind: ConsumableKind,
    ) -> Result<bool, EngineError> {
        let tracks = self.store.load_tracks(actor)?;
        Ok(consumables::has_resource(tracks.get(kind)))
    }

    /// Encumbrance from carried consumables: 1 per non-depleted track.
    pub fn encumbrance(&self, actor: Entity) -> Result<u32, EngineError> {
        let tracks = self.store.load_tracks(actor)?;
        Ok(consumables::encumbrance(&tracks))
    }

    /// Sheet-ready rows for all four tracks.
    pub fn consumable_display(&self, actor: Entity) -> Result<Vec<TrackView>, EngineError> {
        let tracks = self.store.load_tracks(actor)?;
        Ok(consumables::track_views(&tracks))
    }

    /// Load tracks for a mutating operation, seeding defaults first when
    /// configured to.
    fn load(&mut self, actor: Entity) -> Result<TrackCollection, EngineError> {
        if self.config.auto_initialize && !self.store.has_tracks(actor) {
            self.store
                .save_tracks(actor, self.config.defaults.collection())?;
        }
        Ok(self.store.load_tracks(actor)?)
    }
}

impl<R: DieRoller> ConsumableEngine<WorldStore, R> {
    /// Seed starting tracks for every character that has none — the
    /// world-ready sweep over pre-existing actors.
    pub fn initialize_characters(&mut self) -> Result<u32, EngineError> {
        let characters: Vec<Entity> = self
            .store
            .world()
            .query::<(&Actor, &ActorKind)>()
            .iter()
            .filter(|(_, (_, kind))| **kind == ActorKind::Character)
            .map(|(entity, _)| entity)
            .collect();

        let mut seeded = 0;
        for actor in characters {
            if !self.store.has_tracks(actor) {
                self.store
                    .save_tracks(actor, self.config.defaults.collection())?;
                seeded += 1;
            }
        }
        Ok(seeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roller::SequenceRoller;

    fn engine_with_rolls(
        rolls: impl IntoIterator<Item = u16>,
    ) -> (ConsumableEngine<WorldStore, SequenceRoller>, Entity) {
        let mut store = WorldStore::new();
        let actor = store.spawn_actor("Kara", ActorKind::Character);
        let mut engine =
            ConsumableEngine::new(store, SequenceRoller::new(rolls), EngineConfig::new());
        engine.initialize_actor(actor).unwrap();
        (engine, actor)
    }

    #[test]
    fn high_roll_leaves_track_alone() {
        let (mut engine, actor) = engine_with_rolls([5]);
        let outcome = engine.use_consumable(actor, ConsumableKind::Food).unwrap();
        assert_eq!(outcome.rolled, 5);
        assert!(!outcome.depletion);
        assert_eq!(
            engine.resource_die(actor, ConsumableKind::Food).unwrap(),
            Some(DieRank::D8)
        );
    }

    #[test]
    fn low_roll_steps_the_die_down() {
        let (mut engine, actor) = engine_with_rolls([2]);
        let outcome = engine.use_consumable(actor, ConsumableKind::Food).unwrap();
        assert!(outcome.depletion);
        assert!(!outcome.exhausted);
        assert_eq!(outcome.new_rank, Some(DieRank::D6));
        assert_eq!(
            engine.resource_die(actor, ConsumableKind::Food).unwrap(),
            Some(DieRank::D6)
        );
    }

    #[test]
    fn repeated_low_rolls_exhaust_the_track() {
        // Torches start at d6: one low roll fully depletes them.
        let (mut engine, actor) = engine_with_rolls([1, 1]);
        let outcome = engine
            .use_consumable(actor, ConsumableKind::Torches)
            .unwrap();
        assert!(outcome.exhausted);
        assert_eq!(outcome.new_rank, None);

        // Terminal: the next use is an error and draws no roll.
        let err = engine
            .use_consumable(actor, ConsumableKind::Torches)
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::Track(TrackError::Depleted(ConsumableKind::Torches))
        );
        assert_eq!(engine.roller().remaining(), 1);
    }

    #[test]
    fn roller_failure_propagates_unchanged() {
        let (mut engine, actor) = engine_with_rolls([]);
        let err = engine.use_consumable(actor, ConsumableKind::Food).unwrap_err();
        assert_eq!(err, EngineError::Roll(RollError::Exhausted));
        // Track untouched by the failed draw.
        assert_eq!(
            engine.resource_die(actor, ConsumableKind::Food).unwrap(),
            Some(DieRank::D8)
        );
    }

    #[test]
    fn restore_revives_depleted_track() {
        let (mut engine, actor) = engine_with_rolls([1]);
        engine
            .use_consumable(actor, ConsumableKind::Torches)
            .unwrap();
        assert!(!engine.has_consumable(actor, ConsumableKind::Torches).unwrap());

        let track = engine
            .restore_consumable(actor, ConsumableKind::Torches, 0)
            .unwrap();
        assert_eq!(track, ResourceTrack::new(DieRank::D6));
        assert!(engine.has_consumable(actor, ConsumableKind::Torches).unwrap());
    }

    #[test]
    fn restore_steps_up_and_clamps() {
        let (mut engine, actor) = engine_with_rolls([]);
        let track = engine
            .restore_consumable(actor, ConsumableKind::Water, 2)
            .unwrap();
        assert_eq!(track.rank, DieRank::D12);

        // Far past the top of the ladder still lands on d12.
        let track = engine
            .restore_consumable(actor, ConsumableKind::Water, 1_000_000)
            .unwrap();
        assert_eq!(track.rank, DieRank::D12);
    }

    #[test]
    fn negative_restore_fails_fast() {
        let (mut engine, actor) = engine_with_rolls([]);
        let err = engine
            .restore_consumable(actor, ConsumableKind::Food, -3)
            .unwrap_err();
        assert_eq!(err, EngineError::Track(TrackError::InvalidUnits(-3)));
    }

    #[test]
    fn set_resource_die_clears_depletion() {
        let (mut engine, actor) = engine_with_rolls([1]);
        engine
            .use_consumable(actor, ConsumableKind::Torches)
            .unwrap();
        engine
            .set_resource_die(actor, ConsumableKind::Torches, DieRank::D10)
            .unwrap();
        assert_eq!(
            engine.resource_die(actor, ConsumableKind::Torches).unwrap(),
            Some(DieRank::D10)
        );
    }

    #[test]
    fn encumbrance_tracks_depletion() {
        let (mut engine, actor) = engine_with_rolls([1]);
        assert_eq!(engine.encumbrance(actor).unwrap(), 4);
        engine
            .use_consumable(actor, ConsumableKind::Torches)
            .unwrap();
        assert_eq!(engine.encumbrance(actor).unwrap(), 3);
    }

    #[test]
    fn display_rows_follow_state() {
        let (mut engine, actor) = engine_with_rolls([1]);
        engine
            .use_consumable(actor, ConsumableKind::Torches)
            .unwrap();
        let rows = engine.consumable_display(actor).unwrap();
        assert_eq!(rows[0].die_label, "D8");
        assert_eq!(rows[3].die_label, "Empty");
    }

    #[test]
    fn initialize_characters_skips_npcs_and_seeded() {
        let mut store = WorldStore::new();
        let kara = store.spawn_actor("Kara", ActorKind::Character);
        let brand = store.spawn_actor("Brand", ActorKind::Character);
        store.spawn_actor("Bandit", ActorKind::Npc);

        let mut engine =
            ConsumableEngine::new(store, SequenceRoller::default(), EngineConfig::new());
        engine.initialize_actor(kara).unwrap();

        // Only Brand still needs seeding.
        assert_eq!(engine.initialize_characters().unwrap(), 1);
        assert!(engine.store().has_tracks(brand));
        assert_eq!(engine.initialize_characters().unwrap(), 0);
    }

    #[test]
    fn configured_defaults_apply_to_fresh_actors() {
        let mut store = WorldStore::new();
        let actor = store.spawn_actor("Kara", ActorKind::Character);

        let config = EngineConfig {
            auto_initialize: true,
            defaults: DefaultRanks {
                food: DieRank::D12,
                ..DefaultRanks::default()
            },
            rules: TrackRules::default(),
        };
        let mut engine = ConsumableEngine::new(store, SequenceRoller::new([6]), config);

        // First mutating touch seeds the configured defaults.
        let outcome = engine.use_consumable(actor, ConsumableKind::Food).unwrap();
        assert_eq!(outcome.die, DieRank::D12);
    }
}
