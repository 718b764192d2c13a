//! Actor resource store — the world of actors and their track flags.
//!
//! [`TrackStore`] is the persistence seam the engine talks through:
//! load-or-defaults and save, per actor. [`WorldStore`] is the shipped
//! implementation, keeping actors as entities in a `hecs` world with their
//! tracks as a component.

use std::fmt;

use banelands_logic::consumables::TrackCollection;
use hecs::{Entity, World};

use crate::components::{Actor, ActorKind, Consumables, Name};

/// Per-actor track persistence.
pub trait TrackStore {
    /// Current tracks for an actor, or the documented defaults if the actor
    /// has never had tracks written. Fails only for unknown actors.
    fn load_tracks(&self, actor: Entity) -> Result<TrackCollection, StoreError>;

    /// Persist an actor's tracks.
    fn save_tracks(&mut self, actor: Entity, tracks: TrackCollection) -> Result<(), StoreError>;

    /// Whether the actor has tracks written (as opposed to implied
    /// defaults).
    fn has_tracks(&self, actor: Entity) -> bool;
}

/// Errors from store operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    UnknownActor(Entity),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::UnknownActor(actor) => write!(f, "unknown actor: {:?}", actor),
        }
    }
}

impl std::error::Error for StoreError {}

/// `hecs`-backed store: one entity per actor, tracks as a component.
#[derive(Default)]
pub struct WorldStore {
    world: World,
}

impl WorldStore {
    pub fn new() -> Self {
        Self {
            world: World::new(),
        }
    }

    /// Wrap an existing world (e.g. one rebuilt by persistence).
    pub fn from_world(world: World) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn spawn_actor(&mut self, name: &str, kind: ActorKind) -> Entity {
        self.world.spawn((Actor, Name(name.to_string()), kind))
    }

    /// All actors with their kinds.
    pub fn actors(&self) -> Vec<(Entity, ActorKind)> {
        self.world
            .query::<(&Actor, &ActorKind)>()
            .iter()
            .map(|(entity, (_, kind))| (entity, *kind))
            .collect()
    }

    pub fn actor_name(&self, actor: Entity) -> Option<String> {
        self.world.get::<&Name>(actor).ok().map(|name| name.0.clone())
    }
}

impl TrackStore for WorldStore {
    fn load_tracks(&self, actor: Entity) -> Result<TrackCollection, StoreError> {
        if !self.world.contains(actor) {
            return Err(StoreError::UnknownActor(actor));
        }
        Ok(self
            .world
            .get::<&Consumables>(actor)
            .map(|tracks| tracks.0)
            .unwrap_or_default())
    }

    fn save_tracks(&mut self, actor: Entity, tracks: TrackCollection) -> Result<(), StoreError> {
        self.world
            .insert_one(actor, Consumables(tracks))
            .map_err(|_| StoreError::UnknownActor(actor))
    }

    fn has_tracks(&self, actor: Entity) -> bool {
        self.world
            .satisfies::<&Consumables>(actor)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banelands_logic::consumables::{ConsumableKind, ResourceTrack};
    use banelands_logic::dice::DieRank;

    #[test]
    fn fresh_actor_loads_defaults_without_writing() {
        let mut store = WorldStore::new();
        let actor = store.spawn_actor("Kara", ActorKind::Character);

        let tracks = store.load_tracks(actor).unwrap();
        assert_eq!(tracks, TrackCollection::default());
        // Reading defaults does not count as having tracks.
        assert!(!store.has_tracks(actor));
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = WorldStore::new();
        let actor = store.spawn_actor("Brand", ActorKind::Character);

        let mut tracks = TrackCollection::default();
        tracks.food = ResourceTrack::new(DieRank::D12);
        tracks.torches.depleted = true;
        store.save_tracks(actor, tracks).unwrap();

        assert!(store.has_tracks(actor));
        assert_eq!(store.load_tracks(actor).unwrap(), tracks);
    }

    #[test]
    fn despawned_actor_is_unknown() {
        let mut store = WorldStore::new();
        let actor = store.spawn_actor("Ghost", ActorKind::Npc);
        store.world_mut().despawn(actor).unwrap();

        assert_eq!(
            store.load_tracks(actor),
            Err(StoreError::UnknownActor(actor))
        );
        assert_eq!(
            store.save_tracks(actor, TrackCollection::default()),
            Err(StoreError::UnknownActor(actor))
        );
    }

    #[test]
    fn actors_lists_kinds() {
        let mut store = WorldStore::new();
        store.spawn_actor("Kara", ActorKind::Character);
        store.spawn_actor("Bandit", ActorKind::Npc);

        let actors = store.actors();
        assert_eq!(actors.len(), 2);
        let characters = actors
            .iter()
            .filter(|(_, kind)| *kind == ActorKind::Character)
            .count();
        assert_eq!(characters, 1);
    }

    #[test]
    fn saved_track_mutation_survives_reload() {
        let mut store = WorldStore::new();
        let actor = store.spawn_actor("Kara", ActorKind::Character);

        let mut tracks = store.load_tracks(actor).unwrap();
        tracks.get_mut(ConsumableKind::Water).depleted = true;
        store.save_tracks(actor, tracks).unwrap();

        let reloaded = store.load_tracks(actor).unwrap();
        assert!(reloaded.water.depleted);
        assert!(!reloaded.food.depleted);
    }
}
