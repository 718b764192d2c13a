//! Actor components: markers, identity, and the consumable track payload.

use banelands_logic::consumables::TrackCollection;
use serde::{Deserialize, Serialize};

/// Marker component identifying an entity as an actor.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Actor;

/// What kind of actor an entity is. Consumable tracking applies to
/// characters; NPCs are spawned without tracks unless a host adds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Character,
    Npc,
}

/// Display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name(pub String);

/// Per-actor consumable tracks — the payload the store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumables(pub TrackCollection);
