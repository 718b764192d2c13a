//! BaneLands Core - Consumable Tracking Engine
//!
//! Binds the pure survival rules from `banelands-logic` to a world of
//! actors: characters and NPCs whose food, water, arrows, and torches are
//! tracked as step dice.
//!
//! # Architecture
//!
//! Actors live in a `hecs` ECS world wrapped by [`store::WorldStore`];
//! their tracks are a component on the actor entity. The
//! [`engine::ConsumableEngine`] takes its store and die roller by explicit
//! injection — there are no global singletons — so hosts can swap either
//! seam (a scripted roller for replays, an alternative store for a
//! different persistence substrate).
//!
//! # Example
//!
//! ```rust,no_run
//! use banelands_core::prelude::*;
//! use banelands_logic::consumables::ConsumableKind;
//!
//! let mut store = WorldStore::new();
//! let actor = store.spawn_actor("Kara", ActorKind::Character);
//!
//! let mut engine = ConsumableEngine::new(store, RandRoller::new(), EngineConfig::default());
//! engine.initialize_actor(actor).unwrap();
//!
//! match engine.use_consumable(actor, ConsumableKind::Food) {
//!     Ok(outcome) => println!("rolled {} on {}", outcome.rolled, outcome.die),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod components;
pub mod engine;
pub mod persistence;
pub mod roller;
pub mod store;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{ConsumableEngine, DefaultRanks, EngineConfig, EngineError};
    pub use crate::roller::{DieRoller, RandRoller, RollError, SequenceRoller};
    pub use crate::store::{StoreError, TrackStore, WorldStore};
}
