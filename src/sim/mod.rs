//! The simulation core
//!
//! Everything that moves lives here: the entity types and their state
//! machines, spawn scheduling, collision resolution and the phase machine
//! that drives a session from menu to game over. The simulation is
//! deterministic for a given seed and input sequence and is exercised
//! headlessly by the test suite.

pub mod coal;
pub mod collision;
pub mod entity;
pub mod explosion;
pub mod fireball;
pub mod flame;
pub mod geometry;
pub mod gold;
pub mod player;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::resolve_collisions;
pub use entity::{next_entity_id, reset_entity_ids, Entity, EntityCore, SpriteKind, SpriteLibrary};
pub use state::{GamePhase, GameState, TickInput, World};
pub use tick::tick;
