//! Common per-entity state and the shared sprite assets
//!
//! The original entity hierarchy is flattened into a fixed set of concrete
//! types that embed [`EntityCore`] by composition and expose the shared
//! surface through the [`Entity`] trait.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use glam::Vec2;

use super::geometry::Circle;
use crate::consts::*;

/// Process-wide id source. Ids are unique for the lifetime of the process
/// and strictly increase in creation order; they are never reused.
static NEXT_ID: AtomicU32 = AtomicU32::new(0);

/// Allocate the next entity id
pub fn next_entity_id() -> u32 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Reset the id sequence. Test isolation hook; never called by game code.
pub fn reset_entity_ids() {
    NEXT_ID.store(0, Ordering::SeqCst);
}

/// Which sprite sheet an entity draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Player,
    /// Cosmetic alternate player skin
    MushroomMan,
    Flame,
    BasicCoal,
    BombCoal,
    GoldCoal,
    Explosion,
    Fireball,
}

/// Immutable animation data shared by every live instance of an entity kind
#[derive(Debug)]
pub struct SpriteSheet {
    pub kind: SpriteKind,
    pub frames: u32,
}

/// Shared, read-only handle to a sprite sheet
pub type SpriteHandle = Arc<SpriteSheet>;

/// The fixed set of sprite sheets, built once at startup
#[derive(Debug, Clone)]
pub struct SpriteLibrary {
    pub player: SpriteHandle,
    pub mushroom: SpriteHandle,
    pub flame: SpriteHandle,
    pub basic_coal: SpriteHandle,
    pub bomb_coal: SpriteHandle,
    pub gold_coal: SpriteHandle,
    pub explosion: SpriteHandle,
    pub fireball: SpriteHandle,
}

impl SpriteLibrary {
    pub fn standard() -> Self {
        let sheet = |kind, frames| Arc::new(SpriteSheet { kind, frames });
        Self {
            player: sheet(SpriteKind::Player, 60),
            mushroom: sheet(SpriteKind::MushroomMan, 60),
            flame: sheet(SpriteKind::Flame, 60),
            basic_coal: sheet(SpriteKind::BasicCoal, 8),
            bomb_coal: sheet(SpriteKind::BombCoal, 6),
            gold_coal: sheet(SpriteKind::GoldCoal, 4),
            explosion: sheet(SpriteKind::Explosion, 7),
            fireball: sheet(SpriteKind::Fireball, 1),
        }
    }
}

/// State every entity carries: a unique id, a center position, a facing
/// direction, a circular hit box and a movement speed, plus a handle to the
/// shared sprite sheet.
#[derive(Debug, Clone)]
pub struct EntityCore {
    pub id: u32,
    pub pos: Vec2,
    pub dir: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub sprite: SpriteHandle,
}

impl EntityCore {
    pub fn new(sprite: SpriteHandle, pos: Vec2, radius: f32, speed: f32) -> Self {
        Self {
            id: next_entity_id(),
            pos,
            dir: Vec2::ZERO,
            radius,
            speed,
            sprite,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Clamp the position so the hit box stays inside the play area
    pub fn clamp_to_walls(&mut self) {
        if self.pos.x - self.radius < WALL_OFFSET {
            self.pos.x = WALL_OFFSET + self.radius;
        } else if self.pos.x + self.radius - 1.0 >= SCREEN_W - WALL_OFFSET {
            self.pos.x = SCREEN_W - WALL_OFFSET - self.radius;
        }

        if self.pos.y - self.radius < WALL_OFFSET {
            self.pos.y = WALL_OFFSET + self.radius;
        } else if self.pos.y + self.radius - 1.0 >= SCREEN_H - WALL_OFFSET {
            self.pos.y = SCREEN_H - WALL_OFFSET - self.radius;
        }
    }
}

/// Surface shared by every concrete entity kind
pub trait Entity {
    fn id(&self) -> u32;
    fn pos(&self) -> Vec2;
    /// The circle used for collision this tick
    fn hit_circle(&self) -> Circle;
    /// Whether the entity still participates in the simulation
    fn is_active(&self) -> bool;
}
