//! The player's flame projectile
//!
//! Flames leave the player's muzzle along the facing direction and fly in
//! a straight line until they hit something or reach a wall. The hit
//! point leads the sprite slightly so the collision registers at the tip
//! of the flame rather than its center.

use glam::Vec2;

use super::entity::{Entity, EntityCore, SpriteHandle};
use super::geometry::Circle;
use crate::consts::*;
use crate::gfx::{Blit, Compositing, DrawSurface};

/// Speed multiplier over the shared base speed
const SPEED_MULT: f32 = 3.5;
/// Distance from the player center to the muzzle
const MUZZLE_OFFSET: f32 = 10.0;
/// How far the hit point leads the sprite center
const HIT_OFFSET: f32 = 7.0;

/// Unit direction for a player facing frame. The sheet has 60 frames, one
/// per 6 degrees, counter-clockwise from facing right; screen y points
/// down, hence the negated sine.
pub fn facing_dir(frame: u32) -> Vec2 {
    let angle = (frame as f32 * 6.0).to_radians();
    Vec2::new(angle.cos(), -angle.sin())
}

#[derive(Debug, Clone)]
pub struct Flame {
    pub core: EntityCore,
    /// Leads `core.pos` by [`HIT_OFFSET`] along the flight direction
    hit_pos: Vec2,
    pub frame: u32,
    active: bool,
}

impl Flame {
    /// Spawn a flame at the player's muzzle, flying along the facing frame
    pub fn new(sprite: SpriteHandle, player_pos: Vec2, facing_frame: u32) -> Self {
        let dir = facing_dir(facing_frame);
        let pos = player_pos + dir * MUZZLE_OFFSET;
        let mut core = EntityCore::new(sprite, pos, FLAME_RADIUS, BASE_SPEED * SPEED_MULT);
        core.dir = dir;
        Self {
            hit_pos: pos + dir * HIT_OFFSET,
            core,
            frame: facing_frame,
            active: true,
        }
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        // Check the wall before moving so the flame dies flush with it
        let r = self.core.radius;
        let p = self.hit_pos;
        if p.x - r < WALL_OFFSET
            || p.x + r >= SCREEN_W - WALL_OFFSET
            || p.y - r < WALL_OFFSET
            || p.y + r >= SCREEN_H - WALL_OFFSET
        {
            self.active = false;
            return;
        }

        let step = self.core.dir * self.core.speed * dt;
        self.core.pos += step;
        self.hit_pos += step;
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.blit(Blit {
            sprite: self.core.sprite.kind,
            frame: self.frame,
            pos: self.core.pos,
            compositing: Compositing::Plain,
        });
    }
}

impl Entity for Flame {
    fn id(&self) -> u32 {
        self.core.id
    }

    fn pos(&self) -> Vec2 {
        self.core.pos
    }

    fn hit_circle(&self) -> Circle {
        Circle::new(self.hit_pos, self.core.radius)
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
