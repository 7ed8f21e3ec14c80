//! Fireballs
//!
//! A fireball is the remains of a basic coal killed by a flame. It keeps
//! the flame's direction, bounces off the walls indefinitely and destroys
//! nearly everything it touches, including other fireballs and the coals
//! that spawned it. The trail buffer records recent positions for the
//! renderer's motion blur.

use glam::Vec2;

use super::entity::{Entity, EntityCore, SpriteHandle};
use super::geometry::Circle;
use crate::consts::*;
use crate::gfx::{palette, Blit, Compositing, DrawSurface};

/// Speed multiplier over the shared base speed
const SPEED_MULT: f32 = 5.0;
/// Recent positions kept for the motion trail
const TRAIL_LEN: usize = 12;

#[derive(Debug, Clone)]
pub struct Fireball {
    pub core: EntityCore,
    /// Most recent position first
    trail: [Vec2; TRAIL_LEN],
    /// Marked by the collision pass, swept after the pass completes
    pub to_be_erased: bool,
    /// Set for one tick when a wall bounce happened, for the bounce cue
    pub just_hit_wall: bool,
}

impl Fireball {
    pub fn new(sprite: SpriteHandle, pos: Vec2, dir: Vec2) -> Self {
        let mut core = EntityCore::new(sprite, pos, FIREBALL_RADIUS, BASE_SPEED * SPEED_MULT);
        core.dir = dir;
        Self {
            core,
            trail: [pos; TRAIL_LEN],
            to_be_erased: false,
            just_hit_wall: false,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.trail.rotate_right(1);
        self.trail[0] = self.core.pos;

        self.core.pos += self.core.dir * self.core.speed * dt;
        self.just_hit_wall = false;

        let r = self.core.radius;
        if self.core.pos.x - r < WALL_OFFSET {
            self.core.pos.x = WALL_OFFSET + r;
            self.core.dir.x = -self.core.dir.x;
            self.just_hit_wall = true;
        } else if self.core.pos.x + r - 1.0 >= SCREEN_W - WALL_OFFSET {
            self.core.pos.x = SCREEN_W - WALL_OFFSET - r;
            self.core.dir.x = -self.core.dir.x;
            self.just_hit_wall = true;
        }

        if self.core.pos.y - r < WALL_OFFSET {
            self.core.pos.y = WALL_OFFSET + r;
            self.core.dir.y = -self.core.dir.y;
            self.just_hit_wall = true;
        } else if self.core.pos.y + r - 1.0 >= SCREEN_H - WALL_OFFSET {
            self.core.pos.y = SCREEN_H - WALL_OFFSET - r;
            self.core.dir.y = -self.core.dir.y;
            self.just_hit_wall = true;
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        // Oldest trail segments first so the head draws on top
        for (i, pos) in self.trail.iter().enumerate().rev() {
            let alpha = 1.0 - (i + 1) as f32 / (TRAIL_LEN + 1) as f32;
            surface.blit(Blit {
                sprite: self.core.sprite.kind,
                frame: 0,
                pos: *pos,
                compositing: Compositing::TintedBlend { color: palette::HIT_RED, alpha },
            });
        }
        surface.blit(Blit {
            sprite: self.core.sprite.kind,
            frame: 0,
            pos: self.core.pos,
            compositing: Compositing::Plain,
        });
    }
}

impl Entity for Fireball {
    fn id(&self) -> u32 {
        self.core.id
    }

    fn pos(&self) -> Vec2 {
        self.core.pos
    }

    fn hit_circle(&self) -> Circle {
        self.core.circle()
    }

    fn is_active(&self) -> bool {
        !self.to_be_erased
    }
}
