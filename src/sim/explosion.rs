//! Explosions
//!
//! A short stationary blast left behind by destroyed bombs and fireballs.
//! The hit radius shrinks with the animation so only the early frames are
//! truly dangerous, and the final frames are harmless smoke.

use glam::Vec2;

use super::entity::{Entity, EntityCore, SpriteHandle};
use super::geometry::Circle;
use crate::consts::*;
use crate::gfx::{Blit, Compositing, DrawSurface};

/// Seconds per animation frame
const FRAME_INTERVAL: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct Explosion {
    pub core: EntityCore,
    pub frame: u32,
    frame_timer: f32,
    active: bool,
}

impl Explosion {
    pub fn new(sprite: SpriteHandle, pos: Vec2) -> Self {
        Self {
            core: EntityCore::new(sprite, pos, EXPLOSION_RADIUS, 0.0),
            frame: 0,
            frame_timer: 0.0,
            active: true,
        }
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.frame_timer += dt;
        while self.frame_timer >= FRAME_INTERVAL {
            self.frame_timer -= FRAME_INTERVAL;
            self.frame += 1;

            // The blast cools off as the animation plays out
            match self.frame {
                4 => self.core.radius = 16.0,
                5 => self.core.radius = 3.0,
                6 => self.core.radius = 0.0,
                _ => {}
            }

            if self.frame >= self.core.sprite.frames {
                self.active = false;
                return;
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        if !self.active {
            return;
        }
        surface.blit(Blit {
            sprite: self.core.sprite.kind,
            frame: self.frame,
            pos: self.core.pos,
            compositing: Compositing::Plain,
        });
    }
}

impl Entity for Explosion {
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
        self.active
    }
}
