//! The gold coal bonus
//!
//! A single gold coal exists for the whole session and toggles between
//! dormant and active. When activated it races across the arena along one
//! axis, bouncing off opposite walls, while its animation counts up a
//! four-stage warning. Touching it pays out and clears the board; the
//! spawn logic that decides when it appears lives in [`super::spawn`].

use glam::Vec2;

use super::entity::{Entity, EntityCore, SpriteHandle};
use super::geometry::Circle;
use crate::consts::*;
use crate::gfx::{Blit, Compositing, DrawSurface};

/// Speed multiplier over the shared base speed
const SPEED_MULT: f32 = 4.0;
/// Seconds between warning frames; the sheet has four
const WARNING_INTERVAL: f32 = 0.2;

/// Which axis the gold coal shuttles along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BounceAxis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone)]
pub struct GoldCoal {
    pub core: EntityCore,
    pub frame: u32,
    active: bool,
    /// Seconds since activation, drives the warning animation
    active_timer: f32,
    axis: BounceAxis,
}

impl GoldCoal {
    pub fn new(sprite: SpriteHandle) -> Self {
        Self {
            core: EntityCore::new(sprite, Vec2::ZERO, COAL_RADIUS, BASE_SPEED * SPEED_MULT),
            frame: 0,
            active: false,
            active_timer: 0.0,
            axis: BounceAxis::Horizontal,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn axis(&self) -> BounceAxis {
        self.axis
    }

    /// Activate at a spawn point. The travel axis is whichever one the
    /// point has more room along, so a coal placed near a side wall
    /// shuttles vertically and one near the top or bottom horizontally.
    pub fn activate_at(&mut self, pos: Vec2) {
        let dist_x = pos.x.min(SCREEN_W - pos.x);
        let dist_y = pos.y.min(SCREEN_H - pos.y);
        let (axis, dir) = if dist_x > dist_y {
            (BounceAxis::Horizontal, Vec2::new(1.0, 0.0))
        } else {
            (BounceAxis::Vertical, Vec2::new(0.0, 1.0))
        };

        self.core.pos = pos;
        self.core.dir = dir;
        self.axis = axis;
        self.frame = 0;
        self.active_timer = 0.0;
        self.active = true;
        self.core.clamp_to_walls();
    }

    /// Return to the dormant state. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.frame = 0;
        self.active_timer = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }

        self.active_timer += dt;
        self.frame = ((self.active_timer / WARNING_INTERVAL) as u32)
            .min(self.core.sprite.frames - 1);

        self.core.pos += self.core.dir * self.core.speed * dt;

        // Bounce off the walls along the travel axis
        let min = WALL_OFFSET + self.core.radius;
        match self.axis {
            BounceAxis::Horizontal => {
                let max = SCREEN_W - WALL_OFFSET - self.core.radius;
                if self.core.pos.x <= min {
                    self.core.pos.x = min;
                    self.core.dir.x = self.core.dir.x.abs();
                } else if self.core.pos.x >= max {
                    self.core.pos.x = max;
                    self.core.dir.x = -self.core.dir.x.abs();
                }
            }
            BounceAxis::Vertical => {
                let max = SCREEN_H - WALL_OFFSET - self.core.radius;
                if self.core.pos.y <= min {
                    self.core.pos.y = min;
                    self.core.dir.y = self.core.dir.y.abs();
                } else if self.core.pos.y >= max {
                    self.core.pos.y = max;
                    self.core.dir.y = -self.core.dir.y.abs();
                }
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
            compositing: Compositing::Shadowed,
        });
    }
}

impl Entity for GoldCoal {
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
