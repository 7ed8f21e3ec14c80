//! The player
//!
//! The player aims at the pointer (60 facing frames, one per 6 degrees),
//! moves on accumulated input axes and keeps a short position trail for
//! the dash blur. Damage is gated by a post-hit immunity window; health
//! never goes below zero.

use glam::Vec2;

use super::entity::{Entity, EntityCore, SpriteHandle, SpriteKind};
use super::geometry::{dir_in_degrees, Circle};
use crate::consts::*;
use crate::gfx::{palette, Blit, Compositing, DrawSurface};

/// Starting health
pub const MAX_HP: u32 = 3;
/// Seconds of immunity after taking a hit
pub const IMMUNITY_TIME: f32 = 2.625;
/// Speed multiplier while dashing
pub const BOOST_MULT: f32 = 4.0;
/// Positions kept for the dash blur
const TRAIL_LEN: usize = 12;

#[derive(Debug, Clone)]
pub struct Player {
    pub core: EntityCore,
    pub hp: u32,
    /// Facing frame, 0..60, derived from the pointer every update
    pub facing: u32,
    /// Seconds of immunity remaining
    immunity: f32,
    /// Set while a dash multiplies the movement speed
    pub boosting: bool,
    /// Set when the gold coal payout fires, cleared on respawn
    pub gold_hit: bool,
    /// Cosmetic alternate skin
    pub alt_skin: bool,
    trail: [Vec2; TRAIL_LEN],
    move_accum: Vec2,
}

impl Player {
    pub fn new(sprite: SpriteHandle, pos: Vec2) -> Self {
        Self {
            core: EntityCore::new(sprite, pos, PLAYER_RADIUS, BASE_SPEED),
            hp: MAX_HP,
            facing: 0,
            immunity: 0.0,
            boosting: false,
            gold_hit: false,
            alt_skin: false,
            trail: [pos; TRAIL_LEN],
            move_accum: Vec2::ZERO,
        }
    }

    /// Accumulate a movement axis contribution for the next update.
    /// Opposite keys cancel out; the sum is normalized on integration.
    pub fn set_movement(&mut self, dx: f32, dy: f32) {
        self.move_accum.x += dx;
        self.move_accum.y += dy;
    }

    pub fn is_immune(&self) -> bool {
        self.immunity > 0.0
    }

    pub fn set_immunity(&mut self, seconds: f32) {
        self.immunity = seconds;
    }

    /// Lose one health point. Saturates at zero; immunity gating is the
    /// caller's concern.
    pub fn take_damage(&mut self) {
        self.hp = self.hp.saturating_sub(1);
    }

    pub fn update(&mut self, dt: f32, pointer: Vec2) {
        let angle = dir_in_degrees(self.core.pos, pointer);
        self.facing = ((angle / 6.0).round() as u32) % self.core.sprite.frames;

        self.trail.rotate_right(1);
        self.trail[0] = self.core.pos;

        if self.move_accum.length_squared() > 0.0 {
            let scale = if self.boosting { BOOST_MULT } else { 1.0 };
            let dir = self.move_accum.normalize() * scale;
            self.core.pos += dir * self.core.speed * dt;
            self.core.dir = dir;
        } else {
            self.core.dir = Vec2::ZERO;
        }
        self.move_accum = Vec2::ZERO;

        self.core.clamp_to_walls();

        if self.immunity > 0.0 {
            self.immunity = (self.immunity - dt).max(0.0);
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let kind = if self.alt_skin {
            SpriteKind::MushroomMan
        } else {
            self.core.sprite.kind
        };

        if self.boosting {
            for (i, pos) in self.trail.iter().enumerate().rev() {
                let alpha = 1.0 - (i + 1) as f32 / (TRAIL_LEN + 1) as f32;
                surface.blit(Blit {
                    sprite: kind,
                    frame: self.facing,
                    pos: *pos,
                    compositing: Compositing::TintedBlend { color: palette::GOLD, alpha },
                });
            }
        }

        let compositing = if self.hp == 0 {
            Compositing::Tinted(palette::DEAD_BLUE)
        } else if self.is_immune() && (self.immunity * 10.0) as u32 % 2 == 0 {
            // Flicker while immune
            Compositing::Tinted(palette::HIT_RED)
        } else {
            Compositing::Shadowed
        };
        surface.blit(Blit {
            sprite: kind,
            frame: self.facing,
            pos: self.core.pos,
            compositing,
        });
    }
}

impl Entity for Player {
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
        self.hp > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::SpriteLibrary;

    fn player(pos: Vec2) -> Player {
        Player::new(SpriteLibrary::standard().player.clone(), pos)
    }

    #[test]
    fn facing_tracks_the_pointer() {
        let mut p = player(Vec2::new(400.0, 400.0));
        p.update(0.016, Vec2::new(500.0, 400.0));
        assert_eq!(p.facing, 0);
        // Pointer above the player: 90 degrees, frame 15
        p.update(0.016, Vec2::new(400.0, 300.0));
        assert_eq!(p.facing, 15);
        p.update(0.016, Vec2::new(300.0, 400.0));
        assert_eq!(p.facing, 30);
        p.update(0.016, Vec2::new(400.0, 500.0));
        assert_eq!(p.facing, 45);
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut p = player(Vec2::new(400.0, 400.0));
        p.set_movement(1.0, 0.0);
        p.set_movement(0.0, 1.0);
        p.update(1.0, Vec2::new(500.0, 400.0));

        let moved = p.core.pos - Vec2::new(400.0, 400.0);
        assert!((moved.length() - BASE_SPEED).abs() < 1e-3);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut p = player(Vec2::new(400.0, 400.0));
        p.set_movement(1.0, 0.0);
        p.set_movement(-1.0, 0.0);
        p.update(0.5, Vec2::new(500.0, 400.0));
        assert_eq!(p.core.pos, Vec2::new(400.0, 400.0));
    }

    #[test]
    fn movement_accumulator_resets_each_update() {
        let mut p = player(Vec2::new(400.0, 400.0));
        p.set_movement(1.0, 0.0);
        p.update(0.1, Vec2::new(500.0, 400.0));
        let after_first = p.core.pos;
        p.update(0.1, Vec2::new(500.0, 400.0));
        assert_eq!(p.core.pos, after_first);
    }

    #[test]
    fn boost_quadruples_speed() {
        let mut p = player(Vec2::new(200.0, 400.0));
        p.boosting = true;
        p.set_movement(1.0, 0.0);
        p.update(0.5, Vec2::new(500.0, 400.0));
        let moved = p.core.pos.x - 200.0;
        assert!((moved - BASE_SPEED * BOOST_MULT * 0.5).abs() < 1e-3);
    }

    #[test]
    fn cannot_leave_the_play_area() {
        let mut p = player(Vec2::new(100.0, 400.0));
        for _ in 0..120 {
            p.set_movement(-1.0, 0.0);
            p.update(1.0 / 30.0, Vec2::new(500.0, 400.0));
        }
        assert_eq!(p.core.pos.x, WALL_OFFSET + PLAYER_RADIUS);
    }

    #[test]
    fn damage_saturates_at_zero() {
        let mut p = player(Vec2::new(400.0, 400.0));
        assert_eq!(p.hp, MAX_HP);
        for _ in 0..10 {
            p.take_damage();
        }
        assert_eq!(p.hp, 0);
        assert!(!p.is_active());
    }

    #[test]
    fn immunity_ticks_down_and_expires() {
        let mut p = player(Vec2::new(400.0, 400.0));
        p.set_immunity(IMMUNITY_TIME);
        assert!(p.is_immune());

        let mut elapsed = 0.0;
        while elapsed < IMMUNITY_TIME + 0.1 {
            p.update(1.0 / 60.0, Vec2::new(500.0, 400.0));
            elapsed += 1.0 / 60.0;
        }
        assert!(!p.is_immune());
    }
}
