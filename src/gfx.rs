//! Drawing surface abstraction
//!
//! The simulation never touches pixels. Entities emit draw calls against
//! [`DrawSurface`] and an external renderer rasterizes them; nothing a
//! surface does feeds back into simulation state.

use glam::Vec2;

use crate::sim::entity::SpriteKind;
use crate::sim::geometry::{point_on_circle, Circle};

/// How a sprite blit is composited
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Compositing {
    Plain,
    /// Drop shadow offset toward the bottom right
    Shadowed,
    /// Solid recolor (hit flashes, immunity flicker, the dead-player tint)
    Tinted(u32),
    /// Recolor with alpha, used for motion trails
    TintedBlend { color: u32, alpha: f32 },
    /// Darkened blend, used while a coal emerges from underground
    Darkened(f32),
}

/// A sprite blit request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blit {
    pub sprite: SpriteKind,
    pub frame: u32,
    /// Center position; the renderer offsets by the sprite's half extents
    pub pos: Vec2,
    pub compositing: Compositing,
}

/// The draw calls the core emits. No return value affects the simulation.
pub trait DrawSurface {
    fn draw_rect(&mut self, min: Vec2, max: Vec2, color: u32);
    fn draw_line(&mut self, a: Vec2, b: Vec2, color: u32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, scale: u32);
    fn blit(&mut self, blit: Blit);
}

/// A recorded draw call, for tests and headless runs
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Rect { min: Vec2, max: Vec2, color: u32 },
    Line { a: Vec2, b: Vec2, color: u32 },
    Text { text: String, x: i32, y: i32, color: u32, scale: u32 },
    Blit(Blit),
}

/// Surface that records every call instead of rasterizing
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blits(&self) -> impl Iterator<Item = &Blit> {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Blit(b) => Some(b),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_rect(&mut self, min: Vec2, max: Vec2, color: u32) {
        self.calls.push(DrawCall::Rect { min, max, color });
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: u32) {
        self.calls.push(DrawCall::Line { a, b, color });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, scale: u32) {
        self.calls.push(DrawCall::Text { text: text.to_string(), x, y, color, scale });
    }

    fn blit(&mut self, blit: Blit) {
        self.calls.push(DrawCall::Blit(blit));
    }
}

/// Surface that discards everything (headless simulation)
#[derive(Debug, Default)]
pub struct NullSurface;

impl DrawSurface for NullSurface {
    fn draw_rect(&mut self, _min: Vec2, _max: Vec2, _color: u32) {}
    fn draw_line(&mut self, _a: Vec2, _b: Vec2, _color: u32) {}
    fn draw_text(&mut self, _text: &str, _x: i32, _y: i32, _color: u32, _scale: u32) {}
    fn blit(&mut self, _blit: Blit) {}
}

/// Segments used to approximate a hit-circle outline
const OUTLINE_SEGMENTS: u32 = 24;

/// Trace a circle outline as line segments, for the hitbox overlay
pub fn draw_circle_outline(surface: &mut dyn DrawSurface, circle: Circle, color: u32) {
    let step = std::f32::consts::TAU / OUTLINE_SEGMENTS as f32;
    for i in 0..OUTLINE_SEGMENTS {
        let a = point_on_circle(circle, i as f32 * step);
        let b = point_on_circle(circle, (i + 1) as f32 * step);
        surface.draw_line(a, b, color);
    }
}

/// Palette shared by the draw hooks
pub mod palette {
    pub const HIT_RED: u32 = 0xfd5f44;
    pub const GOLD: u32 = 0xedcd72;
    pub const GROUND: u32 = 0x745146;
    pub const HITBOX_GREEN: u32 = 0x00ff00;
    pub const SCORE_WHITE: u32 = 0xffffff;
    pub const SCORE_GREEN: u32 = 0x00ff00;
    pub const DEAD_BLUE: u32 = 0x0000ff;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_outline_segments_lie_on_the_radius() {
        let mut surface = RecordingSurface::new();
        let circle = Circle::new(Vec2::new(100.0, 200.0), 19.0);
        draw_circle_outline(&mut surface, circle, palette::HITBOX_GREEN);

        let lines: Vec<_> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { a, b, color } => Some((*a, *b, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 24);
        for (a, b, color) in lines {
            assert_eq!(color, palette::HITBOX_GREEN);
            assert!(((a - circle.pos).length() - circle.r).abs() < 1e-3);
            assert!(((b - circle.pos).length() - circle.r).abs() < 1e-3);
        }
    }
}
