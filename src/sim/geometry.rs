//! Circle-based collision primitives and angle helpers
//!
//! Every entity collides as a circle; this module is the sole collision
//! primitive the resolution pass builds on.

use glam::Vec2;

/// A center position and radius pair, derived on demand from entity state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub pos: Vec2,
    pub r: f32,
}

impl Circle {
    pub fn new(pos: Vec2, r: f32) -> Self {
        Self { pos, r }
    }
}

/// Squared distance between two points (saves the sqrt)
#[inline]
pub fn squared_dist(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x) * (a.x - b.x) + (a.y - b.y) * (a.y - b.y)
}

/// Whether two circles overlap.
///
/// A non-positive radius never overlaps anything, and exact tangency does
/// not count as an overlap (strict inequality).
#[inline]
pub fn circles_overlap(a: Circle, b: Circle) -> bool {
    if a.r <= 0.0 || b.r <= 0.0 {
        return false;
    }
    squared_dist(a.pos, b.pos) < (a.r + b.r) * (a.r + b.r)
}

/// A point on the outline of a circle at the given angle (radians)
#[inline]
pub fn point_on_circle(c: Circle, angle: f32) -> Vec2 {
    Vec2::new(angle.cos() * c.r + c.pos.x, angle.sin() * c.r + c.pos.y)
}

/// The angle from one point to another in degrees, in [0, 360).
///
/// The screen y-axis points down, so the result is negated to read as a
/// conventional counter-clockwise angle. A vertical line (dx == 0) is
/// special-cased so the function never divides by zero.
#[inline]
pub fn dir_in_degrees(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    if dx != 0.0 {
        let angle = dy.atan2(dx).to_degrees() * -1.0;
        if angle < 0.0 { angle + 360.0 } else { angle }
    } else if dy < 0.0 {
        90.0
    } else {
        270.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn overlap_is_strict() {
        // Exactly tangent circles do not overlap
        let a = Circle::new(Vec2::new(0.0, 0.0), 5.0);
        let b = Circle::new(Vec2::new(10.0, 0.0), 5.0);
        assert!(!circles_overlap(a, b));

        let c = Circle::new(Vec2::new(9.9, 0.0), 5.0);
        assert!(circles_overlap(a, c));
    }

    #[test]
    fn zero_radius_never_overlaps() {
        let a = Circle::new(Vec2::ZERO, 0.0);
        let b = Circle::new(Vec2::ZERO, 100.0);
        assert!(!circles_overlap(a, b));
        assert!(!circles_overlap(b, a));
    }

    #[test]
    fn cardinal_angles() {
        let o = Vec2::new(100.0, 100.0);
        assert_eq!(dir_in_degrees(o, Vec2::new(200.0, 100.0)), 0.0);
        // Up on screen is +90 degrees
        assert_eq!(dir_in_degrees(o, Vec2::new(100.0, 0.0)), 90.0);
        assert_eq!(dir_in_degrees(o, Vec2::new(0.0, 100.0)), 180.0);
        assert_eq!(dir_in_degrees(o, Vec2::new(100.0, 200.0)), 270.0);
    }

    #[test]
    fn point_on_circle_lies_on_radius() {
        let c = Circle::new(Vec2::new(10.0, 20.0), 5.0);
        let p = point_on_circle(c, 0.0);
        assert!((p - Vec2::new(15.0, 20.0)).length() < 1e-4);
    }

    proptest! {
        #[test]
        fn overlap_is_symmetric(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            ar in -50.0f32..50.0, br in -50.0f32..50.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert_eq!(circles_overlap(a, b), circles_overlap(b, a));
        }

        #[test]
        fn non_positive_radius_never_overlaps(
            ax in -1000.0f32..1000.0, ay in -1000.0f32..1000.0,
            bx in -1000.0f32..1000.0, by in -1000.0f32..1000.0,
            ar in -50.0f32..=0.0, br in 0.1f32..50.0,
        ) {
            let a = Circle::new(Vec2::new(ax, ay), ar);
            let b = Circle::new(Vec2::new(bx, by), br);
            prop_assert!(!circles_overlap(a, b));
        }

        #[test]
        fn angle_in_range(
            fx in -1000.0f32..1000.0, fy in -1000.0f32..1000.0,
            tx in -1000.0f32..1000.0, ty in -1000.0f32..1000.0,
        ) {
            let angle = dir_in_degrees(Vec2::new(fx, fy), Vec2::new(tx, ty));
            prop_assert!((0.0..360.0).contains(&angle));
        }
    }
}
