//! Ember Rush - a top-down arcade survival game
//!
//! Core modules:
//! - `sim`: Entity simulation (state machines, steering, spawning, collisions)
//! - `gfx`: Drawing surface abstraction the sim renders through
//! - `audio`: Fire-and-forget sound cue abstraction
//! - `highscores`: Single-value persisted high score
//! - `settings`: Player preferences

pub mod audio;
pub mod gfx;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions in pixels
    pub const SCREEN_W: f32 = 800.0;
    pub const SCREEN_H: f32 = 800.0;

    /// Width of the decorative border; the play area is inset by this on all sides
    pub const WALL_OFFSET: f32 = 64.0;

    /// Largest amount of game time a single tick may simulate (30 FPS floor).
    /// Frame drops and long pauses are absorbed here instead of tunneling
    /// entities through each other.
    pub const MAX_TICK_DT: f32 = 1.0 / 30.0;

    /// Base movement speed shared by the player and enemies (pixels/second).
    /// Projectiles and the gold coal apply their own multipliers on top.
    pub const BASE_SPEED: f32 = 144.0;

    /// Hit-box radii
    pub const COAL_RADIUS: f32 = 19.0;
    pub const FLAME_RADIUS: f32 = 5.0;
    pub const EXPLOSION_RADIUS: f32 = 32.0;
    pub const FIREBALL_RADIUS: f32 = 36.0;
    pub const PLAYER_RADIUS: f32 = 19.0;

    /// Points granted per enemy (multiplied for certain kills)
    pub const POINTS_PER_COAL: u32 = 5;

    /// The score is capped here; anything above it in the persisted high
    /// score is evidence of tampering.
    pub const SCORE_CAP: u32 = 99_999;
}
