//! Basic and bomb coal enemies
//!
//! Both coal kinds climb out of the ground (invincible while emerging),
//! then home toward the player while a separation force keeps the pack
//! from collapsing into a single stack. A basic coal additionally plays a
//! short death animation before it despawns; a bomb coal is removed the
//! instant it dies, so it has no dying phase.

use glam::Vec2;

use super::entity::{Entity, EntityCore, SpriteHandle};
use super::geometry::Circle;
use super::gold::GoldCoal;
use crate::consts::*;
use crate::gfx::{palette, Blit, Compositing, DrawSurface};

/// Scale applied to the averaged separation offset
pub const SEPARATION_POWER: f32 = 500.0;
/// Peers within this distance push each other apart
pub const SEPARATION_RADIUS: f32 = 50.0;
/// Per-axis cap on the separation force
pub const MAX_SEPARATION_DIST: f32 = 50.0;
/// Seconds between animation frames while spawning or despawning
const FRAME_INTERVAL: f32 = 0.2;
/// Trailing frames of the basic coal sheet reserved for the death animation
const DEATH_FRAMES: u32 = 2;
/// Seconds the death animation runs before the coal despawns
const DEATH_TIME: f32 = 0.4;

/// Life-cycle phase shared by both coal kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoalPhase {
    /// Emerging from the ground, invincible
    Spawning,
    /// Chasing the player
    Active,
    /// Death animation playing (basic coal only)
    Dying,
    /// Sinking back into the ground during the end-of-round sweep
    Despawning,
    /// Finished; the next collision pass removes it
    Despawned,
}

/// Read-only view of everything that exerts separation forces
pub struct SeparationEnv<'a> {
    pub basics: &'a [BasicCoal],
    pub bombs: &'a [BombCoal],
    pub gold: Option<&'a GoldCoal>,
}

/// The steering offset pushing a coal away from its packed neighbors and
/// pulling it toward an active gold coal.
///
/// Offsets to every peer inside [`SEPARATION_RADIUS`] are averaged (the
/// coal itself is excluded by id), scaled by [`SEPARATION_POWER`], clamped
/// per axis and then negated so the result points away from the local
/// centroid. Returns zero when no peer is in range.
pub fn separation(id: u32, pos: Vec2, radius: f32, env: &SeparationEnv<'_>) -> Vec2 {
    let mut sum = Vec2::ZERO;
    let mut count = 0u32;

    let mut accumulate = |peer_id: u32, peer_pos: Vec2| {
        if peer_id == id {
            return;
        }
        if pos.distance_squared(peer_pos) <= SEPARATION_RADIUS * SEPARATION_RADIUS {
            sum += peer_pos - pos;
            count += 1;
        }
    };

    for coal in env.basics {
        accumulate(coal.core.id, coal.core.pos);
    }
    for coal in env.bombs {
        accumulate(coal.core.id, coal.core.pos);
    }

    let mut out = Vec2::ZERO;
    if count > 0 {
        let mut avg = sum / count as f32 * SEPARATION_POWER;
        avg.x = avg.x.clamp(-MAX_SEPARATION_DIST, MAX_SEPARATION_DIST);
        avg.y = avg.y.clamp(-MAX_SEPARATION_DIST, MAX_SEPARATION_DIST);
        out -= avg;
    }

    if let Some(gold) = env.gold {
        if gold.is_active() {
            let to_gold = gold.pos() - pos;
            if to_gold.length() <= gold.hit_circle().r + radius {
                out += to_gold.normalize_or_zero() * SEPARATION_POWER;
            }
        }
    }

    out
}

/// A regular coal. Dies to a single flame and leaves a fireball behind.
#[derive(Debug, Clone)]
pub struct BasicCoal {
    pub core: EntityCore,
    pub frame: u32,
    pub phase: CoalPhase,
    /// Ignored by damaging collisions while emerging or dying
    pub invincible: bool,
    time_dead: f32,
    frame_timer: f32,
}

impl BasicCoal {
    pub fn new(sprite: SpriteHandle, pos: Vec2) -> Self {
        Self {
            core: EntityCore::new(sprite, pos, COAL_RADIUS, BASE_SPEED),
            frame: 0,
            phase: CoalPhase::Spawning,
            invincible: true,
            time_dead: 0.0,
            frame_timer: 0.0,
        }
    }

    /// Last animation frame before the death frames start
    fn last_spawn_frame(&self) -> u32 {
        self.core.sprite.frames - 1 - DEATH_FRAMES
    }

    /// Begin the death animation. Idempotent; the coal stops colliding
    /// immediately and despawns once the animation finishes.
    pub fn set_dead(&mut self) {
        self.phase = CoalPhase::Dying;
        self.invincible = true;
        self.time_dead = 0.0;
    }

    /// Sink back into the ground (end-of-round sweep)
    pub fn start_despawn(&mut self) {
        self.phase = CoalPhase::Despawning;
        self.invincible = true;
        self.frame_timer = 0.0;
    }

    pub fn update(&mut self, dt: f32, player_pos: Vec2, separation: Vec2) {
        match self.phase {
            CoalPhase::Spawning => {
                self.frame_timer += dt;
                if self.frame_timer >= FRAME_INTERVAL {
                    self.frame_timer -= FRAME_INTERVAL;
                    self.frame += 1;
                    if self.frame >= self.last_spawn_frame() {
                        self.frame = self.last_spawn_frame();
                        self.phase = CoalPhase::Active;
                        self.invincible = false;
                    }
                }
            }
            CoalPhase::Active => {
                let homing = (player_pos - self.core.pos).normalize_or_zero();
                let velocity = homing * self.core.speed + separation;
                self.core.pos += velocity * dt;
                self.core.dir = homing;
            }
            CoalPhase::Dying => {
                self.time_dead += dt;
                if self.time_dead >= DEATH_TIME {
                    self.phase = CoalPhase::Despawned;
                } else if self.time_dead >= DEATH_TIME / 2.0 {
                    self.frame = self.core.sprite.frames - 1;
                } else {
                    self.frame = self.core.sprite.frames - DEATH_FRAMES;
                }
            }
            CoalPhase::Despawning => {
                self.frame_timer += dt;
                if self.frame_timer >= FRAME_INTERVAL {
                    self.frame_timer -= FRAME_INTERVAL;
                    if self.frame == 0 {
                        self.phase = CoalPhase::Despawned;
                    } else {
                        self.frame -= 1;
                    }
                }
            }
            CoalPhase::Despawned => {}
        }

        self.core.clamp_to_walls();
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let compositing = match self.phase {
            CoalPhase::Spawning | CoalPhase::Despawning => {
                Compositing::Darkened(self.frame as f32 / self.last_spawn_frame() as f32)
            }
            // Brief red flash right after the killing blow
            CoalPhase::Dying if self.time_dead < 0.01 => Compositing::Tinted(palette::HIT_RED),
            _ => Compositing::Shadowed,
        };
        surface.blit(Blit {
            sprite: self.core.sprite.kind,
            frame: self.frame,
            pos: self.core.pos,
            compositing,
        });
    }
}

impl Entity for BasicCoal {
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
        self.phase != CoalPhase::Despawned
    }
}

/// A bomb coal. Explodes when destroyed, taking nearby entities with it,
/// and detonates against the player from further away than its body.
#[derive(Debug, Clone)]
pub struct BombCoal {
    pub core: EntityCore,
    pub frame: u32,
    pub phase: CoalPhase,
    pub invincible: bool,
    frame_timer: f32,
}

impl BombCoal {
    pub fn new(sprite: SpriteHandle, pos: Vec2) -> Self {
        Self {
            core: EntityCore::new(sprite, pos, COAL_RADIUS, BASE_SPEED),
            frame: 0,
            phase: CoalPhase::Spawning,
            invincible: true,
            frame_timer: 0.0,
        }
    }

    pub fn start_despawn(&mut self) {
        self.phase = CoalPhase::Despawning;
        self.invincible = true;
        self.frame_timer = 0.0;
    }

    /// Detonation range against the player, wider than the body itself
    pub fn trigger_circle(&self) -> Circle {
        Circle::new(self.core.pos, EXPLOSION_RADIUS)
    }

    pub fn update(&mut self, dt: f32, player_pos: Vec2, separation: Vec2) {
        match self.phase {
            CoalPhase::Spawning => {
                self.frame_timer += dt;
                if self.frame_timer >= FRAME_INTERVAL {
                    self.frame_timer -= FRAME_INTERVAL;
                    self.frame += 1;
                    if self.frame >= self.core.sprite.frames - 1 {
                        self.frame = self.core.sprite.frames - 1;
                        self.phase = CoalPhase::Active;
                        self.invincible = false;
                    }
                }
            }
            CoalPhase::Active => {
                let homing = (player_pos - self.core.pos).normalize_or_zero();
                let velocity = homing * self.core.speed + separation;
                self.core.pos += velocity * dt;
                self.core.dir = homing;
            }
            CoalPhase::Despawning => {
                self.frame_timer += dt;
                if self.frame_timer >= FRAME_INTERVAL {
                    self.frame_timer -= FRAME_INTERVAL;
                    if self.frame == 0 {
                        self.phase = CoalPhase::Despawned;
                    } else {
                        self.frame -= 1;
                    }
                }
            }
            // Bomb coals never enter Dying; destruction removes them outright
            CoalPhase::Dying | CoalPhase::Despawned => {}
        }

        self.core.clamp_to_walls();
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let compositing = match self.phase {
            CoalPhase::Spawning | CoalPhase::Despawning => {
                Compositing::Darkened(self.frame as f32 / (self.core.sprite.frames - 1) as f32)
            }
            _ => Compositing::Shadowed,
        };
        surface.blit(Blit {
            sprite: self.core.sprite.kind,
            frame: self.frame,
            pos: self.core.pos,
            compositing,
        });
    }
}

impl Entity for BombCoal {
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
        self.phase != CoalPhase::Despawned
    }
}
