//! Session state
//!
//! [`World`] owns every live entity plus the sound cues the current tick
//! produced; [`GameState`] wraps a world with the phase machine, the
//! score, the weapon and dash timers and the seeded RNG that drives spawn
//! decisions. The per-tick logic itself lives in [`super::tick`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::coal::{BasicCoal, BombCoal};
use super::entity::{Entity, SpriteLibrary};
use super::flame::facing_dir;
use super::explosion::Explosion;
use super::fireball::Fireball;
use super::flame::Flame;
use super::gold::GoldCoal;
use super::player::Player;
use super::spawn::SpawnManager;
use crate::audio::{AudioSink, SoundCue};
use crate::consts::*;
use crate::gfx::{draw_circle_outline, palette, DrawSurface};

/// Seconds between flame shots
pub const FLAME_COOLDOWN: f32 = 0.4;
/// Weapon lockout at session start, so a held fire button does not shoot
/// on the very first frame
const SESSION_GRACE: f32 = 0.3;
/// Seconds a dash lasts
pub const BOOST_WINDOW: f32 = 0.2;
/// Seconds before the next dash is available
pub const BOOST_COOLDOWN: f32 = 1.0;
/// Duration of the gold payout screen flash
pub const FLASH_TIME: f32 = 1.4;
/// Seconds per displayed-score increment while it catches up
const SCORE_TICK: f32 = 0.04;

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Playing,
    Paused,
    /// Death choreography running; input is ignored
    GameOver,
    /// Choreography finished, waiting for a restart
    GameOverMenu,
}

/// One tick's worth of sampled input
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
    pub fire: bool,
    /// Aim position in screen coordinates
    pub pointer: Vec2,
    pub pause: bool,
    pub start: bool,
    pub restart: bool,
}

/// Every live entity plus the cues the current tick produced
#[derive(Debug)]
pub struct World {
    pub player: Player,
    pub gold: GoldCoal,
    pub basics: Vec<BasicCoal>,
    pub bombs: Vec<BombCoal>,
    pub flames: Vec<Flame>,
    pub fireballs: Vec<Fireball>,
    pub explosions: Vec<Explosion>,
    pub sprites: SpriteLibrary,
    pub cues: Vec<SoundCue>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        let sprites = SpriteLibrary::standard();
        let center = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
        Self {
            player: Player::new(sprites.player.clone(), center),
            gold: GoldCoal::new(sprites.gold_coal.clone()),
            basics: Vec::new(),
            bombs: Vec::new(),
            flames: Vec::new(),
            fireballs: Vec::new(),
            explosions: Vec::new(),
            sprites,
            cues: Vec::new(),
        }
    }

    /// Coals plus fireballs, the count the gold coal eligibility uses
    pub fn enemy_count(&self) -> usize {
        self.basics.len() + self.bombs.len() + self.fireballs.len()
    }

    pub fn add_basic(&mut self, coal: BasicCoal) {
        self.basics.push(coal);
    }

    pub fn add_bomb(&mut self, coal: BombCoal) {
        self.bombs.push(coal);
    }

    pub fn add_flame(&mut self, flame: Flame) {
        self.cues.push(SoundCue::Shoot);
        self.flames.push(flame);
    }

    pub fn add_fireball(&mut self, fireball: Fireball) {
        self.fireballs.push(fireball);
    }

    pub fn add_explosion(&mut self, pos: Vec2) {
        self.cues.push(SoundCue::Explosion);
        self.explosions
            .push(Explosion::new(self.sprites.explosion.clone(), pos));
    }

    /// Hand the tick's cues to a sink, in emission order
    pub fn drain_cues(&mut self, sink: &mut dyn AudioSink) {
        for cue in self.cues.drain(..) {
            sink.play(cue);
        }
    }

    /// Draw every entity in back-to-front order
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        // Emerging and sinking coals render under everything else
        for coal in self.basics.iter().filter(|c| c.invincible) {
            coal.draw(surface);
        }
        for coal in self.bombs.iter().filter(|c| c.invincible) {
            coal.draw(surface);
        }
        for coal in self.basics.iter().filter(|c| !c.invincible) {
            coal.draw(surface);
        }
        for coal in self.bombs.iter().filter(|c| !c.invincible) {
            coal.draw(surface);
        }
        self.gold.draw(surface);
        for flame in &self.flames {
            flame.draw(surface);
        }
        self.player.draw(surface);
        for fireball in &self.fireballs {
            fireball.draw(surface);
        }
        for explosion in &self.explosions {
            explosion.draw(surface);
        }
    }
}

/// The whole session
#[derive(Debug)]
pub struct GameState {
    pub phase: GamePhase,
    pub world: World,
    pub spawner: SpawnManager,
    pub rng: Pcg32,
    pub score: u32,
    /// Lags behind `score` and counts up a point at a time
    pub display_score: u32,
    score_tick_timer: f32,
    pub session_time: f32,
    pub flame_cooldown: f32,
    pub boost_cooldown: f32,
    pub boost_window: f32,
    /// Gold payout screen flash countdown
    pub flash_timer: f32,
    pub time_since_game_over: f32,
    /// Coals destroyed this session
    pub killed_enemies: u32,
    /// Direction the player recenters along during the death choreography
    pub recenter_dir: Option<Vec2>,
    /// Set once when a session ends, consumed by the high score submit
    pub round_over: bool,
    /// How long the gold payout flash runs, shortened by the reduced
    /// flash preference
    pub flash_duration: f32,
    /// Debug overlay tracing every hit circle
    pub show_hitboxes: bool,
    prev_pause: bool,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            world: World::new(),
            spawner: SpawnManager::new(),
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            display_score: 0,
            score_tick_timer: 0.0,
            session_time: 0.0,
            flame_cooldown: SESSION_GRACE,
            boost_cooldown: 0.0,
            boost_window: 0.0,
            flash_timer: 0.0,
            time_since_game_over: 0.0,
            killed_enemies: 0,
            recenter_dir: None,
            round_over: false,
            flash_duration: FLASH_TIME,
            show_hitboxes: false,
            prev_pause: false,
        }
    }

    /// Reset everything a fresh round needs; the RNG keeps its stream and
    /// cosmetic choices carry over.
    pub fn reset_session(&mut self) {
        let alt_skin = self.world.player.alt_skin;
        self.world = World::new();
        self.world.player.alt_skin = alt_skin;
        self.spawner = SpawnManager::new();
        self.score = 0;
        self.display_score = 0;
        self.score_tick_timer = 0.0;
        self.session_time = 0.0;
        self.flame_cooldown = SESSION_GRACE;
        self.boost_cooldown = 0.0;
        self.boost_window = 0.0;
        self.flash_timer = 0.0;
        self.time_since_game_over = 0.0;
        self.killed_enemies = 0;
        self.recenter_dir = None;
        self.round_over = false;
    }

    /// Rising edge of the pause button
    pub(super) fn pause_pressed(&mut self, input: &TickInput) -> bool {
        let pressed = input.pause && !self.prev_pause;
        self.prev_pause = input.pause;
        pressed
    }

    /// Advance the displayed score toward the real one
    pub(super) fn tick_display_score(&mut self, dt: f32) {
        if self.display_score >= self.score {
            self.display_score = self.display_score.min(self.score);
            self.score_tick_timer = 0.0;
            return;
        }
        self.score_tick_timer += dt;
        while self.score_tick_timer >= SCORE_TICK && self.display_score < self.score {
            self.score_tick_timer -= SCORE_TICK;
            self.display_score += 1;
        }
    }

    /// Draw the full frame: arena, entities, hearts and score
    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        surface.draw_rect(
            Vec2::new(WALL_OFFSET, WALL_OFFSET),
            Vec2::new(SCREEN_W - WALL_OFFSET, SCREEN_H - WALL_OFFSET),
            palette::GROUND,
        );

        self.world.draw(surface);

        if self.show_hitboxes {
            self.draw_hitboxes(surface);
        }

        for i in 0..self.world.player.hp {
            let x = 16.0 + i as f32 * 24.0;
            surface.draw_rect(
                Vec2::new(x, 16.0),
                Vec2::new(x + 16.0, 32.0),
                palette::HIT_RED,
            );
        }

        let color = if self.display_score < self.score {
            palette::SCORE_GREEN
        } else {
            palette::SCORE_WHITE
        };
        surface.draw_text(&format!("{:05}", self.display_score), 700, 16, color, 2);
    }

    /// Trace the live hit circles, plus the player's facing line and the
    /// bomb detonation ranges. Spawning and dying coals are collision
    /// exempt and draw nothing.
    fn draw_hitboxes(&self, surface: &mut dyn DrawSurface) {
        let world = &self.world;
        let green = palette::HITBOX_GREEN;

        draw_circle_outline(surface, world.player.hit_circle(), green);
        let facing = facing_dir(world.player.facing);
        surface.draw_line(
            world.player.pos(),
            world.player.pos() + facing * world.player.hit_circle().r * 2.0,
            green,
        );

        for coal in world.basics.iter().filter(|c| !c.invincible) {
            draw_circle_outline(surface, coal.hit_circle(), green);
        }
        for coal in world.bombs.iter().filter(|c| !c.invincible) {
            draw_circle_outline(surface, coal.hit_circle(), green);
            draw_circle_outline(surface, coal.trigger_circle(), palette::HIT_RED);
        }
        if world.gold.is_active() {
            draw_circle_outline(surface, world.gold.hit_circle(), green);
        }
        for flame in &world.flames {
            draw_circle_outline(surface, flame.hit_circle(), green);
        }
        for fireball in &world.fireballs {
            draw_circle_outline(surface, fireball.hit_circle(), green);
        }
        for explosion in &world.explosions {
            draw_circle_outline(surface, explosion.hit_circle(), green);
        }
    }
}
