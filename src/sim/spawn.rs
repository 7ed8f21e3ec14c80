//! Spawn scheduling
//!
//! Decides when and where new coals appear and whether the gold coal
//! bonus is offered. Coal pressure ramps with session time, each bomb
//! pins the next cooldown to the fast tier, and passive play is punished
//! with the fastest spawn rate once the player has gone a while without
//! a kill.

use glam::Vec2;
use rand::Rng;

use super::coal::{BasicCoal, BombCoal};
use super::entity::Entity;
use super::state::World;
use crate::consts::*;

/// Seconds between gold coal eligibility checks
const GOLD_CHECK_INTERVAL: f32 = 1.0;
/// Score that must accrue since the last gold coal before another rolls
const GOLD_MIN_SCORE_INCREASE: u32 = 50;
/// A gold coal that dies within this window (not to the player) respawns
/// on the next check without rolling
const GOLD_FAST_DEATH: f32 = 2.0;
/// Cooldown after a gold coal spawn, per current health (1..=3)
const GOLD_COOLDOWNS: [f32; 3] = [10.0, 20.0, 30.0];
/// Coals plus fireballs required before gold becomes eligible
const GOLD_MIN_ENEMIES: usize = 3;
/// Spawn chance out of 100 per check, per current health (1..=3)
const GOLD_CHANCE_PER_HP: [u32; 3] = [20, 10, 5];
/// The gold coal never spawns closer to the player than this
const GOLD_PLAYER_CLEARANCE: f32 = 300.0;
/// Nor inside this range of an explosion or fireball
const GOLD_DANGER_CLEARANCE: f32 = 64.0;
/// Gold coals spawn on the inset border rectangle
const GOLD_EDGE_NEAR: f32 = 128.0;
const GOLD_EDGE_FAR: f32 = 672.0;

/// Coal cooldowns by pressure tier; the last entry is the lazy-player rate
const COAL_COOLDOWNS: [f32; 4] = [2.0, 1.5, 1.0, 0.5];
/// Session time thresholds selecting the first three cooldown tiers
const COOLDOWN_STAGES: [f32; 3] = [0.0, 10.0, 60.0];
/// Chance out of 100 that a spawn is a basic coal, by mix tier
const BASIC_PERCENT: [u32; 3] = [50, 66, 75];
/// Session time thresholds selecting the mix tier
const PERCENT_STAGES: [f32; 3] = [0.0, 30.0, 90.0];
/// Seconds without a kill before the lazy-player rate kicks in
const LAZY_TIME: f32 = 8.0;
/// Minimum spawn distance from any coal or the player
const COAL_CLEARANCE: f32 = 76.0;
/// Interior range coal spawn candidates are drawn from
pub const SPAWN_MIN: f32 = 88.0;
pub const SPAWN_MAX: f32 = 711.0;
/// Candidates tried before giving up on clearance
const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// All spawn timing state for one session
#[derive(Debug, Clone)]
pub struct SpawnManager {
    coal_cooldown: f32,
    gold_check_timer: f32,
    gold_cooldown: f32,
    score_at_last_gold: u32,
    /// Accumulates only while the gold coal is active, so it reads as the
    /// lifetime of the most recent gold coal
    time_since_gold_spawned: f32,
    /// Set when the payout fires, cleared when the next gold coal spawns
    pub gold_died_by_player: bool,
    /// Seconds since the player last destroyed a coal
    pub time_since_kill: f32,
}

impl Default for SpawnManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SpawnManager {
    pub fn new() -> Self {
        Self {
            coal_cooldown: 1.0,
            gold_check_timer: 0.0,
            gold_cooldown: 0.0,
            score_at_last_gold: 0,
            // Past the fast-death window so a fresh session never treats
            // "no gold yet" as a quick death
            time_since_gold_spawned: GOLD_FAST_DEATH + 0.1,
            gold_died_by_player: false,
            time_since_kill: 0.0,
        }
    }

    /// Advance the timers and perform any spawns that are due
    pub fn run<R: Rng>(
        &mut self,
        dt: f32,
        score: u32,
        session_time: f32,
        world: &mut World,
        rng: &mut R,
    ) {
        self.time_since_kill += dt;
        self.coal_cooldown -= dt;
        self.gold_check_timer += dt;
        if self.gold_cooldown > 0.0 {
            self.gold_cooldown -= dt;
        }
        if world.gold.is_active() {
            self.time_since_gold_spawned += dt;
        }

        if self.coal_cooldown <= 0.0 {
            self.spawn_coal(session_time, world, rng);
        }

        if self.gold_check_timer >= GOLD_CHECK_INTERVAL {
            self.gold_check_timer = 0.0;
            self.try_spawn_gold(score, world, rng);
        }
    }

    fn spawn_coal<R: Rng>(&mut self, session_time: f32, world: &mut World, rng: &mut R) {
        let pos = place_coal(rng, &world.basics, &world.bombs, world.player.pos());

        let mix_tier = stage_index(session_time, &PERCENT_STAGES);
        let is_basic = rng.random_range(1..=100u32) <= BASIC_PERCENT[mix_tier];

        let mut cooldown_tier = stage_index(session_time, &COOLDOWN_STAGES);
        if is_basic {
            world.add_basic(BasicCoal::new(world.sprites.basic_coal.clone(), pos));
        } else {
            world.add_bomb(BombCoal::new(world.sprites.bomb_coal.clone(), pos));
            // A bomb forces the fast tier, shorter than the early defaults
            cooldown_tier = 2;
        }
        if self.time_since_kill >= LAZY_TIME {
            cooldown_tier = 3;
        }

        self.coal_cooldown = COAL_COOLDOWNS[cooldown_tier];
        log::debug!(
            "coal spawn at ({:.0},{:.0}) basic={} next in {}s",
            pos.x,
            pos.y,
            is_basic,
            self.coal_cooldown
        );
    }

    fn try_spawn_gold<R: Rng>(&mut self, score: u32, world: &mut World, rng: &mut R) {
        if world.gold.is_active() {
            return;
        }
        if self.time_since_kill > LAZY_TIME {
            return;
        }
        if world.enemy_count() < GOLD_MIN_ENEMIES {
            return;
        }

        let hp = world.player.hp.clamp(1, 3) as usize;
        let fast_respawn =
            self.time_since_gold_spawned <= GOLD_FAST_DEATH && !self.gold_died_by_player;
        let rolled = self.gold_cooldown <= 0.0
            && score.saturating_sub(self.score_at_last_gold) >= GOLD_MIN_SCORE_INCREASE
            && rng.random_range(1..=100u32) <= GOLD_CHANCE_PER_HP[hp - 1];
        if !(fast_respawn || rolled) {
            return;
        }

        let pos = place_gold(rng, world.player.pos(), &world.explosions, &world.fireballs);
        world.gold.activate_at(pos);
        self.gold_cooldown = GOLD_COOLDOWNS[hp - 1];
        self.time_since_gold_spawned = 0.0;
        self.score_at_last_gold = score;
        self.gold_died_by_player = false;
        log::info!("gold coal spawned at ({:.0},{:.0})", pos.x, pos.y);
    }
}

/// Index of the last stage threshold at or below `t`
fn stage_index(t: f32, stages: &[f32; 3]) -> usize {
    let mut index = 0;
    for (i, stage) in stages.iter().enumerate() {
        if t >= *stage {
            index = i;
        }
    }
    index
}

/// Pick an interior spawn point clear of every coal and the player.
/// Falls back to the last candidate when no clear spot turns up.
pub fn place_coal<R: Rng>(
    rng: &mut R,
    basics: &[BasicCoal],
    bombs: &[BombCoal],
    player_pos: Vec2,
) -> Vec2 {
    let mut candidate = Vec2::ZERO;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        candidate = Vec2::new(
            rng.random_range(SPAWN_MIN..=SPAWN_MAX),
            rng.random_range(SPAWN_MIN..=SPAWN_MAX),
        );
        let clearance = COAL_CLEARANCE * COAL_CLEARANCE;
        let blocked = candidate.distance_squared(player_pos) < clearance
            || basics.iter().any(|c| candidate.distance_squared(c.pos()) < clearance)
            || bombs.iter().any(|c| candidate.distance_squared(c.pos()) < clearance);
        if !blocked {
            return candidate;
        }
    }
    candidate
}

/// Pick a gold coal spawn point on the inset border rectangle, away from
/// the player and clear of explosions and fireballs. Falls back to the
/// last candidate when nothing qualifies; the spawn is never dropped.
pub fn place_gold<R: Rng>(
    rng: &mut R,
    player_pos: Vec2,
    explosions: &[super::explosion::Explosion],
    fireballs: &[super::fireball::Fireball],
) -> Vec2 {
    let mut candidate = Vec2::new(GOLD_EDGE_NEAR, GOLD_EDGE_NEAR);
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let along = rng.random_range(GOLD_EDGE_NEAR..=GOLD_EDGE_FAR);
        candidate = match rng.random_range(0..4u32) {
            0 => Vec2::new(GOLD_EDGE_NEAR, along),
            1 => Vec2::new(GOLD_EDGE_FAR, along),
            2 => Vec2::new(along, GOLD_EDGE_NEAR),
            _ => Vec2::new(along, GOLD_EDGE_FAR),
        };

        let danger = GOLD_DANGER_CLEARANCE * GOLD_DANGER_CLEARANCE;
        let blocked = candidate.distance_squared(player_pos)
            < GOLD_PLAYER_CLEARANCE * GOLD_PLAYER_CLEARANCE
            || explosions.iter().any(|e| candidate.distance_squared(e.pos()) < danger)
            || fireballs.iter().any(|f| candidate.distance_squared(f.pos()) < danger);
        if !blocked {
            return candidate;
        }
    }
    candidate
}
