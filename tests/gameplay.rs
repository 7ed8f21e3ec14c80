//! End-to-end gameplay scenarios driven through the public tick API

use glam::Vec2;

use ember_rush::audio::SoundCue;
use ember_rush::consts::*;
use ember_rush::sim::coal::{BasicCoal, BombCoal, CoalPhase};
use ember_rush::sim::fireball::Fireball;
use ember_rush::sim::{tick, Entity, GamePhase, GameState, TickInput};

const STEP: f32 = 1.0 / 60.0;

fn start(seed: u64) -> GameState {
    let mut state = GameState::new(seed);
    tick(&mut state, &TickInput { start: true, ..Default::default() }, STEP);
    assert_eq!(state.phase, GamePhase::Playing);
    state.world.cues.clear();
    state
}

/// A basic coal forced past its spawning animation and parked at `pos`
fn planted_basic(state: &GameState, pos: Vec2) -> BasicCoal {
    let mut coal = BasicCoal::new(state.world.sprites.basic_coal.clone(), pos);
    for _ in 0..30 {
        coal.update(0.05, Vec2::new(-1000.0, -1000.0), Vec2::ZERO);
    }
    assert_eq!(coal.phase, CoalPhase::Active);
    coal.core.pos = pos;
    coal
}

fn planted_bomb(state: &GameState, pos: Vec2) -> BombCoal {
    let mut coal = BombCoal::new(state.world.sprites.bomb_coal.clone(), pos);
    for _ in 0..30 {
        coal.update(0.05, Vec2::new(-1000.0, -1000.0), Vec2::ZERO);
    }
    assert_eq!(coal.phase, CoalPhase::Active);
    coal.core.pos = pos;
    coal
}

#[test]
fn shooting_a_coal_yields_a_fireball_and_ten_points() {
    let mut state = start(1);
    state.world.player.core.pos = Vec2::new(400.0, 400.0);
    let coal = planted_basic(&state, Vec2::new(500.0, 400.0));
    state.world.basics.push(coal);

    // Aim right and hold fire; the session grace delays the first shot
    let input = TickInput {
        fire: true,
        pointer: Vec2::new(600.0, 400.0),
        ..Default::default()
    };
    let mut scored = false;
    for _ in 0..120 {
        tick(&mut state, &input, STEP);
        if state.score > 0 {
            scored = true;
            break;
        }
    }

    assert!(scored);
    assert_eq!(state.score, 10);
    assert_eq!(state.killed_enemies, 1);
    assert!(state.world.basics.is_empty());
    assert_eq!(state.world.fireballs.len(), 1);
    // The fireball inherits the flame's rightward flight
    assert!(state.world.fireballs[0].core.dir.x > 0.9);
    assert!(state.world.cues.contains(&SoundCue::Shoot));
    assert!(state.world.cues.contains(&SoundCue::CoalHit));
}

#[test]
fn killing_the_same_coal_cannot_score_twice() {
    let mut state = start(2);
    state.world.player.core.pos = Vec2::new(400.0, 400.0);
    let coal = planted_basic(&state, Vec2::new(500.0, 400.0));
    state.world.basics.push(coal);

    let input = TickInput {
        fire: true,
        pointer: Vec2::new(600.0, 400.0),
        ..Default::default()
    };
    for _ in 0..120 {
        tick(&mut state, &input, STEP);
        if state.score > 0 {
            break;
        }
    }
    assert_eq!(state.score, 10);

    // With the trigger released nothing else can score
    let idle = TickInput { pointer: Vec2::new(600.0, 400.0), ..Default::default() };
    for _ in 0..30 {
        tick(&mut state, &idle, STEP);
    }
    assert_eq!(state.score, 10);
    let coal_hits = state.world.cues.iter().filter(|c| **c == SoundCue::CoalHit).count();
    assert_eq!(coal_hits, 1);
}

#[test]
fn contact_damage_grants_immunity_until_it_expires() {
    let mut state = start(3);
    state.world.player.core.pos = Vec2::new(400.0, 400.0);
    state.world.basics.push(planted_basic(&state, Vec2::new(410.0, 400.0)));

    let input = TickInput { pointer: Vec2::new(600.0, 400.0), ..Default::default() };
    tick(&mut state, &input, STEP);
    assert_eq!(state.world.player.hp, 2);
    assert!(state.world.player.is_immune());

    // A second coal during the immunity window costs nothing
    state.world.basics.push(planted_basic(&state, Vec2::new(410.0, 400.0)));
    tick(&mut state, &input, STEP);
    assert_eq!(state.world.player.hp, 2);
    assert!(state.world.cues.contains(&SoundCue::Contact));
}

#[test]
fn bomb_detonates_at_range_and_the_blast_lands_later() {
    let mut state = start(4);
    state.world.player.core.pos = Vec2::new(400.0, 400.0);
    // Outside body contact but inside the detonation trigger
    state.world.bombs.push(planted_bomb(&state, Vec2::new(445.0, 400.0)));

    let still = TickInput { pointer: Vec2::new(600.0, 400.0), ..Default::default() };
    tick(&mut state, &still, STEP);
    assert!(state.world.bombs.iter().all(|b| b.pos() != Vec2::new(445.0, 400.0)));
    assert!(!state.world.explosions.is_empty());
    assert_eq!(state.world.player.hp, 3);

    // Standing still in the blast costs a heart on a following tick
    let mut hp_after = state.world.player.hp;
    for _ in 0..5 {
        tick(&mut state, &still, STEP);
        hp_after = state.world.player.hp;
        if hp_after < 3 {
            break;
        }
    }
    assert_eq!(hp_after, 2);
    assert_eq!(state.score, 0);
}

#[test]
fn gold_payout_pays_per_enemy_and_clears_the_board() {
    let mut state = start(5);
    state.world.player.core.pos = Vec2::new(400.0, 400.0);
    state.world.basics.push(planted_basic(&state, Vec2::new(150.0, 150.0)));
    state.world.basics.push(planted_basic(&state, Vec2::new(650.0, 150.0)));
    state.world.bombs.push(planted_bomb(&state, Vec2::new(150.0, 650.0)));
    state.world.fireballs.push(Fireball::new(
        state.world.sprites.fireball.clone(),
        Vec2::new(650.0, 650.0),
        Vec2::new(0.0, 1.0),
    ));
    state.world.gold.activate_at(Vec2::new(405.0, 400.0));

    tick(&mut state, &TickInput { pointer: Vec2::new(600.0, 400.0), ..Default::default() }, STEP);

    // Two basics and one bomb at five points each; fireballs clear free
    assert_eq!(state.score, 15);
    assert!(state.world.basics.is_empty());
    assert!(state.world.bombs.is_empty());
    assert!(state.world.fireballs.is_empty());
    assert!(!state.world.gold.is_active());
    assert!(state.world.player.gold_hit);
    assert!(state.world.player.is_immune());
    assert!(state.flash_timer > 0.0);
    assert!(state.world.cues.contains(&SoundCue::Gold));
}

#[test]
fn fireballs_bounce_off_walls_and_stay_inside() {
    let mut state = start(6);
    state.world.player.core.pos = Vec2::new(400.0, 700.0);
    state.world.fireballs.push(Fireball::new(
        state.world.sprites.fireball.clone(),
        Vec2::new(400.0, 150.0),
        Vec2::new(1.0, 0.0),
    ));

    let still = TickInput { pointer: Vec2::new(600.0, 700.0), ..Default::default() };
    let mut bounces = 0;
    for _ in 0..600 {
        tick(&mut state, &still, STEP);
        if state.world.fireballs.is_empty() {
            break;
        }
        let f = &state.world.fireballs[0];
        let r = FIREBALL_RADIUS;
        assert!(f.pos().x - r >= WALL_OFFSET - 1.0);
        assert!(f.pos().x + r <= SCREEN_W - WALL_OFFSET + 1.0);
        if f.just_hit_wall {
            bounces += 1;
        }
    }
    assert!(bounces >= 2);
    assert!(state.world.cues.contains(&SoundCue::Bounce));
}

#[test]
fn a_whole_round_reaches_the_game_over_menu() {
    let mut state = start(7);
    // Stand still and never fire; the coals win eventually
    let passive = TickInput { pointer: Vec2::new(600.0, 400.0), ..Default::default() };
    for _ in 0..60 * 120 {
        tick(&mut state, &passive, STEP);
        if state.round_over {
            break;
        }
    }

    assert!(state.round_over);
    assert_eq!(state.phase, GamePhase::GameOverMenu);
    assert_eq!(state.world.player.hp, 0);
    assert_eq!(
        state.world.player.pos(),
        Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0)
    );
    assert!(state.world.fireballs.is_empty());

    // And a restart is a clean slate
    tick(&mut state, &TickInput { restart: true, ..Default::default() }, STEP);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.world.player.hp, 3);
    assert_eq!(state.score, 0);
    assert!(!state.round_over);
}
