//! The per-tick update
//!
//! One call advances the whole session by at most [`MAX_TICK_DT`] seconds
//! of game time. Steering is two-phase: separation forces are computed
//! against a snapshot of the board before any coal moves, so update order
//! within a tick cannot bias the flocking.
//!
//! Losing the last health point starts a short choreography instead of
//! cutting straight to the menu: the board keeps moving with player
//! damage suppressed, then every enemy is blown up, then the player
//! walks back to the center.

use glam::Vec2;

use super::coal::{separation, CoalPhase, SeparationEnv};
use super::collision::resolve_collisions;
use super::entity::Entity;
use super::flame::Flame;
use super::state::{
    GamePhase, GameState, TickInput, BOOST_COOLDOWN, BOOST_WINDOW, FLAME_COOLDOWN,
};
use crate::audio::SoundCue;
use crate::consts::*;

/// Seconds into the choreography when the surviving enemies are blown up
const GAME_OVER_CLEAR_AT: f32 = 1.5;
/// Seconds into the choreography when the player starts walking home
const GAME_OVER_RECENTER_AT: f32 = 2.5;

pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.min(MAX_TICK_DT);

    match state.phase {
        GamePhase::Menu => {
            for explosion in &mut state.world.explosions {
                explosion.update(dt);
            }
            state.world.explosions.retain(|e| e.is_active());
            if input.start {
                state.reset_session();
                state.phase = GamePhase::Playing;
                state.world.cues.push(SoundCue::Button);
            }
        }
        GamePhase::Paused => {
            if state.pause_pressed(input) {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::GameOver => tick_game_over(state, input, dt),
        GamePhase::GameOverMenu => {
            advance_passive(state, input, dt);
            if input.restart {
                state.reset_session();
                state.phase = GamePhase::Playing;
                state.world.cues.push(SoundCue::Button);
            }
        }
    }
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.pause_pressed(input) {
        state.phase = GamePhase::Paused;
        return;
    }

    state.session_time += dt;
    state.flame_cooldown -= dt;
    state.flash_timer = (state.flash_timer - dt).max(0.0);
    if state.boost_cooldown > 0.0 {
        state.boost_cooldown -= dt;
    }
    if state.boost_window > 0.0 {
        state.boost_window -= dt;
    }

    let moving = input.up || input.down || input.left || input.right;
    if input.boost && moving && state.boost_cooldown <= 0.0 {
        state.boost_window = BOOST_WINDOW;
        state.boost_cooldown = BOOST_COOLDOWN;
        state.world.cues.push(SoundCue::Dash);
    }
    state.world.player.boosting = state.boost_window > 0.0;

    if input.fire && state.flame_cooldown <= 0.0 {
        let flame = Flame::new(
            state.world.sprites.flame.clone(),
            state.world.player.pos(),
            state.world.player.facing,
        );
        state.world.add_flame(flame);
        state.flame_cooldown = FLAME_COOLDOWN;
    }

    state.spawner.run(
        dt,
        state.score,
        state.session_time,
        &mut state.world,
        &mut state.rng,
    );

    advance_world(state, input, dt);

    if input.up {
        state.world.player.set_movement(0.0, -1.0);
    }
    if input.down {
        state.world.player.set_movement(0.0, 1.0);
    }
    if input.left {
        state.world.player.set_movement(-1.0, 0.0);
    }
    if input.right {
        state.world.player.set_movement(1.0, 0.0);
    }
    state.world.player.update(dt, input.pointer);

    if state.world.fireballs.iter().any(|f| f.just_hit_wall) {
        state.world.cues.push(SoundCue::Bounce);
    }

    resolve_collisions(state, false);

    state.score = state.score.min(SCORE_CAP);
    state.tick_display_score(dt);

    if state.world.player.hp == 0 {
        state.phase = GamePhase::GameOver;
        state.time_since_game_over = 0.0;
        log::info!(
            "game over: score {} after {:.1}s, {} coals destroyed",
            state.score,
            state.session_time,
            state.killed_enemies
        );
    }
}

/// Move every non-player entity, steering first against a snapshot
fn advance_world(state: &mut GameState, _input: &TickInput, dt: f32) {
    let world = &mut state.world;

    let env = SeparationEnv {
        basics: &world.basics,
        bombs: &world.bombs,
        gold: Some(&world.gold),
    };
    let basic_forces: Vec<Vec2> = world
        .basics
        .iter()
        .map(|c| separation(c.id(), c.pos(), c.hit_circle().r, &env))
        .collect();
    let bomb_forces: Vec<Vec2> = world
        .bombs
        .iter()
        .map(|c| separation(c.id(), c.pos(), c.hit_circle().r, &env))
        .collect();

    let player_pos = world.player.pos();
    for (coal, force) in world.basics.iter_mut().zip(basic_forces) {
        coal.update(dt, player_pos, force);
    }
    for (coal, force) in world.bombs.iter_mut().zip(bomb_forces) {
        coal.update(dt, player_pos, force);
    }

    world.gold.update(dt);
    for flame in &mut world.flames {
        flame.update(dt);
    }
    for fireball in &mut world.fireballs {
        fireball.update(dt);
    }
    for explosion in &mut world.explosions {
        explosion.update(dt);
    }
}

fn tick_game_over(state: &mut GameState, input: &TickInput, dt: f32) {
    let before = state.time_since_game_over;
    state.time_since_game_over += dt;
    state.flash_timer = (state.flash_timer - dt).max(0.0);

    advance_world(state, input, dt);
    state.world.player.boosting = false;
    state.world.player.update(dt, input.pointer);
    resolve_collisions(state, true);
    state.tick_display_score(dt);

    if before <= GAME_OVER_CLEAR_AT && state.time_since_game_over > GAME_OVER_CLEAR_AT {
        clear_board_with_explosions(state);
    }

    if state.time_since_game_over > GAME_OVER_RECENTER_AT {
        let center = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
        let player = &mut state.world.player;
        let dir = *state
            .recenter_dir
            .get_or_insert_with(|| (center - player.pos()).normalize_or_zero());

        player.core.pos += dir * player.core.speed * dt;
        // Snap once the center is passed (or was never away)
        if dir == Vec2::ZERO || (center - player.core.pos).dot(dir) <= 0.0 {
            player.core.pos = center;
            state.phase = GamePhase::GameOverMenu;
            state.round_over = true;
        }
    }
}

/// Blow up everything still standing when the choreography peaks. Coals
/// still underground sink back instead of exploding; already-dying coals
/// are left to finish their animation.
fn clear_board_with_explosions(state: &mut GameState) {
    let world = &mut state.world;
    let mut blasts = Vec::new();

    let mut i = 0;
    while i < world.basics.len() {
        match world.basics[i].phase {
            CoalPhase::Spawning => {
                world.basics[i].start_despawn();
                i += 1;
            }
            CoalPhase::Dying | CoalPhase::Despawning | CoalPhase::Despawned => i += 1,
            CoalPhase::Active => {
                blasts.push(world.basics[i].pos());
                world.basics.remove(i);
            }
        }
    }
    let mut i = 0;
    while i < world.bombs.len() {
        match world.bombs[i].phase {
            CoalPhase::Spawning => {
                world.bombs[i].start_despawn();
                i += 1;
            }
            CoalPhase::Dying | CoalPhase::Despawning | CoalPhase::Despawned => i += 1,
            CoalPhase::Active => {
                blasts.push(world.bombs[i].pos());
                world.bombs.remove(i);
            }
        }
    }

    for fireball in world.fireballs.drain(..) {
        blasts.push(fireball.pos());
    }
    if world.gold.is_active() {
        blasts.push(world.gold.pos());
        world.gold.deactivate();
    }

    for pos in blasts {
        world.add_explosion(pos);
    }
}

/// Keep the leftovers animating on the post-round screen
fn advance_passive(state: &mut GameState, input: &TickInput, dt: f32) {
    let world = &mut state.world;
    let player_pos = world.player.pos();
    for coal in &mut world.basics {
        coal.update(dt, player_pos, Vec2::ZERO);
    }
    for coal in &mut world.bombs {
        coal.update(dt, player_pos, Vec2::ZERO);
    }
    for explosion in &mut world.explosions {
        explosion.update(dt);
    }
    world.basics.retain(|c| c.is_active());
    world.bombs.retain(|c| c.is_active());
    world.explosions.retain(|e| e.is_active());
    world.player.update(dt, input.pointer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::coal::BasicCoal;

    const STEP: f32 = 1.0 / 60.0;

    fn playing_state(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, STEP);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn aim_right(pointer_from: Vec2) -> TickInput {
        TickInput { pointer: pointer_from + Vec2::new(100.0, 0.0), ..Default::default() }
    }

    #[test]
    fn menu_waits_for_start() {
        let mut state = GameState::new(1);
        tick(&mut state, &TickInput::default(), STEP);
        assert_eq!(state.phase, GamePhase::Menu);
        tick(&mut state, &TickInput { start: true, ..Default::default() }, STEP);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut state = playing_state(2);
        tick(&mut state, &TickInput::default(), 10.0);
        assert!((state.session_time - MAX_TICK_DT).abs() < 1e-5);
    }

    #[test]
    fn pause_freezes_the_session() {
        let mut state = playing_state(3);
        let t = state.session_time;

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, STEP);
        assert_eq!(state.phase, GamePhase::Paused);
        tick(&mut state, &TickInput::default(), STEP);
        tick(&mut state, &TickInput::default(), STEP);
        assert_eq!(state.session_time, t);

        tick(&mut state, &TickInput { pause: true, ..Default::default() }, STEP);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn firing_respects_the_cooldown() {
        let mut state = playing_state(4);
        let pointer = state.world.player.pos() + Vec2::new(100.0, 0.0);
        let fire = TickInput { fire: true, pointer, ..Default::default() };

        // Session grace expires first
        for _ in 0..30 {
            tick(&mut state, &fire, STEP);
        }
        let shots = state.world.flames.len()
            + state.world.fireballs.len(); // a flame may have scored already
        assert!(shots >= 1);

        // Roughly one shot per 0.4s over half a second of holding fire
        let mut fresh = playing_state(5);
        for _ in 0..30 {
            tick(&mut fresh, &TickInput { fire: true, pointer, ..Default::default() }, STEP);
        }
        assert!(fresh.flame_cooldown > 0.0);
    }

    #[test]
    fn dash_sets_window_and_cooldown() {
        let mut state = playing_state(6);
        let input = TickInput {
            boost: true,
            right: true,
            pointer: Vec2::new(500.0, 400.0),
            ..Default::default()
        };
        tick(&mut state, &input, STEP);
        assert!(state.boost_cooldown > 0.0);
        assert!(state.boost_window > 0.0);
        assert!(state.world.player.boosting);
        assert!(state.world.cues.contains(&SoundCue::Dash));

        // A second dash inside the cooldown does not retrigger
        let window = state.boost_window;
        tick(&mut state, &input, STEP);
        assert!(state.boost_window < window);
    }

    #[test]
    fn coals_spawn_while_playing() {
        let mut state = playing_state(7);
        for _ in 0..240 {
            let pos = state.world.player.pos();
            tick(&mut state, &aim_right(pos), STEP);
        }
        assert!(!state.world.basics.is_empty() || !state.world.bombs.is_empty());
    }

    #[test]
    fn losing_all_health_runs_the_full_choreography() {
        let mut state = playing_state(8);
        state.world.player.hp = 1;
        let player_pos = state.world.player.pos();

        // Plant an active coal on the player
        let mut coal = BasicCoal::new(state.world.sprites.basic_coal.clone(), player_pos);
        for _ in 0..30 {
            coal.update(0.05, Vec2::new(-1000.0, -1000.0), Vec2::ZERO);
        }
        coal.core.pos = player_pos + Vec2::new(10.0, 0.0);
        state.world.basics.push(coal);

        tick(&mut state, &aim_right(player_pos), STEP);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.world.player.hp, 0);
        assert!(!state.round_over);

        // Run the choreography to completion
        for _ in 0..600 {
            tick(&mut state, &aim_right(player_pos), STEP);
            if state.phase == GamePhase::GameOverMenu {
                break;
            }
        }
        assert_eq!(state.phase, GamePhase::GameOverMenu);
        assert!(state.round_over);
        assert_eq!(state.world.player.pos(), Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0));
        // Nothing hostile survives the clear
        assert!(state.world.fireballs.is_empty());
        assert!(!state.world.gold.is_active());

        // Restart begins a fresh round
        tick(&mut state, &TickInput { restart: true, ..Default::default() }, STEP);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.world.player.hp, 3);
    }

    #[test]
    fn damage_is_suppressed_during_the_choreography() {
        let mut state = playing_state(9);
        state.world.player.hp = 1;
        state.phase = GamePhase::GameOver;
        state.time_since_game_over = 0.0;
        let pos = state.world.player.pos();
        state.world.add_explosion(pos);

        tick(&mut state, &aim_right(pos), STEP);
        assert_eq!(state.world.player.hp, 1);
        assert!(!state.world.player.is_immune());
    }

    #[test]
    fn score_is_capped() {
        let mut state = playing_state(10);
        state.score = SCORE_CAP + 500;
        let pos = state.world.player.pos();
        tick(&mut state, &aim_right(pos), STEP);
        assert_eq!(state.score, SCORE_CAP);
    }
}
