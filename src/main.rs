//! Headless demo driver
//!
//! Runs a scripted session at a fixed 60 Hz without a window: the player
//! circles the arena firing at the pointer until the round ends, then the
//! score is submitted. Useful for profiling the simulation and sanity
//! checking a build.

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;

use ember_rush::audio::{CueRecorder, FocusGate};
use ember_rush::consts::{SCREEN_H, SCREEN_W};
use ember_rush::sim::state::FLASH_TIME;
use ember_rush::sim::{tick, GamePhase, GameState, TickInput};
use ember_rush::{HighScore, Settings};

const STEP: f32 = 1.0 / 60.0;
/// Give up if the scripted player somehow survives this long
const MAX_TICKS: u32 = 60 * 600;

fn main() {
    env_logger::init();

    let dir = env::temp_dir();
    let settings = Settings::load(&dir.join("ember-rush-settings.json"));
    let mut high_score = HighScore::load(dir.join("ember-rush-highscore.txt"));
    if high_score.is_tampered() {
        log::warn!("stored high score exceeds the score cap, file was edited");
    }
    log::info!(
        "previous best {}, sfx volume {:.2}",
        high_score.value(),
        settings.effective_sfx_volume()
    );

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(seed);
    state.show_hitboxes = settings.show_hitboxes;
    if settings.reduced_flash {
        state.flash_duration = FLASH_TIME / 2.0;
    }
    // No window here, so the gate stays focused for the whole run
    let mut cues = FocusGate::new(CueRecorder::new(), settings.mute_on_blur);

    tick(&mut state, &TickInput { start: true, ..Default::default() }, STEP);

    let center = Vec2::new(SCREEN_W / 2.0, SCREEN_H / 2.0);
    let mut ticks = 0u32;
    while ticks < MAX_TICKS {
        let t = ticks as f32 * STEP;
        // Circle the center while aiming at a moving point ahead
        let angle = t * 0.8;
        let input = TickInput {
            up: angle.sin() > 0.0,
            down: angle.sin() < -0.3,
            left: angle.cos() < -0.3,
            right: angle.cos() > 0.0,
            fire: true,
            boost: ticks % 180 == 0,
            pointer: center + Vec2::new(angle.cos(), -angle.sin()) * 200.0,
            ..Default::default()
        };

        tick(&mut state, &input, STEP);
        state.world.drain_cues(&mut cues);
        ticks += 1;

        if state.round_over {
            break;
        }
    }

    if state.phase == GamePhase::GameOverMenu {
        let is_record = high_score.submit(state.score);
        log::info!(
            "round over after {:.1}s: score {} ({} kills, record: {})",
            state.session_time,
            state.score,
            state.killed_enemies,
            is_record
        );
    } else {
        log::info!("stopped after {} ticks with score {}", ticks, state.score);
    }
    println!(
        "score {} | kills {} | {} sound cues | best {}",
        state.score,
        state.killed_enemies,
        cues.inner().played.len(),
        high_score.value()
    );
}
