//! Collision resolution
//!
//! One pass per entity pairing, in a fixed order, once per tick. Removals
//! are two-phase: a pass marks or collects what it destroys and the sweep
//! happens after the pass, so no list is mutated while it is iterated
//! and entity order is preserved.
//!
//! `suppress_damage` keeps the death choreography honest: projectiles and
//! explosions still interact with each other but can no longer hurt the
//! player.

use super::entity::Entity;
use super::fireball::Fireball;
use super::geometry::circles_overlap;
use super::player::IMMUNITY_TIME;
use super::state::{GameState, FLASH_TIME};
use crate::audio::SoundCue;
use crate::consts::*;

pub fn resolve_collisions(state: &mut GameState, suppress_damage: bool) {
    let world = &mut state.world;

    world.basics.retain(|c| c.is_active());
    world.explosions.retain(|e| e.is_active());
    world.flames.retain(|f| f.is_active());

    // Gold payout. Everything hostile is cleared, so nothing after this
    // point could apply, hence the early return.
    if world.gold.is_active()
        && circles_overlap(world.gold.hit_circle(), world.player.hit_circle())
    {
        let bounty = (world.basics.len() + world.bombs.len()) as u32;
        state.score = state.score.saturating_add(POINTS_PER_COAL * bounty);
        world.basics.clear();
        world.bombs.clear();
        world.fireballs.clear();
        world.explosions.clear();
        world.gold.deactivate();
        world.player.gold_hit = true;
        world.player.set_immunity(IMMUNITY_TIME);
        world.cues.push(SoundCue::Gold);
        world.cues.push(SoundCue::Flash);
        state.spawner.gold_died_by_player = true;
        state.flash_timer = state.flash_duration;
        log::info!("gold payout: +{} points", POINTS_PER_COAL * bounty);
        return;
    }

    // Explosion positions collected by the passes below. They are spawned
    // at the very end, so a blast created this tick first hits next tick.
    let mut blasts = Vec::new();

    // Fireballs destroy nearly everything they touch. Hits are marked and
    // swept after the pass so the list is never mutated mid-iteration.
    for i in 0..world.fireballs.len() {
        if world.fireballs[i].to_be_erased {
            continue;
        }
        let circle = world.fireballs[i].hit_circle();

        let mut collided = false;
        for j in (i + 1)..world.fireballs.len() {
            if world.fireballs[j].to_be_erased {
                continue;
            }
            if circles_overlap(circle, world.fireballs[j].hit_circle()) {
                blasts.push((circle.pos + world.fireballs[j].pos()) / 2.0);
                world.fireballs[i].to_be_erased = true;
                world.fireballs[j].to_be_erased = true;
                collided = true;
                break;
            }
        }
        if collided {
            continue;
        }

        world.flames.retain(|f| !circles_overlap(circle, f.hit_circle()));

        if circles_overlap(circle, world.player.hit_circle()) {
            // The blast, not the fireball body, is what hurts the player
            blasts.push(world.player.pos());
            world.fireballs[i].to_be_erased = true;
            continue;
        }

        if let Some(k) = world
            .bombs
            .iter()
            .position(|b| !b.invincible && circles_overlap(circle, b.hit_circle()))
        {
            blasts.push(world.bombs[k].pos());
            world.bombs.remove(k);
            world.fireballs[i].to_be_erased = true;
            continue;
        }

        if let Some(k) = world
            .basics
            .iter()
            .position(|c| !c.invincible && circles_overlap(circle, c.hit_circle()))
        {
            blasts.push(world.basics[k].pos());
            world.basics.remove(k);
            world.fireballs[i].to_be_erased = true;
            continue;
        }

        if world.gold.is_active() && circles_overlap(circle, world.gold.hit_circle()) {
            blasts.push(world.gold.pos());
            world.gold.deactivate();
            world.fireballs[i].to_be_erased = true;
        }
    }
    world.fireballs.retain(|f| !f.to_be_erased);

    // Bomb coals detonate against the player from their wider trigger
    // range, or when a flame sets them off.
    let mut i = 0;
    while i < world.bombs.len() {
        if world.bombs[i].invincible {
            i += 1;
            continue;
        }

        if circles_overlap(world.bombs[i].trigger_circle(), world.player.hit_circle()) {
            blasts.push(world.bombs[i].pos());
            world.bombs.remove(i);
            continue;
        }

        let body = world.bombs[i].hit_circle();
        if let Some(k) = world
            .flames
            .iter()
            .position(|f| circles_overlap(body, f.hit_circle()))
        {
            blasts.push(world.bombs[i].pos());
            world.flames.remove(k);
            world.bombs.remove(i);
            state.score = state.score.saturating_add(POINTS_PER_COAL);
            state.killed_enemies += 1;
            state.spawner.time_since_kill = 0.0;
            continue;
        }

        i += 1;
    }

    // Basic coals burn the player on contact and die to a single flame,
    // leaving a fireball flying in the flame's direction.
    let mut new_fireballs = Vec::new();
    let mut i = 0;
    while i < world.basics.len() {
        if world.basics[i].invincible {
            i += 1;
            continue;
        }

        let body = world.basics[i].hit_circle();
        if circles_overlap(body, world.player.hit_circle()) {
            world.basics[i].set_dead();
            if world.player.is_immune() || suppress_damage {
                world.cues.push(SoundCue::Contact);
            } else {
                world.player.take_damage();
                world.player.set_immunity(IMMUNITY_TIME);
                world.cues.push(SoundCue::Hurt);
            }
            i += 1;
            continue;
        }

        if let Some(k) = world
            .flames
            .iter()
            .position(|f| circles_overlap(body, f.hit_circle()))
        {
            new_fireballs.push(Fireball::new(
                world.sprites.fireball.clone(),
                world.basics[i].pos(),
                world.flames[k].core.dir,
            ));
            world.flames.remove(k);
            world.basics.remove(i);
            state.score = state.score.saturating_add(2 * POINTS_PER_COAL);
            state.killed_enemies += 1;
            state.spawner.time_since_kill = 0.0;
            world.cues.push(SoundCue::CoalHit);
            continue;
        }

        i += 1;
    }
    for fireball in new_fireballs {
        world.add_fireball(fireball);
    }

    // The gold coal snuffs flames without being harmed by them
    if world.gold.is_active() {
        let gold = world.gold.hit_circle();
        world.flames.retain(|f| !circles_overlap(gold, f.hit_circle()));
    }

    // Explosions sweep up whatever wanders in; only the player check can
    // end the pass early.
    for i in 0..world.explosions.len() {
        let blast = world.explosions[i].hit_circle();

        world.flames.retain(|f| !circles_overlap(blast, f.hit_circle()));
        world
            .bombs
            .retain(|b| b.invincible || !circles_overlap(blast, b.hit_circle()));
        world
            .basics
            .retain(|c| c.invincible || !circles_overlap(blast, c.hit_circle()));
        if world.gold.is_active() && circles_overlap(blast, world.gold.hit_circle()) {
            world.gold.deactivate();
        }

        if !world.player.is_immune()
            && !suppress_damage
            && circles_overlap(blast, world.player.hit_circle())
        {
            world.player.take_damage();
            world.player.set_immunity(IMMUNITY_TIME);
            world.cues.push(SoundCue::Hurt);
            break;
        }
    }

    for pos in blasts {
        world.add_explosion(pos);
    }
}
