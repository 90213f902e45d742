//! Fixed timestep simulation tick
//!
//! Phase order is fixed: avatar, fall check, enemies, power-ups, projectiles,
//! coins, springboards, hazards, P-switches, goals. Any phase that ends play
//! (warp to another level, game over, goal) ends the tick right there; a
//! teleport within the level carries on with the rest of the tick.

use serde::{Deserialize, Serialize};

use super::blocks::BlockEffect;
use super::collision::{Contact, Terrain, land_on, resolve_solid};
use super::interact;
use super::items::Projectile;
use super::level::WarpDestination;
use super::state::{GamePhase, GameState};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

/// Logical actions held during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub throw: bool,
    /// Handled by the frame driver, not the tick
    pub start: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    if let Some(destination) = update_avatar(state, input) {
        let leaves_level = !matches!(destination, WarpDestination::Teleport { .. });
        state.apply_warp(destination);
        if leaves_level || state.phase != GamePhase::Playing {
            return;
        }
    }

    let fall_line = GAME_HEIGHT + state.tuning.fall_margin;
    if state.avatar.rect.top() > fall_line {
        state.fall_out();
        return;
    }

    update_enemies(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    update_power_ups(state);
    update_projectiles(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    interact::collect_coins(state);
    interact::bounce_on_springboards(state);
    interact::update_hazards(state);
    interact::update_switches(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    interact::check_goals(state);
}

/// Move the avatar and resolve it against the level.
///
/// Returns a warp if a struck block asked for one; the caller applies it
/// after every borrow of the current level is released.
fn update_avatar(state: &mut GameState, input: &TickInput) -> Option<WarpDestination> {
    state.avatar.advance_morph(state.tuning.morph_ticks);
    let in_water = state.in_water(&state.avatar.rect);

    let tuning = &state.tuning;
    let avatar = &mut state.avatar;

    if input.left {
        avatar.vel.x = -tuning.run_speed;
        avatar.facing_right = false;
    } else if input.right {
        avatar.vel.x = tuning.run_speed;
        avatar.facing_right = true;
    } else {
        avatar.vel.x = 0.0;
    }

    let took_off = input.jump && avatar.on_ground;
    if took_off {
        avatar.vel.y = tuning.jump_impulse;
        avatar.on_ground = false;
    }

    // The takeoff tick keeps the full impulse
    if !took_off {
        if in_water {
            avatar.vel.y += tuning.gravity * tuning.water_gravity_scale;
            avatar.vel.y = avatar.vel.y.min(tuning.water_max_fall_speed);
        } else {
            avatar.vel.y += tuning.gravity;
        }
    }

    avatar.rect.translate(avatar.vel);
    avatar.rect.x = avatar.rect.x.clamp(0.0, GAME_WIDTH - avatar.rect.width);
    avatar.invincibility_ticks = avatar.invincibility_ticks.saturating_sub(1);

    avatar.on_ground = false;
    for platform in &state.platforms {
        if resolve_solid(&mut avatar.rect, &mut avatar.vel, platform) == Some(Contact::Landed) {
            avatar.on_ground = true;
        }
    }

    let mut struck = Vec::new();
    for (index, block) in state.blocks.iter_mut().enumerate() {
        block.update(tuning.bounce_speed);
        if !block.is_solid() {
            continue;
        }
        match resolve_solid(&mut avatar.rect, &mut avatar.vel, &block.rect) {
            Some(Contact::Landed) => avatar.on_ground = true,
            Some(Contact::HeadBump) => struck.push(index),
            _ => {}
        }
    }

    for lift in &mut state.donut_lifts {
        lift.occupied = land_on(&mut avatar.rect, &mut avatar.vel, &lift.rect);
        if lift.occupied {
            avatar.on_ground = true;
        }
    }

    if avatar.throw_pressed(input.throw) {
        interact::throw_fireball(state);
    }

    let mut warp = None;
    let mut broken = Vec::new();
    for index in struck {
        match interact::strike_block(state, index) {
            BlockEffect::Break => broken.push(index),
            BlockEffect::Warp(destination) if warp.is_none() => warp = Some(destination),
            _ => {}
        }
    }
    // Indices ascend, so removing from the back keeps the rest valid
    for index in broken.into_iter().rev() {
        state.blocks.remove(index);
    }

    warp
}

fn update_enemies(state: &mut GameState) {
    for index in (0..state.enemies.len()).rev() {
        let terrain = Terrain::new(&state.platforms, &state.blocks);
        let request = state.enemies[index].update(&terrain, &state.tuning);

        if let Some(request) = request {
            state.projectiles.push(Projectile::new(
                request.kind,
                request.origin,
                request.vel,
            ));
        }

        interact::avatar_meets_enemy(state, index);
        interact::shell_strikes(state, index);
        if state.phase != GamePhase::Playing {
            break;
        }
    }
    state.enemies.retain(|e| !e.dead);
}

fn update_power_ups(state: &mut GameState) {
    for index in (0..state.power_ups.len()).rev() {
        let terrain = Terrain::new(&state.platforms, &state.blocks);
        let power_up = &mut state.power_ups[index];
        power_up.update(&terrain, &state.tuning);

        if !power_up.collected && power_up.rect.overlaps(&state.avatar.rect) {
            power_up.collected = true;
            let kind = power_up.kind;
            interact::collect_power_up(state, kind);
        }
    }
    state.power_ups.retain(|p| !p.collected);
}

fn update_projectiles(state: &mut GameState) {
    for index in (0..state.projectiles.len()).rev() {
        let terrain = Terrain::new(&state.platforms, &state.blocks);
        state.projectiles[index].update(&terrain, &state.tuning);
        interact::resolve_projectile(state, index);
        if state.phase != GamePhase::Playing {
            break;
        }
    }
    state.projectiles.retain(|p| p.active);
    state.enemies.retain(|e| !e.dead);
}

/// Convenience for tests and tools: run `n` ticks with the same input
pub fn run_ticks(state: &mut GameState, input: &TickInput, n: u32) {
    for _ in 0..n {
        tick(state, input);
    }
}
