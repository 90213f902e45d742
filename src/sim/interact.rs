//! Interaction rules between the avatar and everything else
//!
//! Each rule takes the whole state plus an index into one collection. Rules
//! only mark entities (dead, inactive, collected); the tick removes them after
//! the pass so indices stay valid while a pass is running.

use glam::Vec2;

use super::avatar::PowerTier;
use super::blocks::BlockEffect;
use super::enemies::{EnemyKind, FireballOutcome, Species, StompOutcome};
use super::geometry::{circle_rect_collision, overlaps};
use super::items::{PowerUp, PowerUpKind, Projectile, ProjectileKind};
use super::state::{GameEvent, GamePhase, GameState};
use super::world::{FORTRESS_CLEARED_MESSAGE, LEVEL_COMPLETE_MESSAGE};
use crate::consts::TILE_SIZE;

/// Avatar head hit block `index` from below
pub fn strike_block(state: &mut GameState, index: usize) -> BlockEffect {
    let tier = state.avatar.tier;
    let Some(block) = state.blocks.get_mut(index) else {
        return BlockEffect::None;
    };
    let effect = block.strike(tier, state.tuning.bounce_height);
    let spawn_at = Vec2::new(block.rect.x, block.rect.y - TILE_SIZE);

    match &effect {
        BlockEffect::Coin => {
            state.add_score(state.tuning.block_coin_points);
            state.push_event(GameEvent::CoinCollected);
        }
        BlockEffect::Spawn(kind) => {
            state
                .power_ups
                .push(PowerUp::new(*kind, spawn_at, state.tuning.power_up_speed));
            state.push_event(GameEvent::PowerUpSpawned(*kind));
        }
        BlockEffect::Break => state.push_event(GameEvent::BlockBroken),
        BlockEffect::Warp(_) | BlockEffect::None => {}
    }
    effect
}

/// Apply a collected power-up to the avatar
pub fn collect_power_up(state: &mut GameState, kind: PowerUpKind) {
    let tuning = &state.tuning;
    match kind {
        PowerUpKind::Mushroom => {
            if state.avatar.tier == PowerTier::Small {
                state
                    .avatar
                    .promote(tuning.morph_ticks, tuning.invincibility_ticks);
            }
        }
        PowerUpKind::FireFlower => {
            state
                .avatar
                .promote(tuning.morph_ticks, tuning.invincibility_ticks);
        }
        PowerUpKind::OneUp => state.add_life(),
        PowerUpKind::Superstar => {
            let avatar = &mut state.avatar;
            avatar.invincibility_ticks = avatar.invincibility_ticks.max(tuning.star_ticks);
        }
    }
    state.add_score(state.tuning.power_up_points);
    state.push_event(GameEvent::PowerUpCollected(kind));
}

/// Avatar vs enemy `index`: stomp from above, otherwise take damage
pub fn avatar_meets_enemy(state: &mut GameState, index: usize) {
    let avatar = &state.avatar;
    let Some(enemy) = state.enemies.get(index) else {
        return;
    };
    if enemy.dead || avatar.is_invincible() || !overlaps(&avatar.rect, &enemy.rect) {
        return;
    }

    let stomping =
        avatar.vel.y > 0.0 && avatar.rect.bottom() - avatar.vel.y <= enemy.rect.top();
    if !stomping {
        state.hurt_avatar();
        return;
    }

    let facing_right = avatar.facing_right;
    let enemy = &mut state.enemies[index];
    let species = enemy.species();
    let outcome = enemy.stomp(facing_right, &state.tuning);

    if outcome.scores() {
        state.add_score(state.tuning.stomp_points);
    }
    match outcome {
        StompOutcome::Defeated => state.push_event(GameEvent::EnemyDefeated(species)),
        StompOutcome::Hurts => {
            state.hurt_avatar();
        }
        _ => {}
    }
    state.avatar.vel.y = state.tuning.jump_impulse * state.tuning.stomp_bounce_scale;
}

/// A sliding shell defeats the first other enemy it touches
pub fn shell_strikes(state: &mut GameState, index: usize) {
    let Some(shell) = state.enemies.get(index) else {
        return;
    };
    if shell.dead || !shell.is_moving_shell() {
        return;
    }
    let rect = shell.rect;

    let victim = (0..state.enemies.len()).rev().find(|&j| {
        let other = &state.enemies[j];
        j != index
            && !other.dead
            && other.species() != Species::MiniBowser
            && overlaps(&rect, &other.rect)
    });

    if let Some(j) = victim {
        let species = state.enemies[j].species();
        state.enemies[j].dead = true;
        state.add_score(state.tuning.chain_points);
        state.push_event(GameEvent::EnemyDefeated(species));
    }
}

/// Projectile `index` vs enemies (player fireball) or the avatar (hostile)
pub fn resolve_projectile(state: &mut GameState, index: usize) {
    let Some(projectile) = state.projectiles.get(index) else {
        return;
    };
    if !projectile.active {
        return;
    }
    let rect = projectile.rect;

    if projectile.kind.is_hostile() {
        if !state.avatar.is_invincible() && overlaps(&rect, &state.avatar.rect) {
            state.projectiles[index].active = false;
            state.hurt_avatar();
        }
        return;
    }

    for j in (0..state.enemies.len()).rev() {
        let enemy = &mut state.enemies[j];
        if enemy.dead || !overlaps(&rect, &enemy.rect) {
            continue;
        }
        let species = enemy.species();
        let outcome = enemy.burn(&state.tuning);
        let drop_at = Vec2::new(enemy.rect.x, enemy.rect.y);

        match outcome {
            FireballOutcome::Immune => continue,
            FireballOutcome::Wounded => {
                let hit_points = match enemy.kind {
                    EnemyKind::MiniBowser { hit_points, .. } => hit_points,
                    _ => 0,
                };
                log::debug!("Mini boss hit, {} hit points left", hit_points);
                state.push_event(GameEvent::BossHit { hit_points });
            }
            FireballOutcome::Defeated if species == Species::MiniBowser => {
                log::debug!("Mini boss defeated by fireball");
                state.add_score(state.tuning.boss_points);
                state.power_ups.push(PowerUp::new(
                    PowerUpKind::OneUp,
                    drop_at,
                    state.tuning.power_up_speed,
                ));
                state.push_event(GameEvent::EnemyDefeated(species));
            }
            FireballOutcome::Defeated => {
                state.add_score(state.tuning.fireball_points);
                state.push_event(GameEvent::EnemyDefeated(species));
            }
        }
        state.projectiles[index].active = false;
        break;
    }
}

/// Throw a fireball from the avatar if the tier and the live cap allow it
pub fn throw_fireball(state: &mut GameState) -> bool {
    let tuning = &state.tuning;
    if state.avatar.tier != PowerTier::Fire
        || state.player_fireballs() >= tuning.max_player_fireballs
    {
        return false;
    }

    let dir = if state.avatar.facing_right { 1.0 } else { -1.0 };
    let fireball = Projectile::new(
        ProjectileKind::PlayerFireball,
        state.avatar.rect.center(),
        Vec2::new(dir * tuning.fireball_speed, tuning.fireball_lift),
    );
    state.projectiles.push(fireball);
    state.push_event(GameEvent::FireballThrown);
    true
}

/// Coins touched by the avatar this tick
pub fn collect_coins(state: &mut GameState) {
    let avatar = state.avatar.rect;
    let mut collected = 0;
    for coin in state.coins.iter_mut().filter(|c| !c.collected) {
        if circle_rect_collision(coin.center(), coin.radius, &avatar) {
            coin.collected = true;
            collected += 1;
        }
    }
    for _ in 0..collected {
        state.add_score(state.tuning.coin_points);
        state.push_event(GameEvent::CoinCollected);
    }
    state.coins.retain(|c| !c.collected);
}

/// Springboards launch a falling avatar
pub fn bounce_on_springboards(state: &mut GameState) {
    let launch = state.tuning.jump_impulse * state.tuning.springboard_scale;
    let avatar = &mut state.avatar;
    for spring in &mut state.springboards {
        if overlaps(&avatar.rect, &spring.rect) && avatar.vel.y > 0.0 {
            avatar.vel.y = launch;
            avatar.on_ground = false;
            spring.compressed = true;
        } else {
            spring.compressed = false;
        }
    }
}

/// Fire bars and thwomps
pub fn update_hazards(state: &mut GameState) {
    let ball_radius = state.tuning.fire_ball_radius;
    for i in 0..state.fire_bars.len() {
        state.fire_bars[i].update();
        if !state.avatar.is_invincible() && state.fire_bars[i].hits(&state.avatar.rect, ball_radius)
        {
            state.hurt_avatar();
        }
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    let rest_ticks = state.tuning.thwomp_rest_ticks;
    for i in 0..state.thwomps.len() {
        state.thwomps[i].update(&state.avatar.rect, rest_ticks);
        let thwomp = &state.thwomps[i];
        if !state.avatar.is_invincible()
            && thwomp.is_dangerous()
            && overlaps(&thwomp.rect, &state.avatar.rect)
        {
            state.hurt_avatar();
        }
        if state.phase != GamePhase::Playing {
            return;
        }
    }

    let (fall_ticks, fall_speed) = (state.tuning.donut_fall_ticks, state.tuning.donut_fall_speed);
    for lift in &mut state.donut_lifts {
        lift.update(fall_ticks, fall_speed);
    }
}

/// P-switch presses and expiries
pub fn update_switches(state: &mut GameState) {
    for i in 0..state.p_switches.len() {
        if state.p_switches[i].update() {
            log::debug!("P-switch expired");
            for block in state.blocks.iter_mut().filter(|b| b.is_switch_affected()) {
                block.revert();
            }
            state.push_event(GameEvent::SwitchExpired);
        }

        let avatar = &state.avatar;
        let switch = &state.p_switches[i];
        if switch.pressed || avatar.vel.y <= 0.0 || !overlaps(&avatar.rect, &switch.rect) {
            continue;
        }

        state.p_switches[i].press(state.tuning.p_switch_ticks);
        log::debug!("P-switch pressed");
        for block in state.blocks.iter_mut().filter(|b| b.is_switch_affected()) {
            block.toggle_switched();
        }
        state.push_event(GameEvent::SwitchPressed);
    }
}

/// Axe and flagpole
pub fn check_goals(state: &mut GameState) {
    let avatar = state.avatar.rect;

    if let Some(axe) = state.axe.as_mut() {
        if !axe.cut && overlaps(&avatar, &axe.rect) {
            axe.cut = true;
            for enemy in state
                .enemies
                .iter_mut()
                .filter(|e| e.species() == Species::MiniBowser)
            {
                enemy.dead = true;
            }
            state.enemies.retain(|e| !e.dead);
            state.add_score(state.tuning.axe_points);
            state.complete_level(FORTRESS_CLEARED_MESSAGE);
            return;
        }
    }

    if let Some(flagpole) = state.flagpole.as_mut() {
        if !flagpole.reached && overlaps(&avatar, &flagpole.rect) {
            flagpole.reached = true;
            state.complete_level(LEVEL_COMPLETE_MESSAGE);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::blocks::BlockKind;
    use crate::sim::hazards::ThwompState;
    use crate::sim::level::{LevelSet, WarpDestination};
    use crate::sim::state::MessageAction;
    use crate::sim::tick::{TickInput, run_ticks, tick};
    use crate::sim::world::{GAME_OVER_MESSAGE, SECRET_EXIT_MESSAGE};
    use crate::tuning::Tuning;

    const IDLE: TickInput = TickInput {
        left: false,
        right: false,
        jump: false,
        throw: false,
        start: false,
    };

    /// Flat level, avatar standing at x=50 (feet on y=420)
    fn arena(extra: &str) -> GameState {
        let json = format!(
            r#"{{ "levels": [ {{
                "name": "arena",
                "player_start": {{ "x": 50, "y": 390 }},
                "platforms": [ {{ "x": 0, "y": 420, "width": 800, "height": 30 }} ]
                {extra}
            }} ] }}"#
        );
        let mut state = GameState::new(LevelSet::from_json(&json).unwrap(), Tuning::default());
        state.start_game();
        state.drain_events();
        state
    }

    fn messages(events: &[GameEvent], wanted: &str) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::ShowMessage { text, .. } if text == wanted))
            .count()
    }

    /// Settle, jump straight up and idle until `done` holds
    fn jump_until(state: &mut GameState, done: impl Fn(&GameState) -> bool) {
        tick(state, &IDLE);
        assert!(state.avatar.on_ground);
        tick(state, &TickInput { jump: true, ..IDLE });
        let mut ticks = 0;
        while !done(state) && ticks < 60 {
            tick(state, &IDLE);
            ticks += 1;
        }
        assert!(done(state), "condition never reached");
    }

    #[test]
    fn test_last_life_lost_once_among_overlapping_enemies() {
        let mut state = arena(
            r#", "enemies": [
                { "x": 50, "y": 390, "kind": "goomba" },
                { "x": 55, "y": 390, "kind": "goomba" }
            ]"#,
        );
        state.lives = 1;

        tick(&mut state, &IDLE);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert_eq!(messages(&events, GAME_OVER_MESSAGE), 1);
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::AvatarDamaged).count(),
            1
        );
    }

    #[test]
    fn test_bones_hurt_on_side_contact() {
        let mut state = arena(r#", "enemies": [ { "x": 200, "y": 390, "kind": "dry_bones" } ]"#);
        let tuning = state.tuning.clone();
        assert_eq!(state.enemies[0].stomp(true, &tuning), StompOutcome::Collapsed);
        state.enemies[0].rect.x = 60.0;

        tick(&mut state, &IDLE);
        assert!(state.enemies[0].is_bones());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_stomping_bones_again_scores() {
        let mut state = arena(r#", "enemies": [ { "x": 200, "y": 390, "kind": "dry_bones" } ]"#);
        let tuning = state.tuning.clone();
        state.enemies[0].stomp(true, &tuning);
        run_ticks(&mut state, &IDLE, 5);

        let top = state.enemies[0].rect.top();
        state.avatar.rect.x = 200.0;
        state.avatar.rect.y = top - state.avatar.rect.height - 1.0;
        state.avatar.vel = Vec2::new(0.0, 3.0);
        state.avatar.on_ground = false;
        tick(&mut state, &IDLE);

        assert!(state.enemies[0].is_bones());
        assert_eq!(state.score, tuning.stomp_points);
        assert_eq!(state.lives, 3);
        assert!(state.avatar.vel.y < 0.0);
    }

    #[test]
    fn test_sliding_shell_chains_but_spares_mini_boss() {
        let mut state = arena(
            r#", "enemies": [
                { "x": 300, "y": 390, "kind": "koopa_green" },
                { "x": 500, "y": 390, "kind": "goomba" },
                { "x": 600, "y": 375, "kind": "mini_bowser" }
            ]"#,
        );
        let tuning = state.tuning.clone();
        state.enemies[0].stomp(true, &tuning);
        assert_eq!(state.enemies[0].stomp(true, &tuning), StompOutcome::Kicked);
        assert!(state.enemies[0].is_moving_shell());

        let shell = state.enemies[0].rect;
        state.enemies[1].rect.x = shell.x + 10.0;
        shell_strikes(&mut state, 0);
        assert!(state.enemies[1].dead);
        assert_eq!(state.score, tuning.chain_points);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::EnemyDefeated(Species::Goomba))
        );

        state.enemies[2].rect.x = shell.x;
        state.enemies[2].rect.y = shell.bottom() - state.enemies[2].rect.height;
        shell_strikes(&mut state, 0);
        assert!(!state.enemies[2].dead);
        assert_eq!(state.score, tuning.chain_points);
    }

    #[test]
    fn test_springboard_launches_falling_avatar() {
        let mut state = arena(r#", "springboards": [ { "x": 200, "y": 390 } ]"#);
        let launch = state.tuning.jump_impulse * state.tuning.springboard_scale;
        assert_eq!(launch, -15.0);

        state.avatar.rect.x = 200.0;
        state.avatar.rect.y = 370.0;
        state.avatar.vel.y = 3.0;
        bounce_on_springboards(&mut state);
        assert_eq!(state.avatar.vel.y, launch);
        assert!(!state.avatar.on_ground);
        assert!(state.springboards[0].compressed);

        // Rising through it does not relaunch
        bounce_on_springboards(&mut state);
        assert_eq!(state.avatar.vel.y, launch);
        assert!(!state.springboards[0].compressed);
    }

    #[test]
    fn test_axe_defeats_mini_boss_and_clears_fortress() {
        let mut state = arena(
            r#", "axe": { "x": 600, "y": 390 },
            "enemies": [
                { "x": 400, "y": 390, "kind": "goomba" },
                { "x": 700, "y": 375, "kind": "mini_bowser" }
            ]"#,
        );
        state.avatar.rect.x = 600.0;
        check_goals(&mut state);

        assert!(state.axe.as_ref().is_some_and(|a| a.cut));
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].species(), Species::Goomba);
        assert_eq!(state.score, state.tuning.axe_points);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.drain_events().contains(&GameEvent::ShowMessage {
            text: FORTRESS_CLEARED_MESSAGE.into(),
            action: MessageAction::NextLevel
        }));
    }

    #[test]
    fn test_flagpole_completes_level() {
        let mut state = arena(r#", "flagpole": { "x": 150, "y": 270, "height": 150 }"#);
        let right = TickInput { right: true, ..IDLE };
        let mut ticks = 0;
        while state.phase == GamePhase::Playing && ticks < 100 {
            tick(&mut state, &right);
            ticks += 1;
        }

        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert!(state.flagpole.as_ref().is_some_and(|f| f.reached));
        assert_eq!(messages(&state.drain_events(), LEVEL_COMPLETE_MESSAGE), 1);
    }

    #[test]
    fn test_fire_bar_hurts_through_tick() {
        // Ball two of four sits at (65, 405), inside the standing avatar
        let mut state = arena(
            r#", "firebars": [
                { "center_x": 65, "center_y": 360, "radius": 45, "ball_count": 4, "speed": 0 }
            ]"#,
        );
        tick(&mut state, &IDLE);
        assert_eq!(state.lives, 2);
        assert!(state.avatar.is_invincible());

        tick(&mut state, &IDLE);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_only_dropping_thwomp_hurts() {
        let mut state = arena(
            r#", "thwomps": [ { "x": 40, "y": 340, "drop_height": 50, "drop_speed": 10 } ]"#,
        );
        tick(&mut state, &IDLE);
        assert_eq!(state.thwomps[0].state, ThwompState::Dropping);
        assert_eq!(state.lives, 3);

        tick(&mut state, &IDLE);
        assert_eq!(state.lives, 2);

        // Resting on top of the avatar is harmless
        state.avatar.invincibility_ticks = 0;
        state.thwomps[0].state = ThwompState::Resting(60);
        tick(&mut state, &IDLE);
        assert!(overlaps(&state.thwomps[0].rect, &state.avatar.rect));
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_hostile_projectiles_hurt_avatar() {
        let mut state = arena("");
        run_ticks(&mut state, &IDLE, 3);

        for (kind, lives) in [(ProjectileKind::Hammer, 2), (ProjectileKind::EnemyFireball, 1)] {
            state.avatar.invincibility_ticks = 0;
            let at = Vec2::new(state.avatar.rect.x + 5.0, state.avatar.rect.y + 5.0);
            state.projectiles.push(Projectile::new(kind, at, Vec2::ZERO));
            tick(&mut state, &IDLE);
            assert_eq!(state.lives, lives);
            assert!(state.projectiles.is_empty());
        }
    }

    #[test]
    fn test_water_caps_fall_speed() {
        let mut state = arena(r#", "water": [ { "x": 0, "y": 0, "width": 800, "height": 300 } ]"#);
        let cap = state.tuning.water_max_fall_speed;
        state.avatar.rect.y = 100.0;
        state.avatar.vel = Vec2::ZERO;
        state.avatar.on_ground = false;

        tick(&mut state, &IDLE);
        assert_eq!(
            state.avatar.vel.y,
            state.tuning.gravity * state.tuning.water_gravity_scale
        );
        run_ticks(&mut state, &IDLE, 20);
        assert_eq!(state.avatar.vel.y, cap);

        // Out of the water, normal gravity resumes
        state.avatar.rect.y = 320.0;
        tick(&mut state, &IDLE);
        assert!(state.avatar.vel.y > cap);
    }

    #[test]
    fn test_pipe_teleport_finishes_the_tick() {
        let mut state = arena(
            r#", "blocks": [ { "x": 50, "y": 330, "kind": "pipe", "content": "down" } ],
            "enemies": [ { "x": 700, "y": 390, "kind": "goomba", "speed": 1 } ],
            "coins": [ { "x": 415, "y": 405, "radius": 10 } ],
            "warps": { "down": { "type": "teleport", "x": 400, "bottom": 420 } }"#,
        );

        tick(&mut state, &IDLE);
        tick(&mut state, &TickInput { jump: true, ..IDLE });
        let mut ticks = 0;
        loop {
            let goomba_x = state.enemies[0].rect.x;
            tick(&mut state, &IDLE);
            ticks += 1;
            assert!(ticks < 30, "never reached the pipe");
            if state.avatar.rect.x == 400.0 {
                // Enemies and coins still ran on the warp tick
                assert_eq!(state.enemies[0].rect.x, goomba_x + 1.0);
                break;
            }
        }

        assert_eq!(state.avatar.rect.bottom(), 420.0);
        assert_eq!(state.level_index, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.coins.is_empty());
        assert_eq!(state.score, state.tuning.coin_points);
        assert!(state.drain_events().contains(&GameEvent::Warped(
            WarpDestination::Teleport {
                x: 400.0,
                bottom: 420.0
            }
        )));
    }

    #[test]
    fn test_hidden_block_revealed_by_head() {
        let mut state =
            arena(r#", "blocks": [ { "x": 50, "y": 330, "kind": "hidden", "content": "coin" } ]"#);
        assert!(!state.blocks[0].visible);

        jump_until(&mut state, |s| s.blocks[0].visible);
        assert_eq!(state.blocks[0].kind, BlockKind::Question);
        assert!(state.blocks[0].hit);
        assert_eq!(state.score, state.tuning.block_coin_points);

        // Used now: a second bump pays nothing
        run_ticks(&mut state, &IDLE, 40);
        jump_until(&mut state, |s| s.avatar.vel.y > 0.0);
        run_ticks(&mut state, &IDLE, 40);
        assert_eq!(state.score, state.tuning.block_coin_points);
    }

    #[test]
    fn test_hidden_block_secret_exit() {
        let mut state = arena(
            r#", "blocks": [ { "x": 50, "y": 330, "kind": "hidden", "content": "secret" } ],
            "warps": { "secret": { "type": "game_complete" } }"#,
        );

        jump_until(&mut state, |s| s.phase != GamePhase::Playing);
        assert!(state.blocks[0].visible);
        assert_eq!(state.phase, GamePhase::GameComplete);
        assert_eq!(messages(&state.drain_events(), SECRET_EXIT_MESSAGE), 1);
    }

    #[test]
    fn test_coin_pickup_scores() {
        let mut state = arena(
            r#", "coins": [
                { "x": 65, "y": 405, "radius": 10 },
                { "x": 600, "y": 300, "radius": 10 }
            ]"#,
        );
        tick(&mut state, &IDLE);

        assert_eq!(state.coins.len(), 1);
        assert_eq!(state.score, state.tuning.coin_points);
        assert!(state.drain_events().contains(&GameEvent::CoinCollected));
    }
}
