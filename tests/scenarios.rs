use glam::Vec2;
use side_scroller::renderer::NullRenderer;
use side_scroller::sim::*;
use side_scroller::ui::LogHud;
use side_scroller::{Action, Game, Settings, Tuning};

const IDLE: TickInput = TickInput {
    left: false,
    right: false,
    jump: false,
    throw: false,
    start: false,
};

/// One flat level with the given extra JSON fields spliced in
fn arena(extra: &str) -> GameState {
    let json = format!(
        r#"{{ "levels": [ {{
            "name": "arena",
            "player_start": {{ "x": 50, "y": 390 }},
            "platforms": [ {{ "x": 0, "y": 420, "width": 800, "height": 30 }} ]
            {extra}
        }} ] }}"#
    );
    let levels = LevelSet::from_json(&json).unwrap();
    let mut state = GameState::new(levels, Tuning::default());
    state.start_game();
    state.drain_events();
    state
}

fn settle(state: &mut GameState) {
    run_ticks(state, &IDLE, 5);
    assert!(state.avatar.on_ground);
}

#[test]
fn landing_snaps_to_platform_top() {
    let mut state = arena("");
    state.avatar.rect.y = 250.0;
    state.avatar.vel = Vec2::ZERO;
    state.avatar.on_ground = false;

    let mut ticks = 0;
    while !state.avatar.on_ground && ticks < 100 {
        tick(&mut state, &IDLE);
        ticks += 1;
    }
    assert!(state.avatar.on_ground);
    assert_eq!(state.avatar.rect.bottom(), 420.0);
    assert_eq!(state.avatar.vel.y, 0.0);
}

#[test]
fn jump_from_rest_uses_full_impulse() {
    let mut state = arena("");
    settle(&mut state);

    let jump = TickInput { jump: true, ..IDLE };
    tick(&mut state, &jump);
    assert_eq!(state.avatar.vel.y, state.tuning.jump_impulse);
    assert!(!state.avatar.on_ground);
}

#[test]
fn power_tier_climbs_one_step_and_falls_to_small() {
    let mut state = arena("");
    settle(&mut state);
    let feet = state.avatar.rect.bottom();

    // A flower collected while small only grows to big
    let at = Vec2::new(state.avatar.rect.x, state.avatar.rect.y);
    state
        .power_ups
        .push(PowerUp::new(PowerUpKind::FireFlower, at, 0.0));
    tick(&mut state, &IDLE);
    assert_eq!(state.avatar.tier, PowerTier::Big);

    let mut growing = 0;
    while state.avatar.is_growing() {
        growing += 1;
        tick(&mut state, &IDLE);
    }
    assert_eq!(growing, 30);
    assert_eq!(state.avatar.rect.width, 45.0);
    assert_eq!(state.avatar.rect.height, 45.0);
    assert_eq!(state.avatar.rect.bottom(), feet);

    let at = Vec2::new(state.avatar.rect.x, state.avatar.rect.y);
    state
        .power_ups
        .push(PowerUp::new(PowerUpKind::FireFlower, at, 0.0));
    tick(&mut state, &IDLE);
    assert_eq!(state.avatar.tier, PowerTier::Fire);

    state.avatar.invincibility_ticks = 0;
    state.avatar.morph = Morph::None;
    assert_eq!(state.hurt_avatar(), DamageOutcome::Demoted);
    assert_eq!(state.avatar.tier, PowerTier::Small);
    assert_eq!(state.lives, 3);
}

#[test]
fn lives_run_out_into_game_over() {
    let mut state = arena("");
    for expected in [2, 1] {
        state.avatar.invincibility_ticks = 0;
        assert_eq!(state.hurt_avatar(), DamageOutcome::LifeLost);
        assert_eq!(state.lives, expected);
        assert_eq!(state.phase, GamePhase::Playing);
    }
    state.avatar.invincibility_ticks = 0;
    assert_eq!(state.hurt_avatar(), DamageOutcome::GameOver);
    assert_eq!(state.lives, 0);
    assert_eq!(state.phase, GamePhase::GameOver);

    // No more ticks until restarted
    let ticks = state.time_ticks;
    tick(&mut state, &IDLE);
    assert_eq!(state.time_ticks, ticks);
}

#[test]
fn koopa_shell_toggles_then_kicks() {
    let mut state = arena(r#", "enemies": [ { "x": 300, "y": 390, "kind": "koopa_green" } ]"#);
    settle(&mut state);
    let koopa_top = state.enemies[0].rect.top();

    let drop_on_koopa = |state: &mut GameState| {
        state.avatar.rect.x = 300.0;
        state.avatar.rect.y = koopa_top - state.avatar.rect.height - 1.0;
        state.avatar.vel = Vec2::new(0.0, 3.0);
        state.avatar.on_ground = false;
        state.avatar.facing_right = true;
        tick(state, &IDLE);
    };

    drop_on_koopa(&mut state);
    let koopa = &state.enemies[0];
    assert!(koopa.is_shelled());
    assert!(!koopa.is_moving_shell());
    assert!(state.avatar.vel.y < 0.0, "stomp bounces the avatar");
    assert_eq!(state.score, state.tuning.stomp_points);

    drop_on_koopa(&mut state);
    let koopa = &state.enemies[0];
    assert!(koopa.is_moving_shell());
    assert_eq!(koopa.vel.x, state.tuning.shell_kick_speed);
}

#[test]
fn p_switch_round_trip_restores_bricks() {
    let mut state = arena(
        r#", "blocks": [
                { "x": 400, "y": 300, "kind": "brick", "content": "p_switch_affected" },
                { "x": 430, "y": 300, "kind": "brick", "content": "p_switch_affected" },
                { "x": 460, "y": 300, "kind": "brick" }
            ],
            "p_switches": [ { "x": 150, "y": 390 } ]"#,
    );
    settle(&mut state);

    state.avatar.rect.x = 150.0;
    state.avatar.rect.y = 300.0;
    state.avatar.on_ground = false;
    let mut ticks = 0;
    while !state.p_switches[0].pressed && ticks < 60 {
        tick(&mut state, &IDLE);
        ticks += 1;
    }
    assert!(state.p_switches[0].pressed);
    assert_eq!(state.blocks[0].kind, BlockKind::CoinBlockTemp);
    assert_eq!(state.blocks[1].kind, BlockKind::CoinBlockTemp);
    assert_eq!(state.blocks[2].kind, BlockKind::Brick);

    let p_switch_ticks = state.tuning.p_switch_ticks;
    run_ticks(&mut state, &IDLE, p_switch_ticks);
    assert!(!state.p_switches[0].pressed);
    for block in &state.blocks {
        assert_eq!(block.kind, block.original_kind);
    }
}

#[test]
fn big_avatar_breaks_brick_overhead() {
    let mut state = arena(r#", "blocks": [ { "x": 50, "y": 300, "kind": "brick" } ]"#);
    state.avatar.tier = PowerTier::Big;
    state.load_level(0);
    settle(&mut state);

    tick(&mut state, &TickInput { jump: true, ..IDLE });
    run_ticks(&mut state, &IDLE, 30);
    assert!(state.blocks.is_empty());
    assert!(state.drain_events().contains(&GameEvent::BlockBroken));
}

#[test]
fn player_fireball_dies_on_fourth_bounce() {
    let mut state = arena("");
    settle(&mut state);
    state.avatar.tier = PowerTier::Fire;

    tick(&mut state, &TickInput { throw: true, ..IDLE });
    assert_eq!(state.projectiles.len(), 1);

    let mut last_bounces = 0;
    let mut ticks = 0;
    while let Some(fireball) = state.projectiles.first() {
        last_bounces = fireball.bounces;
        tick(&mut state, &IDLE);
        ticks += 1;
        assert!(ticks < 600, "fireball never expired");
    }
    assert_eq!(last_bounces, state.tuning.max_fireball_bounces);
}

#[test]
fn mini_boss_takes_three_spaced_hits() {
    let mut state = arena(r#", "enemies": [ { "x": 400, "y": 375, "kind": "mini_bowser" } ]"#);
    state.avatar.invincibility_ticks = 10_000;
    settle(&mut state);
    let boss_at = Vec2::new(state.enemies[0].rect.x, state.enemies[0].rect.y);

    for hit in 1..=3 {
        let rect = state.enemies[0].rect;
        state.projectiles.push(Projectile::new(
            ProjectileKind::PlayerFireball,
            Vec2::new(rect.x + 10.0, rect.y + 10.0),
            Vec2::ZERO,
        ));
        tick(&mut state, &IDLE);
        if hit < 3 {
            assert_eq!(state.enemies.len(), 1);
            assert_eq!(state.score, 0);
            let boss_invincibility_ticks = state.tuning.boss_invincibility_ticks;
            run_ticks(&mut state, &IDLE, boss_invincibility_ticks + 1);
        }
    }

    assert!(state.enemies.is_empty());
    assert_eq!(state.score, state.tuning.boss_points);
    let one_up = state
        .power_ups
        .iter()
        .find(|p| p.kind == PowerUpKind::OneUp)
        .expect("boss drops a 1up");
    assert_eq!(one_up.rect.x, boss_at.x);
    assert_eq!(one_up.rect.y, boss_at.y);
}

#[test]
fn falling_out_reloads_level() {
    let mut state = arena(r#", "coins": [ { "x": 600, "y": 300, "radius": 10 } ]"#);
    settle(&mut state);
    state.avatar.tier = PowerTier::Big;
    state.coins.clear();
    state.avatar.rect.y = 600.0;

    tick(&mut state, &IDLE);
    // Big avatar is demoted rather than losing a life
    assert_eq!(state.lives, 3);
    assert_eq!(state.avatar.tier, PowerTier::Small);
    assert_eq!(state.avatar.rect.x, 50.0);
    assert_eq!(state.coins.len(), 1);
}

#[test]
fn driver_plays_builtin_campaign_deterministically() {
    let play = || {
        let state = GameState::new(LevelSet::builtin().unwrap(), Tuning::default());
        let mut game = Game::new(state, Settings::default());
        let mut hud = LogHud::default();
        let mut renderer = NullRenderer;

        for frame in 0..2_000u32 {
            game.input.set(Action::MoveRight, true);
            game.input.set(Action::Jump, frame % 40 < 12);
            game.input.set(Action::Throw, frame % 25 == 0);
            game.input.set(Action::Start, frame % 50 == 0);
            game.frame(1.0 / 60.0, &mut hud, &mut renderer);
        }
        assert_eq!(hud.score, game.state.score);
        assert_eq!(hud.lives, game.state.lives);
        serde_json::to_string(&game.state).unwrap()
    };

    assert_eq!(play(), play());
}
