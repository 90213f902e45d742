//! Data-driven game balance
//!
//! Every gameplay constant lives here so a level designer can retune the
//! game from a JSON file without touching the simulation. Units are pixels
//! per tick and ticks (60 Hz).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Avatar ===
    /// Downward acceleration per tick
    pub gravity: f32,
    /// Gravity multiplier while the avatar overlaps water
    pub water_gravity_scale: f32,
    /// Terminal downward speed in water
    pub water_max_fall_speed: f32,
    /// Vertical velocity applied on jump (negative = up)
    pub jump_impulse: f32,
    /// Horizontal run speed
    pub run_speed: f32,
    /// Invincibility window granted after damage or promotion
    pub invincibility_ticks: u32,
    /// Superstar invincibility
    pub star_ticks: u32,
    /// Grow/shrink morph duration
    pub morph_ticks: u32,
    /// How far below the world the avatar may fall before losing a life
    pub fall_margin: f32,
    /// Bounce after a stomp, as a fraction of the jump impulse
    pub stomp_bounce_scale: f32,
    /// Springboard launch, as a multiple of the jump impulse
    pub springboard_scale: f32,
    pub starting_lives: i32,

    // === Projectiles ===
    pub fireball_speed: f32,
    pub fireball_lift: f32,
    pub max_player_fireballs: usize,
    pub max_fireball_bounces: u32,
    /// Projectile gravity as a fraction of world gravity
    pub projectile_gravity_scale: f32,
    /// Vertical velocity retained on a top bounce
    pub projectile_restitution: f32,
    pub hammer_speed: f32,
    pub enemy_fireball_speed: f32,

    // === Enemies ===
    pub shell_ticks: u32,
    pub shell_kick_speed: f32,
    pub koopa_green_speed: f32,
    pub koopa_red_speed: f32,
    pub bones_ticks: u32,
    pub hammer_jump_interval: u32,
    pub hammer_throw_interval: u32,
    /// Hammer bro hop, as a fraction of the jump impulse
    pub hammer_jump_scale: f32,
    pub boss_hit_points: u8,
    pub boss_fireball_interval: u32,
    pub boss_invincibility_ticks: u32,

    // === Blocks & hazards ===
    pub bounce_height: f32,
    pub bounce_speed: f32,
    pub power_up_speed: f32,
    pub p_switch_ticks: u32,
    pub thwomp_rest_ticks: u32,
    pub donut_fall_ticks: u32,
    pub donut_fall_speed: f32,
    pub fire_ball_radius: f32,

    // === Scoring ===
    pub coin_points: u64,
    pub block_coin_points: u64,
    pub stomp_points: u64,
    pub chain_points: u64,
    pub fireball_points: u64,
    pub power_up_points: u64,
    pub boss_points: u64,
    pub axe_points: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            water_gravity_scale: 0.5,
            water_max_fall_speed: 2.0,
            jump_impulse: -10.0,
            run_speed: 4.0,
            invincibility_ticks: 120,
            star_ticks: 600,
            morph_ticks: 30,
            fall_margin: 50.0,
            stomp_bounce_scale: 0.7,
            springboard_scale: 1.5,
            starting_lives: 3,

            fireball_speed: 5.0,
            fireball_lift: -3.0,
            max_player_fireballs: 2,
            max_fireball_bounces: 3,
            projectile_gravity_scale: 0.5,
            projectile_restitution: 0.7,
            hammer_speed: 3.0,
            enemy_fireball_speed: 2.0,

            shell_ticks: 300,
            shell_kick_speed: 5.0,
            koopa_green_speed: 1.5,
            koopa_red_speed: 2.0,
            bones_ticks: 180,
            hammer_jump_interval: 90,
            hammer_throw_interval: 60,
            hammer_jump_scale: 0.7,
            boss_hit_points: 3,
            boss_fireball_interval: 120,
            boss_invincibility_ticks: 30,

            bounce_height: 10.0,
            bounce_speed: 2.0,
            power_up_speed: 1.0,
            p_switch_ticks: 300,
            thwomp_rest_ticks: 60,
            donut_fall_ticks: 60,
            donut_fall_speed: 1.0,
            fire_ball_radius: 8.0,

            coin_points: 10,
            block_coin_points: 200,
            stomp_points: 100,
            chain_points: 200,
            fireball_points: 100,
            power_up_points: 500,
            boss_points: 1000,
            axe_points: 1000,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }
}
