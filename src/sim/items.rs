//! Collectibles and projectiles
//!
//! Coins are static pickups. Power-ups and projectiles are simple movers that
//! fall under gravity and react to terrain tops and sides.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Terrain, is_landing, land_on};
use super::geometry::{Rect, overlaps};
use crate::consts::{GAME_HEIGHT, GAME_WIDTH, TILE_SIZE};
use crate::tuning::Tuning;

/// Projectile size for fireballs; hammers are larger
pub const FIREBALL_SIZE: f32 = 10.0;
pub const HAMMER_SIZE: f32 = 15.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    /// Bounding box of the coin circle
    pub rect: Rect,
    pub radius: f32,
    pub collected: bool,
}

impl Coin {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self {
            rect: Rect::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0),
            radius,
            collected: false,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    Mushroom,
    FireFlower,
    OneUp,
    Superstar,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    pub vel: Vec2,
    pub on_ground: bool,
    pub collected: bool,
}

impl PowerUp {
    /// Spawn at a top-left position, drifting right
    pub fn new(kind: PowerUpKind, pos: Vec2, speed: f32) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
            kind,
            vel: Vec2::new(speed, 0.0),
            on_ground: false,
            collected: false,
        }
    }

    pub fn update(&mut self, terrain: &Terrain, tuning: &Tuning) {
        self.vel.y += tuning.gravity;
        self.rect.translate(self.vel);

        self.on_ground = false;
        for surface in terrain.walker_surfaces() {
            if land_on(&mut self.rect, &mut self.vel, surface) {
                self.on_ground = true;
            }
        }

        if self.rect.left() <= 0.0 || self.rect.right() >= GAME_WIDTH {
            self.vel.x = -self.vel.x;
        }

        // Fell out of the world
        if self.rect.top() > GAME_HEIGHT {
            self.collected = true;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectileKind {
    PlayerFireball,
    Hammer,
    EnemyFireball,
}

impl ProjectileKind {
    pub fn is_hostile(self) -> bool {
        !matches!(self, ProjectileKind::PlayerFireball)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
    pub kind: ProjectileKind,
    pub vel: Vec2,
    /// Top bounces so far (player fireballs only)
    pub bounces: u32,
    pub active: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, pos: Vec2, vel: Vec2) -> Self {
        let size = match kind {
            ProjectileKind::Hammer => HAMMER_SIZE,
            _ => FIREBALL_SIZE,
        };
        Self {
            rect: Rect::new(pos.x, pos.y, size, size),
            kind,
            vel,
            bounces: 0,
            active: true,
        }
    }

    pub fn update(&mut self, terrain: &Terrain, tuning: &Tuning) {
        if !self.active {
            return;
        }

        self.vel.y += tuning.gravity * tuning.projectile_gravity_scale;
        self.rect.translate(self.vel);

        for surface in terrain.projectile_surfaces() {
            if !overlaps(&self.rect, surface) {
                continue;
            }
            if is_landing(&self.rect, self.vel.y, surface) {
                if self.kind == ProjectileKind::PlayerFireball
                    && self.bounces >= tuning.max_fireball_bounces
                {
                    self.active = false;
                    return;
                }
                self.rect.y = surface.top() - self.rect.height;
                self.vel.y = -self.vel.y * tuning.projectile_restitution;
                self.bounces += 1;
            } else if self.vel.x != 0.0 {
                self.vel.x = -self.vel.x;
            }
        }

        if self.rect.top() > GAME_HEIGHT
            || self.rect.x < -self.rect.width
            || self.rect.x > GAME_WIDTH
        {
            self.active = false;
        }
    }
}
