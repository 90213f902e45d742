//! Enemy roster
//!
//! Every enemy shares one movement core (gravity, patrol, landing, floor
//! snap). Species-specific state lives in the `EnemyKind` variant so a
//! goomba cannot carry a shell timer and a koopa cannot carry hit points.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Terrain, land_on};
use super::geometry::Rect;
use super::items::ProjectileKind;
use super::level::EnemySpec;
use crate::consts::{BIG_SCALE, GAME_HEIGHT, TILE_SIZE};
use crate::tuning::Tuning;

/// Enemy species as written in level data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Goomba,
    KoopaGreen,
    KoopaRed,
    Buzzy,
    CheepCheep,
    HammerBro,
    DryBones,
    MiniBowser,
}

/// Koopa shell state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Shell {
    pub shelled: bool,
    pub timer: u32,
}

/// Runtime variant with its private state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyKind {
    Goomba,
    KoopaGreen(Shell),
    KoopaRed(Shell),
    Buzzy,
    CheepCheep,
    HammerBro {
        jump_timer: u32,
        throw_timer: u32,
    },
    DryBones {
        /// Collapsed into a pile of bones
        bones: bool,
        reanimate_timer: u32,
    },
    MiniBowser {
        hit_points: u8,
        fireball_timer: u32,
        invincible_timer: u32,
    },
}

impl EnemyKind {
    fn spawn(species: Species, tuning: &Tuning) -> Self {
        match species {
            Species::Goomba => EnemyKind::Goomba,
            Species::KoopaGreen => EnemyKind::KoopaGreen(Shell::default()),
            Species::KoopaRed => EnemyKind::KoopaRed(Shell::default()),
            Species::Buzzy => EnemyKind::Buzzy,
            Species::CheepCheep => EnemyKind::CheepCheep,
            Species::HammerBro => EnemyKind::HammerBro {
                jump_timer: 0,
                throw_timer: 0,
            },
            Species::DryBones => EnemyKind::DryBones {
                bones: false,
                reanimate_timer: 0,
            },
            Species::MiniBowser => EnemyKind::MiniBowser {
                hit_points: tuning.boss_hit_points,
                fireball_timer: 0,
                invincible_timer: 0,
            },
        }
    }

    pub fn species(&self) -> Species {
        match self {
            EnemyKind::Goomba => Species::Goomba,
            EnemyKind::KoopaGreen(_) => Species::KoopaGreen,
            EnemyKind::KoopaRed(_) => Species::KoopaRed,
            EnemyKind::Buzzy => Species::Buzzy,
            EnemyKind::CheepCheep => Species::CheepCheep,
            EnemyKind::HammerBro { .. } => Species::HammerBro,
            EnemyKind::DryBones { .. } => Species::DryBones,
            EnemyKind::MiniBowser { .. } => Species::MiniBowser,
        }
    }
}

/// Something an enemy wants spawned this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowRequest {
    pub kind: ProjectileKind,
    pub origin: Vec2,
    pub vel: Vec2,
}

/// Result of the avatar landing on an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StompOutcome {
    /// Enemy removed
    Defeated,
    /// Koopa retreated into its shell
    Shelled,
    /// Shell kicked (no score)
    Kicked,
    /// Dry bones collapsed
    Collapsed,
    /// Already bones: reanimation restarts
    Restarted,
    /// Cannot be stomped; the avatar takes damage instead
    Hurts,
}

impl StompOutcome {
    pub fn scores(self) -> bool {
        matches!(
            self,
            StompOutcome::Defeated
                | StompOutcome::Shelled
                | StompOutcome::Collapsed
                | StompOutcome::Restarted
        )
    }
}

/// Fireball impact result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireballOutcome {
    /// Fireball passes through
    Immune,
    /// Boss lost a hit point but survives
    Wounded,
    Defeated,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub vel: Vec2,
    /// Patrol anchor (spawn x)
    pub origin_x: f32,
    /// Patrol half-range; 0 disables patrolling
    pub range: f32,
    pub on_ground: bool,
    /// Marked for removal at the end of the enemy pass
    pub dead: bool,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(spec: &EnemySpec, tuning: &Tuning) -> Self {
        let (width, height) = match spec.kind {
            Species::CheepCheep => (TILE_SIZE * BIG_SCALE, TILE_SIZE),
            Species::HammerBro => (TILE_SIZE, TILE_SIZE * BIG_SCALE),
            Species::MiniBowser => (TILE_SIZE * BIG_SCALE, TILE_SIZE * BIG_SCALE),
            _ => (TILE_SIZE, TILE_SIZE),
        };
        // Fish ride half a tile higher so they sit in the water
        let y = match spec.kind {
            Species::CheepCheep => spec.y - TILE_SIZE / 2.0,
            _ => spec.y,
        };

        Self {
            rect: Rect::new(spec.x, y, width, height),
            vel: Vec2::new(spec.speed, 0.0),
            origin_x: spec.x,
            range: spec.range,
            on_ground: false,
            dead: false,
            kind: EnemyKind::spawn(spec.kind, tuning),
        }
    }

    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn is_shelled(&self) -> bool {
        matches!(
            self.kind,
            EnemyKind::KoopaGreen(Shell { shelled: true, .. })
                | EnemyKind::KoopaRed(Shell { shelled: true, .. })
        )
    }

    /// Shell sliding along the ground; defeats whatever it touches
    pub fn is_moving_shell(&self) -> bool {
        self.is_shelled() && self.vel.x != 0.0
    }

    pub fn is_bones(&self) -> bool {
        matches!(self.kind, EnemyKind::DryBones { bones: true, .. })
    }

    /// Advance one tick. Returns a projectile to spawn, if any.
    pub fn update(&mut self, terrain: &Terrain, tuning: &Tuning) -> Option<ThrowRequest> {
        if self.dead {
            return None;
        }

        let swims = self.species() == Species::CheepCheep;
        if !swims {
            self.vel.y += tuning.gravity;
        }
        self.rect.translate(self.vel);

        if self.range > 0.0 && !self.is_shelled() {
            let x = self.rect.x;
            if x <= self.origin_x - self.range || x >= self.origin_x + self.range {
                self.vel.x = -self.vel.x;
            }
        }

        let request = self.update_variant(tuning);

        self.on_ground = false;
        for surface in terrain.walker_surfaces() {
            if land_on(&mut self.rect, &mut self.vel, surface) {
                self.on_ground = true;
            }
        }
        let landed = self.on_ground;

        if self.species() == Species::KoopaRed
            && !self.is_shelled()
            && self.on_ground
            && self.vel.x != 0.0
        {
            let lead = if self.vel.x > 0.0 { self.rect.width } else { 0.0 };
            let ahead = Vec2::new(
                self.rect.x + lead + self.vel.x * 5.0,
                self.rect.bottom() + 5.0,
            );
            if !terrain.has_ground_at(ahead) {
                self.vel.x = -self.vel.x;
            }
        }

        // Nothing walks below the floor row
        let floor = GAME_HEIGHT - TILE_SIZE;
        if !swims && !landed && self.rect.bottom() > floor {
            self.rect.y = floor - self.rect.height;
            self.vel.y = 0.0;
            self.on_ground = true;
        }

        request
    }

    fn update_variant(&mut self, tuning: &Tuning) -> Option<ThrowRequest> {
        let center = self.rect.center();
        let facing = if self.vel.x > 0.0 { 1.0 } else { -1.0 };
        let walk_speed = match self.kind {
            EnemyKind::KoopaGreen(_) => tuning.koopa_green_speed,
            _ => tuning.koopa_red_speed,
        };

        match &mut self.kind {
            EnemyKind::KoopaGreen(shell) | EnemyKind::KoopaRed(shell) if shell.shelled => {
                shell.timer = shell.timer.saturating_sub(1);
                // A sliding shell never re-emerges
                if shell.timer == 0 && self.vel.x == 0.0 {
                    shell.shelled = false;
                    let dir = if self.rect.x > self.origin_x { 1.0 } else { -1.0 };
                    self.vel.x = dir * walk_speed;
                    self.rect.x = self.origin_x;
                }
                None
            }
            EnemyKind::DryBones {
                bones,
                reanimate_timer,
            } if *bones => {
                *reanimate_timer = reanimate_timer.saturating_sub(1);
                if *reanimate_timer == 0 {
                    *bones = false;
                    self.vel.x = facing;
                    log::debug!("Dry bones reanimated at x={:.0}", self.rect.x);
                }
                None
            }
            EnemyKind::HammerBro {
                jump_timer,
                throw_timer,
            } => {
                *jump_timer += 1;
                if *jump_timer >= tuning.hammer_jump_interval && self.on_ground {
                    self.vel.y = tuning.jump_impulse * tuning.hammer_jump_scale;
                    *jump_timer = 0;
                }
                *throw_timer += 1;
                if *throw_timer >= tuning.hammer_throw_interval {
                    *throw_timer = 0;
                    return Some(ThrowRequest {
                        kind: ProjectileKind::Hammer,
                        origin: center,
                        vel: Vec2::new(facing * tuning.hammer_speed, 0.0),
                    });
                }
                None
            }
            EnemyKind::MiniBowser {
                fireball_timer,
                invincible_timer,
                ..
            } => {
                *invincible_timer = invincible_timer.saturating_sub(1);
                *fireball_timer += 1;
                if *fireball_timer >= tuning.boss_fireball_interval {
                    *fireball_timer = 0;
                    return Some(ThrowRequest {
                        kind: ProjectileKind::EnemyFireball,
                        origin: center,
                        vel: Vec2::new(facing * tuning.enemy_fireball_speed, 0.0),
                    });
                }
                None
            }
            _ => None,
        }
    }

    /// The avatar came down on top of this enemy
    pub fn stomp(&mut self, avatar_facing_right: bool, tuning: &Tuning) -> StompOutcome {
        match &mut self.kind {
            EnemyKind::KoopaGreen(shell) | EnemyKind::KoopaRed(shell) => {
                shell.timer = tuning.shell_ticks;
                if shell.shelled {
                    let dir = if avatar_facing_right { 1.0 } else { -1.0 };
                    self.vel.x = dir * tuning.shell_kick_speed;
                    StompOutcome::Kicked
                } else {
                    shell.shelled = true;
                    self.vel.x = 0.0;
                    StompOutcome::Shelled
                }
            }
            EnemyKind::DryBones {
                bones,
                reanimate_timer,
            } => {
                *reanimate_timer = tuning.bones_ticks;
                self.vel.x = 0.0;
                if *bones {
                    StompOutcome::Restarted
                } else {
                    *bones = true;
                    StompOutcome::Collapsed
                }
            }
            EnemyKind::MiniBowser { .. } => StompOutcome::Hurts,
            _ => {
                self.dead = true;
                StompOutcome::Defeated
            }
        }
    }

    /// A player fireball touched this enemy
    pub fn burn(&mut self, tuning: &Tuning) -> FireballOutcome {
        match &mut self.kind {
            EnemyKind::Buzzy => FireballOutcome::Immune,
            EnemyKind::MiniBowser {
                hit_points,
                invincible_timer,
                ..
            } => {
                if *invincible_timer > 0 {
                    return FireballOutcome::Immune;
                }
                *hit_points = hit_points.saturating_sub(1);
                *invincible_timer = tuning.boss_invincibility_ticks;
                if *hit_points == 0 {
                    self.dead = true;
                    FireballOutcome::Defeated
                } else {
                    FireballOutcome::Wounded
                }
            }
            _ => {
                self.dead = true;
                FireballOutcome::Defeated
            }
        }
    }
}
