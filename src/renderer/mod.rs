//! Scene rendering
//!
//! The simulation core only hands over the post-tick `GameState`. The
//! scene renderer tessellates it into one triangle list in a fixed z-order
//! (back to front); a GPU backend uploads `as_bytes()` unchanged.

pub mod shapes;
pub mod vertex;

pub use vertex::Vertex;

use glam::Vec2;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::{
    BlockKind, EnemyKind, GameState, PowerTier, PowerUpKind, ProjectileKind, Rect, Species,
};
use vertex::colors;

const CIRCLE_SEGMENTS: u32 = 16;

/// Draws one frame of the game
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

/// Renderer that discards frames
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState) {}
}

/// Tessellates the scene into a reusable vertex buffer
#[derive(Debug, Default)]
pub struct SceneRenderer {
    vertices: Vec<Vertex>,
    frames: u64,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertices of the last rendered frame
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes of the last frame, ready for upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn push_rect(&mut self, r: &Rect, color: [f32; 4]) {
        self.vertices.extend_from_slice(&shapes::rect(r, color));
    }

    fn push_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.vertices
            .extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
    }

    fn draw_blocks(&mut self, state: &GameState) {
        for block in state.blocks.iter().filter(|b| b.visible) {
            let mut r = block.rect;
            r.y += block.bounce_offset;
            let color = match block.kind {
                BlockKind::Question if block.hit => colors::USED,
                BlockKind::Question | BlockKind::Hidden => colors::QUESTION,
                BlockKind::Brick => colors::BRICK,
                BlockKind::Pipe => colors::PIPE,
                BlockKind::CoinBlockTemp => colors::SWITCH_COIN,
            };
            self.push_rect(&r, color);
        }
    }

    fn draw_enemies(&mut self, state: &GameState) {
        for enemy in state.enemies.iter().filter(|e| !e.dead) {
            let color = match enemy.species() {
                Species::Goomba => colors::GOOMBA,
                Species::KoopaGreen => colors::KOOPA_GREEN,
                Species::KoopaRed => colors::KOOPA_RED,
                Species::Buzzy => colors::BUZZY,
                Species::CheepCheep => colors::CHEEP_CHEEP,
                Species::HammerBro => colors::HAMMER_BRO,
                Species::DryBones => colors::DRY_BONES,
                Species::MiniBowser => colors::MINI_BOWSER,
            };

            // Shells and bone piles sit in the lower half of the box
            let mut r = enemy.rect;
            if enemy.is_shelled() || enemy.is_bones() {
                r.resize_from_bottom(r.width, r.height / 2.0);
            }
            self.push_rect(&r, color);

            if let EnemyKind::MiniBowser {
                invincible_timer, ..
            } = enemy.kind
            {
                if invincible_timer > 0 {
                    self.vertices
                        .extend(shapes::outline(&enemy.rect, 2.0, colors::FIRE_BAR));
                }
            }
        }
    }

    fn draw_items(&mut self, state: &GameState) {
        for coin in state.coins.iter().filter(|c| !c.collected) {
            self.push_circle(coin.center(), coin.radius, colors::COIN);
        }

        for power_up in &state.power_ups {
            let color = match power_up.kind {
                PowerUpKind::Mushroom => colors::MUSHROOM,
                PowerUpKind::FireFlower => colors::FIRE_FLOWER,
                PowerUpKind::OneUp => colors::ONE_UP,
                PowerUpKind::Superstar => colors::SUPERSTAR,
            };
            self.push_rect(&power_up.rect, color);
        }

        for projectile in state.projectiles.iter().filter(|p| p.active) {
            let color = match projectile.kind {
                ProjectileKind::PlayerFireball => colors::FIREBALL,
                ProjectileKind::Hammer => colors::HAMMER,
                ProjectileKind::EnemyFireball => colors::ENEMY_FIREBALL,
            };
            let r = projectile.rect;
            self.push_circle(r.center(), r.width.min(r.height) / 2.0, color);
        }
    }

    fn draw_hazards(&mut self, state: &GameState) {
        if let Some(flagpole) = &state.flagpole {
            self.push_rect(&flagpole.rect, colors::FLAGPOLE);
        }
        if let Some(axe) = state.axe.as_ref().filter(|a| !a.cut) {
            self.push_rect(&axe.rect, colors::AXE);
        }

        for spring in &state.springboards {
            let mut r = spring.rect;
            if spring.compressed {
                r.resize_from_bottom(r.width, r.height / 2.0);
            }
            self.push_rect(&r, colors::SPRINGBOARD);
        }

        let ball_radius = state.tuning.fire_ball_radius;
        for bar in &state.fire_bars {
            for ball in bar.balls() {
                self.push_circle(ball, ball_radius, colors::FIRE_BAR);
            }
        }

        for thwomp in &state.thwomps {
            self.push_rect(&thwomp.rect, colors::THWOMP);
        }
        for lift in &state.donut_lifts {
            self.push_rect(&lift.rect, colors::DONUT);
        }

        for switch in &state.p_switches {
            let mut r = switch.rect;
            if switch.pressed {
                r.resize_from_bottom(r.width, r.height / 3.0);
            }
            self.push_rect(&r, colors::P_SWITCH);
        }
    }

    fn draw_avatar(&mut self, state: &GameState) {
        let avatar = &state.avatar;
        let mut color = match avatar.tier {
            PowerTier::Small | PowerTier::Big => colors::AVATAR_SMALL,
            PowerTier::Fire => colors::AVATAR_FIRE,
        };
        // Blink while invincible
        if avatar.is_invincible() && (avatar.invincibility_ticks / 4) % 2 == 0 {
            color[3] = 0.4;
        }
        self.push_rect(&avatar.rect, color);
    }
}

impl Renderer for SceneRenderer {
    fn render(&mut self, state: &GameState) {
        self.vertices.clear();

        let background = if state.theme.is_dark() {
            colors::DARK_SKY
        } else {
            colors::SKY
        };
        self.push_rect(&Rect::new(0.0, 0.0, GAME_WIDTH, GAME_HEIGHT), background);

        for water in &state.water {
            self.push_rect(water, colors::WATER);
        }
        for platform in &state.platforms {
            self.push_rect(platform, colors::GROUND);
        }

        self.draw_blocks(state);
        self.draw_enemies(state);
        self.draw_items(state);
        self.draw_hazards(state);
        self.draw_avatar(state);

        self.frames += 1;
    }
}
