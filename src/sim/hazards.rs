//! Level furniture: goals, springboards and the moving hazards
//!
//! These carry their own animation state and expose small queries
//! (`hits`, `is_dangerous`) that the tick uses to decide interactions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, circle_rect_collision};
use super::level::{FireBarSpec, FlagpoleSpec, ThwompSpec};
use crate::consts::{BIG_SCALE, GAME_HEIGHT, TILE_SIZE};

pub const FLAGPOLE_WIDTH: f32 = 10.0;

/// End-of-level goal for regular stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flagpole {
    pub rect: Rect,
    pub reached: bool,
}

impl Flagpole {
    pub fn new(spec: &FlagpoleSpec) -> Self {
        Self {
            rect: Rect::new(spec.x, spec.y, FLAGPOLE_WIDTH, spec.height),
            reached: false,
        }
    }
}

/// Fortress goal; cutting it defeats the mini boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axe {
    pub rect: Rect,
    pub cut: bool,
}

impl Axe {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
            cut: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Springboard {
    pub rect: Rect,
    /// Drawn squashed while the avatar is on it
    pub compressed: bool,
}

impl Springboard {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
            compressed: false,
        }
    }
}

/// Ring of fire balls rotating about a centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireBar {
    pub center: Vec2,
    pub radius: f32,
    pub ball_count: u32,
    /// Radians per tick (sign gives direction)
    pub speed: f32,
    pub angle: f32,
}

impl FireBar {
    pub fn new(spec: &FireBarSpec) -> Self {
        Self {
            center: Vec2::new(spec.center_x, spec.center_y),
            radius: spec.radius,
            ball_count: spec.ball_count,
            speed: spec.speed,
            angle: 0.0,
        }
    }

    pub fn update(&mut self) {
        self.angle += self.speed;
    }

    /// Current ball centres, evenly spaced around the circle
    pub fn balls(&self) -> impl Iterator<Item = Vec2> + '_ {
        let step = std::f32::consts::TAU / self.ball_count.max(1) as f32;
        (0..self.ball_count).map(move |i| {
            let a = self.angle + i as f32 * step;
            self.center + self.radius * Vec2::new(a.cos(), a.sin())
        })
    }

    pub fn hits(&self, rect: &Rect, ball_radius: f32) -> bool {
        self.balls()
            .any(|ball| circle_rect_collision(ball, ball_radius, rect))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThwompState {
    Idle,
    Dropping,
    Resting(u32),
    Rising,
}

/// Crusher that drops when the avatar passes beneath it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thwomp {
    pub rect: Rect,
    pub origin_y: f32,
    pub drop_height: f32,
    pub drop_speed: f32,
    pub state: ThwompState,
}

impl Thwomp {
    pub fn new(spec: &ThwompSpec) -> Self {
        let size = TILE_SIZE * BIG_SCALE;
        Self {
            rect: Rect::new(spec.x, spec.y, size, size),
            origin_y: spec.y,
            drop_height: spec.drop_height,
            drop_speed: spec.drop_speed,
            state: ThwompState::Idle,
        }
    }

    pub fn update(&mut self, avatar: &Rect, rest_ticks: u32) {
        match self.state {
            ThwompState::Idle => {
                if avatar.overlaps_horizontally(&self.rect) && avatar.bottom() > self.rect.top() {
                    self.state = ThwompState::Dropping;
                }
            }
            ThwompState::Dropping => {
                let floor = self.origin_y + self.drop_height;
                self.rect.y += self.drop_speed;
                if self.rect.y >= floor {
                    self.rect.y = floor;
                    self.state = ThwompState::Resting(rest_ticks);
                }
            }
            ThwompState::Resting(remaining) => {
                let remaining = remaining.saturating_sub(1);
                self.state = if remaining == 0 {
                    ThwompState::Rising
                } else {
                    ThwompState::Resting(remaining)
                };
            }
            ThwompState::Rising => {
                self.rect.y -= self.drop_speed / 2.0;
                if self.rect.y <= self.origin_y {
                    self.rect.y = self.origin_y;
                    self.state = ThwompState::Idle;
                }
            }
        }
    }

    /// Only a falling thwomp hurts
    pub fn is_dangerous(&self) -> bool {
        self.state == ThwompState::Dropping
    }
}

/// Platform that drops after the avatar stands on it too long
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonutLift {
    pub rect: Rect,
    pub origin_y: f32,
    pub fall_timer: u32,
    pub falling: bool,
    /// Avatar landed on it this tick
    pub occupied: bool,
}

impl DonutLift {
    pub fn new(pos: Vec2, fall_ticks: u32) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TILE_SIZE * 2.0, TILE_SIZE / 2.0),
            origin_y: pos.y,
            fall_timer: fall_ticks,
            falling: false,
            occupied: false,
        }
    }

    pub fn update(&mut self, fall_ticks: u32, fall_speed: f32) {
        if self.falling {
            self.rect.y += fall_speed;
        }

        if self.occupied {
            self.fall_timer = self.fall_timer.saturating_sub(1);
            if self.fall_timer == 0 && !self.falling {
                self.falling = true;
                log::debug!("Donut lift at x={:.0} falling", self.rect.x);
            }
        } else if !self.falling {
            self.fall_timer = fall_ticks;
        }

        if self.falling && self.rect.top() > GAME_HEIGHT + TILE_SIZE {
            self.rect.y = self.origin_y;
            self.falling = false;
            self.fall_timer = fall_ticks;
        }
    }
}

/// Switch that temporarily turns tagged bricks into coin blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PSwitch {
    pub rect: Rect,
    pub pressed: bool,
    pub active_timer: u32,
}

impl PSwitch {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
            pressed: false,
            active_timer: 0,
        }
    }

    /// Returns true if this press activated the switch
    pub fn press(&mut self, active_ticks: u32) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        self.active_timer = active_ticks;
        true
    }

    /// Count down; returns true on the tick the switch expires
    pub fn update(&mut self) -> bool {
        if !self.pressed {
            return false;
        }
        self.active_timer = self.active_timer.saturating_sub(1);
        if self.active_timer == 0 {
            self.pressed = false;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_bar_ball_positions() {
        let mut bar = FireBar::new(&FireBarSpec {
            center_x: 120.0,
            center_y: 300.0,
            radius: 40.0,
            ball_count: 4,
            speed: 0.05,
        });
        let balls: Vec<Vec2> = bar.balls().collect();
        assert_eq!(balls.len(), 4);
        assert!((balls[0] - Vec2::new(160.0, 300.0)).length() < 1e-3);
        assert!((balls[1] - Vec2::new(120.0, 340.0)).length() < 1e-3);

        bar.update();
        assert!((bar.angle - 0.05).abs() < 1e-6);

        let near_ball = Rect::new(155.0, 295.0, 10.0, 10.0);
        let far_away = Rect::new(500.0, 100.0, 30.0, 30.0);
        assert!(bar.hits(&near_ball, 8.0));
        assert!(!bar.hits(&far_away, 8.0));
    }

    #[test]
    fn test_thwomp_cycle() {
        let spec = ThwompSpec {
            x: 540.0,
            y: 270.0,
            drop_height: 90.0,
            drop_speed: 3.0,
        };
        let mut thwomp = Thwomp::new(&spec);

        // Avatar off to the side: stays idle
        let aside = Rect::new(100.0, 390.0, 30.0, 30.0);
        thwomp.update(&aside, 60);
        assert_eq!(thwomp.state, ThwompState::Idle);

        let below = Rect::new(550.0, 390.0, 30.0, 30.0);
        thwomp.update(&below, 60);
        assert!(thwomp.is_dangerous());

        for _ in 0..30 {
            thwomp.update(&below, 60);
        }
        assert_eq!(thwomp.rect.y, 360.0);
        assert_eq!(thwomp.state, ThwompState::Resting(60));
        assert!(!thwomp.is_dangerous());

        for _ in 0..60 {
            thwomp.update(&aside, 60);
        }
        assert_eq!(thwomp.state, ThwompState::Rising);
        for _ in 0..60 {
            thwomp.update(&aside, 60);
        }
        assert_eq!(thwomp.state, ThwompState::Idle);
        assert_eq!(thwomp.rect.y, 270.0);
    }

    #[test]
    fn test_donut_lift_falls_and_resets() {
        let mut lift = DonutLift::new(Vec2::new(600.0, 390.0), 60);

        // Stepping off before the timer runs out resets it
        for _ in 0..30 {
            lift.occupied = true;
            lift.update(60, 1.0);
        }
        assert_eq!(lift.fall_timer, 30);
        lift.occupied = false;
        lift.update(60, 1.0);
        assert_eq!(lift.fall_timer, 60);

        for _ in 0..60 {
            lift.occupied = true;
            lift.update(60, 1.0);
        }
        assert!(lift.falling);

        lift.occupied = false;
        for _ in 0..200 {
            lift.update(60, 1.0);
        }
        assert!(!lift.falling);
        assert_eq!(lift.rect.y, 390.0);
    }

    #[test]
    fn test_p_switch_expires_once() {
        let mut switch = PSwitch::new(Vec2::new(210.0, 390.0));
        assert!(switch.press(300));
        assert!(!switch.press(300));

        let expiries = (0..400).filter(|_| switch.update()).count();
        assert_eq!(expiries, 1);
        assert!(!switch.pressed);
        assert!(switch.press(300));
    }
}
