//! The player avatar
//!
//! Movement and collision are driven from `tick`; this module owns the
//! avatar's own bookkeeping: power tier, grow/shrink morph and timers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::{BIG_SCALE, TILE_SIZE};

/// Power tier; ordered so `tier >= Big` reads naturally
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerTier {
    Small,
    Big,
    Fire,
}

impl PowerTier {
    /// Box edge length for this tier
    pub fn size(self) -> f32 {
        match self {
            PowerTier::Small => TILE_SIZE,
            PowerTier::Big | PowerTier::Fire => TILE_SIZE * BIG_SCALE,
        }
    }

    /// Next tier up (fire is the ceiling)
    pub fn promoted(self) -> Self {
        match self {
            PowerTier::Small => PowerTier::Big,
            PowerTier::Big | PowerTier::Fire => PowerTier::Fire,
        }
    }
}

/// Size animation in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Morph {
    None,
    /// Ticks remaining of the grow animation
    Growing(u32),
    /// Ticks remaining of the shrink animation
    Shrinking(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub facing_right: bool,
    pub tier: PowerTier,
    pub morph: Morph,
    pub invincibility_ticks: u32,
    /// Throw was held last tick (edge detection)
    pub throw_latched: bool,
}

impl Avatar {
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TILE_SIZE, TILE_SIZE),
            vel: Vec2::ZERO,
            on_ground: false,
            facing_right: true,
            tier: PowerTier::Small,
            morph: Morph::None,
            invincibility_ticks: 0,
            throw_latched: false,
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincibility_ticks > 0
    }

    pub fn is_growing(&self) -> bool {
        matches!(self.morph, Morph::Growing(_))
    }

    pub fn is_shrinking(&self) -> bool {
        matches!(self.morph, Morph::Shrinking(_))
    }

    /// Damage is ignored while any of these windows is open
    pub fn is_damage_immune(&self) -> bool {
        self.is_invincible() || self.is_growing() || self.is_shrinking()
    }

    /// Place at a level start: tier is kept, motion and timers are cleared
    /// and the box snaps to the tier's size.
    pub fn respawn(&mut self, pos: Vec2) {
        let size = self.tier.size();
        self.rect = Rect::new(pos.x, pos.y + TILE_SIZE - size, size, size);
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.facing_right = true;
        self.morph = Morph::None;
        self.invincibility_ticks = 0;
        self.throw_latched = false;
    }

    /// Advance the grow/shrink animation, keeping the bottom edge fixed
    pub fn advance_morph(&mut self, morph_ticks: u32) {
        let small = PowerTier::Small.size();
        let span = PowerTier::Big.size() - small;
        let total = morph_ticks.max(1) as f32;

        let size = match &mut self.morph {
            Morph::None => return,
            Morph::Growing(remaining) => {
                *remaining = remaining.saturating_sub(1);
                let progress = (total - *remaining as f32) / total;
                small + span * progress
            }
            Morph::Shrinking(remaining) => {
                *remaining = remaining.saturating_sub(1);
                let progress = *remaining as f32 / total;
                small + span * progress
            }
        };

        if matches!(self.morph, Morph::Growing(0) | Morph::Shrinking(0)) {
            self.morph = Morph::None;
            let final_size = self.tier.size();
            self.rect.resize_from_bottom(final_size, final_size);
        } else {
            self.rect.resize_from_bottom(size, size);
        }
    }

    /// Step up one tier; returns true if the tier changed
    pub fn promote(&mut self, morph_ticks: u32, invincibility_ticks: u32) -> bool {
        let next = self.tier.promoted();
        if next == self.tier {
            return false;
        }
        if self.tier == PowerTier::Small {
            self.morph = Morph::Growing(morph_ticks);
        }
        self.tier = next;
        self.invincibility_ticks = self.invincibility_ticks.max(invincibility_ticks);
        true
    }

    /// Drop straight to small with the shrink animation
    pub fn demote(&mut self, morph_ticks: u32, invincibility_ticks: u32) {
        self.tier = PowerTier::Small;
        self.morph = Morph::Shrinking(morph_ticks);
        self.invincibility_ticks = invincibility_ticks;
    }

    /// Edge-triggered throw: true only on the tick the button goes down
    pub fn throw_pressed(&mut self, held: bool) -> bool {
        let pressed = held && !self.throw_latched;
        self.throw_latched = held;
        pressed
    }
}
