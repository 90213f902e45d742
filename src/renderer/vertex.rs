//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (world pixels) and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.36, 0.58, 0.99, 1.0];
    pub const DARK_SKY: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const WATER: [f32; 4] = [0.1, 0.4, 0.9, 0.5];
    pub const GROUND: [f32; 4] = [0.55, 0.3, 0.1, 1.0];

    pub const QUESTION: [f32; 4] = [0.95, 0.7, 0.1, 1.0];
    pub const USED: [f32; 4] = [0.5, 0.35, 0.2, 1.0];
    pub const BRICK: [f32; 4] = [0.7, 0.3, 0.15, 1.0];
    pub const PIPE: [f32; 4] = [0.1, 0.7, 0.2, 1.0];
    pub const SWITCH_COIN: [f32; 4] = [1.0, 0.85, 0.0, 1.0];

    pub const GOOMBA: [f32; 4] = [0.6, 0.35, 0.15, 1.0];
    pub const KOOPA_GREEN: [f32; 4] = [0.2, 0.75, 0.2, 1.0];
    pub const KOOPA_RED: [f32; 4] = [0.85, 0.15, 0.15, 1.0];
    pub const BUZZY: [f32; 4] = [0.2, 0.25, 0.45, 1.0];
    pub const CHEEP_CHEEP: [f32; 4] = [1.0, 0.4, 0.4, 1.0];
    pub const HAMMER_BRO: [f32; 4] = [0.3, 0.6, 0.3, 1.0];
    pub const DRY_BONES: [f32; 4] = [0.9, 0.9, 0.85, 1.0];
    pub const MINI_BOWSER: [f32; 4] = [0.4, 0.6, 0.1, 1.0];

    pub const COIN: [f32; 4] = [1.0, 0.85, 0.0, 1.0];
    pub const MUSHROOM: [f32; 4] = [0.9, 0.2, 0.1, 1.0];
    pub const FIRE_FLOWER: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
    pub const ONE_UP: [f32; 4] = [0.2, 0.8, 0.2, 1.0];
    pub const SUPERSTAR: [f32; 4] = [1.0, 1.0, 0.3, 1.0];

    pub const FIREBALL: [f32; 4] = [1.0, 0.45, 0.0, 1.0];
    pub const HAMMER: [f32; 4] = [0.5, 0.5, 0.55, 1.0];
    pub const ENEMY_FIREBALL: [f32; 4] = [1.0, 0.2, 0.1, 1.0];

    pub const FLAGPOLE: [f32; 4] = [0.85, 0.85, 0.85, 1.0];
    pub const AXE: [f32; 4] = [0.7, 0.7, 0.75, 1.0];
    pub const SPRINGBOARD: [f32; 4] = [0.9, 0.3, 0.3, 1.0];
    pub const FIRE_BAR: [f32; 4] = [1.0, 0.55, 0.1, 1.0];
    pub const THWOMP: [f32; 4] = [0.55, 0.55, 0.65, 1.0];
    pub const DONUT: [f32; 4] = [0.85, 0.6, 0.3, 1.0];
    pub const P_SWITCH: [f32; 4] = [0.25, 0.35, 0.95, 1.0];

    pub const AVATAR_SMALL: [f32; 4] = [0.9, 0.1, 0.1, 1.0];
    pub const AVATAR_FIRE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
