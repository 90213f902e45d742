//! Side Scroller - A fixed-timestep 2D platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, level state)
//! - `game`: Frame driver (accumulator, start/stop/restart)
//! - `renderer`: Scene tessellation in fixed z-order
//! - `input`: Logical actions and the shared polled input map
//! - `ui`: HUD and phase-message collaborator
//! - `tuning`: Data-driven game balance
//! - `settings`: Key bindings and driver preferences

pub mod game;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use input::{Action, InputState};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per rendered frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions (pixels)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 450.0;

    /// Base tile size; small avatar, blocks and most enemies are one tile
    pub const TILE_SIZE: f32 = 30.0;

    /// Size multiplier for the big and fire tiers
    pub const BIG_SCALE: f32 = 1.5;
}
