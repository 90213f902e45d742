//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one tick per call
//! - No randomness
//! - Stable iteration order (collection order, reverse where entities are removed)
//! - No rendering or platform dependencies

pub mod avatar;
pub mod blocks;
pub mod collision;
pub mod enemies;
pub mod geometry;
pub mod hazards;
pub mod interact;
pub mod items;
pub mod level;
pub mod state;
pub mod tick;
pub mod world;

pub use avatar::{Avatar, Morph, PowerTier};
pub use blocks::{Block, BlockContent, BlockEffect, BlockKind};
pub use collision::{Contact, Terrain, land_on, resolve_solid};
pub use enemies::{Enemy, EnemyKind, Species};
pub use geometry::{Rect, circle_rect_collision, overlap_depth, overlaps};
pub use hazards::{Axe, DonutLift, FireBar, Flagpole, PSwitch, Springboard, Thwomp, ThwompState};
pub use items::{Coin, PowerUp, PowerUpKind, Projectile, ProjectileKind};
pub use level::{LevelData, LevelError, LevelSet, Theme, WarpDestination};
pub use state::{GameEvent, GamePhase, GameState, MessageAction};
pub use tick::{TickInput, run_ticks, tick};
pub use world::DamageOutcome;
