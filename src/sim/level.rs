//! Level descriptors
//!
//! Levels are plain data (JSON). The built-in campaign is embedded at compile
//! time; a custom set can be loaded from disk. Loading validates only what the
//! simulation relies on: there is at least one level and every start position
//! lies inside the world.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::blocks::{BlockContent, BlockKind};
use super::enemies::Species;
use super::geometry::Rect;
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};

const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.json");

/// Errors raised while loading level data
#[derive(Debug)]
pub enum LevelError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// The set contains no levels
    Empty,
    /// A level's start position lies outside the world
    StartOutOfBounds { level: usize, x: f32, y: f32 },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LevelError::Io(err) => write!(f, "Level file read failed: {}", err),
            LevelError::Parse(err) => write!(f, "Level data parse failed: {}", err),
            LevelError::Empty => write!(f, "Level set is empty"),
            LevelError::StartOutOfBounds { level, x, y } => {
                write!(f, "Level {} start ({}, {}) is outside the world", level, x, y)
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Io(err) => Some(err),
            LevelError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LevelError {
    fn from(err: std::io::Error) -> Self {
        LevelError::Io(err)
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(err: serde_json::Error) -> Self {
        LevelError::Parse(err)
    }
}

/// Where a warp sends the avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarpDestination {
    /// Move within the current level; `bottom` is the avatar's feet
    Teleport { x: f32, bottom: f32 },
    /// Jump to a level by index
    Level { index: usize },
    NextLevel,
    /// Secret exit that ends the campaign
    GameComplete,
}

/// Visual theme (background only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Overworld,
    Underground,
    Castle,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        !matches!(self, Theme::Overworld)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<Point> for Vec2 {
    fn from(p: Point) -> Self {
        Vec2::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub x: f32,
    pub y: f32,
    pub kind: BlockKind,
    #[serde(default)]
    pub content: Option<BlockContent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpec {
    pub x: f32,
    pub y: f32,
    pub kind: Species,
    #[serde(default)]
    pub speed: f32,
    #[serde(default)]
    pub range: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSpec {
    /// Centre
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagpoleSpec {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireBarSpec {
    pub center_x: f32,
    pub center_y: f32,
    pub radius: f32,
    pub ball_count: u32,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThwompSpec {
    pub x: f32,
    pub y: f32,
    pub drop_height: f32,
    pub drop_speed: f32,
}

/// One level's layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelData {
    pub name: String,
    #[serde(default)]
    pub theme: Theme,
    /// Top-left of a small avatar
    pub player_start: Point,
    pub platforms: Vec<Rect>,
    #[serde(default)]
    pub blocks: Vec<BlockSpec>,
    #[serde(default)]
    pub enemies: Vec<EnemySpec>,
    #[serde(default)]
    pub coins: Vec<CoinSpec>,
    #[serde(default)]
    pub flagpole: Option<FlagpoleSpec>,
    #[serde(default)]
    pub axe: Option<Point>,
    #[serde(default)]
    pub springboards: Vec<Point>,
    #[serde(default)]
    pub firebars: Vec<FireBarSpec>,
    #[serde(default)]
    pub thwomps: Vec<ThwompSpec>,
    #[serde(default)]
    pub donut_lifts: Vec<Point>,
    #[serde(default)]
    pub water: Vec<Rect>,
    #[serde(default)]
    pub p_switches: Vec<Point>,
    /// Warp id (block content) to destination; ids missing here are inert
    #[serde(default)]
    pub warps: BTreeMap<String, WarpDestination>,
}

impl LevelData {
    /// Resolve a block's content against this level's warp table
    pub fn resolve_warp(&self, content: Option<&BlockContent>) -> Option<WarpDestination> {
        match content {
            Some(BlockContent::Warp(id)) => self.warps.get(id).cloned(),
            _ => None,
        }
    }
}

/// Ordered campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<LevelData>,
}

impl LevelSet {
    /// The embedded four-level campaign
    pub fn builtin() -> Result<Self, LevelError> {
        Self::from_json(BUILTIN_LEVELS)
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let set: LevelSet = serde_json::from_str(json)?;
        set.validate()?;
        Ok(set)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let set = Self::from_json(&json)?;
        log::info!(
            "Loaded {} levels from {}",
            set.levels.len(),
            path.as_ref().display()
        );
        Ok(set)
    }

    fn validate(&self) -> Result<(), LevelError> {
        if self.levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (index, level) in self.levels.iter().enumerate() {
            let Point { x, y } = level.player_start;
            if !(0.0..GAME_WIDTH).contains(&x) || !(0.0..GAME_HEIGHT).contains(&y) {
                return Err(LevelError::StartOutOfBounds { level: index, x, y });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }
}
