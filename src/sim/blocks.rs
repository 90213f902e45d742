//! Interactive blocks: question, brick, hidden, pipe
//!
//! A block reacts when the avatar strikes it from below. The reaction is
//! returned as a `BlockEffect` and applied by the caller, so the block never
//! touches score, power-ups or level loading itself.

use serde::{Deserialize, Serialize};

use super::avatar::PowerTier;
use super::geometry::Rect;
use super::items::PowerUpKind;
use super::level::{BlockSpec, WarpDestination};
use crate::consts::TILE_SIZE;

/// Block variant (may change at runtime: hidden reveals, P-switch toggles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Question,
    Brick,
    Hidden,
    Pipe,
    /// Brick temporarily turned into a coin block by a P-switch
    CoinBlockTemp,
}

/// What a block holds, parsed from its level-data content tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockContent {
    Coin,
    Mushroom,
    FireFlower,
    OneUp,
    Superstar,
    /// Decorative brick the avatar walks through
    FakeWall,
    /// Brick toggled by P-switches
    SwitchAffected,
    /// Named warp; resolved against the level's warp table at load
    Warp(String),
}

impl From<String> for BlockContent {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "coin" => BlockContent::Coin,
            "mushroom" => BlockContent::Mushroom,
            "fireflower" => BlockContent::FireFlower,
            "1up" => BlockContent::OneUp,
            "superstar" => BlockContent::Superstar,
            "fake_wall" => BlockContent::FakeWall,
            "p_switch_affected" => BlockContent::SwitchAffected,
            _ => BlockContent::Warp(tag),
        }
    }
}

impl From<BlockContent> for String {
    fn from(content: BlockContent) -> Self {
        match content {
            BlockContent::Coin => "coin".into(),
            BlockContent::Mushroom => "mushroom".into(),
            BlockContent::FireFlower => "fireflower".into(),
            BlockContent::OneUp => "1up".into(),
            BlockContent::Superstar => "superstar".into(),
            BlockContent::FakeWall => "fake_wall".into(),
            BlockContent::SwitchAffected => "p_switch_affected".into(),
            BlockContent::Warp(tag) => tag,
        }
    }
}

impl BlockContent {
    pub fn power_up(&self) -> Option<PowerUpKind> {
        match self {
            BlockContent::Mushroom => Some(PowerUpKind::Mushroom),
            BlockContent::FireFlower => Some(PowerUpKind::FireFlower),
            BlockContent::OneUp => Some(PowerUpKind::OneUp),
            BlockContent::Superstar => Some(PowerUpKind::Superstar),
            _ => None,
        }
    }
}

/// Result of striking a block from below
#[derive(Debug, Clone, PartialEq)]
pub enum BlockEffect {
    None,
    /// Award the block-coin bonus
    Coin,
    /// Spawn a power-up one tile above the block
    Spawn(PowerUpKind),
    /// Remove the block
    Break,
    Warp(WarpDestination),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub rect: Rect,
    pub kind: BlockKind,
    /// Kind at load, restored when a P-switch expires
    pub original_kind: BlockKind,
    pub content: Option<BlockContent>,
    /// Question block already used
    pub hit: bool,
    pub visible: bool,
    /// Vertical draw offset for the bump animation (0 at rest, negative = up)
    pub bounce_offset: f32,
    /// Warp target resolved from the level's warp table
    pub warp: Option<WarpDestination>,
}

impl Block {
    pub fn new(spec: &BlockSpec, warp: Option<WarpDestination>) -> Self {
        Self {
            rect: Rect::new(spec.x, spec.y, TILE_SIZE, TILE_SIZE),
            kind: spec.kind,
            original_kind: spec.kind,
            content: spec.content.clone(),
            hit: false,
            visible: spec.kind != BlockKind::Hidden,
            bounce_offset: 0.0,
            warp,
        }
    }

    pub fn is_fake_wall(&self) -> bool {
        self.content == Some(BlockContent::FakeWall)
    }

    pub fn is_switch_affected(&self) -> bool {
        self.content == Some(BlockContent::SwitchAffected)
    }

    /// Solid for the avatar (hidden blocks included, so they can be found)
    pub fn is_solid(&self) -> bool {
        !self.is_fake_wall()
    }

    /// Enemies and power-ups can stand on it
    pub fn supports_walkers(&self) -> bool {
        self.kind != BlockKind::Hidden
    }

    /// Projectiles bounce off it
    pub fn stops_projectiles(&self) -> bool {
        !matches!(self.kind, BlockKind::Hidden | BlockKind::CoinBlockTemp)
    }

    /// Relax the bump animation back to rest
    pub fn update(&mut self, bounce_speed: f32) {
        if self.bounce_offset < 0.0 {
            self.bounce_offset = (self.bounce_offset + bounce_speed).min(0.0);
        }
    }

    /// Struck from below by an avatar of the given tier
    pub fn strike(&mut self, tier: PowerTier, bounce_height: f32) -> BlockEffect {
        self.bounce_offset = -bounce_height;

        match self.kind {
            BlockKind::Question if !self.hit => {
                self.hit = true;
                self.release_content()
            }
            BlockKind::Hidden if !self.visible => {
                // Revealed blocks behave like a used question block from now on
                self.visible = true;
                self.hit = true;
                self.kind = BlockKind::Question;
                self.release_content()
            }
            BlockKind::Brick if tier >= PowerTier::Big => BlockEffect::Break,
            BlockKind::Pipe => match &self.warp {
                Some(dest) => BlockEffect::Warp(dest.clone()),
                None => BlockEffect::None,
            },
            _ => BlockEffect::None,
        }
    }

    fn release_content(&self) -> BlockEffect {
        match &self.content {
            Some(BlockContent::Coin) => BlockEffect::Coin,
            Some(BlockContent::Warp(_)) => match &self.warp {
                Some(dest) => BlockEffect::Warp(dest.clone()),
                None => BlockEffect::None,
            },
            Some(content) => content
                .power_up()
                .map(BlockEffect::Spawn)
                .unwrap_or(BlockEffect::None),
            None => BlockEffect::None,
        }
    }

    /// P-switch press: swap brick and temporary coin block
    pub fn toggle_switched(&mut self) {
        self.kind = match self.kind {
            BlockKind::Brick => BlockKind::CoinBlockTemp,
            BlockKind::CoinBlockTemp => BlockKind::Brick,
            other => other,
        };
    }

    /// P-switch expiry: back to the kind it was loaded with
    pub fn revert(&mut self) {
        self.kind = self.original_kind;
    }
}
