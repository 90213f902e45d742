//! Game state and core simulation types
//!
//! Everything the tick reads or writes lives in `GameState`, so a snapshot
//! fully describes a run and two runs fed the same inputs stay identical.

use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::blocks::Block;
use super::enemies::{Enemy, Species};
use super::geometry::Rect;
use super::hazards::{Axe, DonutLift, FireBar, Flagpole, PSwitch, Springboard, Thwomp};
use super::items::{Coin, PowerUp, PowerUpKind, Projectile};
use super::level::{LevelSet, Theme, WarpDestination};
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title message, waiting for start
    Start,
    /// Active gameplay
    Playing,
    /// Goal reached, waiting for "next level"
    LevelComplete,
    /// Out of lives, waiting for "retry"
    GameOver,
    /// Campaign finished, waiting for "play again"
    GameComplete,
}

/// Button offered with a phase message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageAction {
    Start,
    Retry,
    NextLevel,
    PlayAgain,
}

impl MessageAction {
    pub fn label(self) -> &'static str {
        match self {
            MessageAction::Start => "Start Game",
            MessageAction::Retry => "Try Again",
            MessageAction::NextLevel => "Next Level",
            MessageAction::PlayAgain => "Play Again",
        }
    }
}

/// Something that happened during a tick, drained by the frame driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    LivesChanged(i32),
    /// Index of the level just loaded
    LevelChanged(usize),
    ShowMessage { text: String, action: MessageAction },
    HideMessage,
    CoinCollected,
    BlockBroken,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    EnemyDefeated(Species),
    BossHit { hit_points: u8 },
    AvatarDamaged,
    FireballThrown,
    SwitchPressed,
    SwitchExpired,
    Warped(WarpDestination),
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub levels: LevelSet,
    pub level_index: usize,
    pub theme: Theme,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: i32,
    /// Ticks simulated this run
    pub time_ticks: u64,

    pub avatar: Avatar,
    pub platforms: Vec<Rect>,
    pub blocks: Vec<Block>,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUp>,
    pub projectiles: Vec<Projectile>,
    pub water: Vec<Rect>,
    pub flagpole: Option<Flagpole>,
    pub axe: Option<Axe>,
    pub springboards: Vec<Springboard>,
    pub fire_bars: Vec<FireBar>,
    pub thwomps: Vec<Thwomp>,
    pub donut_lifts: Vec<DonutLift>,
    pub p_switches: Vec<PSwitch>,

    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn add_score(&mut self, points: u64) {
        if points == 0 {
            return;
        }
        self.score += points;
        self.push_event(GameEvent::ScoreChanged(self.score));
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
        self.push_event(GameEvent::LivesChanged(self.lives));
    }

    /// Any water region overlaps the box
    pub fn in_water(&self, rect: &Rect) -> bool {
        self.water.iter().any(|w| w.overlaps(rect))
    }

    /// Live player fireballs
    pub fn player_fireballs(&self) -> usize {
        self.projectiles
            .iter()
            .filter(|p| p.active && !p.kind.is_hostile())
            .count()
    }
}
