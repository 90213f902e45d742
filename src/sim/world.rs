//! Run lifecycle: level loading, damage, warps and phase changes

use glam::Vec2;

use super::avatar::{Avatar, PowerTier};
use super::blocks::Block;
use super::enemies::Enemy;
use super::hazards::{Axe, DonutLift, FireBar, Flagpole, PSwitch, Springboard, Thwomp};
use super::items::Coin;
use super::level::{LevelSet, Theme, WarpDestination};
use super::state::{GameEvent, GamePhase, GameState, MessageAction};
use crate::tuning::Tuning;

pub const START_MESSAGE: &str = "Press start to play";
pub const LEVEL_COMPLETE_MESSAGE: &str = "Level Complete!";
pub const FORTRESS_CLEARED_MESSAGE: &str = "Fortress Cleared!";
pub const GAME_OVER_MESSAGE: &str = "Game Over!";
pub const CAMPAIGN_COMPLETE_MESSAGE: &str = "Congratulations! You finished all levels!";
pub const SECRET_EXIT_MESSAGE: &str = "Secret Exit Found! You win!";

/// What a hit did to the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invincible, mid-morph or play already over
    Ignored,
    /// Lost the power tier
    Demoted,
    LifeLost,
    GameOver,
}

impl GameState {
    /// Fresh state showing level 0 behind the start message
    pub fn new(levels: LevelSet, tuning: Tuning) -> Self {
        let lives = tuning.starting_lives;
        let mut state = Self {
            tuning,
            levels,
            level_index: 0,
            theme: Theme::default(),
            phase: GamePhase::Start,
            score: 0,
            lives,
            time_ticks: 0,
            avatar: Avatar::new(Vec2::ZERO),
            platforms: Vec::new(),
            blocks: Vec::new(),
            enemies: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            projectiles: Vec::new(),
            water: Vec::new(),
            flagpole: None,
            axe: None,
            springboards: Vec::new(),
            fire_bars: Vec::new(),
            thwomps: Vec::new(),
            donut_lifts: Vec::new(),
            p_switches: Vec::new(),
            events: Vec::new(),
        };
        state.load_level(0);
        state.show_message(START_MESSAGE, MessageAction::Start);
        state
    }

    /// Begin a new run from the first level
    pub fn start_game(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.time_ticks = 0;
        self.avatar = Avatar::new(Vec2::ZERO);
        self.push_event(GameEvent::ScoreChanged(self.score));
        self.push_event(GameEvent::LivesChanged(self.lives));
        self.push_event(GameEvent::HideMessage);
        self.advance_to(0);
        log::info!("New game started");
    }

    /// Continue after a level-complete message
    pub fn next_level(&mut self) {
        self.push_event(GameEvent::HideMessage);
        self.advance_to(self.level_index + 1);
    }

    /// Load a level and keep playing, or finish the campaign past the end
    pub fn advance_to(&mut self, index: usize) {
        if self.load_level(index) {
            self.phase = GamePhase::Playing;
        } else {
            self.finish_campaign(CAMPAIGN_COMPLETE_MESSAGE);
        }
    }

    /// Rebuild the world from level data.
    ///
    /// Every collection is replaced together; nothing from the previous
    /// level survives except score, lives and the avatar's tier. Returns
    /// false if the index is past the last level.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(level) = self.levels.get(index) else {
            return false;
        };
        let tuning = &self.tuning;

        let blocks = level
            .blocks
            .iter()
            .map(|spec| Block::new(spec, level.resolve_warp(spec.content.as_ref())))
            .collect();
        let enemies = level
            .enemies
            .iter()
            .map(|spec| Enemy::new(spec, tuning))
            .collect();
        let coins = level
            .coins
            .iter()
            .map(|c| Coin::new(Vec2::new(c.x, c.y), c.radius))
            .collect();

        self.platforms = level.platforms.clone();
        self.blocks = blocks;
        self.enemies = enemies;
        self.coins = coins;
        self.power_ups.clear();
        self.projectiles.clear();
        self.water = level.water.clone();
        self.flagpole = level.flagpole.as_ref().map(Flagpole::new);
        self.axe = level.axe.map(|p| Axe::new(p.into()));
        self.springboards = level
            .springboards
            .iter()
            .map(|&p| Springboard::new(p.into()))
            .collect();
        self.fire_bars = level.firebars.iter().map(FireBar::new).collect();
        self.thwomps = level.thwomps.iter().map(Thwomp::new).collect();
        self.donut_lifts = level
            .donut_lifts
            .iter()
            .map(|&p| DonutLift::new(p.into(), tuning.donut_fall_ticks))
            .collect();
        self.p_switches = level
            .p_switches
            .iter()
            .map(|&p| PSwitch::new(p.into()))
            .collect();
        self.theme = level.theme;
        self.avatar.respawn(level.player_start.into());

        log::info!("Loaded level {} ({})", index, level.name);
        self.level_index = index;
        self.push_event(GameEvent::LevelChanged(index));
        true
    }

    /// Enemy, hazard or projectile contact; ignored while immune
    pub fn hurt_avatar(&mut self) -> DamageOutcome {
        if self.avatar.is_damage_immune() {
            return DamageOutcome::Ignored;
        }
        self.apply_damage()
    }

    /// Fell out of the world: always costs, then the level restarts
    pub fn fall_out(&mut self) -> DamageOutcome {
        let outcome = self.apply_damage();
        if self.phase == GamePhase::Playing {
            self.load_level(self.level_index);
        }
        outcome
    }

    fn apply_damage(&mut self) -> DamageOutcome {
        if self.phase != GamePhase::Playing {
            return DamageOutcome::Ignored;
        }
        self.push_event(GameEvent::AvatarDamaged);
        let tuning = &self.tuning;

        if self.avatar.tier > PowerTier::Small {
            self.avatar
                .demote(tuning.morph_ticks, tuning.invincibility_ticks);
            return DamageOutcome::Demoted;
        }

        self.lives -= 1;
        self.push_event(GameEvent::LivesChanged(self.lives));
        if self.lives <= 0 {
            self.game_over();
            DamageOutcome::GameOver
        } else {
            self.avatar.invincibility_ticks = self.tuning.invincibility_ticks;
            DamageOutcome::LifeLost
        }
    }

    pub fn apply_warp(&mut self, destination: WarpDestination) {
        log::debug!("Warp from level {}: {:?}", self.level_index, destination);
        self.push_event(GameEvent::Warped(destination.clone()));

        match destination {
            WarpDestination::Teleport { x, bottom } => {
                let avatar = &mut self.avatar;
                avatar.rect.x = x;
                avatar.rect.y = bottom - avatar.rect.height;
                avatar.vel = Vec2::ZERO;
                avatar.on_ground = false;
            }
            WarpDestination::Level { index } => self.advance_to(index),
            WarpDestination::NextLevel => self.advance_to(self.level_index + 1),
            WarpDestination::GameComplete => self.finish_campaign(SECRET_EXIT_MESSAGE),
        }
    }

    pub fn complete_level(&mut self, text: &str) {
        log::info!("Level {} complete, score {}", self.level_index, self.score);
        self.phase = GamePhase::LevelComplete;
        self.show_message(text, MessageAction::NextLevel);
    }

    pub fn finish_campaign(&mut self, text: &str) {
        log::info!("Campaign finished, score {}", self.score);
        self.phase = GamePhase::GameComplete;
        self.show_message(text, MessageAction::PlayAgain);
    }

    fn game_over(&mut self) {
        log::info!("Game over at level {}, score {}", self.level_index, self.score);
        self.phase = GamePhase::GameOver;
        self.show_message(GAME_OVER_MESSAGE, MessageAction::Retry);
    }

    fn show_message(&mut self, text: &str, action: MessageAction) {
        self.push_event(GameEvent::ShowMessage {
            text: text.to_string(),
            action,
        });
    }
}
