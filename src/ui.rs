//! HUD and phase-message collaborator
//!
//! The simulation never touches the display. It queues `GameEvent`s and the
//! frame driver forwards them here after each frame's ticks.

use crate::sim::GameEvent;
pub use crate::sim::MessageAction;

/// Score/lives/level readouts plus the modal phase message
pub trait Hud {
    fn set_score(&mut self, score: u64);
    fn set_lives(&mut self, lives: i32);
    fn set_level(&mut self, level_index: usize);
    fn show_message(&mut self, text: &str, action: MessageAction);
    fn hide_message(&mut self);

    /// Gameplay events with no readout (coins, stomps, warps...)
    fn on_event(&mut self, _event: &GameEvent) {}
}

/// Route drained events to the HUD in order
pub fn dispatch(events: &[GameEvent], hud: &mut dyn Hud) {
    for event in events {
        match event {
            GameEvent::ScoreChanged(score) => hud.set_score(*score),
            GameEvent::LivesChanged(lives) => hud.set_lives(*lives),
            GameEvent::LevelChanged(index) => hud.set_level(*index),
            GameEvent::ShowMessage { text, action } => hud.show_message(text, *action),
            GameEvent::HideMessage => hud.hide_message(),
            other => hud.on_event(other),
        }
    }
}

/// HUD for headless runs: keeps the latest values and logs changes
#[derive(Debug, Clone, Default)]
pub struct LogHud {
    pub score: u64,
    pub lives: i32,
    pub level_index: usize,
    /// Message currently shown, if any
    pub message: Option<(String, MessageAction)>,
}

impl Hud for LogHud {
    fn set_score(&mut self, score: u64) {
        log::trace!("Score: {}", score);
        self.score = score;
    }

    fn set_lives(&mut self, lives: i32) {
        log::debug!("Lives: {}", lives);
        self.lives = lives;
    }

    fn set_level(&mut self, level_index: usize) {
        log::info!("Level {}", level_index + 1);
        self.level_index = level_index;
    }

    fn show_message(&mut self, text: &str, action: MessageAction) {
        log::info!("{} [{}]", text, action.label());
        self.message = Some((text.to_string(), action));
    }

    fn hide_message(&mut self) {
        self.message = None;
    }

    fn on_event(&mut self, event: &GameEvent) {
        log::trace!("{:?}", event);
    }
}
