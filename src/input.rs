//! Input collaborator
//!
//! Keyboard and touch sources both write into one shared map of held
//! logical actions (last writer wins per action). The simulation polls a
//! snapshot of it once per tick and never writes back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::TickInput;

/// Logical actions the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Throw,
    Start,
}

/// Shared map of currently held actions
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: BTreeMap<Action, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an action's held state (touch buttons call this directly)
    pub fn set(&mut self, action: Action, held: bool) {
        self.held.insert(action, held);
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.held.get(&action).copied().unwrap_or(false)
    }

    /// Keyboard down event; unbound keys are ignored
    pub fn key_down(&mut self, settings: &Settings, key: &str) {
        if let Some(action) = settings.action_for_key(key) {
            self.set(action, true);
        }
    }

    /// Keyboard up event
    pub fn key_up(&mut self, settings: &Settings, key: &str) {
        if let Some(action) = settings.action_for_key(key) {
            self.set(action, false);
        }
    }

    /// Poll the map into a per-tick input
    pub fn snapshot(&self) -> TickInput {
        TickInput {
            left: self.is_held(Action::MoveLeft),
            right: self.is_held(Action::MoveRight),
            jump: self.is_held(Action::Jump),
            throw: self.is_held(Action::Throw),
            start: self.is_held(Action::Start),
        }
    }
}
