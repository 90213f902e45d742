//! Frame driver
//!
//! Turns variable frame deltas into fixed simulation ticks, forwards the
//! tick events to the HUD and renders once per frame. Ticks only run while
//! the driver is `running`; reaching any message phase stops it until the
//! start action (or a HUD button) calls `continue_game`.

use crate::consts::SIM_DT;
use crate::input::{Action, InputState};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};
use crate::ui::{self, Hud};

pub struct Game {
    pub state: GameState,
    /// Shared held-action map written by keyboard and touch sources
    pub input: InputState,
    pub settings: Settings,
    accumulator: f32,
    running: bool,
    start_was_held: bool,
}

impl Game {
    pub fn new(state: GameState, settings: Settings) -> Self {
        Self {
            state,
            input: InputState::new(),
            settings,
            accumulator: 0.0,
            running: false,
            start_was_held: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Fresh run from level 0
    pub fn start(&mut self) {
        self.state.start_game();
        self.resume();
    }

    /// Stop scheduling ticks; rendering continues
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Act on the current phase message: next level, retry or play again
    pub fn continue_game(&mut self) {
        match self.state.phase {
            GamePhase::Start | GamePhase::GameOver | GamePhase::GameComplete => self.start(),
            GamePhase::LevelComplete => {
                self.state.next_level();
                self.resume();
            }
            GamePhase::Playing => self.resume(),
        }
    }

    fn resume(&mut self) {
        self.accumulator = 0.0;
        self.running = self.state.phase == GamePhase::Playing;
    }

    /// Run one rendered frame of `dt` seconds
    pub fn frame(&mut self, dt: f32, hud: &mut dyn Hud, renderer: &mut dyn Renderer) {
        let start_held = self.input.is_held(Action::Start);
        if start_held && !self.start_was_held && !self.running {
            self.continue_game();
        }
        self.start_was_held = start_held;

        if self.running {
            self.accumulator += dt.clamp(0.0, self.settings.max_frame_dt);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < self.settings.max_substeps {
                self.step();
                self.accumulator -= SIM_DT;
                substeps += 1;
                if !self.running {
                    break;
                }
            }
            // Drop backlog the substep cap could not absorb
            if substeps == self.settings.max_substeps {
                self.accumulator = self.accumulator.min(SIM_DT);
            }
        }

        let events = self.state.drain_events();
        ui::dispatch(&events, hud);
        renderer.render(&self.state);
    }

    /// Exactly one tick with the current input, stopping on phase change
    pub fn step(&mut self) {
        let input = self.input.snapshot();
        tick(&mut self.state, &input);
        if self.state.phase != GamePhase::Playing {
            log::debug!("Stopping on {:?}", self.state.phase);
            self.stop();
        }
    }
}
