//! Side Scroller - headless native runner
//!
//! Plays the campaign with a scripted "run right and jump" input, pressing
//! start whenever a phase message is up, and prints where the run ended.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use side_scroller::consts::SIM_DT;
use side_scroller::renderer::SceneRenderer;
use side_scroller::sim::{GamePhase, GameState, LevelSet};
use side_scroller::ui::LogHud;
use side_scroller::{Action, Game, Settings, Tuning};

/// Frames to wait on a phase message before pressing start
const MESSAGE_DELAY_FRAMES: u64 = 30;

const DEFAULT_FRAMES: u64 = 3600;

#[derive(Debug, Parser)]
#[command(
    name = "side-scroller",
    about = "Runs the side scroller campaign headless with scripted input"
)]
struct Cli {
    /// Level set JSON to play instead of the built-in campaign
    #[arg(long, value_name = "FILE")]
    levels: Option<PathBuf>,
    /// Gameplay tuning JSON
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Settings JSON (falls back to defaults when unreadable)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Rendered frames to run before stopping
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = DEFAULT_FRAMES,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    frames: u64,
    /// Print the final game state as JSON
    #[arg(long)]
    dump_state: bool,
}

/// Scripted player: hold right, hop every 40 frames, throw every 25
fn drive_input(game: &mut Game, frame: u64) {
    let input = &mut game.input;
    input.set(Action::MoveRight, true);
    input.set(Action::Jump, frame % 40 < 12);
    input.set(Action::Throw, frame % 25 == 0);
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let levels = match &cli.levels {
        Some(path) => LevelSet::load(path)?,
        None => LevelSet::builtin()?,
    };
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let settings = match &cli.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!("{} levels loaded", levels.len());

    let mut game = Game::new(GameState::new(levels, tuning), settings);
    let mut hud = LogHud::default();
    let mut renderer = SceneRenderer::new();

    let mut waiting = 0;
    for frame in 0..cli.frames {
        drive_input(&mut game, frame);

        if game.is_running() {
            waiting = 0;
            game.input.set(Action::Start, false);
        } else {
            waiting += 1;
            game.input.set(Action::Start, waiting == MESSAGE_DELAY_FRAMES);
        }

        game.frame(SIM_DT, &mut hud, &mut renderer);

        if game.state.phase == GamePhase::GameComplete {
            log::info!("Campaign finished after {} frames", frame + 1);
            break;
        }
    }

    println!(
        "score: {}  lives: {}  level: {}  phase: {:?}  ticks: {}",
        game.state.score,
        game.state.lives,
        game.state.level_index + 1,
        game.state.phase,
        game.state.time_ticks
    );
    if cli.dump_state {
        println!("{}", serde_json::to_string_pretty(&game.state)?);
    }
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run(Cli::parse()) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}
