//! Wheelie headless runner
//!
//! Loads a level, drives the player with a scripted input sequence and logs
//! what happens. Usage: `wheelie [level.json] [ticks]`.
//!
//! Set `WHEELIE_TUNING` to a JSON file to override gameplay constants.

use std::path::Path;
use std::process::ExitCode;

use wheelie::audio::{AudioManager, LogBackend};
use wheelie::level::{LevelFile, load_level_from_path};
use wheelie::sim::{Directions, GameState, TickInput, tick};
use wheelie::tick_scale_from_dt;
use wheelie::tuning::Tuning;

const DEMO_LEVEL: &str = include_str!("../levels/demo.json");
const DEFAULT_TICKS: u64 = 240;
const TUNING_ENV: &str = "WHEELIE_TUNING";

/// Scripted input: walk right, drop down, then stand still
fn scripted_input(t: u64) -> TickInput {
    let directions = match t {
        0..=89 => Directions {
            right: true,
            ..Default::default()
        },
        90..=149 => Directions {
            down: true,
            ..Default::default()
        },
        _ => Directions::default(),
    };
    TickInput { directions }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let level = match args.next() {
        Some(path) => load_level_from_path(Path::new(&path)),
        None => LevelFile::from_json_str(DEMO_LEVEL),
    };
    let level = match level {
        Ok(level) => level,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        None => DEFAULT_TICKS,
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            log::error!("invalid tick count: {err}");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match std::env::var_os(TUNING_ENV) {
        Some(path) => Tuning::load_or_default(Path::new(&path)),
        None => Tuning::default(),
    };
    let mut state = GameState::with_tuning(tuning);
    level.spawn_into(&mut state);
    let mut audio: AudioManager<LogBackend> = AudioManager::default();
    let tick_scale = tick_scale_from_dt(1.0 / 60.0);

    for t in 0..ticks {
        tick(&mut state, &scripted_input(t), tick_scale);
        let events = state.drain_events();
        for event in &events {
            log::debug!("tick {}: {:?}", state.time_ticks, event);
        }
        audio.play_events(&events);
    }

    println!("Score after {} ticks: {}", state.time_ticks, state.score());
    for entity in &state.entities {
        println!(
            "  {} #{} at ({:.1}, {:.1}) [{}]",
            entity.kind.as_str(),
            entity.id,
            entity.pos.x,
            entity.pos.y,
            entity.sprite.animation.clip_name()
        );
    }
    ExitCode::SUCCESS
}
