use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use log::{LevelFilter, SetLoggerError, debug, info, warn};
use simplelog::{Config, WriteLogger};
use thiserror::Error;
use toroid_snake::config::{ConfigError, GameConfig, default_log_path};
use toroid_snake::events::GameEvent;
use toroid_snake::game::GameState;
use toroid_snake::input::{GameInput, poll_input};
use toroid_snake::terminal_runtime::{TerminalSession, install_panic_hook};

/// Host frame budget; input polling waits at most this long.
const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Frame deltas are expressed in frames of this nominal rate.
const NOMINAL_FPS: f32 = 60.0;

#[derive(Debug, Parser)]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON config file; defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed seed for food placement.
    #[arg(long)]
    seed: Option<u64>,

    /// Log file path.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long = "log-level", default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to install logger: {0}")]
    Logger(#[from] SetLoggerError),
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = GameConfig::load_or_default(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    let mut state = GameState::new(&config)?;
    warn_if_terminal_too_small(&config);

    install_panic_hook();

    let mut session = TerminalSession::enter()?;
    run(&mut session, &mut state)?;

    info!(
        "session end after {} steps, length {}",
        state.step_count,
        state.length()
    );
    Ok(())
}

fn run(session: &mut TerminalSession, state: &mut GameState) -> io::Result<()> {
    let mut last_frame = Instant::now();

    loop {
        session.draw(state)?;

        if let Some(input) = poll_input(FRAME_DURATION)? {
            if input == GameInput::Quit {
                break;
            }
            state.apply_input(input);
        }

        let now = Instant::now();
        let frame_delta = now.duration_since(last_frame).as_secs_f32() * NOMINAL_FPS;
        last_frame = now;

        for event in state.tick(frame_delta) {
            log_event(&event);
        }
    }

    Ok(())
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::Growth { new_length } => info!("grew to {new_length}"),
        GameEvent::SelfCollision { truncated } => info!("bit itself, lost {truncated}"),
        GameEvent::FoodRespawned(items) => debug!("{} food item(s) placed", items.len()),
        GameEvent::SpeedChanged { speed } => info!("speed now {speed}"),
    }
}

fn init_logging(cli: &Cli) -> Result<(), AppError> {
    let path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    WriteLogger::init(cli.log_level, Config::default(), File::create(&path)?)?;
    info!("logging to {}", path.display());
    Ok(())
}

fn warn_if_terminal_too_small(config: &GameConfig) {
    let Ok((columns, rows)) = crossterm::terminal::size() else {
        return;
    };

    // Border on both sides plus the HUD row.
    let needed = (config.cells_x.saturating_add(2), config.cells_y.saturating_add(3));
    if columns < needed.0 || rows < needed.1 {
        warn!(
            "terminal is {columns}x{rows}, grid needs {}x{}; edges will be clipped",
            needed.0, needed.1
        );
    }
}

