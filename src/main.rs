use std::fs::File;
use std::io;
use std::panic;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::config::{INPUT_POLL_INTERVAL_MS, Settings, SettingsLayer};
use grid_snake::game::GameState;
use grid_snake::game_loop::GameLoop;
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::renderer::{self, SceneView};
use grid_snake::terminal_runtime::{TerminalSession, restore_terminal};
use log::{error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Parser)]
#[command(name = "grid-snake", version, about)]
struct Cli {
    /// Board width in cells, walls included.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells, walls included.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between movement ticks.
    #[arg(long = "interval-ms")]
    interval_ms: Option<u64>,

    /// Milliseconds to hold the board after a crash before starting over.
    #[arg(long = "reset-delay-ms")]
    reset_delay_ms: Option<u64>,

    /// Strength of the crash effect.
    #[arg(long)]
    force: Option<f32>,

    /// Seed for item placement, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; overrides the per-user default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where log output is written while the terminal is in use.
    #[arg(long = "log-file", default_value = "grid-snake.log")]
    log_file: PathBuf,

    /// One of off, error, warn, info, debug, trace.
    #[arg(long = "log-level", default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

impl Cli {
    fn overrides(&self) -> SettingsLayer {
        SettingsLayer {
            width: self.width,
            height: self.height,
            interval_ms: self.interval_ms,
            reset_delay_ms: self.reset_delay_ms,
            force: self.force,
            seed: self.seed,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = Settings::load(cli.config.as_deref(), cli.overrides())
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    info!("starting with {settings:?}");

    install_panic_hook();

    let result = run(settings);
    if let Err(error) = &result {
        error!("game loop failed: {error}");
    }
    result
}

fn run(settings: Settings) -> io::Result<()> {
    let state = match settings.seed {
        Some(seed) => GameState::new_with_seed(settings.grid, seed),
        None => GameState::new(settings.grid),
    }
    .map_err(into_io)?;

    let mut game_loop = GameLoop::new(state, &settings);
    let mut view = SceneView::new(settings.seed);
    let mut input = InputHandler::new();
    let poll_interval = Duration::from_millis(INPUT_POLL_INTERVAL_MS);

    let mut session = TerminalSession::enter()?;
    let mut last_frame = Instant::now();

    loop {
        session.draw(|frame| renderer::render(frame, &game_loop, &view))?;

        if let Some(game_input) = input.poll_input(poll_interval)? {
            if game_input == GameInput::Quit {
                break;
            }
            game_loop
                .handle_input(game_input, &mut view)
                .map_err(into_io)?;
        }

        let now = Instant::now();
        let elapsed = now.duration_since(last_frame);
        last_frame = now;

        view.advance(elapsed);
        game_loop.update(elapsed, &mut view).map_err(into_io)?;
    }

    info!("quit at score {}", game_loop.state().score);
    Ok(())
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse()
        .map_err(|_| format!("unknown log level `{raw}`"))
}

fn init_logging(cli: &Cli) -> io::Result<()> {
    WriteLogger::init(cli.log_level, Config::default(), File::create(&cli.log_file)?)
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error.to_string()))
}

fn into_io(error: grid_snake::error::GameError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error)
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
