use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::{Env, Target};
use math_snake::app::{App, AppConfig};
use math_snake::audio::TerminalBell;
use math_snake::input::InputHandler;
use math_snake::settings::{Settings, load_settings, load_settings_from_path};
use math_snake::terminal_runtime::{TerminalSession, cleanup_terminal_best_effort};
use math_snake::ticker::IntervalTicker;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for questions and apple placement (reproducible runs).
    #[arg(long)]
    seed: Option<u64>,

    /// Tick interval in milliseconds.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Play with mouse-drag swipes at the slower touch tick rate.
    #[arg(long)]
    touch: bool,

    /// Maximum grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Maximum grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Start with sound muted.
    #[arg(long)]
    mute: bool,

    /// Settings file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write diagnostics to this file (filter with RUST_LOG).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

fn main() -> math_snake::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let settings = resolve_settings(&cli)?;
    log::info!("Starting with {settings:?}");

    install_panic_hook();

    let config = AppConfig {
        tick_interval: settings.tick_interval(cli.touch),
        max_grid: settings.max_grid(),
        seed: cli.seed,
    };
    let surface = TerminalSession::enter()?;
    let mut app = App::new(
        surface,
        InputHandler::new(),
        IntervalTicker::new(),
        TerminalBell::stdout(!settings.sound),
        config,
    )?;
    app.run()?;

    Ok(())
}

/// Settings file first, then CLI overrides. A broken default settings file
/// only warns; an explicitly requested one is an error.
fn resolve_settings(cli: &Cli) -> math_snake::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => load_settings_from_path(path)?,
        None => load_settings().unwrap_or_else(|error| {
            eprintln!("Ignoring settings file: {error}");
            log::warn!("Ignoring settings file: {error}");
            Settings::default()
        }),
    };

    if let Some(tick_ms) = cli.tick_ms {
        settings.tick_interval_ms = tick_ms;
        settings.touch_tick_interval_ms = tick_ms;
    }
    if let Some(width) = cli.width {
        settings.max_grid_width = width;
    }
    if let Some(height) = cli.height {
        settings.max_grid_height = height;
    }
    if cli.mute {
        settings.sound = false;
    }

    settings.validate()?;
    Ok(settings)
}

/// Logs go to a file when requested; stderr would draw over the game.
fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        builder.target(Target::Pipe(Box::new(File::create(path)?)));
    }

    builder.init();
    Ok(())
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = cleanup_terminal_best_effort();
        default_hook(panic_info);
    }));
}
