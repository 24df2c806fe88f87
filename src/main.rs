//! Laser Grid entry point
//!
//! Reads settings, starts a session and runs a line-command loop on stdin.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;

use laser_grid::{BuiltinLevels, LevelCatalog, Settings};
use laser_grid::input::{Command, parse_line};
use laser_grid::renderer::{SessionView, describe_event, legend};
use laser_grid::sim::Session;

/// Route a laser through a 5x5 grid of mirrors and splitters.
#[derive(Parser)]
#[command(name = "laser-grid")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Level to start on (1-based)
    #[arg(short, long)]
    level: Option<usize>,

    /// Seed for splitter coin flips
    #[arg(short, long)]
    seed: Option<u64>,

    /// Settings file (defaults to $LASER_GRID_SETTINGS or ./laser_grid_settings.json)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings back to the settings file and exit
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Settings::default()
        }),
        None => Settings::load(),
    };
    if let Some(level) = cli.level {
        settings.start_level = level;
    }
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    let settings = settings.sanitized(BuiltinLevels.level_count());

    if cli.save_settings {
        let path = cli.settings.unwrap_or_else(Settings::default_path);
        if let Err(e) = settings.save_to(&path) {
            eprintln!("{e}");
            std::process::exit(1);
        }
        return;
    }

    let session = match Session::new(&settings) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(session, &settings) {
        eprintln!("I/O error: {e}");
        std::process::exit(1);
    }
}

fn run(mut session: Session, settings: &Settings) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout();
    let coords = settings.show_coordinates;

    writeln!(out, "Laser Grid. Type `help` for commands.")?;
    session.drain_events();
    write!(out, "{}", SessionView::new(&session, coords))?;

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(e) => {
                write!(out, "{e}")?;
                out.flush()?;
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Pieces => writeln!(out, "{}", legend())?,
            Command::Show => write!(out, "{}", SessionView::new(&session, coords))?,
            Command::Solution => {
                write!(out, "{}", SessionView::new(&session, coords).with_solution())?
            }
            play => {
                let Some(action) = play.action() else {
                    continue;
                };
                match session.apply(action) {
                    Ok(()) => {
                        for event in session.drain_events() {
                            writeln!(out, "{}", describe_event(&event))?;
                        }
                        write!(out, "{}", SessionView::new(&session, coords))?;
                    }
                    Err(e) => writeln!(out, "can't do that: {e}")?,
                }
            }
        }
        out.flush()?;
    }
    log::info!("Session ended on level {}", session.level_number());
    Ok(())
}
