use std::{io::Write, path::PathBuf};

use dfmaze::{
    algorithms,
    ser::{self, SerializeError},
    Dims, Grid, MazeError,
};
use thiserror::Error;

use crate::{
    game::{self, Game, GameStatus},
    renderer::{RenderStyle, Renderer},
    settings::{Settings, SettingsError},
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Maze error; {0}")]
    Maze(#[from] MazeError),
    #[error("Maze file error; {0}")]
    Serialize(#[from] SerializeError),
    #[error("Settings error; {0}")]
    Settings(#[from] SettingsError),
    #[error("Output error; {0}")]
    Io(#[from] std::io::Error),
}

/// Largest side that still leaves room for the closing column and row.
pub const MAX_SIDE: i64 = i32::MAX as i64 - 1;

/// Raises sizes below 1 to 1 instead of failing.
pub fn clamp_dimension(name: &str, value: i64) -> i32 {
    let clamped = value.clamp(1, MAX_SIDE);
    if clamped != value {
        log::warn!("Maze {} {} is out of range, using {}", name, value, clamped);
    }
    clamped as i32
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub size: Dims,
    pub seed: Option<u64>,
    pub style: RenderStyle,
    pub show_unsolved: bool,
    pub show_solved: bool,
    pub color: bool,
    pub json: bool,
    pub load: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub play: bool,
}

impl RunOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            size: Dims(
                clamp_dimension("width", settings.get_width()),
                clamp_dimension("height", settings.get_height()),
            ),
            seed: None,
            style: settings.get_style(),
            show_unsolved: settings.get_show_unsolved(),
            show_solved: settings.get_show_solved(),
            color: settings.get_color(),
            json: false,
            load: None,
            save: None,
            play: false,
        }
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Generates (or loads) a maze, prints the requested views and returns it.
pub fn run(options: &RunOptions, out: &mut impl Write) -> Result<Grid, CliError> {
    let mut grid = build_grid(options)?;

    let renderer = Renderer::new(options.style).color(options.color);

    if options.show_unsolved {
        show(&grid, &renderer.show_path(false), options.json, out)?;
    }

    if options.show_solved {
        let path = algorithms::solve(&mut grid)?;
        log::info!("Solution walks through {} cells", path.len());
        show(&grid, &renderer, options.json, out)?;
    }

    if let Some(path) = &options.save {
        ser::write_to(&grid, path)?;
        log::info!("Saved maze to {}", path.display());
    }

    Ok(grid)
}

/// Lets the player walk the maze on the terminal.
///
/// `save` doubles as the save file of the game, the default one is used without it.
pub fn play(options: &RunOptions, out: &mut impl Write) -> Result<GameStatus, CliError> {
    let grid = build_grid(options)?;
    let save_path = options
        .save
        .clone()
        .unwrap_or_else(|| PathBuf::from(game::DEFAULT_SAVE_FILE));

    let renderer = Renderer::new(options.style).color(options.color);
    let status = game::play(Game::new(grid, save_path), renderer, out)?;
    log::info!("Game ended: {:?}", status);
    Ok(status)
}

fn build_grid(options: &RunOptions) -> Result<Grid, CliError> {
    match &options.load {
        Some(path) => {
            let grid = ser::read_from(path)?;
            log::info!(
                "Loaded {}x{} maze from {}",
                grid.width(),
                grid.height(),
                path.display()
            );
            if !grid.is_perfect() {
                log::warn!("Loaded maze is not a perfect maze");
            }
            Ok(grid)
        }
        None => {
            let mut grid = Grid::new(options.size)?;
            algorithms::generate(&mut grid, options.seed)?;
            Ok(grid)
        }
    }
}

fn show(
    grid: &Grid,
    renderer: &Renderer,
    json: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if json {
        writeln!(out, "{}", ser::to_json_pretty(grid)?)?;
    } else {
        writeln!(out, "{}", renderer.render(grid))?;
    }
    Ok(())
}
