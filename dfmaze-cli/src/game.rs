use std::{
    io::{self, Write},
    panic,
    path::PathBuf,
    thread,
};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use dfmaze::{
    algorithms,
    gameboard::{CellWall, Marker},
    ser, Dims, Grid,
};

use crate::{app::CliError, renderer::Renderer};

pub const DEFAULT_SAVE_FILE: &str = "dfmaze-game.json";

const HELP: &str = "Arrows move, D shows the solution, S saves, R reloads, Esc quits.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(CellWall),
    ShowSolution,
    Save,
    Reload,
    Quit,
}

impl Command {
    pub fn from_key(event: &KeyEvent) -> Option<Command> {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = *event;
        if kind == KeyEventKind::Release {
            return None;
        }

        match code {
            KeyCode::Left => Some(Command::Move(CellWall::Left)),
            KeyCode::Right => Some(Command::Move(CellWall::Right)),
            KeyCode::Up => Some(Command::Move(CellWall::Top)),
            KeyCode::Down => Some(Command::Move(CellWall::Bottom)),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('d' | 'D') => Some(Command::ShowSolution),
            KeyCode::Char('s' | 'S') => Some(Command::Save),
            KeyCode::Char('r' | 'R') => Some(Command::Reload),
            KeyCode::Esc | KeyCode::Char('q' | 'Q') => Some(Command::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    /// The player asked for the solution.
    Revealed,
    Quit,
}

/// Player walking through a maze. The player's cell is the only one marked
/// as path until the solution is revealed.
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    player: Dims,
    save_path: PathBuf,
    status: GameStatus,
    message: Option<String>,
}

impl Game {
    pub fn new(grid: Grid, save_path: impl Into<PathBuf>) -> Self {
        let player = grid.entrance();
        let mut game = Self {
            grid,
            player,
            save_path: save_path.into(),
            status: GameStatus::Playing,
            message: None,
        };
        game.place_player(player);
        game
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> Dims {
        self.player
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn handle(&mut self, command: Command) -> GameStatus {
        if self.status != GameStatus::Playing {
            return self.status;
        }

        self.message = None;
        match command {
            Command::Move(dir) => {
                self.move_player(dir);
            }
            Command::ShowSolution => self.show_solution(),
            Command::Save => self.save(),
            Command::Reload => self.reload(),
            Command::Quit => self.status = GameStatus::Quit,
        }

        self.status
    }

    /// Steps one cell towards `dir` unless a wall or the border is in the way.
    pub fn move_player(&mut self, dir: CellWall) -> bool {
        let next = self.player + dir.to_coord();
        if !self.grid.is_in_bounds(next) || !self.grid.is_open_between(self.player, next) {
            return false;
        }

        self.place_player(next);
        if next == self.grid.exit() {
            log::info!("Maze solved by the player");
            self.status = GameStatus::Won;
        }
        true
    }

    fn place_player(&mut self, pos: Dims) {
        self.grid.reset(Marker::Path);
        self.grid[pos].set_on_path(true);
        self.player = pos;
    }

    fn show_solution(&mut self) {
        match algorithms::solve(&mut self.grid) {
            Ok(_) => self.status = GameStatus::Revealed,
            Err(err) => {
                log::warn!("Cannot solve the maze: {}", err);
                self.message = Some(format!("Cannot solve the maze: {}", err));
            }
        }
    }

    fn save(&mut self) {
        self.message = Some(match ser::write_to(&self.grid, &self.save_path) {
            Ok(()) => format!("Game saved: {}", self.save_path.display()),
            Err(err) => {
                log::warn!("Saving game to {:?} failed: {}", self.save_path, err);
                format!("Game save error: {}", err)
            }
        });
    }

    /// Loads the saved grid, the player comes back to the first marked cell.
    fn reload(&mut self) {
        if !self.save_path.is_file() {
            self.message = Some(format!("File not found: {}", self.save_path.display()));
            return;
        }

        self.message = Some(match ser::read_from(&self.save_path) {
            Ok(grid) => {
                let player = grid.path().first().copied().unwrap_or(grid.entrance());
                self.grid = grid;
                self.place_player(player);
                format!("Game reloaded: {}", self.save_path.display())
            }
            Err(err) => {
                log::warn!("Reloading game from {:?} failed: {}", self.save_path, err);
                format!("Game reload error: {}", err)
            }
        });
    }

    pub fn status_line(&self) -> &str {
        match self.status {
            GameStatus::Playing => self.message().unwrap_or(HELP),
            GameStatus::Won => "Congratulations! You've solved the maze.",
            GameStatus::Revealed => "Maze solution.",
            GameStatus::Quit => "Game stopped.",
        }
    }
}

/// Runs the game on the terminal until it ends, then prints the final board to `out`.
pub fn play(
    mut game: Game,
    renderer: Renderer,
    out: &mut impl Write,
) -> Result<GameStatus, CliError> {
    let mut stdout = io::stdout();

    register_panic_hook();
    terminal::enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let result = event_loop(&mut game, &renderer, &mut stdout);

    execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    unregister_panic_hook();

    let status = result?;
    writeln!(out, "{}", renderer.render(game.grid()))?;
    writeln!(out, "{}", game.status_line())?;
    Ok(status)
}

fn event_loop(
    game: &mut Game,
    renderer: &Renderer,
    tty: &mut impl Write,
) -> Result<GameStatus, CliError> {
    loop {
        draw(game, renderer, tty)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(command) = Command::from_key(&key) else {
            continue;
        };

        match game.handle(command) {
            GameStatus::Playing => {}
            done => return Ok(done),
        }
    }
}

fn draw(game: &Game, renderer: &Renderer, tty: &mut impl Write) -> io::Result<()> {
    // raw mode needs explicit carriage returns
    let board = renderer.render(game.grid()).replace('\n', "\r\n");

    queue!(
        tty,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        Print(board),
        Print(game.status_line()),
    )?;
    tty.flush()
}

fn register_panic_hook() {
    let prev = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        let _ = terminal::disable_raw_mode();

        prev(info)
    }));
}

fn unregister_panic_hook() {
    if !thread::panicking() {
        let _ = panic::take_hook();
    }
}
