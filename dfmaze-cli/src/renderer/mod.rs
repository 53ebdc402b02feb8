pub mod helpers;

use crossterm::style::Stylize as _;
use dfmaze::{Dims, Grid};
use serde::{Deserialize, Serialize};

use helpers::{join_lines, line_corner};

pub const PATH_MARK: char = '.';

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum RenderStyle {
    /// `+---+` corners with `|` walls
    #[default]
    Ascii,
    /// Unicode box-drawing lines
    Box,
}

/// Draws a grid as text. Never touches the grid itself.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    style: RenderStyle,
    color: bool,
    show_path: bool,
}

impl Renderer {
    pub fn new(style: RenderStyle) -> Self {
        Self {
            style,
            color: false,
            show_path: true,
        }
    }

    pub fn color(mut self, value: bool) -> Self {
        self.color = value;
        self
    }

    pub fn show_path(mut self, value: bool) -> Self {
        self.show_path = value;
        self
    }

    pub fn render(&self, grid: &Grid) -> String {
        let Dims(w, h) = grid.size();
        let mut lines = Vec::with_capacity(2 * h as usize + 1);

        for y in 0..=h {
            lines.push(
                (0..=w)
                    .map(|x| self.wall_span(grid, Dims(x, y)))
                    .collect::<String>(),
            );

            // the closing row has no left walls, its cell line is always blank
            if y < h {
                lines.push(
                    (0..=w)
                        .map(|x| self.cell_span(grid, Dims(x, y)))
                        .collect::<String>(),
                );
            }
        }

        join_lines(lines)
    }

    /// Corner and top wall of the cell at `pos`.
    fn wall_span(&self, grid: &Grid, pos: Dims) -> String {
        let top = grid[pos].has_top_wall();
        let corner = match self.style {
            RenderStyle::Ascii => '+',
            RenderStyle::Box => {
                let Dims(x, y) = pos;
                let north = y > 0 && grid[Dims(x, y - 1)].has_left_wall();
                let south = grid[pos].has_left_wall();
                let west = x > 0 && grid[Dims(x - 1, y)].has_top_wall();
                line_corner(north, south, west, top)
            }
        };

        let wall = match (self.style, top) {
            (_, false) => "   ",
            (RenderStyle::Ascii, true) => "---",
            (RenderStyle::Box, true) => "───",
        };

        format!("{}{}", corner, wall)
    }

    /// Left wall and content of the cell at `pos`.
    fn cell_span(&self, grid: &Grid, pos: Dims) -> String {
        let cell = &grid[pos];
        let wall = match (self.style, cell.has_left_wall()) {
            (_, false) => ' ',
            (RenderStyle::Ascii, true) => '|',
            (RenderStyle::Box, true) => '│',
        };

        let mark = if self.show_path && cell.is_on_path() {
            if self.color {
                PATH_MARK.yellow().bold().to_string()
            } else {
                PATH_MARK.to_string()
            }
        } else {
            " ".to_string()
        };

        format!("{} {} ", wall, mark)
    }
}
