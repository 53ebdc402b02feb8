use std::{mem, ops};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::array::Array2D;
use crate::dims::Dims;
use crate::error::MazeError;
use crate::gameboard::cell::{Cell, CellWall, WallSide};

/// Up to four neighbor positions, in left, right, up, down order.
pub type Neighbors = SmallVec<[Dims; 4]>;

/// Per-cell traversal marker that can be wiped with [`Grid::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Visited,
    Path,
}

/// Rectangular cell grid with its closing column and closing row.
///
/// Cells `[0, width) × [0, height)` are the maze itself. Column `x = width`
/// and row `y = height` only carry the right and bottom borders; they start
/// visited and are never entered by the generator or the solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    pub(crate) cells: Array2D<Cell>,
}

impl Grid {
    /// Creates a grid with every wall closed and every cell unvisited.
    pub fn new(size: Dims) -> Result<Grid, MazeError> {
        let frame = Self::frame_size(size)?;
        let mut cells = Array2D::new_dims(Cell::new(), frame)
            .ok_or(MazeError::InvalidDimension(size))?;

        for pos in Dims::iter_fill(Dims::ZERO, frame) {
            cells[pos] = Self::pristine_cell(pos, size);
        }

        Ok(Grid { cells })
    }

    /// Wraps already existing cells, closing column and row included.
    pub fn from_cells(cells: Array2D<Cell>) -> Result<Grid, MazeError> {
        let frame = cells.size();
        if frame.0 < 2 || frame.1 < 2 {
            return Err(MazeError::invalid_grid(format!(
                "expected at least 2x2 cells including the closing column and row, got {}x{}",
                frame.0, frame.1
            )));
        }

        Ok(Grid { cells })
    }

    fn frame_size(size: Dims) -> Result<Dims, MazeError> {
        if size.0 < 1 || size.1 < 1 {
            return Err(MazeError::InvalidDimension(size));
        }

        let invalid = || MazeError::InvalidDimension(size);
        let frame = Dims(
            size.0.checked_add(1).ok_or_else(invalid)?,
            size.1.checked_add(1).ok_or_else(invalid)?,
        );
        // a single allocation may not exceed isize::MAX bytes
        (frame.0 as usize)
            .checked_mul(frame.1 as usize)
            .and_then(|count| count.checked_mul(mem::size_of::<Cell>()))
            .filter(|&bytes| bytes <= isize::MAX as usize)
            .ok_or_else(invalid)?;

        Ok(frame)
    }

    fn pristine_cell(pos: Dims, size: Dims) -> Cell {
        match (pos.0 == size.0, pos.1 == size.1) {
            (false, false) => Cell::new(),
            (true, false) => Cell::closing_column(),
            (false, true) => Cell::closing_row(),
            (true, true) => Cell::closing_corner(),
        }
    }

    /// Size of the maze, without the closing column and row.
    pub fn size(&self) -> Dims {
        self.cells.size() - Dims::ONE
    }

    pub fn width(&self) -> i32 {
        self.size().0
    }

    pub fn height(&self) -> i32 {
        self.size().1
    }

    pub fn cell_count(&self) -> usize {
        self.size().product() as usize
    }

    pub fn entrance(&self) -> Dims {
        Dims::ZERO
    }

    pub fn exit(&self) -> Dims {
        self.size() - Dims::ONE
    }

    /// Is the position one of the maze cells.
    pub fn is_in_bounds(&self, pos: Dims) -> bool {
        let size = self.size();
        0 <= pos.0 && pos.0 < size.0 && 0 <= pos.1 && pos.1 < size.1
    }

    /// Is the position a maze cell or a closing cell.
    pub fn is_in_frame(&self, pos: Dims) -> bool {
        self.cells.dim_to_idx(pos).is_some()
    }

    /// 4-directional neighbors inside `[0, width] × [0, height]`.
    pub fn neighbors(&self, pos: Dims) -> Neighbors {
        self.neighbors_where(pos, |pos| self.is_in_frame(pos))
    }

    /// 4-directional neighbors inside `[0, width) × [0, height)`.
    pub fn interior_neighbors(&self, pos: Dims) -> Neighbors {
        self.neighbors_where(pos, |pos| self.is_in_bounds(pos))
    }

    fn neighbors_where(&self, pos: Dims, keep: impl Fn(Dims) -> bool) -> Neighbors {
        CellWall::get_in_order()
            .into_iter()
            .map(|wall| pos + wall.to_coord())
            .filter(|&pos| keep(pos))
            .collect()
    }

    /// Returns the wall of `cell` facing `cell2`, `None` if they are not adjacent.
    pub fn which_wall_between(cell: Dims, cell2: Dims) -> Option<CellWall> {
        match (cell.0 - cell2.0, cell.1 - cell2.1) {
            (-1, 0) => Some(CellWall::Right),
            (1, 0) => Some(CellWall::Left),
            (0, -1) => Some(CellWall::Bottom),
            (0, 1) => Some(CellWall::Top),
            _ => None,
        }
    }

    fn shared_wall(&self, a: Dims, b: Dims) -> Option<(Dims, WallSide)> {
        if !self.is_in_frame(a) || !self.is_in_frame(b) {
            return None;
        }

        Self::which_wall_between(a, b).map(|wall| wall.canonical(a))
    }

    /// Clears the wall shared by two adjacent cells.
    ///
    /// Returns `false` if the cells are not adjacent or the wall was already open.
    pub fn open_wall_between(&mut self, a: Dims, b: Dims) -> bool {
        let Some((owner, side)) = self.shared_wall(a, b) else {
            return false;
        };

        let cell = &mut self.cells[owner];
        if !cell.has_wall(side) {
            return false;
        }
        cell.set_wall(side, false);
        true
    }

    /// Is there an open passage between two adjacent cells.
    pub fn is_open_between(&self, a: Dims, b: Dims) -> bool {
        self.shared_wall(a, b)
            .map(|(owner, side)| !self.cells[owner].has_wall(side))
            .unwrap_or(false)
    }

    /// Clears the marker on every maze cell, closing cells keep theirs.
    pub fn reset(&mut self, marker: Marker) {
        for pos in Dims::iter_fill(Dims::ZERO, self.size()) {
            let cell = &mut self.cells[pos];
            match marker {
                Marker::Visited => cell.set_visited(false),
                Marker::Path => cell.set_on_path(false),
            }
        }
    }

    /// Restores the state of a freshly created grid.
    pub fn clear(&mut self) {
        let size = self.size();
        for pos in Dims::iter_fill(Dims::ZERO, self.cells.size()) {
            self.cells[pos] = Self::pristine_cell(pos, size);
        }
    }

    /// Opens the outer wall left of the entrance and right of the exit.
    pub fn open_entrance_and_exit(&mut self) {
        let Dims(w, h) = self.size();
        self.cells[Dims::ZERO].set_wall(WallSide::Left, false);
        self.cells[Dims(w, h - 1)].set_wall(WallSide::Left, false);
    }

    /// Open walls between two maze cells, each as `(earlier, later)` pair.
    pub fn passages(&self) -> Vec<(Dims, Dims)> {
        let mut passages = Vec::new();
        for pos in Dims::iter_fill(Dims::ZERO, self.size()) {
            let cell = &self.cells[pos];
            if pos.0 > 0 && !cell.has_left_wall() {
                passages.push((pos + CellWall::Left.to_coord(), pos));
            }
            if pos.1 > 0 && !cell.has_top_wall() {
                passages.push((pos + CellWall::Top.to_coord(), pos));
            }
        }
        passages
    }

    pub fn passage_count(&self) -> usize {
        self.passages().len()
    }

    /// Cells reachable from `from` through open passages.
    pub fn reachable_count(&self, from: Dims) -> usize {
        if !self.is_in_bounds(from) {
            return 0;
        }

        let Dims(w, h) = self.size();
        let mut seen = Array2D::new(false, w as usize, h as usize);
        let mut stack = vec![from];
        seen[from] = true;
        let mut count = 0;

        while let Some(pos) = stack.pop() {
            count += 1;
            for next in self.interior_neighbors(pos) {
                if !seen[next] && self.is_open_between(pos, next) {
                    seen[next] = true;
                    stack.push(next);
                }
            }
        }

        count
    }

    /// Connected and exactly `N - 1` passages, i.e. a spanning tree.
    pub fn is_perfect(&self) -> bool {
        let count = self.cell_count();
        self.passage_count() + 1 == count && self.reachable_count(Dims::ZERO) == count
    }

    /// Cells marked as part of the solution, in row-major order.
    pub fn path(&self) -> Vec<Dims> {
        Dims::iter_fill(Dims::ZERO, self.size())
            .filter(|&pos| self.cells[pos].is_on_path())
            .collect()
    }

    pub fn get_cells(&self) -> &Array2D<Cell> {
        &self.cells
    }
}

impl ops::Index<Dims> for Grid {
    type Output = Cell;

    fn index(&self, index: Dims) -> &Self::Output {
        &self.cells[index]
    }
}

impl ops::IndexMut<Dims> for Grid {
    fn index_mut(&mut self, index: Dims) -> &mut Self::Output {
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(w: i32, h: i32) -> Grid {
        Grid::new(Dims(w, h)).unwrap()
    }

    #[test]
    fn new_grid_is_closed() {
        let grid = grid(4, 3);
        assert_eq!(grid.size(), Dims(4, 3));
        assert_eq!(grid.get_cells().size(), Dims(5, 4));
        assert_eq!(grid.passage_count(), 0);
        for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
            assert_eq!(grid[pos], Cell::new());
        }
        assert_eq!(grid[Dims(4, 1)], Cell::closing_column());
        assert_eq!(grid[Dims(2, 3)], Cell::closing_row());
        assert_eq!(grid[Dims(4, 3)], Cell::closing_corner());
    }

    #[test]
    fn invalid_dimensions() {
        for size in [Dims(0, 1), Dims(1, 0), Dims(-3, 5), Dims(0, 0), Dims(i32::MAX, 1)] {
            assert_eq!(Grid::new(size), Err(MazeError::InvalidDimension(size)));
        }
    }

    #[test]
    fn too_large_to_allocate() {
        let size = Dims(i32::MAX - 1, i32::MAX - 1);
        assert_eq!(Grid::new(size), Err(MazeError::InvalidDimension(size)));
    }

    #[test]
    fn neighbors_include_closing_cells() {
        let grid = grid(2, 2);
        assert_eq!(
            grid.neighbors(Dims(1, 1)).to_vec(),
            vec![Dims(0, 1), Dims(2, 1), Dims(1, 0), Dims(1, 2)]
        );
        assert_eq!(
            grid.interior_neighbors(Dims(1, 1)).to_vec(),
            vec![Dims(0, 1), Dims(1, 0)]
        );
        assert_eq!(
            grid.neighbors(Dims(0, 0)).to_vec(),
            vec![Dims(1, 0), Dims(0, 1)]
        );
    }

    #[test]
    fn walls_are_stored_on_the_later_cell() {
        let mut grid = grid(3, 3);

        assert!(grid.open_wall_between(Dims(1, 1), Dims(1, 2)));
        assert!(!grid[Dims(1, 2)].has_top_wall());
        assert!(grid[Dims(1, 1)].has_top_wall());

        assert!(grid.open_wall_between(Dims(2, 0), Dims(1, 0)));
        assert!(!grid[Dims(2, 0)].has_left_wall());
        assert!(grid[Dims(1, 0)].has_left_wall());

        assert!(grid.is_open_between(Dims(1, 2), Dims(1, 1)));
        assert!(grid.is_open_between(Dims(1, 0), Dims(2, 0)));
        assert!(!grid.is_open_between(Dims(0, 0), Dims(1, 0)));
        assert_eq!(grid.passage_count(), 2);
    }

    #[test]
    fn opening_twice_or_far_apart_does_nothing() {
        let mut grid = grid(3, 3);
        assert!(grid.open_wall_between(Dims(0, 0), Dims(0, 1)));
        assert!(!grid.open_wall_between(Dims(0, 1), Dims(0, 0)));
        assert!(!grid.open_wall_between(Dims(0, 0), Dims(1, 1)));
        assert!(!grid.open_wall_between(Dims(0, 0), Dims(-1, 0)));
        assert!(!grid.is_open_between(Dims(0, 0), Dims(0, 0)));
        assert_eq!(grid.passage_count(), 1);
    }

    #[test]
    fn entrance_and_exit_are_not_passages() {
        let mut grid = grid(3, 2);
        grid.open_entrance_and_exit();
        assert!(!grid[Dims(0, 0)].has_left_wall());
        assert!(!grid[Dims(3, 1)].has_left_wall());
        assert!(grid[Dims(3, 0)].has_left_wall());
        assert_eq!(grid.passage_count(), 0);
    }

    #[test]
    fn reset_leaves_closing_cells_alone() {
        let mut grid = grid(2, 2);
        for pos in Dims::iter_fill(Dims::ZERO, grid.size()) {
            grid[pos].set_visited(true);
            grid[pos].set_on_path(true);
        }

        grid.reset(Marker::Visited);
        assert!(grid.get_cells().iter_pos().all(|pos| {
            grid[pos].is_visited() == !grid.is_in_bounds(pos)
        }));
        assert_eq!(grid.path().len(), 4);

        grid.reset(Marker::Path);
        assert!(grid.path().is_empty());
    }

    #[test]
    fn clear_restores_pristine_state() {
        let mut grid = grid(3, 3);
        grid.open_wall_between(Dims(0, 0), Dims(1, 0));
        grid.open_entrance_and_exit();
        grid[Dims(1, 1)].set_on_path(true);
        grid.clear();
        assert_eq!(grid, Grid::new(Dims(3, 3)).unwrap());
    }

    #[test]
    fn perfect_detection() {
        let mut grid = grid(2, 2);
        assert!(!grid.is_perfect());

        grid.open_wall_between(Dims(0, 0), Dims(1, 0));
        grid.open_wall_between(Dims(1, 0), Dims(1, 1));
        grid.open_wall_between(Dims(1, 1), Dims(0, 1));
        assert!(grid.is_perfect());

        grid.open_wall_between(Dims(0, 1), Dims(0, 0));
        assert!(!grid.is_perfect());
        assert_eq!(grid.reachable_count(Dims::ZERO), 4);
    }

    #[test]
    fn single_cell_is_perfect() {
        let grid = grid(1, 1);
        assert!(grid.is_perfect());
        assert_eq!(grid.entrance(), grid.exit());
    }
}
