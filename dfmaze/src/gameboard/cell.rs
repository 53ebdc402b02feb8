use serde::{Deserialize, Serialize};

use crate::dims::Dims;

/// One grid position.
///
/// Only the top and left walls are stored; the bottom wall of a cell is the
/// top wall of the cell below it and the right wall is the left wall of the
/// cell to its right. Field names double as the interchange keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) top: bool,
    pub(crate) left: bool,
    pub(crate) path: bool,
    pub(crate) visited: bool,
}

impl Cell {
    /// Interior cell, fully walled and unvisited.
    pub fn new() -> Cell {
        Cell {
            top: true,
            left: true,
            path: false,
            visited: false,
        }
    }

    /// Cell of the closing column, only draws the right border of the maze.
    pub fn closing_column() -> Cell {
        Cell {
            top: false,
            left: true,
            path: false,
            visited: true,
        }
    }

    /// Cell of the closing row, only draws the bottom border of the maze.
    pub fn closing_row() -> Cell {
        Cell {
            top: true,
            left: false,
            path: false,
            visited: true,
        }
    }

    pub fn closing_corner() -> Cell {
        Cell {
            top: false,
            left: false,
            path: false,
            visited: true,
        }
    }

    pub fn has_wall(&self, side: WallSide) -> bool {
        match side {
            WallSide::Top => self.top,
            WallSide::Left => self.left,
        }
    }

    pub fn set_wall(&mut self, side: WallSide, closed: bool) {
        match side {
            WallSide::Top => self.top = closed,
            WallSide::Left => self.left = closed,
        }
    }

    pub fn has_top_wall(&self) -> bool {
        self.top
    }

    pub fn has_left_wall(&self) -> bool {
        self.left
    }

    pub fn is_on_path(&self) -> bool {
        self.path
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn set_on_path(&mut self, path: bool) {
        self.path = path;
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

/// The two walls a cell actually owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallSide {
    Top,
    Left,
}

/// Direction from a cell towards one of its 4 neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellWall {
    Left,
    Right,
    Top,
    Bottom,
}

impl CellWall {
    pub fn to_coord(self) -> Dims {
        match self {
            Self::Left => Dims(-1, 0),
            Self::Right => Dims(1, 0),
            Self::Top => Dims(0, -1),
            Self::Bottom => Dims(0, 1),
        }
    }

    pub fn reverse_wall(self) -> CellWall {
        use CellWall::*;

        match self {
            Left => Right,
            Right => Left,
            Top => Bottom,
            Bottom => Top,
        }
    }

    /// Neighbor enumeration order: left, right, up, down.
    pub fn get_in_order() -> [CellWall; 4] {
        use CellWall::*;
        [Left, Right, Top, Bottom]
    }

    /// Maps this side of the cell at `pos` to the cell that stores it.
    ///
    /// A vertical boundary lives in the `top` of the cell with greater y,
    /// a horizontal one in the `left` of the cell with greater x.
    pub fn canonical(self, pos: Dims) -> (Dims, WallSide) {
        match self {
            Self::Left => (pos, WallSide::Left),
            Self::Top => (pos, WallSide::Top),
            Self::Right => (pos + self.to_coord(), WallSide::Left),
            Self::Bottom => (pos + self.to_coord(), WallSide::Top),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_owner_is_the_later_cell() {
        let pos = Dims(2, 3);
        assert_eq!(CellWall::Left.canonical(pos), (Dims(2, 3), WallSide::Left));
        assert_eq!(CellWall::Right.canonical(pos), (Dims(3, 3), WallSide::Left));
        assert_eq!(CellWall::Top.canonical(pos), (Dims(2, 3), WallSide::Top));
        assert_eq!(CellWall::Bottom.canonical(pos), (Dims(2, 4), WallSide::Top));
    }

    #[test]
    fn both_sides_of_a_boundary_agree() {
        let pos = Dims(5, 5);
        for wall in CellWall::get_in_order() {
            let other = pos + wall.to_coord();
            assert_eq!(
                wall.canonical(pos),
                wall.reverse_wall().canonical(other),
                "{:?}",
                wall
            );
        }
    }

    #[test]
    fn closing_cells_are_previsited() {
        for cell in [
            Cell::closing_column(),
            Cell::closing_row(),
            Cell::closing_corner(),
        ] {
            assert!(cell.is_visited());
            assert!(!cell.is_on_path());
        }
        assert!(!Cell::new().is_visited());
        assert!(Cell::new().has_top_wall() && Cell::new().has_left_wall());
    }
}
