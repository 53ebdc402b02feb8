pub mod cell;
pub use cell::{Cell, CellWall, WallSide};
pub mod grid;
pub use grid::{Grid, Marker, Neighbors};
