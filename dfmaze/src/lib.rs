//! Perfect maze generation and solving.
//!
//! A [`Grid`] starts with every wall closed, [`algorithms::generate`] carves
//! a spanning tree of passages into it with a randomized depth-first walk and
//! [`algorithms::solve`] marks the single path from the top-left entrance to
//! the bottom-right exit.
//!
//! ```
//! use dfmaze::{algorithms, Dims, Grid};
//!
//! let mut grid = Grid::new(Dims(16, 8))?;
//! algorithms::generate(&mut grid, Some(42))?;
//! let path = algorithms::solve(&mut grid)?;
//! assert_eq!(path.first(), Some(&Dims(0, 0)));
//! assert_eq!(path.last(), Some(&Dims(15, 7)));
//! # Ok::<(), dfmaze::MazeError>(())
//! ```

pub mod algorithms;
pub mod array;
pub mod dims;
pub mod error;
pub mod gameboard;
pub mod ser;

pub use dims::Dims;
pub use error::MazeError;
pub use gameboard::{Cell, Grid};
