mod generator;
mod solver;

use std::fmt;

use rand::{seq::SliceRandom as _, thread_rng, Rng as _, SeedableRng as _};

use crate::{dims::Dims, error::MazeError, gameboard::Grid};

pub use generator::DepthFirstCarver;
pub use solver::DepthFirstSolver;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Seeds the generator, drawing a fresh seed when none is given.
pub fn random_from_seed(seed: Option<u64>) -> Random {
    Random::seed_from_u64(seed.unwrap_or_else(|| thread_rng().gen()))
}

/// Decides in which order the carver tries the neighbors of a cell.
pub trait NeighborOrder: fmt::Debug {
    fn arrange(&self, neighbors: &mut [Dims], rng: &mut Random);
}

/// Uniformly random permutation, independent for every cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct Shuffled;

impl NeighborOrder for Shuffled {
    fn arrange(&self, neighbors: &mut [Dims], rng: &mut Random) {
        neighbors.shuffle(rng);
    }
}

/// Keeps the left, right, up, down order; carves the same maze every time.
#[derive(Debug, Clone, Copy, Default)]
pub struct InOrder;

impl NeighborOrder for InOrder {
    fn arrange(&self, _neighbors: &mut [Dims], _rng: &mut Random) {}
}

/// Carves `grid` into a perfect maze in place.
///
/// Without a seed a random one is drawn and logged, so the maze can be
/// regenerated later.
pub fn generate(grid: &mut Grid, seed: Option<u64>) -> Result<(), MazeError> {
    let seed = seed.unwrap_or_else(|| thread_rng().gen());
    log::info!(
        "Generating {}x{} maze with seed {}",
        grid.width(),
        grid.height(),
        seed
    );

    DepthFirstCarver::new().carve(grid, &mut random_from_seed(Some(seed)))
}

/// Marks the path from the entrance to the exit, returning it in walking order.
pub fn solve(grid: &mut Grid) -> Result<Vec<Dims>, MazeError> {
    DepthFirstSolver.solve(grid)
}
