use rand::Rng as _;

use super::{InOrder, NeighborOrder, Random, Shuffled};
use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::{Grid, Neighbors},
};

/// Randomized depth-first carving, also known as the recursive backtracker.
///
/// The recursion is unrolled into an explicit stack so the depth of the
/// walk is bounded only by memory, not by the thread stack.
#[derive(Debug)]
pub struct DepthFirstCarver {
    order: Box<dyn NeighborOrder>,
    start: Option<Dims>,
}

/// One level of the unrolled recursion.
struct Frame {
    pos: Dims,
    pending: Neighbors,
    cursor: usize,
}

impl Frame {
    fn next_pending(&mut self) -> Option<Dims> {
        let next = self.pending.get(self.cursor).copied();
        self.cursor += 1;
        next
    }
}

impl DepthFirstCarver {
    pub fn new() -> Self {
        Self::with_order(Shuffled)
    }

    pub fn with_order(order: impl NeighborOrder + 'static) -> Self {
        Self {
            order: Box::new(order),
            start: None,
        }
    }

    /// Carves the same maze on every call, starting from the entrance.
    pub fn deterministic() -> Self {
        Self::with_order(InOrder).start_at(Dims::ZERO)
    }

    /// Starts the walk at `pos` instead of a random cell.
    pub fn start_at(mut self, pos: Dims) -> Self {
        self.start = Some(pos);
        self
    }

    /// Clears `grid` and carves a spanning tree of passages into it, then
    /// opens the entrance and the exit.
    pub fn carve(&self, grid: &mut Grid, rng: &mut Random) -> Result<(), MazeError> {
        let size = grid.size();
        if size.0 < 1 || size.1 < 1 {
            return Err(MazeError::InvalidDimension(size));
        }

        let start = match self.start {
            Some(pos) if grid.is_in_bounds(pos) => pos,
            Some(pos) => {
                return Err(MazeError::invalid_grid(format!(
                    "start cell {:?} is outside of the {}x{} maze",
                    pos, size.0, size.1
                )))
            }
            None => Dims(rng.gen_range(0..size.0), rng.gen_range(0..size.1)),
        };

        grid.clear();
        log::debug!("Carving from {:?}", start);

        let mut carved = 0usize;
        let mut stack = vec![self.enter(grid, start, rng)];
        while let Some(frame) = stack.last_mut() {
            let Some(next) = frame.next_pending() else {
                stack.pop();
                continue;
            };
            let current = frame.pos;

            // might have been reached through another branch since it was queued
            if grid[next].is_visited() {
                continue;
            }

            let opened = grid.open_wall_between(current, next);
            debug_assert!(opened, "wall {:?} -> {:?} was already open", current, next);
            carved += 1;

            stack.push(self.enter(grid, next, rng));
        }

        debug_assert_eq!(carved + 1, grid.cell_count());
        log::trace!("Carved {} passages", carved);

        grid.open_entrance_and_exit();
        Ok(())
    }

    fn enter(&self, grid: &mut Grid, pos: Dims, rng: &mut Random) -> Frame {
        grid[pos].set_visited(true);

        let mut pending: Neighbors = grid
            .neighbors(pos)
            .into_iter()
            .filter(|&next| !grid[next].is_visited())
            .collect();
        self.order.arrange(&mut pending, rng);

        Frame {
            pos,
            pending,
            cursor: 0,
        }
    }
}

impl Default for DepthFirstCarver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{algorithms::random_from_seed, gameboard::Cell};

    fn carved(size: Dims, seed: u64) -> Grid {
        let mut grid = Grid::new(size).unwrap();
        DepthFirstCarver::new()
            .carve(&mut grid, &mut random_from_seed(Some(seed)))
            .unwrap();
        grid
    }

    #[test]
    fn spanning_tree_for_many_sizes() {
        for w in 1..=7 {
            for h in 1..=7 {
                for seed in 0..5 {
                    let grid = carved(Dims(w, h), seed);
                    assert_eq!(
                        grid.passage_count(),
                        (w * h - 1) as usize,
                        "{}x{} seed {}",
                        w,
                        h,
                        seed
                    );
                    assert!(grid.is_perfect(), "{}x{} seed {}", w, h, seed);
                }
            }
        }
    }

    #[test]
    fn every_cell_is_visited() {
        let grid = carved(Dims(9, 4), 1);
        assert!(grid.get_cells().iter().all(Cell::is_visited));
    }

    #[test]
    fn entrance_and_exit_are_open() {
        let grid = carved(Dims(5, 3), 8);
        assert!(!grid[Dims(0, 0)].has_left_wall());
        assert!(!grid[Dims(5, 2)].has_left_wall());
        for y in 0..2 {
            assert!(grid[Dims(5, y)].has_left_wall());
        }
        for x in 0..5 {
            assert!(grid[Dims(x, 3)].has_top_wall());
            assert!(grid[Dims(x, 0)].has_top_wall());
        }
    }

    #[test]
    fn same_seed_same_maze() {
        assert_eq!(carved(Dims(16, 8), 42), carved(Dims(16, 8), 42));
        assert_ne!(carved(Dims(16, 8), 42), carved(Dims(16, 8), 43));
    }

    #[test]
    fn single_cell() {
        let grid = carved(Dims(1, 1), 0);
        assert_eq!(grid.passage_count(), 0);
        assert!(grid[Dims(0, 0)].is_visited());
        assert!(grid[Dims(0, 0)].has_top_wall());
        assert!(!grid[Dims(0, 0)].has_left_wall());
        assert!(!grid[Dims(1, 0)].has_left_wall());
    }

    #[test]
    fn corridors() {
        let row = carved(Dims(6, 1), 3);
        assert!((1..6).all(|x| row.is_open_between(Dims(x - 1, 0), Dims(x, 0))));

        let column = carved(Dims(1, 6), 3);
        assert!((1..6).all(|y| column.is_open_between(Dims(0, y - 1), Dims(0, y))));
    }

    #[test]
    fn recarving_starts_from_scratch() {
        let mut grid = carved(Dims(6, 6), 1);
        DepthFirstCarver::new()
            .carve(&mut grid, &mut random_from_seed(Some(2)))
            .unwrap();
        assert_eq!(grid, carved(Dims(6, 6), 2));
    }

    #[test]
    fn large_maze_does_not_overflow_the_stack() {
        let grid = carved(Dims(300, 300), 9);
        assert_eq!(grid.passage_count(), 300 * 300 - 1);
        assert_eq!(grid.reachable_count(Dims::ZERO), 300 * 300);
    }

    #[test]
    fn start_outside_is_rejected() {
        let mut grid = Grid::new(Dims(3, 3)).unwrap();
        let result = DepthFirstCarver::new()
            .start_at(Dims(3, 0))
            .carve(&mut grid, &mut random_from_seed(Some(0)));
        assert!(matches!(result, Err(MazeError::InvalidGrid(_))));
    }

    #[test]
    fn golden_in_order_3x3() {
        let mut grid = Grid::new(Dims(3, 3)).unwrap();
        DepthFirstCarver::deterministic()
            .carve(&mut grid, &mut random_from_seed(Some(1)))
            .unwrap();

        // (top, left) per cell, closing column and row included
        let expected = [
            [(true, false), (true, false), (true, false), (false, true)],
            [(true, true), (true, false), (false, false), (false, true)],
            [(false, true), (true, false), (true, false), (false, false)],
            [(true, false), (true, false), (true, false), (false, false)],
        ];
        for (y, row) in expected.iter().enumerate() {
            for (x, &(top, left)) in row.iter().enumerate() {
                let cell = grid[Dims(x as i32, y as i32)];
                assert_eq!(
                    (cell.has_top_wall(), cell.has_left_wall()),
                    (top, left),
                    "cell ({}, {})",
                    x,
                    y
                );
            }
        }
    }

    #[test]
    fn deterministic_ignores_the_seed() {
        let mut a = Grid::new(Dims(8, 5)).unwrap();
        let mut b = Grid::new(Dims(8, 5)).unwrap();
        DepthFirstCarver::deterministic()
            .carve(&mut a, &mut random_from_seed(Some(1)))
            .unwrap();
        DepthFirstCarver::deterministic()
            .carve(&mut b, &mut random_from_seed(Some(99)))
            .unwrap();
        assert_eq!(a, b);
        assert!(a.is_perfect());
    }
}
