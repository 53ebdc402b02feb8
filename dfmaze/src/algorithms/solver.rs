use crate::{
    dims::Dims,
    error::MazeError,
    gameboard::{Grid, Marker, Neighbors},
};

/// Depth-first search with backtracking from the entrance to the exit.
///
/// The stack of the search is the path walked so far, so once the exit is
/// reached its contents are the solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthFirstSolver;

struct Step {
    pos: Dims,
    neighbors: Neighbors,
    cursor: usize,
}

impl Step {
    fn next_neighbor(&mut self) -> Option<Dims> {
        let next = self.neighbors.get(self.cursor).copied();
        self.cursor += 1;
        next
    }
}

impl DepthFirstSolver {
    /// Marks the cells on the path from the entrance to the exit and returns
    /// them in walking order.
    pub fn solve(&self, grid: &mut Grid) -> Result<Vec<Dims>, MazeError> {
        grid.reset(Marker::Visited);
        grid.reset(Marker::Path);
        Self::check_carved(grid)?;

        let (entrance, exit) = (grid.entrance(), grid.exit());

        let mut stack = vec![Self::enter(grid, entrance)];
        while let Some(step) = stack.last_mut() {
            if step.pos == exit {
                break;
            }

            let Some(next) = step.next_neighbor() else {
                stack.pop();
                continue;
            };
            let current = step.pos;

            if grid[next].is_visited() || !grid.is_open_between(current, next) {
                continue;
            }

            stack.push(Self::enter(grid, next));
        }

        if stack.is_empty() {
            log::warn!("Exit {:?} is not connected to the entrance", exit);
            return Err(MazeError::UnreachableGoal { entrance, exit });
        }

        let path: Vec<Dims> = stack.into_iter().map(|step| step.pos).collect();
        for &pos in &path {
            grid[pos].set_on_path(true);
        }

        log::debug!("Found path of {} cells", path.len());
        Ok(path)
    }

    fn check_carved(grid: &Grid) -> Result<(), MazeError> {
        if grid.cell_count() > 1 && grid.passage_count() == 0 {
            return Err(MazeError::invalid_grid(
                "maze has no open passages, generate it before solving",
            ));
        }

        Ok(())
    }

    fn enter(grid: &mut Grid, pos: Dims) -> Step {
        grid[pos].set_visited(true);
        Step {
            pos,
            neighbors: grid.interior_neighbors(pos),
            cursor: 0,
        }
    }
}
