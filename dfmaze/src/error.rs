use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("Invalid maze size {0:?}, both width and height must be at least 1")]
    InvalidDimension(Dims),
    #[error("Invalid grid; {0}")]
    InvalidGrid(String),
    #[error("Exit {exit:?} cannot be reached from entrance {entrance:?}")]
    UnreachableGoal { entrance: Dims, exit: Dims },
}

impl MazeError {
    pub(crate) fn invalid_grid(reason: impl Into<String>) -> Self {
        Self::InvalidGrid(reason.into())
    }
}
