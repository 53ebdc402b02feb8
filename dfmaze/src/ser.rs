//! Interchange format of a grid.
//!
//! A grid is stored as an array of rows, each row an array of
//! `{"top": bool, "left": bool, "path": bool, "visited": bool}` objects.
//! The closing column and row are part of the data, so a `w × h` maze has
//! `h + 1` rows of `w + 1` cells.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use thiserror::Error;

use crate::{
    array::Array2D,
    error::MazeError,
    gameboard::{Cell, Grid},
};

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = MazeError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let row_count = rows.len();
        let cells = Array2D::from_rows(rows).ok_or_else(|| {
            MazeError::invalid_grid(format!(
                "rows are empty or of different lengths ({} rows)",
                row_count
            ))
        })?;

        Grid::from_cells(cells)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.cells.to_rows()
    }
}

pub fn to_json(grid: &Grid) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(grid)?)
}

pub fn to_json_pretty(grid: &Grid) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(grid)?)
}

pub fn from_json(data: &str) -> Result<Grid, SerializeError> {
    Ok(serde_json::from_str(data)?)
}

pub fn write_to(grid: &Grid, path: &Path) -> Result<(), SerializeError> {
    Ok(serde_json::to_writer(BufWriter::new(File::create(path)?), grid)?)
}

pub fn read_from(path: &Path) -> Result<Grid, SerializeError> {
    Ok(serde_json::from_reader(BufReader::new(File::open(path)?))?)
}
