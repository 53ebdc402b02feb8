use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Position on the grid or size of the grid, `(x, y)`.
///
/// Signed on purpose: neighbor offsets step below zero and sizes coming
/// from the outside may be negative before they get validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    pub fn product(self) -> i64 {
        self.0 as i64 * self.1 as i64
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Manhattan distance between two positions.
    pub fn distance(self, other: Dims) -> i32 {
        (self - other).abs_sum()
    }

    /// Iterates positions of the rectangle `[from, to)` in row-major order.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}
