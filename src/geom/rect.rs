use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::geom::Point;

/// An axis-aligned rectangle defined by its lower-left and upper-right corners.
///
/// Used for rooms, exterior areas and heater control areas. The corner order
/// invariant (`min <= max` componentwise) is checked at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub fn new(min: Point, max: Point) -> Result<Self> {
        ensure!(
            min.x <= max.x && min.y <= max.y,
            "rectangle corners out of order: min {min}, max {max}"
        );
        Ok(Self { min, max })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}
