use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::geom::{Point, EPS};

/// Orientation of a wall-mounted segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A wall-mounted segment (window, door or heater) between two endpoints.
///
/// Invariant: horizontal segments have equal y-coordinates, vertical segments
/// have equal x-coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Point,
    pub b: Point,
    pub orientation: Orientation,
}

impl Segment {
    pub fn new(a: Point, b: Point, orientation: Orientation) -> Result<Self> {
        match orientation {
            Orientation::Horizontal => ensure!(
                (a.y - b.y).abs() < EPS,
                "horizontal segment endpoints differ in y: {a}, {b}"
            ),
            Orientation::Vertical => ensure!(
                (a.x - b.x).abs() < EPS,
                "vertical segment endpoints differ in x: {a}, {b}"
            ),
        }
        Ok(Self { a, b, orientation })
    }

    pub fn horizontal(a: Point, b: Point) -> Result<Self> {
        Self::new(a, b, Orientation::Horizontal)
    }

    pub fn vertical(a: Point, b: Point) -> Result<Self> {
        Self::new(a, b, Orientation::Vertical)
    }
}
