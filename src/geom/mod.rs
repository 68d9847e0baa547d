//! Continuous floor-plan geometry: points, axis-aligned rectangles and
//! wall-mounted segments.
//!
//! All coordinates are in meters, with the origin at the lower-left corner of
//! the plan. The discrete side (grids, cell indices) lives in
//! [`crate::house::grid`].

pub mod point;
pub mod rect;
pub mod segment;

pub use point::Point;
pub use rect::Rect;
pub use segment::{Orientation, Segment};

/// Tolerance for coordinate comparisons.
pub const EPS: f64 = 1e-9;
