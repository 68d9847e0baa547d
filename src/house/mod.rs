//! The floor-plan geometry model and its rasterized layout.

pub mod grid;
pub mod layout;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::geom::{Orientation, Point, Rect, Segment};
use grid::{AreaMask, GridMap};
use layout::{CellTag, TaggedGrid};

/// A heater device: the segment of cells it occupies plus the rectangle whose
/// average temperature drives its on/off decision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Heater {
    pub segment: Segment,
    pub control_area: Rect,
}

/// Floor-plan geometry plus heater configuration.
///
/// Geometry is append-only: rooms, exterior areas, windows, doors and heaters
/// can be added but never removed. Nothing is cached; [`House::layout`]
/// re-rasterizes the current geometry on every call.
///
/// Adjacent primitives that must share cells (a door cut through a wall, a
/// heater hugging a wall) are expected to be given slightly overlapping
/// coordinates by the caller; the rasterizer does not infer adjacency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    rooms: Vec<Rect>,
    outside: Vec<Rect>,
    windows: Vec<Segment>,
    doors: Vec<Segment>,
    heaters: Vec<Heater>,
    heater_power: f64,
    setpoint: f64,
    step: f64,
}

impl House {
    /// Creates an empty house with the given grid step [m] and heater power [W].
    ///
    /// The thermostat setpoint starts at 0, i.e. heaters stay off until
    /// [`House::set_setpoint`] raises it.
    pub fn new(step: f64, heater_power: f64) -> Self {
        Self {
            rooms: Vec::new(),
            outside: Vec::new(),
            windows: Vec::new(),
            doors: Vec::new(),
            heaters: Vec::new(),
            heater_power,
            setpoint: 0.0,
            step,
        }
    }

    /// Appends a room rectangle.
    pub fn add_room(&mut self, min: Point, max: Point) -> Result<()> {
        self.rooms.push(Rect::new(min, max)?);
        Ok(())
    }

    /// Appends an exterior area rectangle.
    pub fn add_outside(&mut self, min: Point, max: Point) -> Result<()> {
        self.outside.push(Rect::new(min, max)?);
        Ok(())
    }

    /// Appends a window segment. Windows have no thermal resistance in this
    /// model; their cells behave exactly like exterior cells.
    pub fn add_window(&mut self, a: Point, b: Point, orientation: Orientation) -> Result<()> {
        self.windows.push(Segment::new(a, b, orientation)?);
        Ok(())
    }

    /// Appends a door segment. Doors are openings without resistance; their
    /// cells behave like interior cells.
    pub fn add_door(&mut self, a: Point, b: Point, orientation: Orientation) -> Result<()> {
        self.doors.push(Segment::new(a, b, orientation)?);
        Ok(())
    }

    /// Appends a heater segment together with the corner points of the room
    /// rectangle whose average temperature drives its on/off decision.
    pub fn add_heater(
        &mut self,
        a: Point,
        b: Point,
        orientation: Orientation,
        control_min: Point,
        control_max: Point,
    ) -> Result<()> {
        self.heaters.push(Heater {
            segment: Segment::new(a, b, orientation)?,
            control_area: Rect::new(control_min, control_max)?,
        });
        Ok(())
    }

    /// Sets the thermal power of every heater [W].
    pub fn set_heater_power(&mut self, watts: f64) {
        self.heater_power = watts;
    }

    /// Sets the house-wide thermostat setpoint [K].
    pub fn set_setpoint(&mut self, temperature: f64) {
        self.setpoint = temperature;
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn heater_power(&self) -> f64 {
        self.heater_power
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    pub fn rooms(&self) -> &[Rect] {
        &self.rooms
    }

    pub fn heaters(&self) -> &[Heater] {
        &self.heaters
    }

    /// Grid dimensions and coordinate mapping for the current room set.
    pub fn grid_map(&self) -> Result<GridMap> {
        GridMap::from_rooms(&self.rooms, self.step)
    }

    /// Rasterizes the current geometry into a tagged grid.
    ///
    /// Paint order is fixed: room walls, exterior areas, windows, doors,
    /// heaters. Later writes win at shared cells, so e.g. a window segment
    /// converts wall cells to exterior and a heater placed last keeps its
    /// zone cells regardless of what sat there before.
    pub fn layout(&self) -> Result<TaggedGrid> {
        let map = self.grid_map()?;
        let mut grid = TaggedGrid::new(map);

        for room in &self.rooms {
            grid.paint_room(room);
        }
        for area in &self.outside {
            grid.paint_exterior_area(area);
        }
        for window in &self.windows {
            grid.paint_segment(window, CellTag::Exterior);
        }
        for door in &self.doors {
            grid.paint_segment(door, CellTag::Interior);
        }
        for (i, heater) in self.heaters.iter().enumerate() {
            grid.paint_segment(&heater.segment, CellTag::Heater(i + 1));
        }

        Ok(grid)
    }

    /// Marks the cells enclosed by the given corner points.
    pub fn area(&self, min: Point, max: Point) -> Result<AreaMask> {
        let map = self.grid_map()?;
        Ok(AreaMask::from_rect(map, &Rect::new(min, max)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_layout_is_rebuilt_from_current_geometry() {
        let mut house = House::new(0.5, 100.0);
        house.add_room(p(0.0, 0.0), p(2.0, 2.0)).unwrap();
        let before = house.layout().unwrap();
        assert_eq!(before.heater_zones(), 0);

        house
            .add_heater(
                p(0.5, 0.5),
                p(1.4, 0.5),
                Orientation::Horizontal,
                p(0.1, 0.1),
                p(1.9, 1.9),
            )
            .unwrap();
        let after = house.layout().unwrap();
        assert_eq!(after.heater_zones(), 1);
        // The earlier grid is an independent snapshot.
        assert_eq!(before.heater_zones(), 0);
    }

    #[test]
    fn test_paint_precedence() {
        let mut house = House::new(0.5, 100.0);
        house.add_room(p(0.0, 0.0), p(2.0, 2.0)).unwrap();
        // Window over the left wall, door over the bottom wall, heater over
        // the door's first cell.
        house
            .add_window(p(0.0, 0.5), p(0.0, 1.5), Orientation::Vertical)
            .unwrap();
        house
            .add_door(p(0.5, 0.0), p(1.4, 0.0), Orientation::Horizontal)
            .unwrap();
        house
            .add_heater(
                p(0.5, 0.0),
                p(0.9, 0.0),
                Orientation::Horizontal,
                p(0.1, 0.1),
                p(1.9, 1.9),
            )
            .unwrap();

        let grid = house.layout().unwrap();
        assert_eq!(grid.tag(2, 0), CellTag::Exterior);
        assert_eq!(grid.tag(3, 0), CellTag::Exterior);
        assert_eq!(grid.tag(0, 1), CellTag::Heater(1));
        assert_eq!(grid.tag(0, 2), CellTag::Interior);
        assert_eq!(grid.tag(0, 3), CellTag::WallBottom);
    }

    #[test]
    fn test_zone_numbering_follows_add_order() {
        let mut house = House::new(0.5, 100.0);
        house.add_room(p(0.0, 0.0), p(2.0, 2.0)).unwrap();
        for x in [0.5, 1.0] {
            house
                .add_heater(
                    p(x, 0.5),
                    p(x, 1.4),
                    Orientation::Vertical,
                    p(0.1, 0.1),
                    p(1.9, 1.9),
                )
                .unwrap();
        }
        let grid = house.layout().unwrap();
        assert_eq!(grid.heater_zones(), 2);
        assert!(!grid.cells_tagged(CellTag::Heater(1)).is_empty());
        assert!(!grid.cells_tagged(CellTag::Heater(2)).is_empty());
    }

    #[test]
    fn test_area_query_is_total() {
        let mut house = House::new(0.5, 100.0);
        house.add_room(p(0.0, 0.0), p(2.0, 2.0)).unwrap();
        // Reaching past the grid clips instead of failing.
        let mask = house.area(p(1.0, 1.0), p(5.0, 5.0)).unwrap();
        assert_eq!(mask.count(), 4);
    }

    #[test]
    fn test_layout_without_rooms_is_fatal() {
        let house = House::new(0.5, 100.0);
        assert!(house.layout().is_err());
        assert!(house.area(p(0.0, 0.0), p(1.0, 1.0)).is_err());
    }
}
