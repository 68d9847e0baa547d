use std::ops::Range;

use crate::geom::{Orientation, Rect, Segment};
use crate::house::grid::GridMap;

/// Classification of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellTag {
    Interior,
    WallBottom,
    WallTop,
    WallLeft,
    WallRight,
    Exterior,
    /// Cell occupied by heater zone `k` (1-based, in heater add-order).
    Heater(usize),
}

impl CellTag {
    /// Raw integer encoding: -1 exterior, 0 interior, 1..4 walls
    /// (bottom, top, left, right), heater zone k at k + 4.
    pub fn raw(self) -> i64 {
        match self {
            CellTag::Exterior => -1,
            CellTag::Interior => 0,
            CellTag::WallBottom => 1,
            CellTag::WallTop => 2,
            CellTag::WallLeft => 3,
            CellTag::WallRight => 4,
            CellTag::Heater(zone) => zone as i64 + 4,
        }
    }

    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 => Some(CellTag::Exterior),
            0 => Some(CellTag::Interior),
            1 => Some(CellTag::WallBottom),
            2 => Some(CellTag::WallTop),
            3 => Some(CellTag::WallLeft),
            4 => Some(CellTag::WallRight),
            k if k >= 5 => Some(CellTag::Heater((k - 4) as usize)),
            _ => None,
        }
    }

    pub fn is_wall(self) -> bool {
        matches!(
            self,
            CellTag::WallBottom | CellTag::WallTop | CellTag::WallLeft | CellTag::WallRight
        )
    }
}

/// The rasterized floor plan: one tag per grid cell.
///
/// Built by painting geometry onto a single mutable buffer in a strict order
/// (room walls, exterior areas, windows, doors, heaters); at any cell the last
/// write wins. The order is part of the contract and must not be reshuffled:
/// overlaps between primitives are resolved by it.
#[derive(Debug, Clone)]
pub struct TaggedGrid {
    map: GridMap,
    tags: Vec<CellTag>,
}

impl TaggedGrid {
    pub(crate) fn new(map: GridMap) -> Self {
        Self {
            tags: vec![CellTag::Interior; map.len()],
            map,
        }
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn tags(&self) -> &[CellTag] {
        &self.tags
    }

    pub fn tag(&self, row: usize, col: usize) -> CellTag {
        self.tags[self.map.index(row, col)]
    }

    /// Flattened indices of all cells carrying `tag`, ascending.
    pub fn cells_tagged(&self, tag: CellTag) -> Vec<usize> {
        self.tags
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| (t == tag).then_some(i))
            .collect()
    }

    /// Highest heater zone index present, or 0 if the grid has no heater cells.
    pub fn heater_zones(&self) -> usize {
        self.tags
            .iter()
            .filter_map(|t| match t {
                CellTag::Heater(zone) => Some(*zone),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    fn paint(&mut self, rows: Range<usize>, cols: Range<usize>, tag: CellTag) {
        for row in rows {
            for col in cols.clone() {
                self.tags[self.map.index(row, col)] = tag;
            }
        }
    }

    /// Paints the four walls of a room.
    ///
    /// The bottom and top rows span the full width including the corners; the
    /// side columns cover only the rows strictly between them, in raw index
    /// space before clamping. Paint order within the room is fixed: bottom,
    /// top, left, right.
    pub(crate) fn paint_room(&mut self, room: &Rect) {
        let m = self.map;
        let c0 = m.col_floor(room.min.x);
        let c1 = m.col_floor(room.max.x);
        let r0 = m.row_floor(room.min.y);
        let r1 = m.row_floor(room.max.y);

        let cols = m.clip_cols(c0, c1 + 1);
        let rb = m.clamp_row(r0);
        let rt = m.clamp_row(r1);
        self.paint(rb..rb + 1, cols.clone(), CellTag::WallBottom);
        self.paint(rt..rt + 1, cols, CellTag::WallTop);

        let side_rows = m.clip_rows(r0 + 1, r1);
        let cl = m.clamp_col(c0);
        let cr = m.clamp_col(c1);
        self.paint(side_rows.clone(), cl..cl + 1, CellTag::WallLeft);
        self.paint(side_rows, cr..cr + 1, CellTag::WallRight);
    }

    /// Paints an exterior area rectangle.
    ///
    /// Columns cover both ends inclusively; rows stop one short of the upper
    /// edge.
    pub(crate) fn paint_exterior_area(&mut self, area: &Rect) {
        let m = self.map;
        let rows = m.clip_rows(m.row_floor(area.min.y), m.row_floor(area.max.y));
        let cols = m.clip_cols(m.col_floor(area.min.x), m.col_floor(area.max.x) + 1);
        self.paint(rows, cols, CellTag::Exterior);
    }

    /// Paints the cells covered by a window, door or heater segment.
    ///
    /// Horizontal segments cover their full column span inclusively on a
    /// single row. Vertical segments skip the first covered row and include
    /// the last, sitting between the corner rows of the wall they pierce.
    pub(crate) fn paint_segment(&mut self, segment: &Segment, tag: CellTag) {
        let m = self.map;
        match segment.orientation {
            Orientation::Horizontal => {
                let row = m.clamp_row(m.row_floor(segment.a.y));
                let cols = m.clip_cols(m.col_floor(segment.a.x), m.col_floor(segment.b.x) + 1);
                self.paint(row..row + 1, cols, tag);
            }
            Orientation::Vertical => {
                let rows = m.clip_rows(m.row_floor(segment.a.y) + 1, m.row_floor(segment.b.y) + 1);
                let col = m.clamp_col(m.col_floor(segment.a.x));
                self.paint(rows, col..col + 1, tag);
            }
        }
    }
}
