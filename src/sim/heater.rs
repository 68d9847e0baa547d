use rayon::prelude::*;

use crate::geom::Rect;
use crate::house::grid::{area_cells, GridMap};
use crate::house::layout::{CellTag, TaggedGrid};
use crate::house::Heater;

/// One heater zone resolved against a tagged grid: the cells the device
/// occupies plus the control rectangle it is slaved to.
#[derive(Debug, Clone)]
pub struct HeaterZone {
    /// Flattened indices of the zone's cells, ascending.
    pub cells: Vec<usize>,
    /// Room rectangle whose average temperature drives the on/off decision.
    pub control_area: Rect,
}

/// Resolves every heater of the house against a freshly rasterized grid.
///
/// Zone `k` (1-based, add-order) collects the cells tagged `Heater(k)`. A
/// zone painted over entirely by a later heater ends up with no cells and
/// never injects.
pub fn collect_zones(grid: &TaggedGrid, heaters: &[Heater]) -> Vec<HeaterZone> {
    heaters
        .iter()
        .enumerate()
        .map(|(i, heater)| HeaterZone {
            cells: grid.cells_tagged(CellTag::Heater(i + 1)),
            control_area: heater.control_area,
        })
        .collect()
}

/// One bang-bang control pass over all zones.
///
/// Each zone re-rasterizes its control rectangle into a cell set and averages
/// the current field over it. Strictly below `setpoint`, the zone adds
/// `quantum` to every one of its cells and appends one log entry per cell; at
/// or above, it contributes nothing this step. Decisions read the field as it
/// stands after boundary enforcement and are independent across zones (zones
/// never share cells), so they run in parallel; injection is applied serially
/// in zone order to keep the log deterministic.
pub fn apply_heaters(
    zones: &[HeaterZone],
    map: &GridMap,
    field: &mut [f64],
    setpoint: f64,
    quantum: f64,
    log: &mut Vec<f64>,
) {
    let on: Vec<bool> = zones
        .par_iter()
        .map(|zone| {
            let room = area_cells(map, &zone.control_area);
            if room.is_empty() {
                return false;
            }
            let sum: f64 = room.iter().map(|&i| field[i]).sum();
            sum / (room.len() as f64) < setpoint
        })
        .collect();

    for (zone, fire) in zones.iter().zip(on) {
        if !fire {
            continue;
        }
        for &cell in &zone.cells {
            field[cell] += quantum;
            log.push(quantum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;

    fn map_4x4() -> GridMap {
        GridMap {
            n_x: 4,
            n_y: 4,
            step: 0.5,
        }
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect {
        Rect::new(Point::new(x0, y0), Point::new(x1, y1)).unwrap()
    }

    #[test]
    fn test_below_setpoint_injects_quantum_per_cell() {
        let zones = vec![HeaterZone {
            cells: vec![5, 6],
            control_area: rect(0.0, 0.0, 1.9, 1.9),
        }];
        let mut field = vec![290.0; 16];
        let mut log = Vec::new();

        apply_heaters(&zones, &map_4x4(), &mut field, 294.0, 2.5, &mut log);

        assert_eq!(field[5], 292.5);
        assert_eq!(field[6], 292.5);
        assert_eq!(field[4], 290.0);
        assert_eq!(log, vec![2.5, 2.5]);
    }

    #[test]
    fn test_at_setpoint_stays_off() {
        // Strict comparison: an average exactly at the setpoint is "warm
        // enough".
        let zones = vec![HeaterZone {
            cells: vec![5],
            control_area: rect(0.0, 0.0, 1.9, 1.9),
        }];
        let mut field = vec![294.0; 16];
        let mut log = Vec::new();

        apply_heaters(&zones, &map_4x4(), &mut field, 294.0, 2.5, &mut log);

        assert_eq!(field[5], 294.0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_zones_decide_independently() {
        // Zone 1 watches a cold corner, zone 2 a warm one.
        let mut field = vec![294.0; 16];
        field[0] = 250.0;
        field[1] = 250.0;

        let zones = vec![
            HeaterZone {
                cells: vec![4],
                control_area: rect(0.0, 0.0, 0.9, 0.4),
            },
            HeaterZone {
                cells: vec![11],
                control_area: rect(1.0, 1.0, 1.9, 1.9),
            },
        ];
        let mut log = Vec::new();
        apply_heaters(&zones, &map_4x4(), &mut field, 294.0, 1.0, &mut log);

        assert_eq!(field[4], 295.0);
        assert_eq!(field[11], 294.0);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_empty_zone_never_injects() {
        let zones = vec![HeaterZone {
            cells: Vec::new(),
            control_area: rect(0.0, 0.0, 1.9, 1.9),
        }];
        let mut field = vec![100.0; 16];
        let mut log = Vec::new();
        apply_heaters(&zones, &map_4x4(), &mut field, 294.0, 1.0, &mut log);
        assert!(log.is_empty());
    }
}
