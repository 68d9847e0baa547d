//! Smallest meaningful configuration: a 1x1 room on a 2x2 grid with one
//! heater along the bottom wall and a window in the left wall.

use heatplan::{
    AmbientSeries, CellTag, HeatSolver, House, Material, Orientation, Point, Solution,
    INITIAL_INDOOR_TEMPERATURE,
};

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// Heater power tuned so each activation adds exactly 1 K per zone cell.
const HEATER_POWER: f64 = 0.01 * 1.3 * 1005.0;

fn tiny_house(setpoint: f64) -> House {
    let mut house = House::new(0.5, HEATER_POWER);
    house.set_setpoint(setpoint);
    house.add_room(p(0.0, 0.0), p(1.0, 1.0)).unwrap();
    house
        .add_window(p(0.0, 0.0), p(0.0, 1.0), Orientation::Vertical)
        .unwrap();
    house
        .add_heater(
            p(0.0, 0.0),
            p(1.0, 0.0),
            Orientation::Horizontal,
            p(0.0, 0.0),
            p(1.0, 1.0),
        )
        .unwrap();
    house
}

fn material() -> Material {
    // step 0.5 allows dt up to 1.25 h; 0.1 h steps stay well inside.
    Material::new(0.05, 1.3, 1005.0)
}

fn room_average(solution: &Solution, step: usize) -> f64 {
    let frame = solution.frame(step);
    frame.iter().sum::<f64>() / frame.len() as f64
}

#[test]
fn test_layout_of_the_tiny_house() {
    let house = tiny_house(296.0);
    let grid = house.layout().unwrap();
    assert_eq!((grid.map().n_x, grid.map().n_y), (2, 2));

    // Bottom row is the heater zone, the window replaces the upper-left wall
    // cell, and the upper-right corner stays a right wall.
    assert_eq!(grid.tag(0, 0), CellTag::Heater(1));
    assert_eq!(grid.tag(0, 1), CellTag::Heater(1));
    assert_eq!(grid.tag(1, 0), CellTag::Exterior);
    assert_eq!(grid.tag(1, 1), CellTag::WallRight);
}

#[test]
fn test_first_step_adds_exactly_one_quantum() {
    // Two identical runs, one with the thermostat disabled: after one step
    // the heater cells differ by exactly the quantum and nothing else does.
    let ambient = AmbientSeries::constant(250.0, 0.0, 24.0);
    let quantum = material().heater_quantum(HEATER_POWER);
    assert!((quantum - 1.0).abs() < 1e-12);

    let mut on = HeatSolver::new(material(), ambient.clone());
    let mut off = HeatSolver::new(material(), ambient);
    let heated = on
        .solve(&tiny_house(296.0), 9.0, 0.2, 0.1, None)
        .unwrap()
        .clone();
    let free = off
        .solve(&tiny_house(0.0), 9.0, 0.2, 0.1, None)
        .unwrap()
        .clone();

    // Heater zone cells: boundary-adjusted value plus the quantum, exactly.
    assert_eq!(heated.frame(1)[0], free.frame(1)[0] + quantum);
    assert_eq!(heated.frame(1)[1], free.frame(1)[1] + quantum);
    // Non-heater cells are untouched by the injection.
    assert_eq!(heated.frame(1)[2], free.frame(1)[2]);
    assert_eq!(heated.frame(1)[3], free.frame(1)[3]);

    assert_eq!(heated.heat_added.len(), 2);
    assert!(free.heat_added.is_empty());
}

#[test]
fn test_disabled_thermostat_never_fires() {
    // Setpoint 0: the room average can never be strictly below it.
    let ambient = AmbientSeries::constant(250.0, 0.0, 24.0);
    let mut solver = HeatSolver::new(material(), ambient);
    let solution = solver.solve(&tiny_house(0.0), 9.0, 2.0, 0.1, None).unwrap();
    assert!(solution.heat_added.is_empty());
    assert_eq!(solution.total_heat_added(), 0.0);
}

#[test]
fn test_long_run_settles_into_a_heated_balance() {
    // The window drains heat while the heater injects a fixed quantum per
    // step. The room average must decay monotonically from its warm start
    // and flatten out at a finite balance above the window temperature of
    // the adjacent exterior forcing, without diverging.
    let ambient = AmbientSeries::constant(250.0, 0.0, 60.0);
    let mut solver = HeatSolver::new(material(), ambient);
    let solution = solver
        .solve(&tiny_house(296.0), 0.0, 60.0, 0.1, None)
        .unwrap();
    let steps = solution.steps();
    assert_eq!(steps, 600);

    let averages: Vec<f64> = (0..steps).map(|t| room_average(solution, t)).collect();

    assert!(averages[0] > averages[50]);
    for t in 1..steps - 1 {
        assert!(
            averages[t + 1] <= averages[t] + 1e-9,
            "average rose at step {t}: {} -> {}",
            averages[t],
            averages[t + 1]
        );
        assert!(averages[t].is_finite());
    }

    // Converged: the tail barely moves.
    let tail_drift = (averages[steps - 1] - averages[steps - 51]).abs();
    assert!(
        tail_drift < 0.05,
        "average still drifting near the end: {tail_drift}"
    );

    // The balance sits below the start and above absolute zero, and the
    // always-below-setpoint average keeps the heater on every step.
    let last = averages[steps - 1];
    assert!(last < INITIAL_INDOOR_TEMPERATURE);
    assert!(last > 0.0);
    assert_eq!(solution.heat_added.len(), 2 * (steps - 1));
}

#[test]
fn test_energy_log_sums_to_quanta_count() {
    let ambient = AmbientSeries::constant(250.0, 0.0, 24.0);
    let quantum = material().heater_quantum(HEATER_POWER);
    let mut solver = HeatSolver::new(material(), ambient);
    let solution = solver
        .solve(&tiny_house(296.0), 9.0, 1.0, 0.1, None)
        .unwrap();

    assert!(!solution.heat_added.is_empty());
    for &entry in &solution.heat_added {
        assert_eq!(entry, quantum);
    }
    let expected = solution.heat_added.len() as f64 * quantum;
    assert!((solution.total_heat_added() - expected).abs() < 1e-9 * expected.max(1.0));
}
