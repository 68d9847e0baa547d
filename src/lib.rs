//! 2D heat diffusion over building floor plans.
//!
//! A [`House`] is a set of axis-aligned rooms with exterior areas, windows,
//! doors and thermostat-controlled heaters. The house is rasterized onto a
//! uniform tagged grid, a discrete diffusion operator advances the
//! temperature field with explicit Euler steps, and boundary conditions
//! (adiabatic walls, exterior forcing from an ambient series, heater
//! injection) are re-imposed after every step.
//!
//! ```no_run
//! use heatplan::{AmbientSeries, HeatSolver, House, Material, Orientation, Point};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut house = House::new(0.1, 500.0);
//! house.set_setpoint(294.0);
//! house.add_room(Point::new(0.0, 0.0), Point::new(3.0, 2.0))?;
//! house.add_window(Point::new(0.0, 0.3), Point::new(0.0, 1.7), Orientation::Vertical)?;
//! house.add_heater(
//!     Point::new(0.1, 0.3),
//!     Point::new(0.1, 1.7),
//!     Orientation::Vertical,
//!     Point::new(0.1, 0.1),
//!     Point::new(2.9, 1.9),
//! )?;
//!
//! let ambient = AmbientSeries::synthetic(275.0, 8.0);
//! let mut solver = HeatSolver::new(Material::air(), ambient);
//! let solution = solver.solve(&house, 9.0, 1.0, 0.0001, None)?;
//! println!("injected {:.1} K total", solution.total_heat_added());
//! # Ok(())
//! # }
//! ```

pub mod geom;
pub mod house;
pub mod io;
pub mod sim;

// Prelude
pub use geom::point::Point;
pub use geom::rect::Rect;
pub use geom::segment::{Orientation, Segment};
pub use house::grid::{AreaMask, GridMap};
pub use house::layout::{CellTag, TaggedGrid};
pub use house::{Heater, House};
pub use sim::ambient::AmbientSeries;
pub use sim::material::Material;
pub use sim::operator::DiffusionOperator;
pub use sim::solver::{HeatSolver, Solution, INITIAL_INDOOR_TEMPERATURE};
