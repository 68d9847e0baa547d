use serde::{Deserialize, Serialize};

/// Thermal properties of the simulated medium.
///
/// The grid is homogeneous: one material covers the whole floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Thermal diffusivity [m^2/h].
    pub diffusivity: f64,
    /// Density [kg/m^3].
    pub density: f64,
    /// Specific heat capacity [J/(kg*K)].
    pub specific_heat: f64,
}

impl Material {
    pub fn new(diffusivity: f64, density: f64, specific_heat: f64) -> Self {
        Self {
            diffusivity,
            density,
            specific_heat,
        }
    }

    /// Room air with an exaggerated diffusivity (19 m^2/h) so that a
    /// simulated day reaches quasi-steady behavior within a few simulated
    /// hours.
    pub fn air() -> Self {
        Self::new(19.0, 1.3, 1005.0)
    }

    /// Temperature increment one heater activation adds to each of its zone
    /// cells [K]: `power / (0.01 * rho * c)`. The 0.01 factor is the nominal
    /// cell footprint in m^2 (0.1 m grid step) at unit depth.
    pub fn heater_quantum(&self, heater_power: f64) -> f64 {
        heater_power / (0.01 * self.density * self.specific_heat)
    }

    /// Largest time step [h] for which explicit 2-D diffusion on a grid of
    /// the given step stays stable: `step^2 / (4 * alpha)`.
    ///
    /// The solver never checks this bound. A caller exceeding it gets a
    /// silently diverging, non-physical field.
    pub fn max_stable_time_step(&self, step: f64) -> f64 {
        step * step / (4.0 * self.diffusivity)
    }
}
