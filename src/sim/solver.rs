use anyhow::{bail, ensure, Result};

use crate::house::layout::{CellTag, TaggedGrid};
use crate::house::House;
use crate::sim::ambient::AmbientSeries;
use crate::sim::heater::{apply_heaters, collect_zones};
use crate::sim::material::Material;
use crate::sim::operator::DiffusionOperator;

/// Initial indoor temperature [K] for fresh (non-continuation) runs.
pub const INITIAL_INDOOR_TEMPERATURE: f64 = 294.0;

/// Dense result of one solve: every time step of the temperature field plus
/// the coordinate mesh and the energy-injection log.
///
/// All frames are retained; nothing is streamed or discarded.
#[derive(Debug, Clone)]
pub struct Solution {
    /// One temperature frame per time step, `n_x * n_y` cells each,
    /// row-major (y outer, x inner).
    pub frames: Vec<Vec<f64>>,
    /// Cell center x coordinates [m].
    pub xs: Vec<f64>,
    /// Cell center y coordinates [m].
    pub ys: Vec<f64>,
    pub n_x: usize,
    pub n_y: usize,
    /// Simulation start, time of day [h].
    pub start_hours: f64,
    /// Time step [h].
    pub time_step: f64,
    /// One entry per heater cell per activation, in injection order [K].
    pub heat_added: Vec<f64>,
}

impl Solution {
    pub fn steps(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, step: usize) -> &[f64] {
        &self.frames[step]
    }

    pub fn last_frame(&self) -> &[f64] {
        self.frames.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Wall-clock time of day of a frame [h].
    pub fn time_at(&self, step: usize) -> f64 {
        self.start_hours + step as f64 * self.time_step
    }

    pub fn value(&self, step: usize, row: usize, col: usize) -> f64 {
        self.frames[step][row * self.n_x + col]
    }

    /// Sum of every injected energy quantum.
    pub fn total_heat_added(&self) -> f64 {
        self.heat_added.iter().sum()
    }

    /// Frame indices for `points` evenly spread snapshots: the first frame,
    /// interior frames at a fixed stride, and the last frame.
    pub fn snapshot_indices(&self, points: usize) -> Vec<usize> {
        let n = self.steps();
        match points {
            0 => Vec::new(),
            1 => vec![0],
            2 => vec![0, n - 1],
            _ => {
                let stride = n / (points - 1);
                let mut indices = vec![0];
                indices.extend((1..points - 1).map(|i| i * stride));
                indices.push(n - 1);
                indices
            }
        }
    }

    /// Every `each`-th frame with its wall-clock time, for animation.
    pub fn frames_every(&self, each: usize) -> Vec<(f64, &[f64])> {
        (0..self.steps())
            .step_by(each.max(1))
            .map(|t| (self.time_at(t), self.frame(t)))
            .collect()
    }
}

/// Explicit heat-equation solver over a house layout.
///
/// Owns the material parameterization and the ambient series. Each call to
/// [`HeatSolver::solve`] rasterizes the house, builds the diffusion operator
/// once, and walks the requested time range; the produced [`Solution`] is
/// retained on the solver for later inspection.
#[derive(Debug, Clone)]
pub struct HeatSolver {
    material: Material,
    ambient: AmbientSeries,
    last: Option<Solution>,
}

impl HeatSolver {
    pub fn new(material: Material, ambient: AmbientSeries) -> Self {
        Self {
            material,
            ambient,
            last: None,
        }
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn ambient(&self) -> &AmbientSeries {
        &self.ambient
    }

    /// Runs the simulation for `duration` hours from `start_hours` time of
    /// day, in steps of `time_step` hours.
    ///
    /// `prior` seeds the initial field from an earlier run's final frame
    /// (continuation run); otherwise interior, wall and heater cells start at
    /// [`INITIAL_INDOOR_TEMPERATURE`] and exterior cells at the ambient
    /// temperature for `start_hours`.
    ///
    /// Each transition applies, in order: the unconstrained forward-Euler
    /// update, wall reflection (left, right, top, bottom), exterior forcing
    /// at the new frame's wall-clock time, and heater control.
    ///
    /// Stability is the caller's concern: `time_step` above
    /// [`Material::max_stable_time_step`] for the house's grid step is not
    /// detected and yields a silently diverging, non-physical field.
    pub fn solve(
        &mut self,
        house: &House,
        start_hours: f64,
        duration: f64,
        time_step: f64,
        prior: Option<&[f64]>,
    ) -> Result<&Solution> {
        ensure!(time_step > 0.0, "time step must be positive, got {time_step}");
        ensure!(duration > 0.0, "duration must be positive, got {duration}");

        let grid = house.layout()?;
        let map = *grid.map();
        let n = map.len();

        // Wall cells with their interior-facing neighbors, resolved once per
        // solve. A wall cell whose neighbor falls outside the grid is left
        // un-reflected.
        let left = wall_pairs(&grid, CellTag::WallLeft, 1);
        let right = wall_pairs(&grid, CellTag::WallRight, -1);
        let top = wall_pairs(&grid, CellTag::WallTop, -(map.n_x as i64));
        let bottom = wall_pairs(&grid, CellTag::WallBottom, map.n_x as i64);

        let exterior = grid.cells_tagged(CellTag::Exterior);
        let zones = collect_zones(&grid, house.heaters());
        let quantum = self.material.heater_quantum(house.heater_power());
        let op = DiffusionOperator::new(map.n_x, map.n_y, map.step, self.material.diffusivity);

        let steps = (duration / time_step).ceil() as usize;

        let first = match prior {
            Some(field) => {
                ensure!(
                    field.len() == n,
                    "continuation field has {} cells, expected {n}",
                    field.len()
                );
                field.to_vec()
            }
            None => {
                let mut field = vec![INITIAL_INDOOR_TEMPERATURE; n];
                if !exterior.is_empty() {
                    let outdoor = self.ambient.sample(start_hours)?;
                    for &i in &exterior {
                        field[i] = outdoor;
                    }
                }
                field
            }
        };

        let mut frames = Vec::with_capacity(steps);
        frames.push(first);
        let mut heat_added = Vec::new();
        let mut laplacian = vec![0.0; n];

        for t in 0..steps.saturating_sub(1) {
            let current = &frames[t];
            op.apply(current, &mut laplacian);
            let mut next: Vec<f64> = current
                .iter()
                .zip(&laplacian)
                .map(|(u, l)| u + time_step * l)
                .collect();

            // Wall reflection enforces the zero-gradient condition. Copies
            // run sequentially in a fixed order, so a wall whose neighbor is
            // itself a wall sees the already-reflected value.
            for &(wall, neighbor) in left
                .iter()
                .chain(right.iter())
                .chain(top.iter())
                .chain(bottom.iter())
            {
                next[wall] = next[neighbor];
            }

            let now = start_hours + (t + 1) as f64 * time_step;
            let outdoor = self.ambient.sample(now)?;
            for &i in &exterior {
                next[i] = outdoor;
            }

            apply_heaters(
                &zones,
                &map,
                &mut next,
                house.setpoint(),
                quantum,
                &mut heat_added,
            );

            frames.push(next);
        }

        self.last = Some(Solution {
            frames,
            xs: map.xs(),
            ys: map.ys(),
            n_x: map.n_x,
            n_y: map.n_y,
            start_hours,
            time_step,
            heat_added,
        });
        self.solution()
    }

    /// The solution of the most recent solve.
    ///
    /// Asking for results before any solve has run is a fatal usage error.
    pub fn solution(&self) -> Result<&Solution> {
        match &self.last {
            Some(solution) => Ok(solution),
            None => bail!("no solution available; run solve() first"),
        }
    }
}

fn wall_pairs(grid: &TaggedGrid, tag: CellTag, offset: i64) -> Vec<(usize, usize)> {
    let n = grid.map().len() as i64;
    grid.cells_tagged(tag)
        .into_iter()
        .filter_map(|cell| {
            let neighbor = cell as i64 + offset;
            (0..n).contains(&neighbor).then_some((cell, neighbor as usize))
        })
        .collect()
}
