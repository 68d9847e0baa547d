use rayon::prelude::*;

/// Discrete diffusion operator over the flattened temperature field.
///
/// Conceptually this is the Kronecker sum `L = I_ny (x) D_x + D_y (x) I_nx`
/// of two 1-D second-difference operators (-2 on the diagonal, +1 on both
/// neighbor off-diagonals, nothing beyond the array edges) scaled by
/// `alpha / step^2`, acting on the row-major (y outer, x inner) flattened
/// grid. The -2 diagonal is kept at the array edges; physical boundary
/// conditions are re-imposed on the field after every step, not baked in
/// here.
///
/// [`DiffusionOperator::apply`] runs the equivalent 5-point stencil instead
/// of storing the matrix. Per-cell accumulation follows ascending column
/// order, so the result is bit-identical to the dense matrix-vector product
/// of [`DiffusionOperator::to_dense`].
#[derive(Debug, Clone, Copy)]
pub struct DiffusionOperator {
    n_x: usize,
    n_y: usize,
    coeff_x: f64,
    coeff_y: f64,
    diag: f64,
}

impl DiffusionOperator {
    /// Builds the operator for an `n_x` by `n_y` grid with cell size `step`
    /// [m] and diffusivity [m^2/h].
    pub fn new(n_x: usize, n_y: usize, step: f64, diffusivity: f64) -> Self {
        let coeff_x = diffusivity / (step * step);
        let coeff_y = diffusivity / (step * step);
        Self {
            n_x,
            n_y,
            coeff_x,
            coeff_y,
            diag: (-2.0 * coeff_x) + (-2.0 * coeff_y),
        }
    }

    /// Number of cells the operator acts on.
    pub fn len(&self) -> usize {
        self.n_x * self.n_y
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Writes `L * field` into `out`.
    ///
    /// Rows of the grid are independent outputs, so they run in parallel;
    /// the per-cell accumulation order is fixed regardless.
    pub fn apply(&self, field: &[f64], out: &mut [f64]) {
        assert_eq!(field.len(), self.len(), "field length mismatch");
        assert_eq!(out.len(), self.len(), "output length mismatch");

        let n_x = self.n_x;
        let n_y = self.n_y;
        out.par_chunks_mut(n_x)
            .enumerate()
            .for_each(|(row, out_row)| {
                for (col, out_cell) in out_row.iter_mut().enumerate() {
                    let i = row * n_x + col;
                    let mut acc = 0.0;
                    if row > 0 {
                        acc += self.coeff_y * field[i - n_x];
                    }
                    if col > 0 {
                        acc += self.coeff_x * field[i - 1];
                    }
                    acc += self.diag * field[i];
                    if col + 1 < n_x {
                        acc += self.coeff_x * field[i + 1];
                    }
                    if row + 1 < n_y {
                        acc += self.coeff_y * field[i + n_x];
                    }
                    *out_cell = acc;
                }
            });
    }

    /// Assembles the dense matrix, for verification and inspection.
    pub fn to_dense(&self) -> Vec<Vec<f64>> {
        let n = self.len();
        let n_x = self.n_x;
        let mut l = vec![vec![0.0; n]; n];

        // I_ny (x) D_x: one D_x block per grid row.
        for block in 0..self.n_y {
            let base = block * n_x;
            for i in 0..n_x {
                l[base + i][base + i] += -2.0 * self.coeff_x;
                if i > 0 {
                    l[base + i][base + i - 1] += self.coeff_x;
                }
                if i + 1 < n_x {
                    l[base + i][base + i + 1] += self.coeff_x;
                }
            }
        }

        // D_y (x) I_nx: couples equal columns of adjacent grid rows.
        for row in 0..self.n_y {
            for col in 0..n_x {
                let i = row * n_x + col;
                l[i][i] += -2.0 * self.coeff_y;
                if row > 0 {
                    l[i][i - n_x] += self.coeff_y;
                }
                if row + 1 < self.n_y {
                    l[i][i + n_x] += self.coeff_y;
                }
            }
        }

        l
    }
}
