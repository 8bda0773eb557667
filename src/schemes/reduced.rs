// src/schemes/reduced.rs
//! θ-scheme for the heat-equation form of Black-Scholes
//!
//! # Discretization
//!
//! On the uniform log-price nodes `z[j]` of a [`TransformedGrid`],
//! ```text
//! θ = dτ / (2·dx²)
//! (1 + 2θ)·u[j] - θ·(u[j-1] + u[j+1]) = (1 - 2θ)·v[j] + θ·(v[j-1] + v[j+1])
//! ```
//! with `v` the previous column and `u` the next one. `θ` is the half weight of
//! `dτ/dx²`, so both time levels share the diffusion equally.
//!
//! # Edges
//!
//! Rows 0 and N couple to ghost nodes `z[-1] = z[0] - dx` and
//! `z[N+1] = z[N] + dx`. The ghost carries the heat-equation far-field value on
//! the in-the-money side and zero on the other side.
//!
//! # Back to prices
//!
//! After M steps (`τ = τ_max`, real time `t = 0`) the solution is resampled onto
//! the log-price grid `x[i]` and converted with
//! [`TransformedGrid::price_transformation`]. Resampling interpolates
//! `e^{-a₋z}·u`, which is proportional to the option price, rather than `u`
//! itself; `u` grows like `e^{a₊z}` and interpolates poorly.
//!
//! # Accuracy
//!
//! The error is dominated by the log-price spacing and falls as `O(dx²)`,
//! with `dx = ln(N)/(N - 1)` for the uniform price grid. The transformed
//! solution varies on the scale `1/a₊`, so results are only meaningful while
//! `a₊·dx` is well below one. For `T = 1, r = 0.1, σ = 0.1, K = 100, L = 300`
//! the worst call error against the closed form is about `0.1` at `N = 200`,
//! `0.03` at `N = 400` and `0.01` at `N = 800`; the complete scheme is
//! already within `1e-3` on these grids. Grids with `a₊·dx > 0.5` are
//! accepted but logged with `warn!`. Volatilities low enough to overflow the
//! exponential factors are rejected by [`TransformedGrid::new`].

use crate::error::PdeResult;
use crate::grid::grid_data::GridData;
use crate::grid::variable_change::TransformedGrid;
use crate::math_utils::uniform_cell;
use crate::schemes::payoffs::{GridEdge, OptionType};
use crate::solvers::tridiagonal::{LuFactors, TridiagonalCoefficients, TridiagonalSolver};
use ndarray::Array1;

/// Largest `a₊·dx` considered resolved
const MAX_RESOLUTION: f64 = 0.5;

/// Factored heat-equation operator over a [`TransformedGrid`]
#[derive(Debug, Clone, PartialEq)]
pub struct ReducedScheme {
    grid: GridData,
    transformed: TransformedGrid,
    theta: f64,
    solver: TridiagonalSolver,
}

impl ReducedScheme {
    /// # Errors
    ///
    /// Fails when the log-price grid cannot be built, see [`TransformedGrid::new`].
    pub fn new(grid: &GridData) -> PdeResult<Self> {
        let transformed = TransformedGrid::new(grid)?;
        let dx = transformed.dx();
        let theta = transformed.dtau() / (2.0 * dx * dx);

        let resolution = transformed.upper_exponent() * dx;
        if resolution > MAX_RESOLUTION {
            tracing::warn!(
                resolution,
                price_steps = grid.price_steps(),
                "log-price grid too coarse for the transformed solution"
            );
        }

        let solver = TridiagonalSolver::new(TridiagonalCoefficients::Homogeneous {
            theta,
            size: grid.price_steps() + 1,
        });

        tracing::debug!(
            theta,
            min_pivot = solver.factors().min_pivot(),
            "reduced scheme factorized"
        );

        Ok(ReducedScheme {
            grid: grid.clone(),
            transformed,
            theta,
            solver,
        })
    }

    pub fn grid(&self) -> &GridData {
        &self.grid
    }

    pub fn transformed(&self) -> &TransformedGrid {
        &self.transformed
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn factors(&self) -> &LuFactors {
        self.solver.factors()
    }

    fn ghost_values(&self, option: OptionType, tau: f64) -> (f64, f64) {
        let z = self.transformed.nodes();
        let dx = self.transformed.dx();
        let (a_minus, a_plus) = (self.transformed.lower_exponent(), self.transformed.upper_exponent());
        let n = z.len() - 1;

        (
            option.far_field(GridEdge::Lower, z[0] - dx, tau, a_minus, a_plus),
            option.far_field(GridEdge::Upper, z[n] + dx, tau, a_minus, a_plus),
        )
    }

    /// Solve the heat equation up to `τ_max`; values on the nodes `z[j]`
    pub fn solve_heat(&self, option: OptionType) -> Array1<f64> {
        let tau = self.transformed.tau();
        let (a_minus, a_plus) = (self.transformed.lower_exponent(), self.transformed.upper_exponent());
        let n = self.grid.price_steps();
        let coefficients = self.solver.coefficients();

        let mut column = self
            .transformed
            .nodes()
            .mapv(|z| option.transformed_payoff(z, a_minus, a_plus));

        let mut previous_ghosts = self.ghost_values(option, tau[0]);
        for step in 1..tau.len() {
            let ghosts = self.ghost_values(option, tau[step]);

            let mut b = coefficients.explicit_product(&column);
            b[0] += self.theta * (previous_ghosts.0 + ghosts.0);
            b[n] += self.theta * (previous_ghosts.1 + ghosts.1);

            column = self.solver.solve(&b);
            previous_ghosts = ghosts;
        }

        column
    }

    /// Resample a heat solution from the nodes `z[j]` onto the log-price grid `x[i]`
    fn resample(&self, heat: &Array1<f64>) -> Array1<f64> {
        let z = self.transformed.nodes();
        let x = self.transformed.x();
        let dx = self.transformed.dx();
        let a_minus = self.transformed.lower_exponent();
        let last = z.len() - 1;

        x.mapv(|xi| {
            let (j, w) = uniform_cell(z[0], dx, last, xi);
            (1.0 - w) * heat[j] * (a_minus * (xi - z[j])).exp()
                + w * heat[j + 1] * (a_minus * (xi - z[j + 1])).exp()
        })
    }

    /// Price `option` at `t = 0` on every point of the price grid
    pub fn price(&self, option: OptionType) -> Array1<f64> {
        let _span = tracing::debug_span!("reduced_pricing", option = ?option).entered();

        let heat = self.solve_heat(option);
        let prices = self.transformed.price_transformation(&self.resample(&heat));

        tracing::debug!(
            time_steps = self.grid.time_steps(),
            lower = prices[0],
            upper = prices[prices.len() - 1],
            "reduced scheme priced"
        );

        prices
    }
}
