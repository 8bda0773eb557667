// src/grid/variable_change.rs
//! Change of variables reducing Black-Scholes to the heat equation
//!
//! # Mathematical Foundation
//!
//! With `f = 2r/σ²` and
//! ```text
//! x = ln(S/K),   τ = ½σ²(T - t),   V(S,t) = K·e^{-½(f-1)x - ¼(f+1)²τ}·u(x,τ)
//! ```
//! the Black-Scholes PDE becomes `∂u/∂τ = ∂²u/∂x²` and the terminal payoff at
//! `t = T` becomes an initial condition at `τ = 0`.
//!
//! # Boundary approximation at S = 0
//!
//! `ln(0)` is undefined, so the first log-price point is copied from the
//! second: `x[0] = x[1]`. The reduced price reported at `S = 0` is therefore
//! the price at `S = ds` (for a put this sits roughly `ds` below
//! `K·e^{-rT}`). The approximation is kept as is.

use crate::error::{validation::*, PdeResult};
use crate::grid::grid_data::GridData;
use ndarray::Array1;

/// Log-price / rescaled-time view of a [`GridData`]
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedGrid {
    strike: f64,
    f: f64,
    tau: Array1<f64>,
    dtau: f64,
    x: Array1<f64>,
    dx: f64,
    nodes: Array1<f64>,
}

impl TransformedGrid {
    /// Transform an existing grid
    ///
    /// # Errors
    ///
    /// The log-price grid needs at least two strictly positive prices, so
    /// `price_steps < 2` or `max_price == 0` yields `PdeError::InvalidParameter`.
    /// A volatility so low relative to the rate that `e^{a₊·|z|+a₊²·τ_max}`
    /// overflows on the heat nodes is rejected on `sigma`.
    pub fn new(grid: &GridData) -> PdeResult<Self> {
        validate_min_steps("price_steps", grid.price_steps(), 2)?;
        validate_positive("max_price", grid.max_price())?;

        let m = grid.time_steps();
        let n = grid.price_steps();
        let k = grid.strike();
        let half_sigma_sqr = 0.5 * grid.sigma() * grid.sigma();

        // Reversed time: tau[M - i] corresponds to t[i]
        let t = grid.times();
        let tau = Array1::from_shape_fn(m + 1, |j| half_sigma_sqr * (grid.maturity() - t[m - j]));
        let dtau = half_sigma_sqr * grid.dt();

        let l = grid.prices();
        let x = Array1::from_shape_fn(n + 1, |i| (l[i.max(1)] / k).ln());
        let dx = (x[n] - x[1]) / (n - 1) as f64;

        let nodes = Array1::from_shape_fn(n + 1, |j| x[1] + (j as f64 - 1.0) * dx);

        let f = 2.0 * grid.rate() / (grid.sigma() * grid.sigma());

        let transformed = TransformedGrid {
            strike: k,
            f,
            tau,
            dtau,
            x,
            dx,
            nodes,
        };
        validate_exponent("sigma", grid.sigma(), transformed.max_exponent())?;

        tracing::debug!(dtau, dx, f, "variable change computed");

        Ok(transformed)
    }

    /// `f = 2r/σ²`
    pub fn f(&self) -> f64 {
        self.f
    }

    /// Rescaled time grid `tau[0..=M]`, increasing from 0 to `tau_max`
    pub fn tau(&self) -> &Array1<f64> {
        &self.tau
    }

    pub fn dtau(&self) -> f64 {
        self.dtau
    }

    /// `τ` at valuation time `t = 0`
    pub fn tau_max(&self) -> f64 {
        self.tau[self.tau.len() - 1]
    }

    /// Log-price grid `x[0..=N]` with `x[0] = x[1]`
    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    /// Uniform spacing `(x[N] - x[1]) / (N - 1)`
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Uniform heat-equation nodes `z[j] = x[1] + (j - 1)·dx`
    ///
    /// `z[1] = x[1]` and `z[N] = x[N]`; `z[0]` lies one step below `x[1]`.
    pub fn nodes(&self) -> &Array1<f64> {
        &self.nodes
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Exponent `a₋ = ½(f - 1)`
    pub fn lower_exponent(&self) -> f64 {
        0.5 * (self.f - 1.0)
    }

    /// Exponent `a₊ = ½(f + 1)`
    pub fn upper_exponent(&self) -> f64 {
        0.5 * (self.f + 1.0)
    }

    /// Largest exponent reached by the transformation on the heat nodes
    ///
    /// Bounds `a·|z| + a²·τ_max` over both exponents and every node including
    /// the two ghost nodes. Payoffs, far-field values and the inverse
    /// transform all stay finite while this stays below
    /// [`MAX_EXPONENT`](crate::error::validation::MAX_EXPONENT).
    pub fn max_exponent(&self) -> f64 {
        let a = self.lower_exponent().abs().max(self.upper_exponent().abs());
        let n = self.nodes.len() - 1;
        let reach = (self.nodes[0] - self.dx).abs().max((self.nodes[n] + self.dx).abs());
        a * reach + a * a * self.tau_max()
    }

    /// Convert a heat-equation solution at `tau_max` into option prices
    ///
    /// `v` is indexed over the price grid:
    /// ```text
    /// price[i] = v[i] · K · e^{-½(f-1)·x[i]} · e^{-¼(f+1)²·τ_max}
    /// ```
    pub fn price_transformation(&self, v: &Array1<f64>) -> Array1<f64> {
        let a_plus = self.upper_exponent();
        let time_factor = (-a_plus * a_plus * self.tau_max()).exp();
        let a_minus = self.lower_exponent();

        Array1::from_shape_fn(self.x.len(), |i| {
            v[i] * self.strike * (-a_minus * self.x[i]).exp() * time_factor
        })
    }
}
