// src/schemes/complete.rs
//! Crank-Nicolson scheme on the untransformed (price, time) variables
//!
//! # Discretization
//!
//! Writing `V[j]` for the value at `S = j·ds`, the Black-Scholes operator
//! `½σ²S²V_SS + rSV_S - rV` averaged between two time levels gives, per row,
//! ```text
//! α[j] = (dt/4)(σ²j² - r·j)
//! β[j] = -(dt/2)(σ²j² + r)
//! γ[j] = (dt/4)(σ²j² + r·j)
//! ```
//! Marching runs backward from the payoff at `t = T`, so after step `n` the
//! column holds the value at time to maturity `n·dt`.

use crate::grid::grid_data::GridData;
use crate::schemes::payoffs::{GridEdge, OptionType};
use crate::solvers::tridiagonal::{LuFactors, TridiagonalCoefficients, TridiagonalSolver};
use ndarray::Array1;

/// Factored Crank-Nicolson operator over a [`GridData`]
#[derive(Debug, Clone, PartialEq)]
pub struct CompleteScheme {
    grid: GridData,
    alpha: Array1<f64>,
    beta: Array1<f64>,
    gamma: Array1<f64>,
    solver: TridiagonalSolver,
}

impl CompleteScheme {
    pub fn new(grid: &GridData) -> Self {
        let (alpha, beta, gamma) = Self::coefficients(grid);
        let solver = TridiagonalSolver::new(TridiagonalCoefficients::CrankNicolson {
            alpha: alpha.clone(),
            beta: beta.clone(),
            gamma: gamma.clone(),
        });

        tracing::debug!(
            price_steps = grid.price_steps(),
            min_pivot = solver.factors().min_pivot(),
            "complete scheme factorized"
        );

        CompleteScheme {
            grid: grid.clone(),
            alpha,
            beta,
            gamma,
            solver,
        }
    }

    fn coefficients(grid: &GridData) -> (Array1<f64>, Array1<f64>, Array1<f64>) {
        let n = grid.price_steps();
        let dt = grid.dt();
        let r = grid.rate();
        let sigma_sqr = grid.sigma() * grid.sigma();

        let alpha = Array1::from_shape_fn(n + 1, |i| {
            let i = i as f64;
            (dt / 4.0) * (sigma_sqr * i * i - r * i)
        });
        let beta = Array1::from_shape_fn(n + 1, |i| {
            let i = i as f64;
            (-dt / 2.0) * (sigma_sqr * i * i + r)
        });
        let gamma = Array1::from_shape_fn(n + 1, |i| {
            let i = i as f64;
            (dt / 4.0) * (sigma_sqr * i * i + r * i)
        });

        (alpha, beta, gamma)
    }

    pub fn grid(&self) -> &GridData {
        &self.grid
    }

    pub fn alpha(&self) -> &Array1<f64> {
        &self.alpha
    }

    pub fn beta(&self) -> &Array1<f64> {
        &self.beta
    }

    pub fn gamma(&self) -> &Array1<f64> {
        &self.gamma
    }

    pub fn factors(&self) -> &LuFactors {
        self.solver.factors()
    }

    fn edge_values(&self, option: OptionType, time_to_maturity: f64) -> (f64, f64) {
        let g = &self.grid;
        let value = |edge| {
            option.boundary_value(edge, g.max_price(), g.strike(), g.rate(), time_to_maturity)
        };
        (value(GridEdge::Lower), value(GridEdge::Upper))
    }

    /// Price `option` at `t = 0` on every point of the price grid
    ///
    /// Only the previous and current columns are kept while marching.
    pub fn price(&self, option: OptionType) -> Array1<f64> {
        let _span = tracing::debug_span!("complete_pricing", option = ?option).entered();

        let g = &self.grid;
        let n = g.price_steps();
        let m = g.time_steps();
        let t = g.times();

        let mut column = g.prices().mapv(|s| option.payoff(s, g.strike()));
        let (lower, upper) = self.edge_values(option, 0.0);
        column[0] = lower;
        column[n] = upper;

        let coefficients = self.solver.coefficients();
        for step in 1..=m {
            // Time to maturity after this step: T - t[M - step]
            let time_to_maturity = g.maturity() - t[m - step];
            let (lower, upper) = self.edge_values(option, time_to_maturity);

            let b = coefficients.explicit_product(&column);
            column = self.solver.solve_pinned(&b, lower, upper);
        }

        tracing::debug!(
            time_steps = m,
            lower = column[0],
            upper = column[n],
            "complete scheme priced"
        );

        column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let grid = GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, 10, 4).expect("Valid configuration");
        let scheme = CompleteScheme::new(&grid);
        let dt = 0.1;

        // i = 2: σ²i² = 0.16, r·i = 0.1
        assert!((scheme.alpha()[2] - dt / 4.0 * (0.16 - 0.1)).abs() < 1e-15);
        assert!((scheme.beta()[2] + dt / 2.0 * (0.16 + 0.05)).abs() < 1e-15);
        assert!((scheme.gamma()[2] - dt / 4.0 * (0.16 + 0.1)).abs() < 1e-15);
        assert_eq!(scheme.alpha()[0], 0.0);
        assert_eq!(scheme.gamma()[0], 0.0);
    }

    #[test]
    fn test_coefficients_match_factored_operator() {
        let grid = GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, 10, 6).expect("Valid configuration");
        let scheme = CompleteScheme::new(&grid);
        let operator = scheme.solver.coefficients();

        assert_eq!(operator.size(), 7);
        for i in 0..=6 {
            assert_eq!(operator.alpha(i), scheme.alpha()[i]);
            assert_eq!(operator.beta(i), scheme.beta()[i]);
            assert_eq!(operator.gamma(i), scheme.gamma()[i]);
        }
    }

    #[test]
    fn test_factorization_recurrence() {
        let grid = GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, 10, 6).expect("Valid configuration");
        let scheme = CompleteScheme::new(&grid);
        let (alpha, beta, gamma) = (scheme.alpha(), scheme.beta(), scheme.gamma());
        let factors = scheme.factors();

        assert_eq!(factors.low[0], 0.0);
        assert_eq!(factors.up[0], 1.0 - beta[0]);
        for i in 1..=6 {
            assert_eq!(factors.low[i], -alpha[i] / factors.up[i - 1]);
            assert_eq!(factors.up[i], (1.0 - beta[i]) + factors.low[i] * gamma[i - 1]);
            assert!(factors.up[i] != 0.0);
        }
    }

    #[test]
    fn test_zero_maturity_returns_payoff() {
        let grid = GridData::new(0.0, 0.05, 0.2, 100.0, 300.0, 5, 3).expect("Valid configuration");
        let scheme = CompleteScheme::new(&grid);

        let call = scheme.price(OptionType::Call);
        let put = scheme.price(OptionType::Put);

        assert_eq!(call.to_vec(), vec![0.0, 0.0, 100.0, 200.0]);
        assert_eq!(put.to_vec(), vec![100.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pricing_is_repeatable() {
        let grid = GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, 50, 60).expect("Valid configuration");
        let scheme = CompleteScheme::new(&grid);

        assert_eq!(scheme.price(OptionType::Call), scheme.price(OptionType::Call));
    }
}
