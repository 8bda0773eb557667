// src/solvers/tridiagonal.rs
//! LU factorization and substitution for tridiagonal θ-scheme operators
//!
//! # Operator
//!
//! Each time step of both schemes solves
//! ```text
//! -α[j]·x[j-1] + (1 - β[j])·x[j] - γ[j]·x[j+1] = b[j]
//! ```
//! where the right-hand side is built with the explicit half of the scheme,
//! ```text
//! b[j] = α[j]·v[j-1] + (1 + β[j])·v[j] + γ[j]·v[j+1]
//! ```
//! The heat-equation scheme uses a single coefficient `θ` with
//! `α = γ = θ` and `β = -2θ`.
//!
//! # Thomas Algorithm
//!
//! The operator is factored once as `A = L·U`, with `L` unit lower bidiagonal
//! (sub-diagonal `low`) and `U` upper bidiagonal (diagonal `up`, super-diagonal
//! `-γ`):
//! ```text
//! up[0] = 1 - β[0],  low[0] = 0
//! low[i] = -α[i] / up[i-1]
//! up[i]  = (1 - β[i]) + low[i]·γ[i-1]
//! ```
//! Each solve is then a forward sweep `L·y = b` and a backward sweep
//! `U·x = y`, both O(N). The factorization requires `up[i] ≠ 0`, which holds
//! for diagonally dominant operators; it is not re-checked at runtime.

use ndarray::Array1;

/// Coefficients of a tridiagonal θ-scheme operator
#[derive(Debug, Clone, PartialEq)]
pub enum TridiagonalCoefficients {
    /// Row-dependent coefficients of the price-space Crank-Nicolson scheme
    CrankNicolson {
        alpha: Array1<f64>,
        beta: Array1<f64>,
        gamma: Array1<f64>,
    },
    /// Constant coefficient of the heat-equation scheme over `size` rows
    Homogeneous { theta: f64, size: usize },
}

impl TridiagonalCoefficients {
    /// Number of rows of the operator
    pub fn size(&self) -> usize {
        match self {
            TridiagonalCoefficients::CrankNicolson { beta, .. } => beta.len(),
            TridiagonalCoefficients::Homogeneous { size, .. } => *size,
        }
    }

    #[inline]
    pub fn alpha(&self, i: usize) -> f64 {
        match self {
            TridiagonalCoefficients::CrankNicolson { alpha, .. } => alpha[i],
            TridiagonalCoefficients::Homogeneous { theta, .. } => *theta,
        }
    }

    #[inline]
    pub fn beta(&self, i: usize) -> f64 {
        match self {
            TridiagonalCoefficients::CrankNicolson { beta, .. } => beta[i],
            TridiagonalCoefficients::Homogeneous { theta, .. } => -2.0 * theta,
        }
    }

    #[inline]
    pub fn gamma(&self, i: usize) -> f64 {
        match self {
            TridiagonalCoefficients::CrankNicolson { gamma, .. } => gamma[i],
            TridiagonalCoefficients::Homogeneous { theta, .. } => *theta,
        }
    }

    /// Explicit half of the scheme applied to `v`
    ///
    /// Neighbours outside `0..size` are dropped; callers add any boundary
    /// contribution to the first and last rows themselves.
    pub fn explicit_product(&self, v: &Array1<f64>) -> Array1<f64> {
        let n = self.size() - 1;
        Array1::from_shape_fn(n + 1, |j| {
            let mut b = (1.0 + self.beta(j)) * v[j];
            if j > 0 {
                b += self.alpha(j) * v[j - 1];
            }
            if j < n {
                b += self.gamma(j) * v[j + 1];
            }
            b
        })
    }
}

/// Factors `L` and `U` of a tridiagonal operator
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors {
    pub low: Array1<f64>,
    pub up: Array1<f64>,
}

impl LuFactors {
    /// Thomas-algorithm factorization of `coefficients`
    pub fn factorize(coefficients: &TridiagonalCoefficients) -> Self {
        let size = coefficients.size();
        let mut low = Array1::zeros(size);
        let mut up = Array1::zeros(size);

        up[0] = 1.0 - coefficients.beta(0);
        for i in 1..size {
            low[i] = -coefficients.alpha(i) / up[i - 1];
            up[i] = (1.0 - coefficients.beta(i)) + low[i] * coefficients.gamma(i - 1);
        }

        LuFactors { low, up }
    }

    /// Smallest pivot magnitude `min |up[i]|`
    pub fn min_pivot(&self) -> f64 {
        self.up.iter().fold(f64::INFINITY, |acc, u| acc.min(u.abs()))
    }
}

/// A factored tridiagonal operator, reused for every time step
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSolver {
    coefficients: TridiagonalCoefficients,
    factors: LuFactors,
}

impl TridiagonalSolver {
    pub fn new(coefficients: TridiagonalCoefficients) -> Self {
        let factors = LuFactors::factorize(&coefficients);
        tracing::trace!(
            size = coefficients.size(),
            min_pivot = factors.min_pivot(),
            "tridiagonal operator factorized"
        );
        TridiagonalSolver {
            coefficients,
            factors,
        }
    }

    pub fn coefficients(&self) -> &TridiagonalCoefficients {
        &self.coefficients
    }

    pub fn factors(&self) -> &LuFactors {
        &self.factors
    }

    pub fn size(&self) -> usize {
        self.coefficients.size()
    }

    /// Solve `L·y = b`
    pub fn forward_substitution(&self, b: &Array1<f64>) -> Array1<f64> {
        let low = &self.factors.low;
        let mut y = Array1::zeros(b.len());
        y[0] = b[0];
        for j in 1..b.len() {
            y[j] = b[j] - low[j] * y[j - 1];
        }
        y
    }

    /// Solve rows `from, from-1, ..=until` of `U·x = y`
    ///
    /// `x[from + 1]` must already hold its final value.
    pub fn backward_substitution(
        &self,
        y: &Array1<f64>,
        x: &mut Array1<f64>,
        from: usize,
        until: usize,
    ) {
        let up = &self.factors.up;
        for j in (until..=from).rev() {
            x[j] = (y[j] + self.coefficients.gamma(j) * x[j + 1]) / up[j];
        }
    }

    /// Solve `A·x = b` over every row
    pub fn solve(&self, b: &Array1<f64>) -> Array1<f64> {
        let n = self.size() - 1;
        let y = self.forward_substitution(b);
        let mut x = Array1::zeros(n + 1);
        x[n] = y[n] / self.factors.up[n];
        if n > 0 {
            self.backward_substitution(&y, &mut x, n - 1, 0);
        }
        x
    }

    /// Solve the interior rows with Dirichlet values pinned at both ends
    ///
    /// The forward sweep runs over every row starting from `y[0] = b[0]`;
    /// `x[0] = lower` and `x[N] = upper` replace the edge rows.
    pub fn solve_pinned(&self, b: &Array1<f64>, lower: f64, upper: f64) -> Array1<f64> {
        let n = self.size() - 1;
        let y = self.forward_substitution(b);
        let mut x = Array1::zeros(n + 1);
        x[n] = upper;
        if n > 1 {
            self.backward_substitution(&y, &mut x, n - 1, 1);
        }
        x[0] = lower;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense_apply(coefficients: &TridiagonalCoefficients, x: &Array1<f64>) -> Array1<f64> {
        let n = coefficients.size() - 1;
        Array1::from_shape_fn(n + 1, |j| {
            let mut value = (1.0 - coefficients.beta(j)) * x[j];
            if j > 0 {
                value -= coefficients.alpha(j) * x[j - 1];
            }
            if j < n {
                value -= coefficients.gamma(j) * x[j + 1];
            }
            value
        })
    }

    #[test]
    fn test_homogeneous_factorization() {
        let theta = 0.5;
        let factors = LuFactors::factorize(&TridiagonalCoefficients::Homogeneous { theta, size: 3 });

        assert_eq!(factors.low[0], 0.0);
        assert_eq!(factors.up[0], 2.0);
        assert_eq!(factors.low[1], -0.25);
        assert_eq!(factors.up[1], 1.875);
        assert!((factors.low[2] + 0.5 / 1.875).abs() < 1e-15);
    }

    #[test]
    fn test_solve_reproduces_right_hand_side() {
        let coefficients = TridiagonalCoefficients::CrankNicolson {
            alpha: Array1::from(vec![0.0, 0.1, 0.3, 0.2, 0.4]),
            beta: Array1::from(vec![-0.05, -0.4, -0.9, -0.7, -1.2]),
            gamma: Array1::from(vec![0.02, 0.2, 0.5, 0.45, 0.6]),
        };
        let solver = TridiagonalSolver::new(coefficients);
        let b = Array1::from(vec![1.0, -2.0, 0.5, 3.0, 4.0]);

        let x = solver.solve(&b);
        let residual = dense_apply(solver.coefficients(), &x) - &b;

        for r in residual.iter() {
            assert!(r.abs() < 1e-12, "residual {}", r);
        }
    }

    #[test]
    fn test_solve_pinned_keeps_boundary_values() {
        let solver = TridiagonalSolver::new(TridiagonalCoefficients::Homogeneous {
            theta: 0.3,
            size: 6,
        });
        let b = Array1::from(vec![0.0, 1.0, 2.0, 3.0, 4.0, 0.0]);

        let x = solver.solve_pinned(&b, -1.0, 7.0);

        assert_eq!(x[0], -1.0);
        assert_eq!(x[5], 7.0);
        // Interior rows satisfy U·x = y exactly.
        let y = solver.forward_substitution(&b);
        for j in 1..5 {
            let lhs = solver.factors().up[j] * x[j] - 0.3 * x[j + 1];
            assert!((lhs - y[j]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_explicit_product_drops_missing_neighbours() {
        let coefficients = TridiagonalCoefficients::Homogeneous { theta: 0.25, size: 3 };
        let v = Array1::from(vec![1.0, 2.0, 3.0]);
        let b = coefficients.explicit_product(&v);

        assert_eq!(b[0], 0.5 * 1.0 + 0.25 * 2.0);
        assert_eq!(b[1], 0.25 * 1.0 + 0.5 * 2.0 + 0.25 * 3.0);
        assert_eq!(b[2], 0.25 * 2.0 + 0.5 * 3.0);
    }
}
