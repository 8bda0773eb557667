// src/grid/grid_data.rs
//! Model parameters and the uniform (time, price) discretization
//!
//! # Discretization
//!
//! The Black-Scholes PDE is solved on the rectangle `[0, T] × [0, L]`:
//! ```text
//! dt = T / M        t[i] = i·dt,  i = 0..=M
//! ds = L / N        l[i] = i·ds,  i = 0..=N
//! ```
//! where `L` is the largest underlying price carried by the grid.

use crate::error::{validation::*, PdeResult};
use ndarray::Array1;

/// Configuration of one pricing grid
///
/// Field names follow the financial meaning; the usual symbols are given
/// alongside each field.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Time to maturity `T` (years)
    pub maturity: f64,
    /// Risk-free rate `r`
    pub rate: f64,
    /// Volatility `σ`
    pub sigma: f64,
    /// Strike `K`
    pub strike: f64,
    /// Largest underlying price on the grid `L`
    pub max_price: f64,
    /// Number of time steps `M`
    pub time_steps: usize,
    /// Number of price steps `N`
    pub price_steps: usize,
}

impl GridConfig {
    /// Validate the grid configuration
    pub fn validate(&self) -> PdeResult<()> {
        let reals = [
            ("maturity", self.maturity),
            ("rate", self.rate),
            ("sigma", self.sigma),
            ("strike", self.strike),
            ("max_price", self.max_price),
        ];
        for (name, value) in reals {
            validate_finite(name, value)?;
            validate_non_negative(name, value)?;
        }

        validate_steps("time_steps", self.time_steps)?;
        validate_steps("price_steps", self.price_steps)?;
        validate_positive("sigma", self.sigma)?;
        validate_positive("strike", self.strike)?;

        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            maturity: 1.0,
            rate: 0.1,
            sigma: 0.1,
            strike: 100.0,
            max_price: 300.0,
            time_steps: 1000,
            price_steps: 1000,
        }
    }
}

/// Validated model parameters together with their uniform discretization
///
/// Built once and never mutated. Schemes take their own clone.
#[derive(Debug, Clone, PartialEq)]
pub struct GridData {
    config: GridConfig,
    dt: f64,
    ds: f64,
    times: Array1<f64>,
    prices: Array1<f64>,
}

impl GridData {
    /// Build a grid from the seven positional model parameters
    ///
    /// # Errors
    ///
    /// Returns `PdeError::InvalidParameter` if any real parameter is negative
    /// or non-finite, or if `time_steps`, `price_steps`, `sigma` or `strike`
    /// is zero.
    pub fn new(
        maturity: f64,
        rate: f64,
        sigma: f64,
        strike: f64,
        max_price: f64,
        time_steps: usize,
        price_steps: usize,
    ) -> PdeResult<Self> {
        Self::from_config(&GridConfig {
            maturity,
            rate,
            sigma,
            strike,
            max_price,
            time_steps,
            price_steps,
        })
    }

    /// Build a grid from a [`GridConfig`]
    pub fn from_config(config: &GridConfig) -> PdeResult<Self> {
        config.validate()?;

        let m = config.time_steps;
        let n = config.price_steps;
        let dt = config.maturity / m as f64;
        let ds = config.max_price / n as f64;

        let times = Array1::from_shape_fn(m + 1, |i| i as f64 * dt);
        let prices = Array1::from_shape_fn(n + 1, |i| i as f64 * ds);

        tracing::debug!(
            time_steps = m,
            price_steps = n,
            dt,
            ds,
            "grid discretized"
        );

        Ok(GridData {
            config: config.clone(),
            dt,
            ds,
            times,
            prices,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn maturity(&self) -> f64 {
        self.config.maturity
    }

    pub fn rate(&self) -> f64 {
        self.config.rate
    }

    pub fn sigma(&self) -> f64 {
        self.config.sigma
    }

    pub fn strike(&self) -> f64 {
        self.config.strike
    }

    pub fn max_price(&self) -> f64 {
        self.config.max_price
    }

    pub fn time_steps(&self) -> usize {
        self.config.time_steps
    }

    pub fn price_steps(&self) -> usize {
        self.config.price_steps
    }

    /// Time step `dt = T / M`
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Price step `ds = L / N`
    pub fn ds(&self) -> f64 {
        self.ds
    }

    /// Time grid `t[0..=M]`
    pub fn times(&self) -> &Array1<f64> {
        &self.times
    }

    /// Price grid `l[0..=N]`
    pub fn prices(&self) -> &Array1<f64> {
        &self.prices
    }
}
