// src/schemes/mod.rs
//! Finite-difference pricers for European options
//!
//! Two discretizations of the same Black-Scholes PDE, each for calls and puts:
//!
//! | Variant | Scheme |
//! |---|---|
//! | `CompleteCall`, `CompletePut` | Crank-Nicolson on `(S, t)` |
//! | `ReducedCall`, `ReducedPut` | θ-scheme on the heat equation in `(x, τ)` |
//!
//! A [`PricingScheme`] is factored on construction; [`PricingScheme::price`]
//! runs the time-marching loop and may be called any number of times.

pub mod complete;
pub mod payoffs;
pub mod reduced;

use crate::error::PdeResult;
use crate::grid::grid_data::GridData;
use crate::math_utils::interpolate_uniform;
use complete::CompleteScheme;
use ndarray::Array1;
use payoffs::OptionType;
use reduced::ReducedScheme;
use std::fmt;

/// The four pricers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemeVariant {
    CompleteCall,
    CompletePut,
    ReducedCall,
    ReducedPut,
}

impl SchemeVariant {
    pub const ALL: [SchemeVariant; 4] = [
        SchemeVariant::CompleteCall,
        SchemeVariant::CompletePut,
        SchemeVariant::ReducedCall,
        SchemeVariant::ReducedPut,
    ];

    pub fn option_type(&self) -> OptionType {
        match self {
            SchemeVariant::CompleteCall | SchemeVariant::ReducedCall => OptionType::Call,
            SchemeVariant::CompletePut | SchemeVariant::ReducedPut => OptionType::Put,
        }
    }
}

impl fmt::Display for SchemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SchemeVariant::CompleteCall => "complete call",
            SchemeVariant::CompletePut => "complete put",
            SchemeVariant::ReducedCall => "reduced call",
            SchemeVariant::ReducedPut => "reduced put",
        };
        f.write_str(name)
    }
}

/// Option prices at valuation time across the price grid
#[derive(Debug, Clone, PartialEq)]
pub struct PriceVector {
    spots: Array1<f64>,
    prices: Array1<f64>,
}

impl PriceVector {
    pub fn new(spots: Array1<f64>, prices: Array1<f64>) -> Self {
        debug_assert_eq!(spots.len(), prices.len());
        PriceVector { spots, prices }
    }

    /// Underlying prices `l[0..=N]`
    pub fn spots(&self) -> &Array1<f64> {
        &self.spots
    }

    /// Option prices, `prices[i]` at spot `l[i]`
    pub fn prices(&self) -> &Array1<f64> {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.prices.get(i).copied()
    }

    /// Linear interpolation at an arbitrary spot inside `[0, L]`
    ///
    /// Returns `None` outside the grid.
    pub fn price_at_spot(&self, spot: f64) -> Option<f64> {
        let n = self.len() - 1;
        let max_price = self.spots[n];
        if !(0.0..=max_price).contains(&spot) {
            return None;
        }
        let step = max_price / n as f64;
        let values = self.prices.as_slice()?;
        Some(interpolate_uniform(0.0, step, values, spot))
    }
}

/// One of the four pricers, factored and ready to price
#[derive(Debug, Clone, PartialEq)]
pub enum PricingScheme {
    CompleteCall(CompleteScheme),
    CompletePut(CompleteScheme),
    ReducedCall(ReducedScheme),
    ReducedPut(ReducedScheme),
}

impl PricingScheme {
    /// Build and factor the operator for `variant`
    ///
    /// # Errors
    ///
    /// Reduced variants fail when the log-price grid is undefined
    /// (`price_steps < 2` or `max_price == 0`).
    pub fn new(variant: SchemeVariant, grid: &GridData) -> PdeResult<Self> {
        Ok(match variant {
            SchemeVariant::CompleteCall => PricingScheme::CompleteCall(CompleteScheme::new(grid)),
            SchemeVariant::CompletePut => PricingScheme::CompletePut(CompleteScheme::new(grid)),
            SchemeVariant::ReducedCall => PricingScheme::ReducedCall(ReducedScheme::new(grid)?),
            SchemeVariant::ReducedPut => PricingScheme::ReducedPut(ReducedScheme::new(grid)?),
        })
    }

    pub fn variant(&self) -> SchemeVariant {
        match self {
            PricingScheme::CompleteCall(_) => SchemeVariant::CompleteCall,
            PricingScheme::CompletePut(_) => SchemeVariant::CompletePut,
            PricingScheme::ReducedCall(_) => SchemeVariant::ReducedCall,
            PricingScheme::ReducedPut(_) => SchemeVariant::ReducedPut,
        }
    }

    pub fn grid(&self) -> &GridData {
        match self {
            PricingScheme::CompleteCall(s) | PricingScheme::CompletePut(s) => s.grid(),
            PricingScheme::ReducedCall(s) | PricingScheme::ReducedPut(s) => s.grid(),
        }
    }

    /// Run the pricing loop
    pub fn price(&self) -> PriceVector {
        let prices = match self {
            PricingScheme::CompleteCall(s) => s.price(OptionType::Call),
            PricingScheme::CompletePut(s) => s.price(OptionType::Put),
            PricingScheme::ReducedCall(s) => s.price(OptionType::Call),
            PricingScheme::ReducedPut(s) => s.price(OptionType::Put),
        };
        PriceVector::new(self.grid().prices().clone(), prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_round_trip() {
        let grid = GridData::new(1.0, 0.05, 0.2, 100.0, 300.0, 10, 10).expect("Valid configuration");
        for variant in SchemeVariant::ALL {
            let scheme = PricingScheme::new(variant, &grid).expect("Valid grid");
            assert_eq!(scheme.variant(), variant);
            assert_eq!(scheme.price().len(), 11);
        }
    }

    #[test]
    fn test_price_at_spot() {
        let vector = PriceVector::new(
            Array1::from(vec![0.0, 100.0, 200.0]),
            Array1::from(vec![0.0, 4.0, 10.0]),
        );

        assert_eq!(vector.price_at_spot(150.0), Some(7.0));
        assert_eq!(vector.price_at_spot(200.0), Some(10.0));
        assert_eq!(vector.price_at_spot(-1.0), None);
        assert_eq!(vector.price_at_spot(200.5), None);
    }
}
