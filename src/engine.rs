// src/engine.rs
//! Batch pricing and cross-validation of the two schemes
//!
//! Both schemes discretize the same PDE, so for a fine enough grid the
//! complete and reduced prices of the same option must agree. The engine prices
//! a selection of the four pricers against one grid and reports the
//! complete-minus-reduced difference per option type.
//!
//! The pricers share no mutable state and run concurrently on the Rayon pool;
//! each time-marching loop stays sequential.

use crate::error::PdeResult;
use crate::grid::grid_data::{GridConfig, GridData};
use crate::schemes::payoffs::OptionType;
use crate::schemes::{PriceVector, PricingScheme, SchemeVariant};
use bitflags::bitflags;
use ndarray::Array1;
use rayon::prelude::*;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SchemeSelection: u32 {
        const NONE          = 0;
        const COMPLETE_CALL = 1 << 0;
        const COMPLETE_PUT  = 1 << 1;
        const REDUCED_CALL  = 1 << 2;
        const REDUCED_PUT   = 1 << 3;
        const CALLS    = Self::COMPLETE_CALL.bits() | Self::REDUCED_CALL.bits();
        const PUTS     = Self::COMPLETE_PUT.bits() | Self::REDUCED_PUT.bits();
        const COMPLETE = Self::COMPLETE_CALL.bits() | Self::COMPLETE_PUT.bits();
        const REDUCED  = Self::REDUCED_CALL.bits() | Self::REDUCED_PUT.bits();
        const ALL      = Self::CALLS.bits() | Self::PUTS.bits();
    }
}

impl SchemeSelection {
    fn flag(variant: SchemeVariant) -> SchemeSelection {
        match variant {
            SchemeVariant::CompleteCall => SchemeSelection::COMPLETE_CALL,
            SchemeVariant::CompletePut => SchemeSelection::COMPLETE_PUT,
            SchemeVariant::ReducedCall => SchemeSelection::REDUCED_CALL,
            SchemeVariant::ReducedPut => SchemeSelection::REDUCED_PUT,
        }
    }

    /// Selected variants in canonical order
    pub fn variants(&self) -> Vec<SchemeVariant> {
        SchemeVariant::ALL
            .into_iter()
            .filter(|v| self.contains(Self::flag(*v)))
            .collect()
    }
}

/// Prices of the selected pricers on one grid
#[derive(Debug, Clone)]
pub struct PricingReport {
    grid: GridData,
    results: Vec<(SchemeVariant, PriceVector)>,
}

impl PricingReport {
    pub fn grid(&self) -> &GridData {
        &self.grid
    }

    pub fn get(&self, variant: SchemeVariant) -> Option<&PriceVector> {
        self.results
            .iter()
            .find(|(v, _)| *v == variant)
            .map(|(_, prices)| prices)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(SchemeVariant, PriceVector)> {
        self.results.iter()
    }

    /// Complete minus reduced prices for `option`
    ///
    /// `None` unless both pricers of that option type were selected.
    pub fn difference(&self, option: OptionType) -> Option<Array1<f64>> {
        let (complete, reduced) = match option {
            OptionType::Call => (SchemeVariant::CompleteCall, SchemeVariant::ReducedCall),
            OptionType::Put => (SchemeVariant::CompletePut, SchemeVariant::ReducedPut),
        };
        let complete = self.get(complete)?;
        let reduced = self.get(reduced)?;
        Some(complete.prices() - reduced.prices())
    }

    /// Largest absolute complete/reduced disagreement for `option`
    pub fn max_abs_difference(&self, option: OptionType) -> Option<f64> {
        self.difference(option)
            .map(|d| d.iter().fold(0.0_f64, |acc, x| acc.max(x.abs())))
    }
}

/// Price the selected variants concurrently on an existing grid
pub fn price_grid(grid: &GridData, selection: SchemeSelection) -> PdeResult<PricingReport> {
    let variants = selection.variants();

    let results = variants
        .par_iter()
        .map(|&variant| {
            let scheme = PricingScheme::new(variant, grid)?;
            Ok((variant, scheme.price()))
        })
        .collect::<PdeResult<Vec<_>>>()?;

    for (variant, prices) in &results {
        if prices.prices().iter().any(|p| !p.is_finite()) {
            tracing::warn!(%variant, "non-finite prices produced");
        }
    }

    let report = PricingReport {
        grid: grid.clone(),
        results,
    };

    tracing::info!(
        pricers = report.results.len(),
        time_steps = grid.time_steps(),
        price_steps = grid.price_steps(),
        call_difference = ?report.max_abs_difference(OptionType::Call),
        put_difference = ?report.max_abs_difference(OptionType::Put),
        "pricing completed"
    );

    Ok(report)
}

/// Validate `config` and price all four variants
pub fn price_all(config: &GridConfig) -> PdeResult<PricingReport> {
    let grid = GridData::from_config(config)?;
    price_grid(&grid, SchemeSelection::ALL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PdeError;

    fn small_config() -> GridConfig {
        GridConfig {
            time_steps: 50,
            price_steps: 60,
            ..Default::default()
        }
    }

    #[test]
    fn test_selection_variants() {
        assert_eq!(SchemeSelection::ALL.variants(), SchemeVariant::ALL.to_vec());
        assert_eq!(
            SchemeSelection::PUTS.variants(),
            vec![SchemeVariant::CompletePut, SchemeVariant::ReducedPut]
        );
        assert!(SchemeSelection::NONE.variants().is_empty());
    }

    #[test]
    fn test_difference_requires_both_schemes() {
        let grid = GridData::from_config(&small_config()).expect("Valid configuration");
        let report = price_grid(&grid, SchemeSelection::COMPLETE).expect("Valid grid");

        assert!(report.get(SchemeVariant::CompleteCall).is_some());
        assert!(report.get(SchemeVariant::ReducedCall).is_none());
        assert!(report.difference(OptionType::Call).is_none());
    }

    #[test]
    fn test_parallel_matches_direct_pricing() {
        let grid = GridData::from_config(&small_config()).expect("Valid configuration");
        let report = price_grid(&grid, SchemeSelection::ALL).expect("Valid grid");

        for variant in SchemeVariant::ALL {
            let direct = PricingScheme::new(variant, &grid).expect("Valid grid").price();
            assert_eq!(report.get(variant), Some(&direct));
        }
    }

    #[test]
    fn test_price_all_propagates_validation_error() {
        let config = GridConfig {
            sigma: 0.0,
            ..small_config()
        };
        match price_all(&config) {
            Err(PdeError::InvalidParameter { parameter, .. }) => assert_eq!(parameter, "sigma"),
            Ok(_) => panic!("zero volatility must be rejected"),
        }
    }
}
