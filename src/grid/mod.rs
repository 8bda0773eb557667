// src/grid/mod.rs
//! Discretization grids: the uniform (t, S) grid and its heat-equation view

pub mod grid_data;
pub mod variable_change;

pub use grid_data::{GridConfig, GridData};
pub use variable_change::TransformedGrid;
