// src/solvers/mod.rs
pub mod tridiagonal;

pub use tridiagonal::{LuFactors, TridiagonalCoefficients, TridiagonalSolver};
