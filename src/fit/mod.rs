//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit the generalized Zipf law by log-log OLS
//! - generate the Mandelbrot shift grid and evaluate each candidate (parallel)
//! - score both fits with log-space R²

pub mod analysis;
pub mod mandelbrot;
pub mod score;
pub mod shift_grid;
pub mod zipf;

pub use analysis::*;
pub use mandelbrot::*;
pub use score::*;
pub use shift_grid::*;
pub use zipf::*;
