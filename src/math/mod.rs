//! Numerical primitives: checked log transforms and the least-squares line.

pub mod logs;
pub mod regression;

pub use logs::*;
pub use regression::*;
