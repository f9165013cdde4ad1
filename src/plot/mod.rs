//! Plotting: a terminal ASCII plot and an SVG chart file.

pub mod ascii;
pub mod chart;

pub use ascii::*;
pub use chart::*;
