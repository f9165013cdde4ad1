//! `zipf-fit` library crate.
//!
//! Fits Zipf (`f = C / r^a`) and Zipf-Mandelbrot (`f = C / (r + B)^a`) laws to
//! rank/frequency tables via log-log least squares, scores both by R² in log
//! space, and renders the results.
//!
//! The binary (`zipf`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the fitters stay pure and reusable outside the CLI

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
