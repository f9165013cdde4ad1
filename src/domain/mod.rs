//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input observations (`RankFrequency`, `WordRow`)
//! - the law parameters and search grid (`PowerLaw`, `ShiftGrid`)
//! - fit outputs (`ModelResult`, `FailedFit`, `FitFile`)
//! - the run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
