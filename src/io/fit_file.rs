//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a run:
//! - parameters and scores for each law that was fitted
//! - failures for the laws that were not
//! - the observed samples, so the plot can be re-rendered without the CSV
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{FitFile, ShiftGrid};
use crate::error::AppError;
use crate::fit::FitSummary;
use crate::io::ingest::Corpus;

/// Assemble the JSON document for a run.
pub fn build_fit_file(source: &Path, corpus: &Corpus, summary: &FitSummary, grid: Option<ShiftGrid>) -> FitFile {
    FitFile {
        tool: "zipf".to_string(),
        generated_at: Utc::now(),
        source: source.display().to_string(),
        stats: corpus.stats.clone(),
        grid,
        fits: summary.fits.clone(),
        failures: summary.failures(),
        observed: corpus.samples.clone(),
    }
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit_file: &FitFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, fit_file)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let fit_file: FitFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    Ok(fit_file)
}
