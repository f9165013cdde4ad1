//! Generalized Zipf fit: `f(r) = C / r^a`.
//!
//! Log-log OLS on `ln f = ln C - a · ln r`, then the curve is evaluated back in
//! the frequency domain so it can be compared against raw frequencies.

use crate::domain::PowerLaw;
use crate::error::{FitError, Stage};
use crate::math::{fit_line, ln_all};
use crate::models::predict_curve;

/// Best Zipf fit for a sample set.
#[derive(Debug, Clone, PartialEq)]
pub struct ZipfFit {
    /// `C`, `a`, and `b = 0`.
    pub law: PowerLaw,
    /// `C / r^a` for every input rank.
    pub predicted: Vec<f64>,
    /// Log-space SSE of the regression line.
    pub sse: f64,
}

/// Fit `f(r) = C / r^a` to parallel `ranks` / `freqs`.
pub fn fit_zipf(ranks: &[f64], freqs: &[f64]) -> Result<ZipfFit, FitError> {
    check_pairs(ranks, freqs, Stage::ZipfFit)?;

    let x = ln_all(ranks, Stage::ZipfFit, "rank")?;
    let y = ln_all(freqs, Stage::ZipfFit, "frequency")?;

    let line = fit_line(&x, &y).map_err(|e| e.in_stage(Stage::ZipfFit))?;
    let law = PowerLaw::from_line(line, 0.0);

    Ok(ZipfFit {
        law,
        predicted: predict_curve(&law, ranks),
        sse: line.sse(&x, &y),
    })
}

pub(crate) fn check_pairs(ranks: &[f64], freqs: &[f64], stage: Stage) -> Result<(), FitError> {
    if ranks.len() != freqs.len() {
        return Err(FitError::invalid_input(
            stage,
            format!("ranks and frequencies differ in length ({} vs {})", ranks.len(), freqs.len()),
        ));
    }
    if ranks.len() < 2 {
        return Err(FitError::degenerate(
            stage,
            format!("need at least 2 samples, got {}", ranks.len()),
        ));
    }
    Ok(())
}
