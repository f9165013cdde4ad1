//! Mandelbrot fit: `f(r) = C / (r + B)^a`.
//!
//! Given:
//! - ranks `r_i`
//! - observed frequencies `f_i`
//! - a grid of candidate shifts `B`
//!
//! we solve, for each `B`:
//! - the log-log OLS line `ln f = b0 + b1 · ln(r + B)`
//! - the resulting log-space SSE
//!
//! and return the best (lowest SSE) candidate.

use rayon::prelude::*;

use crate::domain::{PowerLaw, ShiftGrid};
use crate::error::{FitError, Stage};
use crate::fit::shift_grid::shift_values;
use crate::fit::zipf::check_pairs;
use crate::math::{LineFit, ensure_positive, fit_line, ln_all, ln_shifted};
use crate::models::predict_curve;

/// Best Mandelbrot fit over a shift grid.
#[derive(Debug, Clone, PartialEq)]
pub struct MandelbrotFit {
    pub law: PowerLaw,
    /// `C / (r + B)^a` for every input rank.
    pub predicted: Vec<f64>,
    /// Minimized log-space SSE.
    pub sse: f64,
    /// Index of the selected `B` within the grid.
    pub grid_index: usize,
    /// Number of grid candidates searched.
    pub grid_len: usize,
}

impl MandelbrotFit {
    /// True when the selected `B` is the last grid value, or the first one with
    /// a positive lower bound. The true optimum may lie outside the grid.
    pub fn on_grid_boundary(&self) -> bool {
        if self.grid_len < 2 {
            return false;
        }
        self.grid_index + 1 == self.grid_len || (self.grid_index == 0 && self.law.b > 0.0)
    }
}

#[derive(Debug, Clone)]
struct Candidate {
    idx: usize,
    b: f64,
    line: LineFit,
    sse: f64,
}

/// Fit `f(r) = C / (r + B)^a`, searching `B` over `grid`.
pub fn fit_mandelbrot(ranks: &[f64], freqs: &[f64], grid: &ShiftGrid) -> Result<MandelbrotFit, FitError> {
    let shifts = shift_values(grid)?;
    check_pairs(ranks, freqs, Stage::MandelbrotFit)?;
    ensure_positive(ranks, Stage::MandelbrotFit, "rank")?;

    let y = ln_all(freqs, Stage::MandelbrotFit, "frequency")?;

    // Evaluate each shift independently (parallel). The indexed collect keeps
    // grid order, so the selection below is independent of scheduling.
    let results: Vec<Result<Candidate, FitError>> = shifts
        .par_iter()
        .enumerate()
        .map(|(idx, &b)| evaluate_candidate(idx, b, ranks, &y))
        .collect();

    let mut best: Option<Candidate> = None;
    let mut first_err: Option<FitError> = None;
    for result in results {
        match result {
            Ok(c) => {
                // Deterministic selection: strictly lower SSE wins; ties keep the lower grid index.
                let better = match &best {
                    None => true,
                    Some(b) => c.sse < b.sse || (c.sse == b.sse && c.idx < b.idx),
                };
                if better {
                    best = Some(c);
                }
            }
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }

    let Some(best) = best else {
        return Err(first_err
            .map(|e| e.in_stage(Stage::MandelbrotFit))
            .unwrap_or_else(|| FitError::degenerate(Stage::MandelbrotFit, "no valid B candidates")));
    };

    let law = PowerLaw::from_line(best.line, best.b);
    tracing::debug!(
        candidates = shifts.len(),
        b = best.b,
        sse = best.sse,
        "Mandelbrot grid search complete"
    );

    Ok(MandelbrotFit {
        law,
        predicted: predict_curve(&law, ranks),
        sse: best.sse,
        grid_index: best.idx,
        grid_len: shifts.len(),
    })
}

fn evaluate_candidate(idx: usize, b: f64, ranks: &[f64], y: &[f64]) -> Result<Candidate, FitError> {
    let x = ln_shifted(ranks, b, Stage::MandelbrotFit, "rank")?;
    let line = fit_line(&x, y)?;
    let sse = line.sse(&x, y);

    if !sse.is_finite() {
        return Err(FitError::invalid_input(
            Stage::MandelbrotFit,
            format!("non-finite SSE for B={b}"),
        ));
    }

    Ok(Candidate { idx, b, line, sse })
}
