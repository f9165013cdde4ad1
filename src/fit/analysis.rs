//! Run both fits over one sample set and collect what succeeded.
//!
//! The two laws are fitted and scored independently:
//! 1. Zipf: log-log OLS, then R²
//! 2. Mandelbrot (optional): B grid search, then R²
//!
//! A failure in one does not discard the other. Failures are kept next to the
//! successful fits so reports can say what went wrong for which law.

use crate::domain::{AnalysisConfig, FailedFit, ModelKind, ModelResult, RankFrequency, ShiftGrid, split_samples};
use crate::error::FitError;
use crate::fit::mandelbrot::fit_mandelbrot;
use crate::fit::score::r2_log_space;
use crate::fit::zipf::fit_zipf;

/// Options that decide which laws are fitted and how.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub fit_mandelbrot: bool,
    pub grid: ShiftGrid,
}

impl From<&AnalysisConfig> for FitOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            fit_mandelbrot: config.fit_mandelbrot,
            grid: config.grid,
        }
    }
}

/// Output of fitting both laws.
#[derive(Debug, Clone)]
pub struct FitSummary {
    /// Successful fits, Zipf first.
    pub fits: Vec<ModelResult>,
    /// Laws that were attempted and failed.
    pub failed: Vec<(ModelKind, FitError)>,
    /// Laws that were not attempted and why (for diagnostics).
    pub skipped: Vec<(ModelKind, String)>,
}

impl FitSummary {
    pub fn get(&self, kind: ModelKind) -> Option<&ModelResult> {
        self.fits.iter().find(|f| f.kind == kind)
    }

    pub fn failures(&self) -> Vec<FailedFit> {
        self.failed
            .iter()
            .map(|(kind, err)| FailedFit {
                kind: *kind,
                message: err.to_string(),
            })
            .collect()
    }
}

/// Fit Zipf and (optionally) Mandelbrot to `samples`.
pub fn fit_all(samples: &[RankFrequency], opts: &FitOptions) -> FitSummary {
    let (ranks, freqs) = split_samples(samples);

    let mut fits = Vec::new();
    let mut failed = Vec::new();
    let mut skipped = Vec::new();

    match fit_zipf_scored(&ranks, &freqs) {
        Ok(fit) => {
            tracing::info!(c = fit.law.c, a = fit.law.a, r2 = fit.r2, "Zipf fit");
            fits.push(fit);
        }
        Err(e) => {
            tracing::warn!("{e}");
            failed.push((ModelKind::Zipf, e));
        }
    }

    if opts.fit_mandelbrot {
        match fit_mandelbrot_scored(&ranks, &freqs, &opts.grid) {
            Ok(fit) => {
                tracing::info!(c = fit.law.c, a = fit.law.a, b = fit.law.b, r2 = fit.r2, "Mandelbrot fit");
                if fit.on_grid_boundary {
                    tracing::warn!(
                        b = fit.law.b,
                        b_min = opts.grid.b_min,
                        b_max = opts.grid.b_max,
                        "Mandelbrot B landed on the edge of the search grid; widen --b-min/--b-max"
                    );
                }
                fits.push(fit);
            }
            Err(e) => {
                tracing::warn!("{e}");
                failed.push((ModelKind::Mandelbrot, e));
            }
        }
    } else {
        skipped.push((ModelKind::Mandelbrot, "disabled by configuration".to_string()));
    }

    FitSummary { fits, failed, skipped }
}

fn fit_zipf_scored(ranks: &[f64], freqs: &[f64]) -> Result<ModelResult, FitError> {
    let fit = fit_zipf(ranks, freqs)?;
    let r2 = r2_log_space(freqs, &fit.predicted)?;
    Ok(ModelResult {
        kind: ModelKind::Zipf,
        law: fit.law,
        r2,
        log_sse: fit.sse,
        predicted: fit.predicted,
        on_grid_boundary: false,
    })
}

fn fit_mandelbrot_scored(ranks: &[f64], freqs: &[f64], grid: &ShiftGrid) -> Result<ModelResult, FitError> {
    let fit = fit_mandelbrot(ranks, freqs, grid)?;
    let r2 = r2_log_space(freqs, &fit.predicted)?;
    let on_grid_boundary = fit.on_grid_boundary();
    Ok(ModelResult {
        kind: ModelKind::Mandelbrot,
        law: fit.law,
        r2,
        log_sse: fit.sse,
        predicted: fit.predicted,
        on_grid_boundary,
    })
}
