//! Model evaluation for Zipf / Mandelbrot.
//!
//! The fitter relies on two primitive operations:
//! - evaluate the law in the frequency domain (for predicted curves and plots)
//! - evaluate the law in log space (for residuals on the fitted line)
//!
//! Both laws share one parameterization, `f(r) = C / (r + B)^a`, with `B = 0`
//! for Zipf.

use crate::domain::PowerLaw;
use crate::math::LineFit;

impl PowerLaw {
    /// Recover `(C, a)` from the log-space line `ln f = b0 + b1 · ln(r + B)`.
    pub fn from_line(line: LineFit, b: f64) -> Self {
        Self {
            c: line.intercept.exp(),
            a: -line.slope,
            b,
        }
    }
}

/// Predict `f(r)` in the frequency domain.
pub fn predict(law: &PowerLaw, rank: f64) -> f64 {
    law.c / (rank + law.b).powf(law.a)
}

/// Predict `ln f(r)`.
pub fn predict_ln(law: &PowerLaw, rank: f64) -> f64 {
    law.c.ln() - law.a * (rank + law.b).ln()
}

/// Predicted curve aligned with `ranks`.
pub fn predict_curve(law: &PowerLaw, ranks: &[f64]) -> Vec<f64> {
    ranks.iter().map(|&r| predict(law, r)).collect()
}
