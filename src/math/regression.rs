//! Ordinary least squares for a straight line.
//!
//! Both laws become a line after a log transform:
//!
//! ```text
//! ln f = ln C - a · ln(r + B)        (B = 0 for Zipf)
//! ```
//!
//! so the only solver we need is the closed-form fit of `y ≈ b0 + b1·x`.
//! We solve the normal equations in mean-centered form:
//!
//! ```text
//! b1 = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//! b0 = ȳ - b1·x̄
//! ```
//!
//! Centering keeps the 2×2 system well conditioned even when `x` sits far from
//! zero (large Mandelbrot shifts push every `ln(r + B)` close to `ln B`).

use nalgebra::DVector;

use crate::error::{FitError, Stage};
use crate::math::is_negligible_variance;

/// A fitted line `y = intercept + slope · x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn eval(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Sum of squared residuals of this line over `(x, y)`.
    pub fn sse(&self, x: &[f64], y: &[f64]) -> f64 {
        x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| {
                let r = yi - self.eval(xi);
                r * r
            })
            .sum()
    }
}

/// Fit `y ≈ b0 + b1·x` by least squares.
///
/// Input order does not matter. Fails with `DegenerateInput` for fewer than two
/// points or when `x` has no variance.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit, FitError> {
    if x.len() != y.len() {
        return Err(FitError::invalid_input(
            Stage::Regression,
            format!("x and y lengths differ ({} vs {})", x.len(), y.len()),
        ));
    }
    if x.len() < 2 {
        return Err(FitError::degenerate(
            Stage::Regression,
            format!("need at least 2 points, got {}", x.len()),
        ));
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(FitError::invalid_input(Stage::Regression, "non-finite value in regression input"));
    }

    let x = DVector::from_column_slice(x);
    let y = DVector::from_column_slice(y);

    let x_mean = x.mean();
    let y_mean = y.mean();
    let dx = x.add_scalar(-x_mean);
    let dy = y.add_scalar(-y_mean);

    let sxx = dx.norm_squared();
    if is_negligible_variance(sxx, x.norm_squared()) {
        return Err(FitError::degenerate(Stage::Regression, "x has zero variance"));
    }

    let slope = dx.dot(&dy) / sxx;
    let intercept = y_mean - slope * x_mean;

    Ok(LineFit { intercept, slope })
}
