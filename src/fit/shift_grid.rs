//! Shift (`B`) grid generation.
//!
//! The Mandelbrot shift has no closed form jointly with `(C, a)`, so we search it
//! on a deterministic, evenly spaced grid and solve `(C, a)` exactly per point.
//! Candidates are always produced in ascending order; the fitter relies on that
//! order to break SSE ties in favor of the smaller `B`.

use crate::domain::ShiftGrid;
use crate::error::FitError;

/// Generate `steps` evenly spaced points over `[min, max]` (inclusive).
///
/// `steps == 1` yields just `min`.
pub fn linear_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, FitError> {
    if !(min.is_finite() && max.is_finite() && max >= min) {
        return Err(FitError::invalid_config(format!(
            "Invalid B range: min={min}, max={max} (must be finite and max>=min)."
        )));
    }
    if steps < 1 {
        return Err(FitError::invalid_config("B steps must be >= 1."));
    }
    if steps == 1 {
        return Ok(vec![min]);
    }

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps - 1 {
        out.push(min + step * i as f64);
    }
    out.push(max);
    Ok(out)
}

/// Candidate `B` values for a shift grid.
///
/// Shifts are non-negative: a negative `B` would push low ranks through
/// `ln(r + B)` with `r + B <= 0`.
pub fn shift_values(grid: &ShiftGrid) -> Result<Vec<f64>, FitError> {
    if grid.b_min < 0.0 {
        return Err(FitError::invalid_config(format!(
            "B min must be >= 0, got {}.",
            grid.b_min
        )));
    }
    linear_space(grid.b_min, grid.b_max, grid.b_steps)
}
