//! Checked logarithms.
//!
//! Every model in this crate is fitted in log space, so the log transform is the
//! single place where a zero/negative value would turn into `-inf`/`NaN` and
//! silently poison a regression. These helpers fail instead.

use crate::error::{FitError, Stage};

/// Elementwise `ln` over a slice; the first offending element is reported by index.
pub fn ln_all(values: &[f64], stage: Stage, what: &str) -> Result<Vec<f64>, FitError> {
    ensure_positive(values, stage, what)?;
    Ok(values.iter().map(|v| v.ln()).collect())
}

/// Check that every value could go through a log transform, without computing it.
pub fn ensure_positive(values: &[f64], stage: Stage, what: &str) -> Result<(), FitError> {
    match values.iter().position(|&v| !is_log_safe(v)) {
        None => Ok(()),
        Some(i) => Err(FitError::invalid_input(
            stage,
            format!("{what}[{i}] must be finite and > 0 for a log transform, got {}", values[i]),
        )),
    }
}

/// `ln(v + shift)` elementwise (the Mandelbrot rank transform).
pub fn ln_shifted(values: &[f64], shift: f64, stage: Stage, what: &str) -> Result<Vec<f64>, FitError> {
    if let Some(i) = values.iter().position(|&v| !is_log_safe(v + shift)) {
        return Err(FitError::invalid_input(
            stage,
            format!(
                "{what}[{i}] + {shift} must be finite and > 0 for a log transform, got {}",
                values[i] + shift
            ),
        ));
    }
    Ok(values.iter().map(|&v| (v + shift).ln()).collect())
}

fn is_log_safe(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

/// True when a sum of squared deviations is indistinguishable from rounding noise.
///
/// `scale` is the sum of squares of the raw values. Identical inputs leave
/// deviations of a few ulps each, far below `EPSILON * scale`.
pub fn is_negligible_variance(ss: f64, scale: f64) -> bool {
    ss <= f64::EPSILON * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ln_all_rejects_zero_and_negative() {
        assert!(ln_all(&[1.0, 2.0], Stage::ZipfFit, "rank").is_ok());

        let err = ln_all(&[1.0, 0.0], Stage::ZipfFit, "freq").unwrap_err();
        match err {
            FitError::InvalidInput { stage, message } => {
                assert_eq!(stage, Stage::ZipfFit);
                assert!(message.contains("freq[1]"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(ln_all(&[-3.0], Stage::Score, "predicted").is_err());
        assert!(ln_all(&[f64::NAN], Stage::Score, "predicted").is_err());
    }

    #[test]
    fn ln_shifted_adds_before_log() {
        let v = ln_shifted(&[1.0, 3.0], 1.0, Stage::MandelbrotFit, "rank").unwrap();
        assert!((v[0] - 2f64.ln()).abs() < 1e-15);
        assert!((v[1] - 4f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn ln_shifted_names_the_offending_element() {
        let err = ln_shifted(&[3.0, 2.0, -1.5, -4.0], 1.0, Stage::MandelbrotFit, "rank").unwrap_err();
        match err {
            FitError::InvalidInput { stage, message } => {
                assert_eq!(stage, Stage::MandelbrotFit);
                assert!(message.starts_with("rank[2] + 1 "), "{message}");
                assert!(message.ends_with("got -0.5"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn negligible_variance_threshold() {
        assert!(is_negligible_variance(0.0, 0.0));
        assert!(is_negligible_variance(1e-30, 10.0));
        assert!(!is_negligible_variance(1e-6, 10.0));
    }
}
