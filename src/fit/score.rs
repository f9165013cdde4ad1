//! Goodness of fit: R² in log space.
//!
//! ```text
//! R² = 1 - Σ(ln f - ln f̂)² / Σ(ln f - mean(ln f))²
//! ```
//!
//! Computed on logs, so a point that is off by 2× counts the same at rank 1 and
//! at rank 10 000. There is no lower bound; a bad fit can score far below 0.

use nalgebra::DVector;

use crate::error::{FitError, Stage};
use crate::math::{is_negligible_variance, ln_all};

/// R² of `predicted` against observed `freqs`, both in log space.
pub fn r2_log_space(freqs: &[f64], predicted: &[f64]) -> Result<f64, FitError> {
    if freqs.len() != predicted.len() {
        return Err(FitError::invalid_input(
            Stage::Score,
            format!(
                "frequencies and predictions differ in length ({} vs {})",
                freqs.len(),
                predicted.len()
            ),
        ));
    }
    if freqs.is_empty() {
        return Err(FitError::degenerate(Stage::Score, "no samples to score"));
    }

    let y = DVector::from_vec(ln_all(freqs, Stage::Score, "frequency")?);
    let y_hat = DVector::from_vec(ln_all(predicted, Stage::Score, "predicted")?);

    let ss_res = (&y - &y_hat).norm_squared();
    let ss_tot = y.add_scalar(-y.mean()).norm_squared();
    if is_negligible_variance(ss_tot, y.norm_squared()) {
        return Err(FitError::degenerate(
            Stage::Score,
            "observed frequencies have zero variance",
        ));
    }

    Ok(1.0 - ss_res / ss_tot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction_scores_one() {
        let freqs = [100.0, 50.0, 25.0, 12.5];
        let r2 = r2_log_space(&freqs, &freqs).unwrap();
        assert_eq!(r2, 1.0);
    }

    #[test]
    fn mean_prediction_scores_zero() {
        // ln f = [0, 2]; predicting the geometric mean e^1 everywhere gives R² = 0.
        let freqs = [1.0, std::f64::consts::E.powi(2)];
        let predicted = [std::f64::consts::E, std::f64::consts::E];
        let r2 = r2_log_space(&freqs, &predicted).unwrap();
        assert!(r2.abs() < 1e-12, "r2={r2}");
    }

    #[test]
    fn poor_fit_goes_negative() {
        let freqs = [100.0, 10.0, 1.0];
        let predicted = [1.0, 10.0, 100.0];
        let r2 = r2_log_space(&freqs, &predicted).unwrap();
        assert!((r2 - -3.0).abs() < 1e-12, "r2={r2}");
    }

    #[test]
    fn constant_frequencies_are_degenerate() {
        assert!(matches!(
            r2_log_space(&[7.0, 7.0, 7.0], &[6.0, 7.0, 8.0]),
            Err(FitError::DegenerateInput { stage: Stage::Score, .. })
        ));
        assert!(matches!(
            r2_log_space(&[1.0, 1.0], &[1.0, 1.0]),
            Err(FitError::DegenerateInput { .. })
        ));
    }

    #[test]
    fn non_positive_prediction_is_invalid() {
        assert!(matches!(
            r2_log_space(&[10.0, 5.0], &[10.0, 0.0]),
            Err(FitError::InvalidInput { stage: Stage::Score, .. })
        ));
        assert!(matches!(
            r2_log_space(&[10.0, 5.0], &[10.0]),
            Err(FitError::InvalidInput { .. })
        ));
    }
}
