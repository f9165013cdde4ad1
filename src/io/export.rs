//! Export per-rank results to CSV.
//!
//! One row per fitted sample with the observed frequency next to each law's
//! prediction, easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::domain::{ModelKind, WordRow};
use crate::error::AppError;
use crate::fit::FitSummary;

/// Write per-rank results to a CSV file.
///
/// `rows` must be the fitted rows (positive frequency, input order) so they line
/// up with the predicted curves.
pub fn write_results_csv(path: &Path, rows: &[&WordRow], summary: &FitSummary) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["rank", "word", "frequency", "zipf_pred", "mandelbrot_pred"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let zipf = summary.get(ModelKind::Zipf).map(|f| f.predicted.as_slice());
    let mand = summary.get(ModelKind::Mandelbrot).map(|f| f.predicted.as_slice());

    for (i, row) in rows.iter().enumerate() {
        let pred = |curve: Option<&[f64]>| {
            curve
                .and_then(|c| c.get(i))
                .map(|v| format!("{v:.10}"))
                .unwrap_or_default()
        };
        writer
            .write_record([
                format!("{}", row.rank),
                row.word.clone(),
                format!("{}", row.frequency),
                pred(zipf),
                pred(mand),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
