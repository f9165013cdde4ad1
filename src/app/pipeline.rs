//! Shared "analysis pipeline" logic used by the CLI and the integration tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> Zipf fit -> Mandelbrot search -> R² -> report/chart/exports
//!
//! The CLI can then focus on presentation (printing to the terminal).

use std::fs;
use std::path::PathBuf;

use crate::domain::{AnalysisConfig, WordRow};
use crate::error::AppError;
use crate::fit::{FitOptions, FitSummary, fit_all};
use crate::io::ingest::{Corpus, load_corpus};

/// Text report file name inside the output directory.
pub const REPORT_FILE: &str = "zipf_analysis.txt";

/// Chart file name inside the output directory.
pub const CHART_FILE: &str = "zipf_mandelbrot.svg";

/// All computed outputs of a single `zipf analyze` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub corpus: Corpus,
    pub summary: FitSummary,
}

impl RunOutput {
    /// Rows that went into the fits, aligned with each law's `predicted` curve.
    pub fn fitted_rows(&self) -> Vec<&WordRow> {
        self.corpus.rows.iter().filter(|r| r.frequency > 0.0).collect()
    }
}

/// Files written by [`write_artifacts`].
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    pub report: Option<PathBuf>,
    pub chart: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

/// Execute ingest + fitting and return the computed outputs.
///
/// A run where one law fails (a bad data set or a malformed B grid) still
/// succeeds; it only fails when no law could be fitted at all (the first failure
/// is returned).
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let corpus = load_corpus(&config.input, config.row_limit())?;
    tracing::info!(
        input = %config.input.display(),
        rows = corpus.rows.len(),
        samples = corpus.stats.n_samples,
        "Loaded corpus"
    );

    let summary = fit_all(&corpus.samples, &FitOptions::from(config));
    if summary.fits.is_empty() {
        if let Some((_, err)) = summary.failed.first() {
            return Err(err.clone().into());
        }
    }

    Ok(RunOutput { corpus, summary })
}

/// Write the text report, the SVG chart and any requested exports.
pub fn write_artifacts(config: &AnalysisConfig, run: &RunOutput) -> Result<Artifacts, AppError> {
    let mut artifacts = Artifacts::default();

    fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create output directory '{}': {e}", config.out_dir.display()),
        )
    })?;

    let report_path = config.out_dir.join(REPORT_FILE);
    let report = crate::report::format_text_report(&run.corpus, &run.summary, config.top_n);
    crate::report::write_text_report(&report_path, &report)?;
    tracing::info!(path = %report_path.display(), "Wrote report");
    artifacts.report = Some(report_path);

    if config.chart {
        let chart_path = config.out_dir.join(CHART_FILE);
        crate::plot::write_svg_chart(&chart_path, &run.corpus.samples, &run.summary.fits, (1200, 800))?;
        tracing::info!(path = %chart_path.display(), "Wrote chart");
        artifacts.chart = Some(chart_path);
    }

    if let Some(path) = &config.export_json {
        let grid = config.fit_mandelbrot.then_some(config.grid);
        let doc = crate::io::fit_file::build_fit_file(&config.input, &run.corpus, &run.summary, grid);
        crate::io::fit_file::write_fit_json(path, &doc)?;
        artifacts.json = Some(path.clone());
    }

    if let Some(path) = &config.export_csv {
        crate::io::export::write_results_csv(path, &run.fitted_rows(), &run.summary)?;
        artifacts.csv = Some(path.clone());
    }

    Ok(artifacts)
}
