//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row cap applied when the analysis is restricted to the head of the table.
pub const TOP_ONLY_ROWS: usize = 1000;

/// Default number of rows in the report table.
pub const DEFAULT_TOP_N: usize = 20;

/// One (rank, frequency) observation fed to the fitters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankFrequency {
    pub rank: f64,
    pub frequency: f64,
}

/// A parsed input row, kept for reporting (the fitters never see `word`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRow {
    pub rank: f64,
    pub frequency: f64,
    pub word: String,
}

impl WordRow {
    pub fn sample(&self) -> RankFrequency {
        RankFrequency {
            rank: self.rank,
            frequency: self.frequency,
        }
    }
}

/// Split samples into the parallel `(ranks, freqs)` arrays the fitters consume.
pub fn split_samples(samples: &[RankFrequency]) -> (Vec<f64>, Vec<f64>) {
    samples.iter().map(|s| (s.rank, s.frequency)).unzip()
}

/// Which law a fit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Zipf,
    Mandelbrot,
}

impl ModelKind {
    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelKind::Zipf => "Zipf",
            ModelKind::Mandelbrot => "Mandelbrot",
        }
    }

    pub fn formula(self) -> &'static str {
        match self {
            ModelKind::Zipf => "f = C / r^a",
            ModelKind::Mandelbrot => "f = C / (r + B)^a",
        }
    }
}

/// Candidate grid for the Mandelbrot shift `B`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShiftGrid {
    pub b_min: f64,
    pub b_max: f64,
    pub b_steps: usize,
}

impl Default for ShiftGrid {
    fn default() -> Self {
        Self {
            b_min: 0.0,
            b_max: 2000.0,
            b_steps: 250,
        }
    }
}

/// Parameters of `f(r) = C / (r + B)^a`. Zipf is the `B = 0` case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLaw {
    pub c: f64,
    pub a: f64,
    pub b: f64,
}

/// Fit output for one law, ready for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResult {
    pub kind: ModelKind,
    pub law: PowerLaw,
    /// R² in log space.
    pub r2: f64,
    /// Sum of squared log-space residuals of the regression line.
    pub log_sse: f64,
    /// Predicted frequencies aligned with the fitted samples.
    pub predicted: Vec<f64>,
    /// True when the selected `B` sits on an edge of the search grid.
    #[serde(default)]
    pub on_grid_boundary: bool,
}

/// A fit that could not be produced, kept so partial runs still report it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFit {
    pub kind: ModelKind,
    pub message: String,
}

/// Summary stats about the samples actually used for fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub n_samples: usize,
    pub rank_min: f64,
    pub rank_max: f64,
    pub freq_min: f64,
    pub freq_max: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    /// When false, only the first `TOP_ONLY_ROWS` rows are analyzed.
    pub use_all_points: bool,
    /// Optional cap on rows, honored only when `use_all_points` is true.
    pub max_points: Option<usize>,
    pub fit_mandelbrot: bool,
    pub grid: ShiftGrid,

    pub out_dir: PathBuf,
    pub top_n: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Write the SVG chart into `out_dir`.
    pub chart: bool,

    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

impl AnalysisConfig {
    /// Row cap implied by `use_all_points` / `max_points`.
    pub fn row_limit(&self) -> Option<usize> {
        if self.use_all_points {
            self.max_points
        } else {
            Some(TOP_ONLY_ROWS)
        }
    }

    /// Defaults matching the CLI, reading from `input`.
    pub fn with_input(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            use_all_points: true,
            max_points: None,
            fit_mandelbrot: true,
            grid: ShiftGrid::default(),
            out_dir: PathBuf::from("results"),
            top_n: DEFAULT_TOP_N,
            plot: true,
            plot_width: 100,
            plot_height: 25,
            chart: true,
            export_json: None,
            export_csv: None,
        }
    }
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub stats: CorpusStats,
    pub grid: Option<ShiftGrid>,
    pub fits: Vec<ModelResult>,
    #[serde(default)]
    pub failures: Vec<FailedFit>,
    pub observed: Vec<RankFrequency>,
}
