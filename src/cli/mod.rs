//! Command-line parsing for the Zipf / Mandelbrot fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_TOP_N, ShiftGrid};

/// Environment variable naming the default input CSV.
pub const INPUT_ENV: &str = "ZIPF_INPUT";

/// Input used when neither the argument nor `ZIPF_INPUT` is given.
pub const DEFAULT_INPUT: &str = "results/frequencies.csv";

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "zipf", version, about = "Zipf / Mandelbrot fitter for rank-frequency tables")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit both laws to a rank/frequency CSV, print diagnostics, and write the report + chart.
    Analyze(AnalyzeArgs),
    /// Generate a synthetic rank/frequency CSV from known parameters.
    Synth(SynthArgs),
    /// Plot a previously exported fit JSON.
    Plot(PlotArgs),
}

/// Options for `zipf analyze`.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Rank/frequency CSV (`Rank,Frequency,Word`). Defaults to `$ZIPF_INPUT`.
    #[arg(value_name = "CSV")]
    pub input: Option<PathBuf>,

    /// Analyze only the first 1000 rows.
    #[arg(long)]
    pub top_only: bool,

    /// Analyze at most N rows (ignored with `--top-only`).
    #[arg(long, value_name = "N")]
    pub max_points: Option<usize>,

    /// Skip the Mandelbrot search.
    #[arg(long)]
    pub no_mandelbrot: bool,

    /// Smallest shift B tried by the Mandelbrot search.
    #[arg(long, default_value_t = ShiftGrid::default().b_min)]
    pub b_min: f64,

    /// Largest shift B tried by the Mandelbrot search.
    #[arg(long, default_value_t = ShiftGrid::default().b_max)]
    pub b_max: f64,

    /// Number of evenly spaced B values between `--b-min` and `--b-max`.
    #[arg(long, default_value_t = ShiftGrid::default().b_steps)]
    pub b_steps: usize,

    /// Directory for the text report and SVG chart.
    #[arg(long, default_value = "results")]
    pub out_dir: PathBuf,

    /// Rows shown in the top-N word table.
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Do not write the SVG chart.
    #[arg(long)]
    pub no_chart: bool,

    /// Export fit parameters, scores and observed samples to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export per-row predictions to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_csv: Option<PathBuf>,

    /// Verbose logging (debug level for this crate).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options for `zipf synth`.
#[derive(Debug, Parser, Clone)]
pub struct SynthArgs {
    /// Output CSV path.
    #[arg(short, long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of ranks to generate.
    #[arg(short = 'n', long, default_value_t = 5000)]
    pub count: usize,

    /// Scale constant C.
    #[arg(long, default_value_t = 1.0e6)]
    pub c: f64,

    /// Exponent a.
    #[arg(long, default_value_t = 1.05)]
    pub a: f64,

    /// Rank shift B (0 gives a pure Zipf law).
    #[arg(long, default_value_t = 2.7)]
    pub b: f64,

    /// Standard deviation of multiplicative log-normal noise.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Round frequencies to whole counts.
    #[arg(long)]
    pub round: bool,

    /// Verbose logging (debug level for this crate).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Options for plotting a saved fit.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Fit JSON file produced by `zipf analyze --export-json`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn analyze_defaults() {
        let cli = Cli::parse_from(["zipf", "analyze", "freq.csv"]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, Some(PathBuf::from("freq.csv")));
        assert_eq!(args.b_min, 0.0);
        assert_eq!(args.b_max, 2000.0);
        assert_eq!(args.b_steps, 250);
        assert_eq!(args.top, 20);
        assert_eq!(args.out_dir, PathBuf::from("results"));
        assert!(!args.top_only && !args.no_mandelbrot && !args.no_chart);
    }

    #[test]
    fn analyze_grid_flags() {
        let cli = Cli::parse_from([
            "zipf", "analyze", "--b-min", "1", "--b-max", "50", "--b-steps", "99", "--top-only",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.input, None);
        assert_eq!((args.b_min, args.b_max, args.b_steps), (1.0, 50.0, 99));
        assert!(args.top_only);
    }
}
