//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the rank/frequency table
//! - runs both fits
//! - prints reports/plots
//! - writes the report, chart and optional exports

use std::path::PathBuf;

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command, DEFAULT_INPUT, INPUT_ENV, PlotArgs, SynthArgs};
use crate::data::{SynthSpec, generate_sample, write_sample_csv};
use crate::domain::{AnalysisConfig, ShiftGrid};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `zipf` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    // We want `zipf` and `zipf data.csv` to behave like `zipf analyze ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Synth(args) => handle_synth(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<(), AppError> {
    crate::logging::init_logger(args.verbose);

    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.corpus, &run.summary, &config)
    );

    println!("Top-{} words:", config.top_n.min(run.corpus.rows.len()));
    println!("{}", crate::report::format_top_table(&run.corpus.rows, config.top_n));

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.corpus.samples,
            &run.summary.fits,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    let artifacts = pipeline::write_artifacts(&config, &run)?;
    for path in [&artifacts.report, &artifacts.chart, &artifacts.json, &artifacts.csv]
        .into_iter()
        .flatten()
    {
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_synth(args: SynthArgs) -> Result<(), AppError> {
    crate::logging::init_logger(args.verbose);

    let spec = SynthSpec {
        n: args.count,
        c: args.c,
        a: args.a,
        b: args.b,
        noise: args.noise,
        seed: args.seed,
        round: args.round,
    };
    let rows = generate_sample(&spec)?;
    write_sample_csv(&args.out, &rows)?;

    println!("Wrote {} rows to {}", rows.len(), args.out.display());
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let fit_file = crate::io::fit_file::read_fit_json(&args.fit)?;
    let plot = crate::plot::render_ascii_plot_from_fit_file(&fit_file, args.width, args.height);

    println!("{plot}");
    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    let input = args.input.clone().unwrap_or_else(default_input);
    AnalysisConfig {
        input,
        use_all_points: !args.top_only,
        max_points: args.max_points,
        fit_mandelbrot: !args.no_mandelbrot,
        grid: ShiftGrid {
            b_min: args.b_min,
            b_max: args.b_max,
            b_steps: args.b_steps,
        },
        out_dir: args.out_dir.clone(),
        top_n: args.top,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        chart: !args.no_chart,
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
    }
}

fn default_input() -> PathBuf {
    std::env::var_os(INPUT_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

/// Rewrite argv so `zipf` defaults to `zipf analyze`.
///
/// Rules:
/// - `zipf`                      -> `zipf analyze`
/// - `zipf data.csv ...`         -> `zipf analyze data.csv ...`
/// - `zipf --top-only ...`       -> `zipf analyze --top-only ...`
/// - `zipf --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("analyze".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "synth" | "plot");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs_analyze() {
        assert_eq!(rewrite_args(argv(&["zipf"])), argv(&["zipf", "analyze"]));
        assert_eq!(
            rewrite_args(argv(&["zipf", "data.csv", "--top-only"])),
            argv(&["zipf", "analyze", "data.csv", "--top-only"])
        );
        assert_eq!(
            rewrite_args(argv(&["zipf", "--no-mandelbrot"])),
            argv(&["zipf", "analyze", "--no-mandelbrot"])
        );
    }

    #[test]
    fn subcommands_and_help_untouched() {
        for args in [
            argv(&["zipf", "synth", "-o", "x.csv"]),
            argv(&["zipf", "plot", "--fit", "f.json"]),
            argv(&["zipf", "--help"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn config_from_flags() {
        let cli = crate::cli::Cli::parse_from(argv(&[
            "zipf", "analyze", "f.csv", "--top-only", "--no-mandelbrot", "--no-plot", "--b-steps", "10",
        ]));
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        let config = analysis_config_from_args(&args);
        assert_eq!(config.input, PathBuf::from("f.csv"));
        assert!(!config.use_all_points);
        assert_eq!(config.row_limit(), Some(crate::domain::TOP_ONLY_ROWS));
        assert!(!config.fit_mandelbrot);
        assert!(!config.plot);
        assert!(config.chart);
        assert_eq!(config.grid.b_steps, 10);
    }
}
