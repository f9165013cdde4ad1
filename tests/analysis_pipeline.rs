use std::fs;
use std::path::Path;

use zipf_fit::app::pipeline::{CHART_FILE, REPORT_FILE, run_analysis, write_artifacts};
use zipf_fit::data::{SynthSpec, generate_sample, write_sample_csv};
use zipf_fit::domain::{AnalysisConfig, ModelKind, ShiftGrid};
use zipf_fit::io::fit_file::read_fit_json;
use zipf_fit::plot::render_ascii_plot_from_fit_file;

fn synth_csv(dir: &Path, spec: &SynthSpec) -> std::path::PathBuf {
    let path = dir.join("freq.csv");
    let rows = generate_sample(spec).unwrap();
    write_sample_csv(&path, &rows).unwrap();
    path
}

fn config(input: &Path, out_dir: &Path) -> AnalysisConfig {
    AnalysisConfig {
        grid: ShiftGrid {
            b_min: 0.0,
            b_max: 20.0,
            b_steps: 41,
        },
        out_dir: out_dir.to_path_buf(),
        ..AnalysisConfig::with_input(input)
    }
}

#[test]
fn mandelbrot_corpus_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let spec = SynthSpec {
        n: 300,
        c: 5.0e4,
        a: 1.1,
        b: 5.0,
        ..SynthSpec::default()
    };
    let input = synth_csv(dir.path(), &spec);
    let out_dir = dir.path().join("results");

    let mut cfg = config(&input, &out_dir);
    cfg.export_json = Some(dir.path().join("fit.json"));
    cfg.export_csv = Some(dir.path().join("preds.csv"));

    let run = run_analysis(&cfg).unwrap();
    assert_eq!(run.corpus.stats.n_samples, 300);

    let zipf = run.summary.get(ModelKind::Zipf).unwrap();
    let mand = run.summary.get(ModelKind::Mandelbrot).unwrap();
    assert!((mand.law.b - 5.0).abs() < 1e-9, "B = {}", mand.law.b);
    assert!((mand.law.a - 1.1).abs() < 1e-6, "a = {}", mand.law.a);
    assert!((mand.law.c / 5.0e4 - 1.0).abs() < 1e-6, "C = {}", mand.law.c);
    assert!(mand.r2 > 0.999_999);
    assert!(zipf.r2 < mand.r2);
    assert!(!mand.on_grid_boundary);

    let artifacts = write_artifacts(&cfg, &run).unwrap();
    assert_eq!(artifacts.report, Some(out_dir.join(REPORT_FILE)));
    assert_eq!(artifacts.chart, Some(out_dir.join(CHART_FILE)));

    let report = fs::read_to_string(out_dir.join(REPORT_FILE)).unwrap();
    assert!(report.starts_with("=== ZIPF / MANDELBROT ANALYSIS ===\n"));
    assert!(report.contains("Unique words used: 300\n"));
    assert!(report.contains("MANDELBROT: f = C / (r + B)^a\n"));
    assert!(report.contains("  B = 5.000000\n"));
    assert!(report.contains("Top-20 words:\n"));

    let svg = fs::read_to_string(out_dir.join(CHART_FILE)).unwrap();
    assert!(svg.contains("<svg"));

    let preds = fs::read_to_string(dir.path().join("preds.csv")).unwrap();
    let mut lines = preds.lines();
    assert_eq!(lines.next(), Some("rank,word,frequency,zipf_pred,mandelbrot_pred"));
    assert_eq!(lines.count(), 300);

    let fit_file = read_fit_json(&dir.path().join("fit.json")).unwrap();
    assert_eq!(fit_file.fits.len(), 2);
    assert_eq!(fit_file.grid, Some(cfg.grid));
    let plot = render_ascii_plot_from_fit_file(&fit_file, 60, 15);
    assert!(plot.ends_with("o observed  - Zipf  ~ Mandelbrot\n"));
}

#[test]
fn zipf_only_run_with_row_cap() {
    let dir = tempfile::tempdir().unwrap();
    let spec = SynthSpec {
        n: 2000,
        c: 1.0e5,
        a: 0.95,
        b: 0.0,
        noise: 0.05,
        seed: 11,
        round: true,
    };
    let input = synth_csv(dir.path(), &spec);

    let mut cfg = config(&input, &dir.path().join("out"));
    cfg.use_all_points = false;
    cfg.fit_mandelbrot = false;
    cfg.chart = false;

    let run = run_analysis(&cfg).unwrap();
    assert_eq!(run.corpus.rows.len(), 1000);
    assert_eq!(run.summary.fits.len(), 1);
    assert_eq!(run.summary.skipped.len(), 1);

    let zipf = run.summary.get(ModelKind::Zipf).unwrap();
    assert!((zipf.law.a - 0.95).abs() < 0.05, "a = {}", zipf.law.a);
    assert!(zipf.r2 > 0.95);

    let artifacts = write_artifacts(&cfg, &run).unwrap();
    assert!(artifacts.chart.is_none());
    let report = fs::read_to_string(artifacts.report.unwrap()).unwrap();
    assert!(report.contains("ZIPF (generalized): f = C / r^a\n"));
    assert!(!report.contains("MANDELBROT"));
}

#[test]
fn missing_input_exits_with_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(&dir.path().join("nope.csv"), dir.path());
    let err = run_analysis(&cfg).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.to_string().contains("not found"));
}

#[test]
fn bad_grid_only_fails_the_mandelbrot_fit() {
    let dir = tempfile::tempdir().unwrap();
    let spec = SynthSpec {
        n: 50,
        c: 1.0e3,
        a: 1.0,
        b: 0.0,
        ..SynthSpec::default()
    };
    let input = synth_csv(dir.path(), &spec);

    let mut cfg = config(&input, &dir.path().join("out"));
    cfg.chart = false;
    cfg.grid = ShiftGrid {
        b_min: 10.0,
        b_max: 1.0,
        b_steps: 5,
    };

    let run = run_analysis(&cfg).unwrap();
    assert_eq!(run.summary.fits.len(), 1);
    assert!(run.summary.get(ModelKind::Zipf).is_some());
    assert_eq!(run.summary.failed.len(), 1);
    assert_eq!(run.summary.failed[0].0, ModelKind::Mandelbrot);
    assert_eq!(run.summary.failed[0].1.exit_code(), 2);

    let artifacts = write_artifacts(&cfg, &run).unwrap();
    let report = fs::read_to_string(artifacts.report.unwrap()).unwrap();
    assert!(report.contains("MANDELBROT: f = C / (r + B)^a\n  FAILED: Invalid configuration"));
}

#[test]
fn single_usable_row_is_degenerate() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("one.csv");
    fs::write(&input, "Rank,Frequency,Word\n1,10,the\n2,0,of\n").unwrap();

    let err = run_analysis(&config(&input, dir.path())).unwrap_err();
    assert_eq!(err.exit_code(), 3);
}
