//! Formatted terminal output and the text report.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{AnalysisConfig, ModelKind, ModelResult, WordRow};
use crate::fit::FitSummary;
use crate::io::ingest::Corpus;

/// Format the run summary (dataset stats + per-law diagnostics).
pub fn format_run_summary(corpus: &Corpus, summary: &FitSummary, config: &AnalysisConfig) -> String {
    let mut out = String::new();

    out.push_str("=== zipf - Zipf / Mandelbrot fit ===\n");
    out.push_str(&format!("Input: {}\n", config.input.display()));
    out.push_str(&format!(
        "Rows: read={} | skipped={} | dropped(freq<=0)={} | limit={}\n",
        corpus.rows_read,
        corpus.row_errors.len(),
        corpus.dropped_non_positive,
        match config.row_limit() {
            Some(n) => format!("first {n}"),
            None => "all".to_string(),
        },
    ));
    out.push_str(&format!(
        "Samples: n={} | rank=[{}, {}] | freq=[{}, {}]\n",
        corpus.stats.n_samples,
        corpus.stats.rank_min,
        corpus.stats.rank_max,
        corpus.stats.freq_min,
        corpus.stats.freq_max,
    ));

    out.push_str("\nModel diagnostics:\n");
    for fit in &summary.fits {
        out.push_str(&format!(
            "  {:<11} a={:.4} C={:.4e}{} R²={:.4} SSE(log)={:.4}\n",
            fit.kind.display_name(),
            fit.law.a,
            fit.law.c,
            match fit.kind {
                ModelKind::Zipf => String::new(),
                ModelKind::Mandelbrot => format!(" B={:.2}", fit.law.b),
            },
            fit.r2,
            fit.log_sse,
        ));
        if fit.on_grid_boundary {
            out.push_str("              (B is on the edge of the search grid)\n");
        }
    }
    for (kind, err) in &summary.failed {
        out.push_str(&format!("  (failed {}) {err}\n", kind.display_name()));
    }
    for (kind, reason) in &summary.skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", kind.display_name()));
    }

    out
}

/// Format the text report written next to the chart.
pub fn format_text_report(corpus: &Corpus, summary: &FitSummary, top_n: usize) -> String {
    let mut out = String::new();

    out.push_str("=== ZIPF / MANDELBROT ANALYSIS ===\n");
    out.push_str(&format!("Unique words used: {}\n", corpus.stats.n_samples));
    out.push_str(&format!("Top frequency: {}\n", corpus.stats.freq_max));
    if corpus.dropped_non_positive > 0 {
        out.push_str(&format!(
            "Rows dropped (frequency <= 0): {}\n",
            corpus.dropped_non_positive
        ));
    }
    out.push('\n');

    for kind in [ModelKind::Zipf, ModelKind::Mandelbrot] {
        if let Some(fit) = summary.get(kind) {
            out.push_str(&format_law_block(fit));
            out.push('\n');
        } else if let Some((_, err)) = summary.failed.iter().find(|(k, _)| *k == kind) {
            out.push_str(&format!("{}: {}\n", law_heading(kind), kind.formula()));
            out.push_str(&format!("  FAILED: {err}\n\n"));
        }
    }

    let shown = top_n.min(corpus.rows.len());
    out.push_str(&format!("Top-{shown} words:\n"));
    out.push_str(&format_top_table(&corpus.rows, top_n));

    out
}

fn law_heading(kind: ModelKind) -> &'static str {
    match kind {
        ModelKind::Zipf => "ZIPF (generalized)",
        ModelKind::Mandelbrot => "MANDELBROT",
    }
}

fn format_law_block(fit: &ModelResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}: {}\n", law_heading(fit.kind), fit.kind.formula()));
    out.push_str(&format!("  C = {:.6e}\n", fit.law.c));
    out.push_str(&format!("  a = {:.6}\n", fit.law.a));
    if fit.kind == ModelKind::Mandelbrot {
        out.push_str(&format!("  B = {:.6}\n", fit.law.b));
    }
    out.push_str(&format!("  R2 (log-space) = {:.6}\n", fit.r2));
    if fit.on_grid_boundary {
        out.push_str("  note: B is on the edge of the search grid; the optimum may lie outside it.\n");
    }
    out
}

/// Format the first `top_n` rows in input order.
pub fn format_top_table(rows: &[WordRow], top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8}{:<12}{}\n", "Rank", "Frequency", "Word"));
    out.push_str(&format!("{}\n", "-".repeat(60)));
    for row in rows.iter().take(top_n) {
        out.push_str(&format!("{:<8}{:<12}{}\n", row.rank, row.frequency, row.word));
    }
    out
}
