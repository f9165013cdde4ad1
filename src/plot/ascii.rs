//! ASCII plotting for terminal output (log-log axes).
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed samples: `o`
//! - Zipf curve: `-`
//! - Mandelbrot curve: `~`

use crate::domain::{FitFile, ModelKind, ModelResult, RankFrequency};
use crate::models::predict_ln;

/// Render a log-log plot of the samples with every fitted curve overlaid.
pub fn render_ascii_plot(samples: &[RankFrequency], fits: &[ModelResult], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let points: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| s.rank > 0.0 && s.frequency > 0.0)
        .map(|s| (s.rank.ln(), s.frequency.ln()))
        .collect();

    let Some((x_min, x_max)) = x_range(&points) else {
        return "Plot: not enough distinct ranks to draw.\n".to_string();
    };

    let curves: Vec<(char, Vec<(f64, f64)>)> = fits
        .iter()
        .map(|fit| (curve_char(fit.kind), sample_curve(fit, x_min, x_max, width)))
        .collect();

    let (y_min, y_max) = y_range(&points, &curves).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay).
    for (ch, curve) in &curves {
        draw_curve(&mut grid, curve, *ch, x_min, x_max, y_min, y_max);
    }

    for &(x, y) in &points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    // Build final string. We include a small header with ranges (unlogged units).
    let mut out = String::new();
    out.push_str(&format!(
        "Plot (log-log): rank=[{:.0}, {:.0}] | freq=[{:.3e}, {:.3e}]\n",
        x_min.exp(),
        x_max.exp(),
        y_min.exp(),
        y_max.exp()
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let mut legend = vec!["o observed".to_string()];
    for fit in fits {
        legend.push(format!("{} {}", curve_char(fit.kind), fit.kind.display_name()));
    }
    out.push_str(&legend.join("  "));
    out.push('\n');

    out
}

/// Render a plot from a saved fit JSON file.
pub fn render_ascii_plot_from_fit_file(fit_file: &FitFile, width: usize, height: usize) -> String {
    render_ascii_plot(&fit_file.observed, &fit_file.fits, width, height)
}

fn curve_char(kind: ModelKind) -> char {
    match kind {
        ModelKind::Zipf => '-',
        ModelKind::Mandelbrot => '~',
    }
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

/// Sample `ln f` at `n` log-uniform ranks across the plotted range.
fn sample_curve(fit: &ModelResult, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x_min + u * (x_max - x_min);
        let y = predict_ln(&fit.law, x.exp());
        if y.is_finite() {
            out.push((x, y));
        }
    }
    out
}

fn y_range(points: &[(f64, f64)], curves: &[(char, Vec<(f64, f64)>)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let all = points.iter().chain(curves.iter().flat_map(|(_, c)| c.iter()));
    for &(_, y) in all {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish). Only fills empty cells.
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
