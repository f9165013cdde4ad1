//! SVG chart of the observed rank/frequency data and the fitted laws.
//!
//! Both axes are logarithmic, so a pure Zipf law shows up as a straight line and
//! the Mandelbrot shift appears as the flattening at low ranks.

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::domain::{ModelKind, ModelResult, RankFrequency};
use crate::error::AppError;
use crate::models::predict;

/// Number of log-uniform ranks used to draw each fitted curve.
const CURVE_POINTS: usize = 400;

/// Render the chart to an SVG file.
pub fn write_svg_chart(
    path: &Path,
    samples: &[RankFrequency],
    fits: &[ModelResult],
    size: (u32, u32),
) -> Result<(), AppError> {
    draw_chart(path, samples, fits, size)
        .map_err(|e| AppError::new(2, format!("Failed to write chart '{}': {e}", path.display())))
}

fn draw_chart(
    path: &Path,
    samples: &[RankFrequency],
    fits: &[ModelResult],
    size: (u32, u32),
) -> Result<(), Box<dyn Error>> {
    let points: Vec<(f64, f64)> = samples
        .iter()
        .filter(|s| s.rank > 0.0 && s.frequency > 0.0)
        .map(|s| (s.rank, s.frequency))
        .collect();

    let (x0, x1) = bounds(points.iter().map(|p| p.0)).ok_or("no positive samples to plot")?;

    let curves: Vec<(&ModelResult, Vec<(f64, f64)>)> = fits
        .iter()
        .map(|fit| (fit, curve_points(fit, x0, x1)))
        .collect();

    let all_y = points
        .iter()
        .map(|p| p.1)
        .chain(curves.iter().flat_map(|(_, c)| c.iter().map(|p| p.1)));
    let (y0, y1) = bounds(all_y).ok_or("no positive frequencies to plot")?;

    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Zipf vs Mandelbrot (log-log)", ("sans-serif", 22))
        .margin(12)
        .set_label_area_size(LabelAreaPosition::Left, 70)
        .set_label_area_size(LabelAreaPosition::Bottom, 45)
        .build_cartesian_2d((x0..x1).log_scale(), (y0..y1).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Rank (log)")
        .y_desc("Frequency (log)")
        .x_labels(8)
        .y_labels(8)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.1e}"))
        .draw()?;

    let points_color = RGBColor(60, 60, 60);
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 2, points_color.filled())))?
        .label("Observed")
        .legend(move |(x, y)| Circle::new((x + 10, y), 3, points_color.filled()));

    for (fit, curve) in &curves {
        let color = series_color(fit.kind);
        chart
            .draw_series(LineSeries::new(curve.iter().copied(), color.stroke_width(2)))?
            .label(legend_label(fit))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn series_color(kind: ModelKind) -> RGBColor {
    match kind {
        ModelKind::Zipf => RGBColor(220, 50, 47),
        ModelKind::Mandelbrot => RGBColor(38, 139, 210),
    }
}

fn legend_label(fit: &ModelResult) -> String {
    match fit.kind {
        ModelKind::Zipf => format!("Zipf (a={:.3}, R²={:.3})", fit.law.a, fit.r2),
        ModelKind::Mandelbrot => format!(
            "Mandelbrot (a={:.3}, B={:.2}, R²={:.3})",
            fit.law.a, fit.law.b, fit.r2
        ),
    }
}

fn curve_points(fit: &ModelResult, x0: f64, x1: f64) -> Vec<(f64, f64)> {
    let (l0, l1) = (x0.ln(), x1.ln());
    (0..CURVE_POINTS)
        .map(|i| {
            let u = i as f64 / (CURVE_POINTS as f64 - 1.0);
            (l0 + u * (l1 - l0)).exp()
        })
        .map(|r| (r, predict(&fit.law, r)))
        .filter(|&(_, f)| f.is_finite() && f > 0.0)
        .collect()
}

/// Positive bounds for a log axis, widened slightly so markers are not clipped.
fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.filter(|v| v.is_finite() && *v > 0.0) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    if hi <= lo {
        return Some((lo / 2.0, hi * 2.0));
    }
    Some((lo / 1.1, hi * 1.1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PowerLaw;

    fn samples() -> Vec<RankFrequency> {
        (1..=30)
            .map(|r| RankFrequency {
                rank: r as f64,
                frequency: 500.0 / (r as f64 + 2.0).powf(1.1),
            })
            .collect()
    }

    #[test]
    fn writes_svg_with_legend() {
        let fit = ModelResult {
            kind: ModelKind::Mandelbrot,
            law: PowerLaw { c: 500.0, a: 1.1, b: 2.0 },
            r2: 1.0,
            log_sse: 0.0,
            predicted: Vec::new(),
            on_grid_boundary: false,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        write_svg_chart(&path, &samples(), &[fit], (640, 480)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Mandelbrot (a=1.100, B=2.00"));
        assert!(svg.contains("Observed"));
    }

    #[test]
    fn empty_samples_fail_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let err = write_svg_chart(&path, &[], &[], (640, 480)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn curve_points_span_rank_range() {
        let fit = ModelResult {
            kind: ModelKind::Zipf,
            law: PowerLaw { c: 10.0, a: 1.0, b: 0.0 },
            r2: 1.0,
            log_sse: 0.0,
            predicted: Vec::new(),
            on_grid_boundary: false,
        };
        let pts = curve_points(&fit, 1.0, 100.0);
        assert_eq!(pts.len(), CURVE_POINTS);
        assert!((pts[0].0 - 1.0).abs() < 1e-12);
        assert!((pts[CURVE_POINTS - 1].0 - 100.0).abs() < 1e-9);
        assert!((pts[0].1 - 10.0).abs() < 1e-12);
    }
}
