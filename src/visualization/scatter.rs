//! Scatter panels with an optional fitted line

use crate::error::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Point marker colour (`C0`)
pub const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);
/// Fit line colour (`C1`)
pub const FIT_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Data of one scatter subplot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPanel {
    /// Column name; used as panel title and x label
    pub feature: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Fitted line sampled at the distinct x values, ascending
    pub fit_line: Option<Vec<(f64, f64)>>,
}

/// `[min, max]` of the finite values, padded by 5% on each side
pub fn padded_range<'a>(values: impl IntoIterator<Item = &'a f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

/// Draw one scatter panel onto `area`
pub fn draw_scatter_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ScatterPanel,
    y_label: &str,
) -> Result<()> {
    let x_range = padded_range(&panel.x);
    let y_range = padded_range(
        panel
            .y
            .iter()
            .chain(panel.fit_line.iter().flatten().map(|(_, y)| y)),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.feature, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(panel.feature.as_str())
        .y_desc(y_label)
        .draw()?;

    chart.draw_series(
        panel
            .x
            .iter()
            .zip(panel.y.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| Circle::new((x, y), 3, POINT_COLOR.filled())),
    )?;

    if let Some(line) = &panel.fit_line {
        chart.draw_series(LineSeries::new(
            line.iter().copied().filter(|(x, y)| x.is_finite() && y.is_finite()),
            FIT_COLOR.stroke_width(2),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_range() {
        let range = padded_range(&[0.0, 10.0, f64::NAN]);
        assert!((range.start + 0.5).abs() < 1e-12);
        assert!((range.end - 10.5).abs() < 1e-12);

        let flat = padded_range(&[3.0, 3.0]);
        assert_eq!(flat, 2.5..3.5);

        assert_eq!(padded_range(&[]), 0.0..1.0);
    }
}
