//! Score-curve panels: mean lines with one-standard-deviation bands

use crate::error::Result;
use crate::model_selection::CurveSummary;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Score axis used by every curve panel
pub const SCORE_RANGE: Range<f64> = -0.05..1.05;

/// Training curve colour (`r`)
pub const TRAIN_COLOR: RGBColor = RGBColor(255, 0, 0);
/// Held-out curve colour (`g`)
pub const TEST_COLOR: RGBColor = RGBColor(0, 128, 0);

const BAND_ALPHA: f64 = 0.15;

/// Corner a panel legend is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPosition {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl LegendPosition {
    fn to_series_label_position(self) -> SeriesLabelPosition {
        match self {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        }
    }
}

/// One summarised curve on a panel
pub struct ScoreSeries<'a> {
    pub label: &'a str,
    pub color: RGBColor,
    pub x: Vec<f64>,
    pub summary: &'a CurveSummary,
}

/// Everything needed to draw one score panel
pub struct ScorePanel<'a> {
    pub title: String,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
    pub series: Vec<ScoreSeries<'a>>,
    pub legend: Option<LegendPosition>,
}

/// Draw a panel: for each series a shaded band, a mean line and circle markers.
///
/// Positions whose mean or std is not finite are left out.
pub fn draw_score_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &ScorePanel<'_>,
) -> Result<()> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 16))
        .margin(8)
        .x_label_area_size(36)
        .y_label_area_size(44)
        .build_cartesian_2d(panel.x_range.clone(), panel.y_range.clone())?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .draw()?;

    for series in &panel.series {
        let lower = series.summary.lower();
        let upper = series.summary.upper();
        let points: Vec<(f64, f64, f64, f64)> = series
            .x
            .iter()
            .zip(series.summary.mean.iter())
            .zip(lower.iter().zip(upper.iter()))
            .map(|((&x, &m), (&lo, &hi))| (x, m, lo, hi))
            .filter(|(x, m, lo, hi)| x.is_finite() && m.is_finite() && lo.is_finite() && hi.is_finite())
            .collect();

        if points.len() >= 2 {
            let mut band: Vec<(f64, f64)> = points.iter().map(|&(x, _, _, hi)| (x, hi)).collect();
            band.extend(points.iter().rev().map(|&(x, _, lo, _)| (x, lo)));
            chart.draw_series(std::iter::once(Polygon::new(
                band,
                series.color.mix(BAND_ALPHA).filled(),
            )))?;
        }

        let color = series.color;
        chart
            .draw_series(LineSeries::new(
                points.iter().map(|&(x, m, _, _)| (x, m)),
                color.stroke_width(2),
            ))?
            .label(series.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));

        chart.draw_series(
            points
                .iter()
                .map(|&(x, m, _, _)| Circle::new((x, m), 3, color.filled())),
        )?;
    }

    if let Some(position) = panel.legend {
        chart
            .configure_series_labels()
            .position(position.to_series_label_position())
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}
