//! Exploratory scatter plots of each feature against the target

use crate::error::{KolosalError, Result};
use crate::utils::stats::{unique_sorted, LinearFit};
use crate::visualization::{draw_scatter_panel, FigureConfig, ScatterPanel};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::*;

/// Figure size used for a row of feature scatter plots
pub fn scatter_figure_config(output_path: impl Into<std::path::PathBuf>) -> FigureConfig {
    FigureConfig::new(output_path, 2500, 1000)
}

/// Values of a numeric column as f64.
///
/// Non-numeric columns, nulls and non-finite values are rejected.
fn numeric_values(series: &Series) -> Result<Vec<f64>> {
    if !series.dtype().is_primitive_numeric() {
        return Err(KolosalError::ShapeError {
            expected: "numeric column".to_string(),
            actual: format!("{} ({})", series.name(), series.dtype()),
        });
    }
    let cast = series
        .strict_cast(&DataType::Float64)
        .map_err(|e| KolosalError::ShapeError {
            expected: "numeric column".to_string(),
            actual: format!("{} ({})", series.name(), e),
        })?;
    if cast.null_count() > 0 {
        return Err(KolosalError::DataError(format!(
            "column {} has {} missing values",
            series.name(),
            cast.null_count()
        )));
    }

    cast.f64()?
        .into_iter()
        .map(|v| match v {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(KolosalError::DataError(format!(
                "column {} has non-finite values",
                series.name()
            ))),
        })
        .collect()
}

fn column_values(data: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = data
        .column(name)
        .map_err(|_| KolosalError::FeatureNotFound(name.to_string()))?;
    numeric_values(column.as_materialized_series())
}

/// One panel per column of `features`, in column order.
///
/// Column values are read from `data` by name. With `fit` enabled the
/// degree-1 least-squares line is evaluated only at the distinct x values of
/// the column, not on a dense grid.
pub fn scatter_panels(
    features: &DataFrame,
    target: &Series,
    data: &DataFrame,
    fit: bool,
) -> Result<Vec<ScatterPanel>> {
    let y = numeric_values(target)?;

    features
        .get_column_names()
        .into_iter()
        .map(|name| {
            let name = name.as_str();
            let x = column_values(data, name)?;
            if x.len() != y.len() {
                return Err(KolosalError::ShapeError {
                    expected: format!("{} rows in column {}", y.len(), name),
                    actual: format!("{} rows", x.len()),
                });
            }

            let fit_line = if fit {
                let line = LinearFit::fit(&x, &y)?;
                Some(
                    unique_sorted(&x)
                        .into_iter()
                        .map(|xi| (xi, line.eval(xi)))
                        .collect(),
                )
            } else {
                None
            };

            Ok(ScatterPanel {
                feature: name.to_string(),
                x,
                y: y.clone(),
                fit_line,
            })
        })
        .collect()
}

/// Draw a `1 × N` row of scatter plots, one per feature column, onto the
/// caller's drawing area.
///
/// The area is not presented; the caller decides whether and when the
/// figure is written.
pub fn plot_with_regression_line<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    features: &DataFrame,
    target: &Series,
    target_name: &str,
    data: &DataFrame,
    fit: bool,
) -> Result<()> {
    let panels = scatter_panels(features, target, data, fit)?;
    if panels.is_empty() {
        return Ok(());
    }

    let areas = area.split_evenly((1, panels.len()));
    for (panel, panel_area) in panels.iter().zip(areas.iter()) {
        draw_scatter_panel(panel_area, panel, target_name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn housing() -> (DataFrame, Series) {
        let data = df!(
            "RM" => &[6.0, 6.5, 7.0, 6.5, 5.5, 8.0],
            "LSTAT" => &[10.0, 5.0, 4.0, 7.0, 20.0, 3.0],
            "PTRATIO" => &[15.0, 17.0, 18.0, 15.0, 21.0, 14.0]
        )
        .unwrap();
        let target = Series::new("MEDV".into(), &[24.0, 28.0, 34.0, 27.0, 14.0, 45.0]);
        (data, target)
    }

    #[test]
    fn test_panels_follow_column_order() {
        let (data, target) = housing();
        let features = data.select(["LSTAT", "RM"]).unwrap();

        let panels = scatter_panels(&features, &target, &data, true).unwrap();
        let names: Vec<&str> = panels.iter().map(|p| p.feature.as_str()).collect();
        assert_eq!(names, vec!["LSTAT", "RM"]);
    }

    #[test]
    fn test_fit_line_sampled_at_unique_x() {
        let (data, target) = housing();
        let features = data.select(["RM"]).unwrap();

        let panel = &scatter_panels(&features, &target, &data, true).unwrap()[0];
        let line = panel.fit_line.as_ref().unwrap();
        let xs: Vec<f64> = line.iter().map(|(x, _)| *x).collect();
        assert_eq!(xs, vec![5.5, 6.0, 6.5, 7.0, 8.0]);
    }

    #[test]
    fn test_no_fit() {
        let (data, target) = housing();
        let panels = scatter_panels(&data, &target, &data, false).unwrap();
        assert_eq!(panels.len(), 3);
        assert!(panels.iter().all(|p| p.fit_line.is_none()));
    }

    #[test]
    fn test_missing_column() {
        let (data, target) = housing();
        let features = df!("AGE" => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let err = scatter_panels(&features, &target, &data, true).unwrap_err();
        assert!(matches!(err, KolosalError::FeatureNotFound(name) if name == "AGE"));
    }

    #[test]
    fn test_target_length_mismatch() {
        let (data, _) = housing();
        let target = Series::new("MEDV".into(), &[1.0, 2.0]);
        let err = scatter_panels(&data, &target, &data, false).unwrap_err();
        assert!(matches!(err, KolosalError::ShapeError { .. }));
    }

    #[test]
    fn test_text_column_is_rejected() {
        let (data, target) = housing();
        let text = df!("RM" => &["six", "seven", "eight", "six", "five", "eight"]).unwrap();
        let err = scatter_panels(&text, &target, &text, true).unwrap_err();
        assert!(matches!(err, KolosalError::ShapeError { .. }));

        // Numeric data under a text target is rejected the same way
        let target = Series::new("MEDV".into(), &["a", "b", "c", "d", "e", "f"]);
        let err = scatter_panels(&data, &target, &data, false).unwrap_err();
        assert!(matches!(err, KolosalError::ShapeError { .. }));
    }

    #[test]
    fn test_missing_value_is_rejected() {
        let (_, target) = housing();
        let data = df!("RM" => &[Some(6.0), None, Some(7.0), Some(6.5), Some(5.5), Some(8.0)]).unwrap();
        let err = scatter_panels(&data, &target, &data, true).unwrap_err();
        assert!(matches!(err, KolosalError::DataError(_)));
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let (_, target) = housing();
        let data = df!("RM" => &[6.0, f64::NAN, 7.0, 6.5, 5.5, 8.0]).unwrap();
        let err = scatter_panels(&data, &target, &data, true).unwrap_err();
        assert!(matches!(err, KolosalError::DataError(_)));

        let data = df!("RM" => &[6.0, f64::INFINITY, 7.0, 6.5, 5.5, 8.0]).unwrap();
        assert!(scatter_panels(&data, &target, &data, false).is_err());
    }

    #[test]
    fn test_integer_column_is_accepted() {
        let (_, target) = housing();
        let data = df!("TAX" => &[296i64, 242, 242, 222, 311, 307]).unwrap();
        let panels = scatter_panels(&data, &target, &data, true).unwrap();
        assert_eq!(panels[0].x, vec![296.0, 242.0, 242.0, 222.0, 311.0, 307.0]);
        assert!(panels[0].fit_line.as_ref().unwrap().iter().all(|(_, y)| y.is_finite()));
    }
}
