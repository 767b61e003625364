//! Numeric reductions used by the curve workflows

use crate::error::{KolosalError, Result};

/// `num` evenly spaced values over `[start, stop]`, endpoints included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut values: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            values[num - 1] = stop;
            values
        }
    }
}

/// `linspace` rounded to the nearest integer, ties to even
pub fn rint_linspace(start: f64, stop: f64, num: usize) -> Vec<i64> {
    linspace(start, stop, num)
        .into_iter()
        .map(|v| v.round_ties_even() as i64)
        .collect()
}

/// Absolute training-set sizes evenly spread between 1 and `0.7 * n_samples - 1`.
///
/// The sequence is non-decreasing but may repeat values for small datasets.
pub fn training_size_schedule(n_samples: usize, n_points: usize) -> Result<Vec<usize>> {
    rint_linspace(1.0, n_samples as f64 * 0.7 - 1.0, n_points)
        .into_iter()
        .map(|size| {
            usize::try_from(size).ok().filter(|&s| s > 0).ok_or_else(|| {
                KolosalError::ValidationError(format!(
                    "training size {} derived from {} samples must be positive",
                    size, n_samples
                ))
            })
        })
        .collect()
}

/// Arithmetic mean; NaN for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (ddof = 0); NaN for an empty slice
pub fn std(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

/// Sorted distinct values
pub fn unique_sorted(values: &[f64]) -> Vec<f64> {
    let mut unique = values.to_vec();
    unique.sort_by(f64::total_cmp);
    unique.dedup();
    unique
}

/// Degree-1 least-squares polynomial `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least squares over paired samples.
    ///
    /// When every x is identical the system is rank deficient and the
    /// minimum-norm solution is returned.
    pub fn fit(x: &[f64], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(KolosalError::ShapeError {
                expected: format!("{} y values", x.len()),
                actual: format!("{} y values", y.len()),
            });
        }
        if x.is_empty() {
            return Err(KolosalError::ValidationError(
                "cannot fit a line to zero points".to_string(),
            ));
        }

        let x_mean = mean(x);
        let y_mean = mean(y);
        let sxx: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
        let sxy: f64 = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (xi - x_mean) * (yi - y_mean))
            .sum();

        if sxx == 0.0 {
            // Every row of the design matrix is [c, 1]
            let c = x_mean;
            let scale = y_mean / (c * c + 1.0);
            return Ok(Self {
                slope: c * scale,
                intercept: scale,
            });
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: y_mean - slope * x_mean,
        })
    }

    /// Evaluate the line at `x`
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(1.0, 69.0, 9);
        assert_eq!(values.len(), 9);
        assert_eq!(values[0], 1.0);
        assert_eq!(values[8], 69.0);
        assert_abs_diff_eq!(values[1], 9.5, epsilon = 1e-12);
    }

    #[test]
    fn test_rint_rounds_half_to_even() {
        assert_eq!(
            rint_linspace(1.0, 69.0, 9),
            vec![1, 10, 18, 26, 35, 44, 52, 60, 69]
        );
    }

    #[test]
    fn test_training_size_schedule_bounds() {
        for n in [10usize, 20, 100, 506, 1000] {
            let sizes = training_size_schedule(n, 9).unwrap();
            assert_eq!(sizes.len(), 9);
            assert!(sizes[0] >= 1);
            assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
            let upper = (0.7 * n as f64).floor() as usize - 1;
            assert!(*sizes.last().unwrap() <= upper, "n = {}: {:?}", n, sizes);
        }
    }

    #[test]
    fn test_training_size_schedule_rejects_tiny_datasets() {
        assert!(training_size_schedule(1, 9).is_err());
    }

    #[test]
    fn test_mean_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_abs_diff_eq!(mean(&values), 5.0);
        assert_abs_diff_eq!(std(&values), 2.0);
        assert_eq!(std(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_unique_sorted() {
        assert_eq!(unique_sorted(&[3.0, 1.0, 3.0, 2.0, 1.0]), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_linear_fit_exact_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let fit = LinearFit::fit(&x, &y).unwrap();
        assert_abs_diff_eq!(fit.slope, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.eval(10.0), 21.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fit_noisy() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 5.0, 8.0];
        let fit = LinearFit::fit(&x, &y).unwrap();
        assert_abs_diff_eq!(fit.slope, 1.9, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.intercept, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fit_constant_x() {
        let fit = LinearFit::fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).unwrap();
        // Minimum-norm solution still passes through the mean
        assert_abs_diff_eq!(fit.eval(2.0), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(fit.slope, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_linear_fit_length_mismatch() {
        assert!(LinearFit::fit(&[1.0, 2.0], &[1.0]).is_err());
        assert!(LinearFit::fit(&[], &[]).is_err());
    }
}
