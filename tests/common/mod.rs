//! Shared fixtures for integration tests

use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Route `tracing` output through the test harness; `RUST_LOG` overrides the filter
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kolosal_diagnostics=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// `y = 3 x0 - 2 x1 + noise` with features drawn uniformly from [0, 10)
pub fn regression_data(n_samples: usize, seed: u64) -> (Array2<f64>, Array1<f64>) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let x = Array2::from_shape_fn((n_samples, 2), |_| rng.gen::<f64>() * 10.0);
    let y = Array1::from_shape_fn(n_samples, |i| {
        3.0 * x[[i, 0]] - 2.0 * x[[i, 1]] + rng.gen::<f64>() - 0.5
    });
    (x, y)
}
