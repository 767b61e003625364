//! Utility functions and types

pub mod stats;

pub use stats::{linspace, rint_linspace, training_size_schedule, unique_sorted, LinearFit};
