//! Visualization module: figures and panels rendered with `plotters`.
//!
//! Drawing functions are generic over the backend and always take an explicit
//! drawing area; [`Figure`] owns the SVG surface a workflow draws on.

pub mod curves;
pub mod figure;
pub mod scatter;

pub use curves::{draw_score_panel, LegendPosition, ScorePanel, ScoreSeries, SCORE_RANGE, TEST_COLOR, TRAIN_COLOR};
pub use figure::{Figure, FigureConfig};
pub use scatter::{draw_scatter_panel, padded_range, ScatterPanel};
