//! Figure handles backed by SVG files

use crate::error::{KolosalError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Where and how large a figure is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Destination SVG file
    pub output_path: PathBuf,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("figure.svg"),
            width: 800,
            height: 600,
        }
    }
}

impl FigureConfig {
    pub fn new(output_path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output_path: output_path.into(),
            width,
            height,
        }
    }

    /// Set output path
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Set pixel size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(KolosalError::InvalidParameter {
                name: "figure size".to_string(),
                value: format!("{}x{}", self.width, self.height),
                reason: "both dimensions must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// An explicit drawing surface.
///
/// Every drawing call receives this handle (or an area split from it), so
/// panels of one figure can never land on another figure.
pub struct Figure<'a> {
    root: DrawingArea<SVGBackend<'a>, Shift>,
    path: &'a Path,
}

impl<'a> Figure<'a> {
    /// Create a blank white figure. Parent directories are created eagerly.
    pub fn new(config: &'a FigureConfig) -> Result<Self> {
        config.validate()?;
        if let Some(parent) = config.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let root = SVGBackend::new(&config.output_path, (config.width, config.height))
            .into_drawing_area();
        root.fill(&WHITE)?;

        Ok(Self {
            root,
            path: &config.output_path,
        })
    }

    /// Root drawing area
    pub fn area(&self) -> &DrawingArea<SVGBackend<'a>, Shift> {
        &self.root
    }

    pub fn path(&self) -> &Path {
        self.path
    }

    /// Flush the figure to its file
    pub fn present(self) -> Result<()> {
        self.root.present()?;
        info!(path = %self.path.display(), "Figure written");
        Ok(())
    }
}
