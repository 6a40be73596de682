//! Error types for the cartogram widget.

use std::io;
use thiserror::Error;

/// Errors raised while building, updating or exporting a map.
#[derive(Debug, Error)]
pub enum SquaireError {
    /// The layout produced no cells, so the grid has no extent.
    #[error("Layout contains no cells")]
    EmptyLayout,

    /// A layout cell has no entry in the label table.
    #[error("No label defined for layout cell '{0}'")]
    MissingLabel(String),

    /// Container width is infinite or NaN.
    #[error("Container width must be a finite number, got {0}")]
    InvalidWidth(f32),

    /// The breakpoint table cannot be resolved for every width.
    #[error("Invalid breakpoint table: {0}")]
    InvalidBreakpoints(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Map document is not valid JSON for the expected shape.
    #[error("Invalid map document: {0}")]
    Json(#[from] serde_json::Error),

    /// Raster export failed.
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, SquaireError>;
