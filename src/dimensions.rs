use crate::error::{Result, SquaireError};
use crate::layout::Cell;

/// Grid size in boxes, derived from the placed cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridExtent {
    pub boxes_wide: u32,
    pub boxes_tall: u32,
}

impl GridExtent {
    pub fn from_cells(cells: &[Cell]) -> Result<Self> {
        let (min_x, max_x) = min_max(cells.iter().map(|c| c.x)).ok_or(SquaireError::EmptyLayout)?;
        let (min_y, max_y) = min_max(cells.iter().map(|c| c.y)).ok_or(SquaireError::EmptyLayout)?;
        Ok(Self {
            boxes_wide: max_x - min_x + 1,
            boxes_tall: max_y - min_y + 1,
        })
    }

    /// Height / width of the whole map.
    pub fn ratio(&self) -> f32 {
        self.boxes_tall as f32 / self.boxes_wide as f32
    }
}

fn min_max(values: impl Iterator<Item = u32>) -> Option<(u32, u32)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Linear map from a domain interval onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: (f32, f32),
    pub range: (f32, f32),
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    pub fn apply(&self, v: f32) -> f32 {
        let span = self.domain.1 - self.domain.0;
        if span == 0.0 {
            return self.range.0;
        }
        let t = (v - self.domain.0) / span;
        self.range.0 + t * (self.range.1 - self.range.0)
    }
}

/// Pixel geometry for the current container width.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxDimensions {
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub box_width: f32,
}

impl BoxDimensions {
    pub fn new(extent: GridExtent, width: f32, height: f32) -> Self {
        Self {
            x_scale: LinearScale::new((0.0, extent.boxes_wide as f32), (0.0, width)),
            y_scale: LinearScale::new((0.0, extent.boxes_tall as f32), (0.0, height)),
            box_width: width / extent.boxes_wide as f32,
        }
    }
}
