//! Integer tile grid covering a bounding box.
//!
//! Tile size and grid anchor are snapped to whole pixels at the requested
//! scale before any index is computed. Two requests at the same scale
//! therefore share the exact same tile boundaries, whichever part of the
//! layer they cover.

use wms_common::{BoundingBox, MaxExtent};

use crate::Resolution;

/// Snap a length or coordinate down to a whole number of pixels.
fn snap_to_pixel(value: f64, scale: f64) -> f64 {
    (value * scale).floor() / scale
}

/// The tiles covering one request. `x_max` and `y_max` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileGrid {
    /// Lower-left corner of tile (`x_min`, `y_min`)
    pub origin: (f64, f64),
    pub x_min: i64,
    pub y_min: i64,
    pub x_max: i64,
    pub y_max: i64,
    /// Pixel-snapped tile width in map units
    pub tile_width: f64,
    /// Pixel-snapped tile height in map units
    pub tile_height: f64,
    /// Pixel-snapped lower-left corner of the max extent; tile (0, 0) starts here
    pub anchor: (f64, f64),
}

impl TileGrid {
    fn empty(anchor: (f64, f64), tile_width: f64, tile_height: f64) -> Self {
        Self {
            origin: anchor,
            x_min: 0,
            y_min: 0,
            x_max: 0,
            y_max: 0,
            tile_width,
            tile_height,
            anchor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_min >= self.x_max || self.y_min >= self.y_max
    }

    /// Number of tiles in the grid, or `None` if it does not fit in a
    /// `usize`.
    pub fn tile_count(&self) -> Option<usize> {
        if self.is_empty() {
            return Some(0);
        }
        let columns = usize::try_from(self.x_max.checked_sub(self.x_min)?).ok()?;
        let rows = usize::try_from(self.y_max.checked_sub(self.y_min)?).ok()?;
        columns.checked_mul(rows)
    }

    /// Number of tiles in the grid, saturating at `usize::MAX`.
    pub fn len(&self) -> usize {
        self.tile_count().unwrap_or(usize::MAX)
    }

    /// Cell indices, column by column: `x` ascending in the outer loop and
    /// `y` ascending in the inner loop.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> {
        let (y_min, y_max) = (self.y_min, self.y_max);
        (self.x_min..self.x_max).flat_map(move |i| (y_min..y_max).map(move |j| (i, j)))
    }

    /// Bounds of cell (`i`, `j`) in layer coordinates.
    ///
    /// Computed from the anchor, so a cell's bounds do not depend on which
    /// request produced the grid.
    pub fn cell_bounds(&self, i: i64, j: i64) -> BoundingBox {
        BoundingBox::from_origin(
            self.anchor.0 + i as f64 * self.tile_width,
            self.anchor.1 + j as f64 * self.tile_height,
            self.tile_width,
            self.tile_height,
        )
    }
}

/// Compute the tile grid covering `bounds`.
///
/// `bounds` must already be clipped to the max extent and non-empty;
/// `scale` is in pixels per layer unit. A tile smaller than one pixel at
/// this scale yields an empty grid.
pub fn compute_grid(
    max_extent: &MaxExtent,
    bounds: &BoundingBox,
    resolution: &Resolution,
    scale: f64,
) -> TileGrid {
    let tile_width = snap_to_pixel(resolution.tile_span_x(), scale);
    let tile_height = snap_to_pixel(resolution.tile_span_y(), scale);
    let anchor = (
        snap_to_pixel(max_extent.min_x, scale),
        snap_to_pixel(max_extent.min_y, scale),
    );

    if !(tile_width > 0.0 && tile_height > 0.0) {
        return TileGrid::empty(anchor, tile_width, tile_height);
    }

    let index = |value: f64, start: f64, size: f64| ((value - start) / size).floor() as i64;

    let y_min = index(bounds.min_y, anchor.1, tile_height);
    let y_max = index(bounds.max_y, anchor.1, tile_height).saturating_add(1);
    let x_min = index(bounds.min_x, anchor.0, tile_width);
    let x_max = index(bounds.max_x, anchor.0, tile_width).saturating_add(1);

    TileGrid {
        origin: (
            anchor.0 + x_min as f64 * tile_width,
            anchor.1 + y_min as f64 * tile_height,
        ),
        x_min,
        y_min,
        x_max,
        y_max,
        tile_width,
        tile_height,
        anchor,
    }
}
