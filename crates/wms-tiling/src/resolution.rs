//! Server resolutions and best-match selection.
//!
//! A resolution is expressed in map units per pixel. Selection deliberately
//! leans toward the coarser of two neighbouring levels: the finer level only
//! wins when it is more than twice as close to the screen resolution.

use serde::Serialize;
use wms_common::{MaxExtent, WmsError, WmsResult};

/// Safety stop for quad-tree descent when fed a non-positive scale.
const MAX_QUAD_TREE_LEVEL: u32 = 1000;

/// One zoom level of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resolution {
    /// Map units per pixel
    pub value: f64,
    /// Level index, 0 = coarsest
    pub level: u32,
    /// Tile width in pixels
    pub tile_width_px: u32,
    /// Tile height in pixels
    pub tile_height_px: u32,
}

impl Resolution {
    pub fn new(value: f64, level: u32, tile_width_px: u32, tile_height_px: u32) -> Self {
        Self {
            value,
            level,
            tile_width_px,
            tile_height_px,
        }
    }

    /// Tile width in map units.
    pub fn tile_span_x(&self) -> f64 {
        self.value * self.tile_width_px as f64
    }

    /// Tile height in map units.
    pub fn tile_span_y(&self) -> f64 {
        self.value * self.tile_height_px as f64
    }
}

/// Pick between two neighbouring levels that bracket `screen_res`.
fn tie_break(upper: Resolution, lower: Resolution, screen_res: f64) -> Resolution {
    if (upper.value - screen_res) > 2.0 * (screen_res - lower.value) {
        lower
    } else {
        upper
    }
}

/// Resolution of a quad-tree level: the extent halved `level` times, fitted
/// into one tile.
fn quad_tree_value(max_extent: &MaxExtent, tile_width_px: u32, tile_height_px: u32, level: u32) -> f64 {
    let divisor = 2f64.powi(level as i32);
    let width = max_extent.width / divisor;
    let height = max_extent.height / divisor;
    (width / tile_width_px as f64).max(height / tile_height_px as f64)
}

/// Derive the best resolution by quad-tree subdivision of the max extent.
///
/// Used when a layer has no configured scales. `target_scale` must be finite
/// and positive.
pub fn derive_quad_tree_resolution(
    max_extent: &MaxExtent,
    tile_width_px: u32,
    tile_height_px: u32,
    target_scale: f64,
) -> Resolution {
    let screen_res = 1.0 / target_scale;
    let at_level = |level: u32| {
        Resolution::new(
            quad_tree_value(max_extent, tile_width_px, tile_height_px, level),
            level,
            tile_width_px,
            tile_height_px,
        )
    };

    let mut current = at_level(0);
    if screen_res >= current.value {
        return current;
    }

    while current.level < MAX_QUAD_TREE_LEVEL {
        let upper = current;
        current = at_level(upper.level + 1);
        if current.value <= screen_res {
            return tie_break(upper, current, screen_res);
        }
    }

    current
}

/// The ordered resolutions of one layer, coarsest first.
///
/// Built once when the layer is configured and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionCatalog {
    resolutions: Vec<Resolution>,
    max_extent: MaxExtent,
    tile_width_px: u32,
    tile_height_px: u32,
}

impl ResolutionCatalog {
    /// Build a catalog from configured scales (pixels per map unit).
    ///
    /// Scales are converted to resolutions, sorted coarsest first and
    /// numbered from level 0. Duplicate scales collapse into one level. An
    /// empty scale list produces a catalog that falls back to quad-tree
    /// derivation over `max_extent`.
    pub fn from_scales(
        scales: &[f64],
        max_extent: MaxExtent,
        tile_width_px: u32,
        tile_height_px: u32,
    ) -> WmsResult<Self> {
        if let Some(bad) = scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(WmsError::InvalidConfiguration(format!(
                "scale {} must be finite and positive",
                bad
            )));
        }

        let mut values: Vec<f64> = scales.iter().map(|scale| 1.0 / scale).collect();
        values.sort_by(|a, b| b.total_cmp(a));
        values.dedup();

        let resolutions = values
            .into_iter()
            .enumerate()
            .map(|(level, value)| Resolution::new(value, level as u32, tile_width_px, tile_height_px))
            .collect();

        Ok(Self {
            resolutions,
            max_extent,
            tile_width_px,
            tile_height_px,
        })
    }

    /// True when no scales were configured (quad-tree mode).
    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn get(&self, level: u32) -> Option<&Resolution> {
        self.resolutions.get(level as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Resolution> {
        self.resolutions.iter()
    }

    /// Level 0, if any scales are configured.
    pub fn coarsest(&self) -> Option<&Resolution> {
        self.resolutions.first()
    }

    pub fn finest(&self) -> Option<&Resolution> {
        self.resolutions.last()
    }

    /// Select the resolution best matching `target_scale` (pixels per map unit).
    ///
    /// `target_scale` must be finite and positive.
    pub fn find_best(&self, target_scale: f64) -> Resolution {
        let (Some(coarsest), Some(finest)) = (self.coarsest(), self.finest())
        else {
            return derive_quad_tree_resolution(
                &self.max_extent,
                self.tile_width_px,
                self.tile_height_px,
                target_scale,
            );
        };

        let screen_res = 1.0 / target_scale;
        if screen_res >= coarsest.value {
            return *coarsest;
        }
        if screen_res <= finest.value {
            return *finest;
        }

        self.resolutions
            .windows(2)
            .find(|pair| pair[0].value >= screen_res && screen_res >= pair[1].value)
            .map(|pair| tie_break(pair[0], pair[1], screen_res))
            .unwrap_or(*finest)
    }
}
