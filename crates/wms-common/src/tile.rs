//! Tile identifiers and the per-cell output of a paint request.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, ScreenBounds};

/// A tile coordinate (level/x/y).
///
/// `x` and `y` are grid indices relative to the layer's max extent origin and
/// may be negative when the grid anchor is snapped below the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileIndex {
    /// Resolution level (0 = coarsest)
    pub level: u32,
    /// Column (x)
    pub x: i64,
    /// Row (y), counted upward from the extent origin
    pub y: i64,
}

impl TileIndex {
    pub fn new(level: u32, x: i64, y: i64) -> Self {
        Self { level, x, y }
    }

    /// Generate a cache key string.
    pub fn cache_key(&self) -> String {
        format!("{}/{}/{}", self.level, self.x, self.y)
    }
}

/// One tile of a paint request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub index: TileIndex,
    /// Pixel rectangle on the client canvas (Y-down)
    pub screen_bounds: ScreenBounds,
    /// Tile extent in the layer's native CRS
    pub layer_bounds: BoundingBox,
    /// GetMap URL for the tile image
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key() {
        assert_eq!(TileIndex::new(3, -1, 7).cache_key(), "3/-1/7");
    }

    #[test]
    fn test_index_ordering_is_column_major() {
        let mut indices = vec![
            TileIndex::new(2, 1, 0),
            TileIndex::new(2, 0, 1),
            TileIndex::new(2, 0, 0),
        ];
        indices.sort();
        assert_eq!(
            indices,
            vec![
                TileIndex::new(2, 0, 0),
                TileIndex::new(2, 0, 1),
                TileIndex::new(2, 1, 0),
            ]
        );
    }

    #[test]
    fn test_tile_serializes() {
        let tile = Tile {
            index: TileIndex::new(0, 0, 0),
            screen_bounds: ScreenBounds::new(0, -256, 256, 256),
            layer_bounds: BoundingBox::new(0.0, 0.0, 256.0, 256.0),
            url: "http://example.com/wms?SERVICE=WMS".to_string(),
        };
        let json = serde_json::to_value(&tile).unwrap();
        assert_eq!(json["index"]["level"], 0);
        assert_eq!(json["screen_bounds"]["y"], -256);
        assert_eq!(json["layer_bounds"]["max_x"], 256.0);
    }
}
