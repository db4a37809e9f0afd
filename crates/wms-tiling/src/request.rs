//! Per-tile screen rectangles and GetMap URLs.

use wms_common::{BoundingBox, LayerConfig, ScreenBounds, WmsResult};
use wms_protocol::GetMapUrl;

use crate::Resolution;

/// Round half up, the same way for every coordinate.
fn round_pixel(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Convert a world bbox into screen pixels at `scale`, flipping Y.
///
/// Every edge is rounded on its own and the size is taken from the rounded
/// edges, so neighbouring tiles that share an edge also share its pixel.
pub fn screen_bbox(world: &BoundingBox, scale: f64) -> ScreenBounds {
    let left = round_pixel(scale * world.min_x);
    let right = round_pixel(scale * world.max_x);
    let bottom = round_pixel(scale * world.min_y);
    let top = round_pixel(scale * world.max_y);

    ScreenBounds::new(left, -top, right - left, top - bottom)
}

/// Builds the upstream GetMap URL of each tile of one layer.
#[derive(Debug, Clone, Copy)]
pub struct TileRequestBuilder<'a> {
    url: GetMapUrl<'a>,
}

impl<'a> TileRequestBuilder<'a> {
    /// Fails with `MissingParameter` when the layer has no base URL.
    pub fn new(config: &'a LayerConfig) -> WmsResult<Self> {
        Ok(Self {
            url: GetMapUrl::new(config)?,
        })
    }

    /// URL of the tile covering `layer_bbox` at `resolution`.
    pub fn build_url(&self, resolution: &Resolution, layer_bbox: &BoundingBox) -> String {
        self.url
            .build(resolution.tile_width_px, resolution.tile_height_px, layer_bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wms_common::{Crs, WmsError};

    #[test]
    fn test_screen_bbox_flips_y() {
        let screen = screen_bbox(&BoundingBox::new(0.0, 0.0, 250.0, 250.0), 1.0);
        assert_eq!(screen, ScreenBounds::new(0, -250, 250, 250));
    }

    #[test]
    fn test_adjacent_tiles_share_edges() {
        let scale = 0.3;
        let left = screen_bbox(&BoundingBox::new(0.0, 0.0, 11.0, 11.0), scale);
        let right = screen_bbox(&BoundingBox::new(11.0, 0.0, 22.0, 11.0), scale);
        let above = screen_bbox(&BoundingBox::new(0.0, 11.0, 11.0, 22.0), scale);

        assert_eq!(left.right(), right.x);
        assert_eq!(above.bottom(), left.y);
    }

    #[test]
    fn test_rounding_is_half_up_for_negatives() {
        let screen = screen_bbox(&BoundingBox::new(-2.5, -2.5, -0.5, -0.5), 1.0);
        assert_eq!(screen.x, -2);
        assert_eq!(screen.right(), 0);
        assert_eq!(screen.y, 0);
        assert_eq!(screen.height, 2);
    }

    #[test]
    fn test_screen_roundtrip_within_one_pixel() {
        let scale = 0.731;
        let world = BoundingBox::new(-412.3, 97.9, 12.6, 733.1);
        let screen = screen_bbox(&world, scale);

        let min_x = screen.x as f64 / scale;
        let max_y = -screen.y as f64 / scale;
        let max_x = screen.right() as f64 / scale;
        let min_y = -screen.bottom() as f64 / scale;

        let tolerance = 1.0 / scale;
        assert!((min_x - world.min_x).abs() <= tolerance);
        assert!((max_x - world.max_x).abs() <= tolerance);
        assert!((min_y - world.min_y).abs() <= tolerance);
        assert!((max_y - world.max_y).abs() <= tolerance);
    }

    #[test]
    fn test_url_uses_resolution_pixels() {
        let mut config = LayerConfig::new("base", Crs::from_wms_string("EPSG:3857").unwrap());
        config.base_url = Some("http://tiles.example.com/wms".to_string());
        let builder = TileRequestBuilder::new(&config).unwrap();

        let url = builder.build_url(
            &Resolution::new(0.9765625, 2, 512, 256),
            &BoundingBox::new(0.0, 250.0, 250.0, 500.0),
        );
        assert!(url.contains("&WIDTH=512&HEIGHT=256&bbox=0,250,250,500&"));
        assert!(url.contains("&srs=EPSG:3857&"));
    }

    #[test]
    fn test_missing_base_url() {
        let config = LayerConfig::new("base", Crs::from_wms_string("EPSG:3857").unwrap());
        assert!(matches!(
            TileRequestBuilder::new(&config),
            Err(WmsError::MissingParameter(_))
        ));
    }
}
