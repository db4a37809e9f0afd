//! Common test fixtures for tile grid tests.
//!
//! This module provides pre-defined layers, YAML documents and transforms
//! that represent common tiling scenarios.

use std::sync::Arc;

use projection::{CoordTransform, Identity, ProjectionError, ProjectionResult};
use wms_common::{BoundingBox, Crs, LayerConfig, LayerParameter, MaxExtent};

/// Common bounding box definitions for testing.
pub mod bbox {
    use wms_common::BoundingBox;

    /// The whole 1000x1000 square extent
    pub const SQUARE: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1000.0,
        max_y: 1000.0,
    };

    /// Lower-left quarter of the square extent
    pub const SQUARE_QUARTER: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 500.0,
        max_y: 500.0,
    };

    /// Entirely outside the square extent
    pub const OUTSIDE: BoundingBox = BoundingBox {
        min_x: 2000.0,
        min_y: 2000.0,
        max_x: 3000.0,
        max_y: 3000.0,
    };

    /// Europe in geographic coordinates
    pub const EUROPE: BoundingBox = BoundingBox {
        min_x: -15.0,
        min_y: 35.0,
        max_x: 45.0,
        max_y: 72.0,
    };

    /// Invalid bbox (min > max)
    pub const INVALID: BoundingBox = BoundingBox {
        min_x: 10.0,
        min_y: 10.0,
        max_x: 5.0,
        max_y: 5.0,
    };
}

/// Common CRS identifiers.
pub mod crs {
    /// WGS84 geographic
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";

    /// WMS 1.1.1 style (lon/lat order)
    pub const CRS_84: &str = "CRS:84";

    /// A projected CRS with no built-in transform
    pub const LOCAL_GRID: &str = "LOCAL:1";
}

/// Base URL used by every fixture layer.
pub const BASE_URL: &str = "http://tiles.example.com/wms";

fn parse_crs(s: &str) -> Crs {
    Crs::from_wms_string(s).unwrap_or_else(|e| panic!("fixture CRS {}: {}", s, e))
}

/// A `(0, 0, 1000, 1000)` layer with 256x256 tiles and no scales
/// (quad-tree resolutions), in `crs`.
pub fn square_layer_config(crs: &str) -> LayerConfig {
    let mut config = LayerConfig::new("square", parse_crs(crs));
    config.base_url = Some(BASE_URL.to_string());
    config.max_extent = Some(MaxExtent::new(0.0, 0.0, 1000.0, 1000.0));
    config
}

/// A whole-world geographic layer with three configured scales and one
/// extra request parameter.
pub fn world_layer_config(version: &str) -> LayerConfig {
    let mut config = LayerConfig::new("bluemarble", parse_crs(crs::EPSG_4326));
    config.base_url = Some(BASE_URL.to_string());
    config.version = version.to_string();
    config.max_extent = Some(MaxExtent::new(-180.0, -90.0, 360.0, 180.0));
    config.data_source_name = Some("BlueMarbleNG".to_string());
    config.parameters = vec![LayerParameter::new("TRANSPARENT", "TRUE")];
    config.scales = vec![1.422, 2.844, 5.688];
    config
}

/// YAML document for the square layer, in Web Mercator.
pub const SQUARE_LAYER_YAML: &str = r#"
id: square
base_url: "http://tiles.example.com/wms"
crs: "EPSG:3857"
max_extent: { min_x: 0.0, min_y: 0.0, width: 1000.0, height: 1000.0 }
"#;

/// YAML document for the world layer.
pub const WORLD_LAYER_YAML: &str = r#"
id: bluemarble
base_url: "http://tiles.example.com/wms?map=/srv/world.map"
crs: "EPSG:4326"
version: "1.3.0"
format: image/jpeg
data_source_name: BlueMarbleNG
max_extent: { min_x: -180.0, min_y: -90.0, width: 360.0, height: 180.0 }
tile_width: 512
tile_height: 512
parameters:
  - { name: TRANSPARENT, value: "TRUE" }
scales: [1.422, 2.844, 5.688]
"#;

/// YAML document with no base URL.
pub const BROKEN_LAYER_YAML: &str = r#"
id: broken
crs: "EPSG:4326"
max_extent: { min_x: -180.0, min_y: -90.0, width: 360.0, height: 180.0 }
"#;

/// Identity transform whose forward direction rejects every point with
/// `|x| > limit`. Its inverse is a plain identity.
#[derive(Debug, Clone, Copy)]
pub struct BoundedIdentity {
    pub limit: f64,
}

impl CoordTransform for BoundedIdentity {
    fn transform(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        if x.abs() > self.limit {
            return Err(ProjectionError::out_of_domain(x, y, "beyond fixture limit"));
        }
        Ok((x, y))
    }

    fn inverse(&self) -> ProjectionResult<Arc<dyn CoordTransform>> {
        Ok(Arc::new(Identity))
    }
}

/// Identity transform that cannot be inverted.
#[derive(Debug, Clone, Copy)]
pub struct NonInvertible;

impl CoordTransform for NonInvertible {
    fn transform(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        Ok((x, y))
    }

    fn inverse(&self) -> ProjectionResult<Arc<dyn CoordTransform>> {
        Err(ProjectionError::SingularMatrix)
    }
}

/// Layer bounds of a tile, for assertions.
pub fn tile_box(min_x: f64, min_y: f64, size: f64) -> BoundingBox {
    BoundingBox::from_origin(min_x, min_y, size, size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_identity() {
        let t = BoundedIdentity { limit: 10.0 };
        assert_eq!(t.transform(5.0, 99.0).unwrap(), (5.0, 99.0));
        assert!(t.transform(-11.0, 0.0).is_err());
        assert_eq!(t.inverse().unwrap().transform(50.0, 1.0).unwrap(), (50.0, 1.0));
    }

    #[test]
    fn test_non_invertible() {
        assert_eq!(NonInvertible.inverse().unwrap_err(), ProjectionError::SingularMatrix);
    }

    #[test]
    fn test_fixture_configs_are_complete() {
        let config = world_layer_config("1.3.0");
        assert_eq!(config.upstream_layer_name(), "BlueMarbleNG");
        assert!(config.max_extent.unwrap().is_valid());
        assert!(square_layer_config(crs::EPSG_3857).scales.is_empty());
    }
}
