//! Layer configuration for upstream WMS sources.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, Crs};

/// Unique identifier for a layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The absolute extent of a layer in its native CRS.
///
/// No tile is ever requested outside this rectangle's grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaxExtent {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl MaxExtent {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    /// Finite origin and a strictly positive size.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn to_bbox(&self) -> BoundingBox {
        BoundingBox::from_origin(self.min_x, self.min_y, self.width, self.height)
    }
}

/// An extra key/value pair appended to every GetMap URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerParameter {
    pub name: String,
    pub value: String,
}

impl LayerParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Configuration of one upstream WMS layer, typically loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Layer identifier, also the default `layers` value of GetMap requests
    pub id: LayerId,

    /// Upstream WMS endpoint
    #[serde(default)]
    pub base_url: Option<String>,

    /// Image format requested from the upstream server
    #[serde(default = "default_format")]
    pub format: String,

    /// WMS protocol version ("1.3.0" switches `srs` to `crs`)
    #[serde(default = "default_version")]
    pub version: String,

    /// Value of the `styles` parameter
    #[serde(default)]
    pub styles: String,

    /// Native CRS of the layer
    pub crs: Crs,

    /// Absolute extent in the native CRS
    #[serde(default)]
    pub max_extent: Option<MaxExtent>,

    /// Tile width in pixels
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,

    /// Tile height in pixels
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,

    /// Upstream layer name, when it differs from `id`
    #[serde(default)]
    pub data_source_name: Option<String>,

    /// Extra GetMap parameters, appended in order
    #[serde(default)]
    pub parameters: Vec<LayerParameter>,

    /// Supported scales in pixels per map unit; empty derives a quad-tree
    #[serde(default)]
    pub scales: Vec<f64>,

    /// Most tiles a single request may produce
    #[serde(default = "default_max_tiles")]
    pub max_tiles: usize,
}

fn default_format() -> String {
    "image/png".to_string()
}

fn default_version() -> String {
    "1.1.1".to_string()
}

fn default_tile_size() -> u32 {
    256
}

/// Enough for a 4K viewport of 256 px tiles several times over.
pub const DEFAULT_MAX_TILES: usize = 4096;

fn default_max_tiles() -> usize {
    DEFAULT_MAX_TILES
}

impl LayerConfig {
    /// Minimal configuration with defaults for everything optional.
    pub fn new(id: impl Into<String>, crs: Crs) -> Self {
        Self {
            id: LayerId::new(id),
            base_url: None,
            format: default_format(),
            version: default_version(),
            styles: String::new(),
            crs,
            max_extent: None,
            tile_width: default_tile_size(),
            tile_height: default_tile_size(),
            data_source_name: None,
            parameters: Vec::new(),
            scales: Vec::new(),
            max_tiles: default_max_tiles(),
        }
    }

    /// Name sent as the `layers` parameter upstream.
    pub fn upstream_layer_name(&self) -> &str {
        self.data_source_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_defaults() {
        let yaml = r#"
id: osm
base_url: "http://example.com/wms"
crs: "EPSG:3857"
max_extent:
  min_x: 0.0
  min_y: 0.0
  width: 1000.0
  height: 1000.0
"#;
        let config: LayerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.id, LayerId::new("osm"));
        assert_eq!(config.format, "image/png");
        assert_eq!(config.version, "1.1.1");
        assert_eq!(config.tile_width, 256);
        assert_eq!(config.tile_height, 256);
        assert!(config.scales.is_empty());
        assert!(config.parameters.is_empty());
        assert_eq!(config.max_tiles, DEFAULT_MAX_TILES);
        assert_eq!(config.upstream_layer_name(), "osm");
    }

    #[test]
    fn test_parameters_keep_order() {
        let yaml = r#"
id: roads
crs: "EPSG:4326"
data_source_name: "topp:roads"
parameters:
  - { name: transparent, value: "true" }
  - { name: bgcolor, value: "0xFFFFFF" }
"#;
        let config: LayerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.upstream_layer_name(), "topp:roads");
        assert_eq!(config.parameters[0].name, "transparent");
        assert_eq!(config.parameters[1].name, "bgcolor");
        assert!(config.base_url.is_none());
        assert!(config.max_extent.is_none());
    }

    #[test]
    fn test_max_extent_validity() {
        assert!(MaxExtent::new(0.0, 0.0, 10.0, 10.0).is_valid());
        assert!(!MaxExtent::new(0.0, 0.0, 0.0, 10.0).is_valid());
        assert!(!MaxExtent::new(0.0, f64::NAN, 10.0, 10.0).is_valid());
        assert_eq!(
            MaxExtent::new(-5.0, 5.0, 10.0, 20.0).to_bbox(),
            BoundingBox::new(-5.0, 5.0, 5.0, 25.0)
        );
    }

    #[test]
    fn test_empty_data_source_name_falls_back_to_id() {
        let mut config = LayerConfig::new("base", Crs::from_wms_string("EPSG:4326").unwrap());
        config.data_source_name = Some(String::new());
        assert_eq!(config.upstream_layer_name(), "base");
    }
}
