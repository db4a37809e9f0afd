//! Validated, immutable layer state.
//!
//! Layer configuration is loaded from YAML files, one layer per file:
//!
//! ```yaml
//! id: bluemarble
//! base_url: "http://example.com/wms"
//! crs: "EPSG:4326"
//! version: "1.3.0"
//! max_extent: { min_x: -180.0, min_y: -90.0, width: 360.0, height: 180.0 }
//! scales: [1.422, 2.844, 5.688]
//! ```

use std::fs;
use std::path::Path;

use tracing::{info, warn};
use wms_common::{Crs, LayerConfig, LayerId, MaxExtent, WmsError, WmsResult};

use crate::ResolutionCatalog;

/// A configured layer: its configuration plus the resolution catalog and
/// max extent derived from it once.
#[derive(Debug, Clone)]
pub struct TileLayer {
    config: LayerConfig,
    max_extent: MaxExtent,
    catalog: ResolutionCatalog,
}

impl TileLayer {
    /// Validate `config` and build the layer.
    pub fn new(config: LayerConfig) -> WmsResult<Self> {
        if config
            .base_url
            .as_deref()
            .map_or(true, |url| url.trim().is_empty())
        {
            return Err(WmsError::MissingParameter(format!(
                "base_url for layer {}",
                config.id
            )));
        }

        let max_extent = config.max_extent.ok_or_else(|| {
            WmsError::MissingParameter(format!("max_extent for layer {}", config.id))
        })?;
        if !max_extent.is_valid() {
            return Err(WmsError::InvalidConfiguration(format!(
                "layer {}: max_extent must have a finite origin and a positive size, got {:?}",
                config.id, max_extent
            )));
        }

        if config.tile_width == 0 || config.tile_height == 0 {
            return Err(WmsError::InvalidConfiguration(format!(
                "layer {}: tile size must be non-zero, got {}x{}",
                config.id, config.tile_width, config.tile_height
            )));
        }

        if config.max_tiles == 0 {
            return Err(WmsError::InvalidConfiguration(format!(
                "layer {}: max_tiles must be at least 1",
                config.id
            )));
        }

        let catalog = ResolutionCatalog::from_scales(
            &config.scales,
            max_extent,
            config.tile_width,
            config.tile_height,
        )
        .map_err(|e| match e {
            WmsError::InvalidConfiguration(msg) => {
                WmsError::InvalidConfiguration(format!("layer {}: {}", config.id, msg))
            }
            other => other,
        })?;

        Ok(Self {
            config,
            max_extent,
            catalog,
        })
    }

    /// Parse a single layer from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> WmsResult<Self> {
        let config: LayerConfig = serde_yaml::from_str(yaml)
            .map_err(|e| WmsError::InvalidConfiguration(format!("invalid layer YAML: {}", e)))?;
        Self::new(config)
    }

    /// Load a single layer from a YAML file.
    pub fn load_from_file(path: impl AsRef<Path>) -> WmsResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            WmsError::InvalidConfiguration(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            WmsError::InvalidConfiguration(msg) => {
                WmsError::InvalidConfiguration(format!("{}: {}", path.display(), msg))
            }
            WmsError::MissingParameter(msg) => {
                WmsError::MissingParameter(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Load every `*.yaml` / `*.yml` file of `dir`, in file name order.
    ///
    /// A missing directory yields no layers.
    pub fn load_from_dir(dir: impl AsRef<Path>) -> WmsResult<Vec<Self>> {
        let dir = dir.as_ref();
        if !dir.exists() {
            warn!(dir = %dir.display(), "Layer config directory does not exist, no layers loaded");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            WmsError::InvalidConfiguration(format!("failed to read {}: {}", dir.display(), e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| {
                    WmsError::InvalidConfiguration(format!("failed to read {}: {}", dir.display(), e))
                })?
                .path();
            let is_yaml = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if is_yaml && path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        let layers = paths
            .iter()
            .map(|path| Self::load_from_file(path))
            .collect::<WmsResult<Vec<_>>>()?;

        info!(count = layers.len(), dir = %dir.display(), "Loaded layer configs");
        Ok(layers)
    }

    pub fn id(&self) -> &LayerId {
        &self.config.id
    }

    pub fn crs(&self) -> &Crs {
        &self.config.crs
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn max_extent(&self) -> &MaxExtent {
        &self.max_extent
    }

    pub fn catalog(&self) -> &ResolutionCatalog {
        &self.catalog
    }
}
