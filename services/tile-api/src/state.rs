//! Application state for the tile API.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use projection::{Reprojector, TransformRegistry};
use tracing::info;
use wms_tiling::{GridPainter, TileLayer};

use crate::metrics::TileApiMetrics;

/// Shared application state.
pub struct AppState {
    /// One painter per configured layer, keyed by layer id.
    painters: BTreeMap<String, GridPainter>,

    /// Request counters.
    pub metrics: TileApiMetrics,

    /// Installed Prometheus recorder, if any.
    prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Build the state from already loaded layers.
    pub fn new(layers: Vec<TileLayer>, reprojector: Arc<dyn Reprojector>) -> Result<Self> {
        let mut painters = BTreeMap::new();
        for layer in layers {
            let id = layer.id().to_string();
            let painter = GridPainter::new(Arc::new(layer), Arc::clone(&reprojector));
            if painters.insert(id.clone(), painter).is_some() {
                bail!("duplicate layer id: {}", id);
            }
        }

        Ok(Self {
            painters,
            metrics: TileApiMetrics::new(),
            prometheus: None,
        })
    }

    /// Load every layer config of `layers_dir`, with the built-in transforms.
    pub fn load(layers_dir: impl AsRef<Path>) -> Result<Self> {
        let layers_dir = layers_dir.as_ref();
        let layers = TileLayer::load_from_dir(layers_dir)
            .with_context(|| format!("loading layers from {}", layers_dir.display()))?;
        let state = Self::new(layers, Arc::new(TransformRegistry::new()))?;
        info!(layers = state.painters.len(), "Application state initialized");
        Ok(state)
    }

    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    pub fn painter(&self, layer: &str) -> Option<&GridPainter> {
        self.painters.get(layer)
    }

    /// Painters in layer id order.
    pub fn painters(&self) -> impl Iterator<Item = &GridPainter> {
        self.painters.values()
    }

    pub fn prometheus(&self) -> Option<&PrometheusHandle> {
        self.prometheus.as_ref()
    }
}
