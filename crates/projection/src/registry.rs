//! Transform lookup by CRS pair.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use wms_common::Crs;

use crate::{CoordTransform, Identity, ProjectionError, ProjectionResult, WebMercator};

/// The reprojection service consumed by the tile grid engine.
pub trait Reprojector: Send + Sync {
    /// Find the transform mapping points from `source` to `target`.
    fn find_transform(
        &self,
        source: &Crs,
        target: &Crs,
    ) -> ProjectionResult<Arc<dyn CoordTransform>>;

    /// Transform a single point between two CRSs.
    fn transform_point(
        &self,
        x: f64,
        y: f64,
        source: &Crs,
        target: &Crs,
    ) -> ProjectionResult<(f64, f64)> {
        if source == target {
            return Ok((x, y));
        }
        self.find_transform(source, target)?.transform(x, y)
    }
}

/// Registry of known transforms.
///
/// Geographic CRSs (EPSG:4326, EPSG:4269, CRS:84) and Web Mercator
/// (EPSG:3857, EPSG:900913) are always available. Other pairs must be
/// registered; a registered pair is also usable in reverse through its
/// inverse.
#[derive(Debug, Default, Clone)]
pub struct TransformRegistry {
    transforms: HashMap<(Crs, Crs), Arc<dyn CoordTransform>>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transform from `source` to `target`.
    pub fn register(
        &mut self,
        source: Crs,
        target: Crs,
        transform: Arc<dyn CoordTransform>,
    ) -> &mut Self {
        self.transforms.insert((source, target), transform);
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_transform(
        mut self,
        source: Crs,
        target: Crs,
        transform: Arc<dyn CoordTransform>,
    ) -> Self {
        self.register(source, target, transform);
        self
    }

    fn builtin(source: &Crs, target: &Crs) -> Option<Arc<dyn CoordTransform>> {
        match (source, target) {
            (s, t) if s.is_geographic() && t.is_web_mercator() => {
                Some(Arc::new(WebMercator::from_geographic()))
            }
            (s, t) if s.is_web_mercator() && t.is_geographic() => {
                Some(Arc::new(WebMercator::to_geographic()))
            }
            // Aliases of the same datum/projection
            (s, t)
                if (s.is_geographic() && t.is_geographic())
                    || (s.is_web_mercator() && t.is_web_mercator()) =>
            {
                Some(Arc::new(Identity))
            }
            _ => None,
        }
    }
}

impl Reprojector for TransformRegistry {
    fn find_transform(
        &self,
        source: &Crs,
        target: &Crs,
    ) -> ProjectionResult<Arc<dyn CoordTransform>> {
        if source == target {
            return Ok(Arc::new(Identity));
        }

        if let Some(transform) = self.transforms.get(&(source.clone(), target.clone())) {
            return Ok(Arc::clone(transform));
        }

        if let Some(reverse) = self.transforms.get(&(target.clone(), source.clone())) {
            debug!(source = %source, target = %target, "Using inverse of registered transform");
            return reverse.inverse();
        }

        Self::builtin(source, target).ok_or_else(|| ProjectionError::UnsupportedTransform {
            source_crs: source.to_string(),
            target_crs: target.to_string(),
        })
    }
}
