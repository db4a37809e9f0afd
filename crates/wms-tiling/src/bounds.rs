//! Bounding box mapping between the map CRS and a layer's native CRS.
//!
//! Only the lower-left and upper-right corners are transformed, and the box
//! they span becomes the result. This is exact for transforms that are close
//! to affine (the usual case for tiles small relative to the projection's
//! distortion) and only approximate otherwise: a box is never reprojected as
//! a polygon. Existing clients rely on this tile geometry. A transform that
//! flips an axis still yields a valid box, with the corners swapped back.

use std::sync::Arc;

use projection::{CoordTransform, Reprojector};
use tracing::trace;
use wms_common::{BoundingBox, Crs, WmsResult};

/// Map `bbox` through `transform` by its two diagonal corners.
pub fn transform_bbox(bbox: &BoundingBox, transform: &dyn CoordTransform) -> WmsResult<BoundingBox> {
    let (x0, y0) = transform.transform(bbox.min_x, bbox.min_y)?;
    let (x1, y1) = transform.transform(bbox.max_x, bbox.max_y)?;
    Ok(BoundingBox::new(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)))
}

/// Convert a map scale (pixels per map unit) into the equivalent layer scale
/// (pixels per layer unit), assuming the transform preserves width ratios.
pub fn scale_for_layer(map_bounds: &BoundingBox, layer_bounds: &BoundingBox, map_scale: f64) -> f64 {
    map_scale * map_bounds.width() / layer_bounds.width()
}

/// Both directions of the transform between a layer CRS and a map CRS.
#[derive(Debug, Clone)]
pub struct BoundsTransformer {
    layer_to_map: Arc<dyn CoordTransform>,
    map_to_layer: Arc<dyn CoordTransform>,
}

impl BoundsTransformer {
    /// Look up the transforms between `layer_crs` and `map_crs`.
    ///
    /// Returns `None` when both name the same CRS; the reprojection service
    /// is not consulted in that case.
    pub fn between(
        reprojector: &dyn Reprojector,
        layer_crs: &Crs,
        map_crs: &Crs,
    ) -> WmsResult<Option<Self>> {
        if layer_crs == map_crs {
            return Ok(None);
        }

        let layer_to_map = reprojector.find_transform(layer_crs, map_crs)?;
        let map_to_layer = layer_to_map.inverse()?;
        trace!(layer_crs = %layer_crs, map_crs = %map_crs, "Resolved bounds transform");

        Ok(Some(Self {
            layer_to_map,
            map_to_layer,
        }))
    }

    /// Map bounds from the map CRS into the layer CRS.
    pub fn to_layer(&self, bbox: &BoundingBox) -> WmsResult<BoundingBox> {
        transform_bbox(bbox, self.map_to_layer.as_ref())
    }

    /// Map bounds from the layer CRS into the map CRS.
    pub fn to_map(&self, bbox: &BoundingBox) -> WmsResult<BoundingBox> {
        transform_bbox(bbox, self.layer_to_map.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::{AffineTransform, ProjectionResult, TransformRegistry};
    use wms_common::WmsError;

    fn crs(s: &str) -> Crs {
        Crs::from_wms_string(s).unwrap()
    }

    #[derive(Debug)]
    struct PanicReprojector;

    impl Reprojector for PanicReprojector {
        fn find_transform(
            &self,
            _source: &Crs,
            _target: &Crs,
        ) -> ProjectionResult<Arc<dyn CoordTransform>> {
            panic!("same-CRS requests must not reach the reprojection service");
        }
    }

    #[test]
    fn test_transform_bbox_corners() {
        let t = AffineTransform::scale_translate(2.0, 2.0, 10.0, 0.0);
        let out = transform_bbox(&BoundingBox::new(0.0, 0.0, 5.0, 5.0), &t).unwrap();
        assert_eq!(out, BoundingBox::new(10.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_transform_bbox_axis_flip_stays_valid() {
        let flip = AffineTransform::scale_translate(1.0, -1.0, 0.0, 1000.0);
        let out = transform_bbox(&BoundingBox::new(100.0, 400.0, 200.0, 420.0), &flip).unwrap();
        assert_eq!(out, BoundingBox::new(100.0, 580.0, 200.0, 600.0));
        assert!(out.is_valid());

        let mirror = AffineTransform::scale_translate(-1.0, -1.0, 0.0, 0.0);
        let out = transform_bbox(&BoundingBox::new(0.0, 0.0, 5.0, 5.0), &mirror).unwrap();
        assert_eq!(out, BoundingBox::new(-5.0, -5.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale_for_layer() {
        let map = BoundingBox::new(0.0, 0.0, 1000.0, 1000.0);
        let layer = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(scale_for_layer(&map, &layer, 0.5), 50.0);
    }

    #[test]
    fn test_same_crs_skips_reprojector() {
        let result = BoundsTransformer::between(&PanicReprojector, &crs("EPSG:3857"), &crs("epsg:3857"));
        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_mercator_roundtrip() {
        let registry = TransformRegistry::new();
        let transformer = BoundsTransformer::between(&registry, &crs("EPSG:4326"), &crs("EPSG:3857"))
            .unwrap()
            .unwrap();

        let geographic = BoundingBox::new(-10.0, 40.0, 10.0, 55.0);
        let mercator = transformer.to_map(&geographic).unwrap();
        assert!(mercator.min_x < 0.0 && mercator.max_x > 0.0);

        let back = transformer.to_layer(&mercator).unwrap();
        assert!((back.min_x - geographic.min_x).abs() < 1e-9);
        assert!((back.max_y - geographic.max_y).abs() < 1e-9);
    }

    #[test]
    fn test_singular_transform_is_reprojection_error() {
        let registry = TransformRegistry::new().with_transform(
            crs("LOCAL:1"),
            crs("LOCAL:2"),
            Arc::new(AffineTransform::scale_translate(0.0, 0.0, 0.0, 0.0)),
        );
        let err = BoundsTransformer::between(&registry, &crs("LOCAL:1"), &crs("LOCAL:2")).unwrap_err();
        assert!(matches!(err, WmsError::Reprojection(_)));
    }

    #[test]
    fn test_out_of_domain_is_reprojection_error() {
        let registry = TransformRegistry::new();
        let transformer = BoundsTransformer::between(&registry, &crs("EPSG:4326"), &crs("EPSG:3857"))
            .unwrap()
            .unwrap();
        let err = transformer
            .to_map(&BoundingBox::new(0.0, 0.0, 10.0, 90.0))
            .unwrap_err();
        assert!(matches!(err, WmsError::Reprojection(_)));
    }
}
