//! Tile grid computation and resolution matching for upstream WMS layers.
//!
//! Given a viewport bounding box, a target CRS and a display scale (pixels
//! per map unit), the [`GridPainter`] selects the best server resolution,
//! lays an integer tile grid over the viewport and emits one GetMap URL and
//! one screen rectangle per tile.
//!
//! # Architecture
//!
//! ```text
//! paint(crs, bounds, scale)
//!      │
//!      ├─► BoundsTransformer (only when crs != layer crs)
//!      │
//!      ├─► clip to MaxExtent ──► empty? return []
//!      │
//!      ├─► ResolutionCatalog::find_best(layer_scale)
//!      │
//!      ├─► compute_grid(max_extent, bounds, resolution, layer_scale)
//!      │
//!      └─► per cell: screen_bbox + GetMap URL ──► Vec<Tile>
//! ```
//!
//! Grid boundaries are snapped to whole pixels at the requested scale, so
//! any two requests at the same scale produce identical tiles where they
//! overlap. Layer state ([`TileLayer`]) is immutable after construction and
//! can be shared freely between threads.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use projection::TransformRegistry;
//! use wms_common::BoundingBox;
//! use wms_tiling::{GridPainter, TileLayer};
//!
//! let layer = TileLayer::load_from_file("config/layers/osm.yaml")?;
//! let painter = GridPainter::new(Arc::new(layer), Arc::new(TransformRegistry::new()));
//! let tiles = painter.paint("EPSG:3857", &BoundingBox::new(0.0, 0.0, 5e5, 5e5), 1e-3)?;
//! ```

pub mod bounds;
pub mod grid;
pub mod layer;
pub mod painter;
pub mod request;
pub mod resolution;

pub use bounds::{scale_for_layer, transform_bbox, BoundsTransformer};
pub use grid::{compute_grid, TileGrid};
pub use layer::TileLayer;
pub use painter::{GridPainter, PaintStage};
pub use request::{screen_bbox, TileRequestBuilder};
pub use resolution::{derive_quad_tree_resolution, Resolution, ResolutionCatalog};
