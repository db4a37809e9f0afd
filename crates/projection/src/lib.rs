//! Coordinate reference system transformations.
//!
//! Provides the point-reprojection capability consumed by the tile grid
//! engine: a [`CoordTransform`] moves single points between two CRSs and can
//! be inverted, and a [`Reprojector`] looks transforms up by CRS pair.

pub mod affine;
pub mod error;
pub mod mercator;
pub mod registry;
pub mod transform;

pub use affine::AffineTransform;
pub use error::{ProjectionError, ProjectionResult};
pub use mercator::WebMercator;
pub use registry::{Reprojector, TransformRegistry};
pub use transform::{CoordTransform, Identity};
