//! Point transform abstraction.

use std::fmt::Debug;
use std::sync::Arc;

use crate::ProjectionResult;

/// A fallible mapping of 2D points from one CRS to another.
pub trait CoordTransform: Debug + Send + Sync {
    /// Transform a single point.
    fn transform(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)>;

    /// The transform going the opposite way.
    fn inverse(&self) -> ProjectionResult<Arc<dyn CoordTransform>>;
}

/// Transform that returns every point unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl CoordTransform for Identity {
    fn transform(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        Ok((x, y))
    }

    fn inverse(&self) -> ProjectionResult<Arc<dyn CoordTransform>> {
        Ok(Arc::new(Identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_roundtrip() {
        let forward = Identity;
        let inverse = forward.inverse().unwrap();
        assert_eq!(forward.transform(12.5, -3.0).unwrap(), (12.5, -3.0));
        assert_eq!(inverse.transform(12.5, -3.0).unwrap(), (12.5, -3.0));
    }
}
