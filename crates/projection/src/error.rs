//! Error types for reprojection.

use thiserror::Error;
use wms_common::WmsError;

/// Errors raised by point transforms and transform lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// No transform is known between the two CRSs.
    #[error("no transform from {source_crs} to {target_crs}")]
    UnsupportedTransform {
        source_crs: String,
        target_crs: String,
    },

    /// The point lies outside the domain of the projection.
    #[error("point ({x}, {y}) is outside the projection domain: {reason}")]
    OutOfDomain { x: f64, y: f64, reason: String },

    /// The transform matrix cannot be inverted.
    #[error("transform matrix is singular")]
    SingularMatrix,
}

impl ProjectionError {
    /// Create an OutOfDomain error.
    pub fn out_of_domain(x: f64, y: f64, reason: impl Into<String>) -> Self {
        Self::OutOfDomain {
            x,
            y,
            reason: reason.into(),
        }
    }
}

impl From<ProjectionError> for WmsError {
    fn from(err: ProjectionError) -> Self {
        WmsError::Reprojection(err.to_string())
    }
}

/// Result type for projection operations.
pub type ProjectionResult<T> = std::result::Result<T, ProjectionError>;
