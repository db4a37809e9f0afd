//! Error types for tile grid computation.

use thiserror::Error;

/// Result type alias using WmsError.
pub type WmsResult<T> = Result<T, WmsError>;

/// Broad failure classes, used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The layer configuration is unusable; nothing can be produced until it is fixed.
    Configuration,
    /// The reprojection service failed; the whole request is aborted.
    Reprojection,
    /// The caller passed a bad scale, bbox or CRS.
    InvalidInput,
}

/// Primary error type for tile grid operations.
#[derive(Debug, Error)]
pub enum WmsError {
    // === Configuration Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid layer configuration: {0}")]
    InvalidConfiguration(String),

    // === Reprojection Errors ===
    #[error("Reprojection failed: {0}")]
    Reprojection(String),

    // === Request Errors ===
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("Invalid BBOX: {0}")]
    InvalidBbox(String),

    #[error("Invalid CRS: {0}")]
    InvalidCrs(String),

    #[error("Layer not found: {0}")]
    LayerNotFound(String),
}

impl WmsError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WmsError::MissingParameter(_) | WmsError::InvalidConfiguration(_) => {
                ErrorKind::Configuration
            }
            WmsError::Reprojection(_) => ErrorKind::Reprojection,
            WmsError::InvalidScale(_)
            | WmsError::InvalidBbox(_)
            | WmsError::InvalidCrs(_)
            | WmsError::LayerNotFound(_) => ErrorKind::InvalidInput,
        }
    }

    /// Get the OGC WMS exception code for this error.
    pub fn wms_exception_code(&self) -> &'static str {
        match self {
            WmsError::MissingParameter(_) => "MissingParameterValue",
            WmsError::InvalidScale(_) => "InvalidParameterValue",
            WmsError::LayerNotFound(_) => "LayerNotDefined",
            WmsError::InvalidCrs(_) => "InvalidCRS",
            WmsError::InvalidBbox(_) => "InvalidBBox",
            _ => "NoApplicableCode",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WmsError::InvalidScale(_) | WmsError::InvalidCrs(_) | WmsError::InvalidBbox(_) => 400,

            WmsError::LayerNotFound(_) => 404,

            WmsError::Reprojection(_) => 422,

            WmsError::MissingParameter(_) | WmsError::InvalidConfiguration(_) => 500,
        }
    }
}

impl From<crate::bbox::BboxParseError> for WmsError {
    fn from(err: crate::bbox::BboxParseError) -> Self {
        WmsError::InvalidBbox(err.to_string())
    }
}

impl From<crate::crs::CrsParseError> for WmsError {
    fn from(err: crate::crs::CrsParseError) -> Self {
        WmsError::InvalidCrs(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BoundingBox, Crs};

    #[test]
    fn test_kinds() {
        assert_eq!(
            WmsError::MissingParameter("base_url".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            WmsError::Reprojection("singular".into()).kind(),
            ErrorKind::Reprojection
        );
        assert_eq!(
            WmsError::InvalidScale("0".into()).kind(),
            ErrorKind::InvalidInput
        );
    }

    #[test]
    fn test_http_status_codes() {
        assert_eq!(WmsError::InvalidBbox("x".into()).http_status_code(), 400);
        assert_eq!(WmsError::LayerNotFound("x".into()).http_status_code(), 404);
        assert_eq!(WmsError::Reprojection("x".into()).http_status_code(), 422);
        assert_eq!(
            WmsError::MissingParameter("x".into()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_parse_errors_convert() {
        let err: WmsError = BoundingBox::from_wms_string("1,2,3").unwrap_err().into();
        assert!(matches!(err, WmsError::InvalidBbox(_)));
        assert_eq!(err.wms_exception_code(), "InvalidBBox");

        let err: WmsError = Crs::from_wms_string("bogus").unwrap_err().into();
        assert!(matches!(err, WmsError::InvalidCrs(_)));
        assert_eq!(err.wms_exception_code(), "InvalidCRS");
    }
}
