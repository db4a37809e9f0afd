//! Coordinate Reference System identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized CRS identifier such as `EPSG:4326`.
///
/// Identifiers are compared after normalization (trimmed, upper case), so
/// `epsg:3857` and `EPSG:3857` name the same CRS. Aliases such as `CRS:84`
/// are kept distinct; the reprojection layer decides whether two different
/// identifiers are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Crs(String);

impl Crs {
    /// Parse a CRS string from a WMS request or layer configuration.
    ///
    /// Accepts `AUTHORITY:CODE` forms like:
    /// - "EPSG:4326"
    /// - "epsg:3857"
    /// - "CRS:84"
    pub fn from_wms_string(s: &str) -> Result<Self, CrsParseError> {
        let normalized = s.trim().to_uppercase();

        match normalized.split_once(':') {
            Some((authority, code))
                if !authority.is_empty()
                    && !code.is_empty()
                    && authority.chars().all(|c| c.is_ascii_alphanumeric())
                    && code.chars().all(|c| c.is_ascii_alphanumeric()) =>
            {
                Ok(Self(normalized))
            }
            _ => Err(CrsParseError::InvalidIdentifier(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric EPSG code, if this is an EPSG identifier.
    pub fn epsg_code(&self) -> Option<u32> {
        self.0
            .strip_prefix("EPSG:")
            .and_then(|code| code.parse().ok())
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        matches!(self.0.as_str(), "EPSG:4326" | "EPSG:4269" | "CRS:84")
    }

    /// Check if this is spherical Web Mercator.
    pub fn is_web_mercator(&self) -> bool {
        matches!(self.epsg_code(), Some(3857) | Some(900913))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Crs {
    type Error = CrsParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_wms_string(&value)
    }
}

impl From<Crs> for String {
    fn from(crs: Crs) -> Self {
        crs.0
    }
}

impl std::str::FromStr for Crs {
    type Err = CrsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wms_string(s)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CrsParseError {
    #[error("Invalid CRS identifier: {0}. Expected 'AUTHORITY:CODE'")]
    InvalidIdentifier(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(
            Crs::from_wms_string("EPSG:4326").unwrap().as_str(),
            "EPSG:4326"
        );
        assert_eq!(
            Crs::from_wms_string("epsg:3857").unwrap(),
            Crs::from_wms_string("EPSG:3857").unwrap()
        );
        assert_eq!(Crs::from_wms_string(" CRS:84 ").unwrap().as_str(), "CRS:84");
        assert!(Crs::from_wms_string("4326").is_err());
        assert!(Crs::from_wms_string("EPSG:").is_err());
        assert!(Crs::from_wms_string("EPSG:43 26").is_err());
    }

    #[test]
    fn test_epsg_code() {
        assert_eq!(Crs::from_wms_string("EPSG:3857").unwrap().epsg_code(), Some(3857));
        assert_eq!(Crs::from_wms_string("CRS:84").unwrap().epsg_code(), None);
    }

    #[test]
    fn test_geographic() {
        assert!(Crs::from_wms_string("EPSG:4326").unwrap().is_geographic());
        assert!(Crs::from_wms_string("CRS:84").unwrap().is_geographic());
        assert!(!Crs::from_wms_string("EPSG:3857").unwrap().is_geographic());
    }

    #[test]
    fn test_web_mercator() {
        assert!(Crs::from_wms_string("EPSG:3857").unwrap().is_web_mercator());
        assert!(Crs::from_wms_string("EPSG:900913").unwrap().is_web_mercator());
        assert!(!Crs::from_wms_string("EPSG:31370").unwrap().is_web_mercator());
    }

    #[test]
    fn test_serde_normalizes() {
        let crs: Crs = serde_json::from_str("\"epsg:4326\"").unwrap();
        assert_eq!(crs.as_str(), "EPSG:4326");
        assert!(serde_json::from_str::<Crs>("\"nonsense\"").is_err());
    }
}
