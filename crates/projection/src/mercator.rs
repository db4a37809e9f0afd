//! Spherical Web Mercator projection (EPSG:3857).
//!
//! Maps geographic longitude/latitude in degrees to meters on a sphere with
//! the WGS84 semi-major axis. Latitudes at or beyond the poles have no image
//! and are rejected.

use std::f64::consts::PI;
use std::sync::Arc;

use crate::{CoordTransform, ProjectionError, ProjectionResult};

/// WGS84 semi-major axis used by spherical Mercator (meters).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half the projected world width (meters).
pub const MAX_EXTENT: f64 = PI * EARTH_RADIUS;

/// Which way the transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// lon/lat degrees to meters
    Forward,
    /// meters to lon/lat degrees
    Inverse,
}

/// Web Mercator transform in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebMercator {
    direction: Direction,
}

impl WebMercator {
    /// Geographic degrees to Web Mercator meters.
    pub fn from_geographic() -> Self {
        Self {
            direction: Direction::Forward,
        }
    }

    /// Web Mercator meters to geographic degrees.
    pub fn to_geographic() -> Self {
        Self {
            direction: Direction::Inverse,
        }
    }

    fn project(lon: f64, lat: f64) -> ProjectionResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(ProjectionError::out_of_domain(lon, lat, "non-finite coordinate"));
        }
        if lat.abs() >= 90.0 {
            return Err(ProjectionError::out_of_domain(
                lon,
                lat,
                "latitude must lie strictly between -90 and 90 degrees",
            ));
        }

        let to_rad = PI / 180.0;
        let x = EARTH_RADIUS * lon * to_rad;
        let y = EARTH_RADIUS * (PI / 4.0 + lat * to_rad / 2.0).tan().ln();
        Ok((x, y))
    }

    fn unproject(x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::out_of_domain(x, y, "non-finite coordinate"));
        }

        let to_deg = 180.0 / PI;
        let lon = x / EARTH_RADIUS * to_deg;
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0) * to_deg;
        Ok((lon, lat))
    }
}

impl CoordTransform for WebMercator {
    fn transform(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        match self.direction {
            Direction::Forward => Self::project(x, y),
            Direction::Inverse => Self::unproject(x, y),
        }
    }

    fn inverse(&self) -> ProjectionResult<Arc<dyn CoordTransform>> {
        let flipped = match self.direction {
            Direction::Forward => Self::to_geographic(),
            Direction::Inverse => Self::from_geographic(),
        };
        Ok(Arc::new(flipped))
    }
}
