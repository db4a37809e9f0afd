//! World and screen rectangles.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in map or layer coordinates.
///
/// Units are those of the CRS the box is expressed in: degrees for
/// geographic CRSs, metres for Web Mercator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box with lower-left corner (`x`, `y`) and the given size.
    pub fn from_origin(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// Parse a `minx,miny,maxx,maxy` query value.
    ///
    /// Blanks around each number are ignored. The result is not checked for
    /// validity; see [`is_valid`](Self::is_valid).
    pub fn from_wms_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        let &[min_x, min_y, max_x, max_y] = &parts[..] else {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        };

        let parse = |part: &str| {
            part.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(part.to_string()))
        };

        Ok(Self::new(
            parse(min_x)?,
            parse(min_y)?,
            parse(max_x)?,
            parse(max_y)?,
        ))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// All coordinates are finite and the box is not inverted.
    pub fn is_valid(&self) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .all(|v| v.is_finite())
            && self.min_x <= self.max_x
            && self.min_y <= self.max_y
    }

    /// Strict overlap test: boxes that only share an edge do not intersect,
    /// and an invalid box intersects nothing.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.is_valid()
            && other.is_valid()
            && self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// The overlapping part of two boxes, if they overlap.
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        self.intersects(other).then(|| {
            BoundingBox::new(
                self.min_x.max(other.min_x),
                self.min_y.max(other.min_y),
                self.max_x.min(other.max_x),
                self.max_y.min(other.max_y),
            )
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("expected 'minx,miny,maxx,maxy', got '{0}'")]
    InvalidFormat(String),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// A rectangle in screen pixel space.
///
/// Screen space grows downward, so `y` is the pixel row of the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenBounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl ScreenBounds {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Column just past the right edge.
    pub fn right(&self) -> i64 {
        self.x + self.width
    }

    /// Row just past the bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y + self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wms_bbox() {
        let bbox = BoundingBox::from_wms_string("-125.0,24.0,-66.0,50.0").unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_intersection() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));

        let intersection = a.intersection(&b).unwrap();
        assert_eq!(intersection.min_x, 5.0);
        assert_eq!(intersection.min_y, 5.0);
        assert_eq!(intersection.max_x, 10.0);
        assert_eq!(intersection.max_y, 10.0);
    }

    #[test]
    fn test_from_origin() {
        let bbox = BoundingBox::from_origin(100.0, 200.0, 50.0, 25.0);
        assert_eq!(bbox, BoundingBox::new(100.0, 200.0, 150.0, 225.0));
    }

    #[test]
    fn test_screen_bounds_edges() {
        let screen = ScreenBounds::new(10, -40, 30, 20);
        assert_eq!(screen.right(), 40);
        assert_eq!(screen.bottom(), -20);
    }
}
