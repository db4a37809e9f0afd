//! Affine transforms between planar CRSs.
//!
//! Useful for local grids that differ from a projected CRS by an offset,
//! scale, rotation or axis flip. The transform is stored as a homogeneous
//! 3x3 matrix:
//!
//! ```text
//! | a  b  tx |   | x |
//! | c  d  ty | * | y |
//! | 0  0  1  |   | 1 |
//! ```

use std::sync::Arc;

use nalgebra::{Matrix3, Vector3};

use crate::{CoordTransform, ProjectionError, ProjectionResult};

/// Determinants smaller than this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A planar affine transform.
#[derive(Debug, Clone, PartialEq)]
pub struct AffineTransform {
    matrix: Matrix3<f64>,
}

impl AffineTransform {
    /// Build from the six affine coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            matrix: Matrix3::new(a, b, tx, c, d, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Pure translation.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Axis-aligned scaling followed by a translation.
    pub fn scale_translate(sx: f64, sy: f64, tx: f64, ty: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, tx, ty)
    }
}

impl CoordTransform for AffineTransform {
    fn transform(&self, x: f64, y: f64) -> ProjectionResult<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ProjectionError::out_of_domain(x, y, "non-finite coordinate"));
        }

        let p = self.matrix * Vector3::new(x, y, 1.0);
        Ok((p.x, p.y))
    }

    fn inverse(&self) -> ProjectionResult<Arc<dyn CoordTransform>> {
        if self.matrix.determinant().abs() < SINGULAR_EPSILON {
            return Err(ProjectionError::SingularMatrix);
        }

        let inverted = self
            .matrix
            .try_inverse()
            .ok_or(ProjectionError::SingularMatrix)?;
        Ok(Arc::new(Self { matrix: inverted }))
    }
}
